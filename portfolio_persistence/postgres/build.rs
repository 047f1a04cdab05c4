use std::{
    collections::BTreeMap,
    fmt::Write,
    path::{Path, PathBuf},
};

/// Embeds `migrations/<name>.up.sql` / `<name>.down.sql` pairs as a
/// `&[Migration]` literal, ordered by name.
fn main() {
    println!("cargo::rerun-if-changed=migrations");

    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let migrations_rs = out_dir.join("migrations.rs");

    std::fs::write(&migrations_rs, render(&collect_migrations(&dir))).unwrap();
    println!("cargo::rustc-env=MIGRATIONS={}", migrations_rs.display());
}

#[derive(Default)]
struct Pair {
    up: Option<String>,
    down: Option<String>,
}

fn collect_migrations(dir: &Path) -> BTreeMap<String, Pair> {
    let mut out = BTreeMap::<String, Pair>::new();
    for entry in dir.read_dir().unwrap() {
        let path = entry.unwrap().path();
        let file_name = path.file_name().unwrap().to_str().unwrap().to_owned();

        let (name, is_up) = if let Some(name) = file_name.strip_suffix(".up.sql") {
            (name, true)
        } else if let Some(name) = file_name.strip_suffix(".down.sql") {
            (name, false)
        } else {
            continue;
        };

        let content = std::fs::read_to_string(&path).unwrap();
        let pair = out.entry(name.to_owned()).or_default();
        if is_up {
            pair.up = Some(content);
        } else {
            pair.down = Some(content);
        }
    }
    out
}

fn render(migrations: &BTreeMap<String, Pair>) -> String {
    let mut out = String::from("&[");
    for (name, pair) in migrations {
        let up = pair
            .up
            .as_deref()
            .unwrap_or_else(|| panic!("migration {name} has no up.sql"));
        let down = pair
            .down
            .as_deref()
            .unwrap_or_else(|| panic!("migration {name} has no down.sql"));
        write!(&mut out, "Migration{{name:{name:?},up:{up:?},down:{down:?}}},").unwrap();
    }
    out.push(']');
    out
}
