pub use portfolio_utils_derive::trace_instrument;

mod macros;

/// Returns the version string reported by the CLI and the startup log.
pub fn portfolio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
