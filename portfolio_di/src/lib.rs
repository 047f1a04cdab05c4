extern crate self as portfolio_di;

pub use portfolio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

/// Holds the leaf dependencies (database handle, configuration values) and
/// caches every service built from them, so each service type is constructed
/// at most once per provider.
pub trait Provider: Sized {
    fn cache(&mut self) -> &mut TypeMap;

    fn get<T: 'static + Clone>(&mut self) -> Option<T> {
        self.cache().get::<T>().cloned()
    }

    fn insert<T: 'static>(&mut self, value: T) {
        self.cache().insert(value);
    }
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}
