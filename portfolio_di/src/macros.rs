/// Declares a provider struct.
///
/// Plain fields are leaf dependencies which are cloned on request. A
/// `..field: Base { T, ... }` entry delegates building the listed types to
/// another provider.
#[macro_export]
macro_rules! provider {
    ($(#[doc=$doc:literal])* $vis:vis $ident:ident {
        $( $field:ident: $ty:ty, )*
        $( .. $bfield:ident: $base:ty { $($ity:ty,)* $(,)? } )*
    }) => {
        $(#[doc=$doc])*
        $vis struct $ident {
            _cache: $crate::TypeMap,
            $( $field: $ty, )*
            $( $bfield: $base, )*
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::TypeMap {
                &mut self._cache
            }
        }

        $( $crate::provider!(@leaf $ident, $field: $ty); )*
        $( $( $crate::provider!(@delegate $ident, $bfield: $ity); )* )*
    };

    (@leaf $ident:ident, $field:ident: $ty:ty) => {
        impl $crate::Build<$ident> for $ty {
            fn build(provider: &mut $ident) -> Self {
                provider.$field.clone()
            }
        }
    };

    (@delegate $ident:ident, $bfield:ident: $ty:ty) => {
        impl $crate::Build<$ident> for $ty {
            fn build(provider: &mut $ident) -> Self {
                <$ty as $crate::Build<_>>::build(&mut provider.$bfield)
            }
        }
    };
}
