use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Wraps [`tracing::instrument`] and emits a `trace` event on every call.
///
/// The return value is recorded at `trace` level. Any arguments are passed
/// through to `tracing::instrument` (e.g. `skip(self)`).
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!("call");
            #block
        }
    }
    .into()
}
