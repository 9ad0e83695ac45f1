mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any kind of struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
///
/// ```
/// use reorder_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = "the stack does not have enough values",
///     labels = ["this command"],
/// )]
/// pub struct StackUnderflow;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | The text of the labels that point to the spans of the error, span by span.   |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// `message` and `help` accept an expression that evaluates to a [`String`] (or `&str`); `labels`
/// accepts an expression that evaluates to an iterator of them. For structs with named fields, the
/// expressions are evaluated with the members of the struct in scope, so they can be used in the
/// expressions (tuple structs are not supported).
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    let name_str = name.to_string();
    quote! {
        impl ::reorder_error::ErrorKind for #name {
            fn name(&self) -> &'static str {
                #name_str
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            #target
        }
    }.into()
}
