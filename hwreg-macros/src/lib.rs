use syn::parse_macro_input;

use crate::gen::register_impl;

mod ast;
mod gen;
mod layout;
mod types;

#[proc_macro]
pub fn register(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    register_impl(parse_macro_input!(tokens)).into()
}
