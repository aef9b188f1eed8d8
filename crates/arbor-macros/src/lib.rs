extern crate proc_macro;

use proc_macro::TokenStream;

#[proc_macro_derive(Entity, attributes(id, column, reverse_column, key_column, table, supertype))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    match arbor_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[proc_macro_derive(Enum, attributes(column))]
pub fn derive_enum(input: TokenStream) -> TokenStream {
    match arbor_codegen::generate_enum(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
