use crate::schema::ScalarEnum;

use proc_macro2::TokenStream;
use quote::quote;

pub(super) fn expand(scalar: &ScalarEnum, arbor: &TokenStream) -> TokenStream {
    let ident = &scalar.ident;
    let idents = scalar
        .variants
        .iter()
        .map(|variant| &variant.ident)
        .collect::<Vec<_>>();
    let names = scalar
        .variants
        .iter()
        .map(|variant| &variant.name)
        .collect::<Vec<_>>();

    quote! {
        impl #arbor::Field for #ident {
            fn ty() -> #arbor::Type {
                #arbor::Type::Scalar(#arbor::ScalarTy::Enum(#arbor::EnumTy {
                    name: ::std::any::type_name::<Self>(),
                    variants: &[ #( #names ),* ],
                }))
            }

            fn to_value(&self) -> #arbor::Value {
                let name = match self {
                    #( Self::#idents => #names, )*
                };
                #arbor::Value::from(name)
            }

            fn load(value: #arbor::Value) -> #arbor::Result<Self> {
                if let #arbor::Value::String(name) = &value {
                    match name.as_str() {
                        #( #names => return Ok(Self::#idents), )*
                        _ => {}
                    }
                }

                Err(#arbor::Error::type_conversion(value, ::std::any::type_name::<Self>()))
            }
        }
    }
}
