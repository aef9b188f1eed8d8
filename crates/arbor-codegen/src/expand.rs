mod descriptor;
mod record;
mod scalar_enum;

use crate::schema::{Entity, ScalarEnum};

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The entity being expanded
    entity: &'a Entity,

    /// Path prefix for arbor types
    arbor: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let arbor = &self.arbor;
        let ident = &self.entity.ident;
        let descriptor = self.expand_descriptor();
        let to_record = self.expand_to_record();
        let load_record = self.expand_load_record();

        wrap_in_const(quote! {
            impl #arbor::Field for #ident {
                fn ty() -> #arbor::Type {
                    #arbor::Type::Entity(<Self as #arbor::Entity>::entity_ref())
                }

                fn to_value(&self) -> #arbor::Value {
                    #arbor::Value::Record(<Self as #arbor::Entity>::to_record(self))
                }

                fn load(value: #arbor::Value) -> #arbor::Result<Self> {
                    <Self as #arbor::Entity>::load_record(value.into_record()?)
                }
            }

            impl #arbor::Entity for #ident {
                #descriptor
                #to_record
                #load_record
            }
        })
    }
}

pub(super) fn entity(entity: &Entity) -> TokenStream {
    Expand {
        entity,
        arbor: quote!(_arbor::codegen_support),
    }
    .expand()
}

pub(super) fn scalar_enum(scalar: &ScalarEnum) -> TokenStream {
    wrap_in_const(scalar_enum::expand(scalar, &quote!(_arbor::codegen_support)))
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use arbor as _arbor;
            #code
        };
    }
}
