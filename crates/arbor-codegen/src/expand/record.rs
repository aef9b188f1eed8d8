use super::Expand;

use proc_macro2::{Literal, TokenStream};
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_to_record(&self) -> TokenStream {
        let arbor = &self.arbor;
        let fields = self.entity.properties.iter().map(|property| {
            let ident = &property.ident;
            quote!(#arbor::Field::to_value(&self.#ident))
        });

        quote! {
            fn to_record(&self) -> #arbor::ValueRecord {
                #arbor::ValueRecord::from_vec(vec![ #( #fields ),* ])
            }
        }
    }

    pub(super) fn expand_load_record(&self) -> TokenStream {
        let arbor = &self.arbor;
        let fields = self.entity.properties.iter().map(|property| {
            let ident = &property.ident;
            let ty = &property.ty;
            let index = Literal::usize_unsuffixed(property.index);

            quote! {
                #ident: <#ty as #arbor::Field>::load(record.take_checked(#index)?)?,
            }
        });

        quote! {
            fn load_record(mut record: #arbor::ValueRecord) -> #arbor::Result<Self> {
                Ok(Self {
                    #( #fields )*
                })
            }
        }
    }
}
