use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_descriptor(&self) -> TokenStream {
        let arbor = &self.arbor;

        let table = self
            .entity
            .table
            .as_ref()
            .map(|table| quote!(.table(#table)));

        let supertypes = self
            .entity
            .supertypes
            .iter()
            .map(|path| quote!(.supertype(#arbor::TypeRef::of::<#path>())));

        let properties = self.entity.properties.iter().map(|property| {
            let name = &property.name;
            let ty = &property.ty;
            let attrs = &property.attrs;

            let id = attrs.id.as_ref().map(|_| quote!(.id()));
            let column = attrs.column.as_ref().map(|column| {
                let name = &column.name;
                quote!(.column(#name))
            });
            let reverse_column = attrs.reverse_column.as_ref().map(|column| {
                let name = &column.name;
                quote!(.reverse_column(#name))
            });
            let key_column = attrs.key_column.as_ref().map(|column| {
                let name = &column.name;
                quote!(.key_column(#name))
            });

            quote! {
                .property(
                    #arbor::PropertyDescriptor::new(#name, <#ty as #arbor::Field>::ty())
                        #id #column #reverse_column #key_column
                )
            }
        });

        quote! {
            fn descriptor() -> #arbor::EntityDescriptor {
                #arbor::EntityDescriptor::new(#arbor::TypeRef::of::<Self>())
                    #table
                    #( #supertypes )*
                    #( #properties )*
            }
        }
    }
}
