use super::{EntityAttr, ErrorSet, Property};

#[derive(Debug)]
pub(crate) struct Entity {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Properties, in declaration order
    pub(crate) properties: Vec<Property>,

    /// Optional table to map the entity to
    pub(crate) table: Option<syn::LitStr>,

    pub(crate) supertypes: Vec<syn::Path>,
}

impl Entity {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "entity fields must be named",
            ));
        };

        // Descriptors are built from a plain function pointer, which cannot
        // be generic
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "entity generics are not supported",
            ));
        }

        let mut attr = EntityAttr::default();
        let mut properties = vec![];
        let mut errs = ErrorSet::new();

        if let Err(err) = attr.populate_from_ast(&ast.attrs) {
            errs.push(err);
        }

        for (index, field) in node.named.iter().enumerate() {
            match Property::from_ast(field, index) {
                Ok(property) => properties.push(property),
                Err(err) => errs.push(err),
            }
        }

        let mut ids = properties.iter().filter_map(|property| property.attrs.id.as_ref());
        if ids.next().is_some() {
            for duplicate in ids {
                errs.push(syn::Error::new_spanned(
                    duplicate,
                    "only one field can be marked #[id]",
                ));
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
            properties,
            table: attr.table,
            supertypes: attr.supertypes,
        })
    }
}
