use super::{property::unraw, ColumnName, ErrorSet};

/// A fieldless enum stored by variant name.
#[derive(Debug)]
pub(crate) struct ScalarEnum {
    pub(crate) ident: syn::Ident,

    pub(crate) variants: Vec<Variant>,
}

#[derive(Debug)]
pub(crate) struct Variant {
    pub(crate) ident: syn::Ident,

    /// Stored name, the variant identifier unless renamed with
    /// `#[column("name")]`
    pub(crate) name: String,
}

impl ScalarEnum {
    pub(crate) fn from_ast(ast: &syn::ItemEnum) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "enum generics are not supported",
            ));
        }

        if ast.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                ast,
                "enum must have at least one variant",
            ));
        }

        let mut errs = ErrorSet::new();
        let mut variants: Vec<Variant> = vec![];

        for node in &ast.variants {
            if !matches!(node.fields, syn::Fields::Unit) {
                errs.push(syn::Error::new_spanned(
                    node,
                    "only unit variants can be stored",
                ));
                continue;
            }

            let mut name = unraw(&node.ident);

            for attr in &node.attrs {
                if attr.path().is_ident("column") {
                    match ColumnName::from_ast(attr) {
                        Ok(column) => name = column.name.value(),
                        Err(err) => errs.push(err),
                    }
                }
            }

            if variants.iter().any(|variant| variant.name == name) {
                errs.push(syn::Error::new_spanned(
                    node,
                    format!("duplicate stored name `{name}`"),
                ));
                continue;
            }

            variants.push(Variant {
                ident: node.ident.clone(),
                name,
            });
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            ident: ast.ident.clone(),
            variants,
        })
    }
}
