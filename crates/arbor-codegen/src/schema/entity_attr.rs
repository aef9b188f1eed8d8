use super::ErrorSet;

use syn::punctuated::Punctuated;

#[derive(Debug, Default)]
pub(crate) struct EntityAttr {
    /// Optional database table name to map the entity to
    pub(crate) table: Option<syn::LitStr>,

    /// Types the entity can be read as, from `#[supertype(A, B)]`
    pub(crate) supertypes: Vec<syn::Path>,
}

impl EntityAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if attr.path().is_ident("table") {
                if self.table.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
                    continue;
                }

                match table_name(attr) {
                    Ok(name) => self.table = Some(name),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("supertype") {
                let paths = attr.parse_args_with(
                    Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
                );

                match paths {
                    Ok(paths) if paths.is_empty() => errs.push(syn::Error::new_spanned(
                        attr,
                        "expected at least one type in `#[supertype(...)]`",
                    )),
                    Ok(paths) => self.supertypes.extend(paths),
                    Err(err) => errs.push(err),
                }
            }
        }

        match errs.collect() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn table_name(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let expected = || syn::Error::new_spanned(attr, "expected `table = \"table_name\"`");

    let syn::Meta::NameValue(meta) = &attr.meta else {
        return Err(expected());
    };

    let syn::Expr::Lit(lit) = &meta.value else {
        return Err(expected());
    };

    let syn::Lit::Str(lit) = &lit.lit else {
        return Err(expected());
    };

    Ok(lit.clone())
}
