use super::{ColumnName, ErrorSet};

#[derive(Debug)]
pub(crate) struct Property {
    /// Slot of the property in the entity's record
    pub(crate) index: usize,

    pub(crate) ident: syn::Ident,

    /// Property name, as used in paths and statement names
    pub(crate) name: String,

    pub(crate) ty: syn::Type,

    pub(crate) attrs: PropertyAttr,
}

#[derive(Debug, Default)]
pub(crate) struct PropertyAttr {
    /// The field is annotated with `#[id]`
    pub(crate) id: Option<syn::Attribute>,

    /// `#[column("name")]`
    pub(crate) column: Option<ColumnName>,

    /// `#[reverse_column("name")]`, for relations
    pub(crate) reverse_column: Option<ColumnName>,

    /// `#[key_column("name")]`, for lists and maps
    pub(crate) key_column: Option<ColumnName>,
}

impl Property {
    pub(super) fn from_ast(field: &syn::Field, index: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "entity fields must be named"));
        };

        let mut errs = ErrorSet::new();
        let mut attrs = PropertyAttr::default();

        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                if attrs.id.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[id] attribute"));
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.push(syn::Error::new_spanned(attr, "#[id] takes no arguments"));
                } else {
                    attrs.id = Some(attr.clone());
                }
            } else if attr.path().is_ident("column") {
                set_column(&mut errs, &mut attrs.column, attr, "column");
            } else if attr.path().is_ident("reverse_column") {
                set_column(&mut errs, &mut attrs.reverse_column, attr, "reverse_column");
            } else if attr.path().is_ident("key_column") {
                set_column(&mut errs, &mut attrs.key_column, attr, "key_column");
            }
        }

        if let Some(id) = &attrs.id {
            for (other, name) in [
                (&attrs.reverse_column, "reverse_column"),
                (&attrs.key_column, "key_column"),
            ] {
                if other.is_some() {
                    errs.push(syn::Error::new_spanned(
                        id,
                        format!("an identifier cannot have a #[{name}] attribute"),
                    ));
                }
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            index,
            ident: ident.clone(),
            name: unraw(ident),
            ty: field.ty.clone(),
            attrs,
        })
    }
}

fn set_column(
    errs: &mut ErrorSet,
    slot: &mut Option<ColumnName>,
    attr: &syn::Attribute,
    name: &str,
) {
    if slot.is_some() {
        errs.push(syn::Error::new_spanned(
            attr,
            format!("duplicate #[{name}] attribute"),
        ));
        return;
    }

    match ColumnName::from_ast(attr) {
        Ok(column) => *slot = Some(column),
        Err(err) => errs.push(err),
    }
}

/// `r#type` is named `type`.
pub(super) fn unraw(ident: &syn::Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(name) => name.to_string(),
        None => name,
    }
}
