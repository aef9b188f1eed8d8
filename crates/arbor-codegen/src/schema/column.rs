/// A column name given as the single argument of an attribute, as in
/// `#[column("order_id")]` or `#[reverse_column("order_id")]`.
#[derive(Debug)]
pub(crate) struct ColumnName {
    pub(crate) name: syn::LitStr,
}

impl ColumnName {
    pub(super) fn from_ast(attr: &syn::Attribute) -> syn::Result<ColumnName> {
        attr.parse_args()
    }
}

impl syn::parse::Parse for ColumnName {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let name: syn::LitStr = input.parse()?;

        if name.value().is_empty() {
            return Err(syn::Error::new(name.span(), "column name must not be empty"));
        }

        if !input.is_empty() {
            return Err(input.error("expected a single column name"));
        }

        Ok(Self { name })
    }
}
