use syn::spanned::Spanned;
use syn::{Meta, Result, parse::Parse};

#[derive(Default)]
/// Options of `#[SQLiteTable(...)]`.
pub struct TableAttributes {
    pub(crate) name: Option<String>,
    pub(crate) strict: bool,
    pub(crate) without_rowid: bool,
}

impl Parse for TableAttributes {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = TableAttributes::default();
        let metas = input.parse_terminated(Meta::parse, syn::Token![,])?;

        for meta in metas {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    if let syn::Expr::Lit(lit) = &nv.value
                        && let syn::Lit::Str(str_lit) = &lit.lit
                    {
                        attrs.name = Some(str_lit.value());
                        continue;
                    }
                    return Err(syn::Error::new(
                        nv.value.span(),
                        "expected a string literal for `name`",
                    ));
                }
                Meta::Path(path) if path.is_ident("strict") => {
                    attrs.strict = true;
                    continue;
                }
                Meta::Path(path) if path.is_ident("without_rowid") => {
                    attrs.without_rowid = true;
                    continue;
                }
                _ => {}
            }
            return Err(syn::Error::new(
                meta.span(),
                "unknown table option; expected `name = \"...\"`, `strict` or `without_rowid`",
            ));
        }
        Ok(attrs)
    }
}
