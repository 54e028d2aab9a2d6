use heck::ToUpperCamelCase;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Error, Field, Ident, Lit, LitStr, Result, Token, Type};

use crate::paths::core as core_paths;

/// `ON CONFLICT` policy named by `on_conflict = "..."`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ConflictPolicy {
    Abort,
    Rollback,
    Fail,
    Ignore,
    Replace,
}

impl ConflictPolicy {
    fn from_literal(lit: &LitStr) -> Result<Self> {
        match lit.value().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "rollback" => Ok(Self::Rollback),
            "fail" => Ok(Self::Fail),
            "ignore" => Ok(Self::Ignore),
            "replace" => Ok(Self::Replace),
            _ => Err(Error::new_spanned(
                lit,
                "expected one of \"abort\", \"rollback\", \"fail\", \"ignore\", \"replace\"",
            )),
        }
    }

    fn to_tokens(self) -> TokenStream {
        let path = core_paths::conflict_policy();
        match self {
            Self::Abort => quote!(#path::Abort),
            Self::Rollback => quote!(#path::Rollback),
            Self::Fail => quote!(#path::Fail),
            Self::Ignore => quote!(#path::Ignore),
            Self::Replace => quote!(#path::Replace),
        }
    }
}

/// Referential action named by `on_update` / `on_delete`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ReferentialAction {
    NoAction,
    Restrict,
    SetNull,
    SetDefault,
    Cascade,
}

impl ReferentialAction {
    fn from_literal(lit: &LitStr) -> Result<Self> {
        let value = lit.value().to_ascii_lowercase().replace(' ', "_");
        match value.as_str() {
            "no_action" => Ok(Self::NoAction),
            "restrict" => Ok(Self::Restrict),
            "set_null" => Ok(Self::SetNull),
            "set_default" => Ok(Self::SetDefault),
            "cascade" => Ok(Self::Cascade),
            _ => Err(Error::new_spanned(
                lit,
                "expected one of \"no_action\", \"restrict\", \"set_null\", \"set_default\", \"cascade\"",
            )),
        }
    }

    fn to_tokens(self) -> TokenStream {
        let path = core_paths::foreign_key_action();
        match self {
            Self::NoAction => quote!(#path::NoAction),
            Self::Restrict => quote!(#path::Restrict),
            Self::SetNull => quote!(#path::SetNull),
            Self::SetDefault => quote!(#path::SetDefault),
            Self::Cascade => quote!(#path::Cascade),
        }
    }
}

/// One constraint as written in `#[column(...)]`, in declaration order.
#[derive(Clone, Debug)]
pub(crate) enum FieldConstraint {
    PrimaryKey { descending: Option<bool> },
    NotNull,
    Unique,
    References { table: String, columns: Vec<String> },
    Default(String),
    Collate(String),
}

/// Everything the table macro needs to know about one field.
pub(crate) struct FieldInfo<'a> {
    pub(crate) ident: &'a Ident,
    pub(crate) ty: &'a Type,
    pub(crate) column_name: String,
    /// The generated zero-sized column type, e.g. `UserId`.
    pub(crate) column_ident: Ident,
    pub(crate) index: usize,
    pub(crate) is_primary: bool,
    pub(crate) constraints: Vec<FieldConstraint>,
    pub(crate) on_conflict: Option<ConflictPolicy>,
    pub(crate) on_update: Option<ReferentialAction>,
    pub(crate) on_delete: Option<ReferentialAction>,
    pub(crate) getter: Option<Ident>,
    pub(crate) setter: Option<Ident>,
    /// Span of the `#[column]` attribute, or of the field without one.
    pub(crate) span: Span,
}

impl<'a> FieldInfo<'a> {
    pub(crate) fn from_field(struct_ident: &Ident, field: &'a Field, index: usize) -> Result<Self> {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new_spanned(field, "table fields must be named"))?;
        let field_name = ident.unraw().to_string();

        let mut info = FieldInfo {
            ident,
            ty: &field.ty,
            column_name: field_name.clone(),
            column_ident: format_ident!("{}{}", struct_ident, field_name.to_upper_camel_case()),
            index,
            is_primary: false,
            constraints: Vec::new(),
            on_conflict: None,
            on_update: None,
            on_delete: None,
            getter: None,
            setter: None,
            span: ident.span(),
        };

        let mut explicit_name = false;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("column")) {
            info.span = attr.span();
            attr.parse_nested_meta(|meta| info.parse_option(&meta, &mut explicit_name))?;
        }
        Ok(info)
    }

    fn parse_option(&mut self, meta: &ParseNestedMeta<'_>, explicit_name: &mut bool) -> Result<()> {
        let Some(key) = meta.path.get_ident().map(|ident| ident.to_string()) else {
            return Err(meta.error("expected a column option"));
        };

        match key.as_str() {
            "name" => {
                if *explicit_name {
                    return Err(meta.error("duplicate `name`"));
                }
                let lit: LitStr = meta.value()?.parse()?;
                self.column_name = lit.value();
                *explicit_name = true;
            }
            "primary" => {
                if self.is_primary {
                    return Err(meta.error("duplicate `primary`"));
                }
                let descending = if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    match lit.value().to_ascii_lowercase().as_str() {
                        "asc" => Some(false),
                        "desc" => Some(true),
                        _ => return Err(Error::new_spanned(lit, "expected \"asc\" or \"desc\"")),
                    }
                } else {
                    None
                };
                self.is_primary = true;
                self.constraints
                    .push(FieldConstraint::PrimaryKey { descending });
            }
            "unique" => self.constraints.push(FieldConstraint::Unique),
            "not_null" => self.constraints.push(FieldConstraint::NotNull),
            "on_conflict" => {
                let lit: LitStr = meta.value()?.parse()?;
                self.on_conflict = Some(ConflictPolicy::from_literal(&lit)?);
            }
            "default" => {
                let lit: Lit = meta.value()?.parse()?;
                self.constraints
                    .push(FieldConstraint::Default(literal_text(&lit)?));
            }
            "collate" => {
                let lit: LitStr = meta.value()?.parse()?;
                self.constraints.push(FieldConstraint::Collate(lit.value()));
            }
            "references" => {
                let content;
                syn::parenthesized!(content in meta.input);
                let (table, columns) = parse_references(&content)?;
                self.constraints
                    .push(FieldConstraint::References { table, columns });
            }
            "on_update" => {
                let lit: LitStr = meta.value()?.parse()?;
                self.on_update = Some(ReferentialAction::from_literal(&lit)?);
            }
            "on_delete" => {
                let lit: LitStr = meta.value()?.parse()?;
                self.on_delete = Some(ReferentialAction::from_literal(&lit)?);
            }
            "get" => self.getter = Some(meta.value()?.parse()?),
            "set" => self.setter = Some(meta.value()?.parse()?),
            _ => {
                return Err(meta.error(
                    "unsupported column option; expected one of `name`, `primary`, `unique`, \
                     `not_null`, `on_conflict`, `default`, `collate`, `references`, \
                     `on_update`, `on_delete`, `get`, `set`",
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn has_references(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c, FieldConstraint::References { .. }))
    }

    /// `INTEGER PRIMARY KEY DESC` is not a rowid alias.
    pub(crate) fn is_descending_key(&self) -> bool {
        self.constraints.iter().any(|c| {
            matches!(
                c,
                FieldConstraint::PrimaryKey {
                    descending: Some(true)
                }
            )
        })
    }

    /// The `&[Constraint]` literal for this column's `ColumnInfo`.
    pub(crate) fn constraint_tokens(&self) -> TokenStream {
        let constraint = core_paths::constraint();
        let policy = self
            .on_conflict
            .unwrap_or(ConflictPolicy::Abort)
            .to_tokens();

        let items = self.constraints.iter().map(|c| match c {
            FieldConstraint::PrimaryKey { descending } => {
                let order_by = core_paths::order_by();
                let order = match descending {
                    None => quote!(::std::option::Option::None),
                    Some(false) => quote!(::std::option::Option::Some(#order_by::Asc)),
                    Some(true) => quote!(::std::option::Option::Some(#order_by::Desc)),
                };
                quote!(#constraint::PrimaryKey { on_conflict: #policy, order: #order })
            }
            FieldConstraint::NotNull => quote!(#constraint::NotNull(#policy)),
            FieldConstraint::Unique => quote!(#constraint::Unique(#policy)),
            FieldConstraint::References { table, columns } => {
                let foreign_key = core_paths::foreign_key();
                let on_update = self
                    .on_update
                    .unwrap_or(ReferentialAction::NoAction)
                    .to_tokens();
                let on_delete = self
                    .on_delete
                    .unwrap_or(ReferentialAction::NoAction)
                    .to_tokens();
                quote! {
                    #constraint::ForeignKey(#foreign_key {
                        table: #table,
                        columns: &[#(#columns),*],
                        on_update: #on_update,
                        on_delete: #on_delete,
                    })
                }
            }
            FieldConstraint::Default(value) => quote!(#constraint::Default(#value)),
            FieldConstraint::Collate(name) => quote!(#constraint::Collate(#name)),
        });

        quote!(&[#(#items),*])
    }
}

/// `references(users, id)` or `references("users", "id", "org")`.
fn parse_references(input: ParseStream<'_>) -> Result<(String, Vec<String>)> {
    let names = Punctuated::<Name, Token![,]>::parse_terminated(input)?;
    let mut names = names.into_iter().map(|name| name.0);
    let table = names
        .next()
        .ok_or_else(|| input.error("references(...) needs a table name"))?;
    let columns: Vec<String> = names.collect();
    if columns.is_empty() {
        return Err(input.error("references(...) must include at least one target column"));
    }
    Ok((table, columns))
}

/// An identifier or string literal naming a table or column.
struct Name(String);

impl syn::parse::Parse for Name {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(LitStr) {
            Ok(Name(input.parse::<LitStr>()?.value()))
        } else {
            Ok(Name(input.call(Ident::parse_any)?.unraw().to_string()))
        }
    }
}

fn literal_text(lit: &Lit) -> Result<String> {
    match lit {
        Lit::Str(s) => Ok(s.value()),
        Lit::Int(i) => Ok(i.base10_digits().to_owned()),
        Lit::Float(f) => Ok(f.base10_digits().to_owned()),
        Lit::Bool(b) => Ok(if b.value { "1" } else { "0" }.to_owned()),
        _ => Err(Error::new_spanned(
            lit,
            "default must be a string, integer, float or bool literal",
        )),
    }
}
