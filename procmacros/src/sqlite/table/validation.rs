use std::collections::HashSet;

use proc_macro2::Span;

use super::attributes::TableAttributes;
use crate::sqlite::field::FieldInfo;

/// Checks the declaration as a whole, reporting every problem at once.
pub(crate) fn validate_table(
    field_infos: &[FieldInfo],
    attrs: &TableAttributes,
    struct_span: Span,
) -> syn::Result<()> {
    let mut errors: Vec<syn::Error> = Vec::new();

    if field_infos.is_empty() {
        errors.push(syn::Error::new(
            struct_span,
            "a table needs at least one column",
        ));
    }

    let mut seen = HashSet::new();
    for info in field_infos {
        if !seen.insert(info.column_name.as_str()) {
            errors.push(syn::Error::new(
                info.span,
                format!("duplicate column name `{}`", info.column_name),
            ));
        }
    }

    let primary: Vec<&FieldInfo> = field_infos.iter().filter(|info| info.is_primary).collect();
    for extra in primary.iter().skip(1) {
        errors.push(syn::Error::new(
            extra.span,
            format!(
                "column `{}` is a second primary key; a table has at most one",
                extra.column_name
            ),
        ));
    }
    if attrs.without_rowid && primary.is_empty() {
        errors.push(syn::Error::new(
            struct_span,
            "WITHOUT ROWID tables need a `#[column(primary)]` field",
        ));
    }

    for info in field_infos {
        match (&info.getter, &info.setter) {
            (Some(_), None) => errors.push(syn::Error::new(
                info.span,
                format!("column `{}` has `get` without `set`", info.column_name),
            )),
            (None, Some(_)) => errors.push(syn::Error::new(
                info.span,
                format!("column `{}` has `set` without `get`", info.column_name),
            )),
            _ => {}
        }

        if (info.on_update.is_some() || info.on_delete.is_some()) && !info.has_references() {
            errors.push(syn::Error::new(
                info.span,
                format!(
                    "column `{}` sets `on_update`/`on_delete` without `references(...)`",
                    info.column_name
                ),
            ));
        }
    }

    let mut iter = errors.into_iter();
    if let Some(mut first) = iter.next() {
        for err in iter {
            first.combine(err);
        }
        return Err(first);
    }

    Ok(())
}
