#![recursion_limit = "128"]

extern crate proc_macro;

mod paths;
mod sqlite;

use proc_macro::TokenStream;

/// Attribute macro for declaring SQLite tables
///
/// Generates one zero-sized column type per field, named after the struct
/// and the field (`User` + `id` gives `UserId`), and implements the table,
/// column and selection traits for them. The struct must implement
/// `Default`.
///
/// Table options: `name = "..."`, `strict`, `without_rowid`. Without a
/// name the table is the struct name in snake case.
///
/// Field options go in `#[column(...)]`: `name`, `primary` (optionally
/// `primary = "asc" | "desc"`), `unique`, `not_null`, `on_conflict`,
/// `default`, `collate`, `references(table, column, ...)`, `on_update`,
/// `on_delete`, and `get = method, set = method` for accessor-backed
/// fields.
///
/// Example:
/// ```rust,ignore
/// #[SQLiteTable(name = "users", strict)]
/// #[derive(Debug, Default)]
/// struct User {
///     #[column(primary)]
///     id: i64,
///     #[column(unique, on_conflict = "replace")]
///     email: String,
///     nickname: Option<String>,
/// }
/// ```
#[allow(non_snake_case)]
#[proc_macro_attribute]
pub fn SQLiteTable(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attrs = syn::parse_macro_input!(attr as sqlite::table::TableAttributes);
    let input = syn::parse_macro_input!(item as syn::DeriveInput);

    match sqlite::table::table_attr_macro(input, attrs) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
