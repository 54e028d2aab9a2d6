//! Centralized path definitions for generated code.
//!
//! Paths start with `quarry::` (no leading `::`) so the facade crate can
//! name itself with `extern crate self as quarry` and use the macro in its
//! own tests.

use proc_macro2::TokenStream;
use quote::quote;

pub mod std {
    use super::*;

    pub fn option() -> TokenStream {
        quote!(::std::option::Option)
    }

    pub fn result() -> TokenStream {
        quote!(::std::result::Result)
    }

    pub fn default() -> TokenStream {
        quote!(::std::default::Default)
    }
}

pub mod core {
    use super::*;

    pub fn result() -> TokenStream {
        quote!(quarry::core::Result)
    }

    pub fn constraint() -> TokenStream {
        quote!(quarry::core::Constraint)
    }

    pub fn conflict_policy() -> TokenStream {
        quote!(quarry::core::ConflictPolicy)
    }

    pub fn foreign_key() -> TokenStream {
        quote!(quarry::core::ForeignKey)
    }

    pub fn foreign_key_action() -> TokenStream {
        quote!(quarry::core::ForeignKeyAction)
    }

    pub fn order_by() -> TokenStream {
        quote!(quarry::core::OrderBy)
    }
}

pub mod sqlite {
    use super::*;

    pub fn sqlite_table() -> TokenStream {
        quote!(quarry::sqlite::SQLiteTable)
    }

    pub fn sqlite_column() -> TokenStream {
        quote!(quarry::sqlite::SQLiteColumn)
    }

    pub fn has_primary_key() -> TokenStream {
        quote!(quarry::sqlite::HasPrimaryKey)
    }

    pub fn sqlite_type() -> TokenStream {
        quote!(quarry::sqlite::SQLiteType)
    }

    pub fn column_type() -> TokenStream {
        quote!(quarry::sqlite::ColumnType)
    }

    pub fn column_info() -> TokenStream {
        quote!(quarry::sqlite::ColumnInfo)
    }

    pub fn row_values() -> TokenStream {
        quote!(quarry::sqlite::RowValues)
    }

    pub fn row() -> TokenStream {
        quote!(quarry::sqlite::rusqlite::Row)
    }

    pub fn assign_rowid() -> TokenStream {
        quote!(quarry::sqlite::traits::assign_rowid)
    }

    pub fn impl_record_selection() -> TokenStream {
        quote!(quarry::sqlite::impl_record_selection)
    }

    pub fn impl_column_selection() -> TokenStream {
        quote!(quarry::sqlite::impl_column_selection)
    }
}
