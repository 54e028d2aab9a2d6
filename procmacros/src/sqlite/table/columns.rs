use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Visibility};

use crate::paths::sqlite as sqlite_paths;
use crate::sqlite::field::FieldInfo;

/// Generates the zero-sized column type for each field together with its
/// `SQLiteColumn` and `Selection` impls.
pub(crate) fn generate_columns(
    struct_ident: &Ident,
    struct_vis: &Visibility,
    field_infos: &[FieldInfo],
) -> TokenStream {
    let sqlite_column = sqlite_paths::sqlite_column();
    let impl_column_selection = sqlite_paths::impl_column_selection();

    let columns = field_infos.iter().map(|info| {
        let column_ident = &info.column_ident;
        let column_name = &info.column_name;
        let field_ident = info.ident;
        let ty = info.ty;
        let index = info.index;
        let doc = format!("Column `{column_name}` of [`{struct_ident}`].");

        let (get, set) = match (&info.getter, &info.setter) {
            (Some(getter), Some(setter)) => (
                quote!(record.#getter()),
                quote!(record.#setter(value)),
            ),
            _ => (
                quote!(::std::clone::Clone::clone(&record.#field_ident)),
                quote!(record.#field_ident = value),
            ),
        };

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Copy, Default)]
            #struct_vis struct #column_ident;

            impl #sqlite_column for #column_ident {
                type Table = #struct_ident;
                type Value = #ty;

                const NAME: &'static str = #column_name;
                const INDEX: usize = #index;

                fn get(record: &#struct_ident) -> #ty {
                    #get
                }

                fn set(record: &mut #struct_ident, value: #ty) {
                    #set;
                }
            }

            #impl_column_selection!(#column_ident);
        }
    });

    quote!(#(#columns)*)
}

/// The `ColumnInfo` literal for one field.
pub(crate) fn generate_column_info(info: &FieldInfo, without_rowid: bool) -> TokenStream {
    let column_info = sqlite_paths::column_info();
    let sqlite_type = sqlite_paths::sqlite_type();
    let column_type = sqlite_paths::column_type();

    let name = &info.column_name;
    let ty = info.ty;
    let primary_key = info.is_primary;
    let constraints = info.constraint_tokens();
    let auto_increment = if primary_key && !without_rowid && !info.is_descending_key() {
        quote!(::core::matches!(<#ty as #sqlite_type>::COLUMN_TYPE, #column_type::Integer))
    } else {
        quote!(false)
    };

    quote! {
        #column_info {
            name: #name,
            column_type: <#ty as #sqlite_type>::COLUMN_TYPE,
            nullable: <#ty as #sqlite_type>::NULLABLE,
            primary_key: #primary_key,
            auto_increment: #auto_increment,
            constraints: #constraints,
        }
    }
}
