pub(crate) mod attributes;
mod columns;
mod validation;

use heck::ToSnakeCase;
use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Result};

pub use attributes::TableAttributes;
use columns::{generate_column_info, generate_columns};
use validation::validate_table;

use super::field::FieldInfo;
use crate::paths::{core as core_paths, sqlite as sqlite_paths, std as std_paths};

// ============================================================================
// Main Macro Entry Point
// ============================================================================

pub fn table_attr_macro(mut input: DeriveInput, attrs: TableAttributes) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "#[SQLiteTable] does not support generic structs",
        ));
    }

    let struct_ident = input.ident.clone();
    let table_name = attrs
        .name
        .clone()
        .unwrap_or_else(|| struct_ident.to_string().to_snake_case());

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "#[SQLiteTable] needs a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "The #[SQLiteTable] attribute can only be applied to struct definitions.",
            ));
        }
    };

    let field_infos = fields
        .iter()
        .enumerate()
        .map(|(index, field)| FieldInfo::from_field(&struct_ident, field, index))
        .collect::<Result<Vec<_>>>()?;

    validate_table(&field_infos, &attrs, struct_ident.span())?;

    let columns = generate_columns(&struct_ident, &input.vis, &field_infos);
    let table_impls = generate_table_impls(&struct_ident, &table_name, &attrs, &field_infos);

    strip_column_attributes(&mut input);

    Ok(quote! {
        #input
        #columns
        #table_impls
    })
}

/// `#[column]` is consumed here; it is not a registered attribute.
fn strip_column_attributes(input: &mut DeriveInput) {
    if let Data::Struct(data) = &mut input.data {
        for field in data.fields.iter_mut() {
            field.attrs.retain(|attr| !attr.path().is_ident("column"));
        }
    }
}

fn generate_table_impls(
    struct_ident: &syn::Ident,
    table_name: &str,
    attrs: &TableAttributes,
    field_infos: &[FieldInfo],
) -> TokenStream {
    let sqlite_table = sqlite_paths::sqlite_table();
    let sqlite_column = sqlite_paths::sqlite_column();
    let sqlite_type = sqlite_paths::sqlite_type();
    let column_info = sqlite_paths::column_info();
    let row_values = sqlite_paths::row_values();
    let row = sqlite_paths::row();
    let result = core_paths::result();
    let ok = std_paths::result();
    let option = std_paths::option();
    let default = std_paths::default();
    let impl_record_selection = sqlite_paths::impl_record_selection();

    let strict = attrs.strict;
    let without_rowid = attrs.without_rowid;
    let infos = field_infos
        .iter()
        .map(|info| generate_column_info(info, without_rowid));

    let values = field_infos.iter().map(|info| {
        let ty = info.ty;
        match &info.getter {
            Some(getter) => quote!(<#ty as #sqlite_type>::to_value(&self.#getter()).into_owned()),
            None => {
                let field = info.ident;
                quote!(<#ty as #sqlite_type>::to_value(&self.#field))
            }
        }
    });

    let reads = field_infos.iter().map(|info| {
        let column_ident = &info.column_ident;
        quote!(<#column_ident as #sqlite_column>::read_into(&mut record, row, offset)?;)
    });

    let primary = field_infos.iter().find(|info| info.is_primary);
    let primary_key = match primary {
        Some(info) => {
            let index = info.index;
            quote!(#option::Some(#index))
        }
        None => quote!(#option::None),
    };

    let (assign_rowid, has_primary_key) = match primary {
        Some(info) => {
            let assign_rowid = sqlite_paths::assign_rowid();
            let has_primary_key = sqlite_paths::has_primary_key();
            let column_ident = &info.column_ident;
            (
                quote! {
                    fn assign_rowid(&mut self, rowid: i64) -> #result<()> {
                        #assign_rowid(self, rowid)
                    }
                },
                quote! {
                    impl #has_primary_key for #struct_ident {
                        type PrimaryKey = #column_ident;
                    }
                },
            )
        }
        None => (quote!(), quote!()),
    };

    quote! {
        impl #sqlite_table for #struct_ident {
            const NAME: &'static str = #table_name;
            const COLUMNS: &'static [#column_info] = &[#(#infos),*];
            const STRICT: bool = #strict;
            const WITHOUT_ROWID: bool = #without_rowid;
            const PRIMARY_KEY: #option<usize> = #primary_key;

            fn values(&self) -> #row_values<'_> {
                [#(#values),*].into_iter().collect()
            }

            fn from_row_at(row: &#row<'_>, offset: usize) -> #result<Self> {
                let mut record = <Self as #default>::default();
                #(#reads)*
                #ok::Ok(record)
            }

            #assign_rowid
        }

        #has_primary_key

        #impl_record_selection!(#struct_ident);
    }
}
