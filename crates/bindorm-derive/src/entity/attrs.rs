//! Attribute parsing for the Entity derive macro.
//!
//! Handles struct-level `#[orm(table = "...")]` and field-level
//! `#[orm(column = "...")]` / `#[orm(skip)]`.

use syn::{Error, LitStr, Result};

/// Parsed struct-level attributes.
#[derive(Default)]
pub(super) struct StructAttr {
    pub table: Option<LitStr>,
}

/// Parsed field-level attributes.
#[derive(Default)]
pub(super) struct FieldAttr {
    pub skip: bool,
    pub column: Option<LitStr>,
}

impl syn::parse::Parse for StructAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = StructAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            if ident != "table" {
                return Err(Error::new(
                    ident.span(),
                    format!("unknown struct attribute `{ident}` (expected `table`)"),
                ));
            }
            let _: syn::Token![=] = input.parse()?;
            let value: LitStr = input.parse()?;
            check_name(&value, "table")?;
            attr.table = Some(value);

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attr)
    }
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            if ident == "skip" {
                attr.skip = true;
            } else if ident == "column" {
                let _: syn::Token![=] = input.parse()?;
                let value: LitStr = input.parse()?;
                check_name(&value, "column")?;
                attr.column = Some(value);
            } else {
                return Err(Error::new(
                    ident.span(),
                    format!("unknown field attribute `{ident}` (expected `column` or `skip`)"),
                ));
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        if attr.skip && attr.column.is_some() {
            return Err(input.error("`skip` and `column` cannot be combined"));
        }
        Ok(attr)
    }
}

/// Merge every `#[orm(...)]` on the struct.
pub(super) fn parse_struct_attrs(attrs: &[syn::Attribute]) -> Result<StructAttr> {
    let mut merged = StructAttr::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("orm")) {
        let parsed: StructAttr = attr.parse_args()?;
        if parsed.table.is_some() {
            merged.table = parsed.table;
        }
    }
    Ok(merged)
}

/// Merge every `#[orm(...)]` on a field.
pub(super) fn parse_field_attrs(attrs: &[syn::Attribute]) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("orm")) {
        let parsed: FieldAttr = attr.parse_args()?;
        merged.skip |= parsed.skip;
        if parsed.column.is_some() {
            merged.column = parsed.column;
        }
    }
    if merged.skip && merged.column.is_some() {
        return Err(Error::new(
            proc_macro2::Span::call_site(),
            "`skip` and `column` cannot be combined",
        ));
    }
    Ok(merged)
}

fn check_name(lit: &LitStr, what: &str) -> Result<()> {
    let value = lit.value();
    if value.trim().is_empty() {
        return Err(Error::new(lit.span(), format!("{what} name cannot be empty")));
    }
    if value.contains('\0') {
        return Err(Error::new(
            lit.span(),
            format!("{what} name cannot contain NUL character"),
        ));
    }
    Ok(())
}
