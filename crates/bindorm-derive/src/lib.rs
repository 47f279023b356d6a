//! Derive macros for bindorm
//!
//! Provides `#[derive(Entity)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod entity;

/// Derive `Entity` metadata for a struct.
///
/// # Example
///
/// ```ignore
/// use bindorm::Entity;
///
/// #[derive(Default, Entity)]
/// #[orm(table = "users")]
/// struct User {
///     id: i64,
///     first_name: String,
///     #[orm(column = "mail")]
///     email: Option<String>,
///     #[orm(skip)]
///     cached_score: f64,
/// }
/// ```
///
/// # Generated
///
/// - `impl bindorm::Entity`, describing the table and, per field, its name,
///   optional column override and a getter that clones the field into a
///   positional argument
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Table name (defaults to the underscored type name)
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(skip)]` - Leave the field out of the mapping
///
/// Mapped field types must be `Clone + ToSql + Send + Sync + 'static`. Fields that are
/// not `Option` must also be `Default + PartialEq` (their zero value is the default).
#[proc_macro_derive(Entity, attributes(orm))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
