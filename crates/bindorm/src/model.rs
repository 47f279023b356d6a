//! Entity metadata: table name, field to column mapping, typed field getters.
//!
//! [`Entity`] is normally implemented by `#[derive(Entity)]`. The registry turns
//! the descriptor it returns into an immutable [`TableModel`].
//!
//! # Example
//!
//! ```ignore
//! use bindorm::Entity;
//!
//! #[derive(Default, Entity)]
//! #[orm(table = "users")]
//! struct User {
//!     id: i64,
//!     first_name: String,
//!     #[orm(column = "mail")]
//!     email: Option<String>,
//! }
//! ```

use crate::error::{OrmError, OrmResult};
use crate::ident::{underscore_name, validate_name};
use crate::param::Param;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Reads one field of an entity as a positional argument.
pub type Getter<T> = fn(&T) -> Param;

/// Whether one field of an entity holds its zero value.
pub type ZeroCheck<T> = fn(&T) -> bool;

/// A type that maps onto a database table.
///
/// `Default` supplies the record used when an updater has no target record.
pub trait Entity: Default + Send + Sync + 'static {
    /// Describe the table and fields of this type.
    fn describe() -> EntityDescriptor<Self>;
}

/// Raw description of an entity, as written by the derive macro.
pub struct EntityDescriptor<T> {
    /// Rust type name, used for the default table name and in errors.
    pub type_name: &'static str,
    /// Explicit table name (`#[orm(table = "...")]`).
    pub table: Option<&'static str>,
    /// Mapped fields in declaration order.
    pub fields: Vec<FieldDescriptor<T>>,
}

/// Raw description of one mapped field.
pub struct FieldDescriptor<T> {
    /// Rust field name.
    pub name: &'static str,
    /// Explicit column name (`#[orm(column = "...")]`).
    pub column: Option<&'static str>,
    /// Typed accessor for the field value.
    pub getter: Getter<T>,
    /// `None` for `Option` fields, `Default::default()` for everything else.
    pub is_zero: ZeroCheck<T>,
}

/// Resolved metadata for one field.
pub struct FieldModel<T> {
    name: &'static str,
    column: String,
    getter: Getter<T>,
    is_zero: ZeroCheck<T>,
}

impl<T> FieldModel<T> {
    /// Rust field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Database column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Read this field from `entity` as an argument.
    pub fn value(&self, entity: &T) -> Param {
        (self.getter)(entity)
    }

    /// Whether this field of `entity` holds its zero value.
    pub fn is_zero(&self, entity: &T) -> bool {
        (self.is_zero)(entity)
    }
}

impl<T> std::fmt::Debug for FieldModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldModel")
            .field("name", &self.name)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

/// Immutable table metadata for an entity type.
pub struct TableModel<T> {
    type_name: &'static str,
    table: String,
    fields: Vec<FieldModel<T>>,
    by_name: HashMap<&'static str, usize>,
}

impl<T> TableModel<T> {
    /// Resolve a descriptor into table metadata.
    ///
    /// Unset table/column names default to [`underscore_name`] of the Rust name.
    pub fn from_descriptor(desc: EntityDescriptor<T>) -> OrmResult<Self> {
        let type_name = desc.type_name;
        if desc.fields.is_empty() {
            return Err(OrmError::invalid_model(type_name, "entity has no mapped fields"));
        }

        let table = desc
            .table
            .map_or_else(|| underscore_name(type_name), str::to_string);
        validate_name(type_name, "table", &table)?;

        let mut fields = Vec::with_capacity(desc.fields.len());
        let mut by_name = HashMap::with_capacity(desc.fields.len());
        let mut columns: HashMap<String, &'static str> = HashMap::with_capacity(desc.fields.len());

        for field in desc.fields {
            let column = field
                .column
                .map_or_else(|| underscore_name(field.name), str::to_string);
            validate_name(type_name, "column", &column)?;

            match columns.entry(column.clone()) {
                Entry::Occupied(prev) => {
                    return Err(OrmError::invalid_model(
                        type_name,
                        format!(
                            "fields '{}' and '{}' both map to column '{column}'",
                            prev.get(),
                            field.name
                        ),
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(field.name);
                }
            }
            if by_name.insert(field.name, fields.len()).is_some() {
                return Err(OrmError::invalid_model(
                    type_name,
                    format!("duplicate field '{}'", field.name),
                ));
            }

            fields.push(FieldModel {
                name: field.name,
                column,
                getter: field.getter,
                is_zero: field.is_zero,
            });
        }

        Ok(Self {
            type_name,
            table,
            fields,
            by_name,
        })
    }

    /// Rust type name of the entity.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Database table name.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldModel<T>] {
        &self.fields
    }

    /// Look up a field by its exact Rust name.
    pub fn field(&self, name: &str) -> Option<&FieldModel<T>> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Column for a field, failing with [`OrmError::UnknownField`] when absent.
    pub fn column_for(&self, name: &str) -> OrmResult<&str> {
        self.field(name)
            .map(FieldModel::column)
            .ok_or_else(|| OrmError::unknown_field(name))
    }
}

impl<T> std::fmt::Debug for TableModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableModel")
            .field("type_name", &self.type_name)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .finish()
    }
}
