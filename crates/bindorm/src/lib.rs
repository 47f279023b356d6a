//! # bindorm
//!
//! A small, model-definition-first UPDATE statement builder.
//!
//! ## Features
//!
//! - **Typed metadata**: `#[derive(Entity)]` maps a struct to a table, each field
//!   to a column, and generates a typed getter per field (no runtime reflection)
//! - **Structured assignments**: copy a field from a record, assign a literal, or
//!   assign arithmetic such as `age = age + ?`
//! - **Predicate trees**: AND/OR/NOT over comparisons, IN lists and raw fragments
//! - **Positional binding**: every placeholder is paired with one argument, in order
//! - **Dialects**: MySQL-style (default), SQLite and Postgres quoting/placeholders
//! - **Safe defaults**: UPDATE requires SET; unknown fields are errors
//!
//! ## Example
//!
//! ```ignore
//! use bindorm::{Assignable, Db, Entity, Updater, assign_expr, col};
//!
//! #[derive(Default, Entity)]
//! #[orm(table = "users")]
//! struct User {
//!     id: i64,
//!     first_name: String,
//!     age: i32,
//! }
//!
//! let db = Db::new();
//! let query = Updater::<User>::new(&db)?
//!     .update(User { id: 1, first_name: "Ann".into(), age: 30 })
//!     .set([
//!         Assignable::from(col("first_name")),
//!         assign_expr("age", col("age").add(1)).into(),
//!     ])
//!     .where_([col("id").eq(1i64)])
//!     .build()?;
//!
//! assert_eq!(
//!     query.sql(),
//!     "UPDATE `users` SET `first_name`=?,`age`=`age` + ? WHERE `id` = ?;"
//! );
//! ```

pub mod assign;
pub mod builder;
pub mod db;
pub mod dialect;
pub mod error;
pub mod expr;
pub mod ident;
pub mod model;
pub mod param;
pub mod predicate;
pub mod query;
pub mod registry;
pub mod updater;

pub use assign::{Assignable, Assignment, assign, assign_expr, assign_non_zero};
pub use builder::StatementBuilder;
pub use db::{Db, DbConfig};
pub use dialect::Dialect;
pub use error::{OrmError, OrmResult};
pub use expr::{Column, Expr, MathExpr, Value, col, val};
pub use ident::underscore_name;
pub use model::{
    Entity, EntityDescriptor, FieldDescriptor, FieldModel, Getter, TableModel, ZeroCheck,
};
pub use param::{Param, ParamList};
pub use predicate::Predicate;
pub use query::Query;
pub use registry::Registry;
pub use updater::Updater;

#[cfg(feature = "derive")]
pub use bindorm_derive::Entity;
