//! SET-clause descriptors.

use crate::expr::{Column, Expr, MathExpr, Value};
use crate::model::TableModel;
use std::borrow::Cow;
use tokio_postgres::types::ToSql;

/// Set a column to an explicit value or expression.
#[derive(Clone, Debug)]
pub struct Assignment {
    pub(crate) column: Cow<'static, str>,
    pub(crate) value: Expr,
}

impl Assignment {
    /// Assign `value` to the column of field `column`.
    pub fn new(column: impl Into<Cow<'static, str>>, value: impl Into<Expr>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Target field or column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// New value.
    pub fn value(&self) -> &Expr {
        &self.value
    }
}

/// `column = ?` with a literal.
pub fn assign<T: ToSql + Send + Sync + 'static>(
    column: impl Into<Cow<'static, str>>,
    value: T,
) -> Assignment {
    Assignment::new(column, Value::new(value))
}

/// `column = <expr>`.
pub fn assign_expr(column: impl Into<Cow<'static, str>>, value: impl Into<Expr>) -> Assignment {
    Assignment::new(column, value)
}

/// Column assignables for every field of `record` that is not zero, in
/// declaration order.
///
/// A field is zero when it is `None`, or when it equals its type's default.
pub fn assign_non_zero<T>(model: &TableModel<T>, record: &T) -> Vec<Assignable> {
    model
        .fields()
        .iter()
        .filter(|field| !field.is_zero(record))
        .map(|field| Assignable::Column(Column::new(field.name())))
        .collect()
}

/// One entry of an UPDATE's SET list.
#[derive(Clone, Debug)]
pub enum Assignable {
    /// Copy the field's current value from the target record.
    Column(Column),
    /// Explicit value or expression for a column.
    Assignment(Assignment),
    /// An expression with no target column; rejected when the statement is built.
    Expr(Expr),
}

impl From<Column> for Assignable {
    fn from(c: Column) -> Self {
        Assignable::Column(c)
    }
}

impl From<Assignment> for Assignable {
    fn from(a: Assignment) -> Self {
        Assignable::Assignment(a)
    }
}

impl From<Expr> for Assignable {
    fn from(e: Expr) -> Self {
        Assignable::Expr(e)
    }
}

impl From<Value> for Assignable {
    fn from(v: Value) -> Self {
        Assignable::Expr(Expr::Value(v))
    }
}

impl From<MathExpr> for Assignable {
    fn from(m: MathExpr) -> Self {
        Assignable::Expr(Expr::Math(m))
    }
}
