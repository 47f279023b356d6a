//! Boolean expression tree for WHERE clauses.
//!
//! Predicates are built from columns and combined with `and`/`or`/`not`:
//!
//! ```
//! use bindorm::{col, Predicate};
//!
//! let p = col("Age").gte(18i32).and(Predicate::not(col("FirstName").eq("Tom")));
//! # let _ = p;
//! ```
//!
//! Several predicates passed to an updater's `where_` are combined with AND.

use crate::expr::{Column, Expr, MathExpr, Value};
use crate::param::Param;
use tokio_postgres::types::ToSql;

/// Predicate node.
#[derive(Clone, Debug)]
pub enum Predicate {
    /// `left op right`
    Compare {
        left: Expr,
        op: &'static str,
        right: Expr,
    },
    /// `expr IS NULL` / `expr IS NOT NULL`
    Null { expr: Expr, negated: bool },
    /// `expr IN (...)` / `expr NOT IN (...)`
    In {
        expr: Expr,
        values: Vec<Param>,
        negated: bool,
    },
    /// `(a) AND (b)`
    And(Box<Predicate>, Box<Predicate>),
    /// `(a) OR (b)`
    Or(Box<Predicate>, Box<Predicate>),
    /// `NOT (p)`
    Not(Box<Predicate>),
    /// SQL fragment with `?` markers, bound in order.
    ///
    /// Be careful with SQL injection when using raw predicates.
    Raw { sql: String, args: Vec<Param> },
}

impl Predicate {
    /// Compare two operands with a comparison operator.
    pub fn compare(left: impl Into<Expr>, op: &'static str, right: impl Into<Expr>) -> Self {
        Predicate::Compare {
            left: left.into(),
            op,
            right: right.into(),
        }
    }

    /// Negate a predicate.
    pub fn not(p: Predicate) -> Self {
        Predicate::Not(Box::new(p))
    }

    /// Both must hold.
    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// At least one must hold.
    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Raw SQL fragment; each `?` binds the next entry of `args`.
    pub fn raw(sql: impl Into<String>, args: Vec<Param>) -> Self {
        Predicate::Raw {
            sql: sql.into(),
            args,
        }
    }
}

macro_rules! comparisons {
    ($ty:ty) => {
        impl $ty {
            /// `self = value`
            pub fn eq<T: ToSql + Send + Sync + 'static>(self, value: T) -> Predicate {
                Predicate::compare(self, "=", Value::new(value))
            }

            /// `self != value`
            pub fn ne<T: ToSql + Send + Sync + 'static>(self, value: T) -> Predicate {
                Predicate::compare(self, "!=", Value::new(value))
            }

            /// `self < value`
            pub fn lt<T: ToSql + Send + Sync + 'static>(self, value: T) -> Predicate {
                Predicate::compare(self, "<", Value::new(value))
            }

            /// `self <= value`
            pub fn lte<T: ToSql + Send + Sync + 'static>(self, value: T) -> Predicate {
                Predicate::compare(self, "<=", Value::new(value))
            }

            /// `self > value`
            pub fn gt<T: ToSql + Send + Sync + 'static>(self, value: T) -> Predicate {
                Predicate::compare(self, ">", Value::new(value))
            }

            /// `self >= value`
            pub fn gte<T: ToSql + Send + Sync + 'static>(self, value: T) -> Predicate {
                Predicate::compare(self, ">=", Value::new(value))
            }

            /// `self LIKE pattern`
            pub fn like<T: ToSql + Send + Sync + 'static>(self, pattern: T) -> Predicate {
                Predicate::compare(self, "LIKE", Value::new(pattern))
            }

            /// `self IS NULL`
            pub fn is_null(self) -> Predicate {
                Predicate::Null {
                    expr: self.into(),
                    negated: false,
                }
            }

            /// `self IS NOT NULL`
            pub fn is_not_null(self) -> Predicate {
                Predicate::Null {
                    expr: self.into(),
                    negated: true,
                }
            }

            /// `self IN (values...)`; an empty list never matches.
            pub fn in_list<T: ToSql + Send + Sync + 'static>(self, values: Vec<T>) -> Predicate {
                Predicate::In {
                    expr: self.into(),
                    values: values.into_iter().map(Param::new).collect(),
                    negated: false,
                }
            }

            /// `self NOT IN (values...)`; an empty list always matches.
            pub fn not_in<T: ToSql + Send + Sync + 'static>(self, values: Vec<T>) -> Predicate {
                Predicate::In {
                    expr: self.into(),
                    values: values.into_iter().map(Param::new).collect(),
                    negated: true,
                }
            }
        }
    };
}

comparisons!(Column);
comparisons!(MathExpr);
