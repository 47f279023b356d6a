//! Value and expression model: literals, column references and arithmetic.
//!
//! ```
//! use bindorm::expr::{col, Expr};
//!
//! // `age` + ?
//! let bump = col("Age").add(1i32);
//! // `score` * `weight`
//! let weighted = col("Score").math("*", col("Weight"));
//! assert!(matches!(Expr::from(weighted).left_column(), Some(c) if c.name() == "Score"));
//! # let _ = bump;
//! ```

use crate::param::Param;
use std::borrow::Cow;
use tokio_postgres::types::ToSql;

/// A literal bound as a positional argument.
#[derive(Clone, Debug)]
pub struct Value(pub(crate) Param);

impl Value {
    /// Wrap a literal.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Value(Param::new(value))
    }

    /// Serialize `value` to JSON and bind it as a `json`/`jsonb` argument.
    pub fn json<T: serde::Serialize>(value: &T) -> serde_json::Result<Self> {
        Ok(Value::new(serde_json::to_value(value)?))
    }

    /// The bound argument.
    pub fn param(&self) -> &Param {
        &self.0
    }
}

/// Create a [`Value`].
pub fn val<T: ToSql + Send + Sync + 'static>(value: T) -> Value {
    Value::new(value)
}

/// A reference to an entity field, resolved to its column at render time.
#[derive(Clone, Debug)]
pub struct Column {
    name: Cow<'static, str>,
}

/// Create a [`Column`] for the given field name.
pub fn col(name: impl Into<Cow<'static, str>>) -> Column {
    Column::new(name)
}

impl Column {
    /// Reference the field `name`.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Combine with `rhs` using a free-form operator symbol.
    pub fn math(self, op: impl Into<Cow<'static, str>>, rhs: impl Into<Expr>) -> MathExpr {
        MathExpr::new(self, op, rhs)
    }

    /// `column + value`
    pub fn add<T: ToSql + Send + Sync + 'static>(self, value: T) -> MathExpr {
        self.math("+", Value::new(value))
    }

    /// `column - value`
    pub fn sub<T: ToSql + Send + Sync + 'static>(self, value: T) -> MathExpr {
        self.math("-", Value::new(value))
    }

    /// `column * value`
    pub fn mul<T: ToSql + Send + Sync + 'static>(self, value: T) -> MathExpr {
        self.math("*", Value::new(value))
    }

    /// `column / value`
    pub fn div<T: ToSql + Send + Sync + 'static>(self, value: T) -> MathExpr {
        self.math("/", Value::new(value))
    }
}

/// A binary arithmetic expression: `left op right`.
#[derive(Clone, Debug)]
pub struct MathExpr {
    pub(crate) left: Box<Expr>,
    pub(crate) op: Cow<'static, str>,
    pub(crate) right: Box<Expr>,
}

impl MathExpr {
    /// Create `left op right`.
    pub fn new(
        left: impl Into<Expr>,
        op: impl Into<Cow<'static, str>>,
        right: impl Into<Expr>,
    ) -> Self {
        Self {
            left: Box::new(left.into()),
            op: op.into(),
            right: Box::new(right.into()),
        }
    }

    /// Operator symbol.
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Left operand.
    pub fn left(&self) -> &Expr {
        &self.left
    }

    /// Right operand.
    pub fn right(&self) -> &Expr {
        &self.right
    }
}

/// Operand of an assignment, arithmetic expression or comparison.
#[derive(Clone, Debug)]
pub enum Expr {
    /// Entity field reference.
    Column(Column),
    /// Bound literal.
    Value(Value),
    /// Arithmetic over two operands.
    Math(MathExpr),
}

impl Expr {
    /// The column this expression starts from, if its leftmost operand is one.
    pub fn left_column(&self) -> Option<&Column> {
        match self {
            Expr::Column(c) => Some(c),
            Expr::Math(m) => m.left.left_column(),
            Expr::Value(_) => None,
        }
    }
}

impl From<Column> for Expr {
    fn from(c: Column) -> Self {
        Expr::Column(c)
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Value(v)
    }
}

impl From<MathExpr> for Expr {
    fn from(m: MathExpr) -> Self {
        Expr::Math(m)
    }
}
