//! Statement accumulator shared by statement builders.
//!
//! [`StatementBuilder`] owns the SQL buffer and the positional argument list,
//! quotes identifiers for the active [`Dialect`], resolves field references
//! through the entity's [`TableModel`], and renders expressions and WHERE
//! predicates. Every placeholder it writes is paired with exactly one argument.

use crate::dialect::Dialect;
use crate::error::{OrmError, OrmResult};
use crate::expr::Expr;
use crate::ident::write_quoted;
use crate::model::TableModel;
use crate::param::{Param, ParamList};
use crate::predicate::Predicate;
use crate::query::Query;

/// SQL text and argument accumulator for one statement.
pub struct StatementBuilder<'m, T> {
    sql: String,
    args: ParamList,
    model: &'m TableModel<T>,
    dialect: Dialect,
}

impl<'m, T> StatementBuilder<'m, T> {
    /// Start an empty statement for `model`.
    pub fn new(model: &'m TableModel<T>, dialect: Dialect) -> Self {
        Self {
            sql: String::with_capacity(64),
            args: ParamList::new(),
            model,
            dialect,
        }
    }

    /// Entity metadata used to resolve field references.
    pub fn model(&self) -> &'m TableModel<T> {
        self.model
    }

    /// Active dialect.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// SQL rendered so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments bound so far.
    pub fn args(&self) -> &ParamList {
        &self.args
    }

    /// Append raw SQL.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a quoted identifier.
    pub fn quote(&mut self, name: &str) -> &mut Self {
        write_quoted(&mut self.sql, name, self.dialect.quote());
        self
    }

    /// Append a placeholder and bind `param` to it.
    pub fn push_arg(&mut self, param: Param) -> &mut Self {
        let idx = self.args.push_param(param);
        self.dialect.write_placeholder(&mut self.sql, idx);
        self
    }

    /// Append the quoted column of field `field`.
    pub fn build_column(&mut self, field: &str) -> OrmResult<()> {
        let column = self.model.column_for(field)?;
        write_quoted(&mut self.sql, column, self.dialect.quote());
        Ok(())
    }

    /// Render an operand: quoted column, placeholder, or arithmetic.
    ///
    /// Nested arithmetic operands are parenthesized.
    pub fn build_expr(&mut self, expr: &Expr) -> OrmResult<()> {
        match expr {
            Expr::Column(c) => self.build_column(c.name()),
            Expr::Value(v) => {
                self.push_arg(v.param().clone());
                Ok(())
            }
            Expr::Math(m) => {
                self.build_operand(m.left())?;
                self.sql.push(' ');
                self.sql.push_str(m.op());
                self.sql.push(' ');
                self.build_operand(m.right())
            }
        }
    }

    fn build_operand(&mut self, expr: &Expr) -> OrmResult<()> {
        if let Expr::Math(_) = expr {
            self.sql.push('(');
            self.build_expr(expr)?;
            self.sql.push(')');
            Ok(())
        } else {
            self.build_expr(expr)
        }
    }

    /// Render a WHERE list: predicates are folded left with AND.
    ///
    /// `[a]` renders as `a`, `[a, b]` as `(a) AND (b)`, `[a, b, c]` as
    /// `((a) AND (b)) AND (c)`. An empty list renders nothing.
    pub fn build_predicates(&mut self, predicates: &[Predicate]) -> OrmResult<()> {
        match predicates {
            [] => Ok(()),
            [only] => self.build_predicate(only),
            [init @ .., last] => {
                self.sql.push('(');
                self.build_predicates(init)?;
                self.sql.push_str(") AND (");
                self.build_predicate(last)?;
                self.sql.push(')');
                Ok(())
            }
        }
    }

    /// Render one predicate.
    pub fn build_predicate(&mut self, predicate: &Predicate) -> OrmResult<()> {
        match predicate {
            Predicate::Compare { left, op, right } => {
                self.build_expr(left)?;
                self.sql.push(' ');
                self.sql.push_str(op);
                self.sql.push(' ');
                self.build_expr(right)
            }
            Predicate::Null { expr, negated } => {
                self.build_expr(expr)?;
                self.sql
                    .push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Predicate::In {
                expr,
                values,
                negated,
            } => {
                if values.is_empty() {
                    self.sql.push_str(if *negated { "1=1" } else { "1=0" });
                    return Ok(());
                }
                self.build_expr(expr)?;
                self.sql.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(", ");
                    }
                    self.push_arg(v.clone());
                }
                self.sql.push(')');
                Ok(())
            }
            Predicate::And(a, b) => self.build_binary(a, "AND", b),
            Predicate::Or(a, b) => self.build_binary(a, "OR", b),
            Predicate::Not(p) => {
                self.sql.push_str("NOT (");
                self.build_predicate(p)?;
                self.sql.push(')');
                Ok(())
            }
            Predicate::Raw { sql, args } => self.build_raw(sql, args),
        }
    }

    fn build_binary(&mut self, a: &Predicate, op: &str, b: &Predicate) -> OrmResult<()> {
        self.sql.push('(');
        self.build_predicate(a)?;
        self.sql.push_str(") ");
        self.sql.push_str(op);
        self.sql.push_str(" (");
        self.build_predicate(b)?;
        self.sql.push(')');
        Ok(())
    }

    fn build_raw(&mut self, sql: &str, args: &[Param]) -> OrmResult<()> {
        let markers = sql.matches('?').count();
        if markers != args.len() {
            return Err(OrmError::validation(format!(
                "raw predicate has {markers} placeholder(s) but {} argument(s)",
                args.len()
            )));
        }
        let mut args = args.iter();
        let mut pieces = sql.split('?');
        if let Some(first) = pieces.next() {
            self.sql.push_str(first);
        }
        for piece in pieces {
            if let Some(arg) = args.next() {
                self.push_arg(arg.clone());
            }
            self.sql.push_str(piece);
        }
        Ok(())
    }

    /// Finish the statement.
    pub fn finish(self) -> Query {
        Query::new(self.sql, self.args.into_vec())
    }
}
