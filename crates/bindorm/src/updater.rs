//! UPDATE statement builder bound to an entity type.
//!
//! ```ignore
//! use bindorm::{Db, Updater, assign, col};
//!
//! let db = Db::new();
//! let query = Updater::<User>::new(&db)?
//!     .update(user)
//!     .set([Assignable::from(col("first_name")), assign("age", 18).into()])
//!     .where_([col("id").eq(12i64)])
//!     .build()?;
//! // UPDATE `user` SET `first_name`=?,`age`=? WHERE `id` = ?;
//! ```

use crate::assign::{Assignable, Assignment, assign_non_zero};
use crate::builder::StatementBuilder;
use crate::db::Db;
use crate::error::{OrmError, OrmResult};
use crate::expr::Expr;
use crate::ident::underscore_name;
use crate::model::{Entity, TableModel};
use crate::predicate::Predicate;
use crate::query::Query;
use std::borrow::Cow;
use std::sync::Arc;

/// UPDATE builder for entity `T`.
///
/// [`build`](Updater::build) renders into a fresh buffer on every call, so the
/// same configuration always produces the same statement.
#[must_use]
#[derive(Clone)]
pub struct Updater<'db, T> {
    db: &'db Db,
    model: Arc<TableModel<T>>,
    target: Option<T>,
    assigns: Vec<Assignable>,
    predicates: Vec<Predicate>,
}

impl<'db, T: Entity> Updater<'db, T> {
    /// Bind a new updater to `db`, resolving `T`'s metadata.
    pub fn new(db: &'db Db) -> OrmResult<Self> {
        let model = db.registry().get::<T>()?;
        Ok(Self {
            db,
            model,
            target: None,
            assigns: Vec::new(),
            predicates: Vec::new(),
        })
    }

    /// Set the record whose field values feed column assignments.
    pub fn update(mut self, record: T) -> Self {
        self.target = Some(record);
        self
    }

    /// Replace the SET list.
    pub fn set<I>(mut self, assigns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Assignable>,
    {
        self.assigns = assigns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the SET list with the non-zero fields of the target record.
    ///
    /// Without a target record every field is zero, so `build` reports
    /// [`OrmError::NoUpdatedColumns`].
    pub fn set_non_zero(mut self) -> Self {
        self.assigns = match &self.target {
            Some(record) => assign_non_zero(&self.model, record),
            None => Vec::new(),
        };
        self
    }

    /// Replace the WHERE predicates; several predicates are combined with AND.
    pub fn where_<I>(mut self, predicates: I) -> Self
    where
        I: IntoIterator<Item = Predicate>,
    {
        self.predicates = predicates.into_iter().collect();
        self
    }

    /// Metadata of the bound entity.
    pub fn model(&self) -> &TableModel<T> {
        &self.model
    }

    /// Render the statement and its arguments.
    pub fn build(&self) -> OrmResult<Query> {
        let result = self.render();
        match &result {
            Ok(query) => {
                self.db
                    .log_statement(self.model.table_name(), query.sql(), query.args().len());
            }
            Err(err) => {
                tracing::debug!(
                    target: "bindorm.sql",
                    statement = "update",
                    table = self.model.table_name(),
                    error = %err,
                    "build failed"
                );
            }
        }
        result
    }

    fn render(&self) -> OrmResult<Query> {
        if self.assigns.is_empty() {
            return Err(OrmError::NoUpdatedColumns);
        }

        let fallback;
        let target = match &self.target {
            Some(t) => t,
            None => {
                fallback = T::default();
                &fallback
            }
        };

        let mut sb = StatementBuilder::new(&self.model, self.db.dialect());
        sb.push("UPDATE ")
            .quote(self.model.table_name())
            .push(" SET ");

        for (i, assignable) in self.assigns.iter().enumerate() {
            if i > 0 {
                sb.push(",");
            }
            match assignable {
                Assignable::Column(c) => {
                    let field = self
                        .model
                        .field(c.name())
                        .ok_or_else(|| OrmError::unknown_field(c.name()))?;
                    sb.quote(field.column()).push("=").push_arg(field.value(target));
                }
                Assignable::Assignment(a) => self.build_assignment(&mut sb, a)?,
                Assignable::Expr(e) => return Err(OrmError::unsupported_assignable(e)),
            }
        }

        if !self.predicates.is_empty() {
            sb.push(" WHERE ");
            sb.build_predicates(&self.predicates)?;
        }
        sb.push(";");
        Ok(sb.finish())
    }

    fn build_assignment(&self, sb: &mut StatementBuilder<'_, T>, a: &Assignment) -> OrmResult<()> {
        sb.quote(&self.assign_column(a.column())).push("=");
        match a.value() {
            Expr::Value(v) => {
                sb.push_arg(v.param().clone());
            }
            Expr::Column(c) => sb.build_column(c.name())?,
            Expr::Math(m) => {
                let Expr::Column(left) = m.left() else {
                    return Err(OrmError::unsupported_expression(format!(
                        "left operand of '{}' assigned to '{}' must be a column",
                        m.op(),
                        a.column()
                    )));
                };
                sb.build_column(left.name())?;
                sb.push(" ").push(m.op()).push(" ");
                match m.right() {
                    Expr::Value(v) => {
                        sb.push_arg(v.param().clone());
                    }
                    Expr::Column(c) => sb.build_column(c.name())?,
                    Expr::Math(_) => {
                        return Err(OrmError::unsupported_expression(format!(
                            "right operand of '{}' assigned to '{}' cannot be nested arithmetic",
                            m.op(),
                            a.column()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Target column of an explicit assignment: the mapped column for known
    /// fields, otherwise the underscored name. Operands on the right resolve
    /// strictly.
    fn assign_column<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        match self.model.field(name) {
            Some(field) => Cow::Borrowed(field.column()),
            None => Cow::Owned(underscore_name(name)),
        }
    }
}

impl<T> std::fmt::Debug for Updater<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("table", &self.model.table_name())
            .field("has_target", &self.target.is_some())
            .field("assigns", &self.assigns)
            .field("predicates", &self.predicates)
            .finish()
    }
}

#[cfg(test)]
mod tests;
