//! Example building UPDATE statements with bindorm.
//!
//! Run with:
//!   RUST_LOG=bindorm=debug cargo run --example update_builder -p bindorm

use bindorm::{
    Assignable, Db, DbConfig, Dialect, Entity, OrmError, OrmResult, Predicate, Query, Updater,
    assign, assign_expr, col,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default, Entity)]
#[orm(table = "users")]
struct User {
    id: i64,
    #[orm(column = "display_name")]
    name: String,
    email: Option<String>,
    login_count: i32,
    #[orm(skip)]
    #[allow(dead_code)]
    session: Option<String>,
}

fn print(label: &str, query: &Query) {
    println!("{label}:");
    println!("  sql:  {}", query.sql());
    println!("  args: {:?}", query.args());
}

fn main() -> OrmResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = Db::new();
    let user = User {
        id: 7,
        name: "Ann".to_string(),
        email: Some("ann@example.com".to_string()),
        login_count: 3,
        session: None,
    };

    // Copy fields from the record.
    let query = Updater::<User>::new(&db)?
        .update(user.clone())
        .set([col("name"), col("email")])
        .where_([col("id").eq(user.id)])
        .build()?;
    print("copy fields", &query);

    // Literal and arithmetic assignments.
    let query = Updater::<User>::new(&db)?
        .set([
            Assignable::from(assign("email", None::<String>)),
            assign_expr("login_count", col("login_count").add(1i32)).into(),
        ])
        .where_([
            col("id").in_list(vec![7i64, 8, 9]),
            Predicate::not(col("email").is_null()).or(col("login_count").lt(1i32)),
        ])
        .build()?;
    print("literal and arithmetic", &query);

    // Only the fields that hold a value.
    let query = Updater::<User>::new(&db)?
        .update(User {
            id: 7,
            login_count: 4,
            ..User::default()
        })
        .set_non_zero()
        .where_([col("id").eq(7i64)])
        .build()?;
    print("non-zero fields", &query);

    // Same registry, Postgres placeholders.
    let pg = Db::with_registry(
        DbConfig::new().dialect(Dialect::Postgres),
        db.registry().clone(),
    );
    let query = Updater::<User>::new(&pg)?
        .update(user)
        .set([col("name")])
        .where_([col("id").eq(7i64), col("login_count").gte(1i32)])
        .build()?;
    print("postgres", &query);

    let failures = [
        Updater::<User>::new(&db)?.build(),
        Updater::<User>::new(&db)?.set([col("session")]).build(),
        Updater::<User>::new(&db)?.set([col("id").add(1i64)]).build(),
    ];
    for result in failures {
        match result {
            Ok(query) => print("unexpected", &query),
            Err(
                err @ (OrmError::NoUpdatedColumns
                | OrmError::UnknownField(_)
                | OrmError::UnsupportedAssignableType(_)),
            ) => println!("rejected: {err}"),
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
