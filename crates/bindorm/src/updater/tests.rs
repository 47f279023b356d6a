use super::*;
use crate::assign::{assign, assign_expr, assign_non_zero};
use crate::db::DbConfig;
use crate::dialect::Dialect;
use crate::expr::{MathExpr, col, val};
use crate::model::{EntityDescriptor, FieldDescriptor};
use crate::param::Param;

#[derive(Default, Clone)]
struct TestModel {
    id: i64,
    first_name: String,
    age: i8,
    last_name: Option<String>,
}

impl Entity for TestModel {
    fn describe() -> EntityDescriptor<Self> {
        EntityDescriptor {
            type_name: "TestModel",
            table: None,
            fields: vec![
                FieldDescriptor {
                    name: "Id",
                    column: Some("id"),
                    getter: |m: &TestModel| Param::new(m.id),
                    is_zero: |m: &TestModel| m.id == 0,
                },
                FieldDescriptor {
                    name: "FirstName",
                    column: None,
                    getter: |m: &TestModel| Param::new(m.first_name.clone()),
                    is_zero: |m: &TestModel| m.first_name.is_empty(),
                },
                FieldDescriptor {
                    name: "Age",
                    column: None,
                    getter: |m: &TestModel| Param::new(m.age),
                    is_zero: |m: &TestModel| m.age == 0,
                },
                FieldDescriptor {
                    name: "LastName",
                    column: None,
                    getter: |m: &TestModel| Param::new(m.last_name.clone()),
                    is_zero: |m: &TestModel| m.last_name.is_none(),
                },
            ],
        }
    }
}

#[derive(Default)]
struct User {
    first_name: String,
}

impl Entity for User {
    fn describe() -> EntityDescriptor<Self> {
        EntityDescriptor {
            type_name: "User",
            table: Some("users"),
            fields: vec![FieldDescriptor {
                name: "FirstName",
                column: Some("first_name"),
                getter: |u: &User| Param::new(u.first_name.clone()),
                is_zero: |u: &User| u.first_name.is_empty(),
            }],
        }
    }
}

#[derive(Default)]
struct Odd {
    flag: bool,
}

impl Entity for Odd {
    fn describe() -> EntityDescriptor<Self> {
        EntityDescriptor {
            type_name: "Odd",
            table: None,
            fields: vec![FieldDescriptor {
                name: "Flag",
                column: Some("flag?"),
                getter: |o: &Odd| Param::new(o.flag),
                is_zero: |o: &Odd| !o.flag,
            }],
        }
    }
}

#[derive(Default)]
struct Unmappable;

impl Entity for Unmappable {
    fn describe() -> EntityDescriptor<Self> {
        EntityDescriptor {
            type_name: "Unmappable",
            table: None,
            fields: Vec::new(),
        }
    }
}

fn sample() -> TestModel {
    TestModel {
        id: 12,
        first_name: "Tom".to_string(),
        age: 18,
        last_name: Some("Jerry".to_string()),
    }
}

fn args_of(query: &Query) -> String {
    format!("{:?}", query.args())
}

#[test]
fn test_no_updated_columns() {
    let db = Db::new();
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .build()
        .unwrap_err();
    assert!(err.is_no_updated_columns());
    assert_eq!(err.to_string(), "no updated columns");
}

#[test]
fn test_single_column_from_record() {
    let db = Db::new();
    let query = Updater::<User>::new(&db)
        .unwrap()
        .update(User {
            first_name: "Ann".to_string(),
        })
        .set([col("FirstName")])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `users` SET `first_name`=?;");
    assert_eq!(args_of(&query), r#"["Ann"]"#);
}

#[test]
fn test_multiple_columns_with_where() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([col("FirstName"), col("Age")])
        .where_([col("Id").eq(12i64)])
        .build()
        .unwrap();
    assert_eq!(
        query.sql(),
        "UPDATE `test_model` SET `first_name`=?,`age`=? WHERE `id` = ?;"
    );
    assert_eq!(args_of(&query), r#"["Tom", 18, 12]"#);
}

#[test]
fn test_explicit_assignment() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([
            Assignable::from(col("FirstName")),
            assign("Age", 30i8).into(),
        ])
        .build()
        .unwrap();
    assert_eq!(
        query.sql(),
        "UPDATE `test_model` SET `first_name`=?,`age`=?;"
    );
    assert_eq!(args_of(&query), r#"["Tom", 30]"#);
}

#[test]
fn test_math_assignment() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([
            Assignable::from(assign_expr("Age", col("Age").add(1i8))),
            col("FirstName").into(),
        ])
        .where_([col("Id").eq(12i64)])
        .build()
        .unwrap();
    assert_eq!(
        query.sql(),
        "UPDATE `test_model` SET `age`=`age` + ?,`first_name`=? WHERE `id` = ?;"
    );
    assert_eq!(args_of(&query), r#"[1, "Tom", 12]"#);
}

#[test]
fn test_math_assignment_with_column_rhs() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([assign_expr("Age", col("Age").math("+", col("Id")))])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `age`=`age` + `id`;");
    assert!(query.args().is_empty());
}

#[test]
fn test_column_to_column_assignment() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([assign_expr("LastName", col("FirstName"))])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `last_name`=`first_name`;");
}

#[test]
fn test_math_with_non_column_left_is_rejected() {
    let db = Db::new();
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([assign_expr("Age", MathExpr::new(val(1i8), "+", val(2i8)))])
        .build()
        .unwrap_err();
    assert!(matches!(err, OrmError::UnsupportedExpression(_)));
}

#[test]
fn test_nested_math_rhs_is_rejected() {
    let db = Db::new();
    let nested = col("Age").math("+", col("Age").mul(2i8));
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([assign_expr("Age", nested)])
        .build()
        .unwrap_err();
    assert!(matches!(err, OrmError::UnsupportedExpression(_)));
}

#[test]
fn test_unsupported_assignable() {
    let db = Db::new();
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([Assignable::from(val(42i32))])
        .build()
        .unwrap_err();
    match err {
        OrmError::UnsupportedAssignableType(ref v) => assert!(v.contains("42"), "got {v}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unknown_column_assignable() {
    let db = Db::new();
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([col("Invalid")])
        .build()
        .unwrap_err();
    assert!(err.is_unknown_field());
    assert_eq!(err.to_string(), "unknown field: Invalid");
}

#[test]
fn test_explicit_assignment_unknown_field_is_underscored() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([assign("UpdatedBy", "admin")])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `updated_by`=?;");
}

#[test]
fn test_missing_target_uses_default() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([col("FirstName"), col("LastName")])
        .build()
        .unwrap();
    assert_eq!(args_of(&query), r#"["", None]"#);
}

#[test]
fn test_set_and_where_replace() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([col("FirstName")])
        .set([col("Age")])
        .where_([col("Id").eq(1i64)])
        .where_([col("Id").eq(2i64)])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `age`=? WHERE `id` = ?;");
    assert_eq!(args_of(&query), "[18, 2]");
}

#[test]
fn test_two_predicates() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([col("FirstName")])
        .where_([col("Id").eq(12i64), col("Age").gt(10i8)])
        .build()
        .unwrap();
    assert_eq!(
        query.sql(),
        "UPDATE `test_model` SET `first_name`=? WHERE (`id` = ?) AND (`age` > ?);"
    );
}

#[test]
fn test_predicate_error_propagates() {
    let db = Db::new();
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([col("FirstName")])
        .where_([col("Nope").eq(1i32)])
        .build()
        .unwrap_err();
    assert!(err.is_unknown_field());
}

#[test]
fn test_build_is_repeatable() {
    let db = Db::new();
    let updater = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([
            Assignable::from(col("FirstName")),
            assign_expr("Age", col("Age").add(1i8)).into(),
        ])
        .where_([col("Id").eq(12i64)]);
    let a = updater.build().unwrap();
    let b = updater.build().unwrap();
    assert_eq!(a.sql(), b.sql());
    assert_eq!(args_of(&a), args_of(&b));

    let fresh = updater.clone().build().unwrap();
    assert_eq!(a.sql(), fresh.sql());
}

#[test]
fn test_postgres_dialect() {
    let db = Db::with_config(DbConfig::new().dialect(Dialect::Postgres));
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([
            Assignable::from(col("FirstName")),
            assign_expr("Age", col("Age").add(1i8)).into(),
        ])
        .where_([col("Id").eq(12i64)])
        .build()
        .unwrap();
    assert_eq!(
        query.sql(),
        r#"UPDATE "test_model" SET "first_name"=$1,"age"="age" + $2 WHERE "id" = $3;"#
    );
}

#[test]
fn test_placeholder_count_matches_args() {
    let db = Db::new();
    let cases: Vec<Vec<Assignable>> = vec![
        vec![col("FirstName").into()],
        vec![col("FirstName").into(), col("Age").into(), col("LastName").into()],
        vec![assign("Age", 1i8).into(), assign_expr("Id", col("Id").sub(1i64)).into()],
        vec![assign_expr("LastName", col("FirstName")).into()],
    ];
    for assigns in cases {
        let query = Updater::<TestModel>::new(&db)
            .unwrap()
            .update(sample())
            .set(assigns)
            .where_([col("Id").in_list(vec![1i64, 2, 3])])
            .build()
            .unwrap();
        assert_eq!(
            Dialect::MySql.count_placeholders(query.sql()),
            query.args().len(),
            "mismatch for {}",
            query.sql()
        );
    }
}

#[test]
fn test_constructor_error_is_returned() {
    let db = Db::new();
    let err = Updater::<Unmappable>::new(&db).unwrap_err();
    assert!(err.is_invalid_model());
}

#[test]
fn test_query_params_ref() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(sample())
        .set([col("FirstName"), col("Age")])
        .build()
        .unwrap();
    assert_eq!(query.params_ref().len(), 2);
    let (sql, args) = query.into_parts();
    assert!(sql.ends_with(';'));
    assert_eq!(args.len(), 2);
}

#[test]
fn test_unknown_field_on_assignment_rhs() {
    let db = Db::new();
    let rhs = [
        assign_expr("Age", col("Agee")),
        assign_expr("Age", col("Age").math("+", col("Agee"))),
        assign_expr("Age", col("Agee").add(1i8)),
    ];
    for assignment in rhs {
        let err = Updater::<TestModel>::new(&db)
            .unwrap()
            .set([assignment])
            .build()
            .unwrap_err();
        assert!(err.is_unknown_field(), "got {err:?}");
        assert_eq!(err.to_string(), "unknown field: Agee");
    }
}

#[test]
fn test_unknown_assignment_target_still_underscored() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .set([assign_expr("PrevAge", col("Age"))])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `prev_age`=`age`;");
}

#[test]
fn test_assign_non_zero_skips_zero_fields() {
    let db = Db::new();
    let record = TestModel {
        id: 3,
        first_name: String::new(),
        age: 0,
        last_name: Some("Jerry".to_string()),
    };
    let updater = Updater::<TestModel>::new(&db).unwrap();
    let assigns = assign_non_zero(updater.model(), &record);
    assert_eq!(assigns.len(), 2);

    let query = updater.update(record).set(assigns).build().unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `id`=?,`last_name`=?;");
    assert_eq!(args_of(&query), r#"[3, Some("Jerry")]"#);
}

#[test]
fn test_set_non_zero_uses_target() {
    let db = Db::new();
    let query = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(TestModel {
            age: 21,
            ..TestModel::default()
        })
        .set_non_zero()
        .where_([col("Id").eq(12i64)])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `test_model` SET `age`=? WHERE `id` = ?;");
    assert_eq!(args_of(&query), "[21, 12]");
}

#[test]
fn test_all_zero_record_has_no_columns() {
    let db = Db::new();
    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .update(TestModel::default())
        .set_non_zero()
        .build()
        .unwrap_err();
    assert!(err.is_no_updated_columns());

    let err = Updater::<TestModel>::new(&db)
        .unwrap()
        .set_non_zero()
        .build()
        .unwrap_err();
    assert!(err.is_no_updated_columns());
}

#[test]
fn test_placeholder_count_ignores_quoted_columns() {
    let db = Db::new();
    let query = Updater::<Odd>::new(&db)
        .unwrap()
        .update(Odd { flag: true })
        .set([col("Flag")])
        .where_([col("Flag").eq(false)])
        .build()
        .unwrap();
    assert_eq!(query.sql(), "UPDATE `odd` SET `flag?`=? WHERE `flag?` = ?;");
    assert_eq!(Dialect::MySql.count_placeholders(query.sql()), query.args().len());
}
