use bson::{Bson, doc};
use upalate_mongo::errors::DbError;
use upalate_mongo::query::{CmpOp, Filter, FilterRequest, Operator, and_value, build_filter, parse_request_json};

fn req(op: Operator, key: &str, value: &str) -> FilterRequest {
    FilterRequest::new(op, key, value)
}

#[test]
fn greater_than_builds_integer_comparison() {
    let f = build_filter(&req(Operator::GreaterThan, "age", "30")).unwrap();
    assert_eq!(f, Filter::Cmp { path: "age".into(), op: CmpOp::Gt, value: Bson::Int64(30) });
    assert_eq!(f.to_document(), doc! {"age": {"$gt": 30_i64}});
}

#[test]
fn relational_values_are_not_trimmed_or_floats() {
    for bad in ["thirty", " 30", "30.5", "1e3"] {
        let err = build_filter(&req(Operator::LessThan, "age", bad)).unwrap_err();
        assert!(matches!(err, DbError::Parse { .. }), "{bad:?}");
    }
    assert!(build_filter(&req(Operator::LessThan, "age", "+30")).is_ok());
}

#[test]
fn exists_accepts_only_booleans() {
    assert_eq!(
        build_filter(&req(Operator::Exists, "e", "TRUE")).unwrap(),
        Filter::Exists { path: "e".into(), exists: true }
    );
    assert!(matches!(build_filter(&req(Operator::Exists, "e", "maybe")), Err(DbError::Parse { .. })));
}

#[test]
fn empty_value_is_validation_error_for_every_operator_but_all() {
    for op in Operator::ALL_OPERATORS {
        let res = build_filter(&req(op, "k", ""));
        if op == Operator::All {
            assert_eq!(res.unwrap(), Filter::True);
        } else {
            assert!(matches!(res, Err(DbError::Validation(_))), "{op}");
        }
    }
    let child = and_value(&[req(Operator::Equals, "name", "")]).unwrap();
    assert!(matches!(build_filter(&req(Operator::And, "", &child)), Err(DbError::Validation(_))));
}

#[test]
fn all_ignores_key_and_value() {
    assert_eq!(build_filter(&req(Operator::All, "whatever", "xyz")).unwrap(), Filter::True);
    assert_eq!(Filter::True.to_document(), doc! {});
}

#[test]
fn and_nests_and_validates() {
    let inner = and_value(&[req(Operator::LessThan, "age", "65"), req(Operator::GreaterThan, "age", "18")]).unwrap();
    let outer = and_value(&[req(Operator::And, "", &inner), req(Operator::Equals, "kind", "user")]).unwrap();
    let f = build_filter(&req(Operator::And, "", &outer)).unwrap();
    assert_eq!(
        f.to_document(),
        doc! {"$and": [
            {"$and": [{"age": {"$lt": 65_i64}}, {"age": {"$gt": 18_i64}}]},
            {"kind": {"$eq": "user"}},
        ]}
    );

    assert!(matches!(build_filter(&req(Operator::And, "", "[]")), Err(DbError::Validation(_))));
    assert!(matches!(build_filter(&req(Operator::And, "", "not json")), Err(DbError::Parse { .. })));
    let bad_child = and_value(&[req(Operator::GreaterThan, "age", "old")]).unwrap();
    assert!(matches!(build_filter(&req(Operator::And, "", &bad_child)), Err(DbError::Parse { .. })));
}

#[test]
fn and_depth_is_bounded() {
    let mut value = and_value(&[req(Operator::All, "", "")]).unwrap();
    for _ in 0..10 {
        value = and_value(&[req(Operator::And, "", &value)]).unwrap();
    }
    assert!(matches!(build_filter(&req(Operator::And, "", &value)), Err(DbError::Validation(_))));
}

#[test]
fn request_json_defaults_key_and_value() {
    let r = parse_request_json(r#"{"operator":"ALL"}"#).unwrap();
    assert_eq!(r, FilterRequest::all());
    assert!(parse_request_json(r#"{"operator":"LIKE"}"#).is_err());
}

#[test]
fn rendered_filters_read_back() {
    let f = Filter::And(vec![
        Filter::Cmp { path: "a.b".into(), op: CmpOp::Gte, value: Bson::Int64(2) },
        Filter::Exists { path: "c".into(), exists: false },
    ]);
    let back = Filter::try_from(&f.to_document()).unwrap();
    assert_eq!(back, f);
}

#[test]
fn implicit_equality_and_multiple_fields_read_back() {
    let f = Filter::try_from(&doc! {"name": "alice", "age": {"$gt": 3, "$lt": 9}}).unwrap();
    assert_eq!(
        f,
        Filter::And(vec![
            Filter::Cmp { path: "name".into(), op: CmpOp::Eq, value: Bson::String("alice".into()) },
            Filter::Cmp { path: "age".into(), op: CmpOp::Gt, value: Bson::Int32(3) },
            Filter::Cmp { path: "age".into(), op: CmpOp::Lt, value: Bson::Int32(9) },
        ])
    );
    assert!(matches!(Filter::try_from(&doc! {"$or": []}), Err(DbError::UnsupportedOperator(_))));
    assert!(matches!(Filter::try_from(&doc! {"a": {"$regex": "x"}}), Err(DbError::UnsupportedOperator(_))));
}

#[test]
fn and_documents_over_the_clause_limit_are_rejected() {
    let clauses: Vec<bson::Document> = (0..65).map(|i| doc! {"x": {"$eq": i}}).collect();
    let err = Filter::try_from(&doc! {"$and": clauses}).unwrap_err();
    assert!(matches!(err, DbError::Validation(_)));
}

#[test]
fn nested_and_documents_are_depth_bounded() {
    let nest = |levels: usize| {
        let mut d = doc! {"x": 1};
        for _ in 0..levels {
            d = doc! {"$and": [d]};
        }
        d
    };
    assert!(Filter::try_from(&nest(8)).is_ok());
    assert!(matches!(Filter::try_from(&nest(9)), Err(DbError::Validation(_))));
}
