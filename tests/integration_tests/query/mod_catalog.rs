use upalate_mongo::errors::DbError;
use upalate_mongo::query::{CmpOp, Operator, Semantic};

#[test]
fn every_operator_resolves_to_a_semantic() {
    let semantics: Vec<Semantic> = Operator::ALL_OPERATORS.iter().map(|op| op.semantic()).collect();
    assert_eq!(
        semantics,
        vec![
            Semantic::MatchAll,
            Semantic::Conjunction,
            Semantic::Compare(CmpOp::Eq),
            Semantic::Presence,
            Semantic::Compare(CmpOp::Gt),
            Semantic::Compare(CmpOp::Gte),
            Semantic::Compare(CmpOp::Lt),
            Semantic::Compare(CmpOp::Lte),
        ]
    );
}

#[test]
fn names_parse_and_display() {
    for op in Operator::ALL_OPERATORS {
        assert_eq!(op.to_string().parse::<Operator>().unwrap(), op);
    }
    assert_eq!("greater-than".parse::<Operator>().unwrap(), Operator::GreaterThan);
    assert_eq!(" less_than_or_equals ".parse::<Operator>().unwrap(), Operator::LessThanOrEquals);
}

#[test]
fn unknown_name_is_unsupported() {
    let err = "REGEX".parse::<Operator>().unwrap_err();
    assert!(matches!(err, DbError::UnsupportedOperator(ref s) if s == "REGEX"));
}

#[test]
fn relational_and_key_requirements() {
    assert!(Operator::GreaterThan.is_relational());
    assert!(Operator::LessThanOrEquals.is_relational());
    assert!(!Operator::Equals.is_relational());
    assert!(!Operator::Exists.is_relational());
    assert!(Operator::Exists.requires_key());
    assert!(!Operator::All.requires_key());
    assert!(!Operator::And.requires_key());
}

#[test]
fn serde_uses_screaming_names() {
    let json = serde_json::to_string(&Operator::GreaterThanOrEquals).unwrap();
    assert_eq!(json, "\"GREATER_THAN_OR_EQUALS\"");
    let op: Operator = serde_json::from_str("\"EXISTS\"").unwrap();
    assert_eq!(op, Operator::Exists);
}
