use bson::{Bson, Document};

use crate::errors::DbError;

use super::types::{CmpOp, Filter, MAX_AND_CLAUSES, MAX_AND_DEPTH};

impl Filter {
    /// Renders the filter in the driver's query syntax.
    pub fn to_document(&self) -> Document {
        let mut out = Document::new();
        match self {
            Filter::True => {}
            Filter::And(fs) => {
                let clauses: Vec<Bson> = fs.iter().map(|f| Bson::Document(f.to_document())).collect();
                out.insert("$and", clauses);
            }
            Filter::Exists { path, exists } => {
                let mut cond = Document::new();
                cond.insert("$exists", *exists);
                out.insert(path.clone(), cond);
            }
            Filter::Cmp { path, op, value } => {
                let mut cond = Document::new();
                cond.insert(op.as_mongo(), value.clone());
                out.insert(path.clone(), cond);
            }
        }
        out
    }
}

impl From<&Filter> for Document {
    fn from(f: &Filter) -> Self {
        f.to_document()
    }
}

impl TryFrom<&Document> for Filter {
    type Error = DbError;

    /// Reads back the subset of the driver's query syntax that `to_document`
    /// produces, plus the implicit-equality form `{field: value}`.
    fn try_from(doc: &Document) -> Result<Self, Self::Error> {
        read_filter(doc, 0)
    }
}

fn read_filter(doc: &Document, depth: usize) -> Result<Filter, DbError> {
    let mut parts = Vec::with_capacity(doc.len());
    for (key, value) in doc {
        if key == "$and" {
            let Bson::Array(items) = value else {
                return Err(DbError::Validation("$and expects an array".into()));
            };
            if depth >= MAX_AND_DEPTH {
                return Err(DbError::Validation(format!(
                    "$and nested deeper than {MAX_AND_DEPTH} levels"
                )));
            }
            if items.len() > MAX_AND_CLAUSES {
                return Err(DbError::Validation(format!(
                    "$and accepts at most {MAX_AND_CLAUSES} clauses, got {}",
                    items.len()
                )));
            }
            let subs = items
                .iter()
                .map(|item| match item {
                    Bson::Document(d) => read_filter(d, depth + 1),
                    _ => Err(DbError::Validation("$and items must be documents".into())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            parts.push(Filter::And(subs));
        } else if key.starts_with('$') {
            return Err(DbError::UnsupportedOperator(key.clone()));
        } else {
            parts.extend(field_conditions(key, value)?);
        }
    }
    Ok(match parts.len() {
        0 => Filter::True,
        1 => parts.remove(0),
        _ => Filter::And(parts),
    })
}

fn field_conditions(path: &str, value: &Bson) -> Result<Vec<Filter>, DbError> {
    let cond = match value {
        Bson::Document(d) if d.keys().next().is_some_and(|k| k.starts_with('$')) => d,
        other => {
            return Ok(vec![Filter::Cmp { path: path.to_string(), op: CmpOp::Eq, value: other.clone() }]);
        }
    };
    let mut out = Vec::with_capacity(cond.len());
    for (op, v) in cond {
        if op == "$exists" {
            let exists = match v {
                Bson::Boolean(b) => *b,
                Bson::Int32(i) => *i != 0,
                Bson::Int64(i) => *i != 0,
                _ => return Err(DbError::Validation("$exists expects a boolean".into())),
            };
            out.push(Filter::Exists { path: path.to_string(), exists });
        } else if let Some(cmp) = CmpOp::from_mongo(op) {
            out.push(Filter::Cmp { path: path.to_string(), op: cmp, value: v.clone() });
        } else {
            return Err(DbError::UnsupportedOperator(op.clone()));
        }
    }
    Ok(out)
}
