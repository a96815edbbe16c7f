use bson::{Bson, Document as BsonDocument};
use std::cmp::Ordering;

use super::types::{CmpOp, Filter, MAX_PATH_DEPTH};

pub fn eval_filter(doc: &BsonDocument, filter: &Filter) -> bool {
    match filter {
        Filter::True => true,
        Filter::And(fs) => fs.iter().all(|f| eval_filter(doc, f)),
        Filter::Exists { path, exists } => get_path(doc, path).is_some() == *exists,
        Filter::Cmp { path, op, value } => {
            let Some(v) = get_path(doc, path) else {
                return false;
            };
            match op {
                CmpOp::Eq => bson_equal(v, value),
                // Ordering only applies within one type class, as on the server.
                _ => match compare_bson(v, value) {
                    Some(c) => match op {
                        CmpOp::Gt => c == Ordering::Greater,
                        CmpOp::Gte => c != Ordering::Less,
                        CmpOp::Lt => c == Ordering::Less,
                        CmpOp::Lte => c != Ordering::Greater,
                        CmpOp::Eq => c == Ordering::Equal,
                    },
                    None => false,
                },
            }
        }
    }
}

fn get_path<'a>(doc: &'a BsonDocument, path: &str) -> Option<&'a Bson> {
    if path.is_empty() || path.len() > 1024 {
        return None;
    }
    let mut parts = path.split('.');
    let mut cur = doc.get(parts.next()?)?;
    for (depth, part) in parts.enumerate() {
        if depth + 1 >= MAX_PATH_DEPTH {
            return None;
        }
        match cur {
            Bson::Document(d) => cur = d.get(part)?,
            _ => return None,
        }
    }
    Some(cur)
}

fn is_num(x: &Bson) -> bool {
    matches!(x, Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_))
}

#[allow(clippy::cast_precision_loss)]
fn as_f64_num(x: &Bson) -> f64 {
    match x {
        Bson::Int32(i) => f64::from(*i),
        Bson::Int64(i) => *i as f64,
        Bson::Double(f) => *f,
        Bson::Decimal128(d) => d.to_string().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn bson_equal(a: &Bson, b: &Bson) -> bool {
    if is_num(a) && is_num(b) {
        return compare_bson(a, b) == Some(Ordering::Equal);
    }
    a == b
}

/// Orders two values of the same type class, `None` across classes.
pub fn compare_bson(a: &Bson, b: &Bson) -> Option<Ordering> {
    if is_num(a) && is_num(b) {
        if let (Bson::Int64(x), Bson::Int64(y)) = (a, b) {
            return Some(x.cmp(y));
        }
        match (as_i64(a), as_i64(b), a, b) {
            (Some(x), Some(y), _, _) => return Some(x.cmp(&y)),
            (Some(x), None, _, Bson::Double(y)) => return cmp_int_double(x, *y),
            (None, Some(y), Bson::Double(x), _) => return cmp_int_double(y, *x).map(Ordering::reverse),
            _ => {}
        }
        let (x, y) = (as_f64_num(a), as_f64_num(b));
        if x.is_nan() || y.is_nan() {
            return None;
        }
        return Some(x.total_cmp(&y));
    }
    match (a, b) {
        (Bson::String(x), Bson::String(y)) => Some(x.cmp(y)),
        (Bson::Boolean(x), Bson::Boolean(y)) => Some(x.cmp(y)),
        (Bson::DateTime(x), Bson::DateTime(y)) => Some(x.cmp(y)),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Exact ordering of an integer against a double, without rounding the integer.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_double(i: i64, f: f64) -> Option<Ordering> {
    // 2^63, the first double above i64::MAX
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= TWO_POW_63 {
        return Some(Ordering::Less);
    }
    if f < -TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)),
        other => Some(other),
    }
}

fn as_i64(x: &Bson) -> Option<i64> {
    match x {
        Bson::Int32(i) => Some(i64::from(*i)),
        Bson::Int64(i) => Some(*i),
        _ => None,
    }
}
