//! Default sort over records.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::model::{Record, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Returns `"asc"` or `"desc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Anything other than `"asc"` sorts descending.
impl From<&str> for Direction {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            Direction::Asc
        } else {
            Direction::Desc
        }
    }
}

impl FromStr for Direction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sort facet handed to a host sort handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub sort_by: String,
    pub sort_direction: Direction,
}

impl SortState {
    pub fn new(sort_by: impl Into<String>, sort_direction: Direction) -> Self {
        Self {
            sort_by: sort_by.into(),
            sort_direction,
        }
    }
}

static NULL: Value = Value::Null;

/// Total order over field values.
///
/// Values of different kinds order by kind: null, bool, number, datetime,
/// string, json. Ints and floats compare numerically; NaN equals NaN and sorts
/// above every other number. Strings compare by code point, case-sensitive.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Int(a), Value::Float(b)) => compare_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) => compare_int_float(*b, *a).reverse(),
        (Value::Float(a), Value::Float(b)) => compare_floats(*a, *b),
        (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Json(a), Value::Json(b)) => a.to_string().cmp(&b.to_string()),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Exact comparison of an integer with a float. Casting the integer to `f64`
/// rounds above 2^53 and would break transitivity.
fn compare_int_float(int: i64, float: f64) -> Ordering {
    // 2^63, the first float past `i64::MAX`.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() || float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let floor = float.floor();
    match int.cmp(&(floor as i64)) {
        Ordering::Equal if float > floor => Ordering::Less,
        other => other,
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::DateTime(_) => 3,
        Value::String(_) => 4,
        Value::Json(_) => 5,
    }
}

/// Compares two records on `key`; a missing field compares as null.
pub fn compare_records(a: &Record, b: &Record, key: &str, direction: Direction) -> Ordering {
    let a = a.get(key).unwrap_or(&NULL);
    let b = b.get(key).unwrap_or(&NULL);
    match direction {
        Direction::Asc => compare_values(a, b),
        Direction::Desc => compare_values(b, a),
    }
}

/// Sorts `data` in place on `key`. The sort is stable in both directions.
pub fn sort_in_place(data: &mut [Record], key: &str, direction: Direction) {
    data.sort_by(|a, b| compare_records(a, b, key, direction));
}

/// Returns a sorted copy of `data`, leaving the input untouched.
///
/// # Example
///
/// ```
/// use datatable::{Direction, Record, sort};
///
/// let data = vec![
///     Record::new().set("id", 2),
///     Record::new().set("id", 1),
///     Record::new().set("id", 3),
/// ];
///
/// let sorted = sort(&data, "id", Direction::Asc);
/// let ids: Vec<i64> = sorted.iter().map(|r| r.get_int("id").unwrap().unwrap()).collect();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
pub fn sort(data: &[Record], key: &str, direction: Direction) -> Vec<Record> {
    let mut sorted = data.to_vec();
    sort_in_place(&mut sorted, key, direction);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .map(|r| r.get_int("id").unwrap().unwrap())
            .collect()
    }

    #[test]
    fn test_sort_does_not_touch_input() {
        let data = vec![Record::new().set("id", 2), Record::new().set("id", 1)];
        let sorted = sort(&data, "id", Direction::Asc);
        assert_eq!(ids(&sorted), vec![1, 2]);
        assert_eq!(ids(&data), vec![2, 1]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let data = vec![
            Record::new().set("id", 1).set("group", "a"),
            Record::new().set("id", 2).set("group", "b"),
            Record::new().set("id", 3).set("group", "a"),
        ];
        let sorted = sort(&data, "group", Direction::Desc);
        assert_eq!(ids(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn test_missing_fields_sort_first_ascending() {
        let data = vec![
            Record::new().set("id", 1).set("score", 5),
            Record::new().set("id", 2),
            Record::new().set("id", 3).set("score", Value::Null),
        ];
        assert_eq!(ids(&sort(&data, "score", Direction::Asc)), vec![2, 3, 1]);
        assert_eq!(ids(&sort(&data, "score", Direction::Desc)), vec![1, 2, 3]);
    }

    #[test]
    fn test_mixed_numbers_compare_numerically() {
        assert_eq!(compare_values(&Value::Int(2), &Value::Float(1.5)), Ordering::Greater);
        assert_eq!(compare_values(&Value::Float(2.0), &Value::Int(2)), Ordering::Equal);
        assert_eq!(
            compare_values(&Value::Float(f64::NAN), &Value::Float(f64::NAN)),
            Ordering::Equal
        );
        assert_eq!(
            compare_values(&Value::Float(f64::NAN), &Value::Int(i64::MAX)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_large_ints_against_floats_compare_exactly() {
        const TWO_53: i64 = 1 << 53;
        let float = Value::Float(TWO_53 as f64);

        assert_eq!(compare_values(&Value::Int(TWO_53), &float), Ordering::Equal);
        assert_eq!(compare_values(&float, &Value::Int(TWO_53 + 1)), Ordering::Less);
        assert_eq!(compare_values(&Value::Int(TWO_53 + 1), &float), Ordering::Greater);
        assert_eq!(compare_values(&Value::Int(i64::MAX), &Value::Float(f64::INFINITY)), Ordering::Less);
        assert_eq!(compare_values(&Value::Int(i64::MIN), &Value::Float(-1e19)), Ordering::Greater);
        assert_eq!(compare_values(&Value::Int(-2), &Value::Float(-1.5)), Ordering::Less);
        assert_eq!(compare_values(&Value::Float(-0.0), &Value::Int(0)), Ordering::Equal);
    }

    #[test]
    fn test_sort_column_of_large_ints_and_floats() {
        const TWO_53: i64 = 1 << 53;
        let data: Vec<Record> = (0..40i64)
            .map(|i| {
                let value = match i % 4 {
                    0 => Value::Float(TWO_53 as f64),
                    1 => Value::Int(TWO_53 + (i % 3)),
                    2 => Value::Int(TWO_53 - (i % 5)),
                    _ => Value::Float(TWO_53 as f64 + 2.0),
                };
                Record::new().set("id", i).set("k", value)
            })
            .collect();

        for direction in [Direction::Asc, Direction::Desc] {
            let sorted = sort(&data, "k", direction);
            assert_eq!(sorted.len(), data.len());
            for pair in sorted.windows(2) {
                assert_ne!(
                    compare_records(&pair[0], &pair[1], "k", direction),
                    Ordering::Greater
                );
            }
        }
    }

    #[test]
    fn test_mismatched_kinds_order_by_kind() {
        assert_eq!(compare_values(&Value::Int(99), &Value::from("1")), Ordering::Less);
        assert_eq!(compare_values(&Value::Bool(true), &Value::Int(0)), Ordering::Less);
        assert_eq!(compare_values(&Value::Null, &Value::Bool(false)), Ordering::Less);
    }

    #[test]
    fn test_strings_are_case_sensitive() {
        // Upper case code points come before lower case ones.
        assert_eq!(compare_values(&Value::from("Zed"), &Value::from("adam")), Ordering::Less);
    }

    #[test]
    fn test_direction_from_str_and_flip() {
        assert_eq!(Direction::from("asc"), Direction::Asc);
        assert_eq!(Direction::from("desc"), Direction::Desc);
        assert_eq!(Direction::from("sideways"), Direction::Desc);
        assert_eq!("ASC".parse::<Direction>(), Ok(Direction::Asc));
        assert_eq!(Direction::Asc.flip(), Direction::Desc);
        assert_eq!(serde_json::to_string(&Direction::Desc).unwrap(), "\"desc\"");
    }
}
