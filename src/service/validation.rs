//! Request payload checks. Only field presence is validated here; value coercion mirrors what
//! the store would accept from a loosely-typed driver and leaves every other judgement to it.

use crate::error::StoreError;
use crate::model::{StudentInput, STUDENT_FIELDS};
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// First writable field absent from `body`, in `name, email, age, course` order.
    /// Empty strings and `null` count as present.
    pub fn first_missing(body: &Map<String, Value>) -> Option<&'static str> {
        STUDENT_FIELDS.iter().copied().find(|field| !body.contains_key(*field))
    }

    /// Values for an insert. Callers check presence first; an absent key binds NULL.
    pub fn create_input(body: &Map<String, Value>) -> Result<StudentInput, StoreError> {
        Ok(StudentInput {
            name: text_field(body, "name")?,
            email: text_field(body, "email")?,
            age: int_field(body, "age")?,
            course: text_field(body, "course")?,
        })
    }

    /// Values for a full-row replace. An omitted field is written as its unset value
    /// (empty text, zero age); an explicit `null` still binds NULL.
    pub fn replace_input(body: &Map<String, Value>) -> Result<StudentInput, StoreError> {
        Ok(StudentInput {
            name: or_unset(body, "name", text_field(body, "name")?),
            email: or_unset(body, "email", text_field(body, "email")?),
            age: or_unset(body, "age", int_field(body, "age")?),
            course: or_unset(body, "course", text_field(body, "course")?),
        })
    }
}

fn or_unset<T: Default>(body: &Map<String, Value>, field: &str, value: Option<T>) -> Option<T> {
    if body.contains_key(field) {
        value
    } else {
        Some(T::default())
    }
}

fn text_field(
    body: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, StoreError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(v.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(StoreError::Rejected {
            field,
            reason: "structured value cannot be stored as text".into(),
        }),
    }
}

fn int_field(body: &Map<String, Value>, field: &'static str) -> Result<Option<i32>, StoreError> {
    let rejected = |reason: String| StoreError::Rejected { field, reason };
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i32::try_from(i)
                    .map(Some)
                    .map_err(|_| rejected(format!("{} is out of range for integer", i)))
            } else if let Some(f) = n.as_f64() {
                let rounded = f.round();
                if rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
                    Ok(Some(rounded as i32))
                } else {
                    Err(rejected(format!("{} is out of range for integer", f)))
                }
            } else {
                Err(rejected(format!("{} is out of range for integer", n)))
            }
        }
        Some(Value::String(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| rejected(format!("invalid input syntax for integer: \"{}\"", s))),
        Some(other) => Err(rejected(format!("{} is not an integer", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn first_missing_follows_field_order() {
        let body = object(json!({"age": 20, "course": "CS"}));
        assert_eq!(RequestValidator::first_missing(&body), Some("name"));

        let body = object(json!({"name": "Ann", "age": 20}));
        assert_eq!(RequestValidator::first_missing(&body), Some("email"));

        let body = object(json!({"name": "", "email": "", "age": null, "course": ""}));
        assert_eq!(RequestValidator::first_missing(&body), None);
    }

    #[test]
    fn create_input_coerces_loose_values() {
        let body = object(json!({"name": "Ann", "email": "ann@x.com", "age": "21", "course": 101}));
        let input = RequestValidator::create_input(&body).unwrap();
        assert_eq!(input.name.as_deref(), Some("Ann"));
        assert_eq!(input.age, Some(21));
        assert_eq!(input.course.as_deref(), Some("101"));

        let body = object(json!({"name": "Ann", "email": "ann@x.com", "age": 20.6, "course": "CS"}));
        assert_eq!(RequestValidator::create_input(&body).unwrap().age, Some(21));
    }

    #[test]
    fn create_input_keeps_null_for_the_store_to_reject() {
        let body = object(json!({"name": null, "email": "ann@x.com", "age": 20, "course": "CS"}));
        let input = RequestValidator::create_input(&body).unwrap();
        assert_eq!(input.name, None);
    }

    #[test]
    fn unbindable_values_are_rejected() {
        let body = object(json!({"name": "Ann", "email": "ann@x.com", "age": "twenty", "course": "CS"}));
        let err = RequestValidator::create_input(&body).unwrap_err();
        assert!(matches!(err, StoreError::Rejected { field: "age", .. }));

        let body = object(json!({"name": ["Ann"], "email": "ann@x.com", "age": 20, "course": "CS"}));
        let err = RequestValidator::create_input(&body).unwrap_err();
        assert!(matches!(err, StoreError::Rejected { field: "name", .. }));

        let body = object(json!({"name": "Ann", "email": "ann@x.com", "age": 5_000_000_000i64, "course": "CS"}));
        assert!(RequestValidator::create_input(&body).is_err());
    }

    #[test]
    fn replace_input_overwrites_omitted_fields() {
        let body = object(json!({"name": "Ann B"}));
        let input = RequestValidator::replace_input(&body).unwrap();
        assert_eq!(
            input,
            StudentInput {
                name: Some("Ann B".into()),
                email: Some(String::new()),
                age: Some(0),
                course: Some(String::new()),
            }
        );

        let body = object(json!({"email": null}));
        assert_eq!(RequestValidator::replace_input(&body).unwrap().email, None);
    }
}
