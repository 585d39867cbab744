//! Item records and request-body validation.
//!
//! Request bodies are parsed as loose JSON first and then checked field by
//! field, so a single 422 response can list every violation at once.

use serde::Serialize;
use serde_json::{Map, Value};

/// A priced catalog entry as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub is_available: bool,
}

impl Item {
    pub(crate) fn from_input(id: u64, input: ItemInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            is_available: input.is_available,
        }
    }
}

/// The mutable fields of an [`Item`], already validated.
///
/// The only ways to obtain one are [`ItemInput::new`] and
/// [`ItemInput::from_json`], so holding an `ItemInput` means the name is
/// non-empty and the price is a finite, non-negative number.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    name: String,
    description: Option<String>,
    price: f64,
    is_available: bool,
}

impl ItemInput {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        price: f64,
        is_available: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let mut errors = ValidationError::default();
        check_name(&name, &mut errors);
        check_price(price, &mut errors);
        errors.into_result(Self { name, description, price, is_available })
    }

    /// Parses and validates a JSON request body.
    ///
    /// `description` defaults to `None` and `is_available` to `true`.
    /// Unknown fields are ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            ValidationError::single(FieldError::body(
                vec![],
                format!("JSON decode error: {e}"),
                "json_invalid",
            ))
        })?;

        let Value::Object(fields) = value else {
            return Err(ValidationError::single(FieldError::body(
                vec![],
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            )));
        };

        Self::from_fields(&fields)
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        let name = match fields.get("name") {
            None => {
                errors.push(FieldError::missing("name"));
                String::new()
            }
            Some(Value::String(s)) => {
                check_name(s, &mut errors);
                s.clone()
            }
            Some(_) => {
                errors.push(FieldError::body(
                    vec!["name"],
                    "Input should be a valid string",
                    "string_type",
                ));
                String::new()
            }
        };

        let description = match fields.get("description") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::body(
                    vec!["description"],
                    "Input should be a valid string",
                    "string_type",
                ));
                None
            }
        };

        let price = match fields.get("price") {
            None => {
                errors.push(FieldError::missing("price"));
                0.0
            }
            Some(Value::Number(n)) => match n.as_f64() {
                Some(p) => {
                    check_price(p, &mut errors);
                    p
                }
                None => {
                    errors.push(not_a_number());
                    0.0
                }
            },
            Some(_) => {
                errors.push(not_a_number());
                0.0
            }
        };

        let is_available = match fields.get("is_available") {
            None => true,
            Some(Value::Bool(b)) => *b,
            Some(_) => {
                errors.push(FieldError::body(
                    vec!["is_available"],
                    "Input should be a valid boolean",
                    "bool_type",
                ));
                true
            }
        };

        errors.into_result(Self { name, description, price, is_available })
    }
}

fn check_name(name: &str, errors: &mut ValidationError) {
    if name.is_empty() {
        errors.push(FieldError::body(
            vec!["name"],
            "String should have at least 1 character",
            "string_too_short",
        ));
    }
}

fn check_price(price: f64, errors: &mut ValidationError) {
    if !price.is_finite() {
        errors.push(not_a_number());
    } else if price < 0.0 {
        errors.push(FieldError::body(
            vec!["price"],
            "Input should be greater than or equal to 0",
            "greater_than_equal",
        ));
    }
}

fn not_a_number() -> FieldError {
    FieldError::body(vec!["price"], "Input should be a valid number", "float_type")
}

// ── Validation errors ────────────────────────────────────────────────────────

/// One violated constraint, addressed by its location in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(loc: Vec<String>, msg: impl Into<String>, kind: &str) -> Self {
        Self { loc, msg: msg.into(), kind: kind.to_owned() }
    }

    fn body(path: Vec<&str>, msg: impl Into<String>, kind: &str) -> Self {
        let loc = std::iter::once("body")
            .chain(path)
            .map(str::to_owned)
            .collect();
        Self::new(loc, msg, kind)
    }

    fn missing(field: &str) -> Self {
        Self::body(vec![field], "Field required", "missing")
    }

    /// A path parameter that failed to parse as an integer.
    pub fn path_int(param: &str) -> Self {
        Self::new(
            vec!["path".to_owned(), param.to_owned()],
            "Input should be a valid integer, unable to parse string as an integer",
            "int_parsing",
        )
    }
}

/// Every constraint a request violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub detail: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(error: FieldError) -> Self {
        Self { detail: vec![error] }
    }

    fn push(&mut self, error: FieldError) {
        self.detail.push(error);
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.detail.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Dotted locations of the violated fields, e.g. `body.price`.
    pub fn fields(&self) -> Vec<String> {
        self.detail.iter().map(|e| e.loc.join(".")).collect()
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid request: {}", self.fields().join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<ItemInput, ValidationError> {
        ItemInput::from_json(body.as_bytes())
    }

    #[test]
    fn applies_defaults() {
        let input = parse(r#"{"name":"Minimal Item","price":19.99}"#).unwrap();
        assert_eq!(input.description, None);
        assert!(input.is_available);
    }

    #[test]
    fn keeps_explicit_values() {
        let input = parse(
            r#"{"name":"Lamp","description":"desk","price":5,"is_available":false,"extra":1}"#,
        )
        .unwrap();
        assert_eq!(input.name, "Lamp");
        assert_eq!(input.description.as_deref(), Some("desk"));
        assert_eq!(input.price, 5.0);
        assert!(!input.is_available);
    }

    #[test]
    fn reports_every_missing_field() {
        let err = parse("{}").unwrap_err();
        assert_eq!(err.fields(), ["body.name", "body.price"]);
        assert!(err.detail.iter().all(|e| e.kind == "missing"));
    }

    #[test]
    fn rejects_bad_types_and_ranges() {
        let err = parse(r#"{"name":"","price":-1,"is_available":"yes","description":3}"#)
            .unwrap_err();
        let kinds: Vec<_> = err.detail.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["string_too_short", "string_type", "greater_than_equal", "bool_type"]
        );
    }

    #[test]
    fn rejects_non_numeric_price() {
        let err = parse(r#"{"name":"x","price":"cheap"}"#).unwrap_err();
        assert_eq!(err.detail, [not_a_number()]);
    }

    #[test]
    fn rejects_non_objects_and_garbage() {
        assert_eq!(parse("[1]").unwrap_err().detail[0].kind, "model_attributes_type");
        assert_eq!(parse("{oops").unwrap_err().detail[0].kind, "json_invalid");
        assert_eq!(parse("").unwrap_err().detail[0].loc, ["body"]);
    }

    #[test]
    fn new_validates_like_json() {
        assert!(ItemInput::new("ok", None, 0.0, true).is_ok());
        let err = ItemInput::new("", None, f64::NAN, true).unwrap_err();
        assert_eq!(err.fields(), ["body.name", "body.price"]);
    }

    #[test]
    fn serializes_type_field_name() {
        let json = serde_json::to_value(FieldError::path_int("item_id")).unwrap();
        assert_eq!(json["loc"], serde_json::json!(["path", "item_id"]));
        assert_eq!(json["type"], "int_parsing");
    }
}
