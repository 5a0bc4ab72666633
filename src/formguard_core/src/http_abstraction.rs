//! Zero-cost HTTP abstraction traits for the login firewall.
//!
//! Web frameworks implement [`LoginRequest`] and [`AuthResponseBuilder`] on
//! newtype wrappers of their own types, so the classification logic stays
//! generic over the framework.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  formguard_core: HTTP traits             │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  formguard_axum: AxumLoginRequest        │
//! │  impl LoginRequest for AxumLoginRequest  │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  Login classification uses LoginRequest  │
//! │  trait methods (generic over framework)  │
//! └──────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::ports::session::Session;

// ============================================================================
// Submitted form data
// ============================================================================

/// A single submitted form field.
///
/// Bracketed field names (`name[]`, `name[key]`) submit arrays, which is how
/// a client can send a non-string value for a field that expects one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl FormValue {
    /// The value as a string, or `None` for array submissions.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(value) => Some(value),
            FormValue::List(_) | FormValue::Map(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FormValue::Text(_) => "string",
            FormValue::List(_) | FormValue::Map(_) => "array",
        }
    }

    /// Type name for error messages, `"NULL"` when the field is missing.
    pub fn describe(value: Option<&FormValue>) -> &'static str {
        value.map_or("NULL", FormValue::type_name)
    }
}

/// Decoded body of an `application/x-www-form-urlencoded` submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: HashMap<String, FormValue>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the field mapping from decoded name/value pairs.
    ///
    /// Plain names keep the last value, `name[]` appends to a list and
    /// `name[key]` fills a map.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in pairs {
            form.append(name.as_ref(), value.into());
        }
        form
    }

    pub fn append(&mut self, name: &str, value: String) {
        match split_bracketed(name) {
            Some((base, "")) => match self.fields.get_mut(base) {
                Some(FormValue::List(values)) => values.push(value),
                _ => {
                    self.fields.insert(base.to_string(), FormValue::List(vec![value]));
                }
            },
            Some((base, key)) => match self.fields.get_mut(base) {
                Some(FormValue::Map(entries)) => {
                    entries.insert(key.to_string(), value);
                }
                _ => {
                    let entries = BTreeMap::from([(key.to_string(), value)]);
                    self.fields.insert(base.to_string(), FormValue::Map(entries));
                }
            },
            None => {
                self.fields.insert(name.to_string(), FormValue::Text(value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FormValue::as_text)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `"name[key]"` → `("name", "key")`, `"name[]"` → `("name", "")`.
fn split_bracketed(name: &str) -> Option<(&str, &str)> {
    let open = name.find('[')?;
    if open == 0 || !name.ends_with(']') {
        return None;
    }
    Some((&name[..open], &name[open + 1..name.len() - 1]))
}

// ============================================================================
// Request abstraction
// ============================================================================

/// Trait for HTTP requests the login firewall inspects.
///
/// # Example
///
/// ```ignore
/// // In formguard-axum crate
/// pub struct AxumLoginRequest { method: Method, path: String, form: FormData, session: ... }
///
/// impl LoginRequest for AxumLoginRequest {
///     type Session = MemorySession;
///
///     fn method(&self) -> &str {
///         self.method.as_str()
///     }
///
///     fn form_value(&self, name: &str) -> Option<&FormValue> {
///         self.form.get(name)
///     }
///     // ...
/// }
/// ```
pub trait LoginRequest {
    /// Session type attached to the request.
    type Session: Session + ?Sized;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;

    /// Get a submitted form field by its exact name.
    ///
    /// Returns `None` if the field was not submitted or the body is not a form.
    fn form_value(&self, name: &str) -> Option<&FormValue>;

    /// The session bound to the requesting client, if one was started.
    fn session(&self) -> Option<&Self::Session>;

    /// Case-insensitive method comparison.
    fn is_method(&self, method: &str) -> bool {
        self.method().eq_ignore_ascii_case(method)
    }
}

// ============================================================================
// Response abstraction
// ============================================================================

/// Trait for building HTTP responses for the login firewall.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(303)
///     .header("location", "/members")
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Add a Set-Cookie header
    fn cookie(self, cookie_value: &str) -> Self {
        self.header("set-cookie", cookie_value)
    }

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: serde_json::Value) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for creating common login responses.
///
/// Automatically implemented for all types that implement `AuthResponseBuilder`.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// Create a 303 See Other redirect, the answer to a submitted form
    fn see_other(self, location: &str) -> Self::Response {
        self.status(303).header("location", location).build()
    }

    /// Create a 401 Unauthorized response
    fn unauthorized(self, message: &str) -> Self::Response {
        self.status(401)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 400 Bad Request response
    fn bad_request(self, message: &str) -> Self::Response {
        self.status(400)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }

    /// Create a 500 Internal Server Error response
    fn internal_error(self, message: &str) -> Self::Response {
        self.status(500)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }
}

// Blanket implementation for all AuthResponseBuilder types
impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
