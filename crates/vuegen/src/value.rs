//! JavaScript literal serialization
//!
//! [`JsValue`] is the intermediate form every declarative section value is
//! normalized into before rendering. It distinguishes data (quoted and
//! escaped on output) from verbatim code fragments and function literals,
//! which bypass quoting entirely.

use crate::callable::Callable;
use crate::error::{GenerateError, Result};
use serde::Serialize;

/// An in-memory value renderable as JavaScript literal syntax
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
	/// `null`
	Null,
	/// `true` / `false`
	Bool(bool),
	/// Integer literal
	Int(i64),
	/// Floating-point literal
	Float(f64),
	/// Quoted, escaped string literal
	Str(String),
	/// `[…]` with recursively serialized elements
	Array(Vec<JsValue>),
	/// `{…}` with insertion-ordered keys
	Object(Vec<(String, JsValue)>),
	/// Raw target-syntax text, emitted unchanged
	Verbatim(String),
	/// Function literal, see [`Callable`]
	Callable(Callable),
}

impl JsValue {
	/// Creates a string value
	pub fn str(value: impl Into<String>) -> Self {
		Self::Str(value.into())
	}

	/// Creates a verbatim code fragment
	pub fn verbatim(value: impl Into<String>) -> Self {
		Self::Verbatim(value.into())
	}

	/// Creates an empty object
	pub fn empty_object() -> Self {
		Self::Object(Vec::new())
	}

	/// Converts any serde-serializable value
	///
	/// Fails with [`GenerateError::UnserializableValue`] when the value has
	/// no JavaScript literal representation (non-string map keys, erroring
	/// `Serialize` impls, numbers that fit neither `i64` nor finite `f64`).
	///
	/// # Examples
	///
	/// ```
	/// use vuegen::value::JsValue;
	///
	/// let value = JsValue::from_serialize(&vec![1, 2, 3]).unwrap();
	/// assert_eq!(value.render(), "[1, 2, 3]");
	/// ```
	pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
		let json = serde_json::to_value(value)
			.map_err(|e| GenerateError::UnserializableValue(e.to_string()))?;
		Self::try_from(json)
	}

	/// Renders the value as JavaScript literal text
	pub fn render(&self) -> String {
		let mut out = String::new();
		self.write(&mut out);
		out
	}

	fn write(&self, out: &mut String) {
		match self {
			Self::Null => out.push_str("null"),
			Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
			Self::Int(i) => out.push_str(&i.to_string()),
			Self::Float(f) => out.push_str(&render_float(*f)),
			Self::Str(s) => write_quoted(s, out),
			Self::Array(items) => {
				out.push('[');
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						out.push_str(", ");
					}
					item.write(out);
				}
				out.push(']');
			}
			Self::Object(entries) => {
				out.push('{');
				for (i, (key, value)) in entries.iter().enumerate() {
					if i > 0 {
						out.push_str(", ");
					}
					match value {
						// A block callable reads as `name(args) { body }`,
						// so `method` omits the `: ` separator for it.
						Self::Callable(c) => out.push_str(&c.method(key)),
						_ => {
							write_key(key, out);
							out.push_str(": ");
							value.write(out);
						}
					}
				}
				out.push('}');
			}
			Self::Verbatim(code) => out.push_str(code),
			Self::Callable(c) => out.push_str(&c.render()),
		}
	}
}

fn render_float(f: f64) -> String {
	if f.is_nan() {
		"NaN".to_string()
	} else if f.is_infinite() {
		if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
	} else {
		format!("{f:?}")
	}
}

// Identifier-safe keys are emitted bare, everything else quoted.
fn write_key(key: &str, out: &mut String) {
	let mut chars = key.chars();
	let bare = match chars.next() {
		Some(first) => {
			(first.is_ascii_alphabetic() || first == '_' || first == '$')
				&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
		}
		None => false,
	};
	if bare {
		out.push_str(key);
	} else {
		write_quoted(key, out);
	}
}

fn write_quoted(s: &str, out: &mut String) {
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			_ => out.push(c),
		}
	}
	out.push('"');
}

impl TryFrom<serde_json::Value> for JsValue {
	type Error = GenerateError;

	fn try_from(value: serde_json::Value) -> Result<Self> {
		Ok(match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(b) => Self::Bool(b),
			serde_json::Value::Number(n) => {
				if let Some(i) = n.as_i64() {
					Self::Int(i)
				} else if let Some(f) = n.as_f64() {
					if !f.is_finite() {
						return Err(GenerateError::UnserializableValue(format!(
							"number out of range: {n}"
						)));
					}
					Self::Float(f)
				} else {
					return Err(GenerateError::UnserializableValue(format!(
						"number out of range: {n}"
					)));
				}
			}
			serde_json::Value::String(s) => Self::Str(s),
			serde_json::Value::Array(items) => Self::Array(
				items
					.into_iter()
					.map(Self::try_from)
					.collect::<Result<Vec<_>>>()?,
			),
			serde_json::Value::Object(entries) => Self::Object(
				entries
					.into_iter()
					.map(|(k, v)| Ok((k, Self::try_from(v)?)))
					.collect::<Result<Vec<_>>>()?,
			),
		})
	}
}

impl From<bool> for JsValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for JsValue {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<u64> for JsValue {
	fn from(value: u64) -> Self {
		i64::try_from(value).map_or(Self::Float(value as f64), Self::Int)
	}
}

impl From<f64> for JsValue {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for JsValue {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for JsValue {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Callable> for JsValue {
	fn from(value: Callable) -> Self {
		Self::Callable(value)
	}
}

impl From<Vec<JsValue>> for JsValue {
	fn from(value: Vec<JsValue>) -> Self {
		Self::Array(value)
	}
}
