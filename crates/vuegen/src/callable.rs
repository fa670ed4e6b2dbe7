//! Function-literal rendering for generated component code

/// Rendering style for a function literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableStyle {
	/// Block-bodied: `(params) { body }`, usable as an object-method
	/// shorthand or wrapped as `function(params) { body }`
	Block,
	/// Arrow-style: `(params) => body`, braced when the body is not a
	/// single expression
	Arrow,
}

/// Ordered parameter list for a [`Callable`]
///
/// Accepts either a pre-joined literal string or a sequence of
/// identifiers.
///
/// # Examples
///
/// ```
/// use vuegen::callable::Params;
///
/// let from_str: Params = "newValue, oldValue".into();
/// let from_vec: Params = vec!["a".to_string(), "b".to_string()].into();
/// assert_eq!(from_str.as_str(), "newValue, oldValue");
/// assert_eq!(from_vec.as_str(), "a, b");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params(String);

impl Params {
	/// Returns the joined parameter list
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Params {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

impl From<String> for Params {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<Vec<String>> for Params {
	fn from(value: Vec<String>) -> Self {
		Self(value.join(", "))
	}
}

impl<const N: usize> From<[&str; N]> for Params {
	fn from(value: [&str; N]) -> Self {
		Self(value.join(", "))
	}
}

/// A function-like declaration: parameter list plus body text
///
/// Renders as a named object method, or standalone as an anonymous
/// function, in [`CallableStyle::Block`] or [`CallableStyle::Arrow`]
/// style.
///
/// # Examples
///
/// ```
/// use vuegen::callable::Callable;
///
/// let submit = Callable::block("", "this.$v.form.$touch();");
/// assert_eq!(submit.method("submit"), "submit() {\nthis.$v.form.$touch();\n}");
///
/// let double = Callable::arrow("n", "n * 2");
/// assert_eq!(double.render(), "(n) => n * 2");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Callable {
	style: CallableStyle,
	params: Params,
	body: String,
}

impl Callable {
	/// Creates a block-bodied callable
	pub fn block(params: impl Into<Params>, body: impl Into<String>) -> Self {
		Self {
			style: CallableStyle::Block,
			params: params.into(),
			body: body.into(),
		}
	}

	/// Creates an arrow-style callable
	pub fn arrow(params: impl Into<Params>, body: impl Into<String>) -> Self {
		Self {
			style: CallableStyle::Arrow,
			params: params.into(),
			body: body.into(),
		}
	}

	/// Returns the rendering style
	pub fn style(&self) -> CallableStyle {
		self.style
	}

	/// Renders as a named object-member entry
	///
	/// Block callables render as the method shorthand
	/// `name(params) { body }`; arrow callables as `name: (params) => …`.
	pub fn method(&self, name: &str) -> String {
		match self.style {
			CallableStyle::Block => {
				format!("{}({}) {{\n{}\n}}", name, self.params.as_str(), self.body.trim())
			}
			CallableStyle::Arrow => format!("{}: {}", name, self.render()),
		}
	}

	/// Renders as an anonymous function literal
	pub fn render(&self) -> String {
		match self.style {
			CallableStyle::Block => {
				format!("function({}) {{\n{}\n}}", self.params.as_str(), self.body.trim())
			}
			CallableStyle::Arrow => {
				let body = self.body.trim();
				if arrow_body_needs_braces(body) {
					format!("({}) => {{\n{}\n}}", self.params.as_str(), body)
				} else {
					format!("({}) => {}", self.params.as_str(), body)
				}
			}
		}
	}
}

// Textual check, not a parser: a body containing a `return` word, a
// statement separator, or multiple lines cannot be emitted braceless.
// Over-braces nested closures with unrelated `return`s, which is still
// valid output.
fn arrow_body_needs_braces(body: &str) -> bool {
	if body.contains('\n') || body.contains(';') {
		return true;
	}
	body.split(|c: char| !c.is_alphanumeric() && c != '_')
		.any(|word| word == "return")
}
