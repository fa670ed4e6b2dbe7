//! Declarative component model
//!
//! A [`ComponentModel`] describes one component as named sections:
//! template markup, reactive state (`data`), computed and watched
//! properties, methods, props, lifecycle hooks, and styling. Each
//! mapping-shaped section is a [`SectionValue`] (a literal value, a
//! zero-argument producer, or a lazy pair producer) and normalization
//! resolves all three forms into one insertion-ordered mapping.

use crate::error::{GenerateError, Result};
use crate::value::JsValue;
use indexmap::IndexMap;

/// A declarative section in one of its three accepted forms
pub enum SectionValue {
	/// A literal value; mapping sections expect an object (or null for
	/// "nothing declared")
	Value(JsValue),
	/// A zero-argument producer of a value
	Thunk(Box<dyn Fn() -> JsValue + Send + Sync>),
	/// A lazy producer of key/value pairs
	Pairs(Box<dyn Fn() -> Vec<(String, JsValue)> + Send + Sync>),
}

impl SectionValue {
	/// Creates a literal section value
	pub fn value(value: impl Into<JsValue>) -> Self {
		Self::Value(value.into())
	}

	/// Creates a section with nothing declared
	pub fn empty() -> Self {
		Self::Value(JsValue::Null)
	}

	/// Creates a thunk section
	pub fn thunk(f: impl Fn() -> JsValue + Send + Sync + 'static) -> Self {
		Self::Thunk(Box::new(f))
	}

	/// Creates a lazy pair-producer section
	pub fn pairs(f: impl Fn() -> Vec<(String, JsValue)> + Send + Sync + 'static) -> Self {
		Self::Pairs(Box::new(f))
	}

	/// Resolves the section into an insertion-ordered mapping
	///
	/// `Pairs` collects its producer, `Thunk` evaluates and falls through
	/// to the literal rules, an object literal unwraps into its entries,
	/// and `null` resolves to an empty mapping. Any other literal fails
	/// with [`GenerateError::UnserializableValue`].
	pub fn normalize(&self) -> Result<IndexMap<String, JsValue>> {
		match self {
			Self::Pairs(f) => Ok(f().into_iter().collect()),
			Self::Thunk(f) => normalize_literal(f()),
			Self::Value(value) => normalize_literal(value.clone()),
		}
	}
}

fn normalize_literal(value: JsValue) -> Result<IndexMap<String, JsValue>> {
	match value {
		JsValue::Object(entries) => Ok(entries.into_iter().collect()),
		JsValue::Null => Ok(IndexMap::new()),
		other => Err(GenerateError::UnserializableValue(format!(
			"section literal must be an object, got {other:?}"
		))),
	}
}

impl std::fmt::Debug for SectionValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
			Self::Thunk(_) => f.write_str("Thunk(..)"),
			Self::Pairs(_) => f.write_str("Pairs(..)"),
		}
	}
}

/// A declaration-ordered script section beyond the fixed ones
#[derive(Debug)]
pub enum ScriptSection {
	/// Renders as `key: { … }` from a normalized mapping
	Map(SectionValue),
	/// Renders as a single entry, typically a lifecycle hook
	Entry(JsValue),
}

/// Declarative surface of one generated component
///
/// Built with [`ComponentModel::builder`]; rendered by
/// [`crate::render::Renderer`].
#[derive(Debug)]
pub struct ComponentModel {
	name: String,
	template: String,
	style: Option<String>,
	imports: Vec<String>,
	props: Vec<String>,
	data: SectionValue,
	sections: Vec<(String, ScriptSection)>,
	methods: Option<SectionValue>,
	computed: Option<SectionValue>,
}

impl ComponentModel {
	/// Creates a builder for a component with the given name
	pub fn builder(name: impl Into<String>) -> ComponentModelBuilder {
		ComponentModelBuilder {
			name: name.into(),
			template: String::new(),
			style: None,
			imports: Vec::new(),
			props: Vec::new(),
			data: SectionValue::empty(),
			sections: Vec::new(),
			methods: None,
			computed: None,
		}
	}

	/// Component name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Template markup
	pub fn template(&self) -> &str {
		&self.template
	}

	/// Style block, when declared
	pub fn style(&self) -> Option<&str> {
		self.style.as_deref()
	}

	/// Import lines preceding the component object
	pub fn imports(&self) -> &[String] {
		&self.imports
	}

	/// Prop names
	pub fn props(&self) -> &[String] {
		&self.props
	}

	/// Reactive state section; always rendered, even when empty
	pub fn data(&self) -> &SectionValue {
		&self.data
	}

	/// Extra sections in declaration order
	pub fn sections(&self) -> &[(String, ScriptSection)] {
		&self.sections
	}

	/// Methods section, when declared
	pub fn methods(&self) -> Option<&SectionValue> {
		self.methods.as_ref()
	}

	/// Computed section, when declared
	pub fn computed(&self) -> Option<&SectionValue> {
		self.computed.as_ref()
	}
}

/// Builder for [`ComponentModel`]
pub struct ComponentModelBuilder {
	name: String,
	template: String,
	style: Option<String>,
	imports: Vec<String>,
	props: Vec<String>,
	data: SectionValue,
	sections: Vec<(String, ScriptSection)>,
	methods: Option<SectionValue>,
	computed: Option<SectionValue>,
}

impl ComponentModelBuilder {
	/// Sets the template markup
	pub fn template(mut self, template: impl Into<String>) -> Self {
		self.template = template.into();
		self
	}

	/// Sets the style block
	pub fn style(mut self, style: impl Into<String>) -> Self {
		self.style = Some(style.into());
		self
	}

	/// Appends an import line
	pub fn import(mut self, line: impl Into<String>) -> Self {
		self.imports.push(line.into());
		self
	}

	/// Appends prop names
	pub fn props<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.props.extend(names.into_iter().map(Into::into));
		self
	}

	/// Sets the reactive state section
	pub fn data(mut self, data: SectionValue) -> Self {
		self.data = data;
		self
	}

	/// Appends a mapping section under the given key, in declaration order
	pub fn section(mut self, name: impl Into<String>, value: SectionValue) -> Self {
		self.sections
			.push((name.into(), ScriptSection::Map(value)));
		self
	}

	/// Appends a lifecycle hook or other single-entry section
	///
	/// Raw text values become zero-argument block callables at render
	/// time.
	pub fn hook(mut self, name: impl Into<String>, value: impl Into<JsValue>) -> Self {
		self.sections
			.push((name.into(), ScriptSection::Entry(value.into())));
		self
	}

	/// Sets the methods section
	pub fn methods(mut self, methods: SectionValue) -> Self {
		self.methods = Some(methods);
		self
	}

	/// Sets the computed section
	pub fn computed(mut self, computed: SectionValue) -> Self {
		self.computed = Some(computed);
		self
	}

	/// Builds the component model
	pub fn build(self) -> ComponentModel {
		ComponentModel {
			name: self.name,
			template: self.template,
			style: self.style,
			imports: self.imports,
			props: self.props,
			data: self.data,
			sections: self.sections,
			methods: self.methods,
			computed: self.computed,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_normalize_literal_object() {
		let section = SectionValue::value(JsValue::Object(vec![
			("objects".to_string(), JsValue::Array(vec![])),
			("count".to_string(), JsValue::Int(0)),
		]));

		let map = section.normalize().unwrap();

		assert_eq!(
			map.keys().collect::<Vec<_>>(),
			vec!["objects", "count"]
		);
	}

	#[rstest]
	fn test_normalize_empty_forms() {
		assert!(SectionValue::empty().normalize().unwrap().is_empty());
		assert!(
			SectionValue::value(JsValue::empty_object())
				.normalize()
				.unwrap()
				.is_empty()
		);
	}

	#[rstest]
	fn test_normalize_thunk() {
		let section = SectionValue::thunk(|| {
			JsValue::Object(vec![("page".to_string(), JsValue::Int(1))])
		});

		let map = section.normalize().unwrap();

		assert_eq!(map.get("page"), Some(&JsValue::Int(1)));
	}

	#[rstest]
	fn test_normalize_pairs_preserves_producer_order() {
		let section = SectionValue::pairs(|| {
			vec![
				("zeta".to_string(), JsValue::Int(1)),
				("alpha".to_string(), JsValue::Int(2)),
			]
		});

		let map = section.normalize().unwrap();

		assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
	}

	#[rstest]
	fn test_normalize_rejects_non_object_literal() {
		let section = SectionValue::value(JsValue::Int(5));

		let result = section.normalize();

		assert!(matches!(
			result,
			Err(GenerateError::UnserializableValue(_))
		));
	}

	#[rstest]
	fn test_builder_collects_sections_in_order() {
		let model = ComponentModel::builder("BookList")
			.props(["filters"])
			.hook("mounted", JsValue::str("this.fetchList();"))
			.section("watch", SectionValue::empty())
			.build();

		assert_eq!(model.name(), "BookList");
		assert_eq!(model.props(), &["filters".to_string()]);
		let names: Vec<_> = model.sections().iter().map(|(n, _)| n.as_str()).collect();
		assert_eq!(names, vec!["mounted", "watch"]);
	}
}
