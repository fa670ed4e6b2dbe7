//! Field descriptors and component specifications
//!
//! A [`FieldDescriptor`] is the framework-agnostic description of one
//! UI-bindable field: its class ancestry (used for style and validator
//! dispatch), constraints, choice options, and error message templates.
//! A [`ComponentSpec`] bundles the descriptor sequence with the endpoint
//! and pagination information one generation run needs.

use serde::{Deserialize, Serialize};

/// Field class tags, from most specific control types down to the
/// universal [`FieldClass::Field`] fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldClass {
	/// Universal fallback
	Field,
	/// Free-form text
	Char,
	/// Email address
	Email,
	/// URL
	Url,
	/// Integer number
	Integer,
	/// Floating-point number
	Float,
	/// Boolean flag
	Boolean,
	/// Combined date and time
	DateTime,
	/// Calendar date
	Date,
	/// Time of day
	Time,
	/// Uploaded file
	File,
	/// Server-side file path
	FilePath,
	/// Single choice from a fixed set
	Choice,
	/// Multiple choices from a fixed set
	MultipleChoice,
	/// Single related object
	Related,
	/// Multiple related objects
	ManyRelated,
	/// Nested object
	Nested,
	/// List of nested objects
	NestedList,
	/// Free-form list
	List,
	/// Free-form mapping
	Dict,
	/// Arbitrary JSON document
	Json,
}

impl FieldClass {
	/// Returns the declared capability chain for this class, most
	/// specific first, always ending in [`FieldClass::Field`]
	///
	/// # Examples
	///
	/// ```
	/// use vuegen::field::FieldClass;
	///
	/// assert_eq!(
	///     FieldClass::Email.ancestry(),
	///     &[FieldClass::Email, FieldClass::Char, FieldClass::Field]
	/// );
	/// assert_eq!(FieldClass::Field.ancestry(), &[FieldClass::Field]);
	/// ```
	pub fn ancestry(&self) -> &'static [FieldClass] {
		use FieldClass::*;
		match self {
			Field => &[Field],
			Char => &[Char, Field],
			Email => &[Email, Char, Field],
			Url => &[Url, Char, Field],
			Integer => &[Integer, Field],
			Float => &[Float, Field],
			Boolean => &[Boolean, Field],
			DateTime => &[DateTime, Field],
			Date => &[Date, Field],
			Time => &[Time, Field],
			File => &[File, Field],
			FilePath => &[FilePath, Choice, Field],
			Choice => &[Choice, Field],
			MultipleChoice => &[MultipleChoice, Choice, Field],
			Related => &[Related, Field],
			ManyRelated => &[ManyRelated, Field],
			Nested => &[Nested, Field],
			NestedList => &[NestedList, Field],
			List => &[List, Field],
			Dict => &[Dict, Field],
			Json => &[Json, Field],
		}
	}
}

/// One selectable option of a choice-like field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
	/// Raw value submitted with the form
	pub value: String,
	/// Text shown to the user
	pub display_name: String,
}

/// Bound constraints attached to a field
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstraintSet {
	/// Minimum string length
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_length: Option<u64>,
	/// Maximum string length
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_length: Option<u64>,
	/// Minimum numeric value
	#[serde(skip_serializing_if = "Option::is_none")]
	pub min_value: Option<f64>,
	/// Maximum numeric value
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_value: Option<f64>,
}

impl ConstraintSet {
	/// Returns `true` when no constraint is set
	pub fn is_empty(&self) -> bool {
		self.min_length.is_none()
			&& self.max_length.is_none()
			&& self.min_value.is_none()
			&& self.max_value.is_none()
	}
}

/// Immutable description of one UI-bindable field
///
/// Constructed once per generation run via [`FieldDescriptor::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
	name: String,
	label: String,
	required: bool,
	read_only: bool,
	ancestry: Vec<FieldClass>,
	constraints: ConstraintSet,
	choices: Option<Vec<ChoiceOption>>,
	error_messages: Vec<(String, String)>,
}

impl FieldDescriptor {
	/// Creates a builder for a field of the given class
	///
	/// The label defaults to a title-cased form of the name.
	///
	/// # Examples
	///
	/// ```
	/// use vuegen::field::{FieldClass, FieldDescriptor};
	///
	/// let field = FieldDescriptor::builder("publication_date", FieldClass::Date)
	///     .required(true)
	///     .build();
	/// assert_eq!(field.label(), "Publication date");
	/// assert_eq!(field.class(), FieldClass::Date);
	/// ```
	pub fn builder(name: impl Into<String>, class: FieldClass) -> FieldDescriptorBuilder {
		FieldDescriptorBuilder::new(name, class)
	}

	/// Field identifier, unique within a component
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Display text
	pub fn label(&self) -> &str {
		&self.label
	}

	/// Whether a value must be supplied
	pub fn required(&self) -> bool {
		self.required
	}

	/// Whether the field is bound but not user-editable
	pub fn read_only(&self) -> bool {
		self.read_only
	}

	/// Most specific class in the ancestry chain
	pub fn class(&self) -> FieldClass {
		self.ancestry[0]
	}

	/// Full capability chain, most specific first
	pub fn ancestry(&self) -> &[FieldClass] {
		&self.ancestry
	}

	/// Bound constraints
	pub fn constraints(&self) -> &ConstraintSet {
		&self.constraints
	}

	/// Choice options, present only for choice-like fields
	pub fn choices(&self) -> Option<&[ChoiceOption]> {
		self.choices.as_deref()
	}

	/// Error message template for the given error kind
	pub fn message_for(&self, kind: &str) -> Option<&str> {
		self.error_messages
			.iter()
			.find(|(k, _)| k == kind)
			.map(|(_, message)| message.as_str())
	}
}

/// Builder for [`FieldDescriptor`]
pub struct FieldDescriptorBuilder {
	name: String,
	label: Option<String>,
	required: bool,
	read_only: bool,
	class: FieldClass,
	ancestry: Option<Vec<FieldClass>>,
	constraints: ConstraintSet,
	choices: Option<Vec<ChoiceOption>>,
	error_messages: Vec<(String, String)>,
}

impl FieldDescriptorBuilder {
	fn new(name: impl Into<String>, class: FieldClass) -> Self {
		Self {
			name: name.into(),
			label: None,
			required: false,
			read_only: false,
			class,
			ancestry: None,
			constraints: ConstraintSet::default(),
			choices: None,
			error_messages: Vec::new(),
		}
	}

	/// Sets the display label
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Sets whether the field is required
	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Sets whether the field is read-only
	pub fn read_only(mut self, read_only: bool) -> Self {
		self.read_only = read_only;
		self
	}

	/// Overrides the capability chain derived from the field class
	pub fn ancestry(mut self, ancestry: Vec<FieldClass>) -> Self {
		self.ancestry = Some(ancestry);
		self
	}

	/// Sets the minimum string length
	pub fn min_length(mut self, min_length: u64) -> Self {
		self.constraints.min_length = Some(min_length);
		self
	}

	/// Sets the maximum string length
	pub fn max_length(mut self, max_length: u64) -> Self {
		self.constraints.max_length = Some(max_length);
		self
	}

	/// Sets the minimum numeric value
	pub fn min_value(mut self, min_value: f64) -> Self {
		self.constraints.min_value = Some(min_value);
		self
	}

	/// Sets the maximum numeric value
	pub fn max_value(mut self, max_value: f64) -> Self {
		self.constraints.max_value = Some(max_value);
		self
	}

	/// Sets the selectable options
	pub fn choices(mut self, choices: Vec<ChoiceOption>) -> Self {
		self.choices = Some(choices);
		self
	}

	/// Adds an error message template for an error kind
	pub fn error_message(mut self, kind: impl Into<String>, message: impl Into<String>) -> Self {
		self.error_messages.push((kind.into(), message.into()));
		self
	}

	/// Builds the descriptor
	///
	/// The ancestry chain always ends in [`FieldClass::Field`]; an
	/// overridden chain missing the fallback gets it appended.
	pub fn build(self) -> FieldDescriptor {
		let mut ancestry = self
			.ancestry
			.unwrap_or_else(|| self.class.ancestry().to_vec());
		if ancestry.last() != Some(&FieldClass::Field) {
			ancestry.push(FieldClass::Field);
		}
		let label = self.label.unwrap_or_else(|| default_label(&self.name));
		FieldDescriptor {
			name: self.name,
			label,
			required: self.required,
			read_only: self.read_only,
			ancestry,
			constraints: self.constraints,
			choices: self.choices,
			error_messages: self.error_messages,
		}
	}
}

fn default_label(name: &str) -> String {
	let mut label = String::with_capacity(name.len());
	for (i, c) in name.chars().enumerate() {
		if i == 0 {
			label.extend(c.to_uppercase());
		} else if c == '_' {
			label.push(' ');
		} else {
			label.push(c);
		}
	}
	label
}

/// Pagination flavor of a generated list component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaginationStyle {
	/// No pagination controls
	#[default]
	None,
	/// 1-based page number plus fixed page size
	PageNumber,
	/// Limit plus offset
	LimitOffset,
}

/// The declarative target of one generation invocation
///
/// Owns its field sequence; endpoints are opaque strings supplied by the
/// routing collaborator and never parsed further.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
	model_name: String,
	fields: Vec<FieldDescriptor>,
	pk_name: String,
	list_endpoint: Option<String>,
	retrieve_endpoint: Option<String>,
	pagination: PaginationStyle,
}

impl ComponentSpec {
	/// Creates a spec from its parts
	pub fn new(
		model_name: impl Into<String>,
		fields: Vec<FieldDescriptor>,
		pk_name: impl Into<String>,
	) -> Self {
		Self {
			model_name: model_name.into(),
			fields,
			pk_name: pk_name.into(),
			list_endpoint: None,
			retrieve_endpoint: None,
			pagination: PaginationStyle::None,
		}
	}

	/// Sets the collection endpoint (create + list requests)
	pub fn with_list_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.list_endpoint = Some(endpoint.into());
		self
	}

	/// Sets the single-resource base path (retrieve + update requests)
	pub fn with_retrieve_endpoint(mut self, endpoint: impl Into<String>) -> Self {
		self.retrieve_endpoint = Some(endpoint.into());
		self
	}

	/// Sets the pagination style
	pub fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
		self.pagination = pagination;
		self
	}

	/// Model name as supplied by the provider
	pub fn model_name(&self) -> &str {
		&self.model_name
	}

	/// Model name title-cased for component identifiers
	pub fn class_name(&self) -> String {
		let mut chars = self.model_name.chars();
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}

	/// Field sequence, in declaration order
	pub fn fields(&self) -> &[FieldDescriptor] {
		&self.fields
	}

	/// Primary key field name
	pub fn pk_name(&self) -> &str {
		&self.pk_name
	}

	/// Collection endpoint, when the routing collaborator exposes one
	pub fn list_endpoint(&self) -> Option<&str> {
		self.list_endpoint.as_deref()
	}

	/// Single-resource base path, when exposed
	pub fn retrieve_endpoint(&self) -> Option<&str> {
		self.retrieve_endpoint.as_deref()
	}

	/// Pagination style
	pub fn pagination(&self) -> PaginationStyle {
		self.pagination
	}
}
