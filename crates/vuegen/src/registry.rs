//! Capability-based style and validator dispatch
//!
//! The registry maps field classes to rendering styles through a
//! priority-ordered lookup: a field's ancestry chain is walked from most
//! specific to most generic and the first class with a registered rule
//! wins. Dispatch is data, not code, so it can be extended and tested
//! without touching the generators.

use crate::error::{GenerateError, Result};
use crate::field::{FieldClass, FieldDescriptor};
use std::collections::HashMap;

/// Rendering style for one field class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRule {
	/// Element tag of the rendered control
	pub tag: &'static str,
	/// `type` attribute for `input` tags
	pub input_type: Option<&'static str>,
	/// Whether the control accepts multiple selections
	pub multiple: bool,
}

impl StyleRule {
	/// Creates a rule for a plain tag
	pub const fn tag(tag: &'static str) -> Self {
		Self {
			tag,
			input_type: None,
			multiple: false,
		}
	}

	/// Creates a rule for an `input` tag with the given subtype
	pub const fn input(input_type: &'static str) -> Self {
		Self {
			tag: "input",
			input_type: Some(input_type),
			multiple: false,
		}
	}

	/// Marks the rule as multi-select
	pub const fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	/// Whether fields with this rule are excluded from generated forms
	pub fn excluded(&self) -> bool {
		self.input_type == Some("file")
	}
}

/// A client-side validation rule derived from a field descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatorRule {
	/// Value must be present
	Required,
	/// Value must be numeric
	Numeric,
	/// Value must be an email address
	Email,
	/// Value must be a URL
	Url,
	/// Minimum string length
	MinLength(u64),
	/// Minimum numeric value
	MinValue(f64),
	/// Maximum string length
	MaxLength(u64),
	/// Maximum numeric value
	MaxValue(f64),
}

impl ValidatorRule {
	/// Rule key in the generated validations object
	pub fn key(&self) -> &'static str {
		match self {
			Self::Required => "required",
			Self::Numeric => "numeric",
			Self::Email => "email",
			Self::Url => "url",
			Self::MinLength(_) => "minLength",
			Self::MinValue(_) => "minValue",
			Self::MaxLength(_) => "maxLength",
			Self::MaxValue(_) => "maxValue",
		}
	}

	/// Name imported from the validator library
	pub fn import_name(&self) -> &'static str {
		self.key()
	}

	/// Rule expression in the generated validations object
	///
	/// # Examples
	///
	/// ```
	/// use vuegen::registry::ValidatorRule;
	///
	/// assert_eq!(ValidatorRule::Required.expr(), "required");
	/// assert_eq!(ValidatorRule::MaxLength(100).expr(), "maxLength(100)");
	/// ```
	pub fn expr(&self) -> String {
		match self {
			Self::Required | Self::Numeric | Self::Email | Self::Url => self.key().to_string(),
			Self::MinLength(n) => format!("minLength({n})"),
			Self::MaxLength(n) => format!("maxLength({n})"),
			Self::MinValue(v) => format!("minValue({v})"),
			Self::MaxValue(v) => format!("maxValue({v})"),
		}
	}

	/// Message used when the descriptor supplies no template for this rule
	pub fn default_message(&self) -> String {
		match self {
			Self::Required => "This field is required.".to_string(),
			Self::Numeric => "Must be a number.".to_string(),
			Self::Email => "Must be a valid email address.".to_string(),
			Self::Url => "Must be a valid URL.".to_string(),
			Self::MinLength(n) => format!("Must be at least {n} characters."),
			Self::MaxLength(n) => format!("Must be at most {n} characters."),
			Self::MinValue(v) => format!("Must be at least {v}."),
			Self::MaxValue(v) => format!("Must be at most {v}."),
		}
	}
}

/// Priority-ordered capability lookup for field rendering styles
pub struct StyleRegistry {
	rules: HashMap<FieldClass, StyleRule>,
}

impl StyleRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self {
			rules: HashMap::new(),
		}
	}

	/// Creates a registry seeded with the default control table
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		registry.insert(FieldClass::Field, StyleRule::input("text"));
		registry.insert(FieldClass::Email, StyleRule::input("email"));
		registry.insert(FieldClass::Url, StyleRule::input("url"));
		registry.insert(FieldClass::Integer, StyleRule::input("number"));
		registry.insert(FieldClass::Float, StyleRule::input("number"));
		registry.insert(FieldClass::DateTime, StyleRule::input("datetime-local"));
		registry.insert(FieldClass::Date, StyleRule::input("date"));
		registry.insert(FieldClass::Time, StyleRule::input("time"));
		registry.insert(FieldClass::File, StyleRule::input("file"));
		registry.insert(FieldClass::FilePath, StyleRule::input("file"));
		registry.insert(FieldClass::Boolean, StyleRule::input("checkbox"));
		registry.insert(FieldClass::Choice, StyleRule::tag("select"));
		registry.insert(FieldClass::MultipleChoice, StyleRule::tag("select").multiple());
		registry.insert(FieldClass::Related, StyleRule::tag("select"));
		registry.insert(FieldClass::ManyRelated, StyleRule::tag("select").multiple());
		registry.insert(FieldClass::Nested, StyleRule::tag("fieldset"));
		registry.insert(FieldClass::NestedList, StyleRule::tag("list-fieldset"));
		registry.insert(FieldClass::List, StyleRule::tag("list-field"));
		registry.insert(FieldClass::Dict, StyleRule::tag("dict-field"));
		registry.insert(FieldClass::Json, StyleRule::tag("textarea"));
		registry
	}

	/// Registers or replaces the rule for a field class
	pub fn insert(&mut self, class: FieldClass, rule: StyleRule) {
		self.rules.insert(class, rule);
	}

	/// Resolves the rendering style for a descriptor
	///
	/// Walks the ancestry chain front-to-back; the first registered class
	/// wins. Fails with [`GenerateError::UnknownCapability`] only when the
	/// chain exhausts without a hit, which means the fallback entry is
	/// missing from the table (a configuration defect, not a data error).
	pub fn resolve_style(&self, field: &FieldDescriptor) -> Result<&StyleRule> {
		field
			.ancestry()
			.iter()
			.find_map(|class| self.rules.get(class))
			.ok_or_else(|| {
				GenerateError::UnknownCapability(format!(
					"no style registered for any class in the chain of field '{}'",
					field.name()
				))
			})
	}

	/// Startup assertion that the universal fallback is registered
	pub fn self_check(&self) -> Result<()> {
		if self.rules.contains_key(&FieldClass::Field) {
			Ok(())
		} else {
			Err(GenerateError::UnknownCapability(
				"style table is missing the universal fallback entry".to_string(),
			))
		}
	}

	/// Derives the ordered validator set for a descriptor
	///
	/// Order is fixed: `required` (only when the field is required and not
	/// the primary key), a type-coercion rule when the resolved input
	/// subtype is numeric, url, or email, then one bound rule per present
	/// constraint. Rules without an applicable constraint are omitted.
	pub fn resolve_validators(
		&self,
		field: &FieldDescriptor,
		pk_name: &str,
	) -> Result<Vec<ValidatorRule>> {
		let style = self.resolve_style(field)?;
		let mut rules = Vec::new();

		if field.required() && field.name() != pk_name {
			rules.push(ValidatorRule::Required);
		}
		match style.input_type {
			Some("number") => rules.push(ValidatorRule::Numeric),
			Some("email") => rules.push(ValidatorRule::Email),
			Some("url") => rules.push(ValidatorRule::Url),
			_ => {}
		}
		let constraints = field.constraints();
		if let Some(n) = constraints.min_length {
			rules.push(ValidatorRule::MinLength(n));
		}
		if let Some(v) = constraints.min_value {
			rules.push(ValidatorRule::MinValue(v));
		}
		if let Some(n) = constraints.max_length {
			rules.push(ValidatorRule::MaxLength(n));
		}
		if let Some(v) = constraints.max_value {
			rules.push(ValidatorRule::MaxValue(v));
		}
		Ok(rules)
	}
}

impl Default for StyleRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_resolve_style_most_specific_wins() {
		let registry = StyleRegistry::with_defaults();
		let field = FieldDescriptor::builder("contact", FieldClass::Email).build();

		let rule = registry.resolve_style(&field).unwrap();

		assert_eq!(rule.tag, "input");
		assert_eq!(rule.input_type, Some("email"));
	}

	#[rstest]
	fn test_resolve_style_walks_chain_in_order() {
		// Only Char and Field are registered; a Url field must resolve to
		// the Char rule, not the Field fallback.
		let mut registry = StyleRegistry::new();
		registry.insert(FieldClass::Field, StyleRule::input("text"));
		registry.insert(FieldClass::Char, StyleRule::tag("textarea"));
		let field = FieldDescriptor::builder("website", FieldClass::Url).build();

		let rule = registry.resolve_style(&field).unwrap();

		assert_eq!(rule.tag, "textarea");
	}

	#[rstest]
	fn test_resolve_style_missing_fallback() {
		let registry = StyleRegistry::new();
		let field = FieldDescriptor::builder("title", FieldClass::Char).build();

		let result = registry.resolve_style(&field);

		assert!(matches!(result, Err(GenerateError::UnknownCapability(_))));
	}

	#[rstest]
	fn test_self_check() {
		assert!(StyleRegistry::with_defaults().self_check().is_ok());
		assert!(matches!(
			StyleRegistry::new().self_check(),
			Err(GenerateError::UnknownCapability(_))
		));
	}

	#[rstest]
	fn test_validators_fixed_order() {
		let registry = StyleRegistry::with_defaults();
		let field = FieldDescriptor::builder("pages", FieldClass::Integer)
			.required(true)
			.min_value(1.0)
			.max_value(5000.0)
			.build();

		let rules = registry.resolve_validators(&field, "id").unwrap();

		assert_eq!(
			rules,
			vec![
				ValidatorRule::Required,
				ValidatorRule::Numeric,
				ValidatorRule::MinValue(1.0),
				ValidatorRule::MaxValue(5000.0),
			]
		);
	}

	#[rstest]
	fn test_validators_length_before_value() {
		let registry = StyleRegistry::with_defaults();
		let field = FieldDescriptor::builder("isbn", FieldClass::Char)
			.min_length(10)
			.min_value(0.0)
			.max_length(100)
			.max_value(1.0)
			.build();

		let rules = registry.resolve_validators(&field, "id").unwrap();

		assert_eq!(
			rules,
			vec![
				ValidatorRule::MinLength(10),
				ValidatorRule::MinValue(0.0),
				ValidatorRule::MaxLength(100),
				ValidatorRule::MaxValue(1.0),
			]
		);
	}

	#[rstest]
	fn test_required_skipped_for_primary_key() {
		let registry = StyleRegistry::with_defaults();
		let field = FieldDescriptor::builder("id", FieldClass::Integer)
			.required(true)
			.build();

		let rules = registry.resolve_validators(&field, "id").unwrap();

		assert_eq!(rules, vec![ValidatorRule::Numeric]);
	}

	#[rstest]
	fn test_no_rules_for_unconstrained_optional_field() {
		let registry = StyleRegistry::with_defaults();
		let field = FieldDescriptor::builder("summary", FieldClass::Char).build();

		let rules = registry.resolve_validators(&field, "id").unwrap();

		assert!(rules.is_empty());
	}

	#[rstest]
	#[case(FieldClass::File)]
	#[case(FieldClass::FilePath)]
	fn test_file_rules_are_excluded(#[case] class: FieldClass) {
		let registry = StyleRegistry::with_defaults();
		let field = FieldDescriptor::builder("headshot", class).build();

		let rule = registry.resolve_style(&field).unwrap();

		assert!(rule.excluded());
	}

	#[rstest]
	fn test_validator_expr_and_message() {
		assert_eq!(ValidatorRule::MinLength(3).expr(), "minLength(3)");
		assert_eq!(ValidatorRule::MaxValue(100.0).expr(), "maxValue(100)");
		assert_eq!(
			ValidatorRule::MaxLength(100).default_message(),
			"Must be at most 100 characters."
		);
	}
}
