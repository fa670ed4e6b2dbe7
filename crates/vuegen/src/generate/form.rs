//! CRUD form component generation
//!
//! Renders one labelled control per writable field, a hidden input per
//! read-only field, client-side validation rules, and the submission
//! methods. Submission runs the client-side gate first; only when it
//! passes does exactly one of `create` or `update` issue a request, so
//! the client and server validation paths never both run for the same
//! attempt.

use crate::callable::Callable;
use crate::component::{ComponentModel, SectionValue};
use crate::error::Result;
use crate::field::{ComponentSpec, FieldDescriptor};
use crate::generate::COMPONENTS_DIR;
use crate::registry::{StyleRegistry, StyleRule, ValidatorRule};
use crate::value::JsValue;
use indexmap::IndexSet;

/// Builds the form component for a [`ComponentSpec`]
pub struct FormGenerator<'a> {
	spec: &'a ComponentSpec,
	registry: &'a StyleRegistry,
}

impl<'a> FormGenerator<'a> {
	/// Creates a generator over the given spec and style registry
	pub fn new(spec: &'a ComponentSpec, registry: &'a StyleRegistry) -> Self {
		Self { spec, registry }
	}

	/// Generated component name, `<Model>Form`
	pub fn component_name(&self) -> String {
		format!("{}Form", self.spec.class_name())
	}

	/// Default output path for the generated component
	pub fn filename(&self) -> String {
		format!("{}/{}.vue", COMPONENTS_DIR, self.component_name())
	}

	/// Builds the declarative component model
	pub fn component(&self) -> Result<ComponentModel> {
		let fields = self.included_fields()?;
		let writable: Vec<_> = fields
			.iter()
			.filter(|(field, _)| !field.read_only())
			.cloned()
			.collect();

		let mut builder = ComponentModel::builder(self.component_name())
			.template(self.template(&fields));

		if !writable.is_empty() {
			for import in self.imports(&writable)? {
				builder = builder.import(import);
			}
		}

		let data = self.data_pairs(&fields, &writable)?;
		builder = builder.data(SectionValue::pairs(move || data.clone()));

		if !writable.is_empty() {
			let validations = self.validations(&writable)?;
			builder = builder.section("validations", SectionValue::value(validations));
		}

		let methods = self.methods();
		builder = builder.methods(SectionValue::pairs(move || methods.clone()));

		Ok(builder.build())
	}

	// File-style fields are left out of the form entirely.
	fn included_fields(&self) -> Result<Vec<(&'a FieldDescriptor, &'a StyleRule)>> {
		let mut fields = Vec::new();
		for field in self.spec.fields() {
			let rule = self.registry.resolve_style(field)?;
			if rule.excluded() {
				continue;
			}
			fields.push((field, rule));
		}
		Ok(fields)
	}

	fn template(&self, fields: &[(&FieldDescriptor, &StyleRule)]) -> String {
		let mut lines = Vec::new();
		lines.push(format!("<div class=\"{}-form\">", self.spec.model_name()));
		lines.push("<div class=\"summary\" v-if=\"$v.form.$error\">Form has errors</div>".to_string());
		lines.push("<form @submit.prevent=\"submit\">".to_string());

		for (field, rule) in fields {
			let name = field.name();
			if field.read_only() {
				lines.push(format!(
					"<input type=\"hidden\" name=\"{name}\" v-model=\"form.{name}\"/>"
				));
				continue;
			}
			lines.push(format!(
				"<div class=\"field\" :class=\"{{ hasError: $v.form.{name}.$error }}\">"
			));
			lines.push(format!("<label for=\"{name}\">{}</label>", field.label()));
			lines.push(control_markup(field, rule));
			lines.push(format!(
				"<span class=\"error\" v-if=\"errors.{name}\">{{{{ errors.{name} }}}}</span>"
			));
			lines.push("</div>".to_string());
		}

		lines.push("<button type=\"submit\">Submit</button>".to_string());
		lines.push("</form>".to_string());
		lines.push("</div>".to_string());
		lines.join("\n")
	}

	fn imports(&self, writable: &[(&FieldDescriptor, &StyleRule)]) -> Result<Vec<String>> {
		let mut names: IndexSet<&'static str> = IndexSet::new();
		for (field, _) in writable {
			for rule in self.registry.resolve_validators(field, self.spec.pk_name())? {
				names.insert(rule.import_name());
			}
		}
		let mut imports = Vec::new();
		if !names.is_empty() {
			let list = names.into_iter().collect::<Vec<_>>().join(", ");
			imports.push(format!(
				"import {{ {list} }} from \"vuelidate/lib/validators\";"
			));
		}
		imports.push("import Vuelidate from \"vuelidate\";".to_string());
		imports.push("import Vue from \"vue\";".to_string());
		imports.push("Vue.use(Vuelidate);".to_string());
		Ok(imports)
	}

	fn data_pairs(
		&self,
		fields: &[(&FieldDescriptor, &StyleRule)],
		writable: &[(&FieldDescriptor, &StyleRule)],
	) -> Result<Vec<(String, JsValue)>> {
		let form = JsValue::Object(
			fields
				.iter()
				.map(|(field, _)| (field.name().to_string(), JsValue::str("")))
				.collect(),
		);

		let option_entries: Vec<(String, JsValue)> = fields
			.iter()
			.filter_map(|(field, _)| {
				field.choices().map(|choices| {
					let map = JsValue::Object(
						choices
							.iter()
							.map(|choice| {
								(choice.value.clone(), JsValue::str(choice.display_name.clone()))
							})
							.collect(),
					);
					(field.name().to_string(), map)
				})
			})
			.collect();

		let mut pairs = vec![("form".to_string(), form)];
		if !option_entries.is_empty() {
			pairs.push(("options".to_string(), JsValue::Object(option_entries)));
		}
		pairs.push(("errors".to_string(), JsValue::empty_object()));
		if !writable.is_empty() {
			pairs.push(("messages".to_string(), self.messages(writable)?));
		}
		Ok(pairs)
	}

	// Per-field validator-key message templates, with an `invalid` entry
	// the server-error path falls back to.
	fn messages(&self, writable: &[(&FieldDescriptor, &StyleRule)]) -> Result<JsValue> {
		let mut entries = Vec::new();
		for (field, _) in writable {
			let mut field_entries = Vec::new();
			for rule in self.registry.resolve_validators(field, self.spec.pk_name())? {
				let message = field
					.message_for(rule.key())
					.map(str::to_string)
					.unwrap_or_else(|| rule.default_message());
				field_entries.push((rule.key().to_string(), JsValue::Str(message)));
			}
			let invalid = field
				.message_for("invalid")
				.unwrap_or("Invalid value.")
				.to_string();
			field_entries.push(("invalid".to_string(), JsValue::Str(invalid)));
			entries.push((field.name().to_string(), JsValue::Object(field_entries)));
		}
		Ok(JsValue::Object(entries))
	}

	fn validations(&self, writable: &[(&FieldDescriptor, &StyleRule)]) -> Result<JsValue> {
		let mut entries = Vec::new();
		for (field, _) in writable {
			let rules: Vec<(String, JsValue)> = self
				.registry
				.resolve_validators(field, self.spec.pk_name())?
				.iter()
				.map(|rule| (rule.key().to_string(), JsValue::verbatim(rule.expr())))
				.collect();
			entries.push((field.name().to_string(), JsValue::Object(rules)));
		}
		Ok(JsValue::Object(vec![(
			"form".to_string(),
			JsValue::Object(entries),
		)]))
	}

	fn methods(&self) -> Vec<(String, JsValue)> {
		let pk = self.spec.pk_name().to_string();
		let mut methods = Vec::new();

		let mut submit = String::from(
			"this.errors = {};\nthis.$v.form.$touch();\nif (this.$v.form.$error) {\nthis.localErrors();\nreturn;\n}",
		);
		match (self.spec.list_endpoint(), self.spec.retrieve_endpoint()) {
			(Some(_), Some(_)) => {
				submit.push_str(&format!(
					"\nif (this.form.{pk}) {{\nthis.update();\n}} else {{\nthis.create();\n}}"
				));
			}
			(Some(_), None) => submit.push_str("\nthis.create();"),
			(None, Some(_)) => submit.push_str("\nthis.update();"),
			(None, None) => {}
		}
		methods.push(("submit".to_string(), Callable::block("", submit).into()));

		if let Some(retrieve) = self.spec.retrieve_endpoint() {
			let body = format!(
				"this.$http.get(`{retrieve}/${{id}}/`).then((r) => r.json()).then((r) => {{\nthis.form = r;\n}});"
			);
			methods.push(("fetchRecord".to_string(), Callable::block("id", body).into()));
		}

		if let Some(list) = self.spec.list_endpoint() {
			let body = format!(
				"this.errors = {{}};\nthis.$http.post(\"{list}\", {{...this.form}}).then((r) => r.json()).then((r) => {{\nthis.form = r;\n}}, (r) => {{\nthis.applyServerErrors(r);\n}});"
			);
			methods.push(("create".to_string(), Callable::block("", body).into()));
		}

		if let Some(retrieve) = self.spec.retrieve_endpoint() {
			let body = format!(
				"this.errors = {{}};\nthis.$http.put(`{retrieve}/${{this.form.{pk}}}/`, {{...this.form}}).then((r) => r.json()).then((r) => {{\nthis.form = r;\n}}, (r) => {{\nthis.applyServerErrors(r);\n}});"
			);
			methods.push(("update".to_string(), Callable::block("", body).into()));
		}

		let local_errors = "const errors = {};\n\
			Object.keys(this.messages).forEach((name) => {\n\
			const state = this.$v.form[name];\n\
			if (!state || !state.$error) {\n\
			return;\n\
			}\n\
			const failing = Object.keys(this.messages[name]).find((rule) => state[rule] === false);\n\
			errors[name] = this.messages[name][failing] || this.messages[name].invalid;\n\
			});\n\
			this.errors = errors;";
		methods.push((
			"localErrors".to_string(),
			Callable::block("", local_errors).into(),
		));

		let server_errors = "const errors = {};\n\
			Object.entries(response.body || {}).forEach(([name, kinds]) => {\n\
			const templates = this.messages[name] || {};\n\
			const kind = Array.isArray(kinds) ? kinds[0] : kinds;\n\
			errors[name] = templates[kind] || templates.invalid || String(kind);\n\
			});\n\
			this.errors = errors;\n\
			this.$v.form.$reset();";
		methods.push((
			"applyServerErrors".to_string(),
			Callable::block("response", server_errors).into(),
		));

		methods
	}
}

fn control_markup(field: &FieldDescriptor, rule: &StyleRule) -> String {
	let name = field.name();
	if rule.tag == "input" {
		let input_type = rule
			.input_type
			.map(|t| format!(" type=\"{t}\""))
			.unwrap_or_default();
		return format!("<input{input_type} name=\"{name}\" v-model=\"form.{name}\"/>");
	}

	let multiple = if rule.multiple { " multiple" } else { "" };
	let mut markup = format!(
		"<{tag}{multiple} name=\"{name}\" v-model=\"form.{name}\">",
		tag = rule.tag
	);
	if field.choices().is_some() {
		markup.push_str(&format!(
			"\n<option :value=\"k\" v-for=\"(v, k) in options.{name}\" :key=\"k\">{{{{ v }}}}</option>\n"
		));
	}
	markup.push_str(&format!("</{}>", rule.tag));
	markup
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{ChoiceOption, FieldClass, FieldDescriptor};
	use rstest::rstest;

	fn spec_with(fields: Vec<FieldDescriptor>) -> ComponentSpec {
		ComponentSpec::new("book", fields, "id")
			.with_list_endpoint("/books/")
			.with_retrieve_endpoint("/books")
	}

	#[rstest]
	fn test_read_only_field_renders_hidden_only() {
		let spec = spec_with(vec![
			FieldDescriptor::builder("id", FieldClass::Integer)
				.read_only(true)
				.build(),
		]);
		let registry = StyleRegistry::with_defaults();
		let generator = FormGenerator::new(&spec, &registry);

		let fields = generator.included_fields().unwrap();
		let template = generator.template(&fields);

		assert!(template.contains("<input type=\"hidden\" name=\"id\" v-model=\"form.id\"/>"));
		assert!(!template.contains("<label"));
		assert!(!template.contains("errors.id"));
	}

	#[rstest]
	fn test_choice_field_renders_options_loop() {
		let spec = spec_with(vec![
			FieldDescriptor::builder("state", FieldClass::Choice)
				.choices(vec![ChoiceOption {
					value: "published".to_string(),
					display_name: "Published".to_string(),
				}])
				.build(),
		]);
		let registry = StyleRegistry::with_defaults();
		let generator = FormGenerator::new(&spec, &registry);

		let fields = generator.included_fields().unwrap();
		let template = generator.template(&fields);

		assert!(template.contains("<select name=\"state\" v-model=\"form.state\">"));
		assert!(template.contains("v-for=\"(v, k) in options.state\""));
	}

	#[rstest]
	fn test_file_field_excluded() {
		let spec = spec_with(vec![
			FieldDescriptor::builder("headshot", FieldClass::File).build(),
		]);
		let registry = StyleRegistry::with_defaults();
		let generator = FormGenerator::new(&spec, &registry);

		let fields = generator.included_fields().unwrap();

		assert!(fields.is_empty());
	}

	#[rstest]
	fn test_submit_branches_on_primary_key() {
		let spec = spec_with(vec![]);
		let registry = StyleRegistry::with_defaults();
		let generator = FormGenerator::new(&spec, &registry);

		let methods = generator.methods();
		let submit = match &methods[0].1 {
			JsValue::Callable(c) => c.method("submit"),
			other => panic!("expected callable, got {other:?}"),
		};

		assert!(submit.contains("if (this.form.id) {\nthis.update();\n} else {\nthis.create();\n}"));
	}

	#[rstest]
	fn test_methods_omitted_without_endpoints() {
		let spec = ComponentSpec::new("book", vec![], "id");
		let registry = StyleRegistry::with_defaults();
		let generator = FormGenerator::new(&spec, &registry);

		let methods = generator.methods();
		let names: Vec<_> = methods.iter().map(|(n, _)| n.as_str()).collect();

		assert_eq!(names, vec!["submit", "localErrors", "applyServerErrors"]);
	}
}
