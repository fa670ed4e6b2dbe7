//! Paginated list component generation
//!
//! Renders a table-like structure over an externally-fetched object
//! sequence, with one of two mutually exclusive pagination variants (or
//! none). Filter and pagination state are watched: a filter change resets
//! pagination and refetches; a pagination change refetches.

use crate::callable::Callable;
use crate::component::{ComponentModel, SectionValue};
use crate::error::Result;
use crate::field::{ComponentSpec, FieldDescriptor, PaginationStyle};
use crate::generate::COMPONENTS_DIR;
use crate::registry::StyleRegistry;
use crate::value::JsValue;

/// Element tags of the generated table structure
#[derive(Debug, Clone)]
pub struct TableTags {
	/// Outer table tag
	pub table: String,
	/// Row tag
	pub row: String,
	/// Body cell tag
	pub column: String,
	/// Header cell tag
	pub header: String,
}

impl Default for TableTags {
	fn default() -> Self {
		Self {
			table: "table".to_string(),
			row: "tr".to_string(),
			column: "td".to_string(),
			header: "th".to_string(),
		}
	}
}

/// Builds the list component for a [`ComponentSpec`]
pub struct ListGenerator<'a> {
	spec: &'a ComponentSpec,
	registry: &'a StyleRegistry,
	tags: TableTags,
}

impl<'a> ListGenerator<'a> {
	/// Creates a generator over the given spec and style registry
	pub fn new(spec: &'a ComponentSpec, registry: &'a StyleRegistry) -> Self {
		Self {
			spec,
			registry,
			tags: TableTags::default(),
		}
	}

	/// Overrides the table element tags
	pub fn with_tags(mut self, tags: TableTags) -> Self {
		self.tags = tags;
		self
	}

	/// Generated component name, `<Model>List`
	pub fn component_name(&self) -> String {
		format!("{}List", self.spec.class_name())
	}

	/// Default output path for the generated component
	pub fn filename(&self) -> String {
		format!("{}/{}.vue", COMPONENTS_DIR, self.component_name())
	}

	/// Builds the declarative component model
	pub fn component(&self) -> Result<ComponentModel> {
		let fields = self.visible_fields()?;

		let mut builder = ComponentModel::builder(self.component_name())
			.template(self.template(&fields))
			.props(["filters"]);

		let data = self.data_pairs();
		builder = builder.data(SectionValue::pairs(move || data.clone()));

		if self.spec.list_endpoint().is_some() {
			builder = builder.hook("mounted", JsValue::str("this.fetchList();"));
			builder = builder.section(
				"watch",
				SectionValue::value(JsValue::Object(self.watch_entries())),
			);
			let methods = self.method_entries();
			builder = builder.methods(SectionValue::pairs(move || methods.clone()));
		}

		if let Some(computed) = self.computed_entries() {
			builder = builder.computed(SectionValue::value(JsValue::Object(computed)));
		}

		Ok(builder.build())
	}

	fn visible_fields(&self) -> Result<Vec<&'a FieldDescriptor>> {
		let mut fields = Vec::new();
		for field in self.spec.fields() {
			if self.registry.resolve_style(field)?.excluded() {
				continue;
			}
			fields.push(field);
		}
		Ok(fields)
	}

	fn template(&self, fields: &[&FieldDescriptor]) -> String {
		let TableTags {
			table,
			row,
			column,
			header,
		} = &self.tags;
		let pk = self.spec.pk_name();

		let mut lines = Vec::new();
		lines.push(format!("<div class=\"{}-list\">", self.spec.model_name()));
		lines.push(format!("<{table}>"));
		lines.push(format!("<{row}>"));
		for field in fields {
			lines.push(format!("<{header}>{}</{header}>", field.label()));
		}
		lines.push(format!("</{row}>"));
		lines.push(format!(
			"<{row} v-for=\"object in objects\" :key=\"object.{pk}\">"
		));
		lines.push("<slot name=\"object\" v-bind:object=\"object\">".to_string());
		for field in fields {
			lines.push(format!(
				"<{column}>{{{{ object.{} }}}}</{column}>",
				field.name()
			));
		}
		lines.push("</slot>".to_string());
		lines.push(format!("</{row}>"));
		lines.push(format!("</{table}>"));

		match self.spec.pagination() {
			PaginationStyle::PageNumber => {
				lines.push("<div class=\"pagination\" v-if=\"pages.length > 1\">".to_string());
				lines.push("<select v-model.number=\"page\">".to_string());
				lines.push(
					"<option v-for=\"p in pages\" :key=\"p\" :value=\"p\">{{ p }}</option>"
						.to_string(),
				);
				lines.push("</select>".to_string());
				lines.push("</div>".to_string());
			}
			PaginationStyle::LimitOffset => {
				lines.push("<div class=\"pagination\" v-if=\"steps.length > 1\">".to_string());
				lines.push(
					"<button v-for=\"step in steps\" :key=\"step.offset\" @click=\"offset = step.offset\">{{ step.index }}</button>"
						.to_string(),
				);
				lines.push("</div>".to_string());
			}
			PaginationStyle::None => {}
		}

		lines.push("</div>".to_string());
		lines.join("\n")
	}

	fn data_pairs(&self) -> Vec<(String, JsValue)> {
		let mut pairs = vec![
			("objects".to_string(), JsValue::Array(vec![])),
			("count".to_string(), JsValue::Int(0)),
		];
		match self.spec.pagination() {
			PaginationStyle::PageNumber => {
				pairs.push(("page".to_string(), JsValue::Int(1)));
				pairs.push(("pageSize".to_string(), JsValue::Int(10)));
			}
			PaginationStyle::LimitOffset => {
				pairs.push(("limit".to_string(), JsValue::Int(10)));
				pairs.push(("offset".to_string(), JsValue::Int(0)));
			}
			PaginationStyle::None => {}
		}
		pairs
	}

	// A filter change must reset pagination and fetch exactly once: when
	// already at the initial position the reset would not re-trigger the
	// pagination watcher, so fetch directly.
	fn watch_entries(&self) -> Vec<(String, JsValue)> {
		let filters_body = match self.spec.pagination() {
			PaginationStyle::PageNumber => {
				"if (this.page === 1) {\nthis.fetchList();\n} else {\nthis.page = 1;\n}"
			}
			PaginationStyle::LimitOffset => {
				"if (this.offset === 0) {\nthis.fetchList();\n} else {\nthis.offset = 0;\n}"
			}
			PaginationStyle::None => "this.fetchList();",
		};
		let filters = JsValue::Object(vec![
			(
				"handler".to_string(),
				Callable::block("newValue, oldValue", filters_body).into(),
			),
			("deep".to_string(), JsValue::Bool(true)),
		]);

		let mut entries = vec![("filters".to_string(), filters)];
		match self.spec.pagination() {
			PaginationStyle::PageNumber => {
				entries.push(("page".to_string(), JsValue::str("this.fetchList();")));
			}
			PaginationStyle::LimitOffset => {
				entries.push(("offset".to_string(), JsValue::str("this.fetchList();")));
			}
			PaginationStyle::None => {}
		}
		entries
	}

	fn computed_entries(&self) -> Option<Vec<(String, JsValue)>> {
		match self.spec.pagination() {
			PaginationStyle::PageNumber => {
				let body = "return Array.from({ length: Math.ceil(this.count / this.pageSize) }, (_, i) => i + 1);";
				Some(vec![(
					"pages".to_string(),
					Callable::block("", body).into(),
				)])
			}
			PaginationStyle::LimitOffset => {
				let body = "const steps = [];\n\
					for (let offset = 0, index = 1; offset < this.count; offset += this.limit, index += 1) {\n\
					steps.push({ offset, index });\n\
					}\n\
					return steps;";
				Some(vec![(
					"steps".to_string(),
					Callable::block("", body).into(),
				)])
			}
			PaginationStyle::None => None,
		}
	}

	fn method_entries(&self) -> Vec<(String, JsValue)> {
		let Some(endpoint) = self.spec.list_endpoint() else {
			return Vec::new();
		};
		let params = match self.spec.pagination() {
			PaginationStyle::PageNumber => {
				"const params = { page: this.page, page_size: this.pageSize, ...this.filters };"
			}
			PaginationStyle::LimitOffset => {
				"const params = { limit: this.limit, offset: this.offset, ...this.filters };"
			}
			PaginationStyle::None => "const params = { ...this.filters };",
		};
		// The response is either a {results, count} wrapper or a bare
		// array; both are handled.
		let body = format!(
			"{params}\n\
			this.$http.get(\"{endpoint}\", {{ params }}).then((r) => r.json()).then((r) => {{\n\
			if (r && r.results) {{\n\
			this.objects = r.results;\n\
			this.count = r.count;\n\
			}} else {{\n\
			this.objects = r || [];\n\
			this.count = this.objects.length;\n\
			}}\n\
			}});"
		);
		vec![(
			"fetchList".to_string(),
			Callable::block("", body).into(),
		)]
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::FieldClass;
	use rstest::rstest;

	fn spec(pagination: PaginationStyle) -> ComponentSpec {
		ComponentSpec::new(
			"book",
			vec![
				FieldDescriptor::builder("title", FieldClass::Char).build(),
				FieldDescriptor::builder("isbn", FieldClass::Char).build(),
			],
			"id",
		)
		.with_list_endpoint("/books/")
		.with_pagination(pagination)
	}

	#[rstest]
	fn test_template_has_header_and_body_rows() {
		let spec = spec(PaginationStyle::None);
		let registry = StyleRegistry::with_defaults();
		let generator = ListGenerator::new(&spec, &registry);

		let fields = generator.visible_fields().unwrap();
		let template = generator.template(&fields);

		assert!(template.contains("<th>Title</th>"));
		assert!(template.contains("<tr v-for=\"object in objects\" :key=\"object.id\">"));
		assert!(template.contains("<td>{{ object.isbn }}</td>"));
		assert!(template.contains("<slot name=\"object\""));
	}

	#[rstest]
	fn test_custom_tags() {
		let spec = spec(PaginationStyle::None);
		let registry = StyleRegistry::with_defaults();
		let generator = ListGenerator::new(&spec, &registry).with_tags(TableTags {
			table: "v-table".to_string(),
			row: "v-row".to_string(),
			column: "v-col".to_string(),
			header: "v-header".to_string(),
		});

		let fields = generator.visible_fields().unwrap();
		let template = generator.template(&fields);

		assert!(template.contains("<v-table>"));
		assert!(template.contains("<v-header>Title</v-header>"));
		assert!(template.contains("<v-col>{{ object.title }}</v-col>"));
	}

	#[rstest]
	fn test_page_number_state() {
		let spec = spec(PaginationStyle::PageNumber);
		let registry = StyleRegistry::with_defaults();
		let generator = ListGenerator::new(&spec, &registry);

		let data = generator.data_pairs();
		let keys: Vec<_> = data.iter().map(|(k, _)| k.as_str()).collect();

		assert_eq!(keys, vec!["objects", "count", "page", "pageSize"]);
	}

	#[rstest]
	fn test_limit_offset_state() {
		let spec = spec(PaginationStyle::LimitOffset);
		let registry = StyleRegistry::with_defaults();
		let generator = ListGenerator::new(&spec, &registry);

		let data = generator.data_pairs();
		let keys: Vec<_> = data.iter().map(|(k, _)| k.as_str()).collect();

		assert_eq!(keys, vec!["objects", "count", "limit", "offset"]);
	}

	#[rstest]
	fn test_filter_watch_resets_pagination_once() {
		let spec = spec(PaginationStyle::PageNumber);
		let registry = StyleRegistry::with_defaults();
		let generator = ListGenerator::new(&spec, &registry);

		let watch = generator.watch_entries();
		let filters = watch[0].1.render();

		assert!(filters.contains("if (this.page === 1)"));
		assert!(filters.contains("this.page = 1;"));
		assert!(filters.contains("deep: true"));
	}

	#[rstest]
	fn test_fetch_merges_pagination_and_filters() {
		let spec = spec(PaginationStyle::LimitOffset);
		let registry = StyleRegistry::with_defaults();
		let generator = ListGenerator::new(&spec, &registry);

		let methods = generator.method_entries();
		let fetch = methods[0].1.render();

		assert!(fetch.contains("limit: this.limit, offset: this.offset, ...this.filters"));
		assert!(fetch.contains("this.objects = r.results;"));
		assert!(fetch.contains("this.objects = r || [];"));
	}
}
