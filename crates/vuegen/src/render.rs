//! Component text assembly
//!
//! Pulls each section of a [`ComponentModel`], normalizes and serializes
//! it, and concatenates the `<template>`, `<script>`, and `<style>`
//! blocks into the final component text. Sections that resolve to
//! nothing are suppressed entirely, except `data`, which always renders
//! so the reactive-state container exists.

use crate::callable::Callable;
use crate::component::{ComponentModel, ScriptSection, SectionValue};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::value::JsValue;
use indexmap::IndexMap;

/// Renders [`ComponentModel`]s to component text
#[derive(Debug, Default)]
pub struct Renderer {
	formatter: Option<Formatter>,
}

impl Renderer {
	/// Creates a renderer without a formatting pass
	pub fn new() -> Self {
		Self { formatter: None }
	}

	/// Creates a renderer that pipes output through the given formatter
	pub fn with_formatter(formatter: Formatter) -> Self {
		Self {
			formatter: Some(formatter),
		}
	}

	/// Renders the component to its final text
	///
	/// The script object keys render in fixed order: `name`, `props`,
	/// `data()`, the declared sections in declaration order, `methods`,
	/// `computed`.
	pub fn render(&self, model: &ComponentModel) -> Result<String> {
		let mut out = String::new();

		if !model.template().trim().is_empty() {
			out.push_str("<template>\n");
			out.push_str(model.template().trim_end());
			out.push_str("\n</template>\n\n");
		}

		out.push_str("<script>\n");
		for import in model.imports() {
			out.push_str(import);
			out.push('\n');
		}
		out.push_str("export default {\n");
		out.push_str(&format!("name: {},\n", JsValue::str(model.name()).render()));

		if !model.props().is_empty() {
			let props = JsValue::Array(
				model.props().iter().map(|p| JsValue::str(p.clone())).collect(),
			);
			out.push_str(&format!("props: {},\n", props.render()));
		}

		let data = model.data().normalize()?;
		out.push_str(&format!(
			"data() {{\nreturn {};\n}},\n",
			to_object(data).render()
		));

		for (name, section) in model.sections() {
			match section {
				ScriptSection::Map(value) => {
					let map = value.normalize()?;
					if map.is_empty() {
						continue;
					}
					// Watch handlers take the changed and previous value.
					let map = if name == "watch" {
						wrap_raw_entries(map, "newValue, oldValue")
					} else {
						map
					};
					out.push_str(&format!("{}: {},\n", name, to_object(map).render()));
				}
				ScriptSection::Entry(value) => {
					let value = wrap_raw(value.clone(), "");
					match value {
						JsValue::Callable(c) => {
							out.push_str(&c.method(name));
							out.push_str(",\n");
						}
						other => out.push_str(&format!("{}: {},\n", name, other.render())),
					}
				}
			}
		}

		for (name, section) in [("methods", model.methods()), ("computed", model.computed())] {
			let Some(section) = section else { continue };
			let map = section.normalize()?;
			if map.is_empty() {
				continue;
			}
			let map = wrap_raw_entries(map, "");
			out.push_str(&format!("{}: {},\n", name, to_object(map).render()));
		}

		out.push_str("};\n</script>\n");

		if let Some(style) = model.style() {
			if !style.trim().is_empty() {
				out.push_str("\n<style>\n");
				out.push_str(style.trim_end());
				out.push_str("\n</style>\n");
			}
		}

		Ok(match &self.formatter {
			Some(formatter) => formatter.format(&out),
			None => out,
		})
	}
}

fn to_object(map: IndexMap<String, JsValue>) -> JsValue {
	JsValue::Object(map.into_iter().collect())
}

// Raw text entries become block callables with the given signature;
// everything already callable or verbatim passes through.
fn wrap_raw_entries(
	map: IndexMap<String, JsValue>,
	params: &str,
) -> IndexMap<String, JsValue> {
	map.into_iter()
		.map(|(name, value)| {
			let value = wrap_raw(value, params);
			(name, value)
		})
		.collect()
}

fn wrap_raw(value: JsValue, params: &str) -> JsValue {
	match value {
		JsValue::Str(body) => JsValue::Callable(Callable::block(params, body)),
		other => other,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::ComponentModel;
	use rstest::rstest;

	fn minimal_model() -> ComponentModel {
		ComponentModel::builder("BookForm")
			.template("<div class=\"book-form\"/>")
			.build()
	}

	#[rstest]
	fn test_data_always_rendered() {
		let renderer = Renderer::new();

		let text = renderer.render(&minimal_model()).unwrap();

		assert!(text.contains("data() {\nreturn {};\n}"));
	}

	#[rstest]
	fn test_empty_sections_suppressed() {
		let model = ComponentModel::builder("BookForm")
			.template("<div/>")
			.section("watch", SectionValue::empty())
			.methods(SectionValue::empty())
			.build();
		let renderer = Renderer::new();

		let text = renderer.render(&model).unwrap();

		assert!(!text.contains("watch"));
		assert!(!text.contains("methods"));
	}

	#[rstest]
	fn test_props_render_as_plain_array() {
		let model = ComponentModel::builder("BookList")
			.template("<div/>")
			.props(["filters"])
			.build();
		let renderer = Renderer::new();

		let text = renderer.render(&model).unwrap();

		assert!(text.contains("props: [\"filters\"],"));
	}

	#[rstest]
	fn test_hook_raw_text_wrapped_as_method() {
		let model = ComponentModel::builder("BookList")
			.template("<div/>")
			.hook("mounted", JsValue::str("this.fetchList();"))
			.build();
		let renderer = Renderer::new();

		let text = renderer.render(&model).unwrap();

		assert!(text.contains("mounted() {\nthis.fetchList();\n},"));
	}

	#[rstest]
	fn test_watch_raw_text_gets_two_parameter_signature() {
		let model = ComponentModel::builder("BookList")
			.template("<div/>")
			.section(
				"watch",
				SectionValue::value(JsValue::Object(vec![(
					"page".to_string(),
					JsValue::str("this.fetchList();"),
				)])),
			)
			.build();
		let renderer = Renderer::new();

		let text = renderer.render(&model).unwrap();

		assert!(text.contains("page(newValue, oldValue) {\nthis.fetchList();\n}"));
	}

	#[rstest]
	fn test_fixed_key_order() {
		let model = ComponentModel::builder("BookList")
			.template("<div/>")
			.props(["filters"])
			.section(
				"validations",
				SectionValue::value(JsValue::Object(vec![(
					"form".to_string(),
					JsValue::empty_object(),
				)])),
			)
			.methods(SectionValue::value(JsValue::Object(vec![(
				"fetchList".to_string(),
				JsValue::str("return;"),
			)])))
			.computed(SectionValue::value(JsValue::Object(vec![(
				"pages".to_string(),
				JsValue::str("return [];"),
			)])))
			.build();
		let renderer = Renderer::new();

		let text = renderer.render(&model).unwrap();

		let positions: Vec<_> = ["name:", "props:", "data()", "validations:", "methods:", "computed:"]
			.iter()
			.map(|key| text.find(key).unwrap_or_else(|| panic!("missing {key}")))
			.collect();
		let mut sorted = positions.clone();
		sorted.sort_unstable();
		assert_eq!(positions, sorted);
	}

	#[rstest]
	fn test_style_block_rendered_last() {
		let model = ComponentModel::builder("BookForm")
			.template("<div/>")
			.style(".book-form { padding: 1rem; }")
			.build();
		let renderer = Renderer::new();

		let text = renderer.render(&model).unwrap();

		assert!(text.trim_end().ends_with("</style>"));
		assert!(text.contains("<style>\n.book-form { padding: 1rem; }\n</style>"));
	}

	#[rstest]
	fn test_render_is_idempotent() {
		let renderer = Renderer::new();

		let first = renderer.render(&minimal_model()).unwrap();
		let second = renderer.render(&minimal_model()).unwrap();

		assert_eq!(first, second);
	}

	#[rstest]
	fn test_missing_formatter_still_returns_complete_text() {
		let plain = Renderer::new().render(&minimal_model()).unwrap();
		let renderer =
			Renderer::with_formatter(Formatter::new("/nonexistent/beautifier"));

		let text = renderer.render(&minimal_model()).unwrap();

		assert_eq!(text, plain);
		assert!(text.ends_with("</script>\n"));
	}
}
