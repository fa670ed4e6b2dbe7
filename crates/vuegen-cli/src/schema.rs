//! JSON schema file provider
//!
//! The schema file is the CLI's replacement for framework introspection:
//! a JSON document mapping model names to their fields, endpoints,
//! primary key, and pagination style.
//!
//! ```json
//! {
//!   "models": {
//!     "book": {
//!       "primary_key": "id",
//!       "endpoints": { "list": "/books/", "retrieve": "/books" },
//!       "pagination": "page-number",
//!       "fields": [
//!         { "name": "id", "class": "integer", "read_only": true },
//!         { "name": "title", "class": "char", "required": true },
//!         { "name": "isbn", "class": "char", "required": true, "max_length": 100 }
//!       ]
//!     }
//!   }
//! }
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use vuegen::error::GenerateError;
use vuegen::field::{ChoiceOption, FieldClass, FieldDescriptor, PaginationStyle};
use vuegen::provider::{Endpoints, ModelProvider};

#[derive(Debug, Deserialize)]
struct SchemaFile {
	models: HashMap<String, ModelSchema>,
}

/// One model entry in the schema file
#[derive(Debug, Deserialize)]
pub struct ModelSchema {
	#[serde(default = "default_primary_key")]
	primary_key: String,
	#[serde(default)]
	endpoints: EndpointsSchema,
	#[serde(default)]
	pagination: PaginationStyle,
	fields: Vec<FieldSchema>,
}

#[derive(Debug, Deserialize, Default)]
struct EndpointsSchema {
	#[serde(default)]
	list: Option<String>,
	#[serde(default)]
	retrieve: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FieldSchema {
	name: String,
	class: FieldClass,
	#[serde(default)]
	label: Option<String>,
	#[serde(default)]
	required: bool,
	#[serde(default)]
	read_only: bool,
	#[serde(default)]
	min_length: Option<u64>,
	#[serde(default)]
	max_length: Option<u64>,
	#[serde(default)]
	min_value: Option<f64>,
	#[serde(default)]
	max_value: Option<f64>,
	#[serde(default)]
	choices: Option<Vec<ChoiceOption>>,
	#[serde(default)]
	error_messages: HashMap<String, String>,
}

fn default_primary_key() -> String {
	"id".to_string()
}

impl FieldSchema {
	fn to_descriptor(&self) -> FieldDescriptor {
		let mut builder = FieldDescriptor::builder(&self.name, self.class)
			.required(self.required)
			.read_only(self.read_only);
		if let Some(label) = &self.label {
			builder = builder.label(label);
		}
		if let Some(n) = self.min_length {
			builder = builder.min_length(n);
		}
		if let Some(n) = self.max_length {
			builder = builder.max_length(n);
		}
		if let Some(v) = self.min_value {
			builder = builder.min_value(v);
		}
		if let Some(v) = self.max_value {
			builder = builder.max_value(v);
		}
		if let Some(choices) = &self.choices {
			builder = builder.choices(choices.clone());
		}
		for (kind, message) in &self.error_messages {
			builder = builder.error_message(kind, message);
		}
		builder.build()
	}
}

/// [`ModelProvider`] backed by a JSON schema file
pub struct JsonSchemaProvider {
	models: HashMap<String, ModelSchema>,
}

impl JsonSchemaProvider {
	/// Loads and parses a schema file
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let raw = std::fs::read_to_string(path)
			.with_context(|| format!("cannot read schema file {}", path.display()))?;
		Self::parse(&raw).with_context(|| format!("invalid schema file {}", path.display()))
	}

	/// Parses schema JSON
	pub fn parse(raw: &str) -> anyhow::Result<Self> {
		let file: SchemaFile = serde_json::from_str(raw)?;
		Ok(Self {
			models: file.models,
		})
	}

	fn model(&self, name: &str) -> vuegen::Result<&ModelSchema> {
		self.models
			.get(name)
			.ok_or_else(|| GenerateError::UnresolvableReference(name.to_string()))
	}
}

impl ModelProvider for JsonSchemaProvider {
	fn fields(&self, model: &str) -> vuegen::Result<Vec<FieldDescriptor>> {
		Ok(self
			.model(model)?
			.fields
			.iter()
			.map(FieldSchema::to_descriptor)
			.collect())
	}

	fn endpoints(&self, model: &str) -> vuegen::Result<Endpoints> {
		let schema = self.model(model)?;
		Ok(Endpoints {
			list: schema.endpoints.list.clone(),
			retrieve: schema.endpoints.retrieve.clone(),
		})
	}

	fn primary_key(&self, model: &str) -> vuegen::Result<String> {
		Ok(self.model(model)?.primary_key.clone())
	}

	fn pagination_style(&self, model: &str) -> vuegen::Result<PaginationStyle> {
		Ok(self.model(model)?.pagination)
	}
}
