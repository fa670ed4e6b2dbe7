//! Model provider contract
//!
//! The provider is the external collaborator that supplies field
//! descriptions, endpoint URLs, and pagination configuration for a model
//! reference. Generation never introspects anything else.

use crate::error::Result;
use crate::field::{ComponentSpec, FieldDescriptor, PaginationStyle};

/// Endpoint URLs for one model, as supplied by the routing collaborator
///
/// Both are opaque strings; the core never parses them.
#[derive(Debug, Clone, Default)]
pub struct Endpoints {
	/// Collection endpoint (list + create)
	pub list: Option<String>,
	/// Single-resource base path (retrieve + update)
	pub retrieve: Option<String>,
}

/// Supplies everything generation needs to know about a model
///
/// Unknown model references fail with
/// [`crate::error::GenerateError::UnresolvableReference`].
pub trait ModelProvider {
	/// Field descriptors, in declaration order
	fn fields(&self, model: &str) -> Result<Vec<FieldDescriptor>>;

	/// Endpoint URLs
	fn endpoints(&self, model: &str) -> Result<Endpoints>;

	/// Primary key field name
	fn primary_key(&self, model: &str) -> Result<String>;

	/// Pagination style; absent configuration means none
	fn pagination_style(&self, model: &str) -> Result<PaginationStyle> {
		let _ = model;
		Ok(PaginationStyle::None)
	}
}

impl ComponentSpec {
	/// Builds a spec by querying a provider for the given model reference
	pub fn from_provider(provider: &dyn ModelProvider, model: &str) -> Result<Self> {
		let fields = provider.fields(model)?;
		let pk_name = provider.primary_key(model)?;
		let endpoints = provider.endpoints(model)?;
		let pagination = provider.pagination_style(model)?;

		let mut spec = Self::new(model, fields, pk_name).with_pagination(pagination);
		if let Some(list) = endpoints.list {
			spec = spec.with_list_endpoint(list);
		}
		if let Some(retrieve) = endpoints.retrieve {
			spec = spec.with_retrieve_endpoint(retrieve);
		}
		Ok(spec)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::GenerateError;
	use crate::field::FieldClass;
	use rstest::rstest;

	struct SingleModelProvider;

	impl ModelProvider for SingleModelProvider {
		fn fields(&self, model: &str) -> Result<Vec<FieldDescriptor>> {
			if model != "book" {
				return Err(GenerateError::UnresolvableReference(model.to_string()));
			}
			Ok(vec![
				FieldDescriptor::builder("title", FieldClass::Char).build(),
			])
		}

		fn endpoints(&self, _model: &str) -> Result<Endpoints> {
			Ok(Endpoints {
				list: Some("/books/".to_string()),
				retrieve: None,
			})
		}

		fn primary_key(&self, _model: &str) -> Result<String> {
			Ok("id".to_string())
		}
	}

	#[rstest]
	fn test_from_provider() {
		let spec = ComponentSpec::from_provider(&SingleModelProvider, "book").unwrap();

		assert_eq!(spec.model_name(), "book");
		assert_eq!(spec.pk_name(), "id");
		assert_eq!(spec.list_endpoint(), Some("/books/"));
		assert_eq!(spec.retrieve_endpoint(), None);
		assert_eq!(spec.pagination(), PaginationStyle::None);
	}

	#[rstest]
	fn test_unresolvable_reference() {
		let result = ComponentSpec::from_provider(&SingleModelProvider, "missing");

		assert!(matches!(
			result,
			Err(GenerateError::UnresolvableReference(_))
		));
	}
}
