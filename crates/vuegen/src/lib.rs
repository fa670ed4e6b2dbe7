//! Vue component generation from declarative field descriptions
//!
//! This crate turns a description of a data model's fields (name, class,
//! constraints, read-only flag, choice options) plus its CRUD endpoint
//! URLs into the source text of Vue single-file components: a form with
//! client-side validation and create/update submission, and a paginated
//! list.
//!
//! # Architecture
//!
//! - [`value`]: serializes in-memory values into JavaScript literal
//!   syntax, distinguishing data from verbatim code fragments
//! - [`callable`]: renders function literals in block or arrow style
//! - [`field`]: field descriptors, capability chains, and the component
//!   spec describing one generation target
//! - [`registry`]: priority-ordered capability lookup mapping field
//!   classes to controls and validation rules
//! - [`component`]: the declarative component model with normalizable
//!   sections
//! - [`render`]: assembles the template/script/style blocks, with an
//!   optional external formatting pass
//! - [`generate`]: the concrete form and list generators
//! - [`provider`]: the collaborator contract supplying fields, endpoints,
//!   and pagination configuration
//! - [`formatter`]: external beautifier integration with graceful
//!   fallback
//! - [`sink`]: output destinations with overwrite policies
//!
//! # Example
//!
//! ```
//! use vuegen::field::{ComponentSpec, FieldClass, FieldDescriptor};
//! use vuegen::generate::FormGenerator;
//! use vuegen::registry::StyleRegistry;
//! use vuegen::render::Renderer;
//!
//! let spec = ComponentSpec::new(
//!     "book",
//!     vec![
//!         FieldDescriptor::builder("title", FieldClass::Char)
//!             .required(true)
//!             .build(),
//!     ],
//!     "id",
//! )
//! .with_list_endpoint("/books/");
//!
//! let registry = StyleRegistry::with_defaults();
//! let component = FormGenerator::new(&spec, &registry).component().unwrap();
//! let text = Renderer::new().render(&component).unwrap();
//! assert!(text.contains("name: \"BookForm\""));
//! ```

pub mod callable;
pub mod component;
pub mod error;
pub mod field;
pub mod formatter;
pub mod generate;
pub mod provider;
pub mod registry;
pub mod render;
pub mod sink;
pub mod value;

pub use callable::{Callable, CallableStyle, Params};
pub use component::{ComponentModel, ComponentModelBuilder, ScriptSection, SectionValue};
pub use error::{GenerateError, Result};
pub use field::{
	ChoiceOption, ComponentSpec, ConstraintSet, FieldClass, FieldDescriptor,
	FieldDescriptorBuilder, PaginationStyle,
};
pub use formatter::{Formatter, ToolLocator, DEFAULT_FORMATTER};
pub use generate::{FormGenerator, ListGenerator, TableTags};
pub use provider::{Endpoints, ModelProvider};
pub use registry::{StyleRegistry, StyleRule, ValidatorRule};
pub use render::Renderer;
pub use sink::{DestinationSink, FileSink, OverwritePolicy, StdoutSink, WriteOutcome};
