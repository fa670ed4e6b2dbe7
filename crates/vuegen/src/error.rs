//! Error types for component generation

use std::path::PathBuf;
use thiserror::Error;

/// Error type for generation operations
#[derive(Debug, Error)]
pub enum GenerateError {
	/// The model provider does not know the requested model reference
	#[error("Unresolvable model reference: {0}")]
	UnresolvableReference(String),

	/// A section value has no JavaScript literal representation
	#[error("Unserializable value: {0}")]
	UnserializableValue(String),

	/// The style registry is missing the fallback entry for a field's chain
	#[error("Unknown field capability: {0}")]
	UnknownCapability(String),

	/// The destination file exists and the sink has no way to resolve it
	#[error("Destination already exists: {0}")]
	DestinationConflict(PathBuf),

	/// Filesystem failure while writing output
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_messages() {
		let err = GenerateError::UnresolvableReference("Book".to_string());
		assert_eq!(err.to_string(), "Unresolvable model reference: Book");

		let err = GenerateError::DestinationConflict(PathBuf::from("/tmp/BookForm.vue"));
		assert!(err.to_string().contains("/tmp/BookForm.vue"));
	}

	#[test]
	fn test_io_error_conversion() {
		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let err: GenerateError = io.into();
		assert!(matches!(err, GenerateError::Io(_)));
	}
}
