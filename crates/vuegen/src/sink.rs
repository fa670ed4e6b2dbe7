//! Destination sinks for generated output
//!
//! A sink decides where component text goes: standard output, or a file
//! with an overwrite policy. File writes are staged to a temporary
//! sibling and renamed into place, so a failed run never leaves a
//! partially-written component behind.

use crate::error::{GenerateError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Conflict resolution when the target file already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
	/// Replace the existing file
	Overwrite,
	/// Leave the existing file untouched
	Skip,
	/// Ask the injected confirmer; without one, conflict is an error
	#[default]
	Prompt,
}

/// Outcome of a sink write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
	/// The component was written
	Written,
	/// An existing file was left in place
	Skipped,
}

/// Destination abstraction generated components are written to
pub trait DestinationSink {
	/// Writes one named component
	fn write(&mut self, name: &str, text: &str) -> Result<WriteOutcome>;
}

/// Emits components to standard output
#[derive(Debug, Default)]
pub struct StdoutSink;

impl DestinationSink for StdoutSink {
	fn write(&mut self, _name: &str, text: &str) -> Result<WriteOutcome> {
		let mut stdout = std::io::stdout().lock();
		stdout.write_all(text.as_bytes())?;
		Ok(WriteOutcome::Written)
	}
}

/// Writes components to `<dir>/<name>.vue` under an overwrite policy
pub struct FileSink {
	dir: PathBuf,
	policy: OverwritePolicy,
	confirm: Option<Box<dyn FnMut(&Path) -> bool>>,
}

impl FileSink {
	/// Creates a sink for the given directory with the default policy
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			policy: OverwritePolicy::default(),
			confirm: None,
		}
	}

	/// Sets the overwrite policy
	pub fn with_policy(mut self, policy: OverwritePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Injects the confirmer consulted under [`OverwritePolicy::Prompt`]
	pub fn with_confirm(mut self, confirm: impl FnMut(&Path) -> bool + 'static) -> Self {
		self.confirm = Some(Box::new(confirm));
		self
	}

	/// Target path for a component name
	pub fn target(&self, name: &str) -> PathBuf {
		self.dir.join(format!("{name}.vue"))
	}

	fn resolve_conflict(&mut self, target: &Path) -> Result<bool> {
		match self.policy {
			OverwritePolicy::Overwrite => Ok(true),
			OverwritePolicy::Skip => {
				tracing::info!(target_file = %target.display(), "target exists, skipping");
				Ok(false)
			}
			OverwritePolicy::Prompt => match &mut self.confirm {
				Some(confirm) => Ok(confirm(target)),
				None => Err(GenerateError::DestinationConflict(target.to_path_buf())),
			},
		}
	}
}

impl DestinationSink for FileSink {
	fn write(&mut self, name: &str, text: &str) -> Result<WriteOutcome> {
		let target = self.target(name);
		if target.exists() && !self.resolve_conflict(&target)? {
			return Ok(WriteOutcome::Skipped);
		}

		fs::create_dir_all(&self.dir)?;
		let staging = self.dir.join(format!(".{name}.vue.tmp"));
		fs::write(&staging, text)?;
		fs::rename(&staging, &target)?;
		tracing::debug!(target_file = %target.display(), "component written");
		Ok(WriteOutcome::Written)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use tempfile::TempDir;

	#[rstest]
	fn test_write_creates_file() {
		let dir = TempDir::new().unwrap();
		let mut sink = FileSink::new(dir.path());

		let outcome = sink.write("BookForm", "<template/>").unwrap();

		assert_eq!(outcome, WriteOutcome::Written);
		let written = fs::read_to_string(dir.path().join("BookForm.vue")).unwrap();
		assert_eq!(written, "<template/>");
	}

	#[rstest]
	fn test_prompt_without_confirmer_is_conflict() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("BookForm.vue"), "old").unwrap();
		let mut sink = FileSink::new(dir.path());

		let result = sink.write("BookForm", "new");

		assert!(matches!(
			result,
			Err(GenerateError::DestinationConflict(_))
		));
		let existing = fs::read_to_string(dir.path().join("BookForm.vue")).unwrap();
		assert_eq!(existing, "old");
	}

	#[rstest]
	fn test_skip_policy_leaves_existing_file() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("BookForm.vue"), "old").unwrap();
		let mut sink = FileSink::new(dir.path()).with_policy(OverwritePolicy::Skip);

		let outcome = sink.write("BookForm", "new").unwrap();

		assert_eq!(outcome, WriteOutcome::Skipped);
		let existing = fs::read_to_string(dir.path().join("BookForm.vue")).unwrap();
		assert_eq!(existing, "old");
	}

	#[rstest]
	fn test_overwrite_policy_replaces_file() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("BookForm.vue"), "old").unwrap();
		let mut sink = FileSink::new(dir.path()).with_policy(OverwritePolicy::Overwrite);

		let outcome = sink.write("BookForm", "new").unwrap();

		assert_eq!(outcome, WriteOutcome::Written);
		let existing = fs::read_to_string(dir.path().join("BookForm.vue")).unwrap();
		assert_eq!(existing, "new");
	}

	#[rstest]
	fn test_prompt_confirmer_decides() {
		let dir = TempDir::new().unwrap();
		fs::write(dir.path().join("BookForm.vue"), "old").unwrap();

		let mut declined = FileSink::new(dir.path()).with_confirm(|_| false);
		assert_eq!(
			declined.write("BookForm", "new").unwrap(),
			WriteOutcome::Skipped
		);

		let mut accepted = FileSink::new(dir.path()).with_confirm(|_| true);
		assert_eq!(
			accepted.write("BookForm", "new").unwrap(),
			WriteOutcome::Written
		);
		let existing = fs::read_to_string(dir.path().join("BookForm.vue")).unwrap();
		assert_eq!(existing, "new");
	}
}
