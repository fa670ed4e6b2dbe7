//! External code-formatter integration
//!
//! Generated text is piped through an external beautifier when one is
//! available. A missing or failing formatter is never an error: the raw
//! text is returned unchanged.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default formatter executable name
pub const DEFAULT_FORMATTER: &str = "vue-beautify";

/// Executable lookup resolved once at process start
///
/// Captures the `PATH` environment at construction so later lookups do
/// not depend on ambient mutable state.
#[derive(Debug, Clone)]
pub struct ToolLocator {
	override_path: Option<PathBuf>,
	search_dirs: Vec<PathBuf>,
}

impl ToolLocator {
	/// Captures the current `PATH`
	pub fn from_env() -> Self {
		let search_dirs = std::env::var_os("PATH")
			.map(|path| std::env::split_paths(&path).collect())
			.unwrap_or_default();
		Self {
			override_path: None,
			search_dirs,
		}
	}

	/// Forces lookups to resolve to the given path
	pub fn with_override(path: impl Into<PathBuf>) -> Self {
		Self {
			override_path: Some(path.into()),
			search_dirs: Vec::new(),
		}
	}

	/// Resolves an executable name against the captured search path
	pub fn locate(&self, name: &str) -> Option<PathBuf> {
		if let Some(path) = &self.override_path {
			return path.is_file().then(|| path.clone());
		}
		self.search_dirs
			.iter()
			.map(|dir| dir.join(name))
			.find(|candidate| candidate.is_file())
	}
}

/// Pipes component text through an external beautifier
#[derive(Debug, Clone)]
pub struct Formatter {
	program: PathBuf,
}

impl Formatter {
	/// Creates a formatter for the given program name or path
	pub fn new(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
		}
	}

	/// Creates a formatter for the default beautifier, when the locator
	/// can find it
	pub fn discover(locator: &ToolLocator) -> Option<Self> {
		locator.locate(DEFAULT_FORMATTER).map(Self::new)
	}

	/// Program this formatter invokes
	pub fn program(&self) -> &Path {
		&self.program
	}

	/// Formats the source, falling back to it unchanged on any failure
	pub fn format(&self, src: &str) -> String {
		match self.run(src) {
			Some(formatted) => formatted,
			None => src.to_string(),
		}
	}

	fn run(&self, src: &str) -> Option<String> {
		let mut child = match Command::new(&self.program)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::null())
			.spawn()
		{
			Ok(child) => child,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(program = %self.program.display(), "formatter not found");
				return None;
			}
			Err(e) => {
				tracing::warn!(program = %self.program.display(), error = %e, "formatter failed to start");
				return None;
			}
		};

		if let Some(mut stdin) = child.stdin.take() {
			if stdin.write_all(src.as_bytes()).is_err() {
				tracing::warn!(program = %self.program.display(), "formatter closed its input");
				let _ = child.wait();
				return None;
			}
		}

		let output = match child.wait_with_output() {
			Ok(output) => output,
			Err(e) => {
				tracing::warn!(program = %self.program.display(), error = %e, "formatter did not finish");
				return None;
			}
		};
		if !output.status.success() {
			tracing::warn!(program = %self.program.display(), status = %output.status, "formatter exited nonzero");
			return None;
		}
		match String::from_utf8(output.stdout) {
			Ok(formatted) => Some(formatted),
			Err(_) => {
				tracing::warn!(program = %self.program.display(), "formatter produced non-UTF-8 output");
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_formatter_falls_back_to_input() {
		let formatter = Formatter::new("/nonexistent/path/to/beautifier");
		let src = "<template>\n<div/>\n</template>\n";
		assert_eq!(formatter.format(src), src);
	}

	#[test]
	fn test_locator_override_requires_existing_file() {
		let locator = ToolLocator::with_override("/nonexistent/beautify");
		assert!(locator.locate(DEFAULT_FORMATTER).is_none());
	}

	#[test]
	fn test_locator_finds_real_executable() {
		// `sh` exists on any platform these tests run on.
		let locator = ToolLocator::from_env();
		assert!(locator.locate("sh").is_some());
	}

	#[cfg(unix)]
	#[test]
	fn test_failing_formatter_falls_back_to_input() {
		let formatter = Formatter::new("/bin/false");
		assert_eq!(formatter.format("source"), "source");
	}

	#[cfg(unix)]
	#[test]
	fn test_working_formatter_output_is_used() {
		// `cat` is the identity formatter.
		let formatter = Formatter::new("/bin/cat");
		assert_eq!(formatter.format("source text"), "source text");
	}
}
