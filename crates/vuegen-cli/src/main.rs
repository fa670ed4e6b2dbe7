//! Vuegen CLI
//!
//! Command-line tool for generating Vue form and list components from a
//! JSON model schema.
//!
//! ## Usage
//!
//! ```bash
//! vuegen generate-form book > frontend/src/components/BookForm.vue
//! vuegen generate-form book --write
//! vuegen generate-list book --table-tag v-table --write --force
//! ```

mod schema;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use schema::JsonSchemaProvider;
use vuegen::field::ComponentSpec;
use vuegen::formatter::{Formatter, ToolLocator};
use vuegen::generate::{FormGenerator, ListGenerator, TableTags, COMPONENTS_DIR};
use vuegen::registry::StyleRegistry;
use vuegen::render::Renderer;
use vuegen::sink::{DestinationSink, FileSink, OverwritePolicy, StdoutSink, WriteOutcome};

#[derive(Parser)]
#[command(name = "vuegen")]
#[command(about = "Generate Vue components from model schemas", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Path to the model schema file
	#[arg(short, long, global = true, default_value = "vuegen.json")]
	schema: PathBuf,

	/// Verbosity level (can be repeated)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Generate a CRUD form component for a model
	GenerateForm {
		/// Model name from the schema file
		#[arg(value_name = "MODEL")]
		model: String,

		#[command(flatten)]
		output: OutputOptions,
	},

	/// Generate a paginated list component for a model
	GenerateList {
		/// Model name from the schema file
		#[arg(value_name = "MODEL")]
		model: String,

		/// Outer table tag
		#[arg(long, default_value = "table")]
		table_tag: String,

		/// Row tag
		#[arg(long, default_value = "tr")]
		row_tag: String,

		/// Body cell tag
		#[arg(long, default_value = "td")]
		column_tag: String,

		/// Header cell tag
		#[arg(long, default_value = "th")]
		header_tag: String,

		#[command(flatten)]
		output: OutputOptions,
	},
}

#[derive(Args)]
struct OutputOptions {
	/// Write to the components directory instead of standard output
	#[arg(long)]
	write: bool,

	/// Target directory for --write
	#[arg(long, value_name = "DIR")]
	out_dir: Option<PathBuf>,

	/// Formatter executable to pipe the output through
	#[arg(long, value_name = "PROGRAM")]
	formatter: Option<String>,

	/// Overwrite existing files without asking
	#[arg(long, conflicts_with = "skip_existing")]
	force: bool,

	/// Leave existing files untouched
	#[arg(long)]
	skip_existing: bool,
}

fn main() {
	let cli = Cli::parse();
	if let Err(e) = run(cli) {
		eprintln!("{} {e:#}", "error:".red().bold());
		process::exit(1);
	}
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let registry = StyleRegistry::with_defaults();
	registry.self_check()?;
	let provider = JsonSchemaProvider::load(&cli.schema)?;

	match cli.command {
		Commands::GenerateForm { model, output } => {
			let spec = ComponentSpec::from_provider(&provider, &model)?;
			let generator = FormGenerator::new(&spec, &registry);
			let text = make_renderer(&output).render(&generator.component()?)?;
			emit(&generator.component_name(), &text, &output, cli.verbosity)?;
		}
		Commands::GenerateList {
			model,
			table_tag,
			row_tag,
			column_tag,
			header_tag,
			output,
		} => {
			let spec = ComponentSpec::from_provider(&provider, &model)?;
			let generator = ListGenerator::new(&spec, &registry).with_tags(TableTags {
				table: table_tag,
				row: row_tag,
				column: column_tag,
				header: header_tag,
			});
			let text = make_renderer(&output).render(&generator.component()?)?;
			emit(&generator.component_name(), &text, &output, cli.verbosity)?;
		}
	}
	Ok(())
}

fn make_renderer(output: &OutputOptions) -> Renderer {
	match &output.formatter {
		Some(program) => Renderer::with_formatter(Formatter::new(program)),
		None => match Formatter::discover(&ToolLocator::from_env()) {
			Some(formatter) => Renderer::with_formatter(formatter),
			None => Renderer::new(),
		},
	}
}

fn emit(name: &str, text: &str, output: &OutputOptions, verbosity: u8) -> anyhow::Result<()> {
	if !output.write {
		StdoutSink.write(name, text)?;
		return Ok(());
	}

	let dir = output
		.out_dir
		.clone()
		.unwrap_or_else(|| PathBuf::from(COMPONENTS_DIR));
	let policy = if output.force {
		OverwritePolicy::Overwrite
	} else if output.skip_existing {
		OverwritePolicy::Skip
	} else {
		OverwritePolicy::Prompt
	};
	let mut sink = FileSink::new(&dir)
		.with_policy(policy)
		.with_confirm(confirm_overwrite);

	match sink.write(name, text)? {
		WriteOutcome::Written => {
			if verbosity > 0 {
				eprintln!(
					"{} {}",
					"wrote".green().bold(),
					dir.join(format!("{name}.vue")).display()
				);
			}
		}
		WriteOutcome::Skipped => {
			eprintln!(
				"{} {} exists, skipped",
				"warning:".yellow().bold(),
				dir.join(format!("{name}.vue")).display()
			);
		}
	}
	Ok(())
}

fn confirm_overwrite(path: &Path) -> bool {
	print!("File {} exists. Overwrite [y/N]? ", path.display());
	let _ = std::io::stdout().flush();
	let mut line = String::new();
	match std::io::stdin().read_line(&mut line) {
		Ok(_) => line.trim().eq_ignore_ascii_case("y"),
		Err(_) => false,
	}
}
