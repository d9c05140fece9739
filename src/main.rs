//! Prompt Fill CLI
//!
//! Usage:
//!   prompt-fill <COMMAND> [OPTIONS]
//!
//! Commands:
//!   extract    List placeholder names
//!   fill       Substitute values into the template
//!   validate   Check values against the fields
//!   highlight  Show the template with placeholders marked
//!   options    List the choices for one field
//!   form       Show the form layout with initial values
//!   lint       Report structural problems in the template

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use prompt_fill::highlight::render_marked;
use prompt_fill::{
    FieldValue, Language, PresetRegistry, PromptError, PromptTemplate, ValueMap,
};

#[derive(Parser)]
#[command(name = "prompt-fill")]
#[command(about = "Fill and validate bracketed prompt templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Args)]
struct SourceArgs {
    /// Prompt file (TOML) with a template and field definitions
    #[arg(short, long, global = true)]
    prompt: Option<PathBuf>,

    /// Template text; replaces the template of --prompt (stdin if neither is given)
    #[arg(short, long, global = true)]
    template: Option<String>,

    /// Preset tables (TOML) overlaid on the built-in ones
    #[arg(long, global = true)]
    presets: Option<PathBuf>,

    /// Language for templates, labels and options
    #[arg(short, long, global = true, default_value = "en")]
    lang: Language,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct ValueArgs {
    /// Field value; repeat a name to build a list
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// JSON object of field values
    #[arg(long, value_name = "FILE")]
    values: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// List placeholder names in order
    Extract,
    /// Substitute values into the template
    Fill(ValueArgs),
    /// Check values against the fields (exit code 1 when invalid)
    Validate(ValueArgs),
    /// Show the template with placeholders marked
    Highlight,
    /// List the choices for one field
    Options {
        /// Field name
        field: String,
    },
    /// Show the form layout with initial values
    Form,
    /// Report structural problems in the template
    Lint,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.source.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<i32, PromptError> {
    let prompt = load_prompt(&cli.source)?;
    let json = cli.source.json;
    debug!(template = prompt.template(), "prompt ready");

    match cli.command {
        Command::Extract => {
            let names = prompt.placeholders();
            if json {
                print_json(&names)?;
            } else {
                for name in names {
                    println!("{}", name);
                }
            }
        }
        Command::Fill(args) => {
            let values = load_values(&args)?;
            let filled = prompt.fill(&values);
            if json {
                print_json(&filled)?;
            } else {
                println!("{}", filled);
            }
        }
        Command::Validate(args) => {
            let values = load_values(&args)?;
            let result = prompt.validate(&values);
            if json {
                print_json(&result)?;
            } else if result.is_valid {
                println!("valid");
            } else {
                for (name, error) in &result.errors {
                    println!("{}: {}", name, error);
                }
            }
            if !result.is_valid {
                return Ok(1);
            }
        }
        Command::Highlight => {
            let segments = prompt.highlight();
            if json {
                print_json(&segments)?;
            } else {
                println!("{}", render_marked(&segments));
            }
        }
        Command::Options { field } => {
            let options = prompt.options(&field);
            if json {
                print_json(&options)?;
            } else {
                for option in options {
                    println!("{}\t{}", option.value, option.label);
                }
            }
        }
        Command::Form => {
            let layout = prompt.form();
            let groups = layout.describe(prompt.language(), prompt.presets());
            let initial = layout.initial_values(prompt.language(), prompt.presets());
            if json {
                print_json(&serde_json::json!({ "groups": groups, "values": initial }))?;
            } else {
                for group in groups {
                    println!("[{}]", group.title);
                    for field in group.fields {
                        let marker = if field.required { "*" } else { "" };
                        let initial = initial
                            .text(&field.name)
                            .map(|v| v.into_owned())
                            .unwrap_or_default();
                        println!(
                            "  {}{} ({}) = {:?}",
                            field.label, marker, field.field_type, initial
                        );
                    }
                }
            }
        }
        Command::Lint => {
            let warnings = prompt.lint();
            if json {
                let items: Vec<_> = warnings
                    .iter()
                    .map(|w| {
                        serde_json::json!({
                            "category": w.category.to_string(),
                            "message": w.message,
                            "span": w.span.as_ref().map(|s| [s.start, s.end]),
                        })
                    })
                    .collect();
                print_json(&items)?;
            } else {
                let filename = cli
                    .source
                    .prompt
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "<template>".to_string());
                for warning in &warnings {
                    eprint!("{}", warning.report(prompt.template(), &filename));
                }
                if warnings.is_empty() {
                    println!("no warnings");
                }
            }
        }
    }

    Ok(0)
}

fn load_prompt(source: &SourceArgs) -> Result<PromptTemplate, PromptError> {
    let mut presets = PresetRegistry::default();
    if let Some(path) = &source.presets {
        presets = presets.merge(PresetRegistry::from_file(path)?);
    }

    let prompt = match (&source.prompt, &source.template) {
        (Some(path), None) => PromptTemplate::from_file(path)?,
        (Some(path), Some(text)) => {
            let file = PromptTemplate::from_file(path)?;
            PromptTemplate::new(text.as_str(), file.fields().to_vec())
        }
        (None, Some(text)) => PromptTemplate::new(text.as_str(), Vec::new()),
        (None, None) => {
            if io::stdin().is_terminal() {
                return Err(PromptError::MissingTemplate);
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| PromptError::io("<stdin>", e))?;
            PromptTemplate::new(buffer.trim_end_matches('\n'), Vec::new())
        }
    };

    Ok(prompt.with_language(source.lang).with_presets(presets))
}

fn load_values(args: &ValueArgs) -> Result<ValueMap, PromptError> {
    let mut values = match &args.values {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| PromptError::io(path, e))?;
            ValueMap::from_json(&content)?
        }
        None => ValueMap::new(),
    };

    // Repeated names from --set accumulate into a list
    let mut seen = Vec::new();
    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        let merged = match values.remove(name) {
            Some(FieldValue::Single(first)) if seen.contains(&name) => {
                FieldValue::Multi(vec![first, value.to_string()])
            }
            Some(FieldValue::Multi(mut list)) if seen.contains(&name) => {
                list.push(value.to_string());
                FieldValue::Multi(list)
            }
            _ => FieldValue::from(value),
        };
        values.set(name, merged);
        seen.push(name);
    }

    Ok(values)
}

fn parse_assignment(assignment: &str) -> Result<(&str, &str), PromptError> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => Err(PromptError::InvalidAssignment(assignment.to_string())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), PromptError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
