use clap::{Parser, Subcommand};
use etchkit::{
    Config, ConditionEvaluator, EtchError, ExpressionEngine, load_conditions, load_context,
    load_location,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve brace expressions and evaluate display conditions from JSON files.
#[derive(Parser, Debug)]
#[command(name = "etchkit", version, about)]
struct Cli {
    /// Log resolution details (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Substitute every `{...}` expression in a template.
    Render {
        /// JSON object used as the resolution context.
        #[arg(long)]
        context: PathBuf,
        /// Engine settings file.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Template text given inline.
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        template: Option<String>,
        /// JSON document whose string values are templates (keys are kept as-is).
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Resolve a single expression, without surrounding braces.
    Expr {
        #[arg(long)]
        context: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        expression: String,
    },
    /// Decide whether content guarded by stored conditions is shown.
    Conditions {
        #[arg(long)]
        conditions: PathBuf,
        /// Request snapshot (post type, roles, url, ...).
        #[arg(long)]
        location: PathBuf,
    },
}

fn build_engine(config: Option<&Path>) -> Result<ExpressionEngine, EtchError> {
    let config = match config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    Ok(config.build_engine())
}

fn run(command: Command) -> Result<Value, EtchError> {
    match command {
        Command::Render {
            context,
            config,
            template,
            file,
        } => {
            let engine = build_engine(config.as_deref())?;
            let data = load_context(&context)?;
            let template = match (template, file) {
                (Some(text), _) => Value::String(text),
                (None, Some(path)) => serde_json::from_str(&fs::read_to_string(path)?)?,
                (None, None) => Value::Null,
            };
            Ok(engine.type_safe_replacement(&template, &data))
        }
        Command::Expr {
            context,
            config,
            expression,
        } => {
            let engine = build_engine(config.as_deref())?;
            let data = load_context(&context)?;
            Ok(engine.process_expression(&expression, &data))
        }
        Command::Conditions {
            conditions,
            location,
        } => {
            let stored = load_conditions(&conditions)?;
            let location = load_location(&location)?;
            let shown = ConditionEvaluator::new().evaluate_raw(&stored, &location);
            Ok(Value::Bool(shown))
        }
    }
}

fn main() -> Result<(), EtchError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = run(cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_help_describes_values_only() {
        let command = Cli::command();
        let render = command
            .find_subcommand("render")
            .expect("render subcommand");
        let file = render
            .get_arguments()
            .find(|arg| arg.get_id() == "file")
            .expect("file argument");
        let help = file.get_help().map(|h| h.to_string()).unwrap_or_default();
        assert!(help.contains("string values"));
        assert!(help.contains("keys are kept"));
    }

    #[test]
    fn test_render_file_keeps_keys() -> Result<(), EtchError> {
        let dir = tempfile::tempdir()?;
        let context = dir.path().join("context.json");
        let template = dir.path().join("template.json");
        fs::write(&context, r#"{ "post": { "title": "Hi" } }"#)?;
        fs::write(&template, r#"{ "{post.title}": "{post.title}" }"#)?;

        let output = run(Command::Render {
            context,
            config: None,
            template: None,
            file: Some(template),
        })?;
        assert_eq!(output, serde_json::json!({ "{post.title}": "Hi" }));
        Ok(())
    }
}
