use clap::{Parser, Subcommand};
use recruitment_forms::{
    config::{get_config, init_config},
    telemetry, FormBuilderService, FormDefinition, FormProcessorService,
};
use serde_json::{json, Map, Value as JsonValue};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "recruitment-forms",
    about = "Author, check and apply job application forms",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a new form definition with the default mandatory fields
    New,
    /// Load a form definition and report configuration problems
    Check {
        /// Path to the serialized form definition
        form: PathBuf,
    },
    /// Validate applicant answers against a form definition
    Process {
        /// Path to the serialized form definition
        form: PathBuf,
        /// Path to a JSON object of answers keyed by field id
        answers: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    init_config()?;
    telemetry::init(get_config())?;
    let cli = Cli::parse();

    match cli.command {
        Command::New => {
            println!("{}", FormBuilderService::to_json_string(&FormDefinition::new())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { form } => {
            let def = load_form(&form)?;
            match FormBuilderService::publish(&def) {
                Ok(()) => {
                    println!("{}", json!({ "publishable": true, "errors": [] }));
                    Ok(ExitCode::SUCCESS)
                }
                Err(errors) => {
                    println!("{}", json!({ "publishable": false, "errors": errors }));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Process { form, answers } => {
            let def = load_form(&form)?;
            let raw: Map<String, JsonValue> = serde_json::from_str(&fs::read_to_string(&answers)?)?;
            match FormProcessorService::process(&def, &raw) {
                Ok(response) => {
                    println!("{}", json!({ "accepted": true, "response": response }));
                    Ok(ExitCode::SUCCESS)
                }
                Err(errors) => {
                    println!("{}", json!({ "accepted": false, "errors": errors }));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn load_form(path: &Path) -> anyhow::Result<FormDefinition> {
    info!("Loading form definition from {}", path.display());
    let raw = fs::read_to_string(path)?;
    Ok(FormBuilderService::from_json_str(&raw)?)
}
