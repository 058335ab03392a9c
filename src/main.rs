use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use exckit::{init_logging, Config, EditScript, ExcDocument, ExcEditor, SettingsPersistence};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "exckit", version, about = "Drill and slot editing for Excellon drill data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an edit script and write the resulting document
    Run {
        /// Edit script (.json)
        script: PathBuf,

        /// Document to start from instead of an empty tool table
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Configuration file (.toml or .json)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output document; printed to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip failing commands instead of stopping
        #[arg(long)]
        keep_going: bool,

        /// Store the last used parameters back into the configuration file
        #[arg(long, requires = "config")]
        remember: bool,
    },
    /// Print the default configuration
    Defaults {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
    /// Print drill and slot counts per tool of a document
    Summary {
        document: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Toml,
    Json,
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            script,
            input,
            config,
            output,
            keep_going,
            remember,
        } => run(&script, input.as_deref(), config, output.as_deref(), keep_going, remember),
        Commands::Defaults { format } => {
            let config = Config::default();
            let text = match format {
                Format::Toml => config.to_toml_string()?,
                Format::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{text}");
            Ok(())
        }
        Commands::Summary { document } => summary(&document),
    }
}

fn run(
    script: &Path,
    input: Option<&Path>,
    config: Option<PathBuf>,
    output: Option<&Path>,
    keep_going: bool,
    remember: bool,
) -> Result<()> {
    info!("exckit {} (built {})", exckit::VERSION, exckit::BUILD_DATE);

    let mut settings = match config {
        Some(path) => Some(
            SettingsPersistence::load_or_default(path).context("Failed to load configuration")?,
        ),
        None => None,
    };
    let config = settings
        .as_ref()
        .map(|s| s.config().clone())
        .unwrap_or_default();

    let mut editor = ExcEditor::new(config).context("Invalid configuration")?;
    if let Some(path) = input {
        let doc = ExcDocument::load_from_file(path)
            .with_context(|| format!("Failed to load document {}", path.display()))?;
        editor.load_document(&doc)?;
    }

    let script = EditScript::load_from_file(script)?;
    let report = script.run(&mut editor, keep_going)?;
    info!(
        "{} commands applied, {} rejected",
        report.applied, report.rejected
    );

    let doc = editor.to_document()?;
    match output {
        Some(path) => doc
            .save_to_file(path)
            .with_context(|| format!("Failed to write document {}", path.display()))?,
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }

    if let (true, Some(settings)) = (remember, settings.as_mut()) {
        settings.replace(editor.config().clone())?;
        settings.save().context("Failed to save configuration")?;
    }
    Ok(())
}

fn summary(path: &Path) -> Result<()> {
    let doc = ExcDocument::load_from_file(path)
        .with_context(|| format!("Failed to load document {}", path.display()))?;
    println!("units: {}", doc.units);
    for tool in &doc.tools {
        println!(
            "T {:.*}  drills: {:4}  slots: {:4}",
            doc.decimals as usize,
            tool.diameter,
            tool.drills.len(),
            tool.slots.len()
        );
    }
    Ok(())
}
