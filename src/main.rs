// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use psalter::app_config::{self, Config};
use psalter::app_controller::{Controller, EditOperation};
use psalter::{Category, FormatKind};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List fragment files per category, in natural order
    Library {
        /// Only list this category (e.g., 'psalms', 'hymns')
        category: Option<String>,
    },

    /// Show the items of one fragment file
    Show {
        /// Category key
        category: String,
        /// Fragment file name (e.g., 'ps109.txt')
        file: String,
    },

    /// List every format kind
    Kinds,

    /// Build or extend a CSV project from entries
    Assemble {
        /// Entries: category/file.txt, @marker, image:<path>[:height] or kind|primary|secondary[|extra]
        #[arg(value_name = "ENTRY", required = true)]
        entries: Vec<String>,

        /// Project file to write (defaults to the configured project file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Append to an existing project instead of replacing it
        #[arg(short, long)]
        append: bool,
    },

    /// Edit a saved project in place
    Edit {
        /// CSV project file
        project: PathBuf,

        #[command(subcommand)]
        operation: EditCommand,
    },

    /// Print the outline of a project
    Outline {
        /// CSV project file
        project: PathBuf,
    },

    /// Compile a project into a LaTeX body file
    Compile {
        /// CSV project file
        project: PathBuf,

        /// Body file to write (defaults to the configured body file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of an existing body file
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Compile a project and run the typesetting engine
    Build {
        /// CSV project file
        project: PathBuf,
    },

    /// Generate shell completions for psalter
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Edits on a saved project; positions are as printed by `outline`
#[derive(Subcommand, Debug)]
enum EditCommand {
    /// Swap an entry with the one above it
    MoveUp { position: usize },
    /// Swap an entry with the one below it
    MoveDown { position: usize },
    /// Remove an entry
    Delete { position: usize },
    /// Replace an entry with a single item (marker, image or custom entry)
    Replace {
        position: usize,
        /// Replacement in the same syntax as `assemble` entries
        entry: String,
    },
    /// Remove every entry
    Clear,
}

impl From<EditCommand> for EditOperation {
    fn from(command: EditCommand) -> Self {
        match command {
            EditCommand::MoveUp { position } => EditOperation::MoveUp(position),
            EditCommand::MoveDown { position } => EditOperation::MoveDown(position),
            EditCommand::Delete { position } => EditOperation::Delete(position),
            EditCommand::Replace { position, entry } => EditOperation::Replace(position, entry),
            EditCommand::Clear => EditOperation::Clear,
        }
    }
}

/// psalter - assemble a psalter from text fragments and render it to LaTeX
#[derive(Parser, Debug)]
#[command(name = "psalter")]
#[command(version)]
#[command(about = "Assemble a psalter from text fragments and render it to LaTeX")]
#[command(long_about = "psalter assembles liturgical documents from a library of text fragments and
custom entries, and compiles them into a LaTeX body for a paracol-based main document.

EXAMPLES:
    psalter library psalms                                  # List psalm fragments
    psalter assemble psalms/ps109.txt @singlecol -o lauds.csv
    psalter assemble -a -o lauds.csv 'rubric|Deinde|然后|'  # Append a custom item
    psalter assemble -a -o lauds.csv image:cross.png:4cm    # Import an image
    psalter edit lauds.csv move-up 3                        # Reorder an entry
    psalter compile -f lauds.csv                            # Write body.tex
    psalter build lauds.csv                                 # Write body.tex and run xelatex

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start permissive; the configured level is applied once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "psalter", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

/// Load the configuration, creating a default file when none exists
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Command line overrides the file
    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Library { category } => {
            let category = category.map(|c| c.parse::<Category>()).transpose()?;
            controller.loader().ensure_layout()?;

            for (category, files) in controller.library(category)? {
                println!("{} ({})", category.display_name(), category.key());
                for file in files {
                    println!("    {}", file);
                }
            }
        }
        Commands::Show { category, file } => {
            let category: Category = category.parse()?;
            let group = controller.fragment(category, &file)?;

            println!("{} ({} items)", group.source_file(), group.len());
            for item in group.items() {
                println!("    {}", item.display_label());
            }
        }
        Commands::Kinds => {
            for kind in FormatKind::KNOWN.iter() {
                println!("{:<14} {}", kind.tag(), kind.description());
            }
        }
        Commands::Assemble { entries, output, append } => {
            let project = output
                .unwrap_or_else(|| PathBuf::from(&controller.config().output.project_file));
            controller.assemble(&entries, &project, append)?;
        }
        Commands::Edit { project, operation } => {
            let rows = controller.edit(&project, operation.into())?;
            info!("Project {:?} has {} item(s)", project, rows);
        }
        Commands::Outline { project } => {
            for (index, label) in controller.outline(&project)?.iter().enumerate() {
                println!("{:>4}  {}", index + 1, label);
            }
        }
        Commands::Compile { project, output, force_overwrite } => {
            if let Some(path) = controller.compile_project(&project, output, force_overwrite)? {
                info!("Success: {:?}", path);
                info!(
                    "Include it from the main document with \\input{{{}}}",
                    path.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
                );
            }
        }
        Commands::Build { project } => {
            match controller.build(&project).await {
                Ok(report) => info!("Success: {:?}", report.artifact),
                Err(e) => {
                    if let Some(log) = e.downcast_ref::<psalter::TypesetError>().and_then(|t| t.log()) {
                        eprintln!("{}", log);
                    }
                    return Err(e);
                }
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
