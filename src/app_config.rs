use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory holding one sub-directory of fragment files per category
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Directory images are imported into
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// External typesetting engine settings
    #[serde(default)]
    pub typesetting: TypesettingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output file settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Default name of the compiled document body
    #[serde(default = "default_body_file")]
    pub body_file: String,

    /// Default name of the CSV project file
    #[serde(default = "default_project_file")]
    pub project_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            body_file: default_body_file(),
            project_file: default_project_file(),
        }
    }
}

/// Typesetting engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TypesettingConfig {
    /// Engine executable (e.g., "xelatex", "lualatex", "latexmk")
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Arguments passed to the engine
    #[serde(default = "default_engine_args")]
    pub args: Vec<String>,

    /// Directory the engine runs in; the main document lives here
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,

    /// Main document that inputs the compiled body
    #[serde(default = "default_main_document")]
    pub main_document: String,

    /// File the engine is expected to produce, relative to the working directory
    #[serde(default = "default_artifact")]
    pub artifact: String,

    /// Companion files that must exist before the engine is started
    #[serde(default = "default_required_files")]
    pub required_files: Vec<String>,

    /// Timeout in seconds for one engine run
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TypesettingConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            args: default_engine_args(),
            working_dir: default_working_dir(),
            main_document: default_main_document(),
            artifact: default_artifact(),
            required_files: default_required_files(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TypesettingConfig {
    /// Path of the produced artifact
    pub fn artifact_path(&self) -> PathBuf {
        self.working_dir.join(&self.artifact)
    }

    /// Paths of every file that must exist before typesetting
    pub fn required_paths(&self) -> Vec<PathBuf> {
        let mut names: Vec<&str> = vec![self.main_document.as_str()];
        for name in &self.required_files {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }

        names.into_iter().map(|name| self.working_dir.join(name)).collect()
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

fn default_body_file() -> String {
    "body.tex".to_string()
}

fn default_project_file() -> String {
    "psalter_project.csv".to_string()
}

fn default_engine() -> String {
    "xelatex".to_string()
}

fn default_engine_args() -> Vec<String> {
    vec![
        "-interaction=nonstopmode".to_string(),
        "-halt-on-error".to_string(),
        "main.tex".to_string(),
    ]
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_main_document() -> String {
    "main.tex".to_string()
}

fn default_artifact() -> String {
    "main.pdf".to_string()
}

fn default_required_files() -> Vec<String> {
    vec!["main.tex".to_string()]
}

fn default_timeout_secs() -> u64 {
    300 // a cold LaTeX run with large fonts can take minutes
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.typesetting.engine.trim().is_empty() {
            return Err(anyhow!("Typesetting engine must not be empty"));
        }

        if self.typesetting.main_document.trim().is_empty() {
            return Err(anyhow!("Main document name must not be empty"));
        }

        if self.typesetting.timeout_secs == 0 {
            return Err(anyhow!("Typesetting timeout must be greater than zero"));
        }

        if !self.output.body_file.ends_with(".tex") {
            return Err(anyhow!(
                "Body file must have a .tex extension: {}",
                self.output.body_file
            ));
        }

        Ok(())
    }

    /// Path the compiled body is written to by default
    pub fn body_path(&self) -> PathBuf {
        self.typesetting.working_dir.join(&self.output.body_file)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            content_dir: default_content_dir(),
            images_dir: default_images_dir(),
            output: OutputConfig::default(),
            typesetting: TypesettingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
