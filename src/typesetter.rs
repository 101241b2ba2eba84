/*!
 * External typesetting engine.
 *
 * Runs the configured LaTeX engine on the main document once the body file
 * has been written. Required companion files are checked before the process
 * is started, the run is bounded by a timeout, and the captured output is
 * attached to every failure. The child process is killed if the returned
 * future is dropped, which is how callers cancel a run.
 */

use log::{debug, error, info};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::app_config::TypesettingConfig;
use crate::errors::TypesetError;
use crate::file_utils::FileManager;

/// Result of a successful engine run
#[derive(Debug, Clone)]
pub struct TypesetReport {
    /// The produced document
    pub artifact: PathBuf,
    /// Captured stdout followed by stderr
    pub log: String,
    /// Wall time of the run
    pub elapsed: Duration,
}

/// Runs the typesetting engine described by a `TypesettingConfig`
#[derive(Debug, Clone)]
pub struct Typesetter {
    config: TypesettingConfig,
}

impl Typesetter {
    pub fn new(config: TypesettingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TypesettingConfig {
        &self.config
    }

    /// Check that every required file exists; the error names all missing ones
    pub fn check_resources(&self) -> Result<(), TypesetError> {
        let missing = FileManager::missing_files(&self.config.required_paths());
        if missing.is_empty() {
            return Ok(());
        }

        let names: Vec<String> = missing
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        error!("Cannot typeset, missing: {}", names.join(", "));
        Err(TypesetError::MissingResources(names))
    }

    /// Run the engine once
    pub async fn run(&self) -> Result<TypesetReport, TypesetError> {
        self.check_resources()?;

        let start_time = Instant::now();
        debug!(
            "Running {} {} in {:?}",
            self.config.engine,
            self.config.args.join(" "),
            self.config.working_dir
        );

        let engine_future = Command::new(&self.config.engine)
            .args(&self.config.args)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = tokio::select! {
            result = engine_future => {
                result.map_err(|e| TypesetError::Spawn(format!("{}: {}", self.config.engine, e)))?
            },
            _ = tokio::time::sleep(timeout_duration) => {
                return Err(TypesetError::TimedOut { secs: self.config.timeout_secs });
            }
        };

        let log = Self::collect_log(&output.stdout, &output.stderr);

        if !output.status.success() {
            return Err(TypesetError::ProcessFailed {
                status: output.status.code(),
                log,
            });
        }

        let artifact = self.config.artifact_path();
        if !FileManager::file_exists(&artifact) {
            return Err(TypesetError::MissingArtifact {
                path: artifact.display().to_string(),
                log,
            });
        }

        let elapsed = start_time.elapsed();
        info!("Typeset {:?} in {:.1}s", artifact, elapsed.as_secs_f64());

        Ok(TypesetReport { artifact, log, elapsed })
    }

    fn collect_log(stdout: &[u8], stderr: &[u8]) -> String {
        let mut log = String::from_utf8_lossy(stdout).to_string();
        let stderr = String::from_utf8_lossy(stderr);
        if !stderr.trim().is_empty() {
            if !log.is_empty() && !log.ends_with('\n') {
                log.push('\n');
            }
            log.push_str(&stderr);
        }
        log
    }
}
