/*!
 * Tests for the external typesetting engine runner
 */

use anyhow::Result;
use psalter::app_config::TypesettingConfig;
use psalter::errors::TypesetError;
use psalter::typesetter::Typesetter;
use std::path::Path;
use crate::common;

fn config_in(dir: &Path, engine: &str, args: &[&str]) -> TypesettingConfig {
    TypesettingConfig {
        engine: engine.to_string(),
        args: args.iter().map(|arg| arg.to_string()).collect(),
        working_dir: dir.to_path_buf(),
        timeout_secs: 10,
        ..TypesettingConfig::default()
    }
}

/// Test that missing companion files stop the run before the engine starts
#[tokio::test]
async fn test_run_withMissingMainDocument_shouldFailBeforeSpawning() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let mut config = config_in(temp_dir.path(), "psalter-no-such-engine", &[]);
    config.required_files = vec!["fonts.tex".to_string()];

    let result = Typesetter::new(config).run().await;

    match result {
        Err(TypesetError::MissingResources(missing)) => {
            assert_eq!(missing.len(), 2);
            assert!(missing[0].ends_with("main.tex"));
            assert!(missing[1].ends_with("fonts.tex"));
        }
        other => panic!("Expected MissingResources, got {:?}", other),
    }
    Ok(())
}

/// Test that an engine that cannot be started is reported as a spawn failure
#[tokio::test]
async fn test_run_withUnknownEngine_shouldFailToSpawn() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "main.tex", "")?;
    let config = config_in(temp_dir.path(), "psalter-no-such-engine", &[]);

    let result = Typesetter::new(config).run().await;

    assert!(matches!(result, Err(TypesetError::Spawn(_))));
    Ok(())
}

/// Test that a non-zero exit carries its status and output
#[cfg(unix)]
#[tokio::test]
async fn test_run_withFailingEngine_shouldReportStatusAndLog() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "main.tex", "")?;
    let config = config_in(temp_dir.path(), "sh", &["-c", "echo '! Emergency stop.'; exit 3"]);

    let result = Typesetter::new(config).run().await;

    match result {
        Err(TypesetError::ProcessFailed { status, log }) => {
            assert_eq!(status, Some(3));
            assert!(log.contains("Emergency stop"));
        }
        other => panic!("Expected ProcessFailed, got {:?}", other),
    }
    Ok(())
}

/// Test that success without the artifact is still a failure
#[cfg(unix)]
#[tokio::test]
async fn test_run_withoutArtifact_shouldReportMissingArtifact() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "main.tex", "")?;
    let config = config_in(temp_dir.path(), "sh", &["-c", "echo done"]);

    let result = Typesetter::new(config).run().await;

    match result {
        Err(TypesetError::MissingArtifact { path, log }) => {
            assert!(path.ends_with("main.pdf"));
            assert!(log.contains("done"));
        }
        other => panic!("Expected MissingArtifact, got {:?}", other),
    }
    Ok(())
}

/// Test a successful run that produces the artifact
#[cfg(unix)]
#[tokio::test]
async fn test_run_withArtifactProduced_shouldReturnReport() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "main.tex", "")?;
    let config = config_in(temp_dir.path(), "sh", &["-c", "touch main.pdf"]);

    let report = Typesetter::new(config).run().await?;

    assert_eq!(report.artifact, temp_dir.path().join("main.pdf"));
    assert!(report.artifact.exists());
    Ok(())
}

/// Test the timeout
#[cfg(unix)]
#[tokio::test]
async fn test_run_withSlowEngine_shouldTimeOut() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "main.tex", "")?;
    let mut config = config_in(temp_dir.path(), "sleep", &["5"]);
    config.timeout_secs = 1;

    let result = Typesetter::new(config).run().await;

    assert!(matches!(result, Err(TypesetError::TimedOut { secs: 1 })));
    Ok(())
}
