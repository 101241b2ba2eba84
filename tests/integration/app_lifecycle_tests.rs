/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use tokio_test;
use psalter::app_controller::{Controller, TYPESET_LOG_FILE};
use psalter::errors::TypesetError;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config().output.body_file, "body.tex");
    Ok(())
}

/// Test that build writes the body even when companion files are missing
#[test]
fn test_build_withoutMainDocument_shouldWriteBodyThenFail() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    let controller = Controller::with_config(common::test_config(temp_dir.path()))?;
    let project = temp_dir.path().join("p.csv");
    controller.assemble(&["psalms/ps2.txt".to_string()], &project, false)?;

    let result = tokio_test::block_on(async { controller.build(&project).await });

    let error = result.expect_err("build should fail without main.tex");
    assert!(matches!(
        error.downcast_ref::<TypesetError>(),
        Some(TypesetError::MissingResources(_))
    ));
    assert!(temp_dir.path().join("body.tex").exists());
    Ok(())
}

/// Test a full build with a stand-in engine
#[cfg(unix)]
#[tokio::test]
async fn test_build_withStandInEngine_shouldProduceArtifact() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    common::create_test_file(temp_dir.path(), "main.tex", "\\input{body}\n")?;

    let mut config = common::test_config(temp_dir.path());
    config.typesetting.engine = "sh".to_string();
    config.typesetting.args = vec!["-c".to_string(), "cp body.tex main.pdf".to_string()];
    let controller = Controller::with_config(config)?;

    let project = temp_dir.path().join("p.csv");
    controller.assemble(&["hymns/te_deum.txt".to_string()], &project, false)?;

    let report = controller.build(&project).await?;

    let artifact = std::fs::read_to_string(&report.artifact)?;
    assert!(artifact.contains(r"\psHymnTitle{Te Deum}{赞主曲}"));
    Ok(())
}

/// Test that a failed engine run leaves its log next to the main document
#[cfg(unix)]
#[tokio::test]
async fn test_build_withFailingEngine_shouldWriteTypesetLog() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    common::create_test_file(temp_dir.path(), "main.tex", "")?;

    let mut config = common::test_config(temp_dir.path());
    config.typesetting.engine = "sh".to_string();
    config.typesetting.args = vec!["-c".to_string(), "echo '! LaTeX Error: File not found.'; exit 1".to_string()];
    let controller = Controller::with_config(config)?;

    let project = temp_dir.path().join("p.csv");
    controller.assemble(&["psalms/ps10.txt".to_string()], &project, false)?;

    assert!(controller.build(&project).await.is_err());

    let log = std::fs::read_to_string(temp_dir.path().join(TYPESET_LOG_FILE))?;
    assert!(log.contains("LaTeX Error"));
    assert!(log.contains("status 1"));
    Ok(())
}
