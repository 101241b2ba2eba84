/*!
 * Integration tests for the library to body file workflow
 */

use anyhow::Result;
use psalter::app_controller::Controller;
use psalter::export::GENERATOR_LINE;
use crate::common;

/// Test assembling fragments and markers into a project and compiling it
#[test]
fn test_assemble_then_compile_shouldWriteBalancedBody() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    let controller = Controller::with_config(common::test_config(temp_dir.path()))?;
    let project = temp_dir.path().join("vespers.csv");

    let entries: Vec<String> = vec![
        "h1|Ad Vesperas|晚祷".to_string(),
        "psalms/ps109.txt".to_string(),
        "@singlecol".to_string(),
        "rubric|Deinde|然后".to_string(),
        "@singlecol".to_string(),
        "hymns/te_deum.txt".to_string(),
    ];
    let rows = controller.assemble(&entries, &project, false)?;
    assert_eq!(rows, 10);

    let body_path = controller
        .compile_project(&project, None, false)?
        .expect("body should be written");
    assert_eq!(body_path, temp_dir.path().join("body.tex"));

    let body = std::fs::read_to_string(&body_path)?;
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines[0], GENERATOR_LINE);
    assert_eq!(lines[1], r"\begin{paracol}{2}");
    assert_eq!(lines[2], r"\psHeaderOne{Ad Vesperas}{晚祷}");
    assert_eq!(lines[4], r"\psAntiphonNum{1}{Dixit Dominus}{上主对我主说}");
    assert!(lines.contains(&r"\psSingleRubric{然后}"));
    assert_eq!(lines.last().copied(), Some(r"\end{paracol}"));
    Ok(())
}

/// Test appending to an existing project keeps the earlier rows
#[test]
fn test_assemble_withAppend_shouldExtendProject() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    let controller = Controller::with_config(common::test_config(temp_dir.path()))?;
    let project = temp_dir.path().join("lauds.csv");

    controller.assemble(&["psalms/ps2.txt".to_string()], &project, false)?;
    let rows = controller.assemble(&["@pagebreak".to_string(), "psalms/ps10.txt".to_string()], &project, true)?;

    assert_eq!(rows, 3);
    assert_eq!(
        controller.outline(&project)?,
        vec![
            "[verse] Quare fremuerunt gen... | 列国为何骚动".to_string(),
            "[page break]".to_string(),
            "[verse] In Domino confido | 我投靠上主".to_string(),
        ]
    );
    Ok(())
}

/// Test that an existing body file is kept unless forced
#[test]
fn test_compile_project_withExistingBody_shouldRequireForce() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    let controller = Controller::with_config(common::test_config(temp_dir.path()))?;
    let project = temp_dir.path().join("p.csv");
    let body = common::create_test_file(temp_dir.path(), "custom.tex", "old")?;

    controller.assemble(&["psalms/ps2.txt".to_string()], &project, false)?;

    assert!(controller.compile_project(&project, Some(body.clone()), false)?.is_none());
    assert_eq!(std::fs::read_to_string(&body)?, "old");

    assert_eq!(controller.compile_project(&project, Some(body.clone()), true)?, Some(body.clone()));
    assert!(std::fs::read_to_string(&body)?.starts_with(GENERATOR_LINE));
    Ok(())
}

/// Test that a table of contents marker inside the project keeps brackets balanced
#[test]
fn test_compile_project_withTocStart_shouldBalanceBrackets() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_library(temp_dir.path())?;
    let controller = Controller::with_config(common::test_config(temp_dir.path()))?;
    let project = temp_dir.path().join("book.csv");

    let entries: Vec<String> = vec![
        "h1|Psalterium|圣咏集".to_string(),
        "@tocstart".to_string(),
        "psalms/ps2.txt".to_string(),
    ];
    controller.assemble(&entries, &project, false)?;
    let body_path = controller.compile_project(&project, None, true)?.unwrap();

    let body = std::fs::read_to_string(body_path)?;
    assert_eq!(body.matches(r"\begin{paracol}{2}").count(), 2);
    assert_eq!(body.matches(r"\end{paracol}").count(), 2);
    assert_eq!(body.matches(r"\psPrintToc").count(), 1);
    Ok(())
}
