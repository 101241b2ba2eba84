/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use psalter::file_utils::FileManager;
use crate::common;

/// Test file and directory existence checks
#[test]
fn test_file_exists_withDirectory_shouldReturnFalse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let file = common::create_test_file(temp_dir.path(), "a.txt", "x")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists(&file));
    Ok(())
}

/// Test that list_file_names filters by extension, case-insensitively
#[test]
fn test_list_file_names_shouldMatchExtensionIgnoringCase() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "one.txt", "")?;
    common::create_test_file(temp_dir.path(), "TWO.TXT", "")?;
    common::create_test_file(temp_dir.path(), "three.csv", "")?;

    let mut names = FileManager::list_file_names(temp_dir.path(), ".txt")?;
    names.sort();

    assert_eq!(names, vec!["TWO.TXT", "one.txt"]);
    Ok(())
}

/// Test the atomic write replacing existing content
#[test]
fn test_write_atomically_shouldReplaceContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested/out.tex");

    FileManager::write_atomically(&path, "first")?;
    FileManager::write_atomically(&path, "second")?;

    assert_eq!(FileManager::read_to_string(&path)?, "second");
    Ok(())
}

/// Test copying into a directory that does not exist yet
#[test]
fn test_copy_file_shouldCreateDestinationDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "cross.png", "png")?;
    let destination = temp_dir.path().join("images/cross.png");

    FileManager::copy_file(&source, &destination)?;

    assert_eq!(std::fs::read_to_string(&destination)?, "png");
    Ok(())
}

/// Test reporting of missing files
#[test]
fn test_missing_files_shouldReturnOnlyAbsentPaths() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let present = common::create_test_file(temp_dir.path(), "main.tex", "")?;
    let absent = temp_dir.path().join("fonts.tex");

    let missing = FileManager::missing_files(&[present, absent.clone()]);

    assert_eq!(missing, vec![absent]);
    Ok(())
}
