use jme_initializer::cli::{run, Args};
use log::debug;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

pub const CATALOG: &str = "tests/fixtures/libraries.json";
pub const VERSIONS: &str = "tests/fixtures/versions.json";

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let mut files1 = std::collections::HashSet::new();
    let mut files2 = std::collections::HashSet::new();

    // Follow symlinks so files reachable via symlinked folders are included in the comparison.
    for entry in WalkDir::new(dir1)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
    {
        let rel = entry.path().strip_prefix(dir1).unwrap().to_path_buf();
        files1.insert(rel);
    }
    for entry in WalkDir::new(dir2)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
    {
        let rel = entry.path().strip_prefix(dir2).unwrap().to_path_buf();
        files2.insert(rel);
    }

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);
    println!();

    let only_in_actual: Vec<_> = files1.difference(&files2).collect();
    let only_in_expected: Vec<_> = files2.difference(&files1).collect();

    if !only_in_actual.is_empty() {
        println!("Files only in ACTUAL output:");
        for file in &only_in_actual {
            println!("  + {:?}", file);
        }
        println!();
    }

    if !only_in_expected.is_empty() {
        println!("Files only in EXPECTED output:");
        for file in &only_in_expected {
            println!("  - {:?}", file);
        }
        println!();
    }

    let mut has_content_diff = false;
    for file in files1.intersection(&files2) {
        let path1 = dir1.join(file);
        let path2 = dir2.join(file);
        let content1 = fs::read(&path1).unwrap();
        let content2 = fs::read(&path2).unwrap();
        if content1 != content2 {
            if !has_content_diff {
                println!("Files with different content:");
                has_content_diff = true;
            }
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:");
            match String::from_utf8(content1.clone()) {
                Ok(s) => println!("{}", s),
                Err(_) => println!("  (binary content, {} bytes)", content1.len()),
            }
            println!("  --- Expected content:");
            match String::from_utf8(content2.clone()) {
                Ok(s) => println!("{}", s),
                Err(_) => println!("  (binary content, {} bytes)", content2.len()),
            }
        }
    }

    if !has_content_diff && only_in_actual.is_empty() && only_in_expected.is_empty() {
        println!("No differences found (this shouldn't happen if test failed!)");
    }
    println!("=== End of Comparison ===\n");
}

/// Runs the initializer CLI on `template` with the shared catalog and version
/// fixtures, compares the output to `expected_dir`, prints any differences,
/// and asserts that the directories are identical.
///
/// # Arguments
/// * `template` - Path to the template bundle.
/// * `expected_dir` - Path to the directory with expected output.
/// * `name` - Game name passed on the command line.
/// * `libraries` - Selected library keys.
pub fn run_and_assert(template: &str, expected_dir: &str, name: &str, libraries: &[&str]) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let args = Args {
        template_dir: template.into(),
        output_dir: tmp_dir.path().to_path_buf(),
        name: name.to_string(),
        package: String::new(),
        libraries: libraries.iter().map(|l| l.to_string()).collect(),
        profiles: Vec::new(),
        catalog: Some(CATALOG.into()),
        versions: Some(VERSIONS.into()),
        jme_version: None,
        force: true,
        verbose: 2,
        dry_run: false,
    };
    run(args).unwrap();
    let result = dir_diff::is_different(tmp_dir.path(), expected_dir);
    match result {
        Ok(different) => {
            if different {
                print_dir_diff(tmp_dir.path(), expected_dir.as_ref());
                panic!("Directories differ. See above for details.");
            }
        }
        Err(e) => {
            debug!("Error comparing directories: {e:?}");
        }
    }
    assert!(!dir_diff::is_different(tmp_dir.path(), expected_dir).unwrap());
}
