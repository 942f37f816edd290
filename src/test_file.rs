//! Batch files describing one test case per line
//!
//! ```text
//! name:input:compare_file
//! ```
//!
//! Fields cannot contain `:`, there is no escaping.

use crate::test_case::TestCase;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const FIELD_SEPARATOR: char = ':';

#[derive(Debug, Error)]
pub enum TestFileError {
    #[error("failed to read test file '{}': {source}", path.display())]
    FailedToReadFile { path: PathBuf, source: io::Error },
    #[error("line {line_number} has {field_count} fields, expected 3 (name:input:compare_file)")]
    MalformedLine {
        line_number: usize,
        field_count: usize,
    },
    #[error("no test named '{0}'")]
    TestNotFound(String),
}

pub fn parse_test_file(
    path: &Path,
    test_name: Option<&str>,
) -> Result<Vec<TestCase>, TestFileError> {
    let content =
        fs::read_to_string(path).map_err(|source| TestFileError::FailedToReadFile {
            path: path.to_path_buf(),
            source,
        })?;

    parse_test_lines(&content, test_name)
}

/// Parse the content of a batch file
///
/// With a `test_name` only the first line with that name is returned, and
/// the lines after it are never looked at.
pub fn parse_test_lines(
    content: &str,
    test_name: Option<&str>,
) -> Result<Vec<TestCase>, TestFileError> {
    let mut test_cases = vec![];

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let test_case = parse_line(line, i + 1)?;
        debug!(line = i + 1, id = test_case.id(), "parsed test case");

        match test_name {
            Some(name) if test_case.name.as_deref() == Some(name) => {
                return Ok(vec![test_case]);
            }
            Some(_) => {}
            None => test_cases.push(test_case),
        }
    }

    match test_name {
        Some(name) => Err(TestFileError::TestNotFound(name.to_owned())),
        None => Ok(test_cases),
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<TestCase, TestFileError> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();

    match fields[..] {
        [name, input, compare_file] => Ok(TestCase::new(
            Some(name.to_owned()),
            input,
            compare_file,
        )),
        _ => Err(TestFileError::MalformedLine {
            line_number,
            field_count: fields.len(),
        }),
    }
}

// TESTS
