use crate::test_result::{self, TestResult};
use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, warn};

const UNKNOWN_TEST_NAME: &str = "Unknown";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestCase {
    pub name: Option<String>,
    pub input: String,
    pub compare_file: PathBuf,
}

impl TestCase {
    pub fn new<P>(name: Option<String>, input: &str, compare_file: P) -> TestCase
    where
        P: Into<PathBuf>,
    {
        TestCase {
            name,
            input: input.to_owned(),
            compare_file: compare_file.into(),
        }
    }

    pub fn id(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_TEST_NAME)
    }

    /// The single argument the program under test receives
    pub fn argument(&self, extra_arguments: Option<&str>) -> String {
        match extra_arguments {
            Some(extra) if !extra.is_empty() => format!("{} {}", self.input, extra),
            _ => self.input.clone(),
        }
    }

    pub fn invocation<'a>(&self, program: &'a Path, extra_arguments: Option<&str>) -> Invocation<'a> {
        Invocation {
            program,
            argument: self.argument(extra_arguments),
        }
    }
}

pub struct Invocation<'a> {
    pub program: &'a Path,
    pub argument: String,
}

/// Shell-quoted, so the echoed line can be pasted into a shell as is
impl Display for Invocation<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let program = self.program.to_string_lossy();

        write!(f, "$ {} {}", quote(&program), quote(&self.argument))
    }
}

fn quote(arg: &str) -> Cow<'_, str> {
    // Only fails on NUL bytes, which no program argument can contain
    shlex::try_quote(arg).unwrap_or_else(|_| Cow::Owned(format!("{:?}", arg)))
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start program: {0}")]
    FailedToSpawn(#[source] io::Error),
    #[error("failed to read program output: {0}")]
    FailedToReadOutput(#[source] io::Error),
    #[error("program output is not valid UTF-8")]
    FailedToDecodeUtf8,
    #[error("failed to read compare file '{}': {source}", path.display())]
    FailedToReadCompareFile { path: PathBuf, source: io::Error },
}

impl RunError {
    /// Whether the remaining test cases can still run after this error
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::FailedToSpawn(_))
    }
}

pub fn run(invocation: &Invocation, compare_file: &Path) -> Result<TestResult, RunError> {
    let mut cmd = Command::new(invocation.program);
    cmd.arg(&invocation.argument);
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::inherit());

    let mut child = cmd.spawn().map_err(RunError::FailedToSpawn)?;
    debug!(pid = child.id(), "spawned {}", invocation);

    let stdout = match child.stdout.take() {
        Some(mut pipe) => read_pipe_to_string(&mut pipe),
        None => Ok(String::new()),
    };

    // Reap the child even when reading its output failed
    let exit_status = child.wait().map_err(RunError::FailedToReadOutput)?;
    let stdout = stdout?;

    let exit_code = exit_status.code();
    match exit_code {
        Some(0) => debug!("program exited successfully"),
        Some(code) => warn!(code, "program exited with a non-zero exit code"),
        None => warn!("program was terminated by a signal"),
    }

    let expected = fs::read_to_string(compare_file).map_err(|source| {
        RunError::FailedToReadCompareFile {
            path: compare_file.to_path_buf(),
            source,
        }
    })?;

    Ok(TestResult::new(
        test_result::trimmed_lines(&stdout),
        test_result::trimmed_lines(&expected),
        exit_code,
    ))
}

fn read_pipe_to_string<T>(pipe: &mut T) -> Result<String, RunError>
where
    T: Read,
{
    let mut buf: Vec<u8> = vec![];
    pipe.read_to_end(&mut buf)
        .map_err(RunError::FailedToReadOutput)?;
    String::from_utf8(buf).map_or(Err(RunError::FailedToDecodeUtf8), Ok)
}

// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    fn test_case() -> TestCase {
        TestCase::new(Some(String::from("t1")), "in1.txt", "cmp1.txt")
    }

    #[test]
    fn test_argument_without_extra_arguments() {
        assert_eq!(test_case().argument(None), "in1.txt");
    }

    #[test]
    fn test_argument_with_empty_extra_arguments() {
        assert_eq!(test_case().argument(Some("")), "in1.txt");
    }

    #[test]
    fn test_argument_joins_extra_arguments_with_space() {
        assert_eq!(test_case().argument(Some("-O2 --dump")), "in1.txt -O2 --dump");
    }

    #[test]
    fn test_id_falls_back_to_unknown() {
        let unnamed = TestCase::new(None, "in.txt", "cmp.txt");

        assert_eq!(test_case().id(), "t1");
        assert_eq!(unnamed.id(), "Unknown");
    }

    #[test]
    fn test_invocation_display() {
        let program = Path::new("./compiler");

        assert_eq!(
            test_case().invocation(program, None).to_string(),
            "$ ./compiler in1.txt"
        );
        assert_eq!(
            test_case().invocation(program, Some("-v")).to_string(),
            "$ ./compiler 'in1.txt -v'"
        );
    }

    fn echoed_words(input: &str, extra_arguments: Option<&str>) -> Vec<String> {
        let case = TestCase::new(None, input, "cmp.txt");
        let line = case.invocation(Path::new("prog"), extra_arguments).to_string();

        shlex::split(&line).unwrap()
    }

    #[test]
    fn test_invocation_display_escapes_quotes() {
        assert_eq!(echoed_words("it's", Some("x")), vec!["$", "prog", "it's x"]);
        assert_eq!(echoed_words("say \"hi\"", None), vec!["$", "prog", "say \"hi\""]);
    }

    #[test]
    fn test_invocation_display_quotes_shell_metacharacters() {
        for input in ["a;rm", "$HOME", "*.c", "a|b", "`id`", "a&&b", "x>y"] {
            let case = TestCase::new(None, input, "cmp.txt");
            let line = case.invocation(Path::new("prog"), None).to_string();

            assert_ne!(line, format!("$ prog {}", input));
            assert_eq!(shlex::split(&line).unwrap(), vec!["$", "prog", input]);
        }
    }

    #[test]
    fn test_invocation_display_quotes_program_path() {
        let case = TestCase::new(None, "in.txt", "cmp.txt");
        let line = case
            .invocation(Path::new("/tmp/my tools/cc"), None)
            .to_string();

        assert_eq!(
            shlex::split(&line).unwrap(),
            vec!["$", "/tmp/my tools/cc", "in.txt"]
        );
    }

    #[test]
    fn test_invocation_display_empty_argument() {
        assert_eq!(echoed_words("", None), vec!["$", "prog", ""]);
    }

    #[test]
    fn test_only_spawn_errors_are_fatal() {
        let spawn = RunError::FailedToSpawn(io::Error::from(io::ErrorKind::NotFound));
        let compare = RunError::FailedToReadCompareFile {
            path: PathBuf::from("cmp.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        assert!(spawn.is_fatal());
        assert_eq!(compare.is_fatal(), false);
    }
}
