pub mod report;

use clap::Parser;
use refcheck::test_case::TestCase;
use refcheck::test_runner::TestOptions;
use std::ffi::OsString;
use std::path::PathBuf;

pub fn parse() -> Args {
    Args::parse_from(normalize_args(std::env::args_os()))
}

/// Compare the output of a program against reference files
#[derive(Parser, Debug)]
#[clap(bin_name = "refcheck")]
pub struct Args {
    /// Program to run
    #[arg(short, long, value_name = "EXECUTABLE")]
    pub program: PathBuf,

    /// Arguments passed to the program after the test input
    #[arg(short, long, value_name = "ARGS", allow_hyphen_values = true)]
    pub arguments: Option<String>,

    /// Print a line-by-line comparison table
    #[arg(short, long)]
    pub detailed: bool,

    /// Print the command before running it
    #[arg(short, long)]
    pub verbose: bool,

    /// Input passed to the program (single test)
    #[arg(short, long, value_name = "INPUT")]
    pub input_file: Option<String>,

    /// Output file to compare against, also accepted as `-vs FILE`, `-vs=FILE`
    /// or `-vsFILE` (single test)
    #[arg(long, value_name = "FILE")]
    pub compare_file: Option<PathBuf>,

    /// File with one `name:input:compare_file` test per line
    #[arg(short, long, value_name = "FILE")]
    pub test_file: Option<PathBuf>,

    /// Only run the first test with this name from the test file, ignored
    /// without one
    #[arg(short = 'n', long, value_name = "NAME")]
    pub test_name: Option<String>,
}

pub enum RunMode {
    Batch {
        test_file: PathBuf,
        test_name: Option<String>,
    },
    Single(TestCase),
    Incomplete,
}

impl Args {
    pub fn options(&self) -> TestOptions {
        TestOptions {
            detailed: self.detailed,
            verbose: self.verbose,
        }
    }

    /// The test file takes precedence over an explicit input and compare file
    pub fn run_mode(&self) -> RunMode {
        if let Some(test_file) = &self.test_file {
            RunMode::Batch {
                test_file: test_file.clone(),
                test_name: self.test_name.clone(),
            }
        } else if let (Some(input), Some(compare_file)) = (&self.input_file, &self.compare_file) {
            RunMode::Single(TestCase::new(None, input, compare_file))
        } else {
            RunMode::Incomplete
        }
    }
}

const LEGACY_COMPARE_FLAG: &str = "-vs";

/// Flags whose value is the next argument, which is never rewritten
const VALUE_FLAGS: [&str; 11] = [
    "-p",
    "--program",
    "-a",
    "--arguments",
    "-i",
    "--input-file",
    "--compare-file",
    "-t",
    "--test-file",
    "-n",
    "--test-name",
];

/// Rewrite the two-letter `-vs` flag, which clap would read as `-v -s`
///
/// Accepts `-vs FILE`, `-vs=FILE` and `-vsFILE`.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut output: Vec<OsString> = vec![];
    let mut is_value = false;

    for arg in args {
        let rewritten = match arg.to_str() {
            Some(s) if !is_value => rewrite_compare_flag(s),
            _ => None,
        };

        is_value = match (&rewritten, arg.to_str()) {
            (Some(flag), _) => flag == "--compare-file",
            (None, Some(s)) if !is_value => VALUE_FLAGS.contains(&s),
            _ => false,
        };

        output.push(rewritten.map_or(arg, OsString::from));
    }

    output
}

fn rewrite_compare_flag(arg: &str) -> Option<String> {
    let value = arg.strip_prefix(LEGACY_COMPARE_FLAG)?;
    if value.is_empty() {
        return Some(String::from("--compare-file"));
    }

    let value = value.strip_prefix('=').unwrap_or(value);
    Some(format!("--compare-file={}", value))
}

// TESTS
