mod cli;

use cli::report;
use cli::RunMode;
use refcheck::test_file;
use refcheck::test_runner::{self, RunResult};
use refcheck::utils::file;
use std::env;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

const EXIT_TEST_FAILED: u8 = 1;
const EXIT_INFRASTRUCTURE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let args = cli::parse();

    init_tracing(args.verbose);

    let test_cases = match args.run_mode() {
        RunMode::Batch {
            test_file,
            test_name,
        } => match test_file::parse_test_file(&test_file, test_name.as_deref()) {
            Ok(test_cases) => test_cases,
            Err(err) => {
                report::print_file_error(&test_file, &err);
                return ExitCode::from(EXIT_INFRASTRUCTURE_ERROR);
            }
        },
        RunMode::Single(test_case) => vec![test_case],
        RunMode::Incomplete => {
            report::print_incomplete_mode();
            return ExitCode::SUCCESS;
        }
    };

    let current_dir = env::current_dir().unwrap_or_default();
    let program = match file::find_executable_path(&args.program, &current_dir) {
        Ok(program) => program,
        Err(err) => {
            report::print_program_error(&args.program, &err);
            return ExitCode::from(EXIT_INFRASTRUCTURE_ERROR);
        }
    };
    info!(program = %program.display(), tests = test_cases.len(), "resolved program");

    let run_results = test_runner::run_test_cases(
        &program,
        args.arguments.as_deref(),
        &test_cases,
        &args.options(),
    );

    exit_code(&run_results)
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "refcheck=info"
    } else {
        "refcheck=warn"
    };
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(run_results: &[RunResult]) -> ExitCode {
    if run_results.iter().any(RunResult::is_error) {
        ExitCode::from(EXIT_INFRASTRUCTURE_ERROR)
    } else if run_results.iter().all(RunResult::is_success) {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_TEST_FAILED)
    }
}
