use crate::formats::table;
use crate::test_case::{self, RunError, TestCase};
use crate::test_result::TestResult;
use colored::Colorize;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default)]
pub struct TestOptions {
    pub detailed: bool,
    pub verbose: bool,
}

pub struct RunResult {
    pub test_case: TestCase,
    pub result: Result<TestResult, RunError>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        match &self.result {
            Ok(test_result) => test_result.is_success(),
            Err(_) => false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}

// RUN TEST CASES

/// Run test cases one after another, in order
///
/// Stops after the first error that would make every following test case
/// fail the same way.
pub fn run_test_cases(
    program: &Path,
    extra_arguments: Option<&str>,
    test_cases: &[TestCase],
    options: &TestOptions,
) -> Vec<RunResult> {
    let mut run_results = vec![];

    for test_case in test_cases {
        let result = run_test(program, extra_arguments, test_case, options);
        let is_fatal = matches!(&result, Err(err) if err.is_fatal());

        run_results.push(RunResult {
            test_case: test_case.clone(),
            result,
        });

        if is_fatal {
            break;
        }
    }

    if test_cases.len() > 1 {
        print_summary(&run_results);
    }

    run_results
}

pub fn run_test(
    program: &Path,
    extra_arguments: Option<&str>,
    test_case: &TestCase,
    options: &TestOptions,
) -> Result<TestResult, RunError> {
    let invocation = test_case.invocation(program, extra_arguments);

    if options.verbose {
        println!("{}", invocation);
    }

    let result = test_case::run(&invocation, &test_case.compare_file);

    match &result {
        Ok(test_result) => {
            print_verdict(test_case, test_result);
            if options.detailed {
                print_details(test_result);
            }
        }
        Err(err) => print_error(test_case, err),
    }

    result
}

// REPORTING

fn print_verdict(test_case: &TestCase, test_result: &TestResult) {
    let verdict = if test_result.is_success() {
        "✅ Pass".green()
    } else {
        "❌ Failed".red()
    };

    println!("Test {}: {}", test_case.id(), verdict);
}

fn print_details(test_result: &TestResult) {
    print!("{}", table::draw_table(&test_result.line_comparisons()));

    match test_result.exit_code {
        Some(0) => {}
        Some(code) => println!("Exit code: {}", code),
        None => println!("Exit code: none (terminated by signal)"),
    }

    println!();
}

fn print_error(test_case: &TestCase, err: &RunError) {
    println!("Test {}: {}", test_case.id(), "💥 Error".red().bold());
    eprintln!("{} {}", "❌".red(), err);
}

fn print_summary(run_results: &[RunResult]) {
    let number_of_passed_tests = run_results.iter().filter(|t| t.is_success()).count();
    let number_of_failed_tests = run_results.len() - number_of_passed_tests;

    let status = if number_of_failed_tests == 0 {
        "OK".green()
    } else {
        "FAIL".red()
    };

    println!();
    println!(
        "Test result: {} ({} passed, {} failed)",
        status, number_of_passed_tests, number_of_failed_tests,
    );
}
