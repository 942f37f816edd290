use colored::Colorize;
use std::fmt::Display;
use std::path::Path;

pub const INCOMPLETE_MODE_MSG: &str =
    "Error: either --test-file or both --input-file and --compare-file must be given";

/// Print a problem with a file given on the command line
pub fn print_file_error<E>(source_file: &Path, error: &E)
where
    E: Display,
{
    eprintln!("{} {}: {}", "❌".red(), source_file.display(), error);
}

pub fn print_program_error(program: &Path, error: &which::Error) {
    eprintln!(
        "{} The program '{}' was not found or is not executable ({})",
        "❌".red(),
        program.display(),
        error
    );
}

pub fn print_incomplete_mode() {
    println!("{}", INCOMPLETE_MODE_MSG);
}
