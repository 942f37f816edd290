use std::path::{Path, PathBuf};

/// Find absolute path to the program under test
///
/// A compiler built next to the test files (`./a.out`, `build/cc`) is found
/// relative to `in_dir`, anything else is looked up in PATH. The `--program`
/// flag is resolved once, before the first test case, so a missing or
/// non-executable program stops the run instead of failing every test case.
pub fn find_executable_path<P>(program: &Path, in_dir: P) -> Result<PathBuf, which::Error>
where
    P: AsRef<Path>,
{
    let paths = in_dir.as_ref().as_os_str();

    // Search local directory
    let mut local_executables = which::which_in_global(program, Some(paths))?;
    if let Some(path) = local_executables.next() {
        return Ok(path);
    }

    // Search PATH
    which::which(program)
}
