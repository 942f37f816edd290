use itertools::{EitherOrBoth, Itertools};

pub struct TestResult {
    pub stdout: ValueComparison<Vec<String>>,
    pub exit_code: Option<i32>,
}

impl TestResult {
    pub fn new(got: Vec<String>, expected: Vec<String>, exit_code: Option<i32>) -> TestResult {
        TestResult {
            stdout: ValueComparison::compare(expected, got),
            exit_code,
        }
    }

    /// The exit code does not take part in the verdict, only the output does
    pub fn is_success(&self) -> bool {
        self.stdout.is_success()
    }

    pub fn line_comparisons(&self) -> Vec<LineComparison> {
        match &self.stdout {
            ValueComparison::Matches(lines) => pair_lines(lines, lines),
            ValueComparison::Diff { expected, got } => pair_lines(got, expected),
        }
    }
}

pub enum ValueComparison<T> {
    Matches(T),
    Diff { expected: T, got: T },
}

impl<T: PartialEq> ValueComparison<T> {
    pub fn compare(expected: T, got: T) -> ValueComparison<T> {
        if expected == got {
            Self::Matches(got)
        } else {
            Self::Diff { expected, got }
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            Self::Matches(_) => true,
            Self::Diff {
                expected: _,
                got: _,
            } => false,
        }
    }
}

/// One row of the detailed table
///
/// `None` marks a position that only exists in one of the two outputs.
#[derive(Debug, PartialEq, Eq)]
pub struct LineComparison {
    pub index: usize,
    pub actual: Option<String>,
    pub expected: Option<String>,
    pub matches: bool,
}

pub fn pair_lines(actual: &[String], expected: &[String]) -> Vec<LineComparison> {
    actual
        .iter()
        .zip_longest(expected.iter())
        .enumerate()
        .map(|(index, pair)| {
            let (actual, expected) = match pair {
                EitherOrBoth::Both(a, e) => (Some(a.to_owned()), Some(e.to_owned())),
                EitherOrBoth::Left(a) => (Some(a.to_owned()), None),
                EitherOrBoth::Right(e) => (None, Some(e.to_owned())),
            };

            LineComparison {
                index,
                matches: actual == expected,
                actual,
                expected,
            }
        })
        .collect()
}

/// Split text into lines with surrounding whitespace removed
pub fn trimmed_lines(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_owned()).collect()
}

// TESTS

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|x| x.to_string()).collect()
    }

    fn row(index: usize, actual: Option<&str>, expected: Option<&str>, matches: bool) -> LineComparison {
        LineComparison {
            index,
            actual: actual.map(String::from),
            expected: expected.map(String::from),
            matches,
        }
    }

    #[test]
    fn test_identical_output_passes() {
        let result = TestResult::new(lines(&["1", "2", "3"]), lines(&["1", "2", "3"]), Some(0));

        assert!(result.is_success());
    }

    #[test]
    fn test_different_line_fails() {
        let result = TestResult::new(lines(&["1", "2", "4"]), lines(&["1", "2", "3"]), Some(0));

        assert_eq!(result.is_success(), false);
        assert_eq!(
            result.line_comparisons()[2],
            row(2, Some("4"), Some("3"), false)
        );
    }

    #[test]
    fn test_extra_trailing_line_fails() {
        let result = TestResult::new(lines(&["a", "b"]), lines(&["a"]), Some(0));

        assert_eq!(result.is_success(), false);
        assert_eq!(
            result.line_comparisons(),
            vec![row(0, Some("a"), Some("a"), true), row(1, Some("b"), None, false)]
        );
    }

    #[test]
    fn test_missing_trailing_line_fails() {
        let result = TestResult::new(lines(&["a"]), lines(&["a", "b"]), Some(0));

        assert_eq!(result.is_success(), false);
        assert_eq!(
            result.line_comparisons()[1],
            row(1, None, Some("b"), false)
        );
    }

    #[test]
    fn test_order_matters() {
        let result = TestResult::new(lines(&["b", "a"]), lines(&["a", "b"]), Some(0));

        assert_eq!(result.is_success(), false);
    }

    #[test]
    fn test_exit_code_does_not_affect_verdict() {
        let result = TestResult::new(lines(&["ok"]), lines(&["ok"]), Some(3));

        assert!(result.is_success());
    }

    #[test]
    fn test_both_empty_passes() {
        let result = TestResult::new(vec![], vec![], Some(0));

        assert!(result.is_success());
        assert!(result.line_comparisons().is_empty());
    }

    #[test]
    fn test_trimmed_lines() {
        assert_eq!(
            trimmed_lines("  1 \n2\t\r\n\n3"),
            lines(&["1", "2", "", "3"])
        );
    }

    #[test]
    fn test_trimmed_lines_ignores_final_newline() {
        assert_eq!(trimmed_lines("1\n2\n3\n"), lines(&["1", "2", "3"]));
    }
}
