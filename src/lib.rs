pub mod formats;
pub mod test_case;
pub mod test_file;
pub mod test_result;
pub mod test_runner;
pub mod utils;
