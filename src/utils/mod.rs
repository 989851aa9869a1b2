pub mod progress_utils;
pub mod table;
pub mod test_utils;
