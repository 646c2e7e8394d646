pub mod dialect;
pub mod processor;
pub mod rows;

pub use dialect::Dialect;
pub use processor::{output_path, read_headers, FileOutcome, FileProcessor};
pub use rows::{detect_target_columns, RowTransformer};
