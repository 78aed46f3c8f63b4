mod batch;
mod error;
mod reader;
mod report;
pub use batch::*;
pub use error::*;
pub use reader::*;
pub use report::*;

/// Settings of one analysis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of worker threads. Zero is treated as one.
    pub threads: usize,
    /// Only files with this extension are read from the log directory.
    pub extension: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, usize::from),
            extension: String::from("txt"),
        }
    }
}
