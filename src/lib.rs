pub mod benchmark;
pub mod error;
pub mod subprocess;
pub mod tools;

pub use benchmark::{benchmark, BenchmarkRow};
pub use error::BenchmarkError;
pub use tools::CompressionTool;
