pub mod clock;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod logging;
pub mod profiling;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
