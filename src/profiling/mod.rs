mod stopwatch;
mod timed_block;

pub use stopwatch::Stopwatch;
pub use timed_block::{TimedBlock, cycles};
