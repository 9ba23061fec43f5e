mod clock;
mod synthetic_clock;
mod system_clock;

pub use clock::Clock;
pub use synthetic_clock::SyntheticClock;
pub use system_clock::SystemClock;
