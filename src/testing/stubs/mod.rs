pub mod scripted_clock;

pub use scripted_clock::ScriptedClock;
