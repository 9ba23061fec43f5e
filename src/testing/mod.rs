pub mod stubs;

pub use stubs::ScriptedClock;
