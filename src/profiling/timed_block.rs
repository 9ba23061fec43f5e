use tracing::debug;

/// Raw cycle counter: the time-stamp counter on x86_64, monotonic
/// nanoseconds elsewhere. Only differences between readings are meaningful.
#[inline]
pub fn cycles() -> u64 {
    #[cfg(target_arch = "x86_64")]
    {
        #[allow(unused_unsafe)]
        unsafe {
            core::arch::x86_64::_rdtsc()
        }
    }

    #[cfg(not(target_arch = "x86_64"))]
    {
        use std::sync::OnceLock;
        use std::time::Instant;

        static EPOCH: OnceLock<Instant> = OnceLock::new();
        EPOCH.get_or_init(Instant::now).elapsed().as_nanos() as u64
    }
}

/// Logs the cycles spent between construction and drop at `debug`.
///
/// Usually created through [`timed_block!`](crate::timed_block), which
/// fills in the call site.
#[derive(Debug)]
pub struct TimedBlock {
    tag: &'static str,
    file: &'static str,
    line: u32,
    start: u64,
}

impl TimedBlock {
    pub fn new(tag: &'static str, file: &'static str, line: u32) -> Self {
        Self {
            tag,
            file,
            line,
            start: cycles(),
        }
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Cycles elapsed so far.
    pub fn clocks(&self) -> u64 {
        cycles().wrapping_sub(self.start)
    }
}

impl Drop for TimedBlock {
    fn drop(&mut self) {
        debug!(
            tag = self.tag,
            file = self.file,
            line = self.line,
            clocks = self.clocks(),
            "timed block"
        );
    }
}

/// Times the rest of the enclosing block.
#[macro_export]
macro_rules! timed_block {
    ($tag:expr) => {
        let _timed_block = $crate::profiling::TimedBlock::new($tag, file!(), line!());
    };
}
