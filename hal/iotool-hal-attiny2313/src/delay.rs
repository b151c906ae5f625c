//! Busy-wait delays
//!
//! The clock the delays are calibrated for is fixed at build time. It
//! defaults to 1 MHz (internal 8 MHz RC oscillator with CKDIV8, the factory
//! fuse setting) and can be overridden by setting `IOTOOL_F_CPU` in the
//! build environment:
//!
//! ```text
//! IOTOOL_F_CPU=8000000 cargo build --release
//! ```
//!
//! A value that is not a non-zero decimal frequency fails the build.

use iotool_hal::delay::{loop_iterations, loop_iterations_ns, loop_iterations_us, parse_hz};
use iotool_hal::{BusyWait, NamedDelay};

pub use iotool_hal::delay::DEFAULT_F_CPU;

/// Clock frequency the delays of this build are calibrated for, in Hz
pub const F_CPU: u32 = match option_env!("IOTOOL_F_CPU") {
    Some(value) => match parse_hz(value) {
        Some(hz) => hz,
        None => panic!("IOTOOL_F_CPU must be a non-zero clock frequency in Hz"),
    },
    None => DEFAULT_F_CPU,
};

/// Spin-loop delay calibrated for `HZ`
///
/// Zero-sized. Blocks the core for the whole duration; only interrupt
/// handlers run in between.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusyDelay<const HZ: u32 = F_CPU>;

impl<const HZ: u32> BusyDelay<HZ> {
    /// Create a delay provider
    pub const fn new() -> Self {
        Self
    }
}

/// One chunk of the 4-cycle loop: `sbiw` (2) + taken `brne` (2)
#[cfg(target_arch = "avr")]
#[inline(always)]
fn spin_chunk(count: u16) {
    if count == 0 {
        return;
    }
    // SAFETY: touches only the loop counter register pair.
    unsafe {
        core::arch::asm!(
            "1: sbiw {n}, 1",
            "brne 1b",
            n = inout(reg_iw) count => _,
            options(nomem, nostack),
        );
    }
}

#[cfg(not(target_arch = "avr"))]
#[inline(always)]
fn spin_chunk(count: u16) {
    #[cfg(test)]
    tests::SPUN.with(|spun| spun.set(spun.get() + count as u64));
    for _ in 0..count {
        core::hint::spin_loop();
    }
}

impl<const HZ: u32> BusyWait for BusyDelay<HZ> {
    const F_CPU: u32 = HZ;

    #[inline(always)]
    fn spin(&mut self, iterations: u32) {
        let mut remaining = iterations;
        while remaining > 0 {
            let chunk = remaining.min(u16::MAX as u32) as u16;
            spin_chunk(chunk);
            remaining -= chunk as u32;
        }
    }
}

impl<const HZ: u32> embedded_hal::delay::DelayNs for BusyDelay<HZ> {
    fn delay_ns(&mut self, ns: u32) {
        self.spin(loop_iterations_ns(ns, HZ));
    }

    fn delay_us(&mut self, us: u32) {
        self.spin(loop_iterations_us(us, HZ));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.spin(loop_iterations(ms, HZ));
    }
}

/// Busy-wait for a named duration, with the count folded at compile time
macro_rules! named_delay {
    ($(#[$doc:meta])* $name:ident => $delay:expr) => {
        $(#[$doc])*
        #[inline(always)]
        pub fn $name() {
            BusyDelay::<F_CPU>::new().spin(const { loop_iterations($delay.millis(), F_CPU) });
        }
    };
}

named_delay!(
    /// Busy-wait 1 ms
    delay_1ms => NamedDelay::Ms1
);
named_delay!(
    /// Busy-wait 5 ms
    delay_5ms => NamedDelay::Ms5
);
named_delay!(
    /// Busy-wait 10 ms
    delay_10ms => NamedDelay::Ms10
);
named_delay!(
    /// Busy-wait 50 ms
    delay_50ms => NamedDelay::Ms50
);
named_delay!(
    /// Busy-wait 100 ms
    delay_100ms => NamedDelay::Ms100
);
named_delay!(
    /// Busy-wait 320 ms
    delay_320ms => NamedDelay::Ms320
);
named_delay!(
    /// Busy-wait 500 ms
    delay_500ms => NamedDelay::Ms500
);
named_delay!(
    /// Busy-wait 1 s
    delay_1s => NamedDelay::S1
);
