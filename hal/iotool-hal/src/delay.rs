//! Calibrated busy-wait arithmetic
//!
//! A busy-wait burns a fixed number of CPU cycles in a tight loop. The
//! number of loop iterations for a wall-clock duration depends only on the
//! assumed clock frequency, which is a build-time constant, so every named
//! delay collapses to a literal iteration count.

/// Clock frequency assumed when the build does not override it (1 MHz)
pub const DEFAULT_F_CPU: u32 = 1_000_000;

/// CPU cycles consumed by one iteration of the spin loop
///
/// On AVR the loop is `sbiw` (2 cycles) followed by a taken `brne`
/// (2 cycles).
pub const CYCLES_PER_LOOP: u32 = 4;

/// The fixed delays firmware may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NamedDelay {
    /// 1 ms
    Ms1,
    /// 5 ms
    Ms5,
    /// 10 ms
    Ms10,
    /// 50 ms
    Ms50,
    /// 100 ms
    Ms100,
    /// 320 ms
    Ms320,
    /// 500 ms
    Ms500,
    /// 1 s
    S1,
}

impl NamedDelay {
    /// Every named delay, shortest first
    pub const ALL: [NamedDelay; 8] = [
        NamedDelay::Ms1,
        NamedDelay::Ms5,
        NamedDelay::Ms10,
        NamedDelay::Ms50,
        NamedDelay::Ms100,
        NamedDelay::Ms320,
        NamedDelay::Ms500,
        NamedDelay::S1,
    ];

    /// Nominal duration in milliseconds
    pub const fn millis(self) -> u32 {
        match self {
            NamedDelay::Ms1 => 1,
            NamedDelay::Ms5 => 5,
            NamedDelay::Ms10 => 10,
            NamedDelay::Ms50 => 50,
            NamedDelay::Ms100 => 100,
            NamedDelay::Ms320 => 320,
            NamedDelay::Ms500 => 500,
            NamedDelay::S1 => 1000,
        }
    }
}

/// Saturating ceiling division of a cycle count into loop iterations
const fn cycles_to_iterations(cycles_times_unit: u64, unit: u64) -> u32 {
    let per_loop = unit * CYCLES_PER_LOOP as u64;
    let iterations = cycles_times_unit.div_ceil(per_loop);
    if iterations > u32::MAX as u64 {
        u32::MAX
    } else {
        iterations as u32
    }
}

/// Spin-loop iterations needed to wait `ms` milliseconds at `f_cpu` Hz
///
/// Rounds up, so a non-zero wait never collapses to zero iterations.
/// Saturates at `u32::MAX`.
pub const fn loop_iterations(ms: u32, f_cpu: u32) -> u32 {
    cycles_to_iterations(f_cpu as u64 * ms as u64, 1_000)
}

/// Spin-loop iterations needed to wait `us` microseconds at `f_cpu` Hz
pub const fn loop_iterations_us(us: u32, f_cpu: u32) -> u32 {
    cycles_to_iterations(f_cpu as u64 * us as u64, 1_000_000)
}

/// Spin-loop iterations needed to wait `ns` nanoseconds at `f_cpu` Hz
pub const fn loop_iterations_ns(ns: u32, f_cpu: u32) -> u32 {
    cycles_to_iterations(f_cpu as u64 * ns as u64, 1_000_000_000)
}

/// Parse a clock frequency in Hz at compile time
///
/// Accepts decimal digits with optional `_` separators and an optional
/// C-style `U`/`L` suffix (`"8000000UL"`). Returns `None` for anything
/// else, including zero and values that overflow `u32`.
pub const fn parse_hz(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();

    let mut end = bytes.len();
    while end > 0 && matches!(bytes[end - 1], b'U' | b'u' | b'L' | b'l') {
        end -= 1;
    }

    let mut value: u32 = 0;
    let mut digits = 0;
    let mut i = 0;
    while i < end {
        let c = bytes[i];
        i += 1;
        if c == b'_' {
            continue;
        }
        if !c.is_ascii_digit() {
            return None;
        }
        value = match value.checked_mul(10) {
            Some(v) => v,
            None => return None,
        };
        value = match value.checked_add((c - b'0') as u32) {
            Some(v) => v,
            None => return None,
        };
        digits += 1;
    }

    if digits == 0 || value == 0 {
        None
    } else {
        Some(value)
    }
}

/// Calibrated busy-wait
///
/// Implementors only provide the raw spin; the conversions from durations
/// to iteration counts are shared. There is no cancellation and nothing
/// else runs while spinning, except interrupt handlers.
pub trait BusyWait {
    /// Clock frequency the spin is calibrated against, in Hz
    const F_CPU: u32;

    /// Spin for `iterations` loop iterations of [`CYCLES_PER_LOOP`] cycles
    fn spin(&mut self, iterations: u32);

    /// Busy-wait for `ms` milliseconds
    #[inline(always)]
    fn wait_ms(&mut self, ms: u32) {
        self.spin(loop_iterations(ms, Self::F_CPU));
    }

    /// Busy-wait for one of the named durations
    #[inline(always)]
    fn wait(&mut self, delay: NamedDelay) {
        self.wait_ms(delay.millis());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Records how many iterations it was asked to spin
    struct CountingSpinner<const HZ: u32> {
        spun: u64,
    }

    impl<const HZ: u32> BusyWait for CountingSpinner<HZ> {
        const F_CPU: u32 = HZ;

        fn spin(&mut self, iterations: u32) {
            self.spun += iterations as u64;
        }
    }

    #[test]
    fn test_named_delay_millis() {
        let millis: [u32; 8] = NamedDelay::ALL.map(NamedDelay::millis);
        assert_eq!(millis, [1, 5, 10, 50, 100, 320, 500, 1000]);
    }

    #[test]
    fn test_loop_iterations_at_default_clock() {
        // 1 MHz: 1000 cycles per ms, 4 cycles per loop
        assert_eq!(loop_iterations(1, DEFAULT_F_CPU), 250);
        assert_eq!(loop_iterations(320, DEFAULT_F_CPU), 80_000);
        assert_eq!(loop_iterations(1000, DEFAULT_F_CPU), 250_000);
        assert_eq!(loop_iterations(0, DEFAULT_F_CPU), 0);
    }

    #[test]
    fn test_loop_iterations_rounds_up() {
        // 1 us at 1 MHz is a single cycle, still one iteration
        assert_eq!(loop_iterations_us(1, DEFAULT_F_CPU), 1);
        assert_eq!(loop_iterations_ns(1, DEFAULT_F_CPU), 1);
        // 1.2 MHz, 1 ms = 1200 cycles = 300 loops exactly
        assert_eq!(loop_iterations(1, 1_200_000), 300);
        // 1.1 MHz, 1 ms = 1100 cycles = 275 loops exactly
        assert_eq!(loop_iterations(1, 1_100_000), 275);
        // 1.000001 MHz rounds up
        assert_eq!(loop_iterations(1, 1_000_001), 251);
    }

    #[test]
    fn test_loop_iterations_saturates() {
        assert_eq!(loop_iterations(u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_parse_hz() {
        assert_eq!(parse_hz("1000000"), Some(1_000_000));
        assert_eq!(parse_hz("8000000UL"), Some(8_000_000));
        assert_eq!(parse_hz("1_200_000"), Some(1_200_000));
        assert_eq!(parse_hz("20000000ul"), Some(20_000_000));
        assert_eq!(parse_hz("4294967295"), Some(u32::MAX));

        assert_eq!(parse_hz(""), None);
        assert_eq!(parse_hz("UL"), None);
        assert_eq!(parse_hz("0"), None);
        assert_eq!(parse_hz("8MHz"), None);
        assert_eq!(parse_hz("-1"), None);
        assert_eq!(parse_hz("4294967296"), None);
    }

    #[test]
    fn test_parse_hz_in_const_context() {
        const HZ: u32 = match parse_hz("9600000") {
            Some(hz) => hz,
            None => DEFAULT_F_CPU,
        };
        assert_eq!(HZ, 9_600_000);
    }

    #[test]
    fn test_wait_uses_calibration() {
        let mut slow = CountingSpinner::<1_000_000> { spun: 0 };
        slow.wait(NamedDelay::Ms10);
        assert_eq!(slow.spun, 2_500);

        let mut fast = CountingSpinner::<8_000_000> { spun: 0 };
        fast.wait(NamedDelay::Ms10);
        assert_eq!(fast.spun, 20_000);
    }

    #[test]
    fn test_every_named_delay_spins() {
        let mut spinner = CountingSpinner::<DEFAULT_F_CPU> { spun: 0 };
        for delay in NamedDelay::ALL {
            let before = spinner.spun;
            spinner.wait(delay);
            assert_eq!(
                spinner.spun - before,
                loop_iterations(delay.millis(), DEFAULT_F_CPU) as u64
            );
        }
        // 1 + 5 + 10 + 50 + 100 + 320 + 500 + 1000 ms at 250 loops/ms
        assert_eq!(spinner.spun, 1986 * 250);
    }

    proptest! {
        #[test]
        fn prop_iterations_scale_with_clock(f_cpu in 4_000u32..100_000_000, ms in 0u32..=1000) {
            // Frequencies divisible by 4000 keep the count exact
            let f_cpu = f_cpu - f_cpu % 4_000;
            let single = loop_iterations(ms, f_cpu);
            let doubled = loop_iterations(ms, f_cpu * 2);
            prop_assert_eq!(doubled as u64, single as u64 * 2);
        }

        #[test]
        fn prop_named_durations_do_not_depend_on_clock(f_cpu in 1u32..=20_000_000) {
            // Same names, same nominal durations, whatever the build clock
            for delay in NamedDelay::ALL {
                let cycles = loop_iterations(delay.millis(), f_cpu) as u64 * CYCLES_PER_LOOP as u64;
                let wanted = f_cpu as u64 * delay.millis() as u64 / 1_000;
                prop_assert!(cycles >= wanted);
                prop_assert!(cycles < wanted + 2 * CYCLES_PER_LOOP as u64);
            }
        }
    }
}
