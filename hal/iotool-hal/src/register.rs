//! 8-bit register access
//!
//! AVR I/O registers are 8 bits wide and every pin operation boils down to
//! setting, clearing, flipping or testing one bit of one register. The
//! traits here express exactly that and nothing more: no locking, no
//! validation, no return codes.

/// Mask with only `bit` set
///
/// `bit` must be in `0..8`.
#[inline(always)]
pub const fn bit_mask(bit: u8) -> u8 {
    1 << bit
}

/// A single 8-bit register
///
/// The provided bit operations are plain read-modify-write sequences. If an
/// interrupt handler writes the same register between the read and the
/// write, its change is lost; guarding against that is the caller's job.
pub trait Register8 {
    /// Read the current register value
    fn read(&self) -> u8;

    /// Overwrite the register value
    fn write(&self, value: u8);

    /// Read, transform and write back
    #[inline(always)]
    fn modify<F: FnOnce(u8) -> u8>(&self, f: F) {
        self.write(f(self.read()));
    }

    /// Set `bit` to 1, leaving the other bits unchanged
    #[inline(always)]
    fn set_bit(&self, bit: u8) {
        self.modify(|v| v | bit_mask(bit));
    }

    /// Clear `bit` to 0, leaving the other bits unchanged
    #[inline(always)]
    fn clear_bit(&self, bit: u8) {
        self.modify(|v| v & !bit_mask(bit));
    }

    /// Flip `bit`, leaving the other bits unchanged
    #[inline(always)]
    fn toggle_bit(&self, bit: u8) {
        self.modify(|v| v ^ bit_mask(bit));
    }

    /// Test whether `bit` is 1
    #[inline(always)]
    fn is_bit_set(&self, bit: u8) -> bool {
        self.read() & bit_mask(bit) != 0
    }
}

/// Byte-addressed register space
///
/// Implemented by the chip crate for the real data space and by simulated
/// register files for host tests. Addresses are data-space addresses.
pub trait RegisterFile {
    /// Read the register at `addr`
    fn read(&self, addr: u8) -> u8;

    /// Write the register at `addr`
    fn write(&self, addr: u8, value: u8);

    /// View one register of this file as a [`Register8`]
    #[inline(always)]
    fn register(&self, addr: u8) -> RegisterRef<'_, Self> {
        RegisterRef { file: self, addr }
    }
}

impl<T: RegisterFile + ?Sized> RegisterFile for &T {
    #[inline(always)]
    fn read(&self, addr: u8) -> u8 {
        (**self).read(addr)
    }

    #[inline(always)]
    fn write(&self, addr: u8, value: u8) {
        (**self).write(addr, value)
    }
}

/// One register inside a [`RegisterFile`]
pub struct RegisterRef<'a, F: ?Sized> {
    file: &'a F,
    addr: u8,
}

impl<F: RegisterFile + ?Sized> RegisterRef<'_, F> {
    /// Data-space address of this register
    pub fn addr(&self) -> u8 {
        self.addr
    }
}

impl<F: RegisterFile + ?Sized> Register8 for RegisterRef<'_, F> {
    #[inline(always)]
    fn read(&self) -> u8 {
        self.file.read(self.addr)
    }

    #[inline(always)]
    fn write(&self, value: u8) {
        self.file.write(self.addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use proptest::prelude::*;

    /// Mock register for testing
    struct MockRegister {
        value: Cell<u8>,
    }

    impl MockRegister {
        fn new(value: u8) -> Self {
            Self {
                value: Cell::new(value),
            }
        }
    }

    impl Register8 for MockRegister {
        fn read(&self) -> u8 {
            self.value.get()
        }

        fn write(&self, value: u8) {
            self.value.set(value);
        }
    }

    /// Mock register file with four registers at 0x20..0x24
    struct MockFile {
        regs: [Cell<u8>; 4],
    }

    impl RegisterFile for MockFile {
        fn read(&self, addr: u8) -> u8 {
            self.regs[(addr - 0x20) as usize].get()
        }

        fn write(&self, addr: u8, value: u8) {
            self.regs[(addr - 0x20) as usize].set(value);
        }
    }

    #[test]
    fn test_bit_mask() {
        assert_eq!(bit_mask(0), 0b0000_0001);
        assert_eq!(bit_mask(3), 0b0000_1000);
        assert_eq!(bit_mask(7), 0b1000_0000);
    }

    #[test]
    fn test_bit_operations() {
        let reg = MockRegister::new(0);

        reg.set_bit(3);
        assert_eq!(reg.read(), 0b0000_1000);
        assert!(reg.is_bit_set(3));

        reg.toggle_bit(0);
        assert_eq!(reg.read(), 0b0000_1001);

        reg.clear_bit(3);
        assert_eq!(reg.read(), 0b0000_0001);
        assert!(!reg.is_bit_set(3));

        reg.toggle_bit(0);
        assert_eq!(reg.read(), 0);
    }

    #[test]
    fn test_register_ref_targets_one_address() {
        let file = MockFile {
            regs: Default::default(),
        };

        let reg = file.register(0x22);
        assert_eq!(reg.addr(), 0x22);
        reg.set_bit(5);

        assert_eq!(file.regs[0].get(), 0);
        assert_eq!(file.regs[1].get(), 0);
        assert_eq!(file.regs[2].get(), 0b0010_0000);
        assert_eq!(file.regs[3].get(), 0);

        // Through a shared reference as well
        let by_ref = &file;
        by_ref.register(0x22).clear_bit(5);
        assert_eq!(file.regs[2].get(), 0);
    }

    proptest! {
        #[test]
        fn prop_set_bit_touches_only_that_bit(value in any::<u8>(), bit in 0u8..8) {
            let reg = MockRegister::new(value);
            reg.set_bit(bit);
            prop_assert_eq!(reg.read(), value | (1 << bit));
        }

        #[test]
        fn prop_clear_bit_touches_only_that_bit(value in any::<u8>(), bit in 0u8..8) {
            let reg = MockRegister::new(value);
            reg.clear_bit(bit);
            prop_assert_eq!(reg.read(), value & !(1 << bit));
        }

        #[test]
        fn prop_toggle_twice_restores(value in any::<u8>(), bit in 0u8..8) {
            let reg = MockRegister::new(value);
            reg.toggle_bit(bit);
            prop_assert_eq!(reg.read() ^ value, 1 << bit);
            reg.toggle_bit(bit);
            prop_assert_eq!(reg.read(), value);
        }
    }
}
