/// The signal raised when a [`GasMeter`] exceeds its limit.
///
/// It aborts the frame that owns the meter. Host operations propagate it with `?` until the
/// call/deploy boundary, which reports the full gas limit as used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("out of gas")]
pub struct OutOfGas;

/// Tracks the gas budget of one invocation frame and its cumulative consumption.
///
/// A limit of zero means unlimited. Once the consumption exceeds a non-zero limit the meter is
/// poisoned: every subsequent [`consume`](Self::consume) or [`check`](Self::check) fails with
/// [`OutOfGas`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasMeter {
    gas_limit: u64,
    gas_consumed: u64,
}

impl GasMeter {
    /// Creates a meter bounded by `gas_limit`.
    pub const fn new(gas_limit: u64) -> Self {
        Self { gas_limit, gas_consumed: 0 }
    }

    /// Creates a meter without a limit.
    pub const fn unlimited() -> Self {
        Self::new(0)
    }

    /// The current gas limit. Zero means unlimited.
    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// The total gas consumed so far.
    pub const fn gas_consumed(&self) -> u64 {
        self.gas_consumed
    }

    /// The gas left before the meter is poisoned, or `None` if the meter is unlimited.
    pub const fn remaining(&self) -> Option<u64> {
        if self.gas_limit == 0 {
            None
        } else {
            Some(self.gas_limit.saturating_sub(self.gas_consumed))
        }
    }

    /// Returns `true` if the consumption has exceeded the limit.
    pub const fn is_exhausted(&self) -> bool {
        self.gas_limit > 0 && self.gas_consumed > self.gas_limit
    }

    /// Fails with [`OutOfGas`] if the meter is poisoned.
    #[inline]
    pub const fn check(&self) -> Result<(), OutOfGas> {
        if self.is_exhausted() {
            Err(OutOfGas)
        } else {
            Ok(())
        }
    }

    /// Adds `gas` to the consumption and fails with [`OutOfGas`] if the limit is crossed.
    #[inline]
    pub fn consume(&mut self, gas: u64) -> Result<(), OutOfGas> {
        self.gas_consumed = self.gas_consumed.saturating_add(gas);
        self.check()
    }

    /// Overwrites the gas limit.
    ///
    /// The executor uses it to hand the meter a fresh limit before it resumes the same logical
    /// invocation.
    pub fn set_remaining_gas(&mut self, gas_limit: u64) {
        self.gas_limit = gas_limit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumption_accumulates() {
        let mut meter = GasMeter::new(100);
        for gas in [10, 20, 30, 40] {
            meter.consume(gas).unwrap();
        }
        assert_eq!(meter.gas_consumed(), 100);
        assert_eq!(meter.remaining(), Some(0));
        assert!(!meter.is_exhausted());
    }

    #[test]
    fn test_crossing_the_limit_poisons_the_meter() {
        let mut meter = GasMeter::new(50);
        meter.consume(40).unwrap();
        assert_eq!(meter.consume(11), Err(OutOfGas));
        assert!(meter.is_exhausted());

        // every later operation fails, even one that costs nothing
        assert_eq!(meter.consume(0), Err(OutOfGas));
        assert_eq!(meter.check(), Err(OutOfGas));
        assert_eq!(meter.gas_consumed(), 51);
    }

    #[test]
    fn test_unlimited_meter_never_runs_out() {
        let mut meter = GasMeter::unlimited();
        meter.consume(u64::MAX / 2).unwrap();
        meter.consume(u64::MAX / 2).unwrap();
        assert_eq!(meter.remaining(), None);
        assert!(meter.check().is_ok());
    }

    #[test]
    fn test_set_remaining_gas_overwrites_limit() {
        let mut meter = GasMeter::unlimited();
        meter.consume(30).unwrap();
        meter.set_remaining_gas(20);
        assert_eq!(meter.gas_limit(), 20);
        assert_eq!(meter.check(), Err(OutOfGas));

        meter.set_remaining_gas(100);
        assert!(meter.consume(70).is_ok());
        assert_eq!(meter.consume(1), Err(OutOfGas));
    }
}
