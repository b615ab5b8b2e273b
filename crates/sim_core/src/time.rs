/// Wall-clock duration in whole milliseconds.
///
/// Balance values (attack cadences, skill durations, cooldowns) are
/// millisecond quantities; conversion to ticks happens once, when a config
/// value is resolved against a tick rate. At the default 60 Hz every value
/// used by the game divides evenly, so `to_ticks` is exact there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Millis(u32);

impl Millis {
    /// Create from whole milliseconds.
    pub const fn from_millis(millis: u32) -> Self {
        Self(millis)
    }

    /// Create from whole seconds.
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs * 1_000)
    }

    pub const fn as_millis(self) -> u32 {
        self.0
    }

    /// Convert to a tick count at the given tick rate, rounding down.
    pub const fn to_ticks(self, tick_hz: u32) -> u64 {
        (self.0 as u64 * tick_hz as u64) / 1_000
    }

    /// Subtract, clamping at zero.
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl core::ops::Add for Millis {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_secs() {
        assert_eq!(Millis::from_secs(3), Millis::from_millis(3_000));
    }

    #[test]
    fn to_ticks_exact_at_60hz() {
        assert_eq!(Millis::from_millis(200).to_ticks(60), 12);
        assert_eq!(Millis::from_millis(900).to_ticks(60), 54);
        assert_eq!(Millis::from_secs(1).to_ticks(60), 60);
        assert_eq!(Millis::from_secs(30).to_ticks(60), 1_800);
    }

    #[test]
    fn to_ticks_rounds_down() {
        // 25 ms at 60 Hz is 1.5 ticks
        assert_eq!(Millis::from_millis(25).to_ticks(60), 1);
    }

    #[test]
    fn saturating_sub_stops_at_zero() {
        let a = Millis::from_millis(200);
        let b = Millis::from_millis(500);
        assert_eq!(b.saturating_sub(a), Millis::from_millis(300));
        assert_eq!(a.saturating_sub(b), Millis::from_millis(0));
    }

    #[test]
    fn ordering() {
        assert!(Millis::from_millis(200) < Millis::from_secs(1));
        assert_eq!(
            Millis::from_millis(400).max(Millis::from_millis(200)),
            Millis::from_millis(400)
        );
    }
}
