//! Aura lifetime and activation countdown, measured in waves
//!
//! # Tier Classification
//!
//! - **Tier 2: Validated Newtype** - both types wrap `i32` with validation rules,
//!   so persisted records go through the same checks as freshly produced auras.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Remaining lifetime of an aura in wave ticks (validated newtype).
///
/// # Semantics
///
/// - `> 0` - expires after that many active ticks
/// - `0` - instantaneous; removed on the next ledger tick
/// - `-1` - lasts for the rest of the run, never decremented
///
/// # Examples
///
/// ```
/// use mystery_encounters_domain::value_objects::AuraDuration;
///
/// let timed = AuraDuration::new(40).unwrap();
/// assert_eq!(timed.value(), 40);
///
/// assert!(AuraDuration::new(-1).unwrap().is_permanent());
/// assert!(AuraDuration::new(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AuraDuration(i32);

impl AuraDuration {
    /// Sentinel for auras that last the rest of the run.
    pub const PERMANENT: AuraDuration = AuraDuration(-1);

    /// Instantaneous aura, resolved immediately.
    pub const INSTANT: AuraDuration = AuraDuration(0);

    /// A finite duration; infallible since `u16` cannot go below zero.
    pub const fn waves(waves: u16) -> Self {
        Self(waves as i32)
    }

    /// Create a new `AuraDuration`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if `waves < -1`.
    pub fn new(waves: i32) -> Result<Self, DomainError> {
        if waves < Self::PERMANENT.0 {
            return Err(DomainError::validation(format!(
                "Aura duration must be >= -1 waves, got {}",
                waves
            )));
        }
        Ok(Self(waves))
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_permanent(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_expired(self) -> bool {
        self.0 == 0
    }

    /// One active tick elapsed. Permanent and already-expired durations are unchanged.
    pub(crate) fn decrement(&mut self) {
        if self.0 > 0 {
            self.0 -= 1;
        }
    }
}

impl fmt::Display for AuraDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            n if n < 0 => write!(f, "rest of run"),
            0 => write!(f, "instant"),
            1 => write!(f, "1 wave"),
            n => write!(f, "{} waves", n),
        }
    }
}

impl From<AuraDuration> for i32 {
    fn from(duration: AuraDuration) -> Self {
        duration.0
    }
}

impl TryFrom<i32> for AuraDuration {
    type Error = DomainError;

    fn try_from(waves: i32) -> Result<Self, Self::Error> {
        Self::new(waves)
    }
}

/// Waves left before an aura starts counting down and contributing (validated newtype).
///
/// # Examples
///
/// ```
/// use mystery_encounters_domain::value_objects::ActivationDelay;
///
/// assert!(ActivationDelay::new(0).unwrap().is_ready());
/// assert_eq!(ActivationDelay::new(5).unwrap().value(), 5);
/// assert!(ActivationDelay::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct ActivationDelay(i32);

impl ActivationDelay {
    pub const IMMEDIATE: ActivationDelay = ActivationDelay(0);

    /// Create a new `ActivationDelay`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if `waves` is negative.
    pub fn new(waves: i32) -> Result<Self, DomainError> {
        if waves < 0 {
            return Err(DomainError::validation(format!(
                "Activation delay must be >= 0 waves, got {}",
                waves
            )));
        }
        Ok(Self(waves))
    }

    /// Delay matching the lifetime of another aura, so the next one starts as it ends.
    ///
    /// Permanent durations never end; they produce no delay.
    pub fn after(duration: AuraDuration) -> Self {
        Self(duration.value().max(0))
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_ready(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn decrement(&mut self) {
        if self.0 > 0 {
            self.0 -= 1;
        }
    }
}

impl fmt::Display for ActivationDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} waves", self.0)
    }
}

impl From<ActivationDelay> for i32 {
    fn from(delay: ActivationDelay) -> Self {
        delay.0
    }
}

impl TryFrom<i32> for ActivationDelay {
    type Error = DomainError;

    fn try_from(waves: i32) -> Result<Self, Self::Error> {
        Self::new(waves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_rejects_below_permanent_sentinel() {
        let err = AuraDuration::new(-2).unwrap_err();
        assert!(err.to_string().contains("must be >= -1"));
    }

    #[test]
    fn duration_decrement_stops_at_zero_and_skips_permanent() {
        let mut timed = AuraDuration::new(1).unwrap();
        timed.decrement();
        assert!(timed.is_expired());
        timed.decrement();
        assert_eq!(timed.value(), 0);

        let mut permanent = AuraDuration::PERMANENT;
        permanent.decrement();
        assert_eq!(permanent, AuraDuration::PERMANENT);
    }

    #[test]
    fn const_waves_matches_validated_constructor() {
        assert_eq!(AuraDuration::waves(40), AuraDuration::new(40).unwrap());
        assert_eq!(AuraDuration::waves(0), AuraDuration::INSTANT);
    }

    #[test]
    fn duration_display() {
        assert_eq!(AuraDuration::PERMANENT.to_string(), "rest of run");
        assert_eq!(AuraDuration::INSTANT.to_string(), "instant");
        assert_eq!(AuraDuration::new(1).unwrap().to_string(), "1 wave");
        assert_eq!(AuraDuration::new(12).unwrap().to_string(), "12 waves");
    }

    #[test]
    fn delay_rejects_negative() {
        let err = ActivationDelay::new(-1).unwrap_err();
        assert!(err.to_string().contains("must be >= 0"));
    }

    #[test]
    fn delay_after_permanent_is_immediate() {
        assert_eq!(ActivationDelay::after(AuraDuration::PERMANENT), ActivationDelay::IMMEDIATE);
        assert_eq!(ActivationDelay::after(AuraDuration::new(8).unwrap()).value(), 8);
    }

    #[test]
    fn serde_goes_through_validation() {
        let parsed: AuraDuration = serde_json::from_str("-1").unwrap();
        assert!(parsed.is_permanent());
        assert!(serde_json::from_str::<AuraDuration>("-5").is_err());
        assert!(serde_json::from_str::<ActivationDelay>("-1").is_err());
    }
}
