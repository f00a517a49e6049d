//! Charge policies: the closed set {charged, neutral} selected by type.
//!
//! The policy is a type parameter of the track parameters, never a runtime
//! flag. Constructors that need a charge exist only for [`ChargedPolicy`].

use serde::{Deserialize, Serialize};
use std::fmt;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ChargedPolicy {}
    impl Sealed for super::NeutralPolicy {}
}

/// Behaviour shared by both charge policies.
pub trait ChargePolicy:
    sealed::Sealed + Clone + fmt::Debug + PartialEq + Send + Sync + 'static
{
    /// Signed charge in units of e (0 for neutral).
    fn charge(&self) -> f64;

    /// Keep the charge sign in step with a new q/p value.
    fn sync_with_qop(&mut self, qop: f64);
}

/// Charged particle: carries a signed charge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChargedPolicy {
    charge: f64,
}

impl ChargedPolicy {
    pub fn new(charge: f64) -> Self {
        Self { charge }
    }
}

impl ChargePolicy for ChargedPolicy {
    fn charge(&self) -> f64 {
        self.charge
    }

    fn sync_with_qop(&mut self, qop: f64) {
        self.charge = self.charge.abs().copysign(qop);
    }
}

/// Neutral particle: charge is always zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralPolicy;

impl ChargePolicy for NeutralPolicy {
    fn charge(&self) -> f64 {
        0.0
    }

    fn sync_with_qop(&mut self, _qop: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charged_sign_follows_qop() {
        let mut policy = ChargedPolicy::new(2.0);
        policy.sync_with_qop(-0.5);
        assert_eq!(policy.charge(), -2.0);
        policy.sync_with_qop(0.1);
        assert_eq!(policy.charge(), 2.0);
    }

    #[test]
    fn neutral_is_always_zero() {
        let mut policy = NeutralPolicy;
        policy.sync_with_qop(-1.0);
        assert_eq!(policy.charge(), 0.0);
    }
}
