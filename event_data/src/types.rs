//! Fundamental types used across the crate.

use nalgebra::{Matrix5, Vector5};
use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// Vector / matrix aliases (f64 throughout)
// ---------------------------------------------------------------------------

/// Global 3-vector (position in mm, momentum in GeV).
pub type Vector3 = nalgebra::Vector3<f64>;

/// Bound parameter vector: [loc0, loc1, phi, theta, q/p]
pub type ParVector = Vector5<f64>;

/// 5×5 covariance of a [`ParVector`]
pub type CovMatrix = Matrix5<f64>;

/// Number of track parameters.
pub const N_PARAMETERS: usize = 5;

// ---------------------------------------------------------------------------
// Parameter kinds
// ---------------------------------------------------------------------------

/// How values written to a parameter are corrected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParameterKind {
    /// Position in the local surface frame; defines the frame itself.
    Local,
    /// Wraps into `[min, max)`
    Cyclic { min: f64, max: f64 },
    /// Clamped into `[min, max]`
    Bounded { min: f64, max: f64 },
    Unbound,
}

impl ParameterKind {
    /// Bring `value` into the valid range of this kind.
    pub fn correct(self, value: f64) -> f64 {
        match self {
            ParameterKind::Cyclic { min, max } => {
                let wrapped = min + (value - min).rem_euclid(max - min);
                // rem_euclid can round up to exactly max - min
                if wrapped >= max {
                    min
                } else {
                    wrapped
                }
            }
            ParameterKind::Bounded { min, max } => value.clamp(min, max),
            ParameterKind::Local | ParameterKind::Unbound => value,
        }
    }

    pub fn is_local(self) -> bool {
        matches!(self, ParameterKind::Local)
    }
}

// ---------------------------------------------------------------------------
// Parameter markers — resolved at compile time so index misuse cannot compile
// ---------------------------------------------------------------------------

/// A track parameter, identified by a zero-sized marker type.
pub trait Parameter {
    /// Position in [`ParVector`]
    const INDEX: usize;
    const KIND: ParameterKind;
    const NAME: &'static str;
}

/// Parameters that may be changed on a curvilinear state in place.
///
/// Local parameters are excluded: they define the curvilinear frame.
pub trait NonLocalParameter: Parameter {}

/// First local coordinate
#[derive(Clone, Copy, Debug)]
pub struct Loc0;

/// Second local coordinate
#[derive(Clone, Copy, Debug)]
pub struct Loc1;

/// Azimuthal angle of the momentum, in `[-π, π)`
#[derive(Clone, Copy, Debug)]
pub struct Phi;

/// Polar angle of the momentum, in `[0, π]`
#[derive(Clone, Copy, Debug)]
pub struct Theta;

/// Charge over momentum magnitude (1/p for neutral tracks)
#[derive(Clone, Copy, Debug)]
pub struct Qop;

impl Parameter for Loc0 {
    const INDEX: usize = 0;
    const KIND: ParameterKind = ParameterKind::Local;
    const NAME: &'static str = "loc0";
}

impl Parameter for Loc1 {
    const INDEX: usize = 1;
    const KIND: ParameterKind = ParameterKind::Local;
    const NAME: &'static str = "loc1";
}

impl Parameter for Phi {
    const INDEX: usize = 2;
    const KIND: ParameterKind = ParameterKind::Cyclic { min: -PI, max: PI };
    const NAME: &'static str = "phi";
}

impl Parameter for Theta {
    const INDEX: usize = 3;
    const KIND: ParameterKind = ParameterKind::Bounded { min: 0.0, max: PI };
    const NAME: &'static str = "theta";
}

impl Parameter for Qop {
    const INDEX: usize = 4;
    const KIND: ParameterKind = ParameterKind::Unbound;
    const NAME: &'static str = "qop";
}

impl NonLocalParameter for Phi {}
impl NonLocalParameter for Theta {}
impl NonLocalParameter for Qop {}

/// Parameter kinds in [`ParVector`] order.
pub const PARAMETER_KINDS: [ParameterKind; N_PARAMETERS] =
    [Loc0::KIND, Loc1::KIND, Phi::KIND, Theta::KIND, Qop::KIND];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn phi_wraps() {
        assert_abs_diff_eq!(Phi::KIND.correct(1.5 * PI), -0.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(Phi::KIND.correct(-1.5 * PI), 0.5 * PI, epsilon = 1e-12);
        assert_abs_diff_eq!(Phi::KIND.correct(PI), -PI, epsilon = 1e-12);
        assert_abs_diff_eq!(Phi::KIND.correct(0.3), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn phi_just_below_lower_edge_stays_in_range() {
        let below = -3.141_592_653_589_793_6_f64;
        assert!(below < -PI);
        let wrapped = Phi::KIND.correct(below);
        assert!((-PI..PI).contains(&wrapped), "{wrapped} outside [-π, π)");
    }

    #[test]
    fn theta_clamps() {
        assert_eq!(Theta::KIND.correct(4.0), PI);
        assert_eq!(Theta::KIND.correct(-0.1), 0.0);
        assert_eq!(Theta::KIND.correct(1.0), 1.0);
    }

    #[test]
    fn only_positions_are_local() {
        let local: Vec<bool> = PARAMETER_KINDS.iter().map(|k| k.is_local()).collect();
        assert_eq!(local, vec![true, true, false, false, false]);
        assert_eq!(Qop::KIND.correct(-123.0), -123.0);
    }
}
