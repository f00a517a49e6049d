//! Single-track parameters: shared base state and the polymorphic trait.

use crate::{
    charge::ChargePolicy,
    parameter_set::ParameterSet,
    transform::parameters_to_global_momentum,
    types::{CovMatrix, NonLocalParameter, ParVector, Parameter, Qop, Theta, Vector3},
};
use geometry::Surface;
use std::fmt;

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Interface shared by every concrete track-parameter type.
///
/// Algorithms that only hold a `dyn TrackParameters<C>` can read the state,
/// query its reference surface and duplicate it via [`clone_boxed`].
///
/// [`clone_boxed`]: TrackParameters::clone_boxed
pub trait TrackParameters<C: ChargePolicy>: fmt::Debug + fmt::Display {
    /// Shared base state.
    fn base(&self) -> &SingleTrackParameters<C>;

    /// Reference surface of the local parameters. May rebuild the surface.
    fn reference_surface(&mut self) -> &dyn Surface;

    /// Heap copy of the concrete type behind the trait object.
    fn clone_boxed(&self) -> Box<dyn TrackParameters<C>>;

    fn parameters(&self) -> &ParVector {
        self.base().parameter_set().parameters()
    }

    fn covariance(&self) -> Option<&CovMatrix> {
        self.base().parameter_set().covariance()
    }

    fn position(&self) -> &Vector3 {
        self.base().position()
    }

    fn momentum(&self) -> &Vector3 {
        self.base().momentum()
    }

    fn charge(&self) -> f64 {
        self.base().charge()
    }

    /// Transverse momentum
    fn pt(&self) -> f64 {
        let p = self.momentum();
        p.x.hypot(p.y)
    }

    /// Pseudorapidity η = −ln tan(θ/2)
    fn eta(&self) -> f64 {
        let theta = self.base().get::<Theta>();
        -(theta / 2.0).tan().ln()
    }
}

// ---------------------------------------------------------------------------
// Base state
// ---------------------------------------------------------------------------

/// Local parameters together with the global state they encode.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleTrackParameters<C: ChargePolicy> {
    charge_policy: C,
    parameters: ParameterSet,
    position: Vector3,
    momentum: Vector3,
}

impl<C: ChargePolicy> SingleTrackParameters<C> {
    /// The charge sign is aligned with the sign of q/p.
    pub fn new(
        mut charge_policy: C,
        covariance: Option<CovMatrix>,
        values: ParVector,
        position: Vector3,
        momentum: Vector3,
    ) -> Self {
        charge_policy.sync_with_qop(values[Qop::INDEX]);
        Self {
            charge_policy,
            parameters: ParameterSet::new(covariance, values),
            position,
            momentum,
        }
    }

    pub fn parameter_set(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn position(&self) -> &Vector3 {
        &self.position
    }

    pub fn momentum(&self) -> &Vector3 {
        &self.momentum
    }

    pub fn charge(&self) -> f64 {
        self.charge_policy.charge()
    }

    pub fn charge_policy(&self) -> &C {
        &self.charge_policy
    }

    pub fn get<P: Parameter>(&self) -> f64 {
        self.parameters.get::<P>()
    }

    pub fn uncertainty<P: Parameter>(&self) -> Option<f64> {
        self.parameters.uncertainty::<P>()
    }

    /// Write one non-local parameter and recompute the global momentum.
    /// The position is kept.
    pub(crate) fn set_parameter<P: NonLocalParameter>(&mut self, value: f64) {
        self.parameters.set_parameter::<P>(value);
        self.update_global_momentum();
    }

    /// Recompute the momentum (and charge sign) from the full parameter vector.
    fn update_global_momentum(&mut self) {
        let pars = self.parameters.parameters();
        self.momentum = parameters_to_global_momentum(pars);
        self.charge_policy.sync_with_qop(pars[Qop::INDEX]);
    }
}

impl<C: ChargePolicy> fmt::Display for SingleTrackParameters<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.parameters.parameters();
        write!(
            f,
            "parameters: [{:.6}, {:.6}, {:.6}, {:.6}, {:.6}] position: ({:.4}, {:.4}, {:.4}) momentum: ({:.4}, {:.4}, {:.4}) charge: {}",
            p[0], p[1], p[2], p[3], p[4],
            self.position.x, self.position.y, self.position.z,
            self.momentum.x, self.momentum.y, self.momentum.z,
            self.charge(),
        )
    }
}
