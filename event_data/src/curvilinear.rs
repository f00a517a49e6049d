//! Curvilinear track parameters: local parameters on the plane through the
//! track position whose normal is the track direction.
//!
//! # Charge policy
//! The constructor set depends on the policy type:
//!
//! ```
//! use event_data::{CurvilinearTrackParameters, NeutralCurvilinearParameters, Vector3};
//!
//! let charged = CurvilinearTrackParameters::new(None, Vector3::zeros(), Vector3::z(), -1.0);
//! let neutral = NeutralCurvilinearParameters::new(None, Vector3::zeros(), Vector3::z());
//! # let _ = (charged, neutral);
//! ```
//!
//! A neutral state never takes a charge:
//!
//! ```compile_fail
//! use event_data::{NeutralCurvilinearParameters, Vector3};
//!
//! let _ = NeutralCurvilinearParameters::new(None, Vector3::zeros(), Vector3::z(), 1.0);
//! ```
//!
//! and a charged state always needs one:
//!
//! ```compile_fail
//! use event_data::{CurvilinearTrackParameters, Vector3};
//!
//! let _ = CurvilinearTrackParameters::new(None, Vector3::zeros(), Vector3::z());
//! ```
//!
//! # In-place updates
//! Only non-local parameters can be set; the local coordinates define the
//! frame itself:
//!
//! ```compile_fail
//! use event_data::{CurvilinearTrackParameters, Loc0, Vector3};
//!
//! let mut pars = CurvilinearTrackParameters::new(None, Vector3::zeros(), Vector3::z(), 1.0);
//! pars.set::<Loc0>(1.0);
//! ```
//!
//! # Surface cache
//! [`CurvilinearParameters::associated_surface`] builds a new plane on every
//! call and stores it in the state. Cloning drops the cached plane, moving
//! carries it along.

use crate::{
    charge::{ChargePolicy, ChargedPolicy, NeutralPolicy},
    config::TransformConfig,
    parameter_set::ParameterSet,
    track_parameters::{SingleTrackParameters, TrackParameters},
    transform::{global_to_curvilinear, parameters_to_direction},
    types::{CovMatrix, NonLocalParameter, Parameter, Vector3},
};
use geometry::{PlaneSurface, Surface};
use std::fmt;

/// Charged curvilinear parameters
pub type CurvilinearTrackParameters = CurvilinearParameters<ChargedPolicy>;

/// Neutral curvilinear parameters
pub type NeutralCurvilinearParameters = CurvilinearParameters<NeutralPolicy>;

#[derive(Debug)]
pub struct CurvilinearParameters<C: ChargePolicy> {
    base: SingleTrackParameters<C>,
    /// Last surface handed out by `associated_surface`
    surface: Option<Box<PlaneSurface>>,
}

impl CurvilinearParameters<ChargedPolicy> {
    pub fn new(
        covariance: Option<CovMatrix>,
        position: Vector3,
        momentum: Vector3,
        charge: f64,
    ) -> Self {
        Self::with_config(covariance, position, momentum, charge, &TransformConfig::default())
    }

    pub fn with_config(
        covariance: Option<CovMatrix>,
        position: Vector3,
        momentum: Vector3,
        charge: f64,
        config: &TransformConfig,
    ) -> Self {
        let values = global_to_curvilinear(&position, &momentum, charge, config);
        Self::from_base(SingleTrackParameters::new(
            ChargedPolicy::new(charge),
            covariance,
            values,
            position,
            momentum,
        ))
    }
}

impl CurvilinearParameters<NeutralPolicy> {
    pub fn new(covariance: Option<CovMatrix>, position: Vector3, momentum: Vector3) -> Self {
        Self::with_config(covariance, position, momentum, &TransformConfig::default())
    }

    pub fn with_config(
        covariance: Option<CovMatrix>,
        position: Vector3,
        momentum: Vector3,
        config: &TransformConfig,
    ) -> Self {
        let values = global_to_curvilinear(&position, &momentum, 0.0, config);
        Self::from_base(SingleTrackParameters::new(
            NeutralPolicy,
            covariance,
            values,
            position,
            momentum,
        ))
    }
}

impl<C: ChargePolicy> CurvilinearParameters<C> {
    fn from_base(base: SingleTrackParameters<C>) -> Self {
        Self {
            base,
            surface: None,
        }
    }

    /// Change one non-local parameter and recompute the global momentum.
    ///
    /// The global position is unchanged. For charged tracks the charge sign
    /// follows the sign of the new q/p.
    ///
    /// Setting q/p to ±0 gives an infinite momentum along the current
    /// direction (components that are zero up to rounding stay zero); setting
    /// it to ±∞ gives a zero momentum. See
    /// [`parameters_to_global_momentum`](crate::transform::parameters_to_global_momentum).
    pub fn set<P: NonLocalParameter>(&mut self, value: f64) {
        tracing::trace!(parameter = P::NAME, value, "updating curvilinear parameter");
        self.base.set_parameter::<P>(value);
    }

    /// Rebuild the curvilinear plane at the current position and direction
    /// and return it.
    ///
    /// This allocates a new surface on every call and replaces the previous
    /// one; the returned reference lives until the next mutable use of `self`.
    pub fn associated_surface(&mut self) -> &PlaneSurface {
        let surface = self.build_surface();
        self.surface.insert(Box::new(surface))
    }

    /// Surface built by the last [`associated_surface`] call, if any.
    ///
    /// [`associated_surface`]: CurvilinearParameters::associated_surface
    pub fn cached_surface(&self) -> Option<&PlaneSurface> {
        self.surface.as_deref()
    }

    pub fn parameter_set(&self) -> &ParameterSet {
        self.base.parameter_set()
    }

    pub fn get<P: Parameter>(&self) -> f64 {
        self.base.get::<P>()
    }

    pub fn uncertainty<P: Parameter>(&self) -> Option<f64> {
        self.base.uncertainty::<P>()
    }

    fn build_surface(&self) -> PlaneSurface {
        tracing::trace!(position = ?self.base.position(), "building curvilinear surface");
        // Direction from the angles, so a zero momentum keeps the frame the
        // parameters were built in.
        let direction = parameters_to_direction(self.base.parameter_set().parameters());
        PlaneSurface::new(*self.base.position(), direction)
    }
}

/// Copies never carry the cached surface.
impl<C: ChargePolicy> Clone for CurvilinearParameters<C> {
    fn clone(&self) -> Self {
        Self::from_base(self.base.clone())
    }
}

/// Equality ignores the cached surface.
impl<C: ChargePolicy> PartialEq for CurvilinearParameters<C> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<C: ChargePolicy> fmt::Display for CurvilinearParameters<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurvilinearParameters {{ {} }}", self.base)
    }
}

impl<C: ChargePolicy> TrackParameters<C> for CurvilinearParameters<C> {
    fn base(&self) -> &SingleTrackParameters<C> {
        &self.base
    }

    fn reference_surface(&mut self) -> &dyn Surface {
        self.associated_surface()
    }

    fn clone_boxed(&self) -> Box<dyn TrackParameters<C>> {
        Box::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
