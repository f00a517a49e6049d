//! Global ↔ curvilinear coordinate transforms.
//!
//! # Curvilinear parameters
//! p = [loc0, loc1, φ, θ, q/|p|]ᵀ
//!
//! The frame origin is the track position itself, so loc0 = loc1 = 0 by
//! construction and the global position cannot be recovered from the
//! parameters alone: the inverse transform takes it as auxiliary input.
//!
//! ## Angles
//! φ = atan2(p_y, p_x)
//! θ = atan2(√(p_x² + p_y²), p_z)
//!
//! ## Inverse
//! |p| = |1 / qop|,  p = |p|·(sinθ cosφ, sinθ sinφ, cosθ)

use crate::config::TransformConfig;
use crate::types::{ParVector, Parameter, Phi, Qop, Theta, Vector3};

pub use geometry::surface::curvilinear_frame;

/// Encode a global state as curvilinear parameters.
///
/// `charge` with magnitude below `config.charge_tolerance` is treated as
/// neutral, giving q/p = 1/|p| (always non-negative).
///
/// # Degenerate momentum
/// - |p| = 0 or NaN: the direction falls back to
///   [`TransformConfig::fallback_direction`] (+ẑ by default, i.e. φ = θ = 0)
///   and q/p is ±∞ with the sign of the effective charge.
///   [`parameters_to_global_momentum`] maps ±∞ back to a zero vector.
/// - |p| = ∞: the direction is built from the signs of the infinite
///   components and q/p is ±0 with the sign of the effective charge.
///
/// No NaN is produced in either case.
pub fn global_to_curvilinear(
    _position: &Vector3,
    momentum: &Vector3,
    charge: f64,
    config: &TransformConfig,
) -> ParVector {
    let p = momentum.norm();
    let q = if charge.abs() < config.charge_tolerance {
        1.0
    } else {
        charge
    };

    let (direction, qop) = if p > 0.0 && p.is_finite() {
        (momentum / p, q / p)
    } else if p.is_infinite() {
        // A NaN component would have made the norm NaN, so every component
        // here is either finite or ±∞.
        tracing::warn!(?momentum, "infinite momentum, q/p set to zero");
        let direction = momentum
            .map(|c| if c.is_infinite() { c.signum() } else { 0.0 })
            .normalize();
        (direction, 0.0_f64.copysign(q))
    } else {
        tracing::warn!(?momentum, "zero or NaN momentum, using fallback direction");
        (config.fallback_direction(), f64::INFINITY.copysign(q))
    };

    let phi = direction.y.atan2(direction.x);
    let theta = direction.x.hypot(direction.y).atan2(direction.z);

    ParVector::new(0.0, 0.0, phi, theta, qop)
}

/// Unit direction encoded by φ and θ.
pub fn parameters_to_direction(pars: &ParVector) -> Vector3 {
    let phi = pars[Phi::INDEX];
    let theta = pars[Theta::INDEX];
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Global momentum encoded by φ, θ and q/p.
///
/// q/p = ±∞ gives the zero vector. q/p = ±0 encodes an infinite momentum:
/// direction components below `f64::EPSILON` in magnitude (the rounding
/// residue of sin/cos at multiples of π/2) are taken as exactly zero and
/// the rest become ±∞, so the result never contains NaN.
pub fn parameters_to_global_momentum(pars: &ParVector) -> Vector3 {
    let p = (1.0 / pars[Qop::INDEX]).abs();
    let direction = parameters_to_direction(pars);
    if p.is_infinite() {
        direction.map(|c| if c.abs() < f64::EPSILON { 0.0 } else { c * p })
    } else {
        direction * p
    }
}

/// Decode curvilinear parameters into (position, momentum).
///
/// The position is the curvilinear frame origin and is passed through.
pub fn curvilinear_to_global(pars: &ParVector, position: &Vector3) -> (Vector3, Vector3) {
    (*position, parameters_to_global_momentum(pars))
}
