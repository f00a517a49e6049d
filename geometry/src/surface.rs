//! Reference surfaces: the `Surface` trait and the curvilinear `PlaneSurface`.
//!
//! ## Curvilinear frame
//! For a unit direction T the right-handed frame (U, V, T) is
//! U = ẑ × T / |ẑ × T|   if |T·ẑ| < CURVILINEAR_PROJ_TOLERANCE
//! U = x̂ × T / |x̂ × T|   otherwise
//! V = T × U

use nalgebra::{Matrix3, Vector3};
use std::fmt;

/// Above this |T·ẑ| the ẑ-axis cross product is too short to normalise
/// reliably and x̂ is used instead.
pub const CURVILINEAR_PROJ_TOLERANCE: f64 = 0.999_995;

/// Minimal surface contract consumed by track parameters.
pub trait Surface: fmt::Debug {
    /// Reference point of the surface in global coordinates.
    fn center(&self) -> &Vector3<f64>;

    /// Unit normal vector.
    fn normal(&self) -> Vector3<f64>;

    /// Project a global point onto the two local surface coordinates.
    fn global_to_local(&self, global: &Vector3<f64>) -> [f64; 2];

    /// Map local surface coordinates back to a global point on the surface.
    fn local_to_global(&self, local: &[f64; 2]) -> Vector3<f64>;
}

/// Build the curvilinear frame for `direction`, returned as the columns
/// `[U, V, T]` of a rotation matrix.
///
/// A zero (or non-finite) direction falls back to +ẑ.
pub fn curvilinear_frame(direction: &Vector3<f64>) -> Matrix3<f64> {
    let t = direction
        .try_normalize(f64::EPSILON)
        .filter(|t| t.iter().all(|c| c.is_finite()))
        .unwrap_or_else(Vector3::z);

    let u = if t.dot(&Vector3::z()).abs() < CURVILINEAR_PROJ_TOLERANCE {
        Vector3::z().cross(&t).normalize()
    } else {
        Vector3::x().cross(&t).normalize()
    };
    let v = t.cross(&u);

    Matrix3::from_columns(&[u, v, t])
}

// ---------------------------------------------------------------------------
// Plane surface
// ---------------------------------------------------------------------------

/// Plane through `center` with normal along a given direction.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSurface {
    center: Vector3<f64>,
    /// Columns U, V, T (T is the normal)
    rotation: Matrix3<f64>,
}

impl PlaneSurface {
    /// Plane through `center`, normal to `direction`. The in-plane axes
    /// follow the curvilinear convention, see [`curvilinear_frame`].
    pub fn new(center: Vector3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            center,
            rotation: curvilinear_frame(&direction),
        }
    }

    /// Local frame as columns `[U, V, T]`.
    pub fn frame(&self) -> &Matrix3<f64> {
        &self.rotation
    }
}

impl Surface for PlaneSurface {
    fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    fn normal(&self) -> Vector3<f64> {
        self.rotation.column(2).into_owned()
    }

    fn global_to_local(&self, global: &Vector3<f64>) -> [f64; 2] {
        let local = self.rotation.transpose() * (global - self.center);
        [local.x, local.y]
    }

    fn local_to_global(&self, local: &[f64; 2]) -> Vector3<f64> {
        self.center + self.rotation.column(0) * local[0] + self.rotation.column(1) * local[1]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_right_handed_orthonormal(frame: &Matrix3<f64>) {
        let product = frame.transpose() * frame;
        assert_abs_diff_eq!(product, Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(frame.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn frame_is_orthonormal_for_generic_direction() {
        let frame = curvilinear_frame(&Vector3::new(1.0, 2.0, 3.0));
        assert_right_handed_orthonormal(&frame);
        let t = Vector3::new(1.0, 2.0, 3.0).normalize();
        assert_abs_diff_eq!(frame.column(2).into_owned(), t, epsilon = 1e-12);
        // U lies in the transverse plane when T is not along ẑ
        assert_abs_diff_eq!(frame[(2, 0)], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn frame_near_beam_axis_uses_x_axis() {
        let frame = curvilinear_frame(&Vector3::new(0.0, 0.0, 1.0));
        assert_right_handed_orthonormal(&frame);
        // x̂ × ẑ = -ŷ
        assert_abs_diff_eq!(frame.column(0).into_owned(), -Vector3::y(), epsilon = 1e-12);
        assert_abs_diff_eq!(frame.column(1).into_owned(), Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn zero_direction_falls_back_to_z() {
        let frame = curvilinear_frame(&Vector3::zeros());
        assert_right_handed_orthonormal(&frame);
        assert_abs_diff_eq!(frame.column(2).into_owned(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn plane_local_round_trip() {
        let plane = PlaneSurface::new(Vector3::new(10.0, -5.0, 2.0), Vector3::new(0.0, 1.0, 1.0));
        assert_eq!(plane.global_to_local(plane.center()), [0.0, 0.0]);

        let global = plane.local_to_global(&[1.5, -0.25]);
        // Points built from local coordinates stay on the plane
        assert_abs_diff_eq!((global - plane.center()).dot(&plane.normal()), 0.0, epsilon = 1e-12);
        let local = plane.global_to_local(&global);
        assert_abs_diff_eq!(local[0], 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(local[1], -0.25, epsilon = 1e-12);
    }
}
