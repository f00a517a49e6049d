//! `geometry` — Geometry identifiers and reference surfaces.
//!
//! # Module layout
//! - [`geometry_id`] — Packed 5-level hierarchical identifier
//! - [`surface`]     — Surface trait, curvilinear frame, plane surface

pub mod geometry_id;
pub mod surface;

pub use geometry_id::{GeometryId, GeometryIdError, GeometryLevel};
pub use surface::{curvilinear_frame, PlaneSurface, Surface, CURVILINEAR_PROJ_TOLERANCE};
