//! `event_data` — Track parameters in the curvilinear frame.
//!
//! # Module layout
//! - [`types`]            — Vector/matrix aliases, parameter markers and kinds
//! - [`charge`]           — Charged / neutral policies
//! - [`parameter_set`]    — Parameter vector + optional covariance
//! - [`transform`]        — Global ↔ curvilinear transforms
//! - [`track_parameters`] — `TrackParameters` trait and shared base state
//! - [`curvilinear`]      — `CurvilinearParameters<C>`
//! - [`config`]           — `TransformConfig`

pub mod charge;
pub mod config;
pub mod curvilinear;
pub mod parameter_set;
pub mod track_parameters;
pub mod transform;
pub mod types;

pub use charge::{ChargePolicy, ChargedPolicy, NeutralPolicy};
pub use config::TransformConfig;
pub use curvilinear::{CurvilinearParameters, CurvilinearTrackParameters, NeutralCurvilinearParameters};
pub use parameter_set::ParameterSet;
pub use track_parameters::{SingleTrackParameters, TrackParameters};
pub use types::{
    CovMatrix, Loc0, Loc1, NonLocalParameter, ParVector, Parameter, ParameterKind, Phi, Qop, Theta,
    Vector3,
};
