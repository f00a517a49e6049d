//! Parameter set: the 5 bound parameters plus an optional covariance.
//!
//! Every write goes through the parameter's [`ParameterKind`], so phi is
//! always wrapped into `[-π, π)` and theta clamped into `[0, π]`.

use crate::types::{CovMatrix, ParVector, Parameter, PARAMETER_KINDS};

#[derive(Clone, Debug, PartialEq)]
pub struct ParameterSet {
    values: ParVector,
    /// Exclusively owned; moved in at construction
    covariance: Option<CovMatrix>,
}

impl ParameterSet {
    pub fn new(covariance: Option<CovMatrix>, values: ParVector) -> Self {
        let values = ParVector::from_fn(|i, _| PARAMETER_KINDS[i].correct(values[i]));
        Self { values, covariance }
    }

    pub fn parameters(&self) -> &ParVector {
        &self.values
    }

    pub fn covariance(&self) -> Option<&CovMatrix> {
        self.covariance.as_ref()
    }

    pub fn get<P: Parameter>(&self) -> f64 {
        self.values[P::INDEX]
    }

    /// Write one parameter, corrected into its valid range.
    pub fn set_parameter<P: Parameter>(&mut self, value: f64) {
        self.values[P::INDEX] = P::KIND.correct(value);
    }

    /// Standard deviation of one parameter, if a covariance is present.
    pub fn uncertainty<P: Parameter>(&self) -> Option<f64> {
        self.covariance
            .as_ref()
            .map(|cov| cov[(P::INDEX, P::INDEX)].sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Phi, Qop, Theta};
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector5;
    use std::f64::consts::PI;

    #[test]
    fn set_applies_parameter_kind() {
        let mut set = ParameterSet::new(None, ParVector::new(0.0, 0.0, 0.1, 1.0, 0.5));
        set.set_parameter::<Phi>(2.0 * PI + 0.25);
        set.set_parameter::<Theta>(-1.0);
        set.set_parameter::<Qop>(-2.0);
        assert_abs_diff_eq!(set.get::<Phi>(), 0.25, epsilon = 1e-12);
        assert_eq!(set.get::<Theta>(), 0.0);
        assert_eq!(set.get::<Qop>(), -2.0);
    }

    #[test]
    fn uncertainty_reads_covariance_diagonal() {
        let cov = CovMatrix::from_diagonal(&Vector5::new(1.0, 4.0, 9.0, 16.0, 0.0025));
        let set = ParameterSet::new(Some(cov), ParVector::zeros());
        assert_eq!(set.uncertainty::<Theta>(), Some(4.0));
        assert_abs_diff_eq!(set.uncertainty::<Qop>().unwrap(), 0.05, epsilon = 1e-12);

        let bare = ParameterSet::new(None, ParVector::zeros());
        assert_eq!(bare.uncertainty::<Phi>(), None);
        assert!(bare.covariance().is_none());
    }
}
