use crate::eos::SINGULAR_VOLUME;
use crate::errors::{MaxwellError, MaxwellResult};
use ndarray::Array1;
use quantity::{Temperature, KELVIN};
use std::fmt;

/// Absolute temperature divided by the critical temperature.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct ReducedTemperature(pub f64);

impl ReducedTemperature {
    /// Reduce an absolute temperature with the critical temperature of the substance.
    pub fn from_temperature(temperature: Temperature, critical_temperature: Temperature) -> Self {
        Self(temperature.convert_into(KELVIN) / critical_temperature.convert_into(KELVIN))
    }

    /// Below the critical temperature the isotherm shows a van der Waals loop.
    pub fn is_subcritical(&self) -> bool {
        self.0 < 1.0
    }
}

impl From<f64> for ReducedTemperature {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReducedTemperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Strictly increasing sequence of reduced volumes.
#[derive(Clone, Debug, PartialEq)]
pub struct ReducedVolumeGrid(Array1<f64>);

impl ReducedVolumeGrid {
    pub fn new(volume: Array1<f64>) -> MaxwellResult<Self> {
        if volume.len() < 2 {
            return Err(MaxwellError::InvalidGrid(format!(
                "at least two points are required, got {}",
                volume.len()
            )));
        }
        if let Some(v) = volume.iter().find(|v| !v.is_finite()) {
            return Err(MaxwellError::InvalidGrid(format!("non-finite volume {v}")));
        }
        if let Some(v) = volume
            .iter()
            .find(|&&v| (v - SINGULAR_VOLUME).abs() < f64::EPSILON)
        {
            return Err(MaxwellError::InvalidGrid(format!(
                "volume {v} is at the singularity of the equation of state"
            )));
        }
        if let Some((v1, v2)) = volume
            .iter()
            .zip(volume.iter().skip(1))
            .find(|(v1, v2)| v2 <= v1)
        {
            return Err(MaxwellError::InvalidGrid(format!(
                "volumes are not strictly increasing ({v1} followed by {v2})"
            )));
        }
        Ok(Self(volume))
    }

    /// `n` evenly spaced volumes between `start` and `end` (inclusive).
    pub fn linspace(start: f64, end: f64, n: usize) -> MaxwellResult<Self> {
        Self::new(Array1::linspace(start, end, n))
    }

    pub fn volume(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;

    #[test]
    fn test_reduced_temperature() {
        let t = ReducedTemperature::from_temperature(270.0 * KELVIN, 304.0 * KELVIN);
        println!("{t}");
        assert_relative_eq!(t.0, 270.0 / 304.0, max_relative = 1e-15);
        assert!(t.is_subcritical());
        assert!(!ReducedTemperature(1.0).is_subcritical());
        assert!(!ReducedTemperature::from(1.2).is_subcritical());
    }

    #[test]
    fn test_linspace() -> MaxwellResult<()> {
        let grid = ReducedVolumeGrid::linspace(0.5, 3.0, 500)?;
        assert_eq!(grid.len(), 500);
        assert_relative_eq!(grid.volume()[0], 0.5);
        assert_relative_eq!(grid.volume()[499], 3.0, max_relative = 1e-15);
        Ok(())
    }

    #[test]
    fn test_invalid_grids() {
        for volume in [
            arr1(&[1.0]),
            arr1(&[0.5, 0.5, 1.0]),
            arr1(&[2.0, 1.0]),
            arr1(&[0.2, 1.0 / 3.0, 0.5]),
            arr1(&[0.5, f64::NAN]),
        ] {
            let err = ReducedVolumeGrid::new(volume).unwrap_err();
            println!("{err}");
            assert!(matches!(err, MaxwellError::InvalidGrid(_)));
        }
    }
}
