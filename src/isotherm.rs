use crate::eos::pressure_isotherm;
use crate::errors::MaxwellResult;
use crate::maxwell::{Coexistence, SolverOptions};
use crate::state::{ReducedTemperature, ReducedVolumeGrid};
use ndarray::Array1;
use quantity::Temperature;

/// Raw and corrected reduced pressures of one isotherm on a grid.
#[derive(Clone, Debug)]
pub struct Isotherm {
    pub temperature: ReducedTemperature,
    pub raw: Array1<f64>,
    pub corrected: Array1<f64>,
    /// `None` at and above the critical temperature.
    pub coexistence: Option<Coexistence>,
}

impl Isotherm {
    pub fn new(
        temperature: impl Into<ReducedTemperature>,
        grid: &ReducedVolumeGrid,
    ) -> MaxwellResult<Self> {
        Self::new_with_options(temperature, grid, SolverOptions::default())
    }

    pub fn new_with_options(
        temperature: impl Into<ReducedTemperature>,
        grid: &ReducedVolumeGrid,
        options: SolverOptions,
    ) -> MaxwellResult<Self> {
        let temperature: ReducedTemperature = temperature.into();
        let raw = pressure_isotherm(temperature.0, grid.volume());
        let coexistence = if temperature.is_subcritical() {
            Some(Coexistence::from_isotherm(
                temperature.0,
                grid,
                &raw,
                options,
            )?)
        } else {
            None
        };
        let corrected = match coexistence {
            Some(c) => c.flatten(grid, raw.clone()),
            None => raw.clone(),
        };
        Ok(Self {
            temperature,
            raw,
            corrected,
            coexistence,
        })
    }

    /// Isotherms for several absolute temperatures of one substance.
    ///
    /// Fails on the first temperature for which the construction fails.
    pub fn family(
        temperatures: &[Temperature],
        critical_temperature: Temperature,
        grid: &ReducedVolumeGrid,
        options: SolverOptions,
    ) -> MaxwellResult<Vec<Self>> {
        temperatures
            .iter()
            .map(|&t| {
                let t = ReducedTemperature::from_temperature(t, critical_temperature);
                Self::new_with_options(t, grid, options)
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maxwell::corrected_isotherm;
    use quantity::KELVIN;

    #[test]
    fn test_isotherm() -> MaxwellResult<()> {
        let grid = ReducedVolumeGrid::linspace(0.5, 3.0, 500)?;

        let isotherm = Isotherm::new(1.0, &grid)?;
        assert!(isotherm.coexistence.is_none());
        assert_eq!(isotherm.raw, isotherm.corrected);

        let isotherm = Isotherm::new(0.9, &grid)?;
        let vle = isotherm.coexistence.unwrap();
        println!("{vle}");
        assert_eq!(isotherm.corrected, corrected_isotherm(0.9, &grid)?);
        assert_ne!(isotherm.raw, isotherm.corrected);
        Ok(())
    }

    #[test]
    fn test_family() -> MaxwellResult<()> {
        let grid = ReducedVolumeGrid::linspace(0.5, 3.0, 500)?;
        let temperatures: Vec<_> = (270..320)
            .step_by(10)
            .map(|t| t as f64 * KELVIN)
            .collect();
        let isotherms = Isotherm::family(&temperatures, 304.0 * KELVIN, &grid, Default::default())?;
        assert_eq!(isotherms.len(), 5);

        let mut last_pressure = 0.0;
        for isotherm in &isotherms {
            println!("{} {:?}", isotherm.temperature, isotherm.coexistence);
            match isotherm.coexistence {
                Some(vle) => {
                    // vapor pressure increases with temperature
                    assert!(vle.pressure > last_pressure);
                    last_pressure = vle.pressure;
                }
                None => assert!(!isotherm.temperature.is_subcritical()),
            }
        }
        assert!(isotherms[4].coexistence.is_none());
        Ok(())
    }
}
