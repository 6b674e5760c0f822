//! Maxwell's equal-area construction on van der Waals isotherms.
use crate::eos::{pressure, pressure_isotherm, SINGULAR_VOLUME};
use crate::errors::{MaxwellError, MaxwellResult};
use crate::state::{ReducedTemperature, ReducedVolumeGrid};
use ndarray::{Array1, Zip};
use num_dual::{Dual64, DualNum};
use std::fmt;

mod cubic;
mod extrema;
mod quadrature;
pub use cubic::{cubic_roots, isobar_cubic, volume_bounds};
pub use extrema::{local_maxima, local_minima};
pub use quadrature::{integrate, QuadratureOptions};

const MAX_ITER_MAXWELL: usize = 50;
const TOL_MAXWELL: f64 = 1.48e-8;

/// Level of detail written to stdout by the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Do not print output.
    #[default]
    None,
    /// Print information about the success of the solver.
    Result,
    /// Print detailed outputs for every iteration.
    Iter,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolverOptions {
    pub max_iter: Option<usize>,
    pub tol: Option<f64>,
    pub verbosity: Verbosity,
    pub quadrature: QuadratureOptions,
}

impl SolverOptions {
    fn unwrap_or(self, max_iter: usize, tol: f64) -> (usize, f64, Verbosity) {
        (
            self.max_iter.unwrap_or(max_iter),
            self.tol.unwrap_or(tol),
            self.verbosity,
        )
    }
}

macro_rules! log_iter {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= Verbosity::Iter {
            println!($($arg)*);
        }
    };
}

macro_rules! log_result {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= Verbosity::Result {
            println!($($arg)*);
        }
    };
}

/// Signed area between the isotherm and the isobar through `volume`.
pub fn area_difference<D: DualNum<f64> + Copy>(
    temperature: D,
    volume: D,
    options: QuadratureOptions,
) -> MaxwellResult<D> {
    let p0 = pressure(temperature, volume);
    let (v_liquid, v_vapor) = volume_bounds(temperature, p0)?;
    integrate(
        |v| pressure(temperature, v) - p0,
        v_liquid,
        v_vapor,
        options,
    )
}

/// Converged coexistence of liquid and vapor on one isotherm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coexistence {
    pub temperature: f64,
    /// Converged trial volume inside the loop.
    pub volume: f64,
    pub pressure: f64,
    pub liquid_volume: f64,
    pub vapor_volume: f64,
    pub iterations: usize,
    quadrature: QuadratureOptions,
}

impl Coexistence {
    /// Solve the equal-area rule on the isotherm `temperature`.
    pub fn new(
        temperature: impl Into<ReducedTemperature>,
        grid: &ReducedVolumeGrid,
        options: SolverOptions,
    ) -> MaxwellResult<Self> {
        let temperature: ReducedTemperature = temperature.into();
        let temperature = temperature.0;
        let isotherm = pressure_isotherm(temperature, grid.volume());
        Self::from_isotherm(temperature, grid, &isotherm, options)
    }

    pub(crate) fn from_isotherm(
        temperature: f64,
        grid: &ReducedVolumeGrid,
        isotherm: &Array1<f64>,
        options: SolverOptions,
    ) -> MaxwellResult<Self> {
        let initial_volume = loop_center(grid, isotherm)?;
        let (volume, iterations) = newton(temperature, initial_volume, options)?;
        let pressure = pressure(temperature, volume);
        let (liquid_volume, vapor_volume) = volume_bounds(temperature, pressure)?;
        Ok(Self {
            temperature,
            volume,
            pressure,
            liquid_volume,
            vapor_volume,
            iterations,
            quadrature: options.quadrature,
        })
    }

    /// Residual of the equal-area rule at the converged pressure, evaluated
    /// with the quadrature options of the solve.
    pub fn area_difference(&self) -> MaxwellResult<f64> {
        area_difference(self.temperature, self.volume, self.quadrature)
    }

    /// Replace all pressures on the grid between the coexisting volumes
    /// (inclusive) with the coexistence pressure.
    pub fn flatten(&self, grid: &ReducedVolumeGrid, mut isotherm: Array1<f64>) -> Array1<f64> {
        Zip::from(&mut isotherm)
            .and(grid.volume())
            .for_each(|p, &v| {
                if v >= self.liquid_volume && v <= self.vapor_volume {
                    *p = self.pressure;
                }
            });
        isotherm
    }
}

impl fmt::Display for Coexistence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T = {:.5}, p = {:.5}, V_l = {:.5}, V_v = {:.5}",
            self.temperature, self.pressure, self.liquid_volume, self.vapor_volume
        )
    }
}

/// Mean of the volumes at the local minimum and maximum of the isotherm.
fn loop_center(grid: &ReducedVolumeGrid, isotherm: &Array1<f64>) -> MaxwellResult<f64> {
    let minima = local_minima(isotherm.view());
    let maxima = local_maxima(isotherm.view());
    match (minima.as_slice(), maxima.as_slice()) {
        (&[i_min], &[i_max]) => Ok(0.5 * (grid.volume()[i_min] + grid.volume()[i_max])),
        _ => Err(MaxwellError::NoLoopDetected {
            minima: minima.len(),
            maxima: maxima.len(),
        }),
    }
}

fn newton(
    temperature: f64,
    initial_volume: f64,
    options: SolverOptions,
) -> MaxwellResult<(f64, usize)> {
    let (max_iter, tol, verbosity) = options.unwrap_or(MAX_ITER_MAXWELL, TOL_MAXWELL);

    log_iter!(
        verbosity,
        " iter |    residual    |   volume   |  pressure  "
    );
    log_iter!(verbosity, "{:-<48}", "");
    log_iter!(
        verbosity,
        " {:4} |                | {:10.8} | {:10.8}",
        0,
        initial_volume,
        pressure(temperature, initial_volume)
    );

    let mut volume = initial_volume;
    for i in 1..=max_iter {
        let residual = area_difference(
            Dual64::from(temperature),
            Dual64::from(volume).derivative(),
            options.quadrature,
        )?;
        if residual.eps == 0.0 || !residual.eps.is_finite() {
            return Err(MaxwellError::IterationDiverged(format!(
                "vanishing slope of the area difference at V = {volume}"
            )));
        }
        let delta = residual.re / residual.eps;
        volume -= delta;
        if !volume.is_finite() || volume <= SINGULAR_VOLUME {
            return Err(MaxwellError::IterationDiverged(format!(
                "reduced volume {volume} outside of the fluid region"
            )));
        }
        log_iter!(
            verbosity,
            " {:4} | {:14.8e} | {:10.8} | {:10.8}",
            i,
            residual.re,
            volume,
            pressure(temperature, volume)
        );

        if delta.abs() < tol {
            log_result!(
                verbosity,
                "Maxwell construction: calculation converged in {} step(s)\n",
                i
            );
            return Ok((volume, i));
        }
    }
    Err(MaxwellError::NotConverged("Maxwell construction".into()))
}

/// Reduced pressure on the grid with the van der Waals loop replaced by
/// the coexistence isobar.
pub fn corrected_isotherm(
    temperature: impl Into<ReducedTemperature>,
    grid: &ReducedVolumeGrid,
) -> MaxwellResult<Array1<f64>> {
    corrected_isotherm_with_options(temperature, grid, SolverOptions::default())
}

pub fn corrected_isotherm_with_options(
    temperature: impl Into<ReducedTemperature>,
    grid: &ReducedVolumeGrid,
    options: SolverOptions,
) -> MaxwellResult<Array1<f64>> {
    let temperature: ReducedTemperature = temperature.into();
    let isotherm = pressure_isotherm(temperature.0, grid.volume());
    if !temperature.is_subcritical() {
        return Ok(isotherm);
    }
    let coexistence =
        Coexistence::from_isotherm(temperature.0, grid, &isotherm, options)?;
    Ok(coexistence.flatten(grid, isotherm))
}
