//! Maxwell's equal-area construction for the reduced van der Waals equation of state.
pub mod eos;
mod errors;
mod isotherm;
pub mod maxwell;
mod state;

pub use errors::{MaxwellError, MaxwellResult};
pub use isotherm::Isotherm;
pub use maxwell::{
    corrected_isotherm, corrected_isotherm_with_options, Coexistence, QuadratureOptions,
    SolverOptions, Verbosity,
};
pub use state::{ReducedTemperature, ReducedVolumeGrid};
