use thiserror::Error;

/// Error type for the Maxwell construction.
#[derive(Error, Debug)]
pub enum MaxwellError {
    /// The isotherm on the grid does not show exactly one van der Waals loop.
    #[error("No van der Waals loop detected ({minima} minima, {maxima} maxima on the grid)")]
    NoLoopDetected { minima: usize, maxima: usize },

    /// The coexistence cubic does not have three real roots.
    #[error("Coexistence cubic has less than three real roots at reduced pressure {pressure}")]
    CubicRootFailure { pressure: f64 },

    /// The adaptive quadrature did not reach the requested accuracy.
    #[error("Quadrature failed after {subintervals} subintervals (error estimate {error:e})")]
    QuadratureFailure { subintervals: usize, error: f64 },

    /// The Newton iteration did not converge.
    #[error("`{0}` did not converge within the maximum number of iterations.")]
    NotConverged(String),

    /// The Newton iteration left the domain of the equation of state.
    #[error("Iteration diverged: {0}")]
    IterationDiverged(String),

    /// The reduced volume grid violates its contract.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

/// Convenience type for `Result<T, MaxwellError>`.
pub type MaxwellResult<T> = Result<T, MaxwellError>;
