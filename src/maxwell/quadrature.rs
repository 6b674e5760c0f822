use crate::errors::{MaxwellError, MaxwellResult};
use num_dual::DualNum;

// 15-point Kronrod abscissae and weights with the embedded 7-point Gauss rule.
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Tolerances of the adaptive quadrature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadratureOptions {
    pub epsabs: f64,
    pub epsrel: f64,
    pub max_subintervals: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            max_subintervals: 50,
        }
    }
}

struct Subinterval<D> {
    lower: D,
    upper: D,
    integral: D,
    error: f64,
}

impl<D: DualNum<f64> + Copy> Subinterval<D> {
    fn new<F: Fn(D) -> D>(f: &F, lower: D, upper: D) -> Self {
        let center = (lower + upper) * 0.5;
        let half_length = (upper - lower) * 0.5;
        let f_center = f(center);
        let mut kronrod = f_center * WGK[7];
        let mut gauss = f_center * WG[3];
        for j in 0..7 {
            let dx = half_length * XGK[j];
            let f_sum = f(center - dx) + f(center + dx);
            kronrod += f_sum * WGK[j];
            if j % 2 == 1 {
                gauss += f_sum * WG[j / 2];
            }
        }
        let error = ((kronrod - gauss) * half_length).re().abs();
        Self {
            lower,
            upper,
            integral: kronrod * half_length,
            error,
        }
    }
}

/// Adaptive Gauss-Kronrod (7-15) quadrature of `f` between `lower` and `upper`.
pub fn integrate<D: DualNum<f64> + Copy, F: Fn(D) -> D>(
    f: F,
    lower: D,
    upper: D,
    options: QuadratureOptions,
) -> MaxwellResult<D> {
    let mut intervals = vec![Subinterval::new(&f, lower, upper)];
    loop {
        let integral: D = intervals.iter().map(|s| s.integral).sum();
        let error: f64 = intervals.iter().map(|s| s.error).sum();
        if !integral.re().is_finite() || !error.is_finite() {
            return Err(MaxwellError::QuadratureFailure {
                subintervals: intervals.len(),
                error,
            });
        }
        if error <= options.epsabs.max(options.epsrel * integral.re().abs()) {
            return Ok(integral);
        }
        if intervals.len() >= options.max_subintervals {
            return Err(MaxwellError::QuadratureFailure {
                subintervals: intervals.len(),
                error,
            });
        }

        let (worst, _) = intervals
            .iter()
            .enumerate()
            .max_by(|(_, s1), (_, s2)| s1.error.total_cmp(&s2.error))
            .ok_or(MaxwellError::QuadratureFailure {
                subintervals: 0,
                error,
            })?;
        let Subinterval { lower, upper, .. } = intervals.swap_remove(worst);
        let center = (lower + upper) * 0.5;
        intervals.push(Subinterval::new(&f, lower, center));
        intervals.push(Subinterval::new(&f, center, upper));
    }
}
