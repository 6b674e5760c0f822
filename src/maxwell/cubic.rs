use crate::errors::{MaxwellError, MaxwellResult};
use nalgebra::Matrix3;
use num_dual::DualNum;

/// Eigenvalues with a relative imaginary part below this are real roots.
const IMAGINARY_TOL: f64 = 1e-10;

/// Coefficients (highest power first) of the cubic
///
/// 3 p V³ - (p + 8 T) V² + 9 V - 3 = 0
///
/// whose roots are the volumes at which the isotherm `temperature`
/// crosses the isobar `pressure`.
pub fn isobar_cubic<D: DualNum<f64> + Copy>(temperature: D, pressure: D) -> [D; 4] {
    [
        pressure * 3.0,
        -(pressure + temperature * 8.0),
        D::from(9.0),
        D::from(-3.0),
    ]
}

fn horner<D: DualNum<f64> + Copy>(coefs: &[D; 4], x: D) -> (D, D) {
    let mut f = D::zero();
    let mut df = D::zero();
    for &c in coefs {
        df = df * x + f;
        f = f * x + c;
    }
    (f, df)
}

/// Real roots of a cubic in ascending order.
///
/// The roots are the eigenvalues of the companion matrix. Returns `None`
/// if the leading coefficient vanishes or if not all roots are real.
pub fn cubic_roots(coefs: [f64; 4]) -> Option<[f64; 3]> {
    let [a, b, c, d] = coefs;
    if a == 0.0 || !a.is_finite() {
        return None;
    }
    let companion = Matrix3::new(
        -b / a,
        -c / a,
        -d / a,
        1.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    );
    let eigenvalues = companion.complex_eigenvalues();

    let mut roots = [0.0; 3];
    for (root, z) in roots.iter_mut().zip(eigenvalues.iter()) {
        if !z.re.is_finite() || z.im.abs() > IMAGINARY_TOL * z.re.abs().max(1.0) {
            return None;
        }
        // polish the eigenvalue on the polynomial itself
        let mut x = z.re;
        for _ in 0..2 {
            let (f, df) = horner(&coefs, x);
            if df != 0.0 {
                x -= f / df;
            }
        }
        *root = x;
    }
    roots.sort_by(f64::total_cmp);
    Some(roots)
}

/// Smallest and largest volume at which the isotherm crosses the isobar.
///
/// The middle root lies in the mechanically unstable region and is
/// discarded. Derivatives with respect to temperature and pressure are
/// propagated through the roots by implicit differentiation.
pub fn volume_bounds<D: DualNum<f64> + Copy>(temperature: D, pressure: D) -> MaxwellResult<(D, D)> {
    let coefs = isobar_cubic(temperature, pressure);
    let [v_min, _, v_max] =
        cubic_roots(coefs.map(|c| c.re())).ok_or(MaxwellError::CubicRootFailure {
            pressure: pressure.re(),
        })?;
    let lift = |root: f64| {
        let mut v = D::from(root);
        for _ in 0..D::NDERIV {
            let (f, df) = horner(&coefs, v);
            v -= f / df;
        }
        v
    };
    Ok((lift(v_min), lift(v_max)))
}
