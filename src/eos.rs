use ndarray::Array1;
use num_dual::DualNum;

/// Reduced volume at which the pressure diverges.
pub const SINGULAR_VOLUME: f64 = 1.0 / 3.0;

/// Reduced van der Waals pressure p = 8 T / (3 V - 1) - 3 / V².
pub fn pressure<D: DualNum<f64> + Copy>(temperature: D, volume: D) -> D {
    temperature * 8.0 / (volume * 3.0 - 1.0) - volume.powi(2).recip() * 3.0
}

pub fn pressure_isotherm(temperature: f64, volume: &Array1<f64>) -> Array1<f64> {
    8.0 * temperature / (volume * 3.0 - 1.0) - 3.0 / (volume * volume)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::arr1;
    use num_dual::{Dual, Dual64};

    #[test]
    fn test_critical_point() {
        let p = pressure(1.0, 1.0);
        println!("{p}");
        assert_relative_eq!(p, 1.0, max_relative = 1e-15);

        // first and second derivative vanish at the critical point
        let v = Dual64::from(1.0).derivative();
        let dp = pressure(Dual::from(1.0), v).eps;
        println!("{dp}");
        assert_relative_eq!(dp, 0.0, epsilon = 1e-14);
        let h = 1e-4;
        let d2p = (pressure(1.0, 1.0 + h) - 2.0 * pressure(1.0, 1.0) + pressure(1.0, 1.0 - h))
            / (h * h);
        assert_relative_eq!(d2p, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_pressure_isotherm() {
        let volume = arr1(&[0.5, 1.0, 1.75, 3.0]);
        let p = pressure_isotherm(0.9, &volume);
        println!("{p}");
        assert_relative_eq!(p[0], 2.4, max_relative = 1e-14);
        assert_relative_eq!(p[1], 0.6, max_relative = 1e-14);
        for (&v, &p) in volume.iter().zip(p.iter()) {
            assert_relative_eq!(p, pressure(0.9, v), max_relative = 1e-15);
        }
        assert_eq!(volume, arr1(&[0.5, 1.0, 1.75, 3.0]));
    }

    #[test]
    fn test_pressure_derivatives() {
        let (t, v) = (0.888, 1.2);
        let h = 1e-7;

        let dp_dv = pressure(Dual::from(t), Dual64::from(v).derivative()).eps;
        let dp_dv_h = (pressure(t, v + h) - pressure(t, v)) / h;
        println!("{dp_dv:.8e} {dp_dv_h:.8e}");
        assert_relative_eq!(dp_dv, dp_dv_h, max_relative = 1e-6);

        let dp_dt = pressure(Dual64::from(t).derivative(), Dual::from(v)).eps;
        println!("{dp_dt:.8e}");
        assert_relative_eq!(dp_dt, 8.0 / (3.0 * v - 1.0), max_relative = 1e-14);
    }
}
