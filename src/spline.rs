//! One-dimensional interpolants used by the smoothing engine.
//!
//! Each interpolant is fit over strictly increasing knots `t[i]` and is
//! evaluated one interval at a time. Construction returns `None` when the
//! knots cannot support the fit.

/// A piecewise curve through knots `(t[i], v[i])`.
pub(crate) trait Interpolant {
    /// Knot parameters.
    fn knots(&self) -> &[f64];

    /// Evaluate inside interval `k`, i.e. for `t` in `knots[k]..=knots[k + 1]`.
    fn eval_in(&self, k: usize, t: f64) -> f64;

    /// Evaluate anywhere in the knot range, extrapolating from the end intervals.
    fn eval(&self, t: f64) -> f64 {
        let knots = self.knots();
        let k = knots
            .partition_point(|&knot| knot <= t)
            .saturating_sub(1)
            .min(knots.len().saturating_sub(2));
        self.eval_in(k, t)
    }
}

fn strictly_increasing(t: &[f64]) -> bool {
    t.iter().all(|v| v.is_finite()) && t.windows(2).all(|w| w[1] > w[0])
}

fn valid_knots(t: &[f64], v: &[f64]) -> bool {
    t.len() >= 2 && t.len() == v.len() && strictly_increasing(t) && v.iter().all(|v| v.is_finite())
}

/// Natural cubic spline: C2, zero curvature at both ends.
#[derive(Debug, Clone)]
pub(crate) struct CubicSpline {
    t: Vec<f64>,
    v: Vec<f64>,
    m: Vec<f64>,
}

impl CubicSpline {
    pub(crate) fn natural(t: &[f64], v: &[f64]) -> Option<Self> {
        if !valid_knots(t, v) {
            return None;
        }
        let n = t.len();
        let mut m = vec![0.0; n];
        if n > 2 {
            // Tridiagonal system for interior second derivatives (Thomas algorithm).
            let h: Vec<f64> = t.windows(2).map(|w| w[1] - w[0]).collect();
            let mut diag = vec![0.0; n];
            let mut rhs = vec![0.0; n];
            for i in 1..n - 1 {
                diag[i] = 2.0 * (h[i - 1] + h[i]);
                rhs[i] = 6.0 * ((v[i + 1] - v[i]) / h[i] - (v[i] - v[i - 1]) / h[i - 1]);
            }
            for i in 2..n - 1 {
                let factor = h[i - 1] / diag[i - 1];
                diag[i] -= factor * h[i - 1];
                rhs[i] -= factor * rhs[i - 1];
            }
            for i in (1..n - 1).rev() {
                let upper = if i + 1 < n - 1 { h[i] * m[i + 1] } else { 0.0 };
                m[i] = (rhs[i] - upper) / diag[i];
            }
        }
        if m.iter().any(|value| !value.is_finite()) {
            return None;
        }
        Some(Self {
            t: t.to_vec(),
            v: v.to_vec(),
            m,
        })
    }
}

impl Interpolant for CubicSpline {
    fn knots(&self) -> &[f64] {
        &self.t
    }

    fn eval_in(&self, k: usize, t: f64) -> f64 {
        let (t0, t1) = (self.t[k], self.t[k + 1]);
        let (v0, v1) = (self.v[k], self.v[k + 1]);
        let (m0, m1) = (self.m[k], self.m[k + 1]);
        let h = t1 - t0;
        let a = t1 - t;
        let b = t - t0;
        m0 * a * a * a / (6.0 * h)
            + m1 * b * b * b / (6.0 * h)
            + (v0 / h - m0 * h / 6.0) * a
            + (v1 / h - m1 * h / 6.0) * b
    }
}

/// Shape-preserving quadratic spline with one interior knot per interval.
///
/// Knot slopes are harmonic means of the neighbouring secants and zero at
/// local extrema, so monotone data stays monotone.
#[derive(Debug, Clone)]
pub(crate) struct QuadraticSpline {
    t: Vec<f64>,
    v: Vec<f64>,
    s: Vec<f64>,
}

impl QuadraticSpline {
    pub(crate) fn new(t: &[f64], v: &[f64]) -> Option<Self> {
        if !valid_knots(t, v) {
            return None;
        }
        let n = t.len();
        let secant: Vec<f64> = (0..n - 1)
            .map(|i| (v[i + 1] - v[i]) / (t[i + 1] - t[i]))
            .collect();
        let mut s = vec![0.0; n];
        s[0] = secant[0];
        s[n - 1] = secant[n - 2];
        for i in 1..n - 1 {
            let (d0, d1) = (secant[i - 1], secant[i]);
            s[i] = if d0 * d1 <= 0.0 {
                0.0
            } else {
                2.0 * d0 * d1 / (d0 + d1)
            };
        }
        Some(Self {
            t: t.to_vec(),
            v: v.to_vec(),
            s,
        })
    }
}

impl Interpolant for QuadraticSpline {
    fn knots(&self) -> &[f64] {
        &self.t
    }

    fn eval_in(&self, k: usize, t: f64) -> f64 {
        let (t0, t1) = (self.t[k], self.t[k + 1]);
        let (v0, v1) = (self.v[k], self.v[k + 1]);
        let (s0, s1) = (self.s[k], self.s[k + 1]);
        let mid = (t0 + t1) * 0.5;
        let a = mid - t0;
        let b = t1 - mid;
        let s_mid = (2.0 * (v1 - v0) - (s0 * a + s1 * b)) / (t1 - t0);
        if t <= mid {
            let d = t - t0;
            v0 + s0 * d + (s_mid - s0) / (2.0 * a) * d * d
        } else {
            let v_mid = v0 + (s0 + s_mid) * 0.5 * a;
            let d = t - mid;
            v_mid + s_mid * d + (s1 - s_mid) / (2.0 * b) * d * d
        }
    }
}

/// Cubic Hermite spline with Catmull-Rom tangents over non-uniform knots.
#[derive(Debug, Clone)]
pub(crate) struct CatmullRom {
    t: Vec<f64>,
    v: Vec<f64>,
    tangent: Vec<f64>,
}

impl CatmullRom {
    pub(crate) fn new(t: &[f64], v: &[f64]) -> Option<Self> {
        if !valid_knots(t, v) {
            return None;
        }
        let n = t.len();
        let tangent = (0..n)
            .map(|i| {
                let lo = i.saturating_sub(1);
                let hi = (i + 1).min(n - 1);
                (v[hi] - v[lo]) / (t[hi] - t[lo])
            })
            .collect();
        Some(Self {
            t: t.to_vec(),
            v: v.to_vec(),
            tangent,
        })
    }
}

impl Interpolant for CatmullRom {
    fn knots(&self) -> &[f64] {
        &self.t
    }

    fn eval_in(&self, k: usize, t: f64) -> f64 {
        let (t0, t1) = (self.t[k], self.t[k + 1]);
        let h = t1 - t0;
        let u = (t - t0) / h;
        let u2 = u * u;
        let u3 = u2 * u;
        let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
        let h10 = u3 - 2.0 * u2 + u;
        let h01 = -2.0 * u3 + 3.0 * u2;
        let h11 = u3 - u2;
        h00 * self.v[k]
            + h10 * h * self.tangent[k]
            + h01 * self.v[k + 1]
            + h11 * h * self.tangent[k + 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: [f64; 4] = [0.0, 1.0, 2.0, 4.0];
    const V: [f64; 4] = [0.0, 2.0, 1.0, 3.0];

    fn assert_interpolates(curve: &impl Interpolant) {
        for (t, v) in T.iter().zip(V.iter()) {
            assert!((curve.eval(*t) - v).abs() < 1e-9, "at {t}");
        }
    }

    #[test]
    fn natural_spline_hits_knots() {
        let spline = CubicSpline::natural(&T, &V).expect("valid knots");
        assert_interpolates(&spline);
    }

    #[test]
    fn natural_spline_of_line_is_line() {
        let v: Vec<f64> = T.iter().map(|t| 3.0 * t + 1.0).collect();
        let spline = CubicSpline::natural(&T, &v).expect("valid knots");
        assert!((spline.eval(3.0) - 10.0).abs() < 1e-9);
        assert!((spline.eval(0.5) - 2.5).abs() < 1e-9);
    }

    #[test]
    fn quadratic_spline_hits_knots() {
        let spline = QuadraticSpline::new(&T, &V).expect("valid knots");
        assert_interpolates(&spline);
    }

    #[test]
    fn quadratic_spline_keeps_monotone_data_monotone() {
        let t = [0.0, 1.0, 2.0, 3.0];
        let v = [0.0, 0.1, 5.0, 5.1];
        let spline = QuadraticSpline::new(&t, &v).expect("valid knots");
        let mut last = f64::NEG_INFINITY;
        for step in 0..=300 {
            let value = spline.eval(step as f64 / 100.0);
            assert!(value >= last - 1e-12);
            last = value;
        }
    }

    #[test]
    fn catmull_rom_hits_knots() {
        let spline = CatmullRom::new(&T, &V).expect("valid knots");
        assert_interpolates(&spline);
    }

    #[test]
    fn rejects_non_increasing_knots() {
        let t = [0.0, 1.0, 1.0];
        let v = [0.0, 1.0, 2.0];
        assert!(CubicSpline::natural(&t, &v).is_none());
        assert!(QuadraticSpline::new(&t, &v).is_none());
        assert!(CatmullRom::new(&t, &v).is_none());
        assert!(CubicSpline::natural(&[0.0], &[1.0]).is_none());
    }
}
