//! Dispersive shift of a transmon coupled to a resonator.

/// Dispersive shift χ, where 2χ is the resonator pull between the qubit's
/// |0⟩ and |1⟩ states.
///
/// Includes the counter-rotating terms and the push from the 1→2 transition
/// (Koch et al., Eqs. 3.9 and 3.10). All arguments share one unit, which is
/// also the unit of the result. Diverges when `wr` equals `w01` or `w12`.
pub fn chi(g: f64, wr: f64, w01: f64, w12: f64) -> f64 {
    let chi_0 = -2.0 * g.powi(2) * w01 / (w01.powi(2) - wr.powi(2));
    let chi_1 = g.powi(2)
        * (1.0 / (w01 - wr) - 2.0 / (w12 - wr) + 1.0 / (w01 + wr) - 2.0 / (w12 + wr));
    (chi_1 - chi_0) / 2.0
}

/// True when `a` and `b` agree to relative tolerance `rel_tol`.
pub fn nearly_equal(a: f64, b: f64, rel_tol: f64) -> bool {
    (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chi_dispersive_limit() {
        // Far detuned, χ ≈ g²α / (Δ(Δ + α)) with Δ = w01 − wr.
        let (g, wr, w01, alpha) = (0.05, 7.0, 5.0, -0.3);
        let w12 = w01 + alpha;
        let delta = w01 - wr;
        let rwa = g * g * alpha / (delta * (delta + alpha));
        let full = chi(g, wr, w01, w12);
        assert!(full < 0.0);
        assert!((full - rwa).abs() / rwa.abs() < 0.5, "{full} vs {rwa}");
    }

    #[test]
    fn test_chi_scales_with_g_squared() {
        let a = chi(0.05, 7.0, 5.0, 4.7);
        let b = chi(0.10, 7.0, 5.0, 4.7);
        assert!((b / a - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_nearly_equal() {
        assert!(nearly_equal(7.0, 7.0 * (1.0 + 1e-12), 1e-9));
        assert!(!nearly_equal(7.0, 7.1, 1e-9));
    }
}
