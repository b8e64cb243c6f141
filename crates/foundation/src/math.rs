/// Linear interpolation from `a` to `b` at parameter `t`.
///
/// `t` is not clamped; callers clamp progress before interpolating.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Clamps a scalar into `[0, 1]`. NaN maps to 0.
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{clamp01, lerp};

    #[test]
    fn lerp_endpoints_are_exact() {
        assert_eq!(lerp(31.4, 32.0, 0.0), 31.4);
        assert_eq!(lerp(31.4, 32.0, 1.0), 32.0);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(-2.0, 2.0, 0.5), 0.0);
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(1.5), 1.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(f64::NAN), 0.0);
    }
}
