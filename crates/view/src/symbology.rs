use foundation::math::clamp01;

/// Which scalar the grid encodes as color. Local UI state, never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Threat,
    Importance,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// Scalar-to-color ramp per view mode.
///
/// Threat runs green→red; importance runs black→cyan. Inputs are clamped to
/// `[0, 1]` before quantizing.
pub fn fill_color(value: f64, mode: ViewMode) -> Rgb {
    let v = clamp01(value);
    match mode {
        ViewMode::Threat => {
            let r = (v * 255.0).round() as u8;
            let g = ((1.0 - v) * 255.0).round() as u8;
            Rgb(r, g, 0)
        }
        ViewMode::Importance => {
            let c = (v * 255.0).round() as u8;
            Rgb(0, c, c)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Rgb, ViewMode, fill_color};
    use pretty_assertions::assert_eq;

    #[test]
    fn threat_ramp_matches_definition() {
        // color(v, threat) = (round(255v), round(255(1-v)), 0)
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            let expected = Rgb(
                (v * 255.0).round() as u8,
                ((1.0 - v) * 255.0).round() as u8,
                0,
            );
            assert_eq!(fill_color(v, ViewMode::Threat), expected);
        }
    }

    #[test]
    fn importance_ramp_matches_definition() {
        // color(v, importance) = (0, round(255v), round(255v))
        for i in 0..=100 {
            let v = i as f64 / 100.0;
            let c = (v * 255.0).round() as u8;
            assert_eq!(fill_color(v, ViewMode::Importance), Rgb(0, c, c));
        }
    }

    #[test]
    fn out_of_range_values_clamp() {
        assert_eq!(fill_color(-3.0, ViewMode::Threat), Rgb(0, 255, 0));
        assert_eq!(fill_color(7.0, ViewMode::Threat), Rgb(255, 0, 0));
        assert_eq!(fill_color(2.0, ViewMode::Importance), Rgb(0, 255, 255));
    }

    #[test]
    fn half_threat_is_olive() {
        let c = fill_color(0.5, ViewMode::Threat);
        assert_eq!(c, Rgb(128, 128, 0));
        assert_eq!(c.css(), "rgb(128, 128, 0)");
    }
}
