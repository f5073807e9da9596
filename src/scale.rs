//! Value → color scale.
//!
//! Two modes, fixed at construction:
//! - continuous: piecewise-linear per-channel interpolation through the
//!   breakpoint colors (a diverging gradient with the default 3-point range);
//! - intervaled: a step function over right-open intervals, discontinuous at
//!   each breakpoint.

use crate::color::Rgba;
use crate::config::ChartError;

/// Maps a numeric value to a display color. One instance per chart.
#[derive(Debug, Clone)]
pub struct ValueScale {
    breakpoints: Vec<f32>,
    colors: Vec<Rgba>,
    clamp: bool,
    intervaled: bool,
}

impl ValueScale {
    /// Build a scale over ascending `breakpoints` and their parallel `colors`.
    pub fn new(
        breakpoints: Vec<f32>,
        colors: Vec<Rgba>,
        clamp: bool,
        intervaled: bool,
    ) -> Result<Self, ChartError> {
        if breakpoints.len() < 2 {
            return Err(ChartError {
                message: format!(
                    "value range needs at least 2 breakpoints, got {}",
                    breakpoints.len()
                ),
                phase: "scale",
            });
        }
        if colors.len() != breakpoints.len() {
            return Err(ChartError {
                message: format!(
                    "{} colors for {} breakpoints",
                    colors.len(),
                    breakpoints.len()
                ),
                phase: "scale",
            });
        }
        for pair in breakpoints.windows(2) {
            if !(pair[0] < pair[1]) {
                return Err(ChartError {
                    message: format!(
                        "value range must be strictly ascending ({} then {})",
                        pair[0], pair[1]
                    ),
                    phase: "scale",
                });
            }
        }
        Ok(Self {
            breakpoints,
            colors,
            clamp,
            intervaled,
        })
    }

    /// Map `value` to its display color.
    ///
    /// Continuous mode with `clamp = false` extrapolates linearly along the
    /// first/last segment; channels saturate at 0/255.
    pub fn color(&self, value: f32) -> Rgba {
        if self.intervaled {
            self.color_intervaled(value)
        } else {
            self.color_continuous(value)
        }
    }

    fn color_continuous(&self, value: f32) -> Rgba {
        let first = self.breakpoints[0];
        let last = self.breakpoints[self.breakpoints.len() - 1];

        let v = if self.clamp {
            value.clamp(first, last)
        } else {
            value
        };

        // Segment index: below the range uses the first segment, above the
        // last breakpoint uses the final segment (covers extrapolation).
        let seg = self
            .breakpoints
            .windows(2)
            .position(|pair| v < pair[1])
            .unwrap_or(self.breakpoints.len() - 2);

        let lo = self.breakpoints[seg];
        let hi = self.breakpoints[seg + 1];
        let t = (v - lo) / (hi - lo);
        self.colors[seg].lerp(self.colors[seg + 1], t)
    }

    fn color_intervaled(&self, value: f32) -> Rgba {
        for i in 1..self.breakpoints.len() {
            if value < self.breakpoints[i] {
                return self.colors[i - 1];
            }
        }
        self.colors[self.colors.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgba = Rgba::rgb(250, 10, 10);
    const B: Rgba = Rgba::rgb(10, 250, 10);
    const C: Rgba = Rgba::rgb(10, 10, 250);

    fn continuous(clamp: bool) -> ValueScale {
        ValueScale::new(vec![0.0, 5.0, 10.0], vec![A, B, C], clamp, false).unwrap()
    }

    fn intervaled() -> ValueScale {
        ValueScale::new(vec![0.0, 5.0, 10.0], vec![A, B, C], true, true).unwrap()
    }

    #[test]
    fn test_continuous_endpoints() {
        let s = continuous(true);
        assert_eq!(s.color(0.0), A);
        assert_eq!(s.color(10.0), C);
    }

    #[test]
    fn test_continuous_breakpoint_hits_paired_color() {
        let s = continuous(true);
        assert_eq!(s.color(5.0), B);
    }

    #[test]
    fn test_continuous_midpoint_blends() {
        let s = continuous(true);
        let c = s.color(2.5);
        assert_eq!(c, A.lerp(B, 0.5));
    }

    #[test]
    fn test_continuous_clamps_out_of_range() {
        let s = continuous(true);
        assert_eq!(s.color(-100.0), A);
        assert_eq!(s.color(1e6), C);
    }

    #[test]
    fn test_continuous_extrapolates_when_unclamped() {
        let s = continuous(false);
        // Below the range: continues the first segment and saturates.
        assert_eq!(s.color(-200.0), Rgba::rgb(255, 0, 10));
        // Above the range: continues the last segment and saturates.
        assert_eq!(s.color(200.0), Rgba::rgb(10, 0, 255));
    }

    #[test]
    fn test_interval_table() {
        let s = intervaled();
        assert_eq!(s.color(-1.0), A);
        assert_eq!(s.color(0.0), A);
        assert_eq!(s.color(4.99), A);
        assert_eq!(s.color(5.0), B);
        assert_eq!(s.color(9.99), B);
        assert_eq!(s.color(10.0), C);
        assert_eq!(s.color(100.0), C);
    }

    #[test]
    fn test_rejects_non_ascending() {
        let err = ValueScale::new(vec![0.0, 5.0, 4.0], vec![A, B, C], true, false).unwrap_err();
        assert_eq!(err.phase, "scale");
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        assert!(ValueScale::new(vec![0.0, 5.0, 10.0], vec![A, B], true, false).is_err());
    }

    #[test]
    fn test_rejects_single_breakpoint() {
        assert!(ValueScale::new(vec![0.0], vec![A], true, false).is_err());
    }
}
