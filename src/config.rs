//! Chart configuration: user options, derived geometry, validation.
//!
//! `ChartOptions` is what the embedder hands over; `Geometry` is computed from
//! it exactly once at construction and never mutated afterwards. Changing
//! geometry means building a new chart instance.

use crate::color::Rgba;
use crate::render::timeline::Ease;

/// Default value breakpoints.
pub const DEFAULT_VALUE_RANGE: [f32; 3] = [0.0, 5.0, 10.0];

/// Default diverging palette: red → amber → green.
pub const DEFAULT_COLOR_RANGE: [Rgba; 3] = [
    Rgba::rgb(0xfc, 0x2d, 0x2d),
    Rgba::rgb(0xff, 0xaf, 0x2d),
    Rgba::rgb(0x2d, 0xc2, 0x2d),
];

/// Label anchors sit at this multiple of the sun-to-planet distance.
pub const LABEL_OFFSET_RATIO: f32 = 1.6;

/// Hovered discs grow by this factor.
pub const HOVER_SCALE: f32 = 1.25;

/// Hovered orbit strokes widen by this factor.
pub const HOVER_ORBIT_WIDEN: f32 = 2.5;

/// Error raised when a chart cannot be constructed from its inputs.
pub struct ChartError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::fmt::Debug for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// User-facing chart options.
///
/// `width`/`height` left as `None` resolve to the measured container size at
/// construction time.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Ascending value breakpoints for the color scale.
    pub value_range: Vec<f32>,
    /// One color per breakpoint.
    pub color_range: Vec<Rgba>,
    /// Disc outline width.
    pub stroke_width: f32,
    /// Guide-circle stroke width for the sun orbit.
    pub sun_orbit_width: f32,
    /// Guide-circle stroke width for each planet's moon orbit.
    pub planet_orbit_width: f32,
    pub orbit_color: Rgba,
    pub font_color: Rgba,
    /// sun-to-planet distance / planet-to-moon distance.
    pub distance_ratio: f32,
    /// Total entrance animation length, milliseconds.
    pub animation_duration: f32,
    /// Hover transition length, milliseconds.
    pub transition_duration: f32,
    /// Clamp out-of-range values to the endpoint colors.
    pub clamp_scale: bool,
    /// Stepped (right-open interval) scale instead of continuous interpolation.
    pub intervaled_values: bool,
    /// Easing for entrance shape transitions (fades stay linear).
    pub ease: Ease,
    pub label_offset_ratio: f32,
    pub hover_scale: f32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            value_range: DEFAULT_VALUE_RANGE.to_vec(),
            color_range: DEFAULT_COLOR_RANGE.to_vec(),
            stroke_width: 0.5,
            sun_orbit_width: 1.0,
            planet_orbit_width: 1.0,
            orbit_color: Rgba::rgb(140, 140, 150),
            font_color: Rgba::rgb(25, 25, 38),
            distance_ratio: 4.0,
            animation_duration: 2000.0,
            transition_duration: 750.0,
            clamp_scale: true,
            intervaled_values: false,
            ease: Ease::ElasticOut,
            label_offset_ratio: LABEL_OFFSET_RATIO,
            hover_scale: HOVER_SCALE,
        }
    }
}

impl ChartOptions {
    /// Fail-fast option checks. Value/color range consistency is checked by
    /// `scale::ValueScale::new`, which owns those inputs.
    pub fn validate(&self) -> Result<(), ChartError> {
        if !(self.distance_ratio.is_finite() && self.distance_ratio > 0.0) {
            return Err(ChartError {
                message: format!("distance_ratio must be positive, got {}", self.distance_ratio),
                phase: "options",
            });
        }
        if !(self.animation_duration.is_finite() && self.animation_duration > 0.0) {
            return Err(ChartError {
                message: format!(
                    "animation_duration must be positive, got {}",
                    self.animation_duration
                ),
                phase: "options",
            });
        }
        Ok(())
    }
}

/// Geometry derived once from width/height/distance_ratio. Read-only.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub width: f32,
    pub height: f32,
    pub cx: f32,
    pub cy: f32,
    pub outer_sun_radius: f32,
    pub inner_sun_radius: f32,
    pub planet_radius: f32,
    pub moon_radius: f32,
    pub sun_to_planet: f32,
    pub planet_to_moon: f32,
}

impl Geometry {
    /// Derive the radial geometry for a `width × height` surface.
    ///
    /// `distance_ratio` ties the two orbit radii together:
    /// `sun_to_planet / planet_to_moon == distance_ratio`, with the outermost
    /// moon just touching the surface edge.
    pub fn derive(width: f32, height: f32, distance_ratio: f32) -> Result<Self, ChartError> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(ChartError {
                message: format!("surface size must be positive, got {}x{}", width, height),
                phase: "geometry",
            });
        }

        let outer_sun_radius = width.min(height) / 10.0;
        let moon_radius = height / 40.0;
        let sun_to_planet = (height / 2.0 - moon_radius) / (1.0 + 1.0 / distance_ratio);

        Ok(Self {
            width,
            height,
            cx: width / 2.0,
            cy: height / 2.0,
            outer_sun_radius,
            inner_sun_radius: outer_sun_radius * 0.8,
            planet_radius: height / 20.0,
            moon_radius,
            sun_to_planet,
            planet_to_moon: sun_to_planet / distance_ratio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_derivation() {
        let g = Geometry::derive(600.0, 400.0, 4.0).unwrap();
        assert_eq!(g.cx, 300.0);
        assert_eq!(g.cy, 200.0);
        assert_eq!(g.outer_sun_radius, 40.0);
        assert_eq!(g.inner_sun_radius, 32.0);
        assert_eq!(g.planet_radius, 20.0);
        assert_eq!(g.moon_radius, 10.0);
        // sun_to_planet + planet_to_moon + moon_radius reaches the top edge
        assert!((g.sun_to_planet + g.planet_to_moon + g.moon_radius - 200.0).abs() < 1e-3);
        assert!((g.sun_to_planet / g.planet_to_moon - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_distance_ratio_compresses_moons() {
        let wide = Geometry::derive(600.0, 400.0, 2.0).unwrap();
        let tight = Geometry::derive(600.0, 400.0, 8.0).unwrap();
        assert!(tight.planet_to_moon < wide.planet_to_moon);
        assert!(tight.sun_to_planet > wide.sun_to_planet);
    }

    #[test]
    fn test_geometry_rejects_bad_size() {
        assert!(Geometry::derive(0.0, 400.0, 4.0).is_err());
        assert!(Geometry::derive(600.0, -1.0, 4.0).is_err());
        assert!(Geometry::derive(f32::NAN, 400.0, 4.0).is_err());
    }

    #[test]
    fn test_options_default_valid() {
        assert!(ChartOptions::default().validate().is_ok());
    }

    #[test]
    fn test_options_reject_bad_distance_ratio() {
        let opts = ChartOptions {
            distance_ratio: 0.0,
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert_eq!(err.phase, "options");
    }
}
