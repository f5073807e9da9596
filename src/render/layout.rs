//! Radial layout engine.
//!
//! Pure function of `(satellite tree, geometry) -> OrbitLayout`. The input
//! tree is never touched; positions live in a parallel structure so the
//! renderer cannot depend on a hidden mutation pass.
//!
//! Angle convention (fixed, not arbitrary): 0 points up, positive rotates
//! clockwise. Planets map through `(sin, -cos)`, moons through `(sin, +cos)`.

use std::f32::consts::TAU;

use crate::config::Geometry;
use crate::data::Satellite;

/// A computed 2-D position on the chart surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Pos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Layout of one moon: its center plus the owning planet's center, kept so
/// connecting geometry can be drawn relative to the planet.
#[derive(Debug, Clone, Copy)]
pub struct MoonLayout {
    pub center: Pos,
    pub parent: Pos,
}

/// Layout of one planet: center, outward label anchor, moon ring.
#[derive(Debug, Clone)]
pub struct PlanetLayout {
    pub center: Pos,
    pub label: Pos,
    pub moons: Vec<MoonLayout>,
}

/// Complete computed layout for a chart instance.
#[derive(Debug, Clone)]
pub struct OrbitLayout {
    pub sun: Pos,
    pub planets: Vec<PlanetLayout>,
}

/// Compute the radial layout of `root` on the given geometry.
///
/// Total over well-formed trees. An empty satellite list at either level is
/// skipped before any division, so the output never contains NaN or infinity.
pub fn compute_layout(root: &Satellite, geo: &Geometry, label_offset_ratio: f32) -> OrbitLayout {
    let sun = Pos::new(geo.cx, geo.cy);

    if root.satellites.is_empty() {
        return OrbitLayout {
            sun,
            planets: Vec::new(),
        };
    }

    let planet_step = TAU / root.satellites.len() as f32;
    let planets = root
        .satellites
        .iter()
        .enumerate()
        .map(|(i, planet)| {
            // Half-slot offset centers the planet within its crown arc.
            let angle = planet_step * (i as f32 + 0.5);
            let center = Pos::new(
                geo.cx + geo.sun_to_planet * angle.sin(),
                geo.cy - geo.sun_to_planet * angle.cos(),
            );
            let label = Pos::new(
                geo.cx + geo.sun_to_planet * label_offset_ratio * angle.sin(),
                geo.cy - geo.sun_to_planet * label_offset_ratio * angle.cos(),
            );
            PlanetLayout {
                center,
                label,
                moons: layout_moons(planet, center, geo.planet_to_moon),
            }
        })
        .collect();

    OrbitLayout { sun, planets }
}

fn layout_moons(planet: &Satellite, center: Pos, radius: f32) -> Vec<MoonLayout> {
    if planet.satellites.is_empty() {
        return Vec::new();
    }

    // No half-slot offset at this level: the first moon sits at angle 0.
    let moon_step = TAU / planet.satellites.len() as f32;
    (0..planet.satellites.len())
        .map(|j| {
            let angle = moon_step * j as f32;
            MoonLayout {
                center: Pos::new(
                    center.x + radius * angle.sin(),
                    center.y + radius * angle.cos(),
                ),
                parent: center,
            }
        })
        .collect()
}
