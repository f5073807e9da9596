//! Scene generation: positioned tree + value scale → flat draw commands.
//!
//! Everything the widget paints is described here first, as a plain list of
//! primitives with resolved positions, sizes and colors. The pass is pure, so
//! the visual encoding is testable without touching the rendering library.

use std::f32::consts::TAU;

use crate::color::Rgba;
use crate::config::{ChartOptions, Geometry};
use crate::data::Satellite;
use crate::render::layout::{OrbitLayout, Pos};
use crate::render::timeline::Group;
use crate::scale::ValueScale;

/// Crown ring inner edge, as a fraction of the outer sun radius.
pub const CROWN_INNER_RATIO: f32 = 0.9;

/// Outer-radius growth of a crown arc spotlighted by hover.
pub const CROWN_SPOTLIGHT: f32 = 1.6;

/// Identity of a hoverable shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitId {
    Planet(usize),
    /// Moon `j` of planet `i`.
    Moon(usize, usize),
}

/// Which orbit guide a circle is: the sun's planet ring, or planet `i`'s
/// moon ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitLevel {
    Sun,
    Planet(usize),
}

/// One draw command. Radii and widths are the at-rest values; the widget
/// applies entrance progress and hover factors at paint time.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Thin guide circle marking an orbit radius.
    Orbit {
        center: Pos,
        radius: f32,
        width: f32,
        color: Rgba,
        level: OrbitLevel,
    },
    /// One crown segment around the sun, aligned with planet `planet`.
    CrownArc {
        center: Pos,
        inner_radius: f32,
        outer_radius: f32,
        start_angle: f32,
        end_angle: f32,
        color: Rgba,
        planet: usize,
    },
    /// Filled circle for the sun, a planet, or a moon.
    Disc {
        center: Pos,
        radius: f32,
        fill: Rgba,
        stroke_width: f32,
        group: Group,
        hit: Option<HitId>,
    },
    /// Text anchored at its center point.
    Label {
        pos: Pos,
        text: String,
        font_size: f32,
        color: Rgba,
        group: Group,
    },
}

/// Flat, ordered draw-command list for one chart.
#[derive(Debug, Clone)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

/// Fixed one-decimal value display, as shown in labels and tooltips.
pub fn format_value(value: f32) -> String {
    format!("{:.1}", value)
}

/// Build the draw-command list. Pure; draw order is back-to-front:
/// orbits, crown, sun, planets, moons, then all text.
pub fn build_scene(
    root: &Satellite,
    layout: &OrbitLayout,
    scale: &ValueScale,
    geo: &Geometry,
    opts: &ChartOptions,
) -> Scene {
    let mut prims = Vec::new();
    let planet_count = layout.planets.len();

    // Orbit guides
    if planet_count > 0 {
        prims.push(Primitive::Orbit {
            center: layout.sun,
            radius: geo.sun_to_planet,
            width: opts.sun_orbit_width,
            color: opts.orbit_color,
            level: OrbitLevel::Sun,
        });
    }
    for (i, planet) in layout.planets.iter().enumerate() {
        if !planet.moons.is_empty() {
            prims.push(Primitive::Orbit {
                center: planet.center,
                radius: geo.planet_to_moon,
                width: opts.planet_orbit_width,
                color: opts.orbit_color,
                level: OrbitLevel::Planet(i),
            });
        }
    }

    // Crown: one arc per planet, colored by that planet's value, spanning
    // the slot the planet is centered in.
    if planet_count > 0 {
        let step = TAU / planet_count as f32;
        for (i, sat) in root.satellites.iter().enumerate() {
            prims.push(Primitive::CrownArc {
                center: layout.sun,
                inner_radius: geo.outer_sun_radius * CROWN_INNER_RATIO,
                outer_radius: geo.outer_sun_radius,
                start_angle: step * i as f32,
                end_angle: step * (i + 1) as f32,
                color: scale.color(sat.value),
                planet: i,
            });
        }
    }

    // Sun disc
    prims.push(Primitive::Disc {
        center: layout.sun,
        radius: geo.inner_sun_radius,
        fill: scale.color(root.value),
        stroke_width: opts.stroke_width,
        group: Group::Sun,
        hit: None,
    });

    // Planet and moon discs
    for (i, (planet, sat)) in layout.planets.iter().zip(&root.satellites).enumerate() {
        prims.push(Primitive::Disc {
            center: planet.center,
            radius: geo.planet_radius,
            fill: scale.color(sat.value),
            stroke_width: opts.stroke_width,
            group: Group::Planets,
            hit: Some(HitId::Planet(i)),
        });
        for (j, (moon, moon_sat)) in planet.moons.iter().zip(&sat.satellites).enumerate() {
            prims.push(Primitive::Disc {
                center: moon.center,
                radius: geo.moon_radius,
                fill: scale.color(moon_sat.value),
                stroke_width: opts.stroke_width,
                group: Group::Moons,
                hit: Some(HitId::Moon(i, j)),
            });
        }
    }

    // Text layer: sun label, planet label/value pairs, moon labels.
    prims.push(Primitive::Label {
        pos: layout.sun,
        text: root.label.clone(),
        font_size: geo.inner_sun_radius * 0.6,
        color: opts.font_color,
        group: Group::SunLabel,
    });
    for (planet, sat) in layout.planets.iter().zip(&root.satellites) {
        prims.push(Primitive::Label {
            pos: planet.label,
            text: sat.label.clone(),
            font_size: geo.planet_radius * 0.8,
            color: opts.font_color,
            group: Group::PlanetLabels,
        });
        prims.push(Primitive::Label {
            pos: planet.center,
            text: format_value(sat.value),
            font_size: geo.planet_radius * 0.7,
            color: opts.font_color,
            group: Group::PlanetLabels,
        });
        for (moon, moon_sat) in planet.moons.iter().zip(&sat.satellites) {
            prims.push(Primitive::Label {
                pos: moon.center,
                text: moon_sat.label.clone(),
                font_size: geo.moon_radius * 0.8,
                color: opts.font_color,
                group: Group::MoonLabels,
            });
        }
    }

    Scene { primitives: prims }
}
