//! The chart widget: construction pipeline plus egui painting.
//!
//! `SatChart::new` runs the whole derivation up front (options → geometry →
//! layout → scale → scene → timeline) and fails fast on malformed input.
//! `show` only replays the precomputed scene each frame, applying entrance
//! progress and hover transitions on top of the at-rest values. Hover
//! transitions go through egui's animation scheduler, so an interrupted
//! transition is simply overridden by the newest target value.

use std::time::Instant;

use egui::epaint::PathShape;
use egui::{Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Vec2};

use crate::color::Rgba;
use crate::config::{ChartError, ChartOptions, Geometry, HOVER_ORBIT_WIDEN};
use crate::data::Satellite;
use crate::render::layout::{compute_layout, OrbitLayout, Pos};
use crate::render::scene::{
    build_scene, format_value, HitId, OrbitLevel, Primitive, Scene, CROWN_SPOTLIGHT,
};
use crate::render::timeline::{Group, Timeline};
use crate::scale::ValueScale;

/// Disc outline color.
const STROKE_COLOR: Color32 = Color32::BLACK;

/// Angular inset on each side of a crown arc, radians.
const CROWN_GAP: f32 = 0.03;

/// A radial orbit chart instance. Owns its data tree, derived geometry,
/// value scale and draw commands exclusively; dropping it releases
/// everything.
#[derive(Debug)]
pub struct SatChart {
    data: Satellite,
    options: ChartOptions,
    geometry: Geometry,
    scale: ValueScale,
    layout: OrbitLayout,
    scene: Scene,
    timeline: Timeline,
    /// Set on the first `show` so the entrance starts when the chart
    /// actually appears.
    started: Option<Instant>,
    hovered: Option<HitId>,
}

impl SatChart {
    /// Build a chart for `data` with the given options.
    ///
    /// `measured` is the container's rendered size, queried once by the
    /// caller; explicit `options.width`/`height` take precedence over it.
    pub fn new(
        data: Satellite,
        options: ChartOptions,
        measured: (f32, f32),
    ) -> Result<Self, ChartError> {
        // Phase 1: options
        options.validate()?;

        // Phase 2: geometry, fixed for the lifetime of the instance
        let width = options.width.unwrap_or(measured.0);
        let height = options.height.unwrap_or(measured.1);
        let geometry = Geometry::derive(width, height, options.distance_ratio)?;

        // Phase 3: value scale
        let scale = ValueScale::new(
            options.value_range.clone(),
            options.color_range.clone(),
            options.clamp_scale,
            options.intervaled_values,
        )?;

        // Phase 4: layout + scene
        let layout = compute_layout(&data, &geometry, options.label_offset_ratio);
        let scene = build_scene(&data, &layout, &scale, &geometry, &options);
        let timeline = Timeline::new(options.animation_duration, options.ease);

        log::debug!(
            "satchart: {} planets / {} moons on {:.0}x{:.0}, {} draw commands",
            data.planet_count(),
            data.moon_count(),
            width,
            height,
            scene.primitives.len(),
        );

        Ok(Self {
            data,
            options,
            geometry,
            scale,
            layout,
            scene,
            timeline,
            started: None,
            hovered: None,
        })
    }

    /// The surface size this chart was built for.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.geometry.width, self.geometry.height)
    }

    /// Restart the entrance animation from the beginning.
    pub fn replay(&mut self) {
        self.started = None;
    }

    /// Draw the chart and handle hover interaction.
    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(self.size(), Sense::hover());
        let painter = ui.painter_at(rect);
        let origin = rect.min.to_vec2();
        let ctx = ui.ctx().clone();

        let started = *self.started.get_or_insert_with(Instant::now);
        let elapsed_ms = started.elapsed().as_secs_f32() * 1000.0;

        self.hovered = response
            .hover_pos()
            .and_then(|pointer| self.hit_test(pointer - origin));

        let transition = self.options.transition_duration / 1000.0;
        let anim = |id: egui::Id, on: bool| {
            ctx.animate_value_with_time(id, if on { 1.0 } else { 0.0 }, transition)
        };

        for prim in &self.scene.primitives {
            match prim {
                Primitive::Orbit { center, radius, width, color, level } => {
                    let fade = self.timeline.progress(Group::Orbits, elapsed_ms);
                    if fade <= 0.0 {
                        continue;
                    }
                    // A hovered satellite widens the orbit it travels on.
                    let on = match level {
                        OrbitLevel::Sun => matches!(self.hovered, Some(HitId::Planet(_))),
                        OrbitLevel::Planet(i) => {
                            matches!(self.hovered, Some(HitId::Moon(p, _)) if p == *i)
                        }
                    };
                    let widen =
                        1.0 + (HOVER_ORBIT_WIDEN - 1.0) * anim(response.id.with(("orbit", *level)), on);
                    painter.circle_stroke(
                        to_pos2(*center, origin),
                        *radius,
                        Stroke::new(width * widen, fade_color(*color, fade)),
                    );
                }
                Primitive::CrownArc {
                    center,
                    inner_radius,
                    outer_radius,
                    start_angle,
                    end_angle,
                    color,
                    planet,
                } => {
                    let progress = self.timeline.progress(Group::Crown, elapsed_ms);
                    if progress <= 0.0 {
                        continue;
                    }
                    // Spotlight: the arc aligned with a hovered planet grows
                    // outward; its inner edge stays put.
                    let spot = anim(
                        response.id.with(("crown", *planet)),
                        self.hovered == Some(HitId::Planet(*planet)),
                    );
                    let grow = 1.0 + (CROWN_SPOTLIGHT - 1.0) * spot;
                    let thickness = (outer_radius - inner_radius) * grow * progress;
                    let mid = (inner_radius + (outer_radius - inner_radius) * grow / 2.0) * progress;
                    let points = arc_points(
                        to_pos2(*center, origin),
                        mid,
                        start_angle + CROWN_GAP,
                        end_angle - CROWN_GAP,
                    );
                    painter.add(PathShape::line(
                        points,
                        Stroke::new(thickness, fade_color(*color, progress.min(1.0))),
                    ));
                }
                Primitive::Disc { center, radius, fill, stroke_width, group, hit } => {
                    let progress = self.timeline.progress(*group, elapsed_ms);
                    if progress <= 0.0 {
                        continue;
                    }
                    let grow = match hit {
                        Some(id) => anim(response.id.with(("disc", *id)), self.hovered == Some(*id)),
                        None => 0.0,
                    };
                    let r = radius * progress * (1.0 + (self.options.hover_scale - 1.0) * grow);
                    if r > 0.1 {
                        painter.circle(
                            to_pos2(*center, origin),
                            r,
                            color32(*fill),
                            Stroke::new(*stroke_width, STROKE_COLOR),
                        );
                    }
                }
                Primitive::Label { pos, text, font_size, color, group } => {
                    let fade = self.timeline.progress(*group, elapsed_ms).min(1.0);
                    if fade <= 0.0 {
                        continue;
                    }
                    painter.text(
                        to_pos2(*pos, origin),
                        Align2::CENTER_CENTER,
                        text,
                        FontId::proportional(*font_size),
                        fade_color(*color, fade),
                    );
                }
            }
        }

        if let Some(hit) = self.hovered {
            self.show_tooltip(ui, &response, hit);
        }

        if !self.timeline.finished(elapsed_ms) {
            ctx.request_repaint();
        }

        response
    }

    /// Pointer hit test in chart-local coordinates. Moons are tested before
    /// planets so an overlapping moon wins; a currently hovered shape is
    /// tested at its enlarged radius to avoid flicker at the edge.
    fn hit_test(&self, p: Pos2) -> Option<HitId> {
        let grow = |id: HitId| {
            if self.hovered == Some(id) {
                self.options.hover_scale
            } else {
                1.0
            }
        };

        for (i, planet) in self.layout.planets.iter().enumerate() {
            for (j, moon) in planet.moons.iter().enumerate() {
                let id = HitId::Moon(i, j);
                if dist(p, moon.center) <= self.geometry.moon_radius * grow(id) {
                    return Some(id);
                }
            }
        }
        for (i, planet) in self.layout.planets.iter().enumerate() {
            let id = HitId::Planet(i);
            if dist(p, planet.center) <= self.geometry.planet_radius * grow(id) {
                return Some(id);
            }
        }
        None
    }

    fn show_tooltip(&self, ui: &egui::Ui, response: &egui::Response, hit: HitId) {
        let sat = match hit {
            HitId::Planet(i) => &self.data.satellites[i],
            HitId::Moon(i, j) => &self.data.satellites[i].satellites[j],
        };
        let value_color = color32(self.scale.color(sat.value));

        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            response.id.with("tooltip"),
            |ui| {
                ui.horizontal(|ui| {
                    ui.label(format!("{}:", sat.label));
                    ui.label(RichText::new(format_value(sat.value)).color(value_color).strong());
                });
            },
        );
    }
}

fn to_pos2(p: Pos, origin: Vec2) -> Pos2 {
    Pos2::new(p.x + origin.x, p.y + origin.y)
}

fn dist(p: Pos2, q: Pos) -> f32 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    (dx * dx + dy * dy).sqrt()
}

fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

fn fade_color(c: Rgba, fade: f32) -> Color32 {
    let a = (c.a as f32 * fade.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, a)
}

/// Sample an arc in the chart's angle convention (0 = up, clockwise).
fn arc_points(center: Pos2, radius: f32, start: f32, end: f32) -> Vec<Pos2> {
    let span = (end - start).max(0.0);
    let n = ((span / 0.05).ceil() as usize).max(2);
    (0..=n)
        .map(|k| {
            let a = start + span * k as f32 / n as f32;
            Pos2::new(center.x + radius * a.sin(), center.y - radius * a.cos())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COLOR_RANGE;

    fn sample() -> Satellite {
        Satellite::with_satellites(
            "sun",
            5.0,
            vec![
                Satellite::with_satellites(
                    "p0",
                    2.0,
                    vec![Satellite::new("m0", 1.0), Satellite::new("m1", 8.0)],
                ),
                Satellite::new("p1", 9.0),
            ],
        )
    }

    #[test]
    fn test_construction_pipeline() {
        let chart = SatChart::new(sample(), ChartOptions::default(), (600.0, 400.0)).unwrap();
        assert_eq!(chart.size(), Vec2::new(600.0, 400.0));
        assert_eq!(chart.layout.planets.len(), 2);
        assert!(!chart.scene.primitives.is_empty());
    }

    #[test]
    fn test_explicit_size_beats_measured() {
        let opts = ChartOptions {
            width: Some(300.0),
            height: Some(200.0),
            ..Default::default()
        };
        let chart = SatChart::new(sample(), opts, (999.0, 999.0)).unwrap();
        assert_eq!(chart.size(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_rejects_bad_options() {
        let opts = ChartOptions {
            value_range: vec![10.0, 5.0, 0.0],
            ..Default::default()
        };
        let err = SatChart::new(sample(), opts, (600.0, 400.0)).unwrap_err();
        assert_eq!(err.phase, "scale");

        let err = SatChart::new(sample(), ChartOptions::default(), (0.0, 400.0)).unwrap_err();
        assert_eq!(err.phase, "geometry");
    }

    #[test]
    fn test_hit_test_targets() {
        let chart = SatChart::new(sample(), ChartOptions::default(), (600.0, 400.0)).unwrap();

        let p0 = chart.layout.planets[0].center;
        assert_eq!(chart.hit_test(Pos2::new(p0.x, p0.y)), Some(HitId::Planet(0)));

        let m1 = chart.layout.planets[0].moons[1].center;
        assert_eq!(chart.hit_test(Pos2::new(m1.x, m1.y)), Some(HitId::Moon(0, 1)));

        // The sun is not hoverable.
        assert_eq!(chart.hit_test(Pos2::new(300.0, 200.0)), None);
    }

    #[test]
    fn test_tooltip_color_comes_from_scale() {
        let chart = SatChart::new(sample(), ChartOptions::default(), (600.0, 400.0)).unwrap();
        // p1 has value 9.0 — near the top of the default range, well into
        // the amber→green segment.
        let c = chart.scale.color(9.0);
        assert_ne!(c, DEFAULT_COLOR_RANGE[0]);
    }

    #[test]
    fn test_arc_points_follow_angle_convention() {
        let pts = arc_points(Pos2::new(0.0, 0.0), 10.0, 0.0, std::f32::consts::PI);
        let first = pts.first().unwrap();
        let last = pts.last().unwrap();
        // Angle 0 points up, π points down.
        assert!((first.x - 0.0).abs() < 1e-4 && (first.y + 10.0).abs() < 1e-4);
        assert!((last.x - 0.0).abs() < 1e-4 && (last.y - 10.0).abs() < 1e-4);
    }
}
