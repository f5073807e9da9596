//! Entrance-animation choreography.
//!
//! The whole reveal is one declarative table: per visual group a delay and a
//! duration, both fractions of the configured total, plus an easing curve.
//! The renderer asks for `progress(group, elapsed)` each frame and scales or
//! fades that group accordingly — no timers live here.

use std::f32::consts::TAU;

/// Named easing curves for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    CubicOut,
    /// Spring-style overshoot; the default for entrance shape transitions.
    ElasticOut,
}

impl Ease {
    /// Evaluate the curve at `t ∈ [0, 1]`.
    ///
    /// `ElasticOut` may return values above 1 inside the window; all curves
    /// are exactly 0 at t=0 and 1 at t=1.
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Ease::Linear => t,
            Ease::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Ease::ElasticOut => {
                let c = TAU / 3.0;
                2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c).sin() + 1.0
            }
        }
    }
}

/// Visual groups revealed by the entrance animation, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Orbits,
    Sun,
    SunLabel,
    Crown,
    Planets,
    PlanetLabels,
    Moons,
    MoonLabels,
}

#[derive(Debug, Clone, Copy)]
struct Stage {
    group: Group,
    /// Start, as a fraction of the total duration.
    delay: f32,
    /// Window length, as a fraction of the total duration.
    duration: f32,
    ease: Ease,
}

/// The entrance timeline for one chart instance.
#[derive(Debug, Clone)]
pub struct Timeline {
    total_ms: f32,
    stages: Vec<Stage>,
}

impl Timeline {
    /// Build the staggered reveal table.
    ///
    /// Shape groups animate with `shape_ease`; every text group fades in
    /// linearly after its shape group has mostly landed. The fractions are
    /// presentation tuning, the staggering itself is the point.
    pub fn new(total_ms: f32, shape_ease: Ease) -> Self {
        let stages = vec![
            Stage { group: Group::Orbits, delay: 0.00, duration: 0.20, ease: Ease::Linear },
            Stage { group: Group::Sun, delay: 0.05, duration: 0.30, ease: shape_ease },
            Stage { group: Group::SunLabel, delay: 0.35, duration: 0.15, ease: Ease::Linear },
            Stage { group: Group::Crown, delay: 0.15, duration: 0.30, ease: shape_ease },
            Stage { group: Group::Planets, delay: 0.30, duration: 0.30, ease: shape_ease },
            Stage { group: Group::PlanetLabels, delay: 0.55, duration: 0.15, ease: Ease::Linear },
            Stage { group: Group::Moons, delay: 0.55, duration: 0.25, ease: shape_ease },
            Stage { group: Group::MoonLabels, delay: 0.80, duration: 0.15, ease: Ease::Linear },
        ];
        Self { total_ms, stages }
    }

    /// Eased progress of `group` at `elapsed_ms`: 0 before its window, 1
    /// after it, eased (possibly overshooting) inside it.
    pub fn progress(&self, group: Group, elapsed_ms: f32) -> f32 {
        let stage = self
            .stages
            .iter()
            .find(|s| s.group == group)
            .copied()
            .unwrap_or(Stage { group, delay: 0.0, duration: 1.0, ease: Ease::Linear });

        let frac = (elapsed_ms / self.total_ms).clamp(0.0, 1.0);
        let t = (frac - stage.delay) / stage.duration;
        stage.ease.apply(t.clamp(0.0, 1.0))
    }

    /// Whether every group has reached its final state.
    pub fn finished(&self, elapsed_ms: f32) -> bool {
        elapsed_ms >= self.total_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::CubicOut, Ease::ElasticOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert_eq!(ease.apply(-0.5), 0.0);
            assert_eq!(ease.apply(2.0), 1.0);
        }
    }

    #[test]
    fn test_elastic_overshoots() {
        let peak = (0..100)
            .map(|i| Ease::ElasticOut.apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.05, "elastic peak {} should overshoot", peak);
    }

    #[test]
    fn test_cubic_is_monotone_and_front_loaded() {
        let half = Ease::CubicOut.apply(0.5);
        assert!(half > 0.5);
        let mut prev = 0.0;
        for i in 1..=20 {
            let v = Ease::CubicOut.apply(i as f32 / 20.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_groups_are_staggered() {
        let tl = Timeline::new(2000.0, Ease::ElasticOut);
        let start = |g| {
            tl.stages
                .iter()
                .find(|s| s.group == g)
                .map(|s| s.delay)
                .unwrap()
        };
        assert!(start(Group::Orbits) < start(Group::Sun));
        assert!(start(Group::Sun) < start(Group::Crown));
        assert!(start(Group::Crown) < start(Group::Planets));
        assert!(start(Group::Planets) < start(Group::Moons));
        // Text fades begin after their shapes start moving.
        assert!(start(Group::SunLabel) > start(Group::Sun));
        assert!(start(Group::PlanetLabels) > start(Group::Planets));
        assert!(start(Group::MoonLabels) > start(Group::Moons));
    }

    #[test]
    fn test_progress_window() {
        let tl = Timeline::new(2000.0, Ease::ElasticOut);
        // Moons: delay 0.55 → start at 1100 ms of 2000.
        assert_eq!(tl.progress(Group::Moons, 0.0), 0.0);
        assert_eq!(tl.progress(Group::Moons, 1000.0), 0.0);
        assert!(tl.progress(Group::Moons, 1500.0) > 0.0);
        assert_eq!(tl.progress(Group::Moons, 2000.0), 1.0);
        assert_eq!(tl.progress(Group::Moons, 1e9), 1.0);
    }

    #[test]
    fn test_finished() {
        let tl = Timeline::new(750.0, Ease::CubicOut);
        assert!(!tl.finished(749.0));
        assert!(tl.finished(750.0));
    }
}
