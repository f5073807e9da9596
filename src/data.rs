//! Satellite tree data model.
//!
//! A chart renders one `Satellite` tree: the root ("sun") carries first-level
//! satellites ("planets"), each of which carries second-level satellites
//! ("moons"). The layout engine reads exactly two levels below the root;
//! anything deeper is carried along but never drawn.
//!
//! No positions live here — layout is a separate, derived structure
//! (see `render::layout`), so the input tree stays immutable.

use serde::{Deserialize, Serialize};

/// One node of the chart hierarchy: a label, a numeric value, and children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub label: String,
    pub value: f32,
    #[serde(default)]
    pub satellites: Vec<Satellite>,
}

impl Satellite {
    /// Leaf node with no children.
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
            satellites: Vec::new(),
        }
    }

    /// Node with children attached.
    pub fn with_satellites(
        label: impl Into<String>,
        value: f32,
        satellites: Vec<Satellite>,
    ) -> Self {
        Self {
            label: label.into(),
            value,
            satellites,
        }
    }

    /// Recursively count all nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.satellites.iter().map(|s| s.node_count()).sum::<usize>()
    }

    /// Number of first-level satellites (planets when `self` is the sun).
    pub fn planet_count(&self) -> usize {
        self.satellites.len()
    }

    /// Number of second-level satellites (moons when `self` is the sun).
    pub fn moon_count(&self) -> usize {
        self.satellites.iter().map(|p| p.satellites.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Satellite {
        Satellite::with_satellites(
            "sun",
            5.0,
            vec![
                Satellite::with_satellites(
                    "a",
                    3.0,
                    vec![Satellite::new("a1", 1.0), Satellite::new("a2", 2.0)],
                ),
                Satellite::new("b", 7.0),
            ],
        )
    }

    #[test]
    fn test_counts() {
        let sun = sample();
        assert_eq!(sun.node_count(), 5);
        assert_eq!(sun.planet_count(), 2);
        assert_eq!(sun.moon_count(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let sun = sample();
        let json = serde_json::to_string(&sun).unwrap();
        let back: Satellite = serde_json::from_str(&json).unwrap();
        assert_eq!(back.label, "sun");
        assert_eq!(back.node_count(), 5);
        assert_eq!(back.satellites[0].satellites[1].value, 2.0);
    }

    #[test]
    fn test_missing_satellites_field_defaults_empty() {
        let leaf: Satellite = serde_json::from_str(r#"{"label":"m","value":1.5}"#).unwrap();
        assert!(leaf.satellites.is_empty());
    }
}
