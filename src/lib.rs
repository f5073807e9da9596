//! Radial orbit chart: a sun, its planets, their moons.
//!
//! The interesting work is split into pure passes — radial layout, value →
//! color scaling, scene generation, entrance timeline — with one egui-backed
//! widget (`chart::SatChart`) consuming the lot. Construct a chart per
//! dataset/geometry pair and call `show` every frame.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod render;
pub mod scale;
