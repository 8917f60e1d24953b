//! Dash Charts - Chart rendering engine for dashboard panels
//!
//! This crate provides:
//! - Linear scales and domain computation
//! - Headless geometry builders for scatter, bar, line, radar, pie,
//!   box-plot, heat-map and two-column flow (sankey) charts
//! - A scene graph with tooltips, legends and click/hover hit-testing
//! - Atomic scene replacement on an explicit container handle
//! - SVG serialization of rendered scenes
//! - Engine configuration and default value formatting

mod model;
mod error;
mod scale;
mod format;
mod geometry;
mod options;
mod config;
mod layout;
mod scene;
mod render;
mod svg;
mod engine;
mod request;

pub use model::*;
pub use error::*;
pub use scale::*;
pub use format::*;
pub use geometry::*;
pub use options::*;
pub use config::*;
pub use layout::*;
pub use scene::*;
pub use render::*;
pub use svg::*;
pub use engine::*;
pub use request::*;
