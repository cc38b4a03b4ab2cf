//! Graph model: configuration, random generation, highlight resolution and
//! the color transforms the chart applies to them.

pub mod color;
pub mod config;
pub mod error;
pub mod generate;
pub mod highlight;
pub mod types;

pub use color::Rgb;
pub use config::{Config, ConfigField};
pub use error::{ColorError, ConfigError, ModelResult, NodeIdError};
pub use generate::{generate, generate_with_rng};
pub use highlight::{Highlight, toggle_selection};
pub use types::{Edge, Node, NodeId, NodeKind, SankeyData};
