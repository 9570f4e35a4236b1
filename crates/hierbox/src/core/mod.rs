//! Core building blocks shared by the layout passes
//!
//! Geometry types, configuration, text measurement and wrapping, and the
//! rendering backends the layout driver paints onto.

mod ascii;
mod backend;
mod canvas;
mod color;
mod config;
mod error;
pub mod logging;
mod metrics;
mod svg;
mod text;
mod types;

pub use ascii::*;
pub use backend::*;
pub use canvas::*;
pub use color::*;
pub use config::*;
pub use error::*;
pub use logging::*;
pub use metrics::*;
pub use svg::*;
pub use text::*;
pub use types::*;
