//! Helper functions shared by the CLI, the exporter and the server

mod date;
mod image;

pub use date::*;
pub use image::*;
