//! Report renderers with trait-based format dispatch.

pub mod json;
pub mod text;

use crate::model::ValidationReport;
use anyhow::{anyhow, Result};

/// Trait for rendering validation reports into a specific output format.
pub trait Renderer {
    fn render(&self, reports: &[ValidationReport]) -> String;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "text" => Ok(Box::new(text::TextRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use text or json", format)),
    }
}
