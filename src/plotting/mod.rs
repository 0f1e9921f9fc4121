//! Chart rendering.
//!
//! Charts consume `{key, value}` rows and are drawn by `plotters` into an
//! in-memory RGB bitmap that the UI uploads as a texture.

mod cache;
pub mod chart;
pub mod styles;

#[cfg(test)]
mod tests;

pub use cache::{ChartCache, ChartKey};
pub use chart::{render_chart, ChartData, ChartId, ChartSpec, PlotError, RenderedChart, ValueFormat};

/// One bar, slice or point: a category key and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub key: String,
    pub value: f64,
}

impl ChartRow {
    pub fn new(key: &str, value: f64) -> Self {
        Self {
            key: key.to_string(),
            value,
        }
    }
}

/// A named line of rows sharing one x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<ChartRow>,
}
