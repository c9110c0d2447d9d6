use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry of the column-based notations (hierarchical and context).
/// Units are Graphviz inches, y grows upward; statement rows descend
/// below the bias header row at y = 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub total_width: f32,
    pub context_width: f32,
    pub context_offset: f32,
    pub no_bias_width: f32,
    pub column_gap: f32,
    pub row_step: f32,
    pub statement_width: f32,
    pub placeholder_height: f32,
    /// Extra width added to a statement spanning multiple bias columns.
    pub span_padding: f32,
    pub header_space: f32,
    pub min_citation_spacing: f32,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            total_width: 20.0,
            context_width: 3.0,
            context_offset: 8.0,
            no_bias_width: 3.0,
            column_gap: 1.0,
            row_step: 2.0,
            statement_width: 2.0,
            placeholder_height: 0.6,
            span_padding: 2.0,
            header_space: 1.0,
            min_citation_spacing: 1.0,
        }
    }
}

/// Geometry of the bias-oriented block grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasBlockConfig {
    pub min_content_width: f32,
    pub title_char_width: f32,
    pub statement_row_height: f32,
    /// Compaction factor applied to raw content dimensions.
    pub block_scale: f32,
    pub block_spacing: f32,
    pub title_height: f32,
    pub statement_height: f32,
    pub statement_inset: f32,
    pub statement_x_shift: f32,
    pub statement_y_offset: f32,
    pub title_font_size: f32,
    pub statement_font_size: f32,
    pub edge_font_size: f32,
    pub edge_pen_width: f32,
    /// Perpendicular offset of a connection weight label from the edge line.
    pub label_offset: f32,
}

impl Default for BiasBlockConfig {
    fn default() -> Self {
        Self {
            min_content_width: 3.0,
            title_char_width: 0.1,
            statement_row_height: 0.8,
            block_scale: 0.4,
            block_spacing: 3.0,
            title_height: 0.6,
            statement_height: 0.7,
            statement_inset: 0.2,
            statement_x_shift: 1.4,
            statement_y_offset: 1.2,
            title_font_size: 80.0,
            statement_font_size: 70.0,
            edge_font_size: 60.0,
            edge_pen_width: 2.0,
            label_offset: 0.8,
        }
    }
}

/// Parameters of the sequential notation's randomized placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialConfig {
    pub min_gap: f32,
    /// Initial vertical sampling range; widened when sampling is exhausted.
    pub y_range: f32,
    pub widen_factor: f32,
    pub argument_row_y: f32,
    pub argument_jitter: f32,
    pub max_attempts: u32,
    pub overlap_padding: f32,
    pub node_font_size: f32,
    pub edge_font_size: f32,
}

impl Default for SequentialConfig {
    fn default() -> Self {
        Self {
            min_gap: 2.5,
            y_range: 8.0,
            widen_factor: 1.5,
            argument_row_y: -8.0,
            argument_jitter: 2.0,
            max_attempts: 20,
            overlap_padding: 0.5,
            node_font_size: 60.0,
            edge_font_size: 50.0,
        }
    }
}

/// Character-count text sizing used by the sequential notation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub wrap_width: usize,
    pub argument_wrap_width: usize,
    pub char_width: f32,
    pub line_height: f32,
    /// A node wider than this ratio times its height is re-wrapped at half
    /// its wrap width to stay near-square.
    pub squareness_ratio: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            wrap_width: 20,
            argument_wrap_width: 15,
            char_width: 0.1,
            line_height: 0.3,
            squareness_ratio: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_size: f32,
    pub padding: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_size: 20.0,
            padding: 4.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub column: ColumnConfig,
    pub bias: BiasBlockConfig,
    pub sequential: SequentialConfig,
    pub text: TextConfig,
    pub canvas: CanvasConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&contents)?;
    Ok(config)
}
