mod bias;
pub mod collide;
pub mod connections;
mod context;
mod hierarchical;
mod sequential;
mod text;
pub(crate) mod types;

pub use collide::{canvas_size, overlaps, BBox};
pub use connections::{aggregate_bias_connections, pair_key, ConnectionWeight};
pub use types::*;

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{ColumnConfig, LayoutConfig};
use crate::error::Error;
use crate::model::{Graph, Node, NodeKind};
use crate::theme::Theme;

/// The four visual notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    Hierarchical,
    Context,
    Bias,
    Sequential,
}

impl Notation {
    pub const ALL: [Notation; 4] = [
        Notation::Hierarchical,
        Notation::Context,
        Notation::Bias,
        Notation::Sequential,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Notation::Hierarchical => "hierarchical",
            Notation::Context => "context",
            Notation::Bias => "bias",
            Notation::Sequential => "sequential",
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Notation {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Error> {
        match input {
            "hierarchical" => Ok(Notation::Hierarchical),
            "context" => Ok(Notation::Context),
            "bias" => Ok(Notation::Bias),
            "sequential" => Ok(Notation::Sequential),
            other => Err(Error::UnknownNotation(other.to_string())),
        }
    }
}

/// Compute the full placement for one notation. Only the sequential
/// notation consumes randomness; the seed makes it reproducible.
pub fn compute_layout(
    graph: &Graph,
    notation: Notation,
    theme: &Theme,
    config: &LayoutConfig,
    seed: u64,
) -> Result<Layout, Error> {
    debug!(
        notation = notation.as_str(),
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "computing layout"
    );
    match notation {
        Notation::Hierarchical => hierarchical::compute_hierarchical_layout(graph, theme, config),
        Notation::Context => context::compute_context_layout(graph, theme, config),
        Notation::Bias => bias::compute_bias_layout(graph, theme, config),
        Notation::Sequential => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            sequential::compute_sequential_layout(graph, theme, config, &mut rng)
        }
    }
}

/// A filled bias column: title node on the header row and an invisible
/// bottom node, joined by a spacer edge so the fill extends downward.
fn bias_column(bias: &Node, index: usize, x: f32, bottom_y: f32, theme: &Theme) -> ClusterLayout {
    let mut title = NodeLayout::new(bias.id.clone(), TextBlock::plain(&bias.text), x, 0.0);
    title.shape = NodeShape::Plain;

    let bottom_id = format!("bottom_{}", bias.id);
    let mut bottom = NodeLayout::new(bottom_id.clone(), TextBlock::plain(""), x, bottom_y);
    bottom.shape = NodeShape::Plain;
    bottom.invisible = true;

    ClusterLayout {
        id: bias.id.clone(),
        bgcolor: Some(theme.bias_color(index).to_string()),
        rounded: false,
        nodes: vec![title, bottom],
        spacer_edges: vec![(bias.id.clone(), bottom_id)],
    }
}

/// Quotation nodes in first-edge order. Unknown edge sources surface here
/// as an error.
fn collect_citations<'a>(graph: &'a Graph) -> Result<Vec<&'a Node>, Error> {
    let mut citations: Vec<&Node> = Vec::new();
    for edge in graph.edges() {
        let from = graph.node(&edge.from)?;
        if from.kind == NodeKind::Quotation && !citations.iter().any(|node| node.id == from.id) {
            citations.push(from);
        }
    }
    Ok(citations)
}

/// The context region to the right of the columns: a rounded white box
/// with a header label and the citations spread evenly below it. The
/// required height comes from a closed form over the citation count, so
/// citations can never climb into the header row.
fn context_region(
    graph: &Graph,
    theme: &Theme,
    cfg: &ColumnConfig,
    statement_count: usize,
) -> Result<ClusterLayout, Error> {
    let citations = collect_citations(graph)?;
    let context_x = cfg.total_width - cfg.context_width / 2.0 - cfg.context_offset;

    let mut header = NodeLayout::new(
        "context_label",
        TextBlock::plain("CONTEXT"),
        context_x,
        cfg.header_space,
    );
    header.shape = NodeShape::Plain;
    header.font_size = Some(theme.header_font_size);
    header.bold = true;

    let mut nodes = vec![header];

    let base_height = (statement_count + 1) as f32 * cfg.row_step;
    let required = cfg.header_space + (citations.len() + 1) as f32 * cfg.min_citation_spacing;
    let height = base_height.max(required);
    let spacing = (height - cfg.header_space) / (citations.len() + 1) as f32;

    for (i, quote) in citations.iter().enumerate() {
        let y = -(cfg.header_space + (i + 1) as f32 * spacing);
        let mut node = NodeLayout::new(
            quote.id.clone(),
            TextBlock::plain(&quote.text),
            context_x,
            y,
        );
        node.shape = NodeShape::Plain;
        nodes.push(node);
    }

    Ok(ClusterLayout {
        id: "context".to_string(),
        bgcolor: Some("white".to_string()),
        rounded: true,
        nodes,
        spacer_edges: Vec::new(),
    })
}
