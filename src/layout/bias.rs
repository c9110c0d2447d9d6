use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::model::{Graph, Node};
use crate::theme::Theme;

use super::connections::aggregate_bias_connections;
use super::{
    ClusterLayout, EdgeLayout, EdgeStyle, Engine, Layout, NodeLayout, NodeShape, Notation,
    TextBlock,
};

#[derive(Debug, Clone, Copy)]
struct Block {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Block extent from the bias label length and its member count; a floor
/// keeps narrow titles readable, and the whole block is compacted by a
/// fixed scale.
fn block_size(bias: &Node, member_count: usize, config: &LayoutConfig) -> (f32, f32) {
    let cfg = &config.bias;
    let title_width = bias.text.chars().count() as f32 * cfg.title_char_width;
    let content_width = title_width.max(cfg.min_content_width);
    let content_height = 1.0 + member_count as f32 * cfg.statement_row_height;
    (
        content_width * cfg.block_scale,
        content_height * cfg.block_scale,
    )
}

/// Every bias becomes a colored block holding copies of its member
/// statements; blocks sit on a square grid and are linked by one weighted
/// edge per related pair.
pub(super) fn compute_bias_layout(
    graph: &Graph,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, Error> {
    let cfg = &config.bias;
    let biases = graph.biases();
    let statements = graph.statements();

    let members: Vec<Vec<&Node>> = biases
        .iter()
        .map(|bias| {
            statements
                .iter()
                .copied()
                .filter(|statement| {
                    graph
                        .statement_biases(&statement.id)
                        .contains(&bias.id)
                })
                .collect()
        })
        .collect();

    let grid = (biases.len() as f32).sqrt().ceil() as usize;
    let half_grid = grid as f32 / 2.0;

    let mut blocks: BTreeMap<&str, Block> = BTreeMap::new();
    for (i, bias) in biases.iter().enumerate() {
        let (width, height) = block_size(bias, members[i].len(), config);
        let col = (i % grid.max(1)) as f32;
        let row = (i / grid.max(1)) as f32;
        blocks.insert(
            bias.id.as_str(),
            Block {
                x: (col - half_grid) * (width + cfg.block_spacing),
                y: (row - half_grid) * (height + cfg.block_spacing),
                width,
                height,
            },
        );
    }

    let mut layout = Layout::new(Notation::Bias, Engine::Neato);

    for (i, bias) in biases.iter().enumerate() {
        let block = blocks[bias.id.as_str()];

        let mut title = NodeLayout::new(
            format!("title_{}", bias.id),
            TextBlock::plain(&bias.text),
            block.x,
            block.y,
        );
        title.width = block.width;
        title.height = cfg.title_height;
        title.fill = Some(theme.bias_color(i).to_string());
        title.font_size = Some(cfg.title_font_size);
        title.bold = true;

        let mut nodes = vec![title];
        for (j, statement) in members[i].iter().enumerate() {
            let mut member = NodeLayout::new(
                format!("{}_{}", bias.id, statement.id),
                TextBlock::plain(&statement.text),
                block.x - cfg.statement_x_shift,
                block.y - cfg.statement_y_offset - j as f32 * cfg.statement_row_height,
            );
            member.width = (block.width - cfg.statement_inset).max(0.0);
            member.height = cfg.statement_height;
            member.fill = Some(theme.statement_fill.clone());
            member.font_size = Some(cfg.statement_font_size);
            nodes.push(member);
        }

        // Invisible anchor points on each side; pair edges dock to these.
        for (side, dx, dy) in [
            ("top", 0.0, block.height / 2.0),
            ("bottom", 0.0, -block.height / 2.0),
            ("left", -block.width / 2.0, 0.0),
            ("right", block.width / 2.0, 0.0),
        ] {
            let mut anchor = NodeLayout::new(
                format!("edge_{}_{}", side, bias.id),
                TextBlock::plain(""),
                block.x + dx,
                block.y + dy,
            );
            anchor.shape = NodeShape::Point;
            anchor.invisible = true;
            nodes.push(anchor);
        }

        layout.clusters.push(ClusterLayout {
            id: bias.id.clone(),
            bgcolor: Some(theme.bias_color(i).to_string()),
            rounded: false,
            nodes,
            spacer_edges: Vec::new(),
        });
    }

    for ((bias_a, bias_b), weight) in aggregate_bias_connections(graph) {
        let (Some(a), Some(b)) = (blocks.get(bias_a.as_str()), blocks.get(bias_b.as_str()))
        else {
            continue;
        };
        let dx = b.x - a.x;
        let dy = b.y - a.y;

        // Dock on the facing sides of the dominant axis; the weight label
        // shifts off the line on the perpendicular axis.
        let (from, to, label_anchor) = if dx.abs() > dy.abs() {
            let from = if dx > 0.0 { "right" } else { "left" };
            let to = if dx > 0.0 { "left" } else { "right" };
            (
                format!("edge_{}_{}", from, bias_a),
                format!("edge_{}_{}", to, bias_b),
                ((a.x + b.x) / 2.0, a.y.max(b.y) + cfg.label_offset),
            )
        } else {
            let from = if dy > 0.0 { "top" } else { "bottom" };
            let to = if dy > 0.0 { "bottom" } else { "top" };
            (
                format!("edge_{}_{}", from, bias_a),
                format!("edge_{}_{}", to, bias_b),
                (a.x.max(b.x) + cfg.label_offset, (a.y + b.y) / 2.0),
            )
        };

        let mut edge = EdgeLayout::undirected(from, to, EdgeStyle::Dotted);
        edge.label = Some(weight.total().to_string());
        edge.label_anchor = Some(label_anchor);
        edge.font_size = Some(cfg.edge_font_size);
        edge.pen_width = Some(cfg.edge_pen_width);
        layout.edges.push(edge);
    }

    Ok(layout)
}
