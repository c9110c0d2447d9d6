use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::model::{Graph, NodeKind};
use crate::theme::Theme;

use super::{
    bias_column, context_region, ClusterLayout, EdgeLayout, EdgeStyle, Engine, Layout, NodeLayout,
    Notation, TextBlock,
};

/// Like the hierarchical notation, but a multi-bias statement gets one
/// placement per connected column, chained by connector edges, with the
/// label shown only on the rightmost one. Statements without any bias go
/// into a dedicated "no cognitive biases" column (created on demand).
pub(super) fn compute_context_layout(
    graph: &Graph,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, Error> {
    let cfg = &config.column;
    let biases = graph.biases();
    let statements = graph.statements();

    let has_no_bias_statements = statements
        .iter()
        .any(|statement| graph.statement_biases(&statement.id).is_empty());
    let no_bias_width = if has_no_bias_statements {
        cfg.no_bias_width
    } else {
        0.0
    };

    let bias_width = (cfg.total_width
        - cfg.context_width
        - cfg.context_offset
        - no_bias_width
        - 2.0 * cfg.column_gap)
        / biases.len().max(1) as f32;
    let column_x = |index: usize| no_bias_width + cfg.column_gap + index as f32 * bias_width;
    let bias_index: BTreeMap<&str, usize> = biases
        .iter()
        .enumerate()
        .map(|(i, bias)| (bias.id.as_str(), i))
        .collect();

    let mut layout = Layout::new(Notation::Context, Engine::Neato);
    let bottom_y = -((statements.len() + 1) as f32) * cfg.row_step;

    if has_no_bias_statements {
        let mut title = NodeLayout::new(
            "no_bias_title",
            TextBlock::plain("No Cognitive Biases"),
            0.0,
            0.0,
        );
        title.shape = super::NodeShape::Plain;
        let mut bottom = NodeLayout::new("bottom_no_bias", TextBlock::plain(""), 0.0, bottom_y);
        bottom.shape = super::NodeShape::Plain;
        bottom.invisible = true;
        layout.clusters.push(ClusterLayout {
            id: "no_bias".to_string(),
            bgcolor: Some(theme.no_bias_fill.clone()),
            rounded: false,
            nodes: vec![title, bottom],
            spacer_edges: vec![("no_bias_title".to_string(), "bottom_no_bias".to_string())],
        });
    }

    for (i, bias) in biases.iter().enumerate() {
        layout
            .clusters
            .push(bias_column(bias, i, column_x(i), bottom_y, theme));
    }

    // Rightmost placement per statement; quotation edges attach here.
    let mut rightmost: BTreeMap<String, String> = BTreeMap::new();

    for (row, statement) in statements.iter().enumerate() {
        let y = -((row + 1) as f32) * cfg.row_step;
        let connected = graph.statement_biases(&statement.id);

        if connected.len() > 1 {
            let mut ordered: Vec<&String> = connected.iter().collect();
            ordered.sort_by_key(|id| bias_index[id.as_str()]);

            let mut prev: Option<String> = None;
            let last = ordered.len() - 1;
            for (pos, bias_id) in ordered.iter().enumerate() {
                let placement_id = format!("{}_{}", statement.id, bias_id);
                let x = column_x(bias_index[bias_id.as_str()]);

                let mut node = if pos == last {
                    NodeLayout::new(placement_id.clone(), TextBlock::plain(&statement.text), x, y)
                } else {
                    // Blank bridge placeholder in the intermediate columns.
                    let mut blank =
                        NodeLayout::new(placement_id.clone(), TextBlock::plain(""), x, y);
                    blank.height = cfg.placeholder_height;
                    blank
                };
                node.width = cfg.statement_width;
                node.fill = Some(theme.statement_fill.clone());
                layout.nodes.push(node);

                if let Some(prev_id) = prev {
                    layout.edges.push(EdgeLayout::undirected(
                        prev_id,
                        placement_id.clone(),
                        EdgeStyle::Dotted,
                    ));
                }
                prev = Some(placement_id.clone());
                if pos == last {
                    rightmost.insert(statement.id.clone(), placement_id);
                }
            }
        } else {
            let x = match connected.first() {
                Some(bias_id) => column_x(bias_index[bias_id.as_str()]),
                None => 0.0,
            };
            let mut node = NodeLayout::new(
                statement.id.clone(),
                TextBlock::plain(&statement.text),
                x,
                y,
            );
            node.width = cfg.statement_width;
            node.fill = Some(theme.statement_fill.clone());
            layout.nodes.push(node);
            rightmost.insert(statement.id.clone(), statement.id.clone());
        }
    }

    layout.clusters.push(context_region(
        graph,
        theme,
        cfg,
        statements.len(),
    )?);

    for edge in graph.edges() {
        let from = graph.node(&edge.from)?;
        let to_is_statement = graph.get(&edge.to).map(|n| n.kind) == Some(NodeKind::Statement);
        if from.kind == NodeKind::Quotation && to_is_statement {
            let target = rightmost
                .get(&edge.to)
                .cloned()
                .unwrap_or_else(|| edge.to.clone());
            layout
                .edges
                .push(EdgeLayout::undirected(target, edge.from.clone(), EdgeStyle::Dotted));
        }
    }

    Ok(layout)
}
