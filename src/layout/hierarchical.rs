use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::model::{Graph, NodeKind};
use crate::theme::Theme;

use super::{
    bias_column, context_region, Engine, Layout, NodeLayout, Notation, TextBlock,
};

/// Biases as evenly spaced columns over a fixed horizontal extent, one
/// statement per row. A multi-bias statement is placed once, centered
/// between its leftmost and rightmost column and stretched to span them.
pub(super) fn compute_hierarchical_layout(
    graph: &Graph,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<Layout, Error> {
    let cfg = &config.column;
    let biases = graph.biases();
    let statements = graph.statements();

    let span = cfg.total_width - cfg.context_width - cfg.context_offset - cfg.column_gap;
    let column_x = |index: usize| -> f32 {
        if biases.len() > 1 {
            index as f32 * span / (biases.len() - 1) as f32
        } else {
            span / 2.0
        }
    };
    let bias_index: BTreeMap<&str, usize> = biases
        .iter()
        .enumerate()
        .map(|(i, bias)| (bias.id.as_str(), i))
        .collect();

    let mut layout = Layout::new(Notation::Hierarchical, Engine::Neato);
    let bottom_y = -((statements.len() + 1) as f32) * cfg.row_step;

    for (i, bias) in biases.iter().enumerate() {
        layout
            .clusters
            .push(bias_column(bias, i, column_x(i), bottom_y, theme));
    }

    for (row, statement) in statements.iter().enumerate() {
        let y = -((row + 1) as f32) * cfg.row_step;
        let connected = graph.statement_biases(&statement.id);

        let (x, width) = match connected.len() {
            // Unconnected statements have no column of their own in this
            // notation; park them at the left edge.
            0 => (0.0, cfg.statement_width),
            1 => (column_x(bias_index[connected[0].as_str()]), cfg.statement_width),
            _ => {
                let xs: Vec<f32> = connected
                    .iter()
                    .map(|id| column_x(bias_index[id.as_str()]))
                    .collect();
                let min = xs.iter().copied().fold(f32::INFINITY, f32::min);
                let max = xs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                ((min + max) / 2.0, (max - min) + cfg.span_padding)
            }
        };

        let mut node = NodeLayout::new(
            statement.id.clone(),
            TextBlock::plain(&statement.text),
            x,
            y,
        );
        node.width = width;
        node.fill = Some(theme.statement_fill.clone());
        layout.nodes.push(node);
    }

    layout.clusters.push(context_region(
        graph,
        theme,
        cfg,
        statements.len(),
    )?);

    // Quotation edges attach straight to the statement's single placement.
    for edge in graph.edges() {
        let from = graph.node(&edge.from)?;
        let to_is_statement = graph.get(&edge.to).map(|n| n.kind) == Some(NodeKind::Statement);
        if from.kind == NodeKind::Quotation && to_is_statement {
            layout.edges.push(super::EdgeLayout::undirected(
                edge.to.clone(),
                edge.from.clone(),
                super::EdgeStyle::Dotted,
            ));
        }
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};

    fn node(id: &str, kind: NodeKind) -> Node {
        Node {
            id: id.to_string(),
            kind,
            text: format!("text {id}"),
            credibility: None,
        }
    }

    fn edge(from: &str, to: &str) -> Edge {
        Edge {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    fn fixture() -> Graph {
        Graph::new(
            vec![
                node("b1", NodeKind::CognitiveBias),
                node("b2", NodeKind::CognitiveBias),
                node("b3", NodeKind::CognitiveBias),
                node("s1", NodeKind::Statement),
                node("s2", NodeKind::Statement),
                node("q1", NodeKind::Quotation),
            ],
            vec![
                edge("b1", "s1"),
                edge("b3", "s1"),
                edge("b2", "s2"),
                edge("q1", "s2"),
            ],
        )
    }

    #[test]
    fn multi_bias_statement_is_centered_and_stretched() {
        let layout = compute_hierarchical_layout(
            &fixture(),
            &Theme::graphviz_default(),
            &LayoutConfig::default(),
        )
        .unwrap();

        // b1 at x=0, b3 at x=8 with three columns over an 8-unit span.
        let s1 = layout.find_node("s1").unwrap();
        assert!((s1.x - 4.0).abs() < 1e-5);
        assert!(s1.width >= 8.0 + 2.0 - 1e-5);

        let s2 = layout.find_node("s2").unwrap();
        assert!((s2.x - 4.0).abs() < 1e-5);
        assert_eq!(s2.width, 2.0);
    }

    #[test]
    fn single_bias_centers_its_column() {
        let graph = Graph::new(
            vec![
                node("b1", NodeKind::CognitiveBias),
                node("s1", NodeKind::Statement),
            ],
            vec![edge("b1", "s1")],
        );
        let layout = compute_hierarchical_layout(
            &graph,
            &Theme::graphviz_default(),
            &LayoutConfig::default(),
        )
        .unwrap();
        let s1 = layout.find_node("s1").unwrap();
        assert!((s1.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn statements_descend_one_row_each() {
        let layout = compute_hierarchical_layout(
            &fixture(),
            &Theme::graphviz_default(),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert_eq!(layout.find_node("s1").unwrap().y, -2.0);
        assert_eq!(layout.find_node("s2").unwrap().y, -4.0);
    }

    #[test]
    fn citations_sit_below_the_context_header() {
        let layout = compute_hierarchical_layout(
            &fixture(),
            &Theme::graphviz_default(),
            &LayoutConfig::default(),
        )
        .unwrap();
        let q1 = layout.find_node("q1").unwrap();
        assert!(q1.y < -1.0, "citation must clear the header row");
        let label = layout.find_node("context_label").unwrap();
        assert_eq!(label.y, 1.0);
    }

    #[test]
    fn quotation_edges_target_the_statement() {
        let layout = compute_hierarchical_layout(
            &fixture(),
            &Theme::graphviz_default(),
            &LayoutConfig::default(),
        )
        .unwrap();
        assert!(layout
            .edges
            .iter()
            .any(|e| e.from == "s2" && e.to == "q1"));
    }

    #[test]
    fn dangling_edge_fails_at_layout_time() {
        let graph = Graph::new(
            vec![node("s1", NodeKind::Statement)],
            vec![edge("ghost", "s1")],
        );
        let result = compute_hierarchical_layout(
            &graph,
            &Theme::graphviz_default(),
            &LayoutConfig::default(),
        );
        assert!(matches!(result, Err(Error::UnknownNode(_))));
    }
}
