//! Translation of a [`Layout`] into a Graphviz DOT scene. Every node is
//! pinned (`pos="x,y!"`); the backend only routes edges between the fixed
//! points and rasterizes.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use crate::layout::{
    ClusterLayout, EdgeLayout, EdgeStyle, Engine, Layout, NodeLayout, NodeShape, Notation,
};
use crate::theme::Theme;

pub fn emit_dot(layout: &Layout, theme: &Theme) -> String {
    let mut dot = String::with_capacity(4096);
    dot.push_str("digraph cognitive_ontology {\n");

    let engine = match layout.engine {
        Engine::Neato => "neato",
        Engine::Dot => "dot",
    };
    push_attr(&mut dot, 1, "layout", engine);

    match layout.notation {
        Notation::Sequential => {
            push_attr(&mut dot, 1, "rankdir", "LR");
            push_attr(&mut dot, 1, "splines", "line");
            push_attr(&mut dot, 1, "sep", "+5");
            push_attr(&mut dot, 1, "ratio", "fill");
            if let Some(canvas) = layout.canvas {
                push_attr(&mut dot, 1, "size", &format!("{canvas},{canvas}"));
            }
            indent(&mut dot, 1);
            let _ = writeln!(dot, "node [shape=box, style=rounded, fontname=\"{}\"];", theme.font_family);
            indent(&mut dot, 1);
            dot.push_str("edge [style=solid, dir=forward];\n");
        }
        _ => {
            push_attr(&mut dot, 1, "overlap", "false");
            push_attr(&mut dot, 1, "splines", "line");
            push_attr(&mut dot, 1, "sep", "+12");
            indent(&mut dot, 1);
            let _ = writeln!(dot, "node [shape=box, style=rounded, fontname=\"{}\"];", theme.font_family);
            indent(&mut dot, 1);
            dot.push_str("edge [style=dotted, dir=none];\n");
        }
    }
    dot.push('\n');

    for cluster in &layout.clusters {
        push_cluster(&mut dot, cluster, theme);
    }
    for node in &layout.nodes {
        push_node(&mut dot, 1, node, theme);
    }
    for edge in &layout.edges {
        push_edge(&mut dot, 1, edge);
    }

    dot.push_str("}\n");
    dot
}

pub fn write_output(dot: &str, path: &Path) -> Result<()> {
    std::fs::write(path, dot)?;
    Ok(())
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

fn push_attr(out: &mut String, level: usize, key: &str, value: &str) {
    indent(out, level);
    let _ = writeln!(out, "{key}=\"{}\";", escape(value));
}

fn push_cluster(out: &mut String, cluster: &ClusterLayout, theme: &Theme) {
    indent(out, 1);
    let _ = writeln!(out, "subgraph \"cluster_{}\" {{", escape(&cluster.id));
    if cluster.rounded {
        push_attr(out, 2, "style", "rounded");
    } else {
        push_attr(out, 2, "style", "filled");
    }
    if let Some(bgcolor) = &cluster.bgcolor {
        push_attr(out, 2, "bgcolor", bgcolor);
    }
    push_attr(out, 2, "label", "");
    push_attr(out, 2, "margin", "0");

    for node in &cluster.nodes {
        push_node(out, 2, node, theme);
    }
    for (from, to) in &cluster.spacer_edges {
        indent(out, 2);
        let _ = writeln!(out, "\"{}\" -> \"{}\" [style=invis];", escape(from), escape(to));
    }
    indent(out, 1);
    out.push_str("}\n\n");
}

fn shape_token(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Box => "box",
        NodeShape::Hexagon => "hexagon",
        NodeShape::Circle => "circle",
        NodeShape::Point => "point",
        NodeShape::Plain => "none",
    }
}

fn push_node(out: &mut String, level: usize, node: &NodeLayout, theme: &Theme) {
    indent(out, level);
    let mut attrs = vec![
        format!("label=\"{}\"", escape_label(&node.label.text())),
        format!("pos=\"{},{}!\"", node.x, node.y),
    ];
    if node.shape != NodeShape::Box {
        attrs.push(format!("shape={}", shape_token(node.shape)));
    }
    if node.width > 0.0 {
        attrs.push(format!("width=\"{}\"", node.width));
    }
    if node.height > 0.0 {
        attrs.push(format!("height=\"{}\"", node.height));
    }
    if node.invisible {
        attrs.push("style=invis".to_string());
    } else if let Some(fill) = &node.fill {
        attrs.push("style=filled".to_string());
        attrs.push(format!("fillcolor=\"{fill}\""));
    }
    if let Some(size) = node.font_size {
        attrs.push(format!("fontsize=\"{size}\""));
    }
    if node.bold {
        attrs.push(format!("fontname=\"{}\"", theme.header_font_family));
    }
    if node.fixed_size {
        attrs.push("fixedsize=true".to_string());
        attrs.push("margin=\"0.1\"".to_string());
    }
    let _ = writeln!(out, "\"{}\" [{}];", escape(&node.id), attrs.join(", "));
}

fn push_edge(out: &mut String, level: usize, edge: &EdgeLayout) {
    indent(out, level);
    let mut attrs = Vec::new();
    match edge.style {
        EdgeStyle::Solid => attrs.push("style=solid".to_string()),
        EdgeStyle::Dotted => attrs.push("style=dotted".to_string()),
        EdgeStyle::Invisible => attrs.push("style=invis".to_string()),
    }
    attrs.push(if edge.directed {
        "dir=forward".to_string()
    } else {
        "dir=none".to_string()
    });
    if let Some(label) = &edge.label {
        attrs.push(format!("label=\"{}\"", escape_label(label)));
    }
    if let Some(size) = edge.font_size {
        attrs.push(format!("fontsize=\"{size}\""));
    }
    if let Some(width) = edge.pen_width {
        attrs.push(format!("penwidth=\"{width}\""));
    }
    let _ = writeln!(
        out,
        "\"{}\" -> \"{}\" [{}];",
        escape(&edge.from),
        escape(&edge.to),
        attrs.join(", ")
    );
}

fn escape(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_label(input: &str) -> String {
    escape(input).replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::{compute_layout, Notation};
    use crate::model::Graph;

    const DOC: &str = r#"{
        "nodes": [
            {"id": "b1", "type": "cognitive_bias", "text": "Anchoring"},
            {"id": "s1", "type": "statement", "text": "A claim", "credibility": "red"},
            {"id": "q1", "type": "quotation", "text": "Someone said so"}
        ],
        "edges": [
            {"from": "b1", "to": "s1"},
            {"from": "q1", "to": "s1"}
        ]
    }"#;

    fn dot_for(notation: Notation) -> String {
        let graph = Graph::from_str(DOC).unwrap();
        let theme = Theme::graphviz_default();
        let layout =
            compute_layout(&graph, notation, &theme, &LayoutConfig::default(), 1).unwrap();
        emit_dot(&layout, &theme)
    }

    #[test]
    fn hierarchical_scene_pins_positions_and_fills_columns() {
        let dot = dot_for(Notation::Hierarchical);
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("layout=\"neato\""));
        assert!(dot.contains("subgraph \"cluster_b1\""));
        assert!(dot.contains("bgcolor=\"#FFE4E1\""));
        assert!(dot.contains("pos=\"4,-2!\""), "statement row not pinned:\n{dot}");
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn sequential_scene_uses_dot_engine_and_square_canvas() {
        let dot = dot_for(Notation::Sequential);
        assert!(dot.contains("layout=\"dot\""));
        assert!(dot.contains("rankdir=\"LR\""));
        assert!(dot.contains("size=\"20,20\""));
        assert!(dot.contains("fillcolor=\"#d9534f\""), "credibility fill missing:\n{dot}");
    }

    #[test]
    fn bias_scene_labels_pair_edges_with_totals() {
        let graph = Graph::from_str(
            r#"{
                "nodes": [
                    {"id": "b1", "type": "cognitive_bias", "text": "One"},
                    {"id": "b2", "type": "cognitive_bias", "text": "Two"},
                    {"id": "s1", "type": "statement", "text": "Shared"}
                ],
                "edges": [
                    {"from": "b1", "to": "s1"},
                    {"from": "b2", "to": "s1"}
                ]
            }"#,
        )
        .unwrap();
        let theme = Theme::graphviz_default();
        let layout = compute_layout(
            &graph,
            Notation::Bias,
            &theme,
            &LayoutConfig::default(),
            1,
        )
        .unwrap();
        let dot = emit_dot(&layout, &theme);
        assert!(dot.contains("label=\"1\""));
        assert!(dot.contains("penwidth=\"2\""));
        assert!(dot.contains("shape=point"));
    }

    #[test]
    fn labels_are_escaped() {
        let dot = {
            let graph = Graph::from_str(
                r#"{
                    "nodes": [{"id": "s1", "type": "statement", "text": "say \"hi\""}],
                    "edges": []
                }"#,
            )
            .unwrap();
            let theme = Theme::graphviz_default();
            let layout = compute_layout(
                &graph,
                Notation::Hierarchical,
                &theme,
                &LayoutConfig::default(),
                1,
            )
            .unwrap();
            emit_dot(&layout, &theme)
        };
        assert!(dot.contains("say \\\"hi\\\""));
    }
}
