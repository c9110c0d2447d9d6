use std::collections::BTreeMap;

use rand::Rng;

use crate::config::LayoutConfig;
use crate::error::Error;
use crate::model::{Graph, Node, NodeKind};
use crate::theme::Theme;

use super::collide::{canvas_size, overlaps, BBox};
use super::text::measure_node;
use super::{EdgeLayout, Engine, Layout, NodeLayout, NodeShape, Notation, TextBlock};

/// Statements and biases along increasing x in id order, each dropped at
/// a random y that is re-sampled until it clears the already-placed boxes.
/// Arguments go on a fixed bottom row under the nodes they point at.
/// Quotations are excluded from this notation.
pub(super) fn compute_sequential_layout(
    graph: &Graph,
    theme: &Theme,
    config: &LayoutConfig,
    rng: &mut impl Rng,
) -> Result<Layout, Error> {
    let cfg = &config.sequential;

    let mut main: Vec<&Node> = graph
        .nodes()
        .iter()
        .filter(|node| matches!(node.kind, NodeKind::Statement | NodeKind::CognitiveBias))
        .collect();
    main.sort_by(|a, b| a.id.cmp(&b.id));

    // Edges whose endpoints both survive the quotation filter.
    let edges: Vec<_> = graph
        .edges()
        .iter()
        .filter(|edge| {
            let keep = |id: &str| {
                graph
                    .get(id)
                    .map(|node| node.kind != NodeKind::Quotation)
                    .unwrap_or(false)
            };
            keep(&edge.from) && keep(&edge.to)
        })
        .collect();

    let mut placed: BTreeMap<String, (BBox, TextBlock)> = BTreeMap::new();
    let mut current_x = 0.0f32;
    let mut y_range = cfg.y_range;

    for node in &main {
        let label = measure_node(&node.text, config.text.wrap_width, &config.text);
        let footprint = |y: f32| BBox {
            x: current_x,
            y,
            width: label.width,
            height: label.height,
        };

        let mut chosen = None;
        for _ in 0..cfg.max_attempts {
            let candidate = rng.gen_range(-y_range / 2.0..y_range / 2.0);
            let collides = placed
                .values()
                .any(|(other, _)| overlaps(&footprint(candidate), other, cfg.overlap_padding));
            if !collides {
                chosen = Some(candidate);
                break;
            }
        }
        // Exhausted: widen the range and take one best-effort sample that
        // is not re-checked.
        let y = chosen.unwrap_or_else(|| {
            y_range *= cfg.widen_factor;
            rng.gen_range(-y_range / 2.0..y_range / 2.0)
        });

        placed.insert(node.id.clone(), (footprint(y), label.clone()));
        current_x += label.width + cfg.min_gap;
    }

    let mut argument_boxes: BTreeMap<String, (BBox, TextBlock)> = BTreeMap::new();
    for argument in graph.arguments() {
        let label = measure_node(&argument.text, config.text.argument_wrap_width, &config.text);

        let targets: Vec<&str> = edges
            .iter()
            .filter(|edge| edge.from == argument.id)
            .map(|edge| edge.to.as_str())
            .collect();
        let anchored: Vec<&BBox> = targets
            .iter()
            .filter_map(|id| placed.get(*id).map(|(bbox, _)| bbox))
            .collect();

        let mut x = if anchored.is_empty() {
            current_x + rng.gen_range(-cfg.argument_jitter..cfg.argument_jitter)
        } else {
            let avg = anchored
                .iter()
                .map(|bbox| bbox.x + bbox.width / 2.0)
                .sum::<f32>()
                / anchored.len() as f32;
            avg + rng.gen_range(-cfg.argument_jitter..cfg.argument_jitter)
        };

        // Nudge rightward in whole-width steps while colliding.
        for _ in 0..cfg.max_attempts {
            let bbox = BBox {
                x,
                y: cfg.argument_row_y,
                width: label.width,
                height: label.height,
            };
            let collides = placed
                .values()
                .chain(argument_boxes.values())
                .any(|(other, _)| overlaps(&bbox, other, cfg.overlap_padding));
            if !collides {
                break;
            }
            x += label.width;
        }

        argument_boxes.insert(
            argument.id.clone(),
            (
                BBox {
                    x,
                    y: cfg.argument_row_y,
                    width: label.width,
                    height: label.height,
                },
                label,
            ),
        );
    }

    let mut layout = Layout::new(Notation::Sequential, Engine::Dot);

    for node in &main {
        let (bbox, label) = &placed[&node.id];
        let mut placement = NodeLayout::new(node.id.clone(), label.clone(), bbox.x, bbox.y);
        placement.width = bbox.width;
        placement.height = bbox.height;
        placement.font_size = Some(cfg.node_font_size);
        match node.kind {
            NodeKind::Statement => {
                placement.shape = NodeShape::Box;
                placement.fill = Some(theme.credibility_color(node.credibility).to_string());
            }
            _ => {
                placement.shape = NodeShape::Hexagon;
                placement.fill = Some(theme.bias_node_fill.clone());
            }
        }
        layout.nodes.push(placement);
    }

    for argument in graph.arguments() {
        let (bbox, label) = &argument_boxes[&argument.id];
        let side = bbox.width.max(bbox.height);
        let mut placement = NodeLayout::new(argument.id.clone(), label.clone(), bbox.x, bbox.y);
        placement.width = side;
        placement.height = side;
        placement.shape = NodeShape::Circle;
        placement.fill = Some(theme.argument_fill.clone());
        placement.font_size = Some(cfg.node_font_size);
        placement.fixed_size = true;
        layout.nodes.push(placement);
    }

    for edge in &edges {
        let mut rendered = EdgeLayout::directed(edge.from.clone(), edge.to.clone());
        rendered.font_size = Some(cfg.edge_font_size);
        layout.edges.push(rendered);
    }

    let boxes: Vec<BBox> = placed
        .values()
        .chain(argument_boxes.values())
        .map(|(bbox, _)| *bbox)
        .collect();
    layout.canvas = Some(canvas_size(
        &boxes,
        config.canvas.min_size,
        config.canvas.padding,
    ));

    Ok(layout)
}
