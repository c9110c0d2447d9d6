use std::path::Path;

use ontograph::emit::emit_dot;
use ontograph::{compute_layout, Graph, LayoutConfig, Notation, Theme};

fn load_fixture(name: &str) -> Graph {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    Graph::from_path(&path).expect("fixture load failed")
}

fn assert_valid_dot(dot: &str, context: &str) {
    assert!(dot.starts_with("digraph"), "{context}: missing digraph header");
    assert!(dot.trim_end().ends_with('}'), "{context}: unterminated scene");
    assert!(dot.contains("pos=\""), "{context}: no pinned positions");
}

#[test]
fn every_notation_emits_a_scene_for_every_fixture() {
    let theme = Theme::graphviz_default();
    let config = LayoutConfig::default();

    for fixture in ["ontology.json", "minimal.json"] {
        let graph = load_fixture(fixture);
        for notation in Notation::ALL {
            let layout = compute_layout(&graph, notation, &theme, &config, 99)
                .unwrap_or_else(|err| panic!("{fixture}/{notation}: {err}"));
            let dot = emit_dot(&layout, &theme);
            assert_valid_dot(&dot, &format!("{fixture}/{notation}"));
        }
    }
}

#[test]
fn scenes_are_reproducible_for_a_fixed_seed() {
    let theme = Theme::graphviz_default();
    let config = LayoutConfig::default();
    let graph = load_fixture("ontology.json");

    for notation in Notation::ALL {
        let first = emit_dot(
            &compute_layout(&graph, notation, &theme, &config, 4).unwrap(),
            &theme,
        );
        let second = emit_dot(
            &compute_layout(&graph, notation, &theme, &config, 4).unwrap(),
            &theme,
        );
        assert_eq!(first, second, "{notation}: scene differs between runs");
    }
}

#[test]
fn hierarchical_spans_and_context_column_agree_on_the_fixture() {
    let theme = Theme::graphviz_default();
    let config = LayoutConfig::default();
    let graph = load_fixture("ontology.json");

    // s_history touches all three biases: full span, stretched width.
    let layout = compute_layout(&graph, Notation::Hierarchical, &theme, &config, 0).unwrap();
    let spanned = layout.find_node("s_history").unwrap();
    assert!((spanned.x - 4.0).abs() < 1e-5);
    assert!(spanned.width >= 10.0 - 1e-5);

    // s_neutral has no bias edges, so the context notation grows the
    // no-bias column and keeps it out of every bias column.
    let layout = compute_layout(&graph, Notation::Context, &theme, &config, 0).unwrap();
    assert!(layout.clusters.iter().any(|c| c.id == "no_bias"));
    assert_eq!(layout.find_node("s_neutral").unwrap().x, 0.0);
}

#[test]
fn bias_notation_weights_match_shared_plus_direct() {
    let graph = load_fixture("ontology.json");
    let weights = ontograph::layout::aggregate_bias_connections(&graph);

    // confirmation_bias and anchoring share s_markets and s_history and
    // have one direct edge.
    let key = ontograph::layout::pair_key("confirmation_bias", "anchoring");
    assert_eq!(weights[&key].shared, 2);
    assert_eq!(weights[&key].direct, 1);
    assert_eq!(weights[&key].total(), 3);

    let theme = Theme::graphviz_default();
    let config = LayoutConfig::default();
    let layout = compute_layout(&graph, Notation::Bias, &theme, &config, 0).unwrap();
    assert!(layout
        .edges
        .iter()
        .any(|edge| edge.label.as_deref() == Some("3")));
}

#[test]
fn sequential_excludes_quotations_and_fills_a_square_canvas() {
    let theme = Theme::graphviz_default();
    let config = LayoutConfig::default();
    let graph = load_fixture("ontology.json");

    let layout = compute_layout(&graph, Notation::Sequential, &theme, &config, 21).unwrap();
    assert!(layout.find_node("q_keynes").is_none());
    assert!(layout.find_node("a_sample").is_some());
    let canvas = layout.canvas.expect("sequential sets a canvas size");
    assert!(canvas >= 20.0);

    let dot = emit_dot(&layout, &theme);
    assert!(dot.contains("shape=hexagon"));
    assert!(dot.contains("shape=circle"));
}
