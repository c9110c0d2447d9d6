use std::collections::BTreeMap;

use crate::model::{Graph, NodeKind};

/// Canonical unordered bias pair: the two ids in lexicographic order, so
/// (a, b) and (b, a) collapse to one key.
pub fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionWeight {
    /// Statements connected to both biases of the pair.
    pub shared: u32,
    /// Direct bias-to-bias edges between the pair.
    pub direct: u32,
}

impl ConnectionWeight {
    pub fn total(&self) -> u32 {
        self.shared + self.direct
    }
}

/// Pairwise bias relationship weights. A statement connected to n biases
/// contributes one shared count to each of its n*(n-1)/2 pairs. Pure in
/// the graph; re-running yields identical output.
pub fn aggregate_bias_connections(graph: &Graph) -> BTreeMap<(String, String), ConnectionWeight> {
    let mut weights: BTreeMap<(String, String), ConnectionWeight> = BTreeMap::new();

    for statement in graph.statements() {
        let biases = graph.statement_biases(&statement.id);
        for i in 0..biases.len() {
            for j in (i + 1)..biases.len() {
                let key = pair_key(&biases[i], &biases[j]);
                weights.entry(key).or_default().shared += 1;
            }
        }
    }

    for edge in graph.edges() {
        let from_kind = graph.get(&edge.from).map(|node| node.kind);
        let to_kind = graph.get(&edge.to).map(|node| node.kind);
        if from_kind == Some(NodeKind::CognitiveBias) && to_kind == Some(NodeKind::CognitiveBias) {
            let key = pair_key(&edge.from, &edge.to);
            weights.entry(key).or_default().direct += 1;
        }
    }

    weights
}
