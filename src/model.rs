use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// The four object kinds of the ontology. Connection rules between kinds
/// (e.g. arguments only point at statements) are a property of the data,
/// not enforced here; malformed graphs are laid out as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Statement,
    CognitiveBias,
    Argument,
    Quotation,
}

/// Statement credibility, used for fill color in the sequential notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Credibility {
    Green,
    Yellow,
    Red,
    Gray,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub text: String,
    #[serde(default)]
    pub credibility: Option<Credibility>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// An immutable ontology graph plus the lookup indices derived from it.
/// Node and edge order is the document order; column and row assignment in
/// the layouts depends on it.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_id: BTreeMap<String, usize>,
    statement_biases: BTreeMap<String, Vec<String>>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let mut by_id = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.clone()).or_insert(idx);
        }

        // statement -> ordered set of connected biases, one pass over edges.
        let mut statement_biases: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for edge in &edges {
            let from_kind = by_id.get(&edge.from).map(|&i| nodes[i].kind);
            let to_kind = by_id.get(&edge.to).map(|&i| nodes[i].kind);
            if from_kind == Some(NodeKind::CognitiveBias) && to_kind == Some(NodeKind::Statement) {
                let biases = statement_biases.entry(edge.to.clone()).or_default();
                if !biases.contains(&edge.from) {
                    biases.push(edge.from.clone());
                }
            }
        }

        Self {
            nodes,
            edges,
            by_id,
            statement_biases,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self, Error> {
        let file: GraphFile = serde_json::from_str(input)?;
        Ok(Self::new(file.nodes, file.edges))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.by_id.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Lookup that surfaces dangling edge endpoints as an error at layout
    /// time; the loader itself accepts them.
    pub fn node(&self, id: &str) -> Result<&Node, Error> {
        self.get(id).ok_or_else(|| Error::UnknownNode(id.to_string()))
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    pub fn biases(&self) -> Vec<&Node> {
        self.of_kind(NodeKind::CognitiveBias).collect()
    }

    pub fn statements(&self) -> Vec<&Node> {
        self.of_kind(NodeKind::Statement).collect()
    }

    pub fn arguments(&self) -> Vec<&Node> {
        self.of_kind(NodeKind::Argument).collect()
    }

    /// Biases connected to a statement, in first-edge order. Empty for
    /// statements without bias edges and for unknown ids.
    pub fn statement_biases(&self, statement_id: &str) -> &[String] {
        self.statement_biases
            .get(statement_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn statement_bias_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.statement_biases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "nodes": [
            {"id": "b1", "type": "cognitive_bias", "text": "Anchoring"},
            {"id": "b2", "type": "cognitive_bias", "text": "Framing"},
            {"id": "s1", "type": "statement", "text": "First claim", "credibility": "green"},
            {"id": "s2", "type": "statement", "text": "Second claim"},
            {"id": "q1", "type": "quotation", "text": "A source"}
        ],
        "edges": [
            {"from": "b1", "to": "s1"},
            {"from": "b2", "to": "s1"},
            {"from": "b1", "to": "s1"},
            {"from": "q1", "to": "s2"}
        ]
    }"#;

    #[test]
    fn parses_document_and_builds_indices() {
        let graph = Graph::from_str(DOC).unwrap();
        assert_eq!(graph.nodes().len(), 5);
        assert_eq!(graph.edges().len(), 4);
        assert_eq!(graph.get("s1").unwrap().kind, NodeKind::Statement);
        assert_eq!(
            graph.get("s1").unwrap().credibility,
            Some(Credibility::Green)
        );
        assert_eq!(graph.biases().len(), 2);
    }

    #[test]
    fn statement_bias_map_is_ordered_and_deduped() {
        let graph = Graph::from_str(DOC).unwrap();
        assert_eq!(graph.statement_biases("s1").to_vec(), vec!["b1", "b2"]);
        assert!(graph.statement_biases("s2").is_empty());
    }

    #[test]
    fn unknown_node_lookup_fails() {
        let graph = Graph::from_str(DOC).unwrap();
        assert!(matches!(graph.node("missing"), Err(Error::UnknownNode(_))));
    }

    #[test]
    fn dangling_edges_are_accepted_at_load_time() {
        let graph = Graph::from_str(
            r#"{"nodes": [], "edges": [{"from": "ghost", "to": "ghost2"}]}"#,
        )
        .unwrap();
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(matches!(
            Graph::from_str("{not json"),
            Err(Error::Parse(_))
        ));
    }
}
