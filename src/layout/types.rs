/// Wrapped label text with its computed extent.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

impl TextBlock {
    pub fn plain(text: &str) -> Self {
        Self {
            lines: if text.is_empty() {
                Vec::new()
            } else {
                vec![text.to_string()]
            },
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Shape tokens recognized by the rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    Box,
    Hexagon,
    Circle,
    Point,
    /// Bare text, no outline (`shape=none`).
    Plain,
}

/// A single placement: id, pinned position and extent, plus the style
/// attributes the backend needs. `x` is the horizontal center and `y` the
/// vertical center of the node, in layout units.
#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub label: TextBlock,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub shape: NodeShape,
    pub fill: Option<String>,
    pub font_size: Option<f32>,
    pub bold: bool,
    pub invisible: bool,
    /// Force width/height verbatim instead of growing around the label.
    pub fixed_size: bool,
}

impl NodeLayout {
    pub fn new(id: impl Into<String>, label: TextBlock, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            label,
            x,
            y,
            width: 0.0,
            height: 0.0,
            shape: NodeShape::Box,
            fill: None,
            font_size: None,
            bold: false,
            invisible: false,
            fixed_size: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeStyle {
    Solid,
    Dotted,
    Invisible,
}

#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    /// Advisory label position, offset perpendicular to the edge axis.
    pub label_anchor: Option<(f32, f32)>,
    pub directed: bool,
    pub style: EdgeStyle,
    pub font_size: Option<f32>,
    pub pen_width: Option<f32>,
}

impl EdgeLayout {
    pub fn undirected(from: impl Into<String>, to: impl Into<String>, style: EdgeStyle) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            label_anchor: None,
            directed: false,
            style,
            font_size: None,
            pen_width: None,
        }
    }

    pub fn directed(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            directed: true,
            style: EdgeStyle::Solid,
            ..Self::undirected(from, to, EdgeStyle::Solid)
        }
    }
}

/// A filled background region (bias column or bias block) with the nodes it
/// owns. Spacer edges keep the region stretched in the backend.
#[derive(Debug, Clone)]
pub struct ClusterLayout {
    pub id: String,
    pub bgcolor: Option<String>,
    pub rounded: bool,
    pub nodes: Vec<NodeLayout>,
    pub spacer_edges: Vec<(String, String)>,
}

/// Layout engine the backend should run. All node positions are pinned;
/// the engine only routes edges between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Neato,
    Dot,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub notation: super::Notation,
    pub engine: Engine,
    pub clusters: Vec<ClusterLayout>,
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    /// Square canvas extent, set by the sequential notation.
    pub canvas: Option<f32>,
}

impl Layout {
    pub fn new(notation: super::Notation, engine: Engine) -> Self {
        Self {
            notation,
            engine,
            clusters: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            canvas: None,
        }
    }

    /// All placements, cluster-owned ones included.
    pub fn all_nodes(&self) -> impl Iterator<Item = &NodeLayout> {
        self.clusters
            .iter()
            .flat_map(|cluster| cluster.nodes.iter())
            .chain(self.nodes.iter())
    }

    pub fn find_node(&self, id: &str) -> Option<&NodeLayout> {
        self.all_nodes().find(|node| node.id == id)
    }
}
