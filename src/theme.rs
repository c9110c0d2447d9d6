use serde::{Deserialize, Serialize};

use crate::model::Credibility;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub font_family: String,
    pub header_font_family: String,
    pub header_font_size: f32,
    /// Repeating background palette for bias columns and blocks.
    pub bias_palette: Vec<String>,
    pub no_bias_fill: String,
    pub statement_fill: String,
    pub credibility_green: String,
    pub credibility_yellow: String,
    pub credibility_red: String,
    pub credibility_gray: String,
    pub argument_fill: String,
    pub bias_node_fill: String,
}

impl Theme {
    pub fn graphviz_default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            header_font_family: "Arial Bold".to_string(),
            header_font_size: 14.0,
            bias_palette: [
                "#FFE4E1", // misty rose
                "#E6E6FA", // lavender
                "#F0FFF0", // honeydew
                "#FFF0F5", // lavender blush
                "#F0F8FF", // alice blue
                "#FFFACD", // lemon chiffon
                "#E0FFFF", // light cyan
                "#F5F5DC", // beige
                "#FFEFD5", // peach puff
                "#F0E68C", // khaki
                "#E6E6FA", // light steel blue
                "#FFDAB9", // peach
            ]
            .iter()
            .map(|value| value.to_string())
            .collect(),
            no_bias_fill: "#E0E0E0".to_string(),
            statement_fill: "white".to_string(),
            credibility_green: "#5cb85c".to_string(),
            credibility_yellow: "#f0ad4e".to_string(),
            credibility_red: "#d9534f".to_string(),
            credibility_gray: "#9e9e9e".to_string(),
            argument_fill: "#b19cd9".to_string(),
            bias_node_fill: "#f28e8c".to_string(),
        }
    }

    /// Color for the bias at `index`, cycling through the palette.
    pub fn bias_color(&self, index: usize) -> &str {
        &self.bias_palette[index % self.bias_palette.len()]
    }

    pub fn credibility_color(&self, credibility: Option<Credibility>) -> &str {
        match credibility {
            Some(Credibility::Green) => &self.credibility_green,
            Some(Credibility::Yellow) => &self.credibility_yellow,
            Some(Credibility::Red) => &self.credibility_red,
            Some(Credibility::Gray) | None => &self.credibility_gray,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::graphviz_default()
    }
}
