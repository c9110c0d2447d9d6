pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod layout;
pub mod model;
pub mod theme;

pub use cli::run;
pub use config::{load_config, Config, LayoutConfig};
pub use error::Error;
pub use layout::{compute_layout, Layout, Notation};
pub use model::Graph;
pub use theme::Theme;
