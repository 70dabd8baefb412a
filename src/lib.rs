#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod render;
#[cfg(feature = "server")]
pub mod server;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, ServerConfig, load_config};
pub use error::RenderError;
pub use ir::{Segment, StakeholderCategories, parse_request, segment_label_text};
pub use layout::{VennLayout, compute_layout};
pub use render::{render_categories, render_png, render_svg};
#[cfg(feature = "server")]
pub use server::router;
pub use theme::VennTheme;
