#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, GridConfig, RenderConfig, load_config};
pub use ir::{Scene, ScreenElement, UiTree};
pub use layout::{compute_layout, layout_scene};
pub use parser::{SceneError, parse_scene};
pub use render::render_text;
