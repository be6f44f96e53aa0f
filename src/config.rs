use serde::{Deserialize, Serialize};
use std::path::Path;

/// Merge tolerance for screen coordinates, in pixels.
pub const DEFAULT_FUZZ: i32 = 5;
/// Blank cells between adjacent columns.
pub const DEFAULT_COLUMN_SPACING: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub fuzz: i32,
    pub column_spacing: i32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            fuzz: DEFAULT_FUZZ,
            column_spacing: DEFAULT_COLUMN_SPACING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Clip rendered lines to this many cells (the display length).
    pub width: Option<usize>,
    pub blank: char,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: None,
            blank: ' ',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub grid: GridConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    fuzz: Option<i32>,
    column_spacing: Option<i32>,
    render: Option<RenderConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<usize>,
    blank: Option<char>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config file; JSON5 (comments, trailing commas) is accepted too.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {err}"))?,
    };

    let mut config = Config::default();
    if let Some(v) = parsed.fuzz {
        config.grid.fuzz = v.max(0);
    }
    if let Some(v) = parsed.column_spacing {
        config.grid.column_spacing = v.max(0);
    }
    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = Some(v);
        }
        if let Some(v) = render.blank {
            config.render.blank = v;
        }
    }
    Ok(config)
}
