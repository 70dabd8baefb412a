use crate::theme::{CircleStyle, VennTheme};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output resolution; one point is `dpi / 72` pixels.
    pub dpi: f32,
    /// Points per layout unit.
    pub unit_size: f32,
    /// Margin kept around the tight content bounds.
    pub pad_inches: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            unit_size: 55.0,
            pad_inches: 0.1,
            background: "#FFFFFF".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn pixel_scale(&self) -> f32 {
        self.dpi.max(1.0) / 72.0
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: VennTheme,
    pub render: RenderConfig,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = VennTheme::classic();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            render,
            server: ServerConfig::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CircleStyleFile {
    fill: Option<String>,
    stroke: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeFile {
    font_family: Option<String>,
    text_color: Option<String>,
    background: Option<String>,
    power: Option<CircleStyleFile>,
    legitimacy: Option<CircleStyleFile>,
    urgency: Option<CircleStyleFile>,
    circle_opacity: Option<f32>,
    circle_stroke_width: Option<f32>,
    title_font_size: Option<f32>,
    caption_font_size: Option<f32>,
    label_font_size: Option<f32>,
    legend_font_size: Option<f32>,
    line_height: Option<f32>,
    label_background: Option<String>,
    label_background_opacity: Option<f32>,
    label_border: Option<String>,
    legend_background: Option<String>,
    legend_background_opacity: Option<f32>,
    legend_border: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    dpi: Option<f32>,
    unit_size: Option<f32>,
    pad_inches: Option<f32>,
    background: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerConfigFile {
    bind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<ThemeFile>,
    render: Option<RenderConfigFile>,
    server: Option<ServerConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document. Plain JSON is tried first, then JSON5 so
/// hand-written files may carry comments and trailing commas.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {json_err}"))?,
    };
    Ok(apply_config_file(Config::default(), parsed))
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(theme) = parsed.theme {
        apply_theme(&mut config.theme, theme);
        // The canvas follows the theme unless the render section says otherwise.
        config.render.background = config.theme.background.clone();
    }
    if let Some(render) = parsed.render {
        if let Some(v) = render.dpi {
            config.render.dpi = v;
        }
        if let Some(v) = render.unit_size {
            config.render.unit_size = v;
        }
        if let Some(v) = render.pad_inches {
            config.render.pad_inches = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }
    if let Some(server) = parsed.server {
        if let Some(v) = server.bind {
            config.server.bind = v;
        }
    }
    config
}

fn apply_circle(style: &mut CircleStyle, file: Option<CircleStyleFile>) {
    let Some(file) = file else {
        return;
    };
    if let Some(v) = file.fill {
        style.fill = v;
    }
    if let Some(v) = file.stroke {
        style.stroke = v;
    }
}

fn apply_theme(theme: &mut VennTheme, vars: ThemeFile) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    apply_circle(&mut theme.power, vars.power);
    apply_circle(&mut theme.legitimacy, vars.legitimacy);
    apply_circle(&mut theme.urgency, vars.urgency);
    if let Some(v) = vars.circle_opacity {
        theme.circle_opacity = v.clamp(0.0, 1.0);
    }
    if let Some(v) = vars.circle_stroke_width {
        theme.circle_stroke_width = v;
    }
    if let Some(v) = vars.title_font_size {
        theme.title_font_size = v;
    }
    if let Some(v) = vars.caption_font_size {
        theme.caption_font_size = v;
    }
    if let Some(v) = vars.label_font_size {
        theme.label_font_size = v;
    }
    if let Some(v) = vars.legend_font_size {
        theme.legend_font_size = v;
    }
    if let Some(v) = vars.line_height {
        theme.line_height = v;
    }
    if let Some(v) = vars.label_background {
        theme.label_background = v;
    }
    if let Some(v) = vars.label_background_opacity {
        theme.label_background_opacity = v.clamp(0.0, 1.0);
    }
    if let Some(v) = vars.label_border {
        theme.label_border = v;
    }
    if let Some(v) = vars.legend_background {
        theme.legend_background = v;
    }
    if let Some(v) = vars.legend_background_opacity {
        theme.legend_background_opacity = v.clamp(0.0, 1.0);
    }
    if let Some(v) = vars.legend_border {
        theme.legend_border = v;
    }
}
