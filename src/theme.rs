use crate::ir::Attribute;

#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub fill: String,
    pub stroke: String,
}

#[derive(Debug, Clone)]
pub struct VennTheme {
    pub font_family: String,
    pub text_color: String,
    pub background: String,
    pub power: CircleStyle,
    pub legitimacy: CircleStyle,
    pub urgency: CircleStyle,
    pub circle_opacity: f32,
    pub circle_stroke_width: f32,
    pub title_font_size: f32,
    pub caption_font_size: f32,
    pub label_font_size: f32,
    pub legend_font_size: f32,
    pub line_height: f32,
    pub label_background: String,
    pub label_background_opacity: f32,
    pub label_border: String,
    pub label_border_width: f32,
    pub legend_background: String,
    pub legend_background_opacity: f32,
    pub legend_border: String,
    pub legend_border_width: f32,
}

impl VennTheme {
    /// Soft red/blue/green palette with half-transparent circles.
    pub fn classic() -> Self {
        Self {
            font_family: "DejaVu Sans, Arial, Helvetica, sans-serif".to_string(),
            text_color: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            power: CircleStyle {
                fill: "#ffcccc".to_string(),
                stroke: "darkred".to_string(),
            },
            legitimacy: CircleStyle {
                fill: "#ccccff".to_string(),
                stroke: "darkblue".to_string(),
            },
            urgency: CircleStyle {
                fill: "#ccffcc".to_string(),
                stroke: "darkgreen".to_string(),
            },
            circle_opacity: 0.5,
            circle_stroke_width: 2.5,
            title_font_size: 20.0,
            caption_font_size: 16.0,
            label_font_size: 10.0,
            legend_font_size: 12.0,
            line_height: 1.2,
            label_background: "white".to_string(),
            label_background_opacity: 0.8,
            label_border: "gray".to_string(),
            label_border_width: 0.5,
            legend_background: "wheat".to_string(),
            legend_background_opacity: 0.5,
            legend_border: "black".to_string(),
            legend_border_width: 1.0,
        }
    }

    pub fn circle(&self, attribute: Attribute) -> &CircleStyle {
        match attribute {
            Attribute::Power => &self.power,
            Attribute::Legitimacy => &self.legitimacy,
            Attribute::Urgency => &self.urgency,
        }
    }
}

impl Default for VennTheme {
    fn default() -> Self {
        Self::classic()
    }
}
