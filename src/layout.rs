use crate::config::RenderConfig;
use crate::ir::{Attribute, Segment, StakeholderCategories, legend_lines, segment_label_lines};
use crate::text_metrics::{measure_block_width, measure_text_width};
use crate::theme::VennTheme;

/// Canvas extent in layout units. Data y grows upward.
pub const CANVAS_WIDTH: f32 = 18.0;
pub const CANVAS_HEIGHT: f32 = 14.0;

pub const CIRCLE_RADIUS: f32 = 3.5;
pub const CENTER: (f32, f32) = (8.0, 7.0);
pub const SEPARATION: f32 = 3.2;

const COS_30: f32 = 0.866;
const LEGEND_X: f32 = 14.5;
const TITLE_Y: f32 = 13.0;
pub const TITLE: &str = "Análisis de Preponderancia de Stakeholders";

/// Box padding, as a fraction of the font size.
const BOX_PAD_EM: f32 = 0.3;
/// Baseline position inside a line box, as a fraction of the font size.
const ASCENT_EM: f32 = 0.8;
const DESCENT_EM: f32 = 0.2;

pub fn circle_center(attribute: Attribute) -> (f32, f32) {
    let (cx, cy) = CENTER;
    match attribute {
        Attribute::Power => (cx - SEPARATION * COS_30, cy + SEPARATION * 0.5),
        Attribute::Legitimacy => (cx + SEPARATION * COS_30, cy + SEPARATION * 0.5),
        Attribute::Urgency => (cx, cy - SEPARATION),
    }
}

/// Baseline anchor of the caption naming each circle.
pub fn caption_anchor(attribute: Attribute) -> (f32, f32) {
    let (x, y) = circle_center(attribute);
    match attribute {
        Attribute::Power => (x - 3.2, y + 2.2),
        Attribute::Legitimacy => (x + 3.2, y + 2.2),
        Attribute::Urgency => (x, y - 4.2),
    }
}

/// Center of the label placed inside each overlap region.
pub fn segment_anchor(segment: Segment) -> (f32, f32) {
    let (cx, cy) = CENTER;
    let power = circle_center(Attribute::Power);
    let legitimacy = circle_center(Attribute::Legitimacy);
    let urgency = circle_center(Attribute::Urgency);
    match segment {
        Segment::Inactivo => (power.0 - 1.8, power.1 + 1.0),
        Segment::Discrecional => (legitimacy.0 + 1.8, legitimacy.1 + 1.0),
        Segment::Demandante => (urgency.0, urgency.1 - 1.8),
        Segment::Dominante => (cx, cy + 2.5),
        Segment::Peligroso => (power.0 - 0.5, cy - 0.3),
        Segment::Dependiente => (legitimacy.0 + 0.5, cy - 0.3),
        Segment::Criticos => (cx, cy + 0.3),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn inflate(&self, amount: f32) -> Rect {
        Rect {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

#[derive(Debug, Clone)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
    pub font_size: f32,
    pub bold: bool,
}

impl TextBlock {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Baseline of the first line when the block is centered on `center_y`.
    pub fn first_baseline(&self, center_y: f32, line_height: f32) -> f32 {
        center_y - self.height / 2.0 + self.font_size * ((line_height - 1.0) / 2.0 + ASCENT_EM)
    }
}

#[derive(Debug, Clone)]
pub struct CircleLayout {
    pub attribute: Attribute,
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

/// Single line of centered text anchored on its baseline.
#[derive(Debug, Clone)]
pub struct CaptionLayout {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub width: f32,
    pub font_size: f32,
}

impl CaptionLayout {
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x - self.width / 2.0,
            y: self.baseline - self.font_size * ASCENT_EM,
            width: self.width,
            height: self.font_size * (ASCENT_EM + DESCENT_EM),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SegmentLabelLayout {
    pub segment: Segment,
    pub x: f32,
    pub y: f32,
    pub text: TextBlock,
    pub background: Rect,
    pub corner_radius: f32,
}

#[derive(Debug, Clone)]
pub struct LegendLayout {
    /// Left edge of the text.
    pub x: f32,
    /// Vertical center of the block.
    pub y: f32,
    pub text: TextBlock,
    pub background: Rect,
    pub corner_radius: f32,
}

#[derive(Debug, Clone)]
pub struct VennLayout {
    /// Tight content bounds plus padding; becomes the SVG view box.
    pub view_box: Rect,
    pub width: f32,
    pub height: f32,
    pub unit_size: f32,
    pub circles: Vec<CircleLayout>,
    pub captions: Vec<CaptionLayout>,
    pub segments: Vec<SegmentLabelLayout>,
    pub legend: LegendLayout,
    pub title: CaptionLayout,
}

impl VennLayout {
    pub fn segment(&self, segment: Segment) -> Option<&SegmentLabelLayout> {
        self.segments.iter().find(|label| label.segment == segment)
    }
}

/// Maps layout units (y up) onto SVG points (y down).
#[derive(Debug, Clone, Copy)]
struct Projection {
    unit: f32,
}

impl Projection {
    fn point(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (x * self.unit, (CANVAS_HEIGHT - y) * self.unit)
    }

    fn length(&self, value: f32) -> f32 {
        value * self.unit
    }
}

fn measure_block(lines: Vec<String>, font_size: f32, bold: bool, theme: &VennTheme) -> TextBlock {
    let width = measure_block_width(&lines, font_size, &theme.font_family, bold);
    let height = lines.len() as f32 * font_size * theme.line_height;
    TextBlock {
        lines,
        width,
        height,
        font_size,
        bold,
    }
}

fn caption(
    text: &str,
    anchor: (f32, f32),
    font_size: f32,
    proj: Projection,
    theme: &VennTheme,
) -> CaptionLayout {
    let (x, baseline) = proj.point(anchor);
    CaptionLayout {
        text: text.to_string(),
        x,
        baseline,
        width: measure_text_width(text, font_size, &theme.font_family, true),
        font_size,
    }
}

fn boxed(center_x: f32, center_y: f32, block: &TextBlock) -> (Rect, f32) {
    let pad = block.font_size * BOX_PAD_EM;
    let rect = Rect {
        x: center_x - block.width / 2.0 - pad,
        y: center_y - block.height / 2.0 - pad,
        width: block.width + pad * 2.0,
        height: block.height + pad * 2.0,
    };
    (rect, pad)
}

pub fn compute_layout(
    categories: &StakeholderCategories,
    theme: &VennTheme,
    render: &RenderConfig,
) -> VennLayout {
    let proj = Projection {
        unit: render.unit_size.max(1.0),
    };

    let circles: Vec<CircleLayout> = Attribute::ALL
        .iter()
        .map(|attribute| {
            let (cx, cy) = proj.point(circle_center(*attribute));
            CircleLayout {
                attribute: *attribute,
                cx,
                cy,
                r: proj.length(CIRCLE_RADIUS),
            }
        })
        .collect();

    let captions: Vec<CaptionLayout> = Attribute::ALL
        .iter()
        .map(|attribute| {
            caption(
                attribute.caption(),
                caption_anchor(*attribute),
                theme.caption_font_size,
                proj,
                theme,
            )
        })
        .collect();

    let segments: Vec<SegmentLabelLayout> = Segment::ALL
        .iter()
        .map(|segment| {
            let lines = segment_label_lines(*segment, categories.names(*segment));
            let text = measure_block(lines, theme.label_font_size, true, theme);
            let (x, y) = proj.point(segment_anchor(*segment));
            let (background, corner_radius) = boxed(x, y, &text);
            SegmentLabelLayout {
                segment: *segment,
                x,
                y,
                text,
                background,
                corner_radius,
            }
        })
        .collect();

    let legend_text = measure_block(legend_lines(), theme.legend_font_size, false, theme);
    let (legend_x, legend_y) = proj.point((LEGEND_X, CENTER.1));
    let (legend_background, legend_radius) =
        boxed(legend_x + legend_text.width / 2.0, legend_y, &legend_text);
    let legend = LegendLayout {
        x: legend_x,
        y: legend_y,
        text: legend_text,
        background: legend_background,
        corner_radius: legend_radius,
    };

    let title = caption(TITLE, (CENTER.0, TITLE_Y), theme.title_font_size, proj, theme);

    let stroke = theme.circle_stroke_width / 2.0;
    let mut bounds = circles
        .iter()
        .map(|c| Rect {
            x: c.cx - c.r - stroke,
            y: c.cy - c.r - stroke,
            width: (c.r + stroke) * 2.0,
            height: (c.r + stroke) * 2.0,
        })
        .chain(captions.iter().map(CaptionLayout::bounds))
        .chain(segments.iter().map(|s| s.background))
        .fold(title.bounds(), |acc, rect| acc.union(&rect));
    bounds = bounds.union(&legend.background.inflate(theme.legend_border_width / 2.0));
    let view_box = bounds.inflate(render.pad_inches.max(0.0) * 72.0);

    VennLayout {
        width: view_box.width,
        height: view_box.height,
        view_box,
        unit_size: proj.unit,
        circles,
        captions,
        segments,
        legend,
        title,
    }
}
