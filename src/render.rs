use crate::config::{Config, RenderConfig};
use crate::error::RenderError;
use crate::ir::StakeholderCategories;
use crate::layout::{CaptionLayout, Rect, TextBlock, VennLayout, compute_layout};
use crate::theme::VennTheme;
use anyhow::Result;
use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Arc;

static SVG_FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    Arc::new(db)
});

/// Lays out, serializes and rasterizes one diagram.
pub fn render_categories(
    categories: &StakeholderCategories,
    config: &Config,
) -> Result<Vec<u8>, RenderError> {
    let layout = compute_layout(categories, &config.theme, &config.render);
    let svg = render_svg(&layout, &config.theme, &config.render);
    render_png(&svg, &config.render)
}

pub fn render_svg(layout: &VennLayout, theme: &VennTheme, render: &RenderConfig) -> String {
    let mut svg = String::new();
    let vb = layout.view_box;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{:.2}\" height=\"{:.2}\" viewBox=\"{:.2} {:.2} {:.2} {:.2}\">",
        layout.width, layout.height, vb.x, vb.y, vb.width, vb.height
    ));

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
        vb.x,
        vb.y,
        vb.width,
        vb.height,
        escape_xml(&render.background)
    ));

    for circle in &layout.circles {
        let style = theme.circle(circle.attribute);
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\" fill-opacity=\"{}\" stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"/>",
            circle.cx,
            circle.cy,
            circle.r,
            escape_xml(&style.fill),
            theme.circle_opacity,
            escape_xml(&style.stroke),
            theme.circle_opacity,
            theme.circle_stroke_width
        ));
    }

    for caption in &layout.captions {
        svg.push_str(&caption_svg(caption, theme));
    }

    for label in &layout.segments {
        svg.push_str(&box_svg(
            &label.background,
            label.corner_radius,
            &theme.label_background,
            theme.label_background_opacity,
            &theme.label_border,
            theme.label_border_width,
        ));
        svg.push_str(&text_block_svg(label.x, label.y, &label.text, theme, "middle"));
    }

    let legend = &layout.legend;
    svg.push_str(&box_svg(
        &legend.background,
        legend.corner_radius,
        &theme.legend_background,
        theme.legend_background_opacity,
        &theme.legend_border,
        theme.legend_border_width,
    ));
    svg.push_str(&text_block_svg(legend.x, legend.y, &legend.text, theme, "start"));

    svg.push_str(&caption_svg(&layout.title, theme));

    svg.push_str("</svg>");
    svg
}

fn box_svg(rect: &Rect, radius: f32, fill: &str, opacity: f32, stroke: &str, stroke_width: f32) -> String {
    format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{radius:.2}\" ry=\"{radius:.2}\" fill=\"{}\" fill-opacity=\"{opacity}\" stroke=\"{}\" stroke-opacity=\"{opacity}\" stroke-width=\"{stroke_width}\"/>",
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        escape_xml(fill),
        escape_xml(stroke)
    )
}

fn caption_svg(caption: &CaptionLayout, theme: &VennTheme) -> String {
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        caption.x,
        caption.baseline,
        escape_xml(&theme.font_family),
        caption.font_size,
        escape_xml(&theme.text_color),
        escape_xml(&caption.text)
    )
}

fn text_block_svg(x: f32, center_y: f32, block: &TextBlock, theme: &VennTheme, anchor: &str) -> String {
    let start_y = block.first_baseline(center_y, theme.line_height);
    let weight = if block.bold { "bold" } else { "normal" };
    let mut text = String::new();

    text.push_str(&format!(
        "<text x=\"{x:.2}\" y=\"{start_y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" fill=\"{}\">",
        escape_xml(&theme.font_family),
        block.font_size,
        escape_xml(&theme.text_color)
    ));

    // Absolute baselines: a relative dy on an empty tspan is dropped by usvg.
    let step = block.font_size * theme.line_height;
    for (idx, line) in block.lines.iter().enumerate() {
        let line_y = start_y + step * idx as f32;
        text.push_str(&format!(
            "<tspan x=\"{x:.2}\" y=\"{line_y:.2}\">{}</tspan>",
            escape_xml(line)
        ));
    }

    text.push_str("</text>");
    text
}

/// Rasterizes an SVG document to PNG bytes at `render.dpi`.
pub fn render_png(svg: &str, render: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let opt = usvg::Options {
        fontdb: SVG_FONTS.clone(),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = render.pixel_scale();
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(RenderError::Pixmap { width, height })?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    pixmap
        .encode_png()
        .map_err(|err| RenderError::Encode(err.to_string()))
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

pub fn write_output_png(svg: &str, output: &Path, render: &RenderConfig) -> Result<()> {
    let bytes = render_png(svg, render)?;
    std::fs::write(output, bytes)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn preview_config() -> Config {
        let mut config = Config::default();
        config.render.dpi = 36.0;
        config
    }

    fn svg_for(categories: &StakeholderCategories) -> String {
        let config = Config::default();
        let layout = compute_layout(categories, &config.theme, &config.render);
        render_svg(&layout, &config.theme, &config.render)
    }

    #[test]
    fn render_svg_basic() {
        let svg = svg_for(&StakeholderCategories::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("Poder"));
        assert!(svg.contains("Legitimidad"));
        assert!(svg.contains("Urgencia"));
        assert!(svg.contains("Análisis de Preponderancia de Stakeholders"));
        assert!(svg.contains("7: Críticos - alta"));
    }

    #[test]
    fn names_are_escaped() {
        let mut categories = StakeholderCategories::default();
        categories.inactivo = vec!["Smith & Sons <Ltd>".to_string()];
        let svg = svg_for(&categories);
        assert!(svg.contains("Smith &amp; Sons &lt;Ltd&gt;"));
        assert!(!svg.contains("<Ltd>"));
    }

    #[test]
    fn truncated_label_reaches_svg() {
        let mut categories = StakeholderCategories::default();
        categories.criticos = ["Alice", "Bob", "Carol", "Dave", "Eve", "Frank"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let svg = svg_for(&categories);
        assert!(svg.contains(">Dave</tspan>"));
        assert!(svg.contains(">(+2 más)</tspan>"));
        assert!(!svg.contains("Eve"));
        assert!(!svg.contains("Frank"));
    }

    #[test]
    fn blank_names_keep_their_line() {
        let mut categories = StakeholderCategories::default();
        categories.inactivo = vec![String::new(), "   ".to_string(), "Bob".to_string()];
        let config = Config::default();
        let layout = compute_layout(&categories, &config.theme, &config.render);
        let svg = render_svg(&layout, &config.theme, &config.render);

        let label = layout.segment(crate::ir::Segment::Inactivo).expect("label");
        let step = label.text.font_size * config.theme.line_height;
        let first = label.text.first_baseline(label.y, config.theme.line_height);
        let bob_y = format!("y=\"{:.2}\">Bob</tspan>", first + step * 3.0);
        assert!(svg.contains(&bob_y), "Bob should sit on the fourth line: {bob_y}");
        assert!(!svg.contains(" dy="));
    }

    #[test]
    fn png_has_signature_and_scales_with_dpi() {
        let config = preview_config();
        let layout = compute_layout(&StakeholderCategories::default(), &config.theme, &config.render);
        let svg = render_svg(&layout, &config.theme, &config.render);
        let small = render_png(&svg, &config.render).expect("png");
        assert_eq!(&small[..8], &PNG_SIGNATURE);

        let mut larger = config.render.clone();
        larger.dpi = 72.0;
        let big = render_png(&svg, &larger).expect("png");
        assert!(png_width(&big) > png_width(&small));
        assert!(png_width(&big).abs_diff(layout.width.round() as u32) <= 1);
    }

    #[test]
    fn invalid_svg_is_an_error() {
        let err = render_png("<not-svg", &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Svg(_)));
    }

    fn png_width(bytes: &[u8]) -> u32 {
        u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]])
    }
}
