use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

/// Advance per character, in ems, when no usable font is installed.
const FALLBACK_ADVANCE_EM: f32 = 0.56;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Width of a single line of text in points.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str, bold: bool) -> f32 {
    if text.is_empty() || font_size <= 0.0 {
        return 0.0;
    }
    let measured = TEXT_MEASURER
        .lock()
        .ok()
        .and_then(|mut guard| guard.measure(text, font_size, font_family, bold));
    measured.unwrap_or_else(|| fallback_width(text, font_size))
}

/// Widest line of a multi-line block.
pub fn measure_block_width(lines: &[String], font_size: f32, font_family: &str, bold: bool) -> f32 {
    lines
        .iter()
        .map(|line| measure_text_width(line, font_size, font_family, bold))
        .fold(0.0, f32::max)
}

pub fn fallback_width(text: &str, font_size: f32) -> f32 {
    text.chars().filter(|ch| *ch != '\n').count() as f32 * font_size * FALLBACK_ADVANCE_EM
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FaceKey {
    family: String,
    bold: bool,
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<FaceKey, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str, bold: bool) -> Option<f32> {
        let key = FaceKey {
            family: normalize_family_key(font_family),
            bold,
        };
        if !self.cache.contains_key(&key) {
            let face = self.load_face(&key);
            self.cache.insert(key.clone(), face);
        }
        let face = self.cache.get_mut(&key)?.as_mut()?;
        face.measure_width(text, font_size)
    }

    fn load_face(&mut self, key: &FaceKey) -> Option<FontFace> {
        let names: Vec<String> = key
            .family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" | "system-ui" => Family::SansSerif,
                "monospace" => Family::Monospace,
                _ => Family::Name(name.as_str()),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: if key.bold { Weight::BOLD } else { Weight::NORMAL },
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FontFace::parse(data.to_vec(), index))
            .flatten()
    }
}

struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    advances: HashMap<char, Option<u16>>,
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let units_per_em = Face::parse(&data, index).ok()?.units_per_em().max(1);
        Some(Self {
            data,
            index,
            units_per_em,
            advances: HashMap::new(),
        })
    }

    fn measure_width(&mut self, text: &str, font_size: f32) -> Option<f32> {
        let scale = font_size / self.units_per_em as f32;
        let fallback = font_size * FALLBACK_ADVANCE_EM;
        let mut face: Option<Face<'_>> = None;
        let mut width = 0.0f32;

        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = match self.advances.get(&ch).copied() {
                Some(cached) => cached,
                None => {
                    if face.is_none() {
                        face = Some(Face::parse(&self.data, self.index).ok()?);
                    }
                    let parsed = face.as_ref()?;
                    let value = parsed
                        .glyph_index(ch)
                        .and_then(|glyph| parsed.glyph_hor_advance(glyph));
                    self.advances.insert(ch, value);
                    value
                }
            };
            width += match advance {
                Some(units) if units > 0 => units as f32 * scale,
                _ => fallback,
            };
        }

        Some(width.max(0.0))
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}
