use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Names shown per segment label before the remainder is collapsed.
pub const MAX_LABEL_NAMES: usize = 4;

/// Stakeholder names grouped by salience segment.
///
/// Every key is required; unknown keys in the input are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeholderCategories {
    pub inactivo: Vec<String>,
    pub discrecional: Vec<String>,
    pub demandante: Vec<String>,
    pub dominante: Vec<String>,
    pub peligroso: Vec<String>,
    pub dependiente: Vec<String>,
    pub criticos: Vec<String>,
}

impl StakeholderCategories {
    pub fn names(&self, segment: Segment) -> &[String] {
        match segment {
            Segment::Inactivo => &self.inactivo,
            Segment::Discrecional => &self.discrecional,
            Segment::Demandante => &self.demandante,
            Segment::Dominante => &self.dominante,
            Segment::Peligroso => &self.peligroso,
            Segment::Dependiente => &self.dependiente,
            Segment::Criticos => &self.criticos,
        }
    }

    pub fn names_mut(&mut self, segment: Segment) -> &mut Vec<String> {
        match segment {
            Segment::Inactivo => &mut self.inactivo,
            Segment::Discrecional => &mut self.discrecional,
            Segment::Demandante => &mut self.demandante,
            Segment::Dominante => &mut self.dominante,
            Segment::Peligroso => &mut self.peligroso,
            Segment::Dependiente => &mut self.dependiente,
            Segment::Criticos => &mut self.criticos,
        }
    }

    pub fn total(&self) -> usize {
        Segment::ALL.iter().map(|s| self.names(*s).len()).sum()
    }
}

/// Body of `POST /stakeholder-venn`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VennRequest {
    pub categorias: StakeholderCategories,
}

/// Parses a request body. Any JSON, missing-key or type problem is reported
/// as [`RenderError::InvalidRequest`].
pub fn parse_request(body: &[u8]) -> Result<StakeholderCategories, RenderError> {
    let request: VennRequest =
        serde_json::from_slice(body).map_err(|err| RenderError::InvalidRequest(err.to_string()))?;
    Ok(request.categorias)
}

/// Accepts either a full request body or the bare category object.
pub fn parse_categories(input: &str) -> Result<StakeholderCategories, RenderError> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(|err| RenderError::InvalidRequest(err.to_string()))?;
    let inner = match value.get("categorias") {
        Some(inner) => inner.clone(),
        None => value,
    };
    serde_json::from_value(inner).map_err(|err| RenderError::InvalidRequest(err.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Inactivo,
    Discrecional,
    Demandante,
    Dominante,
    Peligroso,
    Dependiente,
    Criticos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Salience {
    Low,
    Medium,
    High,
}

impl Salience {
    pub fn label(self) -> &'static str {
        match self {
            Salience::Low => "baja",
            Salience::Medium => "media",
            Salience::High => "alta",
        }
    }
}

/// The three attribute sets of the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Power,
    Legitimacy,
    Urgency,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Power, Attribute::Legitimacy, Attribute::Urgency];

    pub fn caption(self) -> &'static str {
        match self {
            Attribute::Power => "Poder",
            Attribute::Legitimacy => "Legitimidad",
            Attribute::Urgency => "Urgencia",
        }
    }
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::Inactivo,
        Segment::Discrecional,
        Segment::Demandante,
        Segment::Dominante,
        Segment::Peligroso,
        Segment::Dependiente,
        Segment::Criticos,
    ];

    pub fn number(self) -> u8 {
        match self {
            Segment::Inactivo => 1,
            Segment::Discrecional => 2,
            Segment::Demandante => 3,
            Segment::Dominante => 4,
            Segment::Peligroso => 5,
            Segment::Dependiente => 6,
            Segment::Criticos => 7,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Segment::Inactivo => "inactivo",
            Segment::Discrecional => "discrecional",
            Segment::Demandante => "demandante",
            Segment::Dominante => "dominante",
            Segment::Peligroso => "peligroso",
            Segment::Dependiente => "dependiente",
            Segment::Criticos => "criticos",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Segment::Inactivo => "Inactivo",
            Segment::Discrecional => "Discrecional",
            Segment::Demandante => "Demandante",
            Segment::Dominante => "Dominante",
            Segment::Peligroso => "Peligroso",
            Segment::Dependiente => "Dependiente",
            Segment::Criticos => "Críticos",
        }
    }

    pub fn salience(self) -> Salience {
        match self.attributes().len() {
            1 => Salience::Low,
            2 => Salience::Medium,
            _ => Salience::High,
        }
    }

    pub fn attributes(self) -> &'static [Attribute] {
        use Attribute::*;
        match self {
            Segment::Inactivo => &[Power],
            Segment::Discrecional => &[Legitimacy],
            Segment::Demandante => &[Urgency],
            Segment::Dominante => &[Power, Legitimacy],
            Segment::Peligroso => &[Power, Urgency],
            Segment::Dependiente => &[Legitimacy, Urgency],
            Segment::Criticos => &[Power, Legitimacy, Urgency],
        }
    }
}

/// Builds the label lines for one segment: the number, then up to
/// [`MAX_LABEL_NAMES`] names, then a `(+N más)` line for the rest.
pub fn segment_label_lines(segment: Segment, names: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(names.len().min(MAX_LABEL_NAMES) + 2);
    lines.push(segment.number().to_string());
    lines.extend(names.iter().take(MAX_LABEL_NAMES).cloned());
    if names.len() > MAX_LABEL_NAMES {
        lines.push(format!("(+{} más)", names.len() - MAX_LABEL_NAMES));
    }
    lines
}

pub fn segment_label_text(segment: Segment, names: &[String]) -> String {
    segment_label_lines(segment, names).join("\n")
}

pub fn legend_lines() -> Vec<String> {
    let mut lines = vec!["Categorías:".to_string()];
    for segment in Segment::ALL {
        lines.push(format!(
            "{}: {} - {}",
            segment.number(),
            segment.display_name(),
            segment.salience().label()
        ));
    }
    lines
}
