//! Read-only field metadata handed to rules.
//!
//! Rules never see framework objects, only what an input declares about
//! itself: its element kind, its numeric range and its type hint.

use serde::{Deserialize, Serialize};

/// Element kind of a bound input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input (including email, number, tel ...).
    #[default]
    Text,
    /// Multi-line text.
    Textarea,
    /// Drop-down selection.
    Select,
    /// One option of a radio group.
    Radio,
    /// A checkbox, alone or in a group.
    Checkbox,
}

impl FieldKind {
    /// Kinds whose value is picked rather than typed.
    pub fn is_choice(self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Kinds where several inputs share one bound value.
    pub fn is_grouped(self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox)
    }

    /// Maps an HTML `type` attribute to a kind. Unknown types are text.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.trim().to_ascii_lowercase().as_str() {
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "select" | "select-one" | "select-multiple" => Self::Select,
            "textarea" => Self::Textarea,
            _ => Self::Text,
        }
    }
}

/// Metadata a rule may consult besides the value itself.
///
/// Bounds are kept as declared. A bound that is missing or does not parse as
/// a number is unbounded on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldContext {
    kind: FieldKind,
    min: Option<String>,
    max: Option<String>,
    type_hint: Option<String>,
}

impl FieldContext {
    /// Context for an input of the given kind with nothing else declared.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Declares the lower numeric bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Declares the upper numeric bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Declares the type hint (`email`, `number`, ...).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_hint(mut self, hint: impl Into<String>) -> Self {
        self.type_hint = Some(hint.into());
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    /// Declared lower bound, or negative infinity.
    pub fn lower_bound(&self) -> f64 {
        parse_bound(self.min.as_deref()).unwrap_or(f64::NEG_INFINITY)
    }

    /// Declared upper bound, or positive infinity.
    pub fn upper_bound(&self) -> f64 {
        parse_bound(self.max.as_deref()).unwrap_or(f64::INFINITY)
    }
}

fn parse_bound(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|bound| !bound.is_nan())
}
