//! Field descriptors and typed field configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::{FieldContext, FieldKind};
use crate::param::RuleParam;
use crate::rules::{MAX_LENGTH, MIN_LENGTH, REQUIRED, TYPE_SUFFIX};
use crate::value::value_text;

/// Rules declared by a field, in the order they are checked.
pub type RuleSet = IndexMap<String, RuleParam>;

// ============================================================================
// FIELD DESCRIPTOR
// ============================================================================

/// Snapshot of one field as handed to a check.
///
/// Callers mutate descriptors between checks; a check only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Stable identifier; also the key of the field's result.
    pub id: String,
    /// Current bound value.
    pub value: Value,
    /// Whether the field currently matters (e.g. is displayed).
    pub relevant: bool,
    /// Check the field even when it is not relevant.
    pub force_check: bool,
    pub context: FieldContext,
    pub rules: RuleSet,
}

impl FieldDescriptor {
    /// A relevant text field with no rules.
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            relevant: true,
            force_check: false,
            context: FieldContext::default(),
            rules: RuleSet::new(),
        }
    }

    /// Appends a rule. Re-adding a rule replaces its parameter in place.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(mut self, name: impl Into<String>, param: impl Into<RuleParam>) -> Self {
        self.rules.insert(name.into(), param.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_context(mut self, context: FieldContext) -> Self {
        self.context = context;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_relevant(mut self, relevant: bool) -> Self {
        self.relevant = relevant;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_force_check(mut self, force: bool) -> Self {
        self.force_check = force;
        self
    }

    /// Whether a check consults the rules at all.
    pub fn should_check(&self) -> bool {
        self.relevant || self.force_check
    }

    /// The value's trimmed text.
    pub fn text(&self) -> String {
        value_text(&self.value)
    }
}

// ============================================================================
// FIELD CONFIG
// ============================================================================

/// Typed declaration of a field's rules, e.g.
/// `{ "required": true, "minlength": 3, "type": "email" }`.
///
/// Rules come out in a fixed order: `required`, `minlength`, `maxlength`,
/// the custom rules in declaration order, then the `<type>Type` rule.
///
/// # Examples
///
/// ```
/// use formcheck_validator::FieldConfig;
///
/// let field = FieldConfig::new()
///     .required()
///     .minlength(3)
///     .type_hint("email")
///     .into_descriptor("contact", "");
///
/// let rules: Vec<_> = field.rules.keys().map(String::as_str).collect();
/// assert_eq!(rules, ["required", "minlength", "emailType"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub kind: FieldKind,
    pub required: bool,
    pub minlength: Option<usize>,
    pub maxlength: Option<usize>,
    #[serde(rename = "type")]
    pub type_hint: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Extra rules by name; an empty string switches a rule on without a
    /// parameter.
    pub custom: IndexMap<String, String>,
    pub force_check: bool,
}

impl FieldConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn minlength(mut self, n: usize) -> Self {
        self.minlength = Some(n);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn maxlength(mut self, n: usize) -> Self {
        self.maxlength = Some(n);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn type_hint(mut self, hint: impl Into<String>) -> Self {
        self.type_hint = Some(hint.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, name: impl Into<String>, param: impl Into<String>) -> Self {
        self.custom.insert(name.into(), param.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn force_check(mut self) -> Self {
        self.force_check = true;
        self
    }

    /// The declared rules.
    pub fn rules(&self) -> RuleSet {
        let mut rules = RuleSet::new();
        if self.required {
            rules.insert(REQUIRED.to_string(), RuleParam::Flag);
        }
        if let Some(n) = self.minlength {
            rules.insert(MIN_LENGTH.to_string(), n.into());
        }
        if let Some(n) = self.maxlength {
            rules.insert(MAX_LENGTH.to_string(), n.into());
        }
        for (name, param) in &self.custom {
            rules.insert(name.clone(), RuleParam::from(param.as_str()));
        }
        if let Some(hint) = &self.type_hint {
            rules.insert(format!("{hint}{TYPE_SUFFIX}"), RuleParam::Flag);
        }
        rules
    }

    /// The declared metadata.
    pub fn context(&self) -> FieldContext {
        let mut context = FieldContext::new(self.kind);
        if let Some(min) = self.min {
            context = context.with_min(min.to_string());
        }
        if let Some(max) = self.max {
            context = context.with_max(max.to_string());
        }
        if let Some(hint) = &self.type_hint {
            context = context.with_type_hint(hint.clone());
        }
        context
    }

    /// Builds the descriptor for field `id` holding `value`.
    pub fn into_descriptor(self, id: impl Into<String>, value: impl Into<Value>) -> FieldDescriptor {
        FieldDescriptor {
            rules: self.rules(),
            context: self.context(),
            force_check: self.force_check,
            ..FieldDescriptor::new(id, value)
        }
    }
}
