//! Rule extraction from declared input attributes.
//!
//! A view layer describes each bound input once, as an [`InputDecl`]. The
//! rules that apply are derived from the registry:
//!
//! - a rule whose name ends in `Type` is a type discriminator; it applies when
//!   the input's type hint matches (`email` activates `emailType`);
//! - any other rule applies when an attribute of the same name is declared.
//!   The attribute value becomes the parameter, an empty value a bare flag.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::context::{FieldContext, FieldKind};
use crate::field::RuleSet;
use crate::param::RuleParam;
use crate::registry::RuleRegistry;
use crate::rules::TYPE_SUFFIX;

/// Attribute that overrides the input's own type as the type hint.
pub const TYPE_ATTRIBUTE: &str = "data-type";
/// Attribute that forces checking even when the input is not relevant.
pub const FORCE_ATTRIBUTE: &str = "force-valid";
pub const MIN_ATTRIBUTE: &str = "min";
pub const MAX_ATTRIBUTE: &str = "max";

/// Declaration of one bound input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDecl {
    /// Identifier of the bound value; inputs sharing it share a field.
    pub model: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// The input's own type (`text`, `email`, `number`, `radio` ...).
    #[serde(default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl InputDecl {
    #[must_use]
    pub fn new(model: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            model: model.into(),
            kind,
            input_type: None,
            attributes: IndexMap::new(),
        }
    }

    /// An `<input>` of the given type; the kind follows from the type.
    #[must_use]
    pub fn input(model: impl Into<String>, input_type: impl Into<String>) -> Self {
        let input_type = input_type.into();
        Self {
            kind: FieldKind::from_input_type(&input_type),
            input_type: Some(input_type),
            ..Self::new(model, FieldKind::Text)
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// `data-type` when declared and non-empty, the input type otherwise.
    pub fn type_hint(&self) -> Option<&str> {
        self.attributes
            .get(TYPE_ATTRIBUTE)
            .map(String::as_str)
            .filter(|hint| !hint.is_empty())
            .or(self.input_type.as_deref())
    }

    pub fn force_check(&self) -> bool {
        self.attributes.contains_key(FORCE_ATTRIBUTE)
    }

    /// Metadata visible to rules.
    pub fn context(&self) -> FieldContext {
        let mut context = FieldContext::new(self.kind);
        if let Some(min) = self.attributes.get(MIN_ATTRIBUTE) {
            context = context.with_min(min.clone());
        }
        if let Some(max) = self.attributes.get(MAX_ATTRIBUTE) {
            context = context.with_max(max.clone());
        }
        if let Some(hint) = self.type_hint() {
            context = context.with_type_hint(hint);
        }
        context
    }
}

/// Derives the rules that apply to `decl`, in registry order.
pub fn extract_rules(registry: &RuleRegistry, decl: &InputDecl) -> RuleSet {
    let hint = decl.type_hint();
    let mut rules = RuleSet::new();
    for name in registry.names() {
        let type_match = name
            .strip_suffix(TYPE_SUFFIX)
            .is_some_and(|stem| !stem.is_empty() && Some(stem) == hint);
        if type_match {
            rules.insert(name.to_string(), RuleParam::Flag);
        } else if let Some(value) = decl.attributes.get(name) {
            rules.insert(name.to_string(), RuleParam::from(value.as_str()));
        }
    }
    rules
}
