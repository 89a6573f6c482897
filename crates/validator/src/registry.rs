//! Rule registry.
//!
//! An owned, ordered mapping from rule name to rule. Each
//! [`Validator`](crate::Validator) holds its own registry, so tests and
//! independent forms can run with isolated rule sets.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, trace};

use crate::context::FieldContext;
use crate::error::CheckError;
use crate::messages::Messages;
use crate::param::RuleParam;
use crate::rules::{
    self, Email, IntegerType, MaxLength, MinLength, NumberType, Phone, Required, Rule,
    RuleCall, Tel,
};
use crate::value::value_text;
use crate::verdict::Outcome;

/// Registered rules, in registration order.
///
/// Registering a name that already exists replaces the rule but keeps its
/// position.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    rules: IndexMap<String, Arc<dyn Rule>>,
}

impl RuleRegistry {
    /// A registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the built-in rules.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(rules::REQUIRED, Required);
        registry.register(rules::MIN_LENGTH, MinLength);
        registry.register(rules::MAX_LENGTH, MaxLength);
        registry.register(rules::EMAIL_TYPE, Email);
        registry.register(rules::PHONE_TYPE, Phone);
        registry.register(rules::TEL_TYPE, Tel);
        registry.register(rules::NUMBER_TYPE, NumberType);
        registry.register(rules::INTEGER_TYPE, IntegerType);
        registry
    }

    /// Registers `rule` under `name`, silently replacing any previous rule.
    pub fn register<R>(&mut self, name: impl Into<String>, rule: R)
    where
        R: Rule + 'static,
    {
        let name = name.into();
        if self.rules.insert(name.clone(), Arc::new(rule)).is_some() {
            info!(rule = %name, "validation rule replaced");
        }
    }

    /// Registers a closure as a rule.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&RuleCall<'_>) -> Result<Outcome, CheckError> + Send + Sync + 'static,
    {
        self.register(name, rules::rule_fn(f));
    }

    /// Looks up a rule by name.
    pub fn lookup(&self, name: &str) -> Result<&Arc<dyn Rule>, CheckError> {
        self.rules
            .get(name)
            .ok_or_else(|| CheckError::unknown_rule(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Rule names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates a single rule against a value, outside of any field check.
    ///
    /// Unlike a field check this does not skip empty values.
    pub fn evaluate(
        &self,
        name: &str,
        value: &Value,
        context: &FieldContext,
        param: &RuleParam,
        messages: &Messages,
    ) -> Result<Outcome, CheckError> {
        let text = value_text(value);
        self.invoke(&RuleCall::new(
            name, value, &text, context, param, self, messages,
        ))
    }

    pub(crate) fn invoke(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let rule = self.lookup(call.name())?;
        trace!(rule = call.name(), param = %call.param(), "invoking rule");
        rule.check(call)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}
