//! Rules and the built-in rule set.
//!
//! A rule is a named check of one field value. It sees the value, its trimmed
//! text, the field's declared metadata and the parameter the field declared
//! for it, and answers with an [`Outcome`]. Rules are pure: they must not
//! mutate shared state.
//!
//! # Built-in rules
//!
//! | name | parameter | passes when |
//! |---|---|---|
//! | `required` | none | trimmed value is non-empty |
//! | `minlength` | count | at least `n` characters |
//! | `maxlength` | count | at most `n` characters |
//! | `emailType` | none | looks like an email address |
//! | `phoneType` | none | 11-digit mobile number |
//! | `telType` | none | landline with optional area code and extension |
//! | `numberType` | none | numeric and within the declared `min`/`max` |
//! | `integerType` | none | all digits, then the `numberType` bound check |
//!
//! Rules other than `required` are never called with an empty value; the
//! engine skips them.

use serde_json::Value;

use crate::context::FieldContext;
use crate::error::CheckError;
use crate::messages::Messages;
use crate::param::RuleParam;
use crate::registry::RuleRegistry;
use crate::verdict::Outcome;

pub mod format;
pub mod length;
pub mod numeric;
pub mod required;

pub use format::{Email, Phone, Tel};
pub use length::{MaxLength, MinLength};
pub use numeric::{IntegerType, NumberType};
pub use required::Required;

pub const REQUIRED: &str = "required";
pub const MIN_LENGTH: &str = "minlength";
pub const MAX_LENGTH: &str = "maxlength";
pub const EMAIL_TYPE: &str = "emailType";
pub const PHONE_TYPE: &str = "phoneType";
pub const TEL_TYPE: &str = "telType";
pub const NUMBER_TYPE: &str = "numberType";
pub const INTEGER_TYPE: &str = "integerType";

/// Suffix marking a rule as a type discriminator.
pub const TYPE_SUFFIX: &str = "Type";

// ============================================================================
// RULE TRAIT
// ============================================================================

/// A registered validation rule.
///
/// Errors are reserved for configuration faults such as an unusable
/// parameter. A value that fails the rule is an `Ok` outcome holding a
/// failing verdict.
pub trait Rule: Send + Sync {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError>;
}

/// A rule backed by a closure. Built with [`rule_fn`].
pub struct FnRule<F>(F);

impl<F> Rule for FnRule<F>
where
    F: Fn(&RuleCall<'_>) -> Result<Outcome, CheckError> + Send + Sync,
{
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        (self.0)(call)
    }
}

/// Turns a closure into a [`Rule`].
///
/// # Examples
///
/// ```
/// use formcheck_validator::rules::rule_fn;
/// use formcheck_validator::{Outcome, RuleRegistry};
///
/// let mut registry = RuleRegistry::with_builtins();
/// registry.register("lowercase", rule_fn(|call| {
///     let text = call.text();
///     Ok(if text == text.to_lowercase() {
///         Outcome::pass()
///     } else {
///         Outcome::fail("use lowercase letters only")
///     })
/// }));
/// assert!(registry.contains("lowercase"));
/// ```
pub fn rule_fn<F>(f: F) -> FnRule<F>
where
    F: Fn(&RuleCall<'_>) -> Result<Outcome, CheckError> + Send + Sync,
{
    FnRule(f)
}

// ============================================================================
// RULE CALL
// ============================================================================

/// Everything a rule sees during one invocation.
#[derive(Clone, Copy)]
pub struct RuleCall<'a> {
    name: &'a str,
    value: &'a Value,
    text: &'a str,
    context: &'a FieldContext,
    param: &'a RuleParam,
    registry: &'a RuleRegistry,
    messages: &'a Messages,
}

impl<'a> RuleCall<'a> {
    pub(crate) fn new(
        name: &'a str,
        value: &'a Value,
        text: &'a str,
        context: &'a FieldContext,
        param: &'a RuleParam,
        registry: &'a RuleRegistry,
        messages: &'a Messages,
    ) -> Self {
        Self {
            name,
            value,
            text,
            context,
            param,
            registry,
            messages,
        }
    }

    /// Name the rule was invoked under.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// The raw bound value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The value's trimmed text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn context(&self) -> &'a FieldContext {
        self.context
    }

    pub fn param(&self) -> &'a RuleParam {
        self.param
    }

    pub fn messages(&self) -> &'a Messages {
        self.messages
    }

    /// Runs another registered rule on the same value, context and parameter.
    pub fn delegate(&self, name: &'a str) -> Result<Outcome, CheckError> {
        self.registry.invoke(&RuleCall { name, ..*self })
    }
}

impl std::fmt::Debug for RuleCall<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleCall")
            .field("name", &self.name)
            .field("text", &self.text)
            .field("context", self.context)
            .field("param", self.param)
            .finish_non_exhaustive()
    }
}
