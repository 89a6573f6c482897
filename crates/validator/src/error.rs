//! Error types for rule evaluation.
//!
//! A value that fails a rule is not an error: it produces a
//! [`Verdict`](crate::Verdict) with `valid == false`. The variants here are
//! faults that abort the whole check call and must reach the caller.

/// Failure of a pending rule computation (the computation itself failed
/// instead of resolving to a verdict).
pub type RuleError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a field or form check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// A field declares a rule name that is not registered.
    #[error("unknown validation rule `{name}`")]
    UnknownRule {
        /// The unregistered rule name.
        name: String,
    },

    /// A rule parameter could not be interpreted by the rule.
    #[error("rule `{rule}` cannot use parameter `{param}`: {reason}")]
    InvalidParameter {
        /// Rule that rejected the parameter.
        rule: String,
        /// The raw parameter as declared.
        param: String,
        /// What the rule expected.
        reason: String,
    },

    /// An asynchronous rule failed instead of resolving to a verdict.
    #[error("asynchronous rule `{rule}` failed for field `{field}`: {source}")]
    AsyncRule {
        /// Field being checked.
        field: String,
        /// Rule that produced the pending verdict.
        rule: String,
        /// The underlying failure.
        #[source]
        source: RuleError,
    },
}

impl CheckError {
    pub(crate) fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    pub(crate) fn invalid_parameter(
        rule: impl Into<String>,
        param: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            rule: rule.into(),
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for setup defects (unknown rules, bad parameters)
    /// as opposed to runtime failures of asynchronous rules.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownRule { .. } | Self::InvalidParameter { .. }
        )
    }
}
