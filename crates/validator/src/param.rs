//! Rule parameters.

use std::fmt;

use crate::error::CheckError;

/// The parameter a field declares for one of its rules.
///
/// A rule declared without a value (`required`, `emailType`) carries
/// [`RuleParam::Flag`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RuleParam {
    /// Rule is switched on with no value.
    #[default]
    Flag,
    /// Rule carries a raw value, e.g. the `3` of `minlength="3"`.
    Value(String),
}

impl RuleParam {
    /// The raw value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Value(value) => Some(value),
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    /// Reads the parameter as a non-negative count for `rule`.
    pub fn as_count(&self, rule: &str) -> Result<usize, CheckError> {
        let raw = self.value().ok_or_else(|| {
            CheckError::invalid_parameter(rule, self.to_string(), "expected a character count")
        })?;
        raw.trim().parse::<usize>().map_err(|_| {
            CheckError::invalid_parameter(rule, raw, "expected a character count")
        })
    }
}

impl fmt::Display for RuleParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("true"),
            Self::Value(value) => f.write_str(value),
        }
    }
}

/// An empty attribute value switches the rule on without a parameter.
impl From<&str> for RuleParam {
    fn from(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Flag
        } else {
            Self::Value(raw.to_string())
        }
    }
}

impl From<String> for RuleParam {
    fn from(raw: String) -> Self {
        if raw.is_empty() {
            Self::Flag
        } else {
            Self::Value(raw)
        }
    }
}

impl From<usize> for RuleParam {
    fn from(count: usize) -> Self {
        Self::Value(count.to_string())
    }
}

impl From<bool> for RuleParam {
    fn from(_: bool) -> Self {
        Self::Flag
    }
}
