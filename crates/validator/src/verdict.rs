//! Verdicts and rule outcomes.
//!
//! A rule answers either immediately with a [`Verdict`] or with a pending
//! computation that resolves to one later. The two cases are an explicit
//! tagged union, [`Outcome`], rather than something discovered at runtime.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use serde::Serialize;

use crate::error::RuleError;

// ============================================================================
// VERDICT
// ============================================================================

/// The outcome of one rule against one value.
///
/// A passing verdict never carries a message. A failing verdict normally
/// does, unless the rule deliberately suppresses messaging
/// (see [`Verdict::silent_fail`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Verdict {
    valid: bool,
    message: String,
}

impl Verdict {
    /// A passing verdict.
    #[must_use]
    pub fn pass() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// A failing verdict with a human-readable message.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: message.into(),
        }
    }

    /// A failing verdict that shows no message.
    #[must_use]
    pub fn silent_fail() -> Self {
        Self {
            valid: false,
            message: String::new(),
        }
    }

    /// Builds a verdict from a condition, using `message` only on failure.
    #[must_use]
    pub fn check(valid: bool, message: impl FnOnce() -> String) -> Self {
        if valid { Self::pass() } else { Self::fail(message()) }
    }

    /// Whether the value satisfied the rule.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The failure message; empty for passing verdicts.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::pass()
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// A verdict that has not been computed yet.
pub type PendingVerdict = BoxFuture<'static, Result<Verdict, RuleError>>;

/// What a rule returns: a verdict now, or a verdict later.
pub enum Outcome {
    /// The verdict is known immediately.
    Ready(Verdict),
    /// The verdict arrives when the future resolves.
    Pending(PendingVerdict),
}

impl Outcome {
    /// An immediate passing outcome.
    #[must_use]
    pub fn pass() -> Self {
        Self::Ready(Verdict::pass())
    }

    /// An immediate failing outcome.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Ready(Verdict::fail(message))
    }

    /// Wraps a future as a pending outcome.
    ///
    /// The future must own everything it needs: it outlives the rule call
    /// that created it.
    #[must_use]
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<Verdict, RuleError>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }

    /// Returns `true` if the verdict is still to come.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The immediate verdict, if there is one.
    pub fn into_ready(self) -> Option<Verdict> {
        match self {
            Self::Ready(verdict) => Some(verdict),
            Self::Pending(_) => None,
        }
    }
}

impl From<Verdict> for Outcome {
    fn from(verdict: Verdict) -> Self {
        Self::Ready(verdict)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(verdict) => f.debug_tuple("Ready").field(verdict).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
