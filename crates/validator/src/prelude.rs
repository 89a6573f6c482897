//! Prelude module for convenient imports.
//!
//! ```
//! use formcheck_validator::prelude::*;
//!
//! let validator = Validator::new(ValidatorConfig::default().with_async_policy(AsyncPolicy::Last));
//! assert!(validator.registry().contains("emailType"));
//! ```

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::config::{AsyncPolicy, ValidatorConfig};
pub use crate::engine::{FieldCheck, FormCheck, Validator};
pub use crate::error::{CheckError, RuleError};
pub use crate::store::{FieldResult, ResultEvent, ResultStore};

// ============================================================================
// FIELDS
// ============================================================================

pub use crate::context::{FieldContext, FieldKind};
pub use crate::field::{FieldConfig, FieldDescriptor};
pub use crate::form::Form;
pub use crate::metadata::InputDecl;

// ============================================================================
// RULES
// ============================================================================

pub use crate::param::RuleParam;
pub use crate::registry::RuleRegistry;
pub use crate::rules::{Rule, RuleCall, rule_fn};
pub use crate::verdict::{Outcome, Verdict};
