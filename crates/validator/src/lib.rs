//! # formcheck-validator
//!
//! A declarative form-field validation engine.
//!
//! Fields declare named rules; a [`Validator`] runs them in order, stops at
//! the first failure and records each field's verdict in a shared
//! [`ResultStore`]. Rules may answer synchronously or hand back a future, so
//! uniqueness checks and other server round-trips fit the same pipeline.
//!
//! ## Quick Start
//!
//! ```
//! use formcheck_validator::prelude::*;
//!
//! let validator = Validator::default();
//! let mut form = validator.bind([
//!     InputDecl::input("name", "text").with_attribute("required", ""),
//!     InputDecl::input("email", "email").with_attribute("required", ""),
//! ]);
//!
//! form.set_value("name", "Ada");
//! form.set_value("email", "ada@example");
//!
//! let check = validator.check_form(form.fields()).unwrap();
//! assert_eq!(check.first_invalid(), Some("email"));
//! ```
//!
//! ## Built-in Rules
//!
//! - **Presence**: [`Required`](rules::Required)
//! - **Length**: [`MinLength`](rules::MinLength), [`MaxLength`](rules::MaxLength)
//! - **Format**: [`Email`](rules::Email), [`Phone`](rules::Phone), [`Tel`](rules::Tel)
//! - **Numeric**: [`NumberType`](rules::NumberType), [`IntegerType`](rules::IntegerType)
//!
//! Custom rules implement [`Rule`](rules::Rule) or wrap a closure with
//! [`rule_fn`](rules::rule_fn).

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod field;
pub mod form;
pub mod messages;
pub mod metadata;
pub mod param;
pub mod prelude;
pub mod registry;
pub mod rules;
pub mod store;
pub mod value;
pub mod verdict;

pub use config::{AsyncPolicy, ValidatorConfig};
pub use context::{FieldContext, FieldKind};
pub use engine::{FieldCheck, FormCheck, PendingField, PendingForm, Validator};
pub use error::{CheckError, RuleError};
pub use field::{FieldConfig, FieldDescriptor, RuleSet};
pub use form::Form;
pub use messages::Messages;
pub use metadata::{InputDecl, extract_rules};
pub use param::RuleParam;
pub use registry::RuleRegistry;
pub use store::{FieldResult, ResultEvent, ResultStore};
pub use verdict::{Outcome, PendingVerdict, Verdict};
