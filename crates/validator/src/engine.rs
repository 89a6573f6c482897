//! Evaluation engine.
//!
//! [`Validator::check_field`] runs a field's rules in declared order and stops
//! at the first synchronous failure. Rules that answer later are collected and
//! combined per [`AsyncPolicy`]; the check then hands back a [`FieldCheck`]
//! the caller awaits. [`Validator::check_form`] checks every field and answers
//! synchronously whenever a synchronous failure settles the outcome.
//!
//! Every check writes its verdict to the [`ResultStore`]. A pending check
//! only writes if no newer check of the same field started in the meantime.

use std::fmt;
use std::future::IntoFuture;

use futures::future::{self, BoxFuture, join_all};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::config::{AsyncPolicy, ValidatorConfig};
use crate::error::CheckError;
use crate::field::FieldDescriptor;
use crate::form::Form;
use crate::metadata::InputDecl;
use crate::registry::RuleRegistry;
use crate::rules::{REQUIRED, Rule, RuleCall};
use crate::store::ResultStore;
use crate::verdict::{Outcome, PendingVerdict, Verdict};

// ============================================================================
// VALIDATOR
// ============================================================================

/// Checks fields against a rule registry and records the results.
///
/// # Examples
///
/// ```
/// use formcheck_validator::{FieldConfig, Validator, ValidatorConfig};
///
/// let validator = Validator::new(ValidatorConfig::default());
/// let field = FieldConfig::new().required().into_descriptor("name", "");
///
/// let verdict = validator.check_field(&field).unwrap().ready().unwrap();
/// assert!(!verdict.is_valid());
/// assert_eq!(validator.results().get("name").unwrap().valid, Some(false));
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
    config: ValidatorConfig,
    store: ResultStore,
}

impl Validator {
    /// A validator with the built-in rules.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_registry(RuleRegistry::with_builtins(), config)
    }

    #[must_use]
    pub fn with_registry(registry: RuleRegistry, config: ValidatorConfig) -> Self {
        let store = ResultStore::new(config.namespace.clone(), config.event_capacity);
        Self {
            registry,
            config,
            store,
        }
    }

    /// Reports into an existing store instead of a private one.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_store(mut self, store: ResultStore) -> Self {
        self.store = store;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The result bag.
    pub fn results(&self) -> &ResultStore {
        &self.store
    }

    /// Registers a rule, replacing any rule of the same name.
    pub fn add_rule<R>(&mut self, name: impl Into<String>, rule: R)
    where
        R: Rule + 'static,
    {
        self.registry.register(name, rule);
    }

    pub fn add_rule_fn<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&RuleCall<'_>) -> Result<Outcome, CheckError> + Send + Sync + 'static,
    {
        self.registry.register_fn(name, f);
    }

    /// Binds declared inputs and creates a result for every field.
    pub fn bind<I>(&self, decls: I) -> Form
    where
        I: IntoIterator<Item = InputDecl>,
    {
        let form = Form::bind(&self.registry, decls);
        self.track(form.fields());
        debug!(namespace = self.store.namespace(), fields = form.len(), "form bound");
        form
    }

    /// Creates a result for every field that has none yet.
    pub fn track(&self, fields: &[FieldDescriptor]) {
        for field in fields {
            self.store.register(&field.id);
        }
    }

    /// Stores a new value and re-checks the first field bound to `id`.
    ///
    /// Returns `None` if the form has no such field. A returned
    /// [`FieldCheck::Pending`] writes its verdict only once it is awaited;
    /// a hook that discards it leaves the field's result as it was.
    #[must_use = "a pending check does nothing unless awaited"]
    pub fn on_change(
        &self,
        form: &mut Form,
        id: &str,
        value: impl Into<Value>,
    ) -> Result<Option<FieldCheck>, CheckError> {
        if !form.set_value(id, value) {
            return Ok(None);
        }
        form.field(id)
            .map(|field| self.check_field(field))
            .transpose()
    }

    /// Checks one field.
    ///
    /// A field that is neither relevant nor forced passes without touching
    /// its stored result. Otherwise rules run in declared order; on an empty
    /// value only `required` runs. The first synchronous failure ends the
    /// check, dropping any pending verdicts collected before it.
    ///
    /// # Errors
    ///
    /// Fails if a rule is not registered or rejects its parameter. The
    /// stored result is left unchanged. The awaited verdict of a pending
    /// check fails with [`CheckError::AsyncRule`] if a rule's future does.
    #[must_use = "a pending check does nothing unless awaited"]
    pub fn check_field(&self, field: &FieldDescriptor) -> Result<FieldCheck, CheckError> {
        if !field.should_check() {
            trace!(field = %field.id, "field not relevant, skipped");
            return Ok(FieldCheck::Ready(Verdict::pass()));
        }

        let text = field.text();
        let mut pending: Vec<(String, PendingVerdict)> = Vec::new();

        for (name, param) in &field.rules {
            if text.is_empty() && name != REQUIRED {
                trace!(field = %field.id, rule = %name, "empty value, rule skipped");
                continue;
            }

            let call = RuleCall::new(
                name,
                &field.value,
                &text,
                &field.context,
                param,
                &self.registry,
                &self.config.messages,
            );
            let outcome = self.registry.invoke(&call).inspect_err(|err| {
                warn!(field = %field.id, rule = %name, error = %err, "field check aborted");
            })?;

            match outcome {
                Outcome::Ready(verdict) if !verdict.is_valid() => {
                    debug!(
                        field = %field.id,
                        rule = %name,
                        message = verdict.message(),
                        "field invalid"
                    );
                    self.settle(&field.id, &verdict);
                    return Ok(FieldCheck::Ready(verdict));
                }
                Outcome::Ready(_) => {}
                Outcome::Pending(future) => {
                    if self.config.async_policy == AsyncPolicy::Last {
                        pending.clear();
                    }
                    pending.push((name.clone(), future));
                }
            }
        }

        if pending.is_empty() {
            let verdict = Verdict::pass();
            self.settle(&field.id, &verdict);
            return Ok(FieldCheck::Ready(verdict));
        }

        debug!(field = %field.id, pending = pending.len(), "awaiting asynchronous rules");
        let guard = self.store.begin_pending(&field.id);
        let future = async move {
            let verdict = combine(guard.field(), pending).await?;
            guard.commit(&verdict);
            Ok::<_, CheckError>(verdict)
        };

        Ok(FieldCheck::Pending(PendingField {
            field: field.id.clone(),
            future: Box::pin(future),
        }))
    }

    /// Checks every field, in order.
    ///
    /// All fields are checked before anything is decided. If any of them
    /// failed synchronously the form is invalid at once and the first such
    /// field is reported; pending checks are dropped and those fields keep
    /// their previous result. Otherwise the pending checks are awaited
    /// together.
    ///
    /// # Errors
    ///
    /// Fails with the first configuration error of any field. Fields checked
    /// before the failing one keep the results they just recorded; pending
    /// checks started for them are dropped.
    #[must_use = "a pending check does nothing unless awaited"]
    pub fn check_form(&self, fields: &[FieldDescriptor]) -> Result<FormCheck, CheckError> {
        debug!(namespace = self.store.namespace(), fields = fields.len(), "checking form");
        let checks = fields
            .iter()
            .map(|field| self.check_field(field).map(|check| (field.id.as_str(), check)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut pending = Vec::new();
        for (id, check) in checks {
            match check {
                FieldCheck::Ready(verdict) if !verdict.is_valid() => {
                    debug!(field = id, "form invalid");
                    return Ok(FormCheck::Invalid {
                        field: id.to_string(),
                    });
                }
                FieldCheck::Ready(_) => {}
                FieldCheck::Pending(field) => pending.push(field),
            }
        }

        if pending.is_empty() {
            return Ok(FormCheck::Valid);
        }

        let policy = self.config.async_policy;
        let fields = pending.iter().map(|field| field.field.clone()).collect();
        let future = async move {
            let results = join_all(pending.into_iter().map(IntoFuture::into_future)).await;
            let last = results.len().saturating_sub(1);
            let mut valid = true;
            for (index, result) in results.into_iter().enumerate() {
                let verdict = result?;
                if policy == AsyncPolicy::All || index == last {
                    valid &= verdict.is_valid();
                }
            }
            Ok::<_, CheckError>(valid)
        };

        Ok(FormCheck::Pending(PendingForm {
            fields,
            future: Box::pin(future),
        }))
    }

    fn settle(&self, field: &str, verdict: &Verdict) {
        let ticket = self.store.begin(field, false);
        self.store.commit(&ticket, verdict);
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

/// Awaits a field's pending verdicts together. A rule error wins over any
/// verdict; otherwise the first failure in declared order does.
async fn combine(
    field: &str,
    pending: Vec<(String, PendingVerdict)>,
) -> Result<Verdict, CheckError> {
    let (rules, futures): (Vec<_>, Vec<_>) = pending.into_iter().unzip();
    let results = join_all(futures).await;

    let mut verdicts = Vec::with_capacity(results.len());
    for (rule, result) in rules.into_iter().zip(results) {
        let verdict = result.map_err(|source| {
            warn!(field, rule = %rule, error = %source, "asynchronous rule failed");
            CheckError::AsyncRule {
                field: field.to_string(),
                rule,
                source,
            }
        })?;
        verdicts.push(verdict);
    }

    Ok(verdicts
        .into_iter()
        .find(|verdict| !verdict.is_valid())
        .unwrap_or_default())
}

// ============================================================================
// FIELD CHECK
// ============================================================================

/// Result of checking one field.
///
/// Awaiting a `FieldCheck` yields its verdict, whether it was ready or not.
#[must_use = "a pending check does nothing unless awaited"]
pub enum FieldCheck {
    Ready(Verdict),
    Pending(PendingField),
}

impl FieldCheck {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// The verdict, if it was decided synchronously.
    pub fn ready(self) -> Option<Verdict> {
        match self {
            Self::Ready(verdict) => Some(verdict),
            Self::Pending(_) => None,
        }
    }

    /// Waits for the verdict.
    pub async fn resolve(self) -> Result<Verdict, CheckError> {
        self.await
    }
}

impl IntoFuture for FieldCheck {
    type Output = Result<Verdict, CheckError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Ready(verdict) => Box::pin(future::ready(Ok(verdict))),
            Self::Pending(field) => field.future,
        }
    }
}

impl fmt::Debug for FieldCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(verdict) => f.debug_tuple("Ready").field(verdict).finish(),
            Self::Pending(field) => f.debug_tuple("Pending").field(field).finish(),
        }
    }
}

/// A field check waiting on asynchronous rules.
///
/// The verdict is written to the store when the check resolves. Dropping it
/// unresolved leaves the previous result in place.
#[must_use = "a pending check does nothing unless awaited"]
pub struct PendingField {
    field: String,
    future: BoxFuture<'static, Result<Verdict, CheckError>>,
}

impl PendingField {
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl IntoFuture for PendingField {
    type Output = Result<Verdict, CheckError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl fmt::Debug for PendingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingField")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// FORM CHECK
// ============================================================================

/// Result of checking a form.
#[must_use = "a pending check does nothing unless awaited"]
pub enum FormCheck {
    Valid,
    /// A field failed synchronously. It is the one to bring into view.
    Invalid { field: String },
    Pending(PendingForm),
}

impl FormCheck {
    /// `Some` when decided synchronously.
    pub fn is_valid(&self) -> Option<bool> {
        match self {
            Self::Valid => Some(true),
            Self::Invalid { .. } => Some(false),
            Self::Pending(_) => None,
        }
    }

    /// The first field that failed synchronously.
    pub fn first_invalid(&self) -> Option<&str> {
        match self {
            Self::Invalid { field } => Some(field.as_str()),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Waits for the form's validity.
    pub async fn resolve(self) -> Result<bool, CheckError> {
        self.await
    }
}

impl IntoFuture for FormCheck {
    type Output = Result<bool, CheckError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Valid => Box::pin(future::ready(Ok(true))),
            Self::Invalid { .. } => Box::pin(future::ready(Ok(false))),
            Self::Pending(form) => form.future,
        }
    }
}

impl fmt::Debug for FormCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("Valid"),
            Self::Invalid { field } => f.debug_struct("Invalid").field("field", field).finish(),
            Self::Pending(form) => f.debug_tuple("Pending").field(form).finish(),
        }
    }
}

/// A form check waiting on asynchronous rules.
#[must_use = "a pending check does nothing unless awaited"]
pub struct PendingForm {
    fields: Vec<String>,
    future: BoxFuture<'static, Result<bool, CheckError>>,
}

impl PendingForm {
    /// Fields still being checked, in form order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl IntoFuture for PendingForm {
    type Output = Result<bool, CheckError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl fmt::Debug for PendingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingForm")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
