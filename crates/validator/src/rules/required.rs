//! The `required` rule.

use crate::error::CheckError;
use crate::rules::{Rule, RuleCall};
use crate::verdict::{Outcome, Verdict};

/// Passes when the trimmed value is non-empty.
///
/// The failure message asks to *select* for choice inputs and to *fill in*
/// for everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

impl Rule for Required {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let messages = call.messages();
        let verdict = Verdict::check(!call.text().is_empty(), || {
            if call.context().kind().is_choice() {
                messages.required_choice.clone()
            } else {
                messages.required_text.clone()
            }
        });
        Ok(verdict.into())
    }
}
