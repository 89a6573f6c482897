//! Length rules.
//!
//! Length is measured in Unicode scalar values of the trimmed text.

use crate::error::CheckError;
use crate::rules::{Rule, RuleCall};
use crate::verdict::{Outcome, Verdict};

/// `minlength`: at least `n` characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinLength;

impl Rule for MinLength {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let min = call.param().as_count(call.name())?;
        let verdict = Verdict::check(call.text().chars().count() >= min, || {
            call.messages().minlength(min)
        });
        Ok(verdict.into())
    }
}

/// `maxlength`: at most `n` characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxLength;

impl Rule for MaxLength {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let max = call.param().as_count(call.name())?;
        let verdict = Verdict::check(call.text().chars().count() <= max, || {
            call.messages().maxlength(max)
        });
        Ok(verdict.into())
    }
}
