//! Numeric rules.
//!
//! Bounds come from the field's declared `min`/`max`, not from a rule
//! parameter: they describe the input's range whichever type rule is active.

use crate::error::CheckError;
use crate::rules::{NUMBER_TYPE, Rule, RuleCall};
use crate::verdict::{Outcome, Verdict};

/// `numberType`: numeric and within the declared bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberType;

impl Rule for NumberType {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let messages = call.messages();
        let Some(number) = parse_number(call.text()) else {
            return Ok(Outcome::fail(messages.number.clone()));
        };

        let context = call.context();
        let (min, max) = (context.lower_bound(), context.upper_bound());
        let verdict = if number < min {
            Verdict::fail(messages.min_value(min))
        } else if number > max {
            Verdict::fail(messages.max_value(max))
        } else {
            Verdict::pass()
        };
        Ok(verdict.into())
    }
}

/// `integerType`: all digits, then whatever the registered `numberType` says
/// about the bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerType;

impl Rule for IntegerType {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        if !call.text().bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Outcome::fail(call.messages().integer.clone()));
        }
        call.delegate(NUMBER_TYPE)
    }
}

/// Decimal or exponent notation, plus a spelled-out `Infinity`. The
/// `inf`/`nan` words `f64::from_str` also takes are not numbers here.
fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    if unsigned == "Infinity" {
        let sign = if text.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse::<f64>().ok()
}
