//! Format rules: email, mobile phone and landline numbers.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CheckError;
use crate::rules::{Rule, RuleCall};
use crate::verdict::{Outcome, Verdict};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*@[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)+$").unwrap()
});

// 11 digits: a leading 1, then one of 3/4/5/8.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^1[3458][0-9]{9}$").unwrap());

// Optional area code, local number, optional extension: 010-12345678-123
static TEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0[0-9]{2,3}-)?([2-9][0-9]{6,7})+(-[0-9]{1,4})?$").unwrap()
});

/// `emailType`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Email;

impl Rule for Email {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let verdict = Verdict::check(EMAIL_REGEX.is_match(call.text()), || {
            call.messages().email.clone()
        });
        Ok(verdict.into())
    }
}

/// `phoneType`: mobile numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phone;

impl Rule for Phone {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let verdict = Verdict::check(PHONE_REGEX.is_match(call.text()), || {
            call.messages().phone.clone()
        });
        Ok(verdict.into())
    }
}

/// `telType`: landline numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tel;

impl Rule for Tel {
    fn check(&self, call: &RuleCall<'_>) -> Result<Outcome, CheckError> {
        let verdict = Verdict::check(TEL_REGEX.is_match(call.text()), || {
            call.messages().tel.clone()
        });
        Ok(verdict.into())
    }
}
