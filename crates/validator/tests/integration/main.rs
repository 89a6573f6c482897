//! Integration tests for formcheck-validator.

mod binding;
mod engine;
mod support;
