//! Shared domain primitives for the pizza stack sanity checker.
//!
//! This crate owns identifier resolution rules, Terraform output parsing,
//! and check report aggregation. It intentionally excludes AWS SDK, HTTP,
//! and subprocess concerns, which live in `pizza_stack_check` and
//! `pizza_stack_lambda`.

pub mod identifiers;
pub mod report;
pub mod terraform;
