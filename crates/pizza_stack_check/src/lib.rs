//! Sanity checks for the locally emulated pizza stack.
//!
//! This crate owns runtime integration details: running Terraform to
//! discover stack identifiers, and probing the LocalStack edge with HTTP
//! and AWS SDK calls. Pure parsing and report primitives live in
//! `pizza_stack_core`.

pub mod locator;
pub mod probes;
pub mod terraform_cli;
