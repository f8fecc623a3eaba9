//! Lambda request handler for the pizza demo API.
//!
//! Route dispatch is pure and testable; the DynamoDB-backed toppings
//! counter lives behind a trait implemented by the runtime binary.

pub mod counter;
pub mod handlers;
