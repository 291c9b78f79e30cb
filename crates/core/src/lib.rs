//! Pure validation machinery for the rentora data contracts.
//!
//! Shared scalar types, the structured validation-error model, and the
//! declarative shape/rule engine the entity contract modules are built
//! from. This crate performs no I/O and holds no state; every check is a
//! pure function over plain JSON data, safe to call from any number of
//! threads.

pub mod error;
pub mod schema;
pub mod types;
