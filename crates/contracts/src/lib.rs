//! Entity data contracts.
//!
//! One module per domain entity. Each submodule defines:
//! - The canonical record struct plus create / update / filter input
//!   structs (serde `camelCase`, exported to TypeScript via ts-rs)
//! - The closed enumerations that entity owns
//! - Four operations over raw JSON payloads: `validate_canonical`,
//!   `validate_create`, `validate_update`, `validate_filter`
//!
//! Validation collects one violation per offending field; cross-field
//! refinements (date ordering, range pairs) run once the shape check
//! passes. All operations are pure functions over plain data.

pub mod common;

pub mod agency;
pub mod agent;
pub mod availability;
pub mod channel;
pub mod commission_rule;
pub mod communication;
pub mod compliance_record;
pub mod contract;
pub mod currency;
pub mod discount;
pub mod event;
pub mod expense;
pub mod extra_charge;
pub mod facility;
pub mod guest;
pub mod hashtag;
pub mod included_service;
pub mod increase;
pub mod language;
pub mod location;
pub mod mention;
pub mod mortgage;
pub mod offer;
pub mod payment;
pub mod payment_provider;
pub mod photo;
pub mod pricing_rule;
pub mod property;
pub mod provider;
pub mod reservation;
pub mod review;
pub mod task;
pub mod tax_record;
pub mod ticket;
