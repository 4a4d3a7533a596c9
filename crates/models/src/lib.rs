//! Entity definitions and field validation shared by the service and
//! server crates.

pub mod association;
pub mod errors;

pub use association::{Association, AssociationDraft};
