//! Domain aggregates exposed by the lead service layer.

pub mod lead;
pub mod types;
