//! Serializers for validated run configurations.
//!
//! Two output forms are supported:
//! - **JSON** ([`json`]): canonical strict JSON, every default filled in
//! - **MARLEY** ([`marley`]): the relaxed dialect MARLEY itself reads, with
//!   bare keys and trailing commas

pub mod json;
pub mod marley;
