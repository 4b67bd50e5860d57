//! Flutter-facing bindings for the clinic core.

pub mod api;
