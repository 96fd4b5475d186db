// ReportBar - app/mod.rs
//
// Application layer: the filter list owner, catalogue and request log loading.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod catalog_loader;
pub mod requests;
pub mod state;
