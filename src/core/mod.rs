// ReportBar - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod catalog;
pub mod composer;
pub mod datepicker;
pub mod model;
pub mod query;
