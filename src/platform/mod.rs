// ReportBar - platform/mod.rs
//
// Platform abstraction layer: config directories and config.toml.
// Dependencies: standard library, directories crate, core value types.
// Must NOT depend on: app, ui.

pub mod config;
