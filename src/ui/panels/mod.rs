// ReportBar - ui/panels/mod.rs

pub mod about;
pub mod add_filter;
pub mod detail;
pub mod filter_bar;
pub mod requests;
pub mod warnings;
