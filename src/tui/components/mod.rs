//! Widgets shared by both tabs.

pub mod input_field;
pub mod notifications;
pub mod status_bar;
pub mod tab_bar;
