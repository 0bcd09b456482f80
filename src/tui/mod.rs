//! Terminal User Interface for the stock watchlist.
//!
//! Provides a Ratatui-based TUI showing the watchlist with live prices, the
//! market summary, and price alerts. All state changes go through
//! [`event::update`] on a single task; REST work is requested by returning
//! an [`event::Action`] that [`actions::spawn_action`] carries out.

pub mod actions;
pub mod app;
pub mod components;
pub mod dispatch;
pub mod event;
pub mod format;
pub mod input;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use dispatch::{InboundHandler, dispatch};
pub use event::{Action, Event, Message, RefreshTask, update};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
