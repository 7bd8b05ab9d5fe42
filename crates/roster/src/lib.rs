//! In-memory person roster: a validated record store and the list
//! controller that drives the visible row set and status line.

pub mod controller;
pub mod seed;
pub mod store;

pub use controller::{Intent, ListController, Mode, RowView, ViewState};
pub use store::RecordStore;
