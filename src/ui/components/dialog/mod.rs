//! Dialog components

mod base;
mod success_dialog;

pub use success_dialog::render_success_dialog;
