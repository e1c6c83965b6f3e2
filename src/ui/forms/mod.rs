//! Form rendering module
//!
//! - `field_renderer`: a single labelled input with its error and instruction
//! - `error_summary`: the summary landmark of the submit variant
//! - `form_page`: the whole form for the active variant
//! - `reading`: what a screen reader would say for the focused element

mod error_summary;
mod field_renderer;
mod form_page;
mod reading;

pub use form_page::draw_form;
pub use reading::screen_reader_reading;
