//! HTTP handlers.

mod analyses;
mod analyze;
mod status;

pub use analyses::get_analysis_handler;
pub use analyze::analyze_handler;
pub use status::status_handler;
