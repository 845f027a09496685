//! Markdown rendering for API and record descriptors.
//!
//! - [`api`] — method signatures and descriptions per API
//! - [`record`] — summary lines or full source blocks per record

pub mod api;
pub mod record;

pub use api::{ApiRenderOptions, render_api, render_api_section, signature};
pub use record::{
    render_record_section, render_record_summary, render_record_verbose,
};
