//! Resume builder support: the form schema, mapping of structuring-webhook
//! output into it, and the ATS plain-text view.

pub mod ats;
pub mod mapping;
pub mod models;

pub use ats::render_ats_text;
pub use mapping::map_structured_resume;
pub use models::ResumeData;
