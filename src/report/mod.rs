pub mod html;
pub mod redact;
pub mod renderer;

pub use html::{decode_entities, escape_html};
pub use redact::Redactor;
pub use renderer::{campaign_file_name, CampaignPage, ReportRenderer};
