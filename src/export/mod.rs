pub mod bulk_text;
pub mod json;
