pub mod reader;

pub use reader::{IngestError, read_redirect_rules};
