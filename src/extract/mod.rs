//! Extraction engine: outline walking, link scanning, file processing.

mod links;
mod outline;
mod process;

pub use links::{rewrite_title, scan_body};
pub use outline::{OutlineRecords, extract_outline};
pub use process::{FileRecords, file_name, process_file, process_text};
