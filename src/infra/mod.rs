//! File system support: org file I/O and filename slugs.

mod fs;
mod slug;

pub use fs::{FsError, append_line, is_note_file, read_org_text, scan_org_files, write_text};
pub use slug::slugify;
