//! Slug generation for note filenames.

/// Converts a title to a filesystem-friendly slug.
///
/// - Converts to lowercase
/// - Replaces spaces with hyphens
/// - Keeps only alphanumeric characters, hyphens, and underscores
/// - Collapses consecutive hyphens
/// - Trims leading/trailing hyphens
/// - Truncates to 50 characters
/// - Returns "untitled" for empty results
///
/// # Examples
///
/// ```
/// use loam::infra::slugify;
///
/// assert_eq!(slugify("Graph Databases"), "graph-databases");
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    const MAX_LENGTH: usize = 50;

    let lower = title.to_lowercase();

    let mut result = String::new();
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else if c == ' ' || c == '-' {
            result.push('-');
        }
        // Skip all other characters
    }

    let mut collapsed = String::new();
    let mut prev_was_hyphen = false;
    for c in result.chars() {
        if c == '-' {
            if !prev_was_hyphen {
                collapsed.push(c);
            }
            prev_was_hyphen = true;
        } else {
            collapsed.push(c);
            prev_was_hyphen = false;
        }
    }

    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        return "untitled".to_string();
    }

    let truncated: String = trimmed.chars().take(MAX_LENGTH).collect();
    truncated.trim_matches('-').to_string()
}
