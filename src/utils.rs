/*!
 * Utility functions for dirclip
 */

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Extension of a file name including the leading dot, lowercased.
///
/// The extension starts at the last `.` of the name, so a dotfile such as
/// `.gitignore` is its own extension. Names without a dot, or ending in
/// one, have no extension.
pub fn file_extension(name: &str) -> Option<String> {
    let dot = name.rfind('.')?;
    if dot + 1 == name.len() {
        return None;
    }
    Some(name[dot..].to_lowercase())
}

/// Normalise a configured extension to the form returned by [`file_extension`]
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(20), "20 bytes");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("main.RS").as_deref(), Some(".rs"));
        assert_eq!(file_extension("archive.tar.gz").as_deref(), Some(".gz"));
        assert_eq!(file_extension(".gitignore").as_deref(), Some(".gitignore"));
        assert_eq!(file_extension("Makefile"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".CS"), ".cs");
        assert_eq!(normalize_extension("rs"), ".rs");
        assert_eq!(normalize_extension(" .md "), ".md");
    }
}
