/*!
 * Text writer implementation for dirclip
 */

use std::fmt::Write;

use crate::types::{DirectoryNode, FileContent, FileNode};
use crate::utils::format_file_size;

/// Indentation added per tree level
pub const INDENT_UNIT: &str = "    ";

/// Length of the separator line under the title
pub const SEPARATOR_WIDTH: usize = 80;

/// Prefix of directory marker lines
pub const DIR_MARKER: &str = "[DIR] ";

/// Prefix of file marker lines
pub const FILE_MARKER: &str = "[FILE] ";

/// Text writer for directory trees
#[derive(Debug, Default)]
pub struct TextWriter;

impl TextWriter {
    /// Create a new text writer
    pub fn new() -> Self {
        Self
    }

    /// Render the tree rooted at `root`, title included
    pub fn render(&self, root: &DirectoryNode) -> String {
        let mut out = String::new();
        push_line(&mut out, &format!("Source: {}", root.path.display()));
        push_line(&mut out, &"=".repeat(SEPARATOR_WIDTH));
        self.write_directory(root, 0, &mut out);
        out
    }

    /// Write a directory marker, its files, then its subdirectories
    fn write_directory(&self, dir: &DirectoryNode, depth: usize, out: &mut String) {
        let indent = INDENT_UNIT.repeat(depth);
        push_line(out, &format!("{}{}{}/", indent, DIR_MARKER, dir.name));

        let child_indent = INDENT_UNIT.repeat(depth + 1);
        for file in &dir.files {
            self.write_file(file, &child_indent, out);
        }

        for sub in &dir.directories {
            self.write_directory(sub, depth + 1, out);
        }
    }

    /// Write a file marker followed by its content or an error note
    fn write_file(&self, file: &FileNode, indent: &str, out: &mut String) {
        push_line(out, &format!("{}{}{}", indent, FILE_MARKER, file.name));

        match &file.content {
            FileContent::Text(text) => {
                push_line(out, &format!("{}Content:", indent));
                for line in text.lines() {
                    push_line(out, &format!("{}{}", indent, line));
                }
                push_line(out, "");
            }
            FileContent::Unreadable(message) => {
                push_line(out, &format!("{}Error reading file: {}", indent, message));
            }
            FileContent::Omitted { limit } => {
                push_line(
                    out,
                    &format!(
                        "{}Content omitted: {} exceeds the {} limit",
                        indent,
                        format_file_size(file.size),
                        format_file_size(*limit)
                    ),
                );
            }
        }
    }
}

/// Append one line, right-trimmed
fn push_line(out: &mut String, line: &str) {
    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", line.trim_end());
}
