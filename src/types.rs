/*!
 * Core types and data structures for dirclip
 */

use std::path::PathBuf;

/// Outcome of reading one selected file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// Full text of the file
    Text(String),
    /// The file could not be read; holds the error message
    Unreadable(String),
    /// The file exceeds the size limit and its content is left out
    Omitted {
        /// Configured limit in bytes
        limit: u64,
    },
}

/// Represents a selected file
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// What will be inlined for this file
    pub content: FileContent,
}

/// Represents a directory in the file system
#[derive(Debug, Clone)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Selected files, sorted by name
    pub files: Vec<FileNode>,
    /// Subdirectories that were not skipped, sorted by name
    pub directories: Vec<DirectoryNode>,
}

impl DirectoryNode {
    /// Count files in this directory and all descendants
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .directories
                .iter()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }
}
