/*!
 * Directory and file scanning functionality
 */

use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use walkdir::{DirEntry, WalkDir};

use crate::config::{OversizePolicy, Settings};
use crate::error::{DirClipError, Result};
use crate::types::{DirectoryNode, FileContent, FileNode};
use crate::utils::file_extension;

/// Scanner statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStatistics {
    /// Directories entered, root included
    pub directories_visited: usize,
    /// Directories left out because of their name
    pub directories_skipped: usize,
    /// Files whose content was inlined
    pub files_rendered: usize,
    /// Files that could not be read
    pub files_unreadable: usize,
    /// Files left out because of their extension
    pub files_skipped_by_extension: usize,
    /// Files above the size limit
    pub files_oversized: usize,
    /// Lines of inlined content
    pub total_lines: usize,
    /// Bytes of inlined content
    pub total_bytes: u64,
}

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner settings
    settings: Settings,
    /// Lowercased, dot-prefixed extensions to include
    extensions: HashSet<String>,
    /// Lowercased directory names to skip
    skip_directories: HashSet<String>,
    /// Size limit in bytes
    max_file_size: Option<u64>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Scanner statistics
    statistics: ScanStatistics,
    /// Canonical paths of the directories currently being scanned, root first
    ancestors: Vec<PathBuf>,
}

/// A file-like entry of a directory listing
enum FileEntry {
    /// Entry whose type could be determined
    Found(DirEntry),
    /// Entry that could not be inspected, such as a dangling symlink
    Broken { path: PathBuf, error: String },
}

impl FileEntry {
    fn path(&self) -> &Path {
        match self {
            Self::Found(entry) => entry.path(),
            Self::Broken { path, .. } => path,
        }
    }

    fn file_name(&self) -> &OsStr {
        match self {
            Self::Found(entry) => entry.file_name(),
            Self::Broken { path, .. } => path.file_name().unwrap_or(path.as_os_str()),
        }
    }
}

impl Scanner {
    /// Create a new scanner
    pub fn new(settings: Settings, progress: Arc<ProgressBar>) -> Self {
        Self {
            extensions: settings.normalized_extensions().into_iter().collect(),
            skip_directories: settings.normalized_skip_directories().into_iter().collect(),
            max_file_size: settings.max_file_size_bytes(),
            settings,
            progress,
            statistics: ScanStatistics::default(),
            ancestors: Vec::new(),
        }
    }

    /// Statistics of the last scan
    pub fn statistics(&self) -> &ScanStatistics {
        &self.statistics
    }

    /// Scan `root` and return the filtered directory tree
    pub fn scan(&mut self, root: &Path) -> Result<DirectoryNode> {
        if !root.is_dir() {
            return Err(DirClipError::RootNotFound(root.to_path_buf()));
        }
        let abs_path =
            fs::canonicalize(root).map_err(|_| DirClipError::RootNotFound(root.to_path_buf()))?;

        self.statistics = ScanStatistics::default();
        self.ancestors.clear();

        let name = abs_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| abs_path.display().to_string());

        self.scan_directory(&abs_path, &abs_path, name)
    }

    /// Check if a directory name is on the skip list
    pub fn should_skip_directory(&self, name: &str) -> bool {
        self.skip_directories.contains(&name.to_lowercase())
    }

    /// Check if a file name has an included extension
    pub fn should_include(&self, name: &str) -> bool {
        file_extension(name).is_some_and(|ext| self.extensions.contains(&ext))
    }

    /// Check if a file size is above the limit
    pub fn is_oversized(&self, size: u64) -> bool {
        self.max_file_size.is_some_and(|limit| size > limit)
    }

    /// Scan a directory and return its node representation
    fn scan_directory(&mut self, path: &Path, real_path: &Path, name: String) -> Result<DirectoryNode> {
        self.ancestors.push(real_path.to_path_buf());
        self.statistics.directories_visited += 1;

        let (dir_entries, file_entries) = self.list_directory(path)?;

        let files = file_entries
            .iter()
            .filter_map(|entry| self.process_file(entry))
            .collect();

        let mut directories = Vec::new();
        for entry in dir_entries {
            let dir_name = entry.file_name().to_string_lossy().to_string();
            if self.should_skip_directory(&dir_name) {
                log::debug!("Skipping directory {}", entry.path().display());
                self.statistics.directories_skipped += 1;
                continue;
            }

            let real = match fs::canonicalize(entry.path()) {
                Ok(real) => real,
                Err(e) => {
                    log::warn!("Cannot resolve {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            // A link back to a directory being scanned would never end
            if self.ancestors.contains(&real) {
                log::debug!(
                    "Not entering {}, it links back to {}",
                    entry.path().display(),
                    real.display()
                );
                continue;
            }

            directories.push(self.scan_directory(entry.path(), &real, dir_name)?);
        }

        self.ancestors.pop();

        Ok(DirectoryNode {
            name,
            path: path.to_path_buf(),
            files,
            directories,
        })
    }

    /// List the immediate children of `path`, sorted by name and split into
    /// directories and files
    fn list_directory(&self, path: &Path) -> Result<(Vec<DirEntry>, Vec<FileEntry>)> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for result in walker {
            match result {
                Ok(entry) if entry.file_type().is_dir() => dirs.push(entry),
                Ok(entry) if entry.file_type().is_file() => files.push(FileEntry::Found(entry)),
                Ok(entry) => log::debug!("Ignoring special file {}", entry.path().display()),
                // Depth 0 means the directory itself could not be opened
                Err(e) if e.depth() == 0 => {
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory listing failed"));
                    return Err(DirClipError::DirectoryRead {
                        path: path.to_path_buf(),
                        source,
                    });
                }
                Err(e) => match e.path() {
                    Some(entry_path) => {
                        log::warn!("Cannot inspect {}: {}", entry_path.display(), e);
                        files.push(FileEntry::Broken {
                            path: entry_path.to_path_buf(),
                            error: e.to_string(),
                        });
                    }
                    None => log::warn!("Error reading entry in {}: {}", path.display(), e),
                },
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(b.file_name()));
        Ok((dirs, files))
    }

    /// Apply the file filters and read the content of a selected file
    fn process_file(&mut self, entry: &FileEntry) -> Option<FileNode> {
        let name = entry.file_name().to_string_lossy().to_string();

        if !self.should_include(&name) {
            self.statistics.files_skipped_by_extension += 1;
            return None;
        }

        let metadata = match entry {
            FileEntry::Found(found) => found.metadata().map_err(|e| e.to_string()),
            FileEntry::Broken { error, .. } => Err(error.clone()),
        };
        let size = match metadata {
            Ok(metadata) => metadata.len(),
            Err(error) => {
                log::warn!("Cannot stat {}: {}", entry.path().display(), error);
                self.statistics.files_unreadable += 1;
                return Some(FileNode {
                    name,
                    path: entry.path().to_path_buf(),
                    size: 0,
                    content: FileContent::Unreadable(error),
                });
            }
        };

        if self.is_oversized(size) {
            self.statistics.files_oversized += 1;
            log::debug!("Oversized file {} ({} bytes)", entry.path().display(), size);
            return match (self.settings.oversized_files, self.max_file_size) {
                (OversizePolicy::MarkerOnly, Some(limit)) => Some(FileNode {
                    name,
                    path: entry.path().to_path_buf(),
                    size,
                    content: FileContent::Omitted { limit },
                }),
                _ => None,
            };
        }

        self.progress.inc(1);
        self.progress.set_message(format!("Reading {}", name));

        let content = match fs::read_to_string(entry.path()) {
            Ok(text) => {
                self.statistics.files_rendered += 1;
                self.statistics.total_lines += text.lines().count();
                self.statistics.total_bytes += text.len() as u64;
                FileContent::Text(text)
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}", entry.path().display(), e);
                self.statistics.files_unreadable += 1;
                FileContent::Unreadable(e.to_string())
            }
        };

        Some(FileNode {
            name,
            path: entry.path().to_path_buf(),
            size,
            content,
        })
    }
}
