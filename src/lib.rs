/*!
 * dirclip - Render a directory tree and its source files as one document
 *
 * The document lists every directory and every selected file, with each
 * file's content inlined under its marker, ready to paste elsewhere.
 */

pub mod clipboard;
pub mod config;
pub mod error;
pub mod minify;
pub mod output;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;

// Re-export main components for easier access
pub use config::{Config, OversizePolicy, Settings};
pub use error::{DirClipError, Result};
pub use minify::minify;
pub use output::Sink;
pub use report::{Reporter, RunReport};
pub use scanner::{ScanStatistics, Scanner};
pub use types::{DirectoryNode, FileContent, FileNode};
pub use writer::TextWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the tree under `root` as text.
///
/// Fails with [`DirClipError::RootNotFound`] when `root` is not a directory.
/// Minification is left to the caller.
pub fn render(root: &Path, settings: &Settings) -> Result<String> {
    let mut scanner = Scanner::new(settings.clone(), Arc::new(ProgressBar::hidden()));
    let tree = scanner.scan(root)?;
    Ok(TextWriter::new().render(&tree))
}
