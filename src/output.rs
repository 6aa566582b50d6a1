/*!
 * Output sinks for rendered text
 */

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::clipboard::copy_to_clipboard;
use crate::error::Result;

/// Destination of the final document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sink {
    /// System clipboard
    Clipboard,
    /// Standard output
    Stdout,
    /// A file, created or truncated
    File(PathBuf),
}

impl Sink {
    /// Hand the text over to the sink
    pub fn deliver(&self, text: &str) -> Result<()> {
        match self {
            Self::Clipboard => copy_to_clipboard(text)?,
            Self::Stdout => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
            Self::File(path) => fs::write(path, text)?,
        }
        Ok(())
    }
}

impl fmt::Display for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clipboard => write!(f, "clipboard"),
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
