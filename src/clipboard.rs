/*!
 * Clipboard support for dirclip
 *
 * Copies text by piping it into whichever clipboard command the system
 * provides.
 */

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Operating environment, as far as clipboard selection cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Wsl,
    Linux,
    Android,
    Unknown,
}

/// A command-line clipboard tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipboardTool {
    /// Executable name
    pub command: &'static str,
    /// Arguments that make it read the clipboard text from stdin
    pub args: &'static [&'static str],
}

const TMUX: ClipboardTool = ClipboardTool {
    command: "tmux",
    args: &["load-buffer", "-w", "-"],
};
const WL_COPY: ClipboardTool = ClipboardTool {
    command: "wl-copy",
    args: &[],
};
const XSEL: ClipboardTool = ClipboardTool {
    command: "xsel",
    args: &["-b", "-i"],
};
const XCLIP: ClipboardTool = ClipboardTool {
    command: "xclip",
    args: &["-selection", "clipboard", "-in"],
};
const PBCOPY: ClipboardTool = ClipboardTool {
    command: "pbcopy",
    args: &[],
};
const CLIP_EXE: ClipboardTool = ClipboardTool {
    command: "clip.exe",
    args: &[],
};
const TERMUX: ClipboardTool = ClipboardTool {
    command: "termux-clipboard-set",
    args: &[],
};

impl ClipboardTool {
    /// Pipe `text` into the tool and wait for it to exit
    pub fn copy(&self, text: &str) -> Result<()> {
        let mut child = Command::new(self.command)
            .args(self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| {
                ClipboardError::CommandFailed(format!("Failed to spawn {}: {}", self.command, e))
            })?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                ClipboardError::CommandFailed(format!("Failed to open stdin for {}", self.command))
            })?;
            stdin.write_all(text.as_bytes())?;
        }
        // Close stdin so the tool sees end of input
        drop(child.stdin.take());

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with status: {}",
                self.command, status
            )))
        }
    }
}

/// Copy text to the system clipboard
///
/// Tools are tried in order of preference until one succeeds. The error of
/// the last failing tool is returned if none does.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let tools = candidate_tools(detect_platform(), in_tmux(), command_exists);

    let mut last_error = None;
    for tool in tools {
        log::debug!("Copying to clipboard with {}", tool.command);
        match tool.copy(text) {
            Ok(()) => return Ok(()),
            Err(e) => {
                log::warn!("{} failed: {}", tool.command, e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or(ClipboardError::NoClipboardFound))
}

/// Check if a command exists on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(command).is_file()))
        .unwrap_or(false)
}

/// Clipboard tools to try, most preferred first
///
/// `exists` decides whether a command is installed; it is a parameter so the
/// selection can be checked without touching the real PATH.
pub fn candidate_tools(
    platform: Platform,
    in_tmux: bool,
    exists: impl Fn(&str) -> bool,
) -> Vec<ClipboardTool> {
    let mut preferred = Vec::new();
    if in_tmux {
        preferred.push(TMUX);
    }

    match platform {
        Platform::MacOS => preferred.push(PBCOPY),
        Platform::Windows | Platform::Wsl => preferred.push(CLIP_EXE),
        Platform::Linux => preferred.extend([WL_COPY, XSEL, XCLIP]),
        Platform::Android => preferred.push(TERMUX),
        Platform::Unknown => {}
    }

    preferred
        .into_iter()
        .filter(|tool| exists(tool.command))
        .collect()
}

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Determine the platform (cached)
pub fn detect_platform() -> Platform {
    *PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "linux") {
            if env::var_os("WSL_DISTRO_NAME").is_some() {
                Platform::Wsl
            } else {
                Platform::Linux
            }
        } else {
            Platform::Unknown
        }
    })
}

/// Inside a tmux session
fn in_tmux() -> bool {
    env::var_os("TMUX").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_detect_platform_is_cached() {
        assert_eq!(detect_platform(), detect_platform());
    }

    #[test]
    fn test_linux_tool_order() {
        let tools = candidate_tools(Platform::Linux, false, |_| true);
        let names: Vec<_> = tools.iter().map(|t| t.command).collect();
        assert_eq!(names, vec!["wl-copy", "xsel", "xclip"]);
    }

    #[test]
    fn test_tmux_preferred_when_inside_session() {
        let tools = candidate_tools(Platform::MacOS, true, |_| true);
        assert_eq!(tools, vec![TMUX, PBCOPY]);
    }

    #[test]
    fn test_missing_tools_are_filtered() {
        let tools = candidate_tools(Platform::Linux, false, |cmd| cmd == "xclip");
        assert_eq!(tools, vec![XCLIP]);

        assert!(candidate_tools(Platform::Unknown, false, |_| true).is_empty());
    }

    #[test]
    #[ignore] // Requires a running tmux session
    fn test_tmux_clipboard() {
        if !in_tmux() {
            return;
        }

        let text = "Test text for tmux clipboard";
        TMUX.copy(text).expect("Failed to copy to tmux clipboard");

        let output = Command::new("tmux")
            .args(["show-buffer"])
            .output()
            .expect("Failed to execute tmux show-buffer");
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), text);
    }
}
