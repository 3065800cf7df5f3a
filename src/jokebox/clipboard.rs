//! Copy and share capabilities.
//!
//! The core only talks to the [`Clipboard`] trait. [`SystemClipboard`] pipes
//! text into the platform clipboard tool. Terminals have no share sheet, so
//! its `share_text` always reports [`JokeboxError::ShareUnavailable`] and
//! [`share_or_copy`] falls back to copying.

use crate::error::{JokeboxError, Result};
use std::io::Write;
use std::process::{Command, Stdio};

pub trait Clipboard: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<()>;

    fn share_text(&self, _text: &str) -> Result<()> {
        Err(JokeboxError::ShareUnavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
}

/// Share `text`, or copy it when sharing is not possible.
///
/// Only a failed copy is reported as an error.
pub fn share_or_copy(clipboard: &dyn Clipboard, text: &str) -> Result<ShareOutcome> {
    match clipboard.share_text(text) {
        Ok(()) => Ok(ShareOutcome::Shared),
        Err(e) => {
            log::debug!("Share failed ({}), copying instead", e);
            clipboard.copy_text(text)?;
            Ok(ShareOutcome::Copied)
        }
    }
}

/// The platform clipboard.
/// - macOS: pbcopy
/// - Linux: wl-copy, then xclip, then xsel
/// - Windows: clip.exe
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        copy_linux(text)
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(JokeboxError::Clipboard(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[cfg(target_os = "linux")]
fn copy_linux(text: &str) -> Result<()> {
    let candidates: [(&str, &[&str]); 3] = [
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ];

    let mut last_error = None;
    for (program, args) in candidates {
        match pipe_to(program, args, text) {
            Ok(()) => return Ok(()),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        JokeboxError::Clipboard("Install wl-copy, xclip or xsel.".to_string())
    }))
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| JokeboxError::Clipboard(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| JokeboxError::Clipboard(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| JokeboxError::Clipboard(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(JokeboxError::Clipboard(format!("{} exited with error", program)))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records what was copied or shared; can be told to fail.
    #[derive(Default)]
    pub struct RecordingClipboard {
        pub copied: Mutex<Vec<String>>,
        pub shared: Mutex<Vec<String>>,
        pub can_share: bool,
        pub copy_fails: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn copy_text(&self, text: &str) -> Result<()> {
            if self.copy_fails {
                return Err(JokeboxError::Clipboard("copy failed".to_string()));
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn share_text(&self, text: &str) -> Result<()> {
            if !self.can_share {
                return Err(JokeboxError::ShareUnavailable);
            }
            self.shared.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }
}
