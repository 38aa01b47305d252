//! Separating the piped log stream from keyboard input.
//!
//! When logs are piped in, file descriptor 0 is the pipe, but crossterm reads
//! keys from stdin as well. The pipe is duplicated for the ingestion thread and
//! stdin is then reopened on the controlling terminal. This must happen before
//! raw mode is enabled.

use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::Path;

/// Open the log stream: `path` if given (with `-` meaning stdin), otherwise
/// the piped standard input.
pub fn open_input(path: Option<&Path>) -> Result<File> {
    match path {
        Some(path) if path != Path::new("-") => {
            tracing::info!("Reading logs from {}", path.display());
            File::open(path).with_context(|| format!("Failed to open input {}", path.display()))
        }
        _ => take_piped_stdin(),
    }
}

/// Whether stdin is a pipe or redirect rather than a terminal
pub fn stdin_has_data() -> bool {
    use std::io::IsTerminal;
    !io::stdin().is_terminal()
}

/// Duplicate the piped stdin and point fd 0 back at the terminal.
#[cfg(unix)]
pub fn take_piped_stdin() -> Result<File> {
    use std::os::unix::io::{AsRawFd, FromRawFd};

    if !stdin_has_data() {
        anyhow::bail!(io::Error::new(
            io::ErrorKind::InvalidInput,
            "No data piped to stdin (pipe logs in or pass an input path)",
        ));
    }

    let stdin_fd = io::stdin().as_raw_fd();
    let pipe_fd = unsafe { libc::dup(stdin_fd) };
    if pipe_fd == -1 {
        anyhow::bail!("Failed to dup stdin: {}", io::Error::last_os_error());
    }
    // SAFETY: pipe_fd is a freshly duplicated descriptor owned by nobody else
    let pipe = unsafe { File::from_raw_fd(pipe_fd) };

    reopen_stdin_from(Path::new("/dev/tty"))?;
    tracing::info!("Reopened stdin from /dev/tty for terminal input");

    Ok(pipe)
}

/// Point fd 0 at the terminal device at `path`. Nothing changes if it cannot be opened.
#[cfg(unix)]
fn reopen_stdin_from(path: &Path) -> Result<()> {
    use std::os::unix::io::AsRawFd;

    let tty = File::open(path)
        .with_context(|| format!("Failed to reopen stdin from {}", path.display()))?;

    // SAFETY: dup2 is safe to call with valid file descriptors
    let result = unsafe { libc::dup2(tty.as_raw_fd(), libc::STDIN_FILENO) };
    if result == -1 {
        anyhow::bail!(io::Error::last_os_error());
    }

    Ok(())
}

// TODO(windows): duplicate the pipe handle and reopen CONIN$ as stdin
#[cfg(not(unix))]
pub fn take_piped_stdin() -> Result<File> {
    anyhow::bail!(io::Error::new(
        io::ErrorKind::Unsupported,
        "Reading logs from stdin is not yet supported on this platform; pass an input path",
    ))
}
