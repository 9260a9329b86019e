//! OS-native file dialog

use anyhow::Result;
use std::path::PathBuf;

/// Ask the user for a file. `None` means the dialog was cancelled.
#[cfg(feature = "picker")]
pub fn pick_file() -> Result<Option<PathBuf>> {
    tracing::debug!("Opening file dialog");
    Ok(rfd::FileDialog::new()
        .set_title("Select a file to measure")
        .pick_file())
}

/// Ask the user for a file. `None` means the dialog was cancelled.
#[cfg(not(feature = "picker"))]
pub fn pick_file() -> Result<Option<PathBuf>> {
    anyhow::bail!(
        "this build has no file picker support; pass a path or rebuild with `--features picker`"
    )
}
