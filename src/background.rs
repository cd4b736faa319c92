use log::{debug, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Background image referenced by the current buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BackgroundImage {
    Found {
        path: PathBuf,
        width: usize,
        height: usize,
    },
    Missing {
        path: PathBuf,
    },
}

impl BackgroundImage {
    pub fn path(&self) -> &Path {
        match self {
            BackgroundImage::Found { path, .. } | BackgroundImage::Missing { path } => path,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            BackgroundImage::Found {
                path,
                width,
                height,
            } => format!("{} ({width}x{height})", path.display()),
            BackgroundImage::Missing { path } => format!("{} (not found)", path.display()),
        }
    }
}

/// `<dir>/<buffer>.<ext>`, or nothing for an empty buffer.
pub fn image_path(dir: &Path, buffer: &str, extension: &str) -> Option<PathBuf> {
    if buffer.is_empty() {
        return None;
    }
    Some(dir.join(format!("{buffer}.{extension}")))
}

/// Read the image header only; a missing or unreadable file is not an error.
pub fn probe(path: PathBuf) -> BackgroundImage {
    if !path.exists() {
        debug!("No background image at {}", path.display());
        return BackgroundImage::Missing { path };
    }

    match imagesize::size(&path) {
        Ok(size) => {
            debug!(
                "Background image {} size: {}x{}",
                path.display(),
                size.width,
                size.height
            );
            BackgroundImage::Found {
                path,
                width: size.width,
                height: size.height,
            }
        }
        Err(e) => {
            warn!("Failed to get image size for {}: {e}", path.display());
            BackgroundImage::Missing { path }
        }
    }
}

pub fn resolve(dir: &Path, buffer: &str, extension: &str) -> Option<BackgroundImage> {
    image_path(dir, buffer, extension).map(probe)
}
