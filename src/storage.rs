//! File storage capability. Validates extension and size per file kind,
//! writes under the configured media dir with a generated name, and
//! returns the relative reference stored on the entity.

use std::path::PathBuf;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::random_hex,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileKind {
    Poster,
    Trailer,
    Subtitle,
    EpisodeVideo,
    Photo,
}

impl FileKind {
    fn dir(self) -> &'static str {
        match self {
            FileKind::Poster => "posters",
            FileKind::Trailer => "trailers",
            FileKind::Subtitle => "subtitles",
            FileKind::EpisodeVideo => "episodes",
            FileKind::Photo => "photos",
        }
    }

    fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Poster | FileKind::Photo => &["jpg", "jpeg", "png"],
            FileKind::Trailer | FileKind::EpisodeVideo => &["mp4", "mov"],
            FileKind::Subtitle => &["srt", "vtt"],
        }
    }

    fn is_video(self) -> bool {
        matches!(self, FileKind::Trailer | FileKind::EpisodeVideo)
    }
}

#[derive(Clone)]
pub struct Storage {
    root: PathBuf,
    max_image_bytes: u64,
    max_video_bytes: u64,
}

impl Storage {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.media_dir.clone(),
            max_image_bytes: config.max_image_bytes,
            max_video_bytes: config.max_video_bytes,
        }
    }

    /// Validates and persists an upload, returning the relative reference
    /// (`posters/ab12....jpg`) recorded on the owning entity.
    pub async fn store(&self, filename: &str, bytes: &[u8], kind: FileKind) -> AppResult<String> {
        let ext = extension_of(filename)
            .ok_or_else(|| AppError::validation("file", "filename has no extension"))?;

        if !kind.allowed_extensions().contains(&ext.as_str()) {
            return Err(AppError::validation(
                "file",
                format!(
                    "extension .{ext} not allowed, expected one of: {}",
                    kind.allowed_extensions().join(", ")
                ),
            ));
        }

        let limit =
            if kind.is_video() { self.max_video_bytes } else { self.max_image_bytes };
        if bytes.len() as u64 > limit {
            return Err(AppError::validation(
                "file",
                format!("file exceeds the {} byte limit", limit),
            ));
        }
        if bytes.is_empty() {
            return Err(AppError::validation("file", "file is empty"));
        }

        let name = format!("{}.{ext}", random_hex(16));
        let dir = self.root.join(kind.dir());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("creating media dir: {e}"))?;
        tokio::fs::write(dir.join(&name), bytes)
            .await
            .map_err(|e| anyhow::anyhow!("writing upload: {e}"))?;

        tracing::debug!(kind = ?kind, name = %name, size = bytes.len(), "stored upload");

        Ok(format!("{}/{name}", kind.dir()))
    }
}

fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
