use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub media_dir: PathBuf,
    pub max_image_bytes: u64,
    pub max_video_bytes: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://kinoteka.db?mode=rwc".to_string());

        let media_dir =
            PathBuf::from(std::env::var("MEDIA_DIR").unwrap_or_else(|_| "media".to_string()));

        let max_image_mb: u64 =
            std::env::var("MAX_IMAGE_MB").ok().and_then(|s| s.parse().ok()).unwrap_or(5);

        let max_video_mb: u64 =
            std::env::var("MAX_VIDEO_MB").ok().and_then(|s| s.parse().ok()).unwrap_or(100);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            media_dir,
            max_image_bytes: max_image_mb * 1024 * 1024,
            max_video_bytes: max_video_mb * 1024 * 1024,
        })
    }
}
