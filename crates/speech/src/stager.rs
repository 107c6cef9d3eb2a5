//! Local staging of uploaded clips before probing and archival.

use std::{
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::SpeechResult;

/// Process-wide upload counter; keeps names distinct within one millisecond.
static STAGE_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// An uploaded clip written to the staging directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedAudio {
    pub path: PathBuf,
    /// Unique name used both on disk and as the archive key suffix.
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct AudioStager {
    dir: PathBuf,
}

impl AudioStager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn stage(&self, original_name: &str, bytes: &[u8]) -> SpeechResult<StagedAudio> {
        tokio::fs::create_dir_all(&self.dir).await?;

        loop {
            let sequence = STAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
            let file_name = staged_name(original_name, Utc::now().timestamp_millis(), sequence);
            let path = self.dir.join(&file_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                // Left over from an earlier process run.
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };
            file.write_all(bytes).await?;
            file.flush().await?;
            debug!("Staged {} bytes at {}", bytes.len(), path.display());

            return Ok(StagedAudio { path, file_name });
        }
    }

    /// Remove a staged clip. Failures are only logged.
    pub async fn discard(&self, staged: &StagedAudio) {
        if let Err(e) = tokio::fs::remove_file(&staged.path).await {
            warn!("Failed to remove staged audio {}: {}", staged.path.display(), e);
        }
    }
}

/// `<stem>-<millis>-<sequence>.<ext>`, keeping only the final path component
/// of the client-supplied name.
pub fn staged_name(original_name: &str, millis: i64, sequence: u64) -> String {
    let original = Path::new(original_name);
    let stem = original
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("audio");

    match original.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{}-{}-{}.{}", stem, millis, sequence, ext),
        _ => format!("{}-{}-{}", stem, millis, sequence),
    }
}
