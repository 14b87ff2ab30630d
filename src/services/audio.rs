//! Generated audio clips on disk

use crate::model::AudioClip;
use anyhow::{bail, Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension for an audio content type
pub fn extension_for(content_type: Option<&str>) -> &'static str {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();

    match mime.as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/ogg" => "ogg",
        "audio/webm" => "webm",
        "audio/flac" => "flac",
        "audio/aac" => "aac",
        _ => "mp3",
    }
}

/// Write `clip` under `dir`, returning the new file's path
///
/// Files are named `voice-<voice>-<timestamp>.<ext>`.
pub fn save_clip(dir: &Path, voice: &str, clip: &AudioClip) -> Result<PathBuf> {
    if clip.bytes.is_empty() {
        bail!("The server returned an empty audio file");
    }

    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let voice: String = voice
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    let file_name = format!(
        "voice-{}-{}.{}",
        voice,
        Local::now().format("%Y%m%d-%H%M%S"),
        extension_for(clip.content_type.as_deref())
    );
    let path = dir.join(file_name);

    fs::write(&path, &clip.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
