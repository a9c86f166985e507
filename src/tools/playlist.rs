//! Playlist generation: scan a music folder and emit `playlist.json` for
//! the site's player.

use anyhow::Context;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Output file name, written inside the scanned folder
pub const PLAYLIST_FILE: &str = "playlist.json";

/// One player entry. The site has no tag metadata, so every track is
/// attributed to "Unknown" and titled after its file name.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub file: String,
}

/// Scan `dir` for MP3 files (extension matched case-insensitively) and
/// return their playlist entries sorted by file name, so reruns produce
/// identical output.
pub fn scan(dir: &Path) -> std::io::Result<Vec<Song>> {
    let mut songs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !name.to_lowercase().ends_with(".mp3") {
            continue;
        }

        songs.push(Song {
            title: name[..name.len() - ".mp3".len()].to_string(),
            artist: "Unknown".to_string(),
            file: name.to_string(),
        });
    }

    songs.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(songs)
}

/// Generate `<dir>/playlist.json`, overwriting any previous playlist.
/// Returns the number of songs written.
pub fn generate(dir: &Path) -> anyhow::Result<usize> {
    let songs = scan(dir)
        .with_context(|| format!("failed to scan music folder {}", dir.display()))?;

    let json = to_json(&songs).context("failed to serialize playlist")?;
    let output = dir.join(PLAYLIST_FILE);
    fs::write(&output, json)
        .with_context(|| format!("failed to write {}", output.display()))?;

    Ok(songs.len())
}

/// Four-space indentation, matching the player's existing playlist file.
fn to_json(songs: &[Song]) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(&songs, &mut serializer)?;
    Ok(buf)
}
