//! Path helpers shared by the tool windows.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

/// Clean up a file URL (from drag-drop) to a regular path.
///
/// Some platforms deliver drops as `text/uri-list` payloads. Only the first
/// non-comment line is used.
pub fn clean_file_url(url: &str) -> String {
    let first_uri = url
        .lines()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or("");

    let path = if let Some(stripped) = first_uri.strip_prefix("file://") {
        percent_decode_str(stripped).decode_utf8_lossy().to_string()
    } else {
        first_uri.to_string()
    };

    path.trim().to_string()
}

/// Whether a path has a `.gif` extension, case-insensitively.
pub fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gif"))
        .unwrap_or(false)
}

/// Force a `.gif` extension onto a path, replacing whatever is there.
pub fn ensure_gif_extension(path: &Path) -> PathBuf {
    if is_gif(path) {
        path.to_path_buf()
    } else {
        path.with_extension("gif")
    }
}

/// File stem as a display string, or "output" when the path has none.
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string())
}

/// Default output path for a derived GIF: a sibling of the input with a
/// suffix appended to the stem, e.g. `clip.gif` -> `clip_cropped.gif`.
pub fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = stem_of(input);
    let name = format!("{stem}_{suffix}.gif");
    match input.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    }
}

/// Directory to start a file dialog in: the remembered input directory when
/// it still exists, otherwise the user's home, otherwise the current dir.
pub fn dialog_start_dir(last_input_dir: &str) -> PathBuf {
    if !last_input_dir.is_empty() {
        let dir = PathBuf::from(last_input_dir);
        if dir.is_dir() {
            return dir;
        }
    }
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
