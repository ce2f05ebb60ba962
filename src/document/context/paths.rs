//! Path helpers shared by contexts and widgets.

/// Strip an optional `drive:` prefix, returning the path within the drive.
/// Only a colon in the first `/`-separated segment names a drive.
pub fn local_path(path: &str) -> &str {
    let first_segment = path.split('/').next().unwrap_or(path);
    match first_segment.split_once(':') {
        Some((drive, _)) => &path[drive.len() + 1..],
        None => path,
    }
}

/// Final `/`-separated segment of a path
pub fn basename(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Lower-cased extension including the leading dot, or empty
pub fn extension(path: &str) -> String {
    let name = basename(path);
    match name.rfind('.') {
        Some(index) if index > 0 => name[index..].to_lowercase(),
        _ => String::new(),
    }
}
