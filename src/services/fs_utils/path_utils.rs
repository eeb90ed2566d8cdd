use std::path::{Component, Path, PathBuf};

/// Final path component of a client-supplied file name.
///
/// Both `/` and `\` count as separators so Windows-style uploads are handled
/// the same way on every host. `.` and `..` collapse to an empty name.
pub fn basename(name: &str) -> &str {
    let last = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match last {
        "." | ".." => "",
        other => other,
    }
}

/// Split `name` into `(stem, extension)`. A leading dot (`.jpg`) is part of the
/// stem, not an extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// Validates that the `target_path` strictly resolves _inside_ the `base_path`.
/// Rejects path traversal attempts using `..` or absolute paths aiming outside the allowed directory.
pub fn is_path_safe(base_path: &Path, target_path: &Path) -> bool {
    if target_path.is_absolute() {
        return target_path.starts_with(base_path);
    }

    let mut depth = 0;
    for component in target_path.components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            Component::Normal(_) => {
                depth += 1;
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return false,
        }
    }

    true
}

/// Join `user_path` onto `base_path`, refusing anything that would escape it.
pub fn resolve_safe_path(base_path: &Path, user_path: &str) -> std::io::Result<PathBuf> {
    let target = Path::new(user_path);
    if !is_path_safe(base_path, target) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("Path '{user_path}' escapes the archive root"),
        ));
    }

    Ok(base_path.join(target))
}

#[cfg(test)]
#[path = "tests/path_utils_tests.rs"]
mod tests;
