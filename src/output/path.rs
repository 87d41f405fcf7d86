//! Output path resolution

use std::path::{Path, PathBuf};

/// Build the path an export is written to.
///
/// Priority: an explicit `path` is used verbatim; otherwise `base_path` and
/// `file_name` are joined as `base_path/file_name.extension`; otherwise the
/// result is `output.extension` in the current directory. Empty values count
/// as missing. Parent directories are not checked.
pub fn construct_path(
    path: Option<&Path>,
    base_path: Option<&Path>,
    file_name: Option<&str>,
    extension: &str,
) -> PathBuf {
    if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }

    let base_path = base_path.filter(|p| !p.as_os_str().is_empty());
    let file_name = file_name.filter(|f| !f.is_empty());
    if let (Some(base_path), Some(file_name)) = (base_path, file_name) {
        return base_path.join(format!("{file_name}.{extension}"));
    }

    PathBuf::from(format!("output.{extension}"))
}
