use std::fs;
use std::path::{Path, PathBuf};

/// Map a logical dataset name to a concrete file path under `dir`.
///
/// Directory entries are sorted by name, and the first whose file name
/// contains `logical_name` as a case-insensitive substring wins. With no
/// match (or an unreadable directory) the verbatim `dir/logical_name` is
/// returned, which may point at a file that does not exist.
///
/// This function never fails; callers verify existence at the point of
/// use.
///
/// # Examples
/// ```no_run
/// use sheetcrud::locator::resolve;
/// use std::path::Path;
///
/// // "certificate" matches e.g. uploads/Certificate_List.xlsx
/// let path = resolve("certificate", Path::new("uploads"));
/// println!("resolved to {}", path.display());
/// ```
pub fn resolve(logical_name: &str, dir: &Path) -> PathBuf {
    let needle = logical_name.to_lowercase();

    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    };

    // Directory listing order is platform-dependent; sort so the "first
    // match" is deterministic.
    names.sort();

    for name in &names {
        if name.to_lowercase().contains(&needle) {
            return dir.join(name);
        }
    }

    dir.join(logical_name)
}
