//! Filesystem primitives shared across features.

use std::path::Path;

use anyhow::Context;

/// Recursively copy `src` into `dst`, overwriting files that already exist.
///
/// `dst` is created if missing. Symlinks are followed.
pub fn copy_tree(src: &Path, dst: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory: {}", dst.display()))?;

    let entries = std::fs::read_dir(src)
        .with_context(|| format!("Failed to read directory: {}", src.display()))?;
    for entry in entries {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_tree(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }
    Ok(())
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_tree_nested() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("lib/util")).unwrap();
        std::fs::write(src.join("index.js"), "root").unwrap();
        std::fs::write(src.join("lib/util/helper.js"), "helper").unwrap();

        let dst = temp.path().join("dst");
        copy_tree(&src, &dst).unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("index.js")).unwrap(), "root");
        assert_eq!(
            std::fs::read_to_string(dst.join("lib/util/helper.js")).unwrap(),
            "helper"
        );
    }

    #[test]
    fn test_copy_tree_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("overlay");
        let dst = temp.path().join("target");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dst).unwrap();
        std::fs::write(src.join("package.json"), "new").unwrap();
        std::fs::write(dst.join("package.json"), "old").unwrap();
        std::fs::write(dst.join("keep.txt"), "keep").unwrap();

        copy_tree(&src, &dst).unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("package.json")).unwrap(), "new");
        assert_eq!(std::fs::read_to_string(dst.join("keep.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_copy_tree_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_tree(&temp.path().join("missing"), &temp.path().join("dst"));
        assert!(result.is_err());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c.txt");
        write_file(&path, b"content").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
    }
}
