use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Default location of the per-label reference folders.
pub const DEFAULT_REFERENCE_ROOT: &str = "reference_images/fruits";

/// First image (by file name) inside `root/label`, if any.
///
/// A missing folder or an unreadable entry is not an error; the gallery
/// simply leaves that slot empty.
pub fn first_reference_image(root: impl AsRef<Path>, label: &str) -> Option<PathBuf> {
    let folder = root.as_ref().join(label);
    if !folder.is_dir() {
        return None;
    }

    let walker = WalkDir::new(&folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("walkdir error: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_supported_image(path) {
            return Some(path.to_path_buf());
        }
    }
    None
}

pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            matches!(ext.as_str(), "jpg" | "jpeg" | "png")
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn missing_folder_yields_none() -> Result<()> {
        let dir = tempdir()?;
        assert!(first_reference_image(dir.path(), "RedApple_2").is_none());
        Ok(())
    }

    #[test]
    fn skips_non_images_and_picks_first_by_name() -> Result<()> {
        let dir = tempdir()?;
        let folder = dir.path().join("YellowBanana_1");
        fs::create_dir(&folder)?;
        File::create(folder.join("a-notes.txt"))?;
        File::create(folder.join("c.png"))?;
        File::create(folder.join("b.JPEG"))?;

        let found = first_reference_image(dir.path(), "YellowBanana_1");
        assert_eq!(found, Some(folder.join("b.JPEG")));
        Ok(())
    }

    #[test]
    fn does_not_descend_into_subfolders() -> Result<()> {
        let dir = tempdir()?;
        let folder = dir.path().join("GreenOrange_1");
        let nested = folder.join("aaa");
        fs::create_dir_all(&nested)?;
        File::create(nested.join("inner.jpg"))?;

        assert!(first_reference_image(dir.path(), "GreenOrange_1").is_none());
        Ok(())
    }

    #[test]
    fn folder_without_images_yields_none() -> Result<()> {
        let dir = tempdir()?;
        let folder = dir.path().join("RottenApple_3");
        fs::create_dir(&folder)?;
        File::create(folder.join("readme.md"))?;
        assert!(first_reference_image(dir.path(), "RottenApple_3").is_none());
        Ok(())
    }

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_image(Path::new("x.JPG")));
        assert!(is_supported_image(Path::new("x.png")));
        assert!(!is_supported_image(Path::new("x.gif")));
        assert!(!is_supported_image(Path::new("jpg")));
    }
}
