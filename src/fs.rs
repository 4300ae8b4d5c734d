use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists the files sitting directly in `dir` whose extension matches.
///
/// The order is the filesystem enumeration order. A missing or empty
/// directory yields an empty list rather than an error: an empty source set
/// is passed through to the compiler, which reports it in its own terms.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Err(e) => {
                log::debug!("Failed to walk dir: {}", e);
                None
            }
            Ok(entry) => {
                let path = entry.into_path();
                Some(path)
                    .filter(|path| path.is_file())
                    .filter(|path| path.extension().map_or(false, |ext| ext == extension))
            }
        })
        .collect()
}

/// Mirrors the `src` tree into `dest`, creating missing directories and
/// overwriting files already present at the destination.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(anyhow!("Directory {} does not exist", src.display()));
    }

    for entry in WalkDir::new(src) {
        let entry =
            entry.with_context(|| format!("Failed to traverse directory {}", src.display()))?;
        let relative_path = entry
            .path()
            .strip_prefix(src)
            .expect("walked path should be under its root");
        let dest_path = dest.join(relative_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path).with_context(|| {
                format!("Failed to create directory {}", dest_path.display())
            })?;
        } else {
            fs::copy(entry.path(), &dest_path).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    dest_path.display()
                )
            })?;
        }
    }

    Ok(())
}
