use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Moves `source` into `dest_dir`, creating the directory chain as needed.
///
/// Refuses to overwrite an existing file so the source stays where it is.
/// Falls back to copy and delete when a plain rename is not possible, e.g.
/// across file systems.
pub fn relocate(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .ok_or_else(|| anyhow!("Not a file path: {}", source.display()))?;

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

    let target = dest_dir.join(file_name);
    if target.exists() {
        return Err(anyhow!("Destination already exists: {}", target.display()));
    }

    if fs::rename(source, &target).is_err() {
        copy_then_remove(source, &target, |path| fs::remove_file(path))?;
    }

    Ok(target)
}

/// Copies `source` to `target`, then deletes `source` with `remove`.
///
/// When the source cannot be deleted the copy is removed again, so a later run
/// does not find a stale file at the target.
fn copy_then_remove(
    source: &Path,
    target: &Path,
    remove: impl FnOnce(&Path) -> io::Result<()>,
) -> Result<()> {
    fs::copy(source, target).with_context(|| {
        format!("Failed to copy {} to {}", source.display(), target.display())
    })?;

    if let Err(e) = remove(source) {
        let _ = fs::remove_file(target);
        return Err(e).with_context(|| format!("Failed to remove {}", source.display()));
    }
    Ok(())
}
