//! Publishes review outputs to the parent directory as hard links.

use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Hard-links `src` to `dest`, replacing any existing `dest` atomically.
///
/// The link is created in a temporary directory next to `dest` and renamed
/// over it, so readers never see `dest` missing.
pub fn force_link(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", dest.display()))?;
    let staging = tempfile::Builder::new()
        .prefix(".link")
        .tempdir_in(dest_dir)
        .with_context(|| format!("Failed to create staging dir in {}", dest_dir.display()))?;

    let staged = staging.path().join("link");
    fs::hard_link(src, &staged)
        .with_context(|| format!("Failed to link {}", src.display()))?;
    fs::rename(&staged, dest)
        .with_context(|| format!("Failed to replace {}", dest.display()))?;
    Ok(())
}

/// Links every file in `dir` whose name starts with `prefix` into the parent
/// of `dir`. Returns the published paths, sorted.
pub fn publish_to_parent(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let dir = dir
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", dir.display()))?;
    let parent = dir
        .parent()
        .ok_or_else(|| anyhow!("{} has no parent directory", dir.display()))?;

    let mut sources = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("Failed to list {}", dir.display()))? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            sources.push(entry.path());
        }
    }
    sources.sort();

    let mut published = Vec::with_capacity(sources.len());
    for src in sources {
        let Some(name) = src.file_name() else {
            continue;
        };
        let dest = parent.join(name);
        force_link(&src, &dest)?;
        info!("Published {}", dest.display());
        published.push(dest);
    }
    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_force_link_replaces_existing() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dest = dir.path().join("dest.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dest, "old").unwrap();

        force_link(&src, &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        // No staging directories are left behind.
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".link"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_publish_only_matching_files() {
        let root = tempdir().unwrap();
        let work = root.path().join("work");
        fs::create_dir(&work).unwrap();
        fs::write(work.join("MAY1412A_aca_plot.txt"), "a").unwrap();
        fs::write(work.join("MAY1412A_Thermal_Load_Review_Report.txt"), "r").unwrap();
        fs::write(work.join("MAY0712A_aca_plot.txt"), "p").unwrap();
        fs::create_dir(work.join("MAY1412A_dir")).unwrap();

        let published = publish_to_parent(&work, "MAY1412A").unwrap();

        let names: Vec<String> = published
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "MAY1412A_Thermal_Load_Review_Report.txt",
                "MAY1412A_aca_plot.txt"
            ]
        );
        assert_eq!(
            fs::read_to_string(root.path().join("MAY1412A_aca_plot.txt")).unwrap(),
            "a"
        );
        assert!(!root.path().join("MAY0712A_aca_plot.txt").exists());
    }
}
