//! Asset tree access: root resolution, enumeration, and renaming.
//!
//! Unity projects keep their assets under an `Assets/` directory, so that
//! directory becomes the asset root when present; otherwise the project
//! directory itself is scanned. Hidden entries (dot-prefixed names and
//! names ending in `~`) are invisible to the engine and are skipped here
//! along with everything beneath them. `.meta` sidecar files are never
//! assets in their own right, but a rename carries the sidecar along so
//! the engine does not lose track of the object it describes.

use same_file::is_same_file;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that can occur while enumerating or renaming assets.
#[derive(Debug)]
pub enum AssetError {
    /// The asset root directory does not exist.
    AssetRootNotFound(PathBuf),
    /// The asset path has no parent directory to rename within.
    InvalidAssetPath(PathBuf),
    /// A different asset already occupies the rename target.
    TargetExists { from: PathBuf, to: PathBuf },
    /// The rename itself failed.
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// The asset was renamed but its `.meta` sidecar could not follow.
    MetaRenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssetRootNotFound(path) => {
                write!(f, "Asset root not found: {}", path.display())
            }
            Self::InvalidAssetPath(path) => {
                write!(f, "Asset path has no parent directory: {}", path.display())
            }
            Self::TargetExists { from, to } => {
                write!(
                    f,
                    "Cannot rename {}: target {} already exists",
                    from.display(),
                    to.display()
                )
            }
            Self::RenameFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to rename {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
            Self::MetaRenameFailed { from, to, source } => {
                write!(
                    f,
                    "Asset renamed, but moving sidecar {} to {} failed: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for AssetError {}

/// Result type for asset tree operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Resolves the asset root for a project directory.
///
/// Returns `<project_dir>/Assets` when that directory exists, otherwise the
/// project directory itself.
///
/// # Errors
///
/// Returns `AssetError::AssetRootNotFound` if the project directory is not
/// a directory.
pub fn resolve_asset_root(project_dir: &Path) -> AssetResult<PathBuf> {
    if !project_dir.is_dir() {
        return Err(AssetError::AssetRootNotFound(project_dir.to_path_buf()));
    }

    let assets = project_dir.join("Assets");
    if assets.is_dir() {
        return Ok(assets);
    }

    Ok(project_dir.to_path_buf())
}

/// Lists every visible asset (files and folders) under the asset root.
///
/// Hidden entries are pruned together with their subtrees, `.meta` sidecars
/// are filtered out, and entries that cannot be read are skipped rather than
/// failing the whole enumeration. Paths come back sorted, which also means a
/// folder always precedes the assets inside it.
///
/// # Errors
///
/// Returns `AssetError::AssetRootNotFound` if the root is not a directory.
pub fn list_assets(asset_root: &Path) -> AssetResult<Vec<PathBuf>> {
    if !asset_root.is_dir() {
        return Err(AssetError::AssetRootNotFound(asset_root.to_path_buf()));
    }

    let mut assets: Vec<PathBuf> = WalkDir::new(asset_root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry.path()))
        .filter_map(|entry| entry.ok())
        .filter(|entry| !is_meta_file(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    assets.sort();
    Ok(assets)
}

/// Renames an asset in place and carries its `.meta` sidecar along.
///
/// `new_name` is a bare file name; the asset stays in its parent directory.
/// An existing target blocks the rename unless it is the renamed asset
/// itself seen through a case-insensitive filesystem, which is what a
/// case-only rename looks like there.
///
/// # Errors
///
/// Returns an error if the target is occupied or either rename fails. A
/// sidecar failure is reported after the asset itself has already moved.
pub fn rename_asset(path: &Path, new_name: &str) -> AssetResult<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| AssetError::InvalidAssetPath(path.to_path_buf()))?;
    let target = parent.join(new_name);

    if target.exists() && !is_same_file(path, &target).unwrap_or(false) {
        return Err(AssetError::TargetExists {
            from: path.to_path_buf(),
            to: target,
        });
    }

    fs::rename(path, &target).map_err(|e| AssetError::RenameFailed {
        from: path.to_path_buf(),
        to: target.clone(),
        source: e,
    })?;

    let meta_from = meta_sidecar(path);
    if meta_from.is_file() {
        let meta_to = meta_sidecar(&target);
        fs::rename(&meta_from, &meta_to).map_err(|e| AssetError::MetaRenameFailed {
            from: meta_from.clone(),
            to: meta_to,
            source: e,
        })?;
    }

    Ok(target)
}

/// Hidden per engine conventions: dot-prefixed or `~`-suffixed names.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            name.starts_with('.') || name.ends_with('~')
        })
        .unwrap_or(false)
}

/// Checks for the `.meta` sidecar extension.
fn is_meta_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("meta"))
}

/// The sidecar path for an asset: the full asset name plus `.meta`, so
/// `rock.mat` pairs with `rock.mat.meta`.
fn meta_sidecar(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".meta");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_asset_root_prefers_assets_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("Assets")).expect("Failed to create Assets");

        let root = resolve_asset_root(temp_dir.path()).expect("Failed to resolve root");
        assert_eq!(root, temp_dir.path().join("Assets"));
    }

    #[test]
    fn test_resolve_asset_root_falls_back_to_project_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        let root = resolve_asset_root(temp_dir.path()).expect("Failed to resolve root");
        assert_eq!(root, temp_dir.path());
    }

    #[test]
    fn test_resolve_asset_root_missing_directory() {
        let result = resolve_asset_root(Path::new("/non/existent/project"));
        assert!(matches!(result, Err(AssetError::AssetRootNotFound(_))));
    }

    #[test]
    fn test_list_assets_returns_files_and_folders_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("Textures")).expect("Failed to create dir");
        fs::write(root.join("Textures/rock.png"), "").expect("Failed to write file");
        fs::write(root.join("boss.mat"), "").expect("Failed to write file");

        let assets = list_assets(root).expect("Failed to list assets");
        assert_eq!(
            assets,
            vec![
                root.join("Textures"),
                root.join("Textures/rock.png"),
                root.join("boss.mat"),
            ]
        );
    }

    #[test]
    fn test_list_assets_skips_hidden_and_meta() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join(".hidden.mat"), "").expect("Failed to write file");
        fs::write(root.join("backup.mat~"), "").expect("Failed to write file");
        fs::write(root.join("rock.mat"), "").expect("Failed to write file");
        fs::write(root.join("rock.mat.meta"), "").expect("Failed to write file");

        let assets = list_assets(root).expect("Failed to list assets");
        assert_eq!(assets, vec![root.join("rock.mat")]);
    }

    #[test]
    fn test_list_assets_prunes_hidden_subtrees() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join(".git")).expect("Failed to create dir");
        fs::write(root.join(".git/config.mat"), "").expect("Failed to write file");
        fs::write(root.join("visible.mat"), "").expect("Failed to write file");

        let assets = list_assets(root).expect("Failed to list assets");
        assert_eq!(assets, vec![root.join("visible.mat")]);
    }

    #[test]
    fn test_list_assets_missing_root() {
        let result = list_assets(Path::new("/non/existent/assets"));
        assert!(matches!(result, Err(AssetError::AssetRootNotFound(_))));
    }

    #[test]
    fn test_rename_asset_moves_file_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("BigRock.mat");
        fs::write(&from, "shader data").expect("Failed to write file");

        let to = rename_asset(&from, "big_rock.mat").expect("Failed to rename");

        assert_eq!(to, temp_dir.path().join("big_rock.mat"));
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).expect("Failed to read"), "shader data");
    }

    #[test]
    fn test_rename_asset_renames_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("my_textures");
        fs::create_dir(&from).expect("Failed to create dir");
        fs::write(from.join("rock.png"), "").expect("Failed to write file");

        let to = rename_asset(&from, "MyTextures").expect("Failed to rename");

        assert!(to.is_dir());
        assert!(to.join("rock.png").exists());
    }

    #[test]
    fn test_rename_asset_carries_meta_sidecar() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("BigRock.mat");
        fs::write(&from, "").expect("Failed to write file");
        fs::write(temp_dir.path().join("BigRock.mat.meta"), "guid: abc").expect("Failed to write");

        rename_asset(&from, "big_rock.mat").expect("Failed to rename");

        let meta = temp_dir.path().join("big_rock.mat.meta");
        assert!(meta.exists());
        assert!(!temp_dir.path().join("BigRock.mat.meta").exists());
        assert_eq!(fs::read_to_string(&meta).expect("Failed to read"), "guid: abc");
    }

    #[test]
    fn test_rename_asset_blocked_by_existing_target() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("BigRock.mat");
        fs::write(&from, "new").expect("Failed to write file");
        fs::write(temp_dir.path().join("big_rock.mat"), "old").expect("Failed to write file");

        let result = rename_asset(&from, "big_rock.mat");

        assert!(matches!(result, Err(AssetError::TargetExists { .. })));
        // Neither side was touched.
        assert!(from.exists());
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("big_rock.mat")).expect("Failed to read"),
            "old"
        );
    }

    #[test]
    fn test_rename_asset_without_sidecar() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let from = temp_dir.path().join("rock.mat");
        fs::write(&from, "").expect("Failed to write file");

        let to = rename_asset(&from, "Rock.mat").expect("Failed to rename");
        assert!(to.exists() || from.exists()); // case-insensitive filesystems collapse these
        assert!(!temp_dir.path().join("Rock.mat.meta").exists());
    }
}
