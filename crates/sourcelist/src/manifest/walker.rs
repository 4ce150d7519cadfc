//! Recursive file enumeration for rule directories.

use super::error::{ManifestError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Walk behavior shared by every rule in a run.
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Sort entries by file name within each directory
    pub sorted: bool,
    /// Descend into symlinked directories
    pub follow_symlinks: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            sorted: true,
            follow_symlinks: false,
        }
    }
}

/// Lazily enumerate every non-directory entry under `root/dir`.
///
/// Yielded paths start with `dir` exactly as written (e.g. `content/sub/b.png`,
/// or `./src/a.c` for a rule directory of `.`) in host separator form. A missing `dir`, or one that is not a directory, yields
/// nothing. Read errors are yielded as `Err`; the caller decides whether to
/// stop.
pub fn walk(root: &Path, dir: &Path, options: WalkOptions) -> FileWalk {
    let scan_root = root.join(dir);
    if !scan_root.is_dir() {
        debug!(dir = %scan_root.display(), "Rule directory missing, nothing to scan");
        return FileWalk {
            inner: None,
            scan_root,
            dir: dir.to_path_buf(),
            follow_symlinks: options.follow_symlinks,
        };
    }

    let mut walker = WalkDir::new(&scan_root)
        .min_depth(1)
        .follow_links(options.follow_symlinks);
    if options.sorted {
        walker = walker.sort_by_file_name();
    }

    FileWalk {
        inner: Some(walker.into_iter()),
        scan_root,
        dir: dir.to_path_buf(),
        follow_symlinks: options.follow_symlinks,
    }
}

/// Iterator returned by [`walk`].
pub struct FileWalk {
    inner: Option<walkdir::IntoIter>,
    scan_root: PathBuf,
    dir: PathBuf,
    follow_symlinks: bool,
}

impl Iterator for FileWalk {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.as_mut()?;
        loop {
            let entry = match inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(ManifestError::Walk(err))),
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                continue;
            }
            // Without follow_links, a symlink to a directory is listed but
            // not descended. Skip it like any other directory.
            if file_type.is_symlink() && !self.follow_symlinks && entry.path().is_dir() {
                continue;
            }

            let path = entry.path();
            let relative = match path.strip_prefix(&self.scan_root) {
                Ok(rest) => self.dir.join(rest),
                Err(_) => path.to_path_buf(),
            };
            return Some(Ok(relative));
        }
    }
}

/// Render a walk path for the manifest: always `/`, never `\`.
pub fn to_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn collect(root: &Path, dir: &str) -> Vec<String> {
        walk(root, Path::new(dir), WalkOptions::default())
            .map(|p| to_manifest_path(&p.unwrap()))
            .collect()
    }

    #[test]
    fn walks_nested_files_relative_to_root() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "content/b.txt");
        touch(temp.path(), "content/a.txt");
        touch(temp.path(), "content/sub/deeper/c.txt");
        fs::create_dir_all(temp.path().join("content/empty")).unwrap();

        let files = collect(temp.path(), "content");
        assert_eq!(
            files,
            vec!["content/a.txt", "content/b.txt", "content/sub/deeper/c.txt"]
        );
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(collect(temp.path(), "does-not-exist").is_empty());
    }

    #[test]
    fn file_in_place_of_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "scripts");
        assert!(collect(temp.path(), "scripts").is_empty());
    }

    #[test]
    fn nested_rule_directory_keeps_full_prefix() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "assets/shaders/basic.vert");
        assert_eq!(
            collect(temp.path(), "assets/shaders"),
            vec!["assets/shaders/basic.vert"]
        );
    }

    #[test]
    fn rule_directory_is_kept_as_written() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/a.c");

        assert_eq!(collect(temp.path(), "./src"), vec!["./src/a.c"]);
        assert_eq!(collect(temp.path(), "."), vec!["./src/a.c"]);
    }

    #[test]
    fn manifest_paths_use_forward_slashes() {
        assert_eq!(to_manifest_path(Path::new("src/a.cpp")), "src/a.cpp");
        assert_eq!(to_manifest_path(Path::new(r"src\win\a.cpp")), "src/win/a.cpp");
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_need_follow() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "shared/lib.cpp");
        touch(temp.path(), "src/main.cpp");
        std::os::unix::fs::symlink(temp.path().join("shared"), temp.path().join("src/linked"))
            .unwrap();

        assert_eq!(collect(temp.path(), "src"), vec!["src/main.cpp"]);

        let followed: Vec<String> = walk(
            temp.path(),
            Path::new("src"),
            WalkOptions {
                sorted: true,
                follow_symlinks: true,
            },
        )
        .map(|p| to_manifest_path(&p.unwrap()))
        .collect();
        assert_eq!(followed, vec!["src/linked/lib.cpp", "src/main.cpp"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_are_listed() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "real.h");
        fs::create_dir_all(temp.path().join("include")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("real.h"), temp.path().join("include/alias.h"))
            .unwrap();

        assert_eq!(collect(temp.path(), "include"), vec!["include/alias.h"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlink_loop_is_an_error() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/main.cpp");
        std::os::unix::fs::symlink(temp.path().join("src"), temp.path().join("src/again"))
            .unwrap();

        let options = WalkOptions {
            sorted: true,
            follow_symlinks: true,
        };
        let results: Vec<_> = walk(temp.path(), Path::new("src"), options).collect();
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(ManifestError::Walk(_)))));
    }
}
