//! Recursive directory scanning filtered by file extension
//!
//! Scans are best-effort: a directory that cannot be read contributes no
//! entries and the walk carries on. Every error that was skipped this way is
//! kept in [`ScanResult::errors`], so callers can tell an empty tree from a
//! partially unreadable one.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

/// Extensions picked up by [`get_audio_filenames`]
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "flac", "ogg", "aiff", "aif", "mp3"];

/// Outcome of a directory scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Every subdirectory visited, in traversal order
    pub subfolders: Vec<PathBuf>,
    /// Files whose extension matched, in traversal order
    pub files: Vec<PathBuf>,
    /// Errors that caused part of the tree to be skipped
    pub errors: Vec<walkdir::Error>,
}

impl ScanResult {
    /// True when nothing was skipped because of an error
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Append another scan's results after this one's
    pub fn extend(&mut self, other: ScanResult) {
        self.subfolders.extend(other.subfolders);
        self.files.extend(other.files);
        self.errors.extend(other.errors);
    }
}

/// Lowercase each extension and strip any leading dot
fn normalize_extensions<S: AsRef<str>>(ext: &[S]) -> Vec<String> {
    ext.iter()
        .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
        .collect()
}

fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .map(|e| allowed.iter().any(|a| *a == e))
        .unwrap_or(false)
}

/// Recursively collect files under `dir` whose extension is in `ext`
///
/// Extensions match case-insensitively and may be given as `"wav"` or
/// `".wav"`. Entries come back in directory-listing order, not sorted.
/// Symlinks are followed; a symlink loop is recorded as an error.
pub fn fast_scandir<S: AsRef<str>>(dir: impl AsRef<Path>, ext: &[S]) -> ScanResult {
    let dir = dir.as_ref();
    let allowed = normalize_extensions(ext);
    let mut result = ScanResult::default();

    debug!("Scanning {} for {:?}", dir.display(), allowed);

    for entry in WalkDir::new(dir).min_depth(1).follow_links(true) {
        match entry {
            Ok(entry) => {
                let file_type = entry.file_type();
                if file_type.is_dir() {
                    result.subfolders.push(entry.into_path());
                } else if file_type.is_file() && has_allowed_extension(entry.path(), &allowed) {
                    result.files.push(entry.into_path());
                }
            }
            Err(err) => {
                warn!("Skipping unreadable path during scan: {}", err);
                result.errors.push(err);
            }
        }
    }

    result
}

/// Recursively get the audio filenames under each root in `paths`
///
/// Results are concatenated in the order the roots are given. Nothing is
/// deduplicated, so overlapping roots list shared files more than once.
pub fn get_audio_filenames<P: AsRef<Path>>(paths: &[P]) -> ScanResult {
    let mut result = ScanResult::default();
    for path in paths {
        result.extend(get_audio_filenames_in(path));
    }
    result
}

/// Recursively get the audio filenames under a single root
pub fn get_audio_filenames_in(root: impl AsRef<Path>) -> ScanResult {
    fast_scandir(root, AUDIO_EXTENSIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;
    use test_case::test_case;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    fn names(paths: &[PathBuf], root: &Path) -> Vec<String> {
        let mut names: Vec<String> = paths
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test_case(&["wav"], "a.wav", true ; "plain")]
    #[test_case(&[".wav"], "a.wav", true ; "leading dot")]
    #[test_case(&["WAV"], "a.wav", true ; "uppercase allow list")]
    #[test_case(&["wav"], "a.WaV", true ; "mixed case file")]
    #[test_case(&["wav"], "a.wav.txt", false ; "last extension wins")]
    #[test_case(&["wav"], "wav", false ; "no extension")]
    fn test_extension_matching(ext: &[&str], file: &str, expected: bool) {
        let allowed = normalize_extensions(ext);
        assert_eq!(has_allowed_extension(Path::new(file), &allowed), expected);
    }

    #[test]
    fn test_scan_filters_by_extension() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.wav"));
        touch(&root.join("b.txt"));
        touch(&root.join("sub/c.flac"));

        let result = fast_scandir(root, &["wav", "flac"]);

        assert_eq!(names(&result.files, root), vec!["a.wav", "sub/c.flac"]);
        assert_eq!(names(&result.subfolders, root), vec!["sub"]);
        assert!(result.is_complete());
    }

    #[test]
    fn test_scan_descends_every_level() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("x/y/z/deep.mp3"));
        touch(&root.join("x/shallow.MP3"));

        let result = fast_scandir(root, &[".mp3"]);

        assert_eq!(names(&result.files, root), vec!["x/shallow.MP3", "x/y/z/deep.mp3"]);
        assert_eq!(result.subfolders.len(), 3);
    }

    #[test]
    fn test_missing_root_yields_error_not_panic() {
        let dir = tempdir().unwrap();
        let result = fast_scandir(dir.path().join("missing"), &["wav"]);

        assert!(result.files.is_empty());
        assert!(!result.is_complete());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("ok.wav"));
        touch(&root.join("locked/hidden.wav"));
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            // Permissions are not enforced for this user (e.g. root)
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = fast_scandir(root, &["wav"]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(names(&result.files, root), vec!["ok.wav"]);
        assert_eq!(result.errors.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_recorded() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("sub/a.wav"));
        std::os::unix::fs::symlink(root, root.join("sub/back")).unwrap();

        let result = fast_scandir(root, &["wav"]);

        assert_eq!(names(&result.files, root), vec!["sub/a.wav"]);
        assert!(result.errors.iter().any(|e| e.loop_ancestor().is_some()));
    }

    #[test]
    fn test_audio_filenames_concatenate_roots_in_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(&first.path().join("one.wav"));
        touch(&first.path().join("notes.md"));
        touch(&second.path().join("two.aif"));

        let result = get_audio_filenames(&[second.path(), first.path(), second.path()]);

        assert_eq!(
            result.files,
            vec![
                second.path().join("two.aif"),
                first.path().join("one.wav"),
                second.path().join("two.aif"),
            ]
        );
    }

    #[test]
    fn test_single_root_stays_inside_root() {
        let dir = tempdir().unwrap();
        let outer = dir.path().join("a");
        let root = outer.join("b");
        touch(&outer.join("outside.wav"));
        touch(&root.join("inside.wav"));

        let result = get_audio_filenames_in(root.as_path());
        assert_eq!(result.files, vec![root.join("inside.wav")]);
        assert!(result.is_complete());

        let listed = get_audio_filenames(&[root.as_path()]);
        assert_eq!(listed.files, vec![root.join("inside.wav")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped_and_scan_continues() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("ok.wav"));
        touch(&root.join("sub/later.flac"));
        std::os::unix::fs::symlink(root.join("gone.wav"), root.join("broken.wav")).unwrap();

        let result = fast_scandir(root, &["wav", "flac"]);

        assert_eq!(names(&result.files, root), vec!["ok.wav", "sub/later.flac"]);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path(), Some(root.join("broken.wav").as_path()));
    }
}
