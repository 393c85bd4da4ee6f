//! File system access
//!
//! The generator only touches the disk through the `FileSystem` trait so tests
//! can run a pass against an in-memory tree.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sha2::{Digest, Sha256};

use crate::error::{CompdocError, CompdocResult};

/// Abstract file system interface
pub trait FileSystem {
    /// Names of the directories directly under `path`
    fn list_directories(&self, path: &Path) -> CompdocResult<Vec<String>>;

    /// Names of the regular files directly under `path`
    fn list_files(&self, path: &Path) -> CompdocResult<Vec<String>>;

    /// Read the full file content as UTF-8 text
    fn read_text(&self, path: &Path) -> CompdocResult<String>;

    /// Overwrite `path` with `content`, creating parent directories
    fn write_text(&self, path: &Path, content: &str) -> CompdocResult<()>;

    /// Check if `path` is a regular file
    fn is_file(&self, path: &Path) -> bool;
}

/// Local disk implementation
///
/// Writes go through a temp file in the target directory and are renamed into
/// place while an exclusive lock is held on the output's lock file (see
/// [`lock_path_for`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    fn list_entries(&self, path: &Path, want_dirs: bool) -> CompdocResult<Vec<String>> {
        let entries = fs::read_dir(path).map_err(|e| CompdocError::io(path, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CompdocError::io(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) {
                continue;
            }
            // Follow symlinks so linked component folders still count
            let file_type = match fs::metadata(entry.path()) {
                Ok(meta) => meta.file_type(),
                Err(_) => continue,
            };
            if (want_dirs && file_type.is_dir()) || (!want_dirs && file_type.is_file()) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

impl FileSystem for LocalFs {
    fn list_directories(&self, path: &Path) -> CompdocResult<Vec<String>> {
        self.list_entries(path, true)
    }

    fn list_files(&self, path: &Path) -> CompdocResult<Vec<String>> {
        self.list_entries(path, false)
    }

    fn read_text(&self, path: &Path) -> CompdocResult<String> {
        fs::read_to_string(path).map_err(|e| CompdocError::io(path, e))
    }

    fn write_text(&self, path: &Path, content: &str) -> CompdocResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| CompdocError::io(&parent, e))?;

        let lock_path = lock_path_for(path);
        let lock_file = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| CompdocError::io(&lock_path, e))?;
        FileExt::lock_exclusive(&lock_file)
            .map_err(|e| CompdocError::io(&lock_path, e))?;

        let result = write_atomic(&parent, path, content);

        let _ = FileExt::unlock(&lock_file);
        result
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

fn write_atomic(dir: &Path, path: &Path, content: &str) -> CompdocResult<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| CompdocError::io(dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| CompdocError::io(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| CompdocError::io(path, e))?;
    tmp.persist(path)
        .map_err(|e| CompdocError::io(path, e.error))?;
    Ok(())
}

/// Lock file guarding writes to `path`
///
/// Lives in the system temp directory, keyed by the output's absolute path,
/// so nothing but the output itself is left in the project.
pub fn lock_path_for(path: &Path) -> PathBuf {
    let absolute = match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    };
    let hash = content_hash(&absolute.to_string_lossy());
    let digest = hash.trim_start_matches("sha256:");
    std::env::temp_dir().join(format!(
        "compdoc-{}.lock",
        digest.get(..16).unwrap_or(digest)
    ))
}

/// SHA-256 of text content, hex encoded with a `sha256:` prefix
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// In-memory file system for testing
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockFileSystem {
    pub files: std::sync::Arc<std::sync::Mutex<std::collections::BTreeMap<PathBuf, String>>>,
    pub dirs: std::sync::Arc<std::sync::Mutex<std::collections::BTreeSet<PathBuf>>>,
    pub fail_writes: std::sync::Arc<std::sync::atomic::AtomicBool>,
    pub writes: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, registering every ancestor as a directory
    pub fn add_file(&self, path: impl Into<PathBuf>, content: &str) {
        let path = path.into();
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        self.files.lock().unwrap().insert(path, content.to_string());
    }

    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn children(&self, path: &Path) -> CompdocResult<(Vec<String>, Vec<String>)> {
        if !self.dirs.lock().unwrap().contains(path) {
            return Err(CompdocError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let dirs = self
            .dirs
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.parent() == Some(path))
            .filter_map(|d| d.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        let files = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|f| f.parent() == Some(path))
            .filter_map(|f| f.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        Ok((dirs, files))
    }
}

#[cfg(test)]
impl FileSystem for MockFileSystem {
    fn list_directories(&self, path: &Path) -> CompdocResult<Vec<String>> {
        self.children(path).map(|(dirs, _)| dirs)
    }

    fn list_files(&self, path: &Path) -> CompdocResult<Vec<String>> {
        self.children(path).map(|(_, files)| files)
    }

    fn read_text(&self, path: &Path) -> CompdocResult<String> {
        self.content(path).ok_or_else(|| CompdocError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> CompdocResult<()> {
        use std::sync::atomic::Ordering;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CompdocError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.add_file(path, content);
        Ok(())
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
