use std::fmt;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::locks::{self, LockRegistry};
use crate::logger::{LogLevel, Logger, TracingLogger};
use crate::names::{validate_address, validate_collection};
use crate::path;

/// Construction options for a [`Store`].
#[derive(Clone, Default)]
pub struct Options {
    /// Logging sink. `None` selects a [`TracingLogger`] at `info`.
    pub logger: Option<Arc<dyn Logger>>,
}

impl Options {
    pub fn with_logger(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: Some(logger),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("custom_logger", &self.logger.is_some())
            .finish()
    }
}

/// File-per-record document store rooted at one directory.
///
/// Records live at `<root>/<collection>/<name>.json`. Writes and deletes
/// are serialized per collection; reads take no lock and rely on writes
/// landing through an atomic rename, so a reader sees either the previous
/// or the new complete record.
///
/// Locking is in-process only. Two processes sharing a root can interleave
/// their writes.
pub struct Store {
    root: PathBuf,
    locks: LockRegistry,
    logger: Arc<dyn Logger>,
}

impl Store {
    /// Open the store at `root`, creating the directory if it is missing.
    pub fn new(root: impl AsRef<Path>, options: Options) -> StoreResult<Self> {
        let requested = root.as_ref();
        let root = path::absolute(requested)
            .map_err(StoreError::io("cannot resolve store root", requested))?;
        let logger: Arc<dyn Logger> = match options.logger {
            Some(logger) => logger,
            None => Arc::new(TracingLogger::default()),
        };

        match fs::metadata(&root) {
            Ok(meta) if meta.is_dir() => {
                logger.log(
                    LogLevel::Debug,
                    format_args!("Using '{}' (database already exists)", root.display()),
                );
            }
            Ok(_) => {
                return Err(StoreError::Io {
                    context: "store root is not a directory",
                    path: root,
                    source: io::Error::new(io::ErrorKind::AlreadyExists, "not a directory"),
                });
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                logger.log(
                    LogLevel::Debug,
                    format_args!("Creating the database at '{}'...", root.display()),
                );
                create_dir_all(&root).map_err(StoreError::io("cannot create store root", &root))?;
            }
            Err(e) => return Err(StoreError::io("cannot stat store root", &root)(e)),
        }

        Ok(Self {
            root,
            locks: LockRegistry::new(),
            logger,
        })
    }

    /// Open the store at `root` with default options.
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        Self::new(root, Options::default())
    }

    /// Cleaned, absolute root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `value` as record `name` in `collection`, replacing any
    /// previous content.
    pub fn write<T>(&self, collection: &str, name: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate_address(collection, name)?;
        // Encode before touching the lock or the disk: a value that cannot
        // be represented leaves everything as it was.
        let bytes = encode(value)?;

        let lock = self.locks.acquire(collection);
        let _guard = locks::hold(&lock);

        let dir = path::collection_dir(&self.root, collection);
        create_dir_all(&dir).map_err(StoreError::io("cannot create collection", &dir))?;

        let final_path = path::record_path(&self.root, collection, name);
        let tmp_path = path::temp_path(&final_path);
        write_synced(&tmp_path, &bytes).map_err(StoreError::io("cannot write", &tmp_path))?;
        // A failed rename leaves the staged file behind for inspection.
        fs::rename(&tmp_path, &final_path)
            .map_err(StoreError::io("cannot move record into place", &final_path))?;

        self.logger.log(
            LogLevel::Debug,
            format_args!("wrote {collection}/{name} ({} bytes)", bytes.len()),
        );
        Ok(())
    }

    /// Read record `name` from `collection` and decode it as `T`.
    pub fn read<T: DeserializeOwned>(&self, collection: &str, name: &str) -> StoreResult<T> {
        validate_address(collection, name)?;

        let bare = path::bare_path(&self.root, collection, name);
        if self.resolve(&bare)?.is_none() {
            return Err(not_found(collection, name));
        }

        let record = path::with_extension(&bare);
        let bytes = match fs::read(&record) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(not_found(collection, name));
            }
            Err(e) => return Err(StoreError::io("cannot read", &record)(e)),
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Decode {
            path: record,
            source,
        })
    }

    /// Returns `true` if a record file exists for `(collection, name)`.
    pub fn exists(&self, collection: &str, name: &str) -> StoreResult<bool> {
        validate_address(collection, name)?;
        let bare = path::bare_path(&self.root, collection, name);
        Ok(self.resolve(&bare)?.is_some_and(|(_, meta)| meta.is_file()))
    }

    /// Raw JSON text of every record in `collection`.
    ///
    /// Entries come back in directory order; callers must not rely on any
    /// particular sort. Records are left encoded so that collections may
    /// hold heterogeneous shapes.
    pub fn read_all(&self, collection: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .collect_records(collection)?
            .into_iter()
            .map(|(_, text)| text)
            .collect())
    }

    /// Every record in `collection`, decoded as `T`.
    pub fn read_all_as<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.collect_records(collection)?
            .into_iter()
            .map(|(path, text)| {
                serde_json::from_str(&text).map_err(|source| StoreError::Decode { path, source })
            })
            .collect()
    }

    /// Delete record `name`, or the whole collection when `name` is empty.
    pub fn delete(&self, collection: &str, name: &str) -> StoreResult<()> {
        validate_collection(collection)?;

        let lock = self.locks.acquire(collection);
        let _guard = locks::hold(&lock);

        let target = if name.is_empty() {
            path::collection_dir(&self.root, collection)
        } else {
            path::bare_path(&self.root, collection, name)
        };

        let Some((resolved, meta)) = self.resolve(&target)? else {
            return Err(not_found(collection, name));
        };

        if meta.is_dir() {
            // The registry keeps this collection's lock; a later write that
            // recreates the directory takes the same one.
            fs::remove_dir_all(&resolved).map_err(StoreError::io("cannot remove", &resolved))?;
            self.logger.log(
                LogLevel::Debug,
                format_args!("removed directory {}", relative(collection, name)),
            );
            return Ok(());
        }

        let record = path::with_extension(&target);
        match fs::remove_file(&record) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(not_found(collection, name));
            }
            Err(e) => return Err(StoreError::io("cannot remove", &record)(e)),
        }
        self.logger.log(
            LogLevel::Debug,
            format_args!("removed {}", relative(collection, name)),
        );
        Ok(())
    }

    fn resolve(&self, target: &Path) -> StoreResult<Option<(PathBuf, fs::Metadata)>> {
        path::resolve(target).map_err(StoreError::io("cannot stat", target))
    }

    fn collect_records(&self, collection: &str) -> StoreResult<Vec<(PathBuf, String)>> {
        validate_collection(collection)?;

        let dir = path::collection_dir(&self.root, collection);
        // A stray `<collection>.json` file satisfies the fallback but is not
        // a collection.
        if !self.resolve(&dir)?.is_some_and(|(found, meta)| found == dir && meta.is_dir()) {
            return Err(not_found(collection, ""));
        }

        let entries =
            fs::read_dir(&dir).map_err(StoreError::io("cannot list collection", &dir))?;

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(StoreError::io("cannot list collection", &dir))?;
            let file_name = entry.file_name();
            // Staging files of in-flight writes are never returned.
            if !file_name.to_str().is_some_and(path::is_record_file) {
                continue;
            }
            let record = entry.path();
            if record.is_dir() {
                continue;
            }
            let text = fs::read_to_string(&record).map_err(StoreError::io("cannot read", &record))?;
            records.push((record, text));
        }
        Ok(records)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("root", &self.root)
            .field("collection_locks", &self.locks.len())
            .finish()
    }
}

fn relative(collection: &str, name: &str) -> String {
    if name.is_empty() {
        collection.to_string()
    } else {
        format!("{collection}/{name}")
    }
}

fn not_found(collection: &str, name: &str) -> StoreError {
    StoreError::NotFound {
        path: relative(collection, name),
    }
}

/// Tab-indented JSON plus a trailing newline.
fn encode<T: Serialize + ?Sized>(value: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(StoreError::Encode)?;
    buf.push(b'\n');
    Ok(buf)
}

fn create_dir_all(dir: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(dir)
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
