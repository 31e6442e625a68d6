//! File-per-record JSON document store.
//!
//! Records are grouped into named collections. Each collection is a
//! directory under the store root and each record is one JSON file inside
//! it:
//!
//! ```text
//! <root>/<collection>/<name>.json
//! ```
//!
//! # Layers
//!
//! - [`path`]: addressing, including the bare-name / `.json` fallback used
//!   by every lookup
//! - [`locks`]: one exclusive lock per collection, created lazily
//! - [`Store`]: write, read, read-all and delete on top of both
//!
//! # Design Rules
//!
//! 1. A write is staged to `<name>.json.tmp` and renamed into place, so a
//!    reader never observes a partial record.
//! 2. Writes and deletes are serialized per collection; different
//!    collections never block each other.
//! 3. Reads take no lock.
//! 4. The store never inspects record contents.
//! 5. Every error is returned to the caller. The logging sink only carries
//!    informational messages.
//! 6. Locking is in-process only; separate processes sharing a root are not
//!    coordinated.
//!
//! # Example
//!
//! ```no_run
//! use folio_store::Store;
//! use serde_json::{json, Value};
//!
//! let store = Store::open("./data")?;
//! store.write("users", "John", &json!({"name": "John", "age": "23"}))?;
//! let john: Value = store.read("users", "John")?;
//! assert_eq!(john["age"], "23");
//! # Ok::<(), folio_store::StoreError>(())
//! ```

pub mod error;
pub mod locks;
pub mod logger;
pub mod names;
pub mod path;
pub mod store;

pub use error::{NameKind, StoreError, StoreResult};
pub use locks::{CollectionLock, LockRegistry};
pub use logger::{LogLevel, Logger, TracingLogger};
pub use store::{Options, Store};
