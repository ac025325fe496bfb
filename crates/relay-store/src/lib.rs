pub mod error;
pub mod file;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use relay_types::Message;
use tracing::{debug, error, info, warn};

pub use error::StoreError;

/// Durable, deduplicated log of messages for one node.
///
/// All mutation goes through one mutex. The full log is rewritten to disk
/// while that mutex is held, so no reader can observe an entry that a crash
/// would lose.
pub struct MessageStore {
    path: PathBuf,
    log: Mutex<Log>,
    persist_failures: AtomicU64,
}

#[derive(Default)]
struct Log {
    entries: Vec<Message>,
    ids: HashSet<String>,
}

impl Log {
    fn from_entries(loaded: Vec<Message>) -> Self {
        let mut log = Self::default();
        for msg in loaded {
            if !log.insert(msg) {
                debug!("Dropping duplicate id in persisted log");
            }
        }
        log
    }

    fn insert(&mut self, msg: Message) -> bool {
        if !self.ids.insert(msg.id.clone()) {
            return false;
        }
        self.entries.push(msg);
        true
    }
}

impl MessageStore {
    /// Open the store backed by `path`, loading whatever history it holds.
    ///
    /// Never fails: an unreadable or corrupt file starts the node with an
    /// empty log.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let loaded = Self::load_on_start(&path);
        let log = Log::from_entries(loaded);

        info!(
            "Message log opened at {} ({} messages)",
            path.display(),
            log.entries.len()
        );

        Self {
            path,
            log: Mutex::new(log),
            persist_failures: AtomicU64::new(0),
        }
    }

    /// Read the persisted log, falling back to empty on any failure.
    pub fn load_on_start(path: &Path) -> Vec<Message> {
        file::read_log(path).unwrap_or_else(|e| {
            warn!("Starting with empty message log: {}", e);
            Vec::new()
        })
    }

    /// Append `candidate` unless a message with the same id is present.
    ///
    /// Returns `true` if the message was added. On success the full log is
    /// persisted before the lock is released. A failed write is logged and
    /// counted but the message stays accepted in memory.
    pub fn append(&self, candidate: Message) -> bool {
        let mut log = self.lock();

        if log.ids.contains(&candidate.id) {
            debug!("Duplicate message {} ignored", candidate.id);
            return false;
        }

        log.insert(candidate);

        if let Err(e) = file::write_log(&self.path, &log.entries) {
            self.persist_failures.fetch_add(1, Ordering::Relaxed);
            error!("Failed to persist message log: {}", e);
        }

        true
    }

    /// Point-in-time copy of the log in acceptance order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().ids.contains(id)
    }

    /// Number of appends whose disk write failed since the store was opened.
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }

    // Poisoning is ignored: the id index and entries are updated together
    // before the disk write, so a panic there leaves the log consistent.
    fn lock(&self) -> MutexGuard<'_, Log> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
