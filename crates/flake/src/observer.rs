//! Diagnostics emitted during extraction
//!
//! Extraction never logs directly. Every diagnostic is handed to an
//! [`ExtractObserver`] passed in by the caller, so the pipeline stays pure
//! and tests can inspect exactly what was reported.

use std::fmt;
use std::sync::Mutex;

/// Severity of an extraction event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Entry and exit of an extraction
    Trace,
    /// Expected, non-updatable shapes
    Debug,
    /// Corrupt or inconsistent input
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What an extraction event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Extraction started
    Started,
    /// Extraction finished
    Finished,
    /// The lock file failed JSON parsing or schema validation
    InvalidLockFile,
    /// The lock file could not be read
    UnreadableLockFile,
    /// The lock graph uses a format version that is not read in strict mode
    UnsupportedVersion,
    /// A node is not a direct input of root
    NotRootInput,
    /// A node lacks `locked` or `original`
    EmptyNode,
    /// A node is an indirect (registry) reference
    IndirectInput,
    /// A node's locked type has no classifier branch
    UnsupportedType,
    /// A node lacks a field its provider type needs
    IncompleteInput,
    /// A tarball URL does not follow the archive pattern
    UnrecognizedTarballUrl,
}

impl EventKind {
    /// Severity this kind is reported at
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Started | Self::Finished => Severity::Trace,
            Self::InvalidLockFile | Self::UnreadableLockFile | Self::NotRootInput => {
                Severity::Error
            }
            Self::UnsupportedVersion
            | Self::EmptyNode
            | Self::IndirectInput
            | Self::UnsupportedType
            | Self::IncompleteInput
            | Self::UnrecognizedTarballUrl => Severity::Debug,
        }
    }

    /// Stable identifier used as a structured log field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "extract.started",
            Self::Finished => "extract.finished",
            Self::InvalidLockFile => "lock.invalid",
            Self::UnreadableLockFile => "lock.unreadable",
            Self::UnsupportedVersion => "lock.unsupported_version",
            Self::NotRootInput => "node.not_root_input",
            Self::EmptyNode => "node.empty",
            Self::IndirectInput => "node.indirect",
            Self::UnsupportedType => "node.unsupported_type",
            Self::IncompleteInput => "node.incomplete",
            Self::UnrecognizedTarballUrl => "node.tarball_url",
        }
    }
}

/// A single diagnostic produced by extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractEvent {
    /// What happened
    pub kind: EventKind,
    /// Node the event concerns, if any
    pub dep_name: Option<String>,
    /// Human readable detail
    pub message: String,
}

impl ExtractEvent {
    /// Event about the lock file as a whole
    #[must_use]
    pub fn file(kind: EventKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            dep_name: None,
            message: message.into(),
        }
    }

    /// Event about one node
    #[must_use]
    pub fn node(kind: EventKind, dep_name: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            dep_name: Some(dep_name.to_string()),
            message: message.into(),
        }
    }

    /// Severity of this event
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

/// Receiver of extraction diagnostics
pub trait ExtractObserver: Send + Sync {
    /// Handle one event
    fn observe(&self, event: ExtractEvent);
}

/// Forwards events to `tracing` under the `flakedeps::extract` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ExtractObserver for TracingObserver {
    fn observe(&self, event: ExtractEvent) {
        let kind = event.kind.as_str();
        let dep_name = event.dep_name.as_deref().unwrap_or_default();
        match event.severity() {
            Severity::Error => {
                tracing::error!(target: "flakedeps::extract", kind, dep_name, "{}", event.message);
            }
            Severity::Debug => {
                tracing::debug!(target: "flakedeps::extract", kind, dep_name, "{}", event.message);
            }
            Severity::Trace => {
                tracing::trace!(target: "flakedeps::extract", kind, dep_name, "{}", event.message);
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ExtractObserver for NoopObserver {
    fn observe(&self, _event: ExtractEvent) {}
}

/// Records events in memory
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<ExtractEvent>>,
}

impl CollectingObserver {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events
    #[must_use]
    pub fn events(&self) -> Vec<ExtractEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Recorded events at the given severity
    #[must_use]
    pub fn at(&self, severity: Severity) -> Vec<ExtractEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.severity() == severity)
            .collect()
    }

    /// Recorded events of the given kind
    #[must_use]
    pub fn of_kind(&self, kind: EventKind) -> Vec<ExtractEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.kind == kind)
            .collect()
    }
}

impl ExtractObserver for CollectingObserver {
    fn observe(&self, event: ExtractEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
