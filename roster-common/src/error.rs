//! Common error types for the roster service

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the roster engine and the service around it
#[derive(Error, Debug)]
pub enum Error {
    /// No member with this name in the roster
    #[error("{0} not found")]
    MemberNotFound(String),

    /// Alt has no public note to derive a main from
    #[error("{name} has no public note set to determine main")]
    NoAnnotation { name: String },

    /// Public note does not look like an alt annotation
    #[error("{name}'s public note does not mention nd main or alt: {note}")]
    AmbiguousAnnotation { name: String, note: String },

    /// Public note cannot be split into a name and a description
    #[error("{name}'s public note cannot be split on whitespace: {note}")]
    MalformedAnnotation { name: String, note: String },

    /// Dump file could not be parsed into a roster
    #[error("Snapshot unreadable: {0}")]
    SnapshotUnreadable(String),

    /// Dump belongs to another guild or server
    #[error("Snapshot {file_name} does not match {expected}")]
    NamingMismatch { file_name: String, expected: String },

    /// Merged roster could not be written to disk
    #[error("Failed to persist roster: {0}")]
    PersistFailure(String),

    /// No dump file to start from
    #[error("Cannot find a guild dump in {0:?}")]
    NoSnapshotFound(PathBuf),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable, transport-independent classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MemberNotFound,
    NoAnnotation,
    AmbiguousAnnotation,
    MalformedAnnotation,
    SnapshotUnreadable,
    NamingMismatch,
    PersistFailure,
    NoSnapshotFound,
    Config,
    Io,
}

impl ErrorKind {
    /// Snake-case code reported to API callers
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MemberNotFound => "member_not_found",
            ErrorKind::NoAnnotation => "no_annotation",
            ErrorKind::AmbiguousAnnotation => "ambiguous_annotation",
            ErrorKind::MalformedAnnotation => "malformed_annotation",
            ErrorKind::SnapshotUnreadable => "snapshot_unreadable",
            ErrorKind::NamingMismatch => "naming_mismatch",
            ErrorKind::PersistFailure => "persist_failure",
            ErrorKind::NoSnapshotFound => "no_snapshot_found",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MemberNotFound(_) => ErrorKind::MemberNotFound,
            Error::NoAnnotation { .. } => ErrorKind::NoAnnotation,
            Error::AmbiguousAnnotation { .. } => ErrorKind::AmbiguousAnnotation,
            Error::MalformedAnnotation { .. } => ErrorKind::MalformedAnnotation,
            Error::SnapshotUnreadable(_) => ErrorKind::SnapshotUnreadable,
            Error::NamingMismatch { .. } => ErrorKind::NamingMismatch,
            Error::PersistFailure(_) => ErrorKind::PersistFailure,
            Error::NoSnapshotFound(_) => ErrorKind::NoSnapshotFound,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// True for the failures of the alt/main heuristic
    pub fn is_annotation_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::NoAnnotation | ErrorKind::AmbiguousAnnotation | ErrorKind::MalformedAnnotation
        )
    }
}
