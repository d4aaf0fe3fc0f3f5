//! Guild dump file naming
//!
//! Dumps are named `{guild}_{server}-{timestamp}.txt`, for example
//! `Vets of Norrath_firiona-20211220-211345.txt`. The guild and server in
//! the name identify which roster a dump belongs to.

use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::{Error, Result};

const DUMP_EXTENSION: &str = ".txt";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Decoded dump file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotName {
    pub file_name: String,
    pub guild: String,
    pub server: String,
    /// Raw timestamp text between the server and the extension
    pub timestamp: String,
}

impl SnapshotName {
    /// Decode a bare file name; `None` when it does not follow the convention
    pub fn decode(file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(DUMP_EXTENSION)?;
        let (guild, rest) = stem.split_once('_')?;
        let (server, timestamp) = rest.split_once('-').unwrap_or((rest, ""));

        if guild.is_empty() || server.is_empty() {
            return None;
        }

        Some(Self {
            file_name: file_name.to_string(),
            guild: guild.to_string(),
            server: server.to_string(),
            timestamp: timestamp.to_string(),
        })
    }

    /// Decode the file name component of a path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::decode)
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    pub fn identity(&self) -> GuildIdentity {
        GuildIdentity {
            guild: self.guild.clone(),
            server: self.server.clone(),
        }
    }

    /// Newest-first ordering key: parsed timestamp, then file name
    fn recency_cmp(&self, other: &Self) -> Ordering {
        self.parsed_timestamp()
            .cmp(&other.parsed_timestamp())
            .then_with(|| self.file_name.cmp(&other.file_name))
    }
}

/// Guild and server a service instance is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildIdentity {
    pub guild: String,
    pub server: String,
}

impl GuildIdentity {
    pub fn new(guild: impl Into<String>, server: impl Into<String>) -> Self {
        Self {
            guild: guild.into(),
            server: server.into(),
        }
    }

    pub fn matches(&self, name: &SnapshotName) -> bool {
        self.guild == name.guild && self.server == name.server
    }

    /// Check that `file_name` is a bare dump name for this guild and server
    pub fn validate(&self, file_name: &str) -> Result<SnapshotName> {
        let mismatch = || Error::NamingMismatch {
            file_name: file_name.to_string(),
            expected: self.to_string(),
        };

        if file_name.contains(['/', '\\']) {
            return Err(mismatch());
        }
        match SnapshotName::decode(file_name) {
            Some(name) if self.matches(&name) => Ok(name),
            _ => Err(mismatch()),
        }
    }
}

impl fmt::Display for GuildIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.guild, self.server)
    }
}

/// Find the newest dump in the top level of `dir`
pub fn find_latest(dir: &Path) -> Result<PathBuf> {
    let mut latest: Option<(SnapshotName, PathBuf)> = None;

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = SnapshotName::from_path(entry.path()) else {
            continue;
        };

        let newer = match &latest {
            Some((current, _)) => name.recency_cmp(current) == Ordering::Greater,
            None => true,
        };
        if newer {
            latest = Some((name, entry.into_path()));
        }
    }

    latest
        .map(|(_, path)| path)
        .ok_or_else(|| Error::NoSnapshotFound(dir.to_path_buf()))
}
