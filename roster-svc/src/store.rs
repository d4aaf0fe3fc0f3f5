//! Process-wide roster state
//!
//! The current roster is an immutable value published through an
//! [`ArcSwap`]. Queries load it without locking and keep whichever version
//! they loaded for the rest of the request. Submissions are serialized by a
//! writer lock, build a complete new roster, persist it, and only then swap
//! it in, so readers see either the old or the new roster and never a mix.

use arc_swap::ArcSwap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use roster_common::naming::{find_latest, SnapshotName};
use roster_common::reconcile::{reconcile, summarize, ReconcileSummary};
use roster_common::snapshot::{parse_file, write_file};
use roster_common::{Error, GuildIdentity, Result, Roster};

/// Result of merging an uploaded dump
#[derive(Debug, Clone)]
pub struct SubmitOutcome {
    pub file_name: String,
    /// Dump file now backing the roster
    pub path: PathBuf,
    pub members: usize,
    pub summary: ReconcileSummary,
}

pub struct RosterStore {
    current: ArcSwap<Roster>,
    writer: Mutex<()>,
    identity: GuildIdentity,
    dump_dir: PathBuf,
}

impl RosterStore {
    pub fn new(identity: GuildIdentity, dump_dir: impl Into<PathBuf>, roster: Roster) -> Self {
        Self {
            current: ArcSwap::from_pointee(roster),
            writer: Mutex::new(()),
            identity,
            dump_dir: dump_dir.into(),
        }
    }

    /// Load the newest dump in `dump_dir`
    ///
    /// The service identity (guild and server) comes from that dump's file
    /// name. Fails with `NoSnapshotFound` or `SnapshotUnreadable`.
    pub fn open(dump_dir: &Path) -> Result<Self> {
        let path = find_latest(dump_dir)?;
        let name = SnapshotName::from_path(&path).ok_or_else(|| {
            Error::SnapshotUnreadable(format!("{}: unexpected file name", path.display()))
        })?;
        let roster = parse_file(&path)?;

        info!(
            "Loaded {} members of {} on {} from {}",
            roster.len(),
            name.guild,
            name.server,
            path.display()
        );
        Ok(Self::new(name.identity(), dump_dir, roster))
    }

    /// Roster as of now
    pub fn current(&self) -> Arc<Roster> {
        self.current.load_full()
    }

    /// Publish a new roster
    pub fn replace(&self, roster: Roster) {
        self.current.store(Arc::new(roster));
    }

    pub fn identity(&self) -> &GuildIdentity {
        &self.identity
    }

    pub fn dump_dir(&self) -> &Path {
        &self.dump_dir
    }

    /// Merge an uploaded dump into the roster
    ///
    /// The upload is staged in a temporary directory that is removed on
    /// return. The merged roster is written to the dump directory under
    /// `file_name` before it is published; the previous dump file is
    /// deleted last. On any error the published roster and its file are
    /// left as they were.
    pub fn submit(&self, file_name: &str, bytes: &[u8]) -> Result<SubmitOutcome> {
        let name = self.identity.validate(file_name)?;

        let staging = tempfile::Builder::new().prefix("guild-upload").tempdir()?;
        let staged = staging.path().join(&name.file_name);
        fs::write(&staged, bytes)?;
        let incoming = parse_file(&staged)?;

        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let old = self.current();
        let target = self.dump_dir.join(&name.file_name);

        let merged = reconcile(&old, &incoming).with_source_path(&target);
        write_file(&merged, &target)?;

        let summary = summarize(&old, &merged);
        let members = merged.len();
        self.replace(merged);

        if old.source_path() != target.as_path() {
            if let Err(e) = fs::remove_file(old.source_path()) {
                warn!(
                    "Merged roster saved to {} but removing {} failed: {}",
                    target.display(),
                    old.source_path().display(),
                    e
                );
            }
        }

        info!(
            "Merged {}: {} members ({} added, {} updated, {} removed)",
            name.file_name,
            members,
            summary.added.len(),
            summary.updated.len(),
            summary.removed.len()
        );

        Ok(SubmitOutcome {
            file_name: name.file_name,
            path: target,
            members,
            summary,
        })
    }
}
