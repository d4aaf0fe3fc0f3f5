//! # Roster Common Library
//!
//! Shared code for the guild roster service including:
//! - Member and roster models
//! - Guild dump parsing, rendering and file naming
//! - Alt/main resolution and class filtering
//! - Roster reconciliation (merging a new dump into the current roster)
//! - Configuration loading

pub mod class_filter;
pub mod config;
pub mod error;
pub mod member;
pub mod naming;
pub mod reconcile;
pub mod resolver;
pub mod roster;
pub mod snapshot;

pub use error::{Error, ErrorKind, Result};
pub use member::{CharacterClass, MemberRecord};
pub use naming::{GuildIdentity, SnapshotName};
pub use roster::Roster;
