//! Merging a freshly uploaded dump into the current roster
//!
//! The newest dump defines membership: anyone missing from it has left the
//! guild (or was not listed) and is dropped. For members present in both,
//! the newest dump wins field by field; the previous record only fills in
//! text the new dump left blank. Personal notes, for example, are blank in
//! dumps taken by a character without officer rights.

use serde::Serialize;

use crate::member::MemberRecord;
use crate::roster::Roster;

/// Merge `incoming` into `old`, producing a new roster
///
/// Neither input is modified. The result has the members of `incoming`, in
/// its order, and takes `incoming`'s source path.
pub fn reconcile(old: &Roster, incoming: &Roster) -> Roster {
    let merged = incoming.iter().map(|member| match old.get(&member.name) {
        Some(previous) => merge_member(previous, member),
        None => member.clone(),
    });
    Roster::from_members(incoming.source_path(), merged)
}

/// Incoming record with blanks filled from the previous one
fn merge_member(previous: &MemberRecord, incoming: &MemberRecord) -> MemberRecord {
    fn fill(value: &str, fallback: &str) -> String {
        let chosen = if value.is_empty() { fallback } else { value };
        chosen.to_string()
    }

    MemberRecord {
        name: incoming.name.clone(),
        level: if incoming.level == 0 { previous.level } else { incoming.level },
        class: incoming.class.clone(),
        rank: fill(&incoming.rank, &previous.rank),
        alt: incoming.alt,
        last_online: fill(&incoming.last_online, &previous.last_online),
        zone: fill(&incoming.zone, &previous.zone),
        public_note: fill(&incoming.public_note, &previous.public_note),
        personal_note: fill(&incoming.personal_note, &previous.personal_note),
        tribute_status: fill(&incoming.tribute_status, &previous.tribute_status),
        trophy_tribute_status: fill(
            &incoming.trophy_tribute_status,
            &previous.trophy_tribute_status,
        ),
        donations: fill(&incoming.donations, &previous.donations),
        last_donation: fill(&incoming.last_donation, &previous.last_donation),
        extra_fields: if incoming.extra_fields.is_empty() {
            previous.extra_fields.clone()
        } else {
            incoming.extra_fields.clone()
        },
    }
}

/// Membership changes between two rosters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub added: Vec<String>,
    pub updated: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: usize,
}

/// Compare the roster before and after a merge
pub fn summarize(old: &Roster, merged: &Roster) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    for member in merged {
        match old.get(&member.name) {
            None => summary.added.push(member.name.clone()),
            Some(previous) if previous != member => summary.updated.push(member.name.clone()),
            Some(_) => summary.unchanged += 1,
        }
    }
    summary.removed = old
        .iter()
        .filter(|member| !merged.contains(&member.name))
        .map(|member| member.name.clone())
        .collect();

    summary
}
