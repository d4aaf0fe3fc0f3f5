//! Guild dump parsing and writing
//!
//! A dump is UTF-8 text with one member per line and TAB separated columns:
//!
//! ```text
//! name  level  class  rank  alt  last online  zone  public note  personal note
//!       tribute status  trophy tribute status  donations  last donation  [extra...]
//! ```
//!
//! Missing trailing columns default to empty. Columns past the known ones
//! are kept in [`MemberRecord::extra_fields`] and written back unchanged.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::member::{CharacterClass, MemberRecord};
use crate::roster::Roster;
use crate::{Error, Result};

const KNOWN_COLUMNS: usize = 13;

/// Name, level and class are required on every member line
const REQUIRED_COLUMNS: usize = 3;

/// Parse dump text into members, in file order
pub fn parse_str(text: &str) -> Result<Vec<MemberRecord>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut members = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        members.push(parse_line(line).map_err(|reason| {
            Error::SnapshotUnreadable(format!("line {}: {}", index + 1, reason))
        })?);
    }

    Ok(members)
}

fn parse_line(line: &str) -> std::result::Result<MemberRecord, String> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < REQUIRED_COLUMNS {
        return Err(format!(
            "expected at least {} tab separated columns, found {}",
            REQUIRED_COLUMNS,
            columns.len()
        ));
    }

    let name = columns[0].trim();
    if name.is_empty() {
        return Err("member name is empty".to_string());
    }

    let column = |i: usize| columns.get(i).copied().unwrap_or_default().to_string();

    Ok(MemberRecord {
        name: name.to_string(),
        level: columns[1].trim().parse().unwrap_or(0),
        class: CharacterClass::parse(columns[2]),
        rank: column(3),
        alt: parse_alt_flag(columns.get(4).copied().unwrap_or_default()),
        last_online: column(5),
        zone: column(6),
        public_note: column(7),
        personal_note: column(8),
        tribute_status: column(9),
        trophy_tribute_status: column(10),
        donations: column(11),
        last_donation: column(12),
        extra_fields: columns
            .iter()
            .skip(KNOWN_COLUMNS)
            .map(|c| c.to_string())
            .collect(),
    })
}

fn parse_alt_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw.eq_ignore_ascii_case("a") || raw.eq_ignore_ascii_case("alt")
}

/// Load a dump file into a roster whose source is `path`
pub fn parse_file(path: &Path) -> Result<Roster> {
    let bytes = fs::read(path)
        .map_err(|e| Error::SnapshotUnreadable(format!("{}: {}", path.display(), e)))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| Error::SnapshotUnreadable(format!("{}: not UTF-8 text", path.display())))?;

    let members = parse_str(&text)
        .map_err(|e| match e {
            Error::SnapshotUnreadable(reason) => {
                Error::SnapshotUnreadable(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })?;
    if members.is_empty() {
        return Err(Error::SnapshotUnreadable(format!(
            "{}: contains no members",
            path.display()
        )));
    }

    let roster = Roster::from_members(path, members);
    debug!("Parsed {} members from {}", roster.len(), path.display());
    Ok(roster)
}

/// Render a roster back into dump text
pub fn render(roster: &Roster) -> String {
    let mut out = String::new();
    for member in roster {
        let level = member.level.to_string();
        let mut columns: Vec<&str> = vec![
            member.name.as_str(),
            level.as_str(),
            member.class.as_str(),
            member.rank.as_str(),
            if member.alt { "A" } else { "" },
            member.last_online.as_str(),
            member.zone.as_str(),
            member.public_note.as_str(),
            member.personal_note.as_str(),
            member.tribute_status.as_str(),
            member.trophy_tribute_status.as_str(),
            member.donations.as_str(),
            member.last_donation.as_str(),
        ];
        columns.extend(member.extra_fields.iter().map(String::as_str));
        out.push_str(&columns.join("\t"));
        out.push('\n');
    }
    out
}

/// Write a roster to `path` through a temporary file in the same directory
///
/// The target only ever holds a complete dump: the data is synced to the
/// temporary file before it is renamed over `path`.
pub fn write_file(roster: &Roster, path: &Path) -> Result<()> {
    let persist_err = |e: std::io::Error| Error::PersistFailure(format!("{}: {}", path.display(), e));

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(persist_err)?;
    tmp.write_all(render(roster).as_bytes()).map_err(persist_err)?;
    tmp.as_file().sync_all().map_err(persist_err)?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;

    debug!("Wrote {} members to {}", roster.len(), path.display());
    Ok(())
}
