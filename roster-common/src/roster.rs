//! Roster of guild members backed by one dump file

use indexmap::IndexMap;
use std::path::{Path, PathBuf};

use crate::member::{name_key, MemberRecord};

/// Guild roster at a point in time
///
/// Keys are lower-cased member names, so no two members share a
/// case-insensitive name. Insertion order is kept for deterministic output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: IndexMap<String, MemberRecord>,
    source_path: PathBuf,
}

impl Roster {
    /// Build a roster from members in dump order
    ///
    /// A repeated name keeps the last record seen, at the position of its
    /// first occurrence.
    pub fn from_members<I>(source_path: impl Into<PathBuf>, members: I) -> Self
    where
        I: IntoIterator<Item = MemberRecord>,
    {
        let mut map = IndexMap::new();
        for member in members {
            map.insert(member.key(), member);
        }
        Self {
            members: map,
            source_path: source_path.into(),
        }
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<&MemberRecord> {
        self.members.get(&name_key(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(&name_key(name))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MemberRecord> {
        self.members.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.values().map(|m| m.name.as_str())
    }

    /// Dump file this roster was loaded from or written to
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn with_source_path(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = source_path.into();
        self
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a MemberRecord;
    type IntoIter = indexmap::map::Values<'a, String, MemberRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::CharacterClass;

    fn member(name: &str, rank: &str) -> MemberRecord {
        let mut m = MemberRecord::new(name, CharacterClass::Warrior);
        m.rank = rank.to_string();
        m
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let roster = Roster::from_members("dump.txt", vec![member("Alice", "Member")]);
        assert_eq!(roster.get("alice").map(|m| m.name.as_str()), Some("Alice"));
        assert!(roster.contains("ALICE"));
        assert!(roster.get("Bob").is_none());
    }

    #[test]
    fn test_duplicates_keep_last_seen_at_first_position() {
        let roster = Roster::from_members(
            "dump.txt",
            vec![
                member("Alice", "Member"),
                member("Bob", "Member"),
                member("ALICE", "Officer"),
            ],
        );

        assert_eq!(roster.len(), 2);
        let names: Vec<_> = roster.names().collect();
        assert_eq!(names, vec!["ALICE", "Bob"]);
        assert_eq!(roster.get("alice").unwrap().rank, "Officer");
    }

    #[test]
    fn test_source_path() {
        let roster = Roster::from_members("a.txt", Vec::new()).with_source_path("b.txt");
        assert_eq!(roster.source_path(), Path::new("b.txt"));
        assert!(roster.is_empty());
    }
}
