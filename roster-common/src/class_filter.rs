//! Class based member selection

use crate::member::{CharacterClass, MemberRecord};
use crate::roster::Roster;

/// Members whose class matches any of `identifiers`, in roster order
///
/// Identifiers are compared ignoring case and spaces. An identifier that
/// names no class simply matches nothing.
pub fn filter_by_class<'a, S>(roster: &'a Roster, identifiers: &[S]) -> Vec<&'a MemberRecord>
where
    S: AsRef<str>,
{
    roster
        .iter()
        .filter(|member| identifiers.iter().any(|id| member.class.matches(id.as_ref())))
        .collect()
}

/// True when `identifier` names one of the known classes
pub fn is_known_class(identifier: &str) -> bool {
    CharacterClass::parse(identifier).is_known()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::from_members(
            "dump.txt",
            vec![
                MemberRecord::new("Alice", CharacterClass::Cleric),
                MemberRecord::new("Bob", CharacterClass::Warrior),
                MemberRecord::new("Carol", CharacterClass::Cleric),
                MemberRecord::new("Dave", CharacterClass::ShadowKnight),
            ],
        )
    }

    fn names(members: Vec<&MemberRecord>) -> Vec<&str> {
        members.into_iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_single_class() {
        let roster = roster();
        assert_eq!(names(filter_by_class(&roster, &["cleric"])), vec!["Alice", "Carol"]);
    }

    #[test]
    fn test_multiple_classes_keep_roster_order() {
        let roster = roster();
        let found = filter_by_class(&roster, &["shadowknight", "CLERIC"]);
        assert_eq!(names(found), vec!["Alice", "Carol", "Dave"]);
    }

    #[test]
    fn test_empty_roster_and_unknown_class() {
        let empty = Roster::default();
        assert!(filter_by_class(&empty, &["Cleric"]).is_empty());
        assert!(filter_by_class(&roster(), &["Jester"]).is_empty());
        assert!(filter_by_class::<&str>(&roster(), &[]).is_empty());
    }

    #[test]
    fn test_is_known_class() {
        assert!(is_known_class("wizard"));
        assert!(is_known_class("Shadow Knight"));
        assert!(!is_known_class("Jester"));
    }
}
