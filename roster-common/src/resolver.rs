//! Alt to main resolution from public notes
//!
//! Guilds mark alts by writing the owner's main in the alt's public note,
//! e.g. `Grimjaw's alt` or `Grimjaw 2nd main`. The first word of such a
//! note names the main.
//!
//! Resolution is a single hop: when the named character is itself an alt,
//! it is returned as-is rather than followed further.

use tracing::debug;

use crate::member::MemberRecord;
use crate::roster::Roster;
use crate::{Error, Result};

/// Either marker makes a public note an alt annotation
const ALT_MARKERS: [&str; 2] = ["nd main", " alt"];

const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Find the main character of `member`
///
/// Mains resolve to themselves. For alts the public note is inspected and
/// the first word is looked up in `roster`.
pub fn find_main<'a>(roster: &'a Roster, member: &'a MemberRecord) -> Result<&'a MemberRecord> {
    if member.is_main() {
        return Ok(member);
    }

    let candidate = candidate_main_name(member)?;
    debug!("{} is an alt, looking up main {}", member.name, candidate);

    roster
        .get(&candidate)
        .ok_or(Error::MemberNotFound(candidate))
}

/// Extract the main's name from an alt's public note
pub fn candidate_main_name(member: &MemberRecord) -> Result<String> {
    let note = member.public_note.as_str();
    if note.is_empty() {
        return Err(Error::NoAnnotation {
            name: member.name.clone(),
        });
    }

    let lowered = note.to_lowercase();
    if !ALT_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return Err(Error::AmbiguousAnnotation {
            name: member.name.clone(),
            note: note.to_string(),
        });
    }

    let tokens: Vec<&str> = note.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(Error::MalformedAnnotation {
            name: member.name.clone(),
            note: note.to_string(),
        });
    }

    let cleaned: String = tokens[0].chars().filter(|c| !APOSTROPHES.contains(c)).collect();
    Ok(title_case(&cleaned))
}

/// Upper-case the first letter of each word, lower-case the rest
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::CharacterClass;

    fn main_char(name: &str) -> MemberRecord {
        MemberRecord::new(name, CharacterClass::Warrior)
    }

    fn alt_char(name: &str, note: &str) -> MemberRecord {
        let mut m = MemberRecord::new(name, CharacterClass::Cleric);
        m.alt = true;
        m.public_note = note.to_string();
        m
    }

    #[test]
    fn test_main_resolves_to_itself() {
        let roster = Roster::default();
        let member = main_char("Alice");
        assert_eq!(find_main(&roster, &member).unwrap(), &member);
    }

    #[test]
    fn test_alt_without_note() {
        let roster = Roster::default();
        let err = find_main(&roster, &alt_char("Bob", "")).unwrap_err();
        assert!(matches!(err, Error::NoAnnotation { .. }));
    }

    #[test]
    fn test_alt_with_unrelated_note() {
        let roster = Roster::default();
        let err = find_main(&roster, &alt_char("Bob", "Raid healer")).unwrap_err();
        assert!(matches!(err, Error::AmbiguousAnnotation { .. }));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        assert!(candidate_main_name(&alt_char("Bob", "Alice 2ND MAIN")).is_ok());
        assert!(candidate_main_name(&alt_char("Bob", "Alice's ALT")).is_ok());
        // "alt" must follow a space
        assert!(candidate_main_name(&alt_char("Bob", "Alice'salt")).is_err());
    }

    #[test]
    fn test_single_token_note() {
        let err = candidate_main_name(&alt_char("Bob", " alt")).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotation { .. }));
    }

    #[test]
    fn test_possessive_first_token_is_cleaned() {
        let name = candidate_main_name(&alt_char("Bob", "grimJAW's alt")).unwrap();
        assert_eq!(name, "Grimjaws");
    }

    #[test]
    fn test_first_token_is_taken_verbatim() {
        // The heuristic names the first word, whatever it is
        let name = candidate_main_name(&alt_char("Bob", "2nd Main of Grimjaw")).unwrap();
        assert_eq!(name, "2nd");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("aLICE"), "Alice");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_alt_resolves_to_named_main() {
        let roster = Roster::from_members(
            "dump.txt",
            vec![main_char("Alice"), alt_char("Bob", "Alice 2nd main")],
        );
        let bob = roster.get("bob").unwrap();
        assert_eq!(find_main(&roster, bob).unwrap().name, "Alice");
    }

    #[test]
    fn test_missing_main() {
        let roster = Roster::from_members("dump.txt", vec![alt_char("Bob", "Carol's alt")]);
        let bob = roster.get("bob").unwrap();
        let err = find_main(&roster, bob).unwrap_err();
        assert!(matches!(err, Error::MemberNotFound(ref name) if name == "Carols"));
    }

    #[test]
    fn test_resolution_is_single_hop() {
        let roster = Roster::from_members(
            "dump.txt",
            vec![
                main_char("Alice"),
                alt_char("Bob", "Carol's alt"),
                alt_char("Carols", "Alice's alt"),
            ],
        );
        let bob = roster.get("bob").unwrap();
        let found = find_main(&roster, bob).unwrap();
        assert_eq!(found.name, "Carols");
        assert!(found.alt);
    }
}
