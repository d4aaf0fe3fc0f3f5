//! Guild member model
//!
//! A [`MemberRecord`] is one line of a guild dump. Its identity is the
//! case-insensitive name; every other field is descriptive and only the
//! alt flag, class and public note are interpreted by the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character class as printed in a guild dump
///
/// Unrecognised text is kept verbatim in [`CharacterClass::Other`] so that
/// parsing never fails and the value survives a rewrite of the dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CharacterClass {
    Bard,
    Beastlord,
    Berserker,
    Cleric,
    Druid,
    Enchanter,
    Magician,
    Monk,
    Necromancer,
    Paladin,
    Ranger,
    Rogue,
    ShadowKnight,
    Shaman,
    Warrior,
    Wizard,
    Other(String),
}

impl CharacterClass {
    pub const KNOWN: [CharacterClass; 16] = [
        CharacterClass::Bard,
        CharacterClass::Beastlord,
        CharacterClass::Berserker,
        CharacterClass::Cleric,
        CharacterClass::Druid,
        CharacterClass::Enchanter,
        CharacterClass::Magician,
        CharacterClass::Monk,
        CharacterClass::Necromancer,
        CharacterClass::Paladin,
        CharacterClass::Ranger,
        CharacterClass::Rogue,
        CharacterClass::ShadowKnight,
        CharacterClass::Shaman,
        CharacterClass::Warrior,
        CharacterClass::Wizard,
    ];

    /// Name as it appears in a dump
    pub fn as_str(&self) -> &str {
        match self {
            CharacterClass::Bard => "Bard",
            CharacterClass::Beastlord => "Beastlord",
            CharacterClass::Berserker => "Berserker",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Enchanter => "Enchanter",
            CharacterClass::Magician => "Magician",
            CharacterClass::Monk => "Monk",
            CharacterClass::Necromancer => "Necromancer",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::ShadowKnight => "Shadow Knight",
            CharacterClass::Shaman => "Shaman",
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Wizard => "Wizard",
            CharacterClass::Other(raw) => raw,
        }
    }

    /// Parse a class name, falling back to [`CharacterClass::Other`]
    pub fn parse(raw: &str) -> Self {
        let wanted = class_key(raw);
        Self::KNOWN
            .iter()
            .find(|class| class_key(class.as_str()) == wanted)
            .cloned()
            .unwrap_or_else(|| CharacterClass::Other(raw.trim().to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CharacterClass::Other(_))
    }

    /// Compare against a user-supplied identifier, ignoring case and spaces
    pub fn matches(&self, identifier: &str) -> bool {
        let wanted = class_key(identifier);
        !wanted.is_empty() && class_key(self.as_str()) == wanted
    }
}

/// Normalised form used for class comparisons
fn class_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Default for CharacterClass {
    fn default() -> Self {
        CharacterClass::Other(String::new())
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CharacterClass {
    fn from(raw: String) -> Self {
        CharacterClass::parse(&raw)
    }
}

impl From<CharacterClass> for String {
    fn from(class: CharacterClass) -> Self {
        class.as_str().to_string()
    }
}

/// One guild member as printed in a dump
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub level: u32,
    pub class: CharacterClass,
    pub rank: String,
    pub alt: bool,
    pub last_online: String,
    pub zone: String,
    pub public_note: String,
    pub personal_note: String,
    pub tribute_status: String,
    pub trophy_tribute_status: String,
    pub donations: String,
    pub last_donation: String,
    /// Dump columns past the ones above, carried verbatim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_fields: Vec<String>,
}

impl MemberRecord {
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            name: name.into(),
            class,
            ..Default::default()
        }
    }

    /// Case-insensitive identity used as the roster key
    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    pub fn is_main(&self) -> bool {
        !self.alt
    }

    /// Same member, regardless of any other field
    pub fn same_member(&self, other: &MemberRecord) -> bool {
        self.key() == other.key()
    }
}

/// Roster key for a character name
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
