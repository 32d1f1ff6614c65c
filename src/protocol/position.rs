//! Position notation.
//!
//! A position is written on one line as `<turn>/<territories>`, where the
//! territory section is a comma-separated list of `name@faction:troops`
//! entries in map order:
//!
//! ```text
//! 1/Brazil@blue:4,Argentina@red:3,Chile@green:2
//! ```
//!
//! Names may contain spaces but none of `/`, `,`, `@` or `:`.

use crate::board::{Faction, Territory};

/// Characters that delimit the notation and cannot appear in names.
pub const RESERVED: [char; 4] = ['/', ',', '@', ':'];

/// The classic five-territory opening, each territory held by its own color.
pub const DEFAULT_POSITION: &str =
    "1/Brazil@blue:4,Argentina@red:3,Chile@green:2,Peru@yellow:3,Colombia@purple:3";

/// Errors that can occur while parsing a position string.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("expected 2 sections separated by '/', got {0}")]
    WrongSectionCount(usize),

    #[error("invalid turn: '{0}'")]
    InvalidTurn(String),

    #[error("position has no territories")]
    NoTerritories,

    #[error("invalid territory entry: '{0}'")]
    InvalidEntry(String),

    #[error("territory entry has an empty name: '{0}'")]
    EmptyName(String),

    #[error("territory entry has an empty faction: '{0}'")]
    EmptyFaction(String),

    #[error("invalid troop count in entry: '{0}'")]
    InvalidTroops(String),

    #[error("duplicate territory '{0}'")]
    DuplicateTerritory(String),

    #[error("'{0}' contains a reserved character")]
    ReservedCharacter(String),
}

/// A decoded position: the turn counter and the ordered territories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub turn: u32,
    pub territories: Vec<Territory>,
}

/// Parses a position string.
pub fn parse_position(s: &str) -> Result<Position, PositionError> {
    let sections: Vec<&str> = s.trim().split('/').collect();
    if sections.len() != 2 {
        return Err(PositionError::WrongSectionCount(sections.len()));
    }

    let turn = match sections[0].trim().parse::<u32>() {
        Ok(t) if t >= 1 => t,
        _ => return Err(PositionError::InvalidTurn(sections[0].to_string())),
    };

    let body = sections[1].trim();
    if body.is_empty() {
        return Err(PositionError::NoTerritories);
    }

    let mut territories: Vec<Territory> = Vec::new();
    for entry in body.split(',') {
        let territory = parse_entry(entry.trim())?;
        if territories.iter().any(|t| t.name == territory.name) {
            return Err(PositionError::DuplicateTerritory(territory.name));
        }
        territories.push(territory);
    }

    Ok(Position { turn, territories })
}

/// Parses one `name@faction:troops` entry.
fn parse_entry(entry: &str) -> Result<Territory, PositionError> {
    let (name, rest) = entry
        .split_once('@')
        .ok_or_else(|| PositionError::InvalidEntry(entry.to_string()))?;
    let (faction, troops) = rest
        .split_once(':')
        .ok_or_else(|| PositionError::InvalidEntry(entry.to_string()))?;

    let name = name.trim();
    let faction = faction.trim();
    if name.is_empty() {
        return Err(PositionError::EmptyName(entry.to_string()));
    }
    if faction.is_empty() {
        return Err(PositionError::EmptyFaction(entry.to_string()));
    }
    if faction.contains('@') {
        return Err(PositionError::InvalidEntry(entry.to_string()));
    }
    let troops = troops
        .trim()
        .parse::<u32>()
        .map_err(|_| PositionError::InvalidTroops(entry.to_string()))?;

    Ok(Territory::new(name, Faction::new(faction), troops))
}

/// Checks that every name and faction can be written without ambiguity.
pub fn check_encodable(territories: &[Territory]) -> Result<(), PositionError> {
    for t in territories {
        for field in [t.name.as_str(), t.owner.as_str()] {
            if field.contains(&RESERVED[..]) {
                return Err(PositionError::ReservedCharacter(field.to_string()));
            }
        }
    }
    Ok(())
}

/// Encodes a turn and territory list into canonical position notation.
///
/// Nothing is escaped: names or factions holding a [`RESERVED`] character
/// produce a string that does not parse back to the same territories. Run
/// [`check_encodable`] first on territories that did not come from
/// [`parse_position`].
pub fn encode_position(turn: u32, territories: &[Territory]) -> String {
    let mut result = String::with_capacity(16 + territories.len() * 24);
    result.push_str(&turn.to_string());
    result.push('/');
    for (i, t) in territories.iter().enumerate() {
        if i > 0 {
            result.push(',');
        }
        result.push_str(&format!("{}@{}:{}", t.name, t.owner, t.troops));
    }
    result
}
