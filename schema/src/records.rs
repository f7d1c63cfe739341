use crate::entity_kind::EntityKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for numeric fields the API reports as `null`.
const MISSING: &str = "---";

fn or_missing(value: Option<u32>) -> String {
    value.map_or(MISSING.to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    pub id: u32,
    pub height: u32,
    pub weight: u32,
    pub types: String,     // Comma-joined, in API order
    pub stats: String,     // One line (or one expanded block) per stat
    pub abilities: String, // One line (or one expanded block) per ability
    pub moves: String,     // One line (or one expanded block) per move
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRecord {
    pub name: String,
    pub id: u32,
    pub generation: String,
    pub effect: String,  // English entries only
    pub pokemon: String, // Comma-joined names of Pokemon that can have it
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    pub id: u32,
    pub generation: String,
    pub accuracy: Option<u32>,
    pub power: Option<u32>,
    pub pp: Option<u32>,
    pub damage_type: String,
    pub damage_class: String,
    pub effect: String, // English short effect only
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    pub name: String,
    pub id: u32,
    pub is_battle_only: bool,
    pub move_damage_class: Option<String>,
}

/// One populated entity, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    Pokemon(PokemonRecord),
    Ability(AbilityRecord),
    Move(MoveRecord),
    Stat(StatRecord),
}

impl Record {
    /// Allocate an empty record of the variant matching `kind`.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Pokemon => Record::Pokemon(PokemonRecord::default()),
            EntityKind::Ability => Record::Ability(AbilityRecord::default()),
            EntityKind::Move => Record::Move(MoveRecord::default()),
            EntityKind::Stat => Record::Stat(StatRecord::default()),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Pokemon(_) => EntityKind::Pokemon,
            Record::Ability(_) => EntityKind::Ability,
            Record::Move(_) => EntityKind::Move,
            Record::Stat(_) => EntityKind::Stat,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Record::Pokemon(r) => &r.name,
            Record::Ability(r) => &r.name,
            Record::Move(r) => &r.name,
            Record::Stat(r) => &r.name,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Record::Pokemon(r) => r.id,
            Record::Ability(r) => r.id,
            Record::Move(r) => r.id,
            Record::Stat(r) => r.id,
        }
    }
}

impl fmt::Display for PokemonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Weight: {}", self.weight)?;
        writeln!(f, "Types: {}", self.types)?;
        writeln!(f)?;

        // Each blob already terminates its own lines
        write!(f, "Stats:\n------\n{}\n", self.stats)?;
        write!(f, "Abilities:\n------\n{}\n", self.abilities)?;
        write!(f, "Moves:\n------\n{}", self.moves)
    }
}

impl fmt::Display for AbilityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Generation: {}", self.generation)?;
        writeln!(f, "Effect: {}", self.effect)?;
        writeln!(f, "Pokemon: {}", self.pokemon)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Generation: {}", self.generation)?;
        writeln!(f, "Accuracy: {}", or_missing(self.accuracy))?;
        writeln!(f, "PP: {}", or_missing(self.pp))?;
        writeln!(f, "Power: {}", or_missing(self.power))?;
        writeln!(f, "Type: {}", self.damage_type)?;
        writeln!(f, "Damage Class: {}", self.damage_class)?;
        writeln!(f, "Effect (Short): {}", self.effect)
    }
}

impl fmt::Display for StatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Is Battle Only: {}", self.is_battle_only)?;
        writeln!(
            f,
            "Move Damage Class: {}",
            self.move_damage_class.as_deref().unwrap_or(MISSING)
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Pokemon(r) => fmt::Display::fmt(r, f),
            Record::Ability(r) => fmt::Display::fmt(r, f),
            Record::Move(r) => fmt::Display::fmt(r, f),
            Record::Stat(r) => fmt::Display::fmt(r, f),
        }
    }
}
