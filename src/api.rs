//! Typed views of the PokeAPI documents.
//!
//! Only the fields the pokedex renders are modelled; everything else in the
//! upstream JSON is ignored. Each payload knows how to fill the matching
//! record, so standalone lookups and expanded sub-lookups share one mapping.

use schema::{AbilityRecord, MoveRecord, PokemonRecord, StatRecord};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Language tag of the effect entries we keep.
pub const ENGLISH: &str = "en";

/// Separator for name lists rendered on a single line.
pub const LIST_SEPARATOR: &str = ", ";

/// Deserialize a raw response into one of the payload types below.
pub fn parse<T: DeserializeOwned>(raw: &Value) -> Result<T, serde_json::Error> {
    T::deserialize(raw)
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}

impl EffectEntry {
    fn is_english(&self) -> bool {
        self.language.name == ENGLISH
    }
}

/// Concatenate the chosen text of every English entry, in API order.
fn english_text(entries: &[EffectEntry], pick: fn(&EffectEntry) -> &str) -> String {
    entries
        .iter()
        .filter(|entry| entry.is_english())
        .map(pick)
        .collect()
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(LIST_SEPARATOR)
}

// --- Pokemon ---

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonTypeSlot {
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonAbility {
    pub ability: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionGroupDetail {
    pub level_learned_at: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonMove {
    #[serde(rename = "move")]
    pub move_: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

impl PokemonMove {
    /// Level from the first version group the API lists, if any.
    pub fn level_learned_at(&self) -> Option<u32> {
        self.version_group_details
            .first()
            .map(|detail| detail.level_learned_at)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonPayload {
    pub name: String,
    pub id: u32,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
    #[serde(default)]
    pub moves: Vec<PokemonMove>,
}

impl PokemonPayload {
    /// Fill identity, measurements and types. Stats, abilities and moves are
    /// left to the caller, which decides between plain and expanded text.
    pub fn fill_base(&self, record: &mut PokemonRecord) {
        record.name = self.name.clone();
        record.id = self.id;
        record.height = self.height;
        record.weight = self.weight;
        record.types = join_names(self.types.iter().map(|slot| slot.type_.name.as_str()));
    }

    /// Fill every field with the plain (name-only) text.
    pub fn fill_plain(&self, record: &mut PokemonRecord) {
        self.fill_base(record);
        record.stats = self.stat_lines();
        record.abilities = self.ability_lines();
        record.moves = self.move_lines();
    }

    pub fn stat_lines(&self) -> String {
        self.stats
            .iter()
            .map(|s| format!("{}: {}\n", s.stat.name, s.base_stat))
            .collect()
    }

    pub fn ability_lines(&self) -> String {
        self.abilities
            .iter()
            .map(|a| format!("{}\n", a.ability.name))
            .collect()
    }

    pub fn move_lines(&self) -> String {
        self.moves
            .iter()
            .map(|m| {
                let level = m
                    .level_learned_at()
                    .map_or("---".to_string(), |level| level.to_string());
                format!("Move name: {}, Level acquired: {}\n", m.move_.name, level)
            })
            .collect()
    }

    pub fn stat_names(&self) -> Vec<String> {
        self.stats.iter().map(|s| s.stat.name.clone()).collect()
    }

    pub fn ability_names(&self) -> Vec<String> {
        self.abilities.iter().map(|a| a.ability.name.clone()).collect()
    }

    pub fn move_names(&self) -> Vec<String> {
        self.moves.iter().map(|m| m.move_.name.clone()).collect()
    }
}

// --- Ability ---

#[derive(Debug, Clone, Deserialize)]
pub struct AbilityPokemon {
    pub pokemon: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilityPayload {
    pub name: String,
    pub id: u32,
    pub generation: NamedResource,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    pub pokemon: Vec<AbilityPokemon>,
}

impl AbilityPayload {
    pub fn fill(&self, record: &mut AbilityRecord) {
        record.name = self.name.clone();
        record.id = self.id;
        record.generation = self.generation.name.clone();
        record.effect = english_text(&self.effect_entries, |entry| entry.effect.as_str());
        record.pokemon = join_names(self.pokemon.iter().map(|p| p.pokemon.name.as_str()));
    }
}

// --- Move ---

#[derive(Debug, Clone, Deserialize)]
pub struct MovePayload {
    pub name: String,
    pub id: u32,
    pub generation: NamedResource,
    pub accuracy: Option<u32>,
    pub power: Option<u32>,
    pub pp: Option<u32>,
    #[serde(rename = "type")]
    pub type_: NamedResource,
    pub damage_class: NamedResource,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

impl MovePayload {
    pub fn fill(&self, record: &mut MoveRecord) {
        record.name = self.name.clone();
        record.id = self.id;
        record.generation = self.generation.name.clone();
        record.accuracy = self.accuracy;
        record.power = self.power;
        record.pp = self.pp;
        record.damage_type = self.type_.name.clone();
        record.damage_class = self.damage_class.name.clone();
        record.effect = english_text(&self.effect_entries, |entry| entry.short_effect.as_str());
    }
}

// --- Stat ---

#[derive(Debug, Clone, Deserialize)]
pub struct StatPayload {
    pub name: String,
    pub id: u32,
    #[serde(default)]
    pub is_battle_only: bool,
    pub move_damage_class: Option<NamedResource>,
}

impl StatPayload {
    pub fn fill(&self, record: &mut StatRecord) {
        record.name = self.name.clone();
        record.id = self.id;
        record.is_battle_only = self.is_battle_only;
        record.move_damage_class = self.move_damage_class.as_ref().map(|c| c.name.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bulbasaur() -> Value {
        json!({
            "name": "bulbasaur",
            "id": 1,
            "height": 7,
            "weight": 69,
            "base_experience": 64,
            "stats": [
                { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
                { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } }
            ],
            "types": [
                { "slot": 1, "type": { "name": "grass", "url": "" } },
                { "slot": 2, "type": { "name": "poison", "url": "" } }
            ],
            "abilities": [
                { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 },
                { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true, "slot": 3 }
            ],
            "moves": [
                { "move": { "name": "tackle", "url": "" },
                  "version_group_details": [ { "level_learned_at": 1 }, { "level_learned_at": 3 } ] },
                { "move": { "name": "cut", "url": "" }, "version_group_details": [] }
            ]
        })
    }

    #[test]
    fn test_plain_pokemon_fill_keeps_api_order() {
        let payload: PokemonPayload = parse(&bulbasaur()).unwrap();
        let mut record = PokemonRecord::default();
        payload.fill_plain(&mut record);

        assert_eq!(record.name, "bulbasaur");
        assert_eq!(record.id, 1);
        assert_eq!(record.height, 7);
        assert_eq!(record.weight, 69);
        assert_eq!(record.types, "grass, poison");
        assert_eq!(record.stats, "hp: 45\nattack: 49\n");
        // Hidden abilities are listed by name only, like any other
        assert_eq!(record.abilities, "overgrow\nchlorophyll\n");
        assert_eq!(
            record.moves,
            "Move name: tackle, Level acquired: 1\nMove name: cut, Level acquired: ---\n"
        );
    }

    #[test]
    fn test_sub_entity_names() {
        let payload: PokemonPayload = parse(&bulbasaur()).unwrap();
        assert_eq!(payload.stat_names(), vec!["hp", "attack"]);
        assert_eq!(payload.ability_names(), vec!["overgrow", "chlorophyll"]);
        assert_eq!(payload.move_names(), vec!["tackle", "cut"]);
    }

    #[test]
    fn test_ability_keeps_only_english_effect() {
        let raw = json!({
            "name": "stench",
            "id": 1,
            "generation": { "name": "generation-iii", "url": "" },
            "effect_entries": [
                { "effect": "Mit jedem Treffer...", "short_effect": "kurz", "language": { "name": "de", "url": "" } },
                { "effect": "Has a 10% chance of making target flinch.", "short_effect": "short", "language": { "name": "en", "url": "" } }
            ],
            "pokemon": [
                { "is_hidden": false, "slot": 1, "pokemon": { "name": "gloom", "url": "" } },
                { "is_hidden": true, "slot": 3, "pokemon": { "name": "grimer", "url": "" } }
            ]
        });

        let payload: AbilityPayload = parse(&raw).unwrap();
        let mut record = AbilityRecord::default();
        payload.fill(&mut record);

        assert_eq!(record.generation, "generation-iii");
        assert_eq!(record.effect, "Has a 10% chance of making target flinch.");
        assert_eq!(record.pokemon, "gloom, grimer");
    }

    #[test]
    fn test_move_uses_english_short_effect_and_nullable_numbers() {
        let raw = json!({
            "name": "growl",
            "id": 45,
            "generation": { "name": "generation-i", "url": "" },
            "accuracy": 100,
            "power": null,
            "pp": 40,
            "type": { "name": "normal", "url": "" },
            "damage_class": { "name": "status", "url": "" },
            "effect_entries": [
                { "effect": "Senkt den Angriff.", "short_effect": "Senkt Angriff.", "language": { "name": "de", "url": "" } },
                { "effect": "Lowers the target's Attack by one stage.", "short_effect": "Lowers Attack.", "language": { "name": "en", "url": "" } }
            ]
        });

        let payload: MovePayload = parse(&raw).unwrap();
        let mut record = MoveRecord::default();
        payload.fill(&mut record);

        assert_eq!(record.accuracy, Some(100));
        assert_eq!(record.power, None);
        assert_eq!(record.pp, Some(40));
        assert_eq!(record.damage_type, "normal");
        assert_eq!(record.damage_class, "status");
        assert_eq!(record.effect, "Lowers Attack.");
    }

    #[test]
    fn test_stat_with_and_without_damage_class() {
        let attack: StatPayload = parse(&json!({
            "name": "attack",
            "id": 2,
            "is_battle_only": false,
            "move_damage_class": { "name": "physical", "url": "" }
        }))
        .unwrap();
        let hp: StatPayload = parse(&json!({
            "name": "hp",
            "id": 1,
            "is_battle_only": false,
            "move_damage_class": null
        }))
        .unwrap();

        let mut record = StatRecord::default();
        attack.fill(&mut record);
        assert_eq!(record.move_damage_class.as_deref(), Some("physical"));

        hp.fill(&mut record);
        assert_eq!(record.name, "hp");
        assert_eq!(record.move_damage_class, None);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let raw = json!({ "name": "pikachu" });
        assert!(parse::<PokemonPayload>(&raw).is_err());
    }
}
