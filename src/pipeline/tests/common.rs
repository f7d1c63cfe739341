use crate::fetcher::ApiFetcher;
use async_trait::async_trait;
use schema::EntityKind;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory stand-in for the PokeAPI.
///
/// # Example
/// ```
/// let fetcher = FakeFetcher::new()
///     .with(EntityKind::Pokemon, "pikachu", pokemon_doc("pikachu", 25, &[], &["electric"], &["static"], &[]))
///     .with_delay(EntityKind::Pokemon, "pikachu", Duration::from_millis(20));
/// ```
#[derive(Default)]
pub struct FakeFetcher {
    documents: HashMap<(EntityKind, String), Value>,
    delays: HashMap<(EntityKind, String), Duration>,
    calls: Mutex<Vec<(EntityKind, String)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `document` for `{kind}/{identifier}`. Anything not registered is a failed lookup.
    pub fn with(mut self, kind: EntityKind, identifier: &str, document: Value) -> Self {
        self.documents.insert((kind, identifier.to_string()), document);
        self
    }

    /// Make the lookup for `{kind}/{identifier}` take `delay` before settling.
    pub fn with_delay(mut self, kind: EntityKind, identifier: &str, delay: Duration) -> Self {
        self.delays.insert((kind, identifier.to_string()), delay);
        self
    }

    /// Every lookup made so far, in the order they were started.
    pub fn calls(&self) -> Vec<(EntityKind, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// The most lookups that were ever in flight at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiFetcher for FakeFetcher {
    async fn fetch(&self, kind: EntityKind, identifier: &str) -> Option<Value> {
        let key = (kind, identifier.to_string());
        self.calls.lock().unwrap().push(key.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Always suspend at least once so concurrent callers interleave
        match self.delays.get(&key) {
            Some(delay) => tokio::time::sleep(*delay).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.documents.get(&key).cloned()
    }
}

fn named(name: &str) -> Value {
    json!({ "name": name, "url": "" })
}

/// A pokemon document. `stats` pairs a stat name with its base value; each
/// move is learned at level 1.
pub fn pokemon_doc(
    name: &str,
    id: u32,
    stats: &[(&str, u32)],
    types: &[&str],
    abilities: &[&str],
    moves: &[&str],
) -> Value {
    json!({
        "name": name,
        "id": id,
        "height": 7,
        "weight": 69,
        "stats": stats.iter().map(|(stat, base)| json!({ "base_stat": base, "effort": 0, "stat": named(stat) })).collect::<Vec<_>>(),
        "types": types.iter().enumerate().map(|(i, t)| json!({ "slot": i + 1, "type": named(t) })).collect::<Vec<_>>(),
        "abilities": abilities.iter().enumerate().map(|(i, a)| json!({ "ability": named(a), "is_hidden": false, "slot": i + 1 })).collect::<Vec<_>>(),
        "moves": moves.iter().map(|m| json!({ "move": named(m), "version_group_details": [ { "level_learned_at": 1 } ] })).collect::<Vec<_>>(),
    })
}

/// An ability document with one effect entry per `(language, text)` pair.
pub fn ability_doc(name: &str, id: u32, effects: &[(&str, &str)], pokemon: &[&str]) -> Value {
    json!({
        "name": name,
        "id": id,
        "generation": named("generation-iii"),
        "effect_entries": effects.iter().map(|(lang, text)| json!({ "effect": text, "short_effect": "", "language": named(lang) })).collect::<Vec<_>>(),
        "pokemon": pokemon.iter().map(|p| json!({ "is_hidden": false, "slot": 1, "pokemon": named(p) })).collect::<Vec<_>>(),
    })
}

/// A move document with one short effect per `(language, text)` pair.
pub fn move_doc(name: &str, id: u32, power: Option<u32>, short_effects: &[(&str, &str)]) -> Value {
    json!({
        "name": name,
        "id": id,
        "generation": named("generation-i"),
        "accuracy": 100,
        "power": power,
        "pp": 35,
        "type": named("normal"),
        "damage_class": named("physical"),
        "effect_entries": short_effects.iter().map(|(lang, text)| json!({ "effect": "", "short_effect": text, "language": named(lang) })).collect::<Vec<_>>(),
    })
}

pub fn stat_doc(name: &str, id: u32, damage_class: Option<&str>) -> Value {
    json!({
        "name": name,
        "id": id,
        "is_battle_only": false,
        "move_damage_class": damage_class.map(named),
    })
}

pub fn identifiers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
