use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The kinds of entity the upstream API can be asked about.
///
/// The lowercase string form doubles as the API path segment, so
/// `EntityKind::Move` is fetched from `{base}/move/{identifier}`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Pokemon,
    Ability,
    Move,
    /// Only reached through expanded Pokemon resolution.
    Stat,
}

impl EntityKind {
    /// Whether a user may request this kind directly from the command line.
    pub fn is_user_selectable(self) -> bool {
        !matches!(self, EntityKind::Stat)
    }
}
