// Pokedex Schema - Shared record definitions
// This crate contains the entity kinds and the record types that the pokedex
// pipeline populates and renders, kept apart from the HTTP and pipeline code.

// Re-export the main types
pub use entity_kind::*;
pub use records::*;

pub mod entity_kind;
pub mod records;
