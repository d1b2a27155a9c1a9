// Item stack module
//
// This module provides the item stack value type and the contracts items
// implement to take part in stacking, including:
// - The `Item` trait and its optional capabilities
// - Structured metadata used when comparing stacks
// - Data-driven item definitions
// - Item stacks for quantity management

pub mod capability;
pub mod defaults;
pub mod definition;
pub mod error;
pub mod metadata;
pub mod stack;

// Re-export main types for convenient access
pub use capability::{
    format_values, Item, ItemIdentity, MaxCounter, MetadataHolder, Nameable, Weapon,
};
pub use defaults::{DEFAULT_ATTACK_DAMAGE, DEFAULT_MAX_COUNT};
pub use definition::ItemDefinition;
pub use error::StackError;
pub use metadata::Metadata;
pub use stack::Stack;
