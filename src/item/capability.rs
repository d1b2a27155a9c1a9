//! The item contract and its optional capabilities
//!
//! A stack never knows the concrete type of the item it holds. Every item
//! must report its identity; anything beyond that is an opt-in capability,
//! exposed through one of the `as_*` accessors on [`Item`]. An item that
//! doesn't override an accessor simply doesn't have that capability, and the
//! stack falls back to the value in `defaults`.

use super::metadata::Metadata;
use std::fmt;
use std::sync::Arc;

/// Canonical identity of an item type: numeric id plus variant (damage/meta)
///
/// Two items with the same identity are the same kind of item, though they
/// may still differ in structured metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemIdentity {
    pub id: i32,
    pub variant: i16,
}

impl ItemIdentity {
    pub const fn new(id: i32, variant: i16) -> Self {
        ItemIdentity { id, variant }
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.variant)
    }
}

/// An item that can be held by a stack
///
/// Items are shared between stacks behind an `Arc`, so they must be
/// immutable and thread-safe.
pub trait Item: fmt::Debug + Send + Sync {
    /// Returns the identity used to decide whether two items are the same kind
    fn encode_item(&self) -> ItemIdentity;

    /// Overrides the maximum stack size
    fn as_max_counter(&self) -> Option<&dyn MaxCounter> {
        None
    }

    /// Overrides melee damage
    fn as_weapon(&self) -> Option<&dyn Weapon> {
        None
    }

    /// Lets a custom name change the item itself
    fn as_nameable(&self) -> Option<&dyn Nameable> {
        None
    }

    /// Exposes structured metadata that takes part in stack comparison
    fn as_metadata_holder(&self) -> Option<&dyn MetadataHolder> {
        None
    }
}

/// Items whose stacks hold something other than the default 64
pub trait MaxCounter {
    fn max_count(&self) -> u32;
}

/// Items that deal more (or less) than the default melee damage
pub trait Weapon {
    fn attack_damage(&self) -> f32;
}

/// Items that produce a renamed variant of themselves
///
/// The values are the same ones passed to `Stack::with_custom_name`; the
/// item decides how to format them (usually with `format_values`).
pub trait Nameable {
    fn with_name(&self, values: &[&dyn fmt::Display]) -> Arc<dyn Item>;
}

/// Items carrying structured metadata
pub trait MetadataHolder {
    fn encode_metadata(&self) -> Metadata;
}

/// Formats values the way custom names are stored
///
/// The text forms of the values are joined with single spaces. Nothing is
/// trimmed: a line break the caller passes in is kept.
///
/// # Example
/// ```
/// use item_stack::item::format_values;
///
/// assert_eq!(format_values(&[&"Hello", &"World"]), "Hello World");
/// assert_eq!(format_values(&[&"Level", &5, &"\n"]), "Level 5 \n");
/// assert_eq!(format_values(&[]), "");
/// ```
pub fn format_values(values: &[&dyn fmt::Display]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
