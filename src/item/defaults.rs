//! Fallback values used when an item does not override a behavior
//!
//! Items opt into overrides through capabilities (see `capability`); every
//! stack accessor that dispatches on a capability falls back to one of these.

/// Maximum stack size for items without a `MaxCounter` capability
pub const DEFAULT_MAX_COUNT: u32 = 64;

/// Melee damage for items without a `Weapon` capability
pub const DEFAULT_ATTACK_DAMAGE: f32 = 2.0;
