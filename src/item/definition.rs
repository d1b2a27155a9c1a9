use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

use super::capability::{
    format_values, Item, ItemIdentity, MaxCounter, MetadataHolder, Nameable, Weapon,
};
use super::defaults::{DEFAULT_ATTACK_DAMAGE, DEFAULT_MAX_COUNT};
use super::error::StackError;
use super::metadata::Metadata;

/// A data-driven item
///
/// Most items differ only in a handful of numbers, so rather than writing a
/// type per item they can be described in JSON and loaded at startup. Each
/// capability is exposed only when the matching field is set, so a plain
/// material defined this way behaves exactly like a hand-written item with
/// no capabilities.
///
/// # Example
/// ```
/// use item_stack::item::{Item, ItemDefinition};
///
/// let sword = ItemDefinition::from_json(r#"{
///     "id": 276,
///     "name": "Diamond Sword",
///     "max_stack_size": 1,
///     "attack_damage": 7.0
/// }"#).unwrap();
///
/// assert!(sword.as_weapon().is_some());
/// assert!(sword.as_nameable().is_none());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    /// Numeric item id
    pub id: i32,

    /// Variant (damage value / meta), 0 for most items
    #[serde(default)]
    pub variant: i16,

    /// Default display name
    pub name: String,

    /// Stack size override (1 = non-stackable)
    #[serde(default)]
    pub max_stack_size: Option<u32>,

    /// Melee damage override
    #[serde(default)]
    pub attack_damage: Option<f32>,

    /// Whether a custom name is written into the item's metadata
    #[serde(default)]
    pub renameable: bool,

    /// Structured metadata, given as plain JSON
    #[serde(default, deserialize_with = "metadata_from_json")]
    pub metadata: Option<Metadata>,

    /// Name set through renaming
    #[serde(skip)]
    pub display_name: Option<String>,
}

impl ItemDefinition {
    /// Creates a definition with no capabilities
    pub fn new(id: i32, variant: i16, name: impl Into<String>) -> Self {
        ItemDefinition {
            id,
            variant,
            name: name.into(),
            max_stack_size: None,
            attack_damage: None,
            renameable: false,
            metadata: None,
            display_name: None,
        }
    }

    /// Parses a definition from JSON
    pub fn from_json(json: &str) -> Result<Self, StackError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_max_stack_size(mut self, max_stack_size: u32) -> Self {
        self.max_stack_size = Some(max_stack_size);
        self
    }

    pub fn with_attack_damage(mut self, attack_damage: f32) -> Self {
        self.attack_damage = Some(attack_damage);
        self
    }

    pub fn renameable(mut self) -> Self {
        self.renameable = true;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns the name shown to players
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Wraps the definition for use in a stack
    pub fn into_item(self) -> Arc<dyn Item> {
        Arc::new(self)
    }
}

impl Item for ItemDefinition {
    fn encode_item(&self) -> ItemIdentity {
        ItemIdentity::new(self.id, self.variant)
    }

    fn as_max_counter(&self) -> Option<&dyn MaxCounter> {
        self.max_stack_size.map(|_| self as &dyn MaxCounter)
    }

    fn as_weapon(&self) -> Option<&dyn Weapon> {
        self.attack_damage.map(|_| self as &dyn Weapon)
    }

    fn as_nameable(&self) -> Option<&dyn Nameable> {
        self.renameable.then_some(self as &dyn Nameable)
    }

    fn as_metadata_holder(&self) -> Option<&dyn MetadataHolder> {
        if self.metadata.is_some() || self.display_name.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

impl MaxCounter for ItemDefinition {
    fn max_count(&self) -> u32 {
        self.max_stack_size.unwrap_or(DEFAULT_MAX_COUNT)
    }
}

impl Weapon for ItemDefinition {
    fn attack_damage(&self) -> f32 {
        self.attack_damage.unwrap_or(DEFAULT_ATTACK_DAMAGE)
    }
}

impl Nameable for ItemDefinition {
    fn with_name(&self, values: &[&dyn fmt::Display]) -> Arc<dyn Item> {
        let name = format_values(values);
        let mut renamed = self.clone();
        renamed.display_name = if name.is_empty() { None } else { Some(name) };
        Arc::new(renamed)
    }
}

impl MetadataHolder for ItemDefinition {
    fn encode_metadata(&self) -> Metadata {
        let metadata = self.metadata.clone().unwrap_or_else(Metadata::compound);

        let Some(name) = &self.display_name else {
            return metadata;
        };

        // Keep any other display keys the definition already carries.
        let display = match metadata.get("display") {
            Some(display @ Metadata::Compound(_)) => display.clone(),
            _ => Metadata::compound(),
        };
        metadata.with("display", display.with("Name", name.as_str()))
    }
}

fn metadata_from_json<'de, D>(deserializer: D) -> Result<Option<Metadata>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(Metadata::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_definition_has_no_capabilities() {
        let dirt = ItemDefinition::new(3, 0, "Dirt");

        assert_eq!(dirt.encode_item(), ItemIdentity::new(3, 0));
        assert!(dirt.as_max_counter().is_none());
        assert!(dirt.as_weapon().is_none());
        assert!(dirt.as_nameable().is_none());
        assert!(dirt.as_metadata_holder().is_none());
    }

    #[test]
    fn test_overrides_expose_capabilities() {
        let pearl = ItemDefinition::new(368, 0, "Ender Pearl").with_max_stack_size(16);
        let axe = ItemDefinition::new(279, 0, "Diamond Axe").with_attack_damage(6.0);

        assert_eq!(pearl.as_max_counter().map(|c| c.max_count()), Some(16));
        assert_eq!(axe.as_weapon().map(|w| w.attack_damage()), Some(6.0));
    }

    #[test]
    fn test_from_json_with_metadata() {
        let book = ItemDefinition::from_json(
            r#"{
                "id": 387,
                "name": "Written Book",
                "max_stack_size": 16,
                "metadata": { "title": "Notes", "pages": ["first", "second"] }
            }"#,
        )
        .unwrap();

        assert_eq!(book.variant, 0);
        assert!(!book.renameable);

        let metadata = book.as_metadata_holder().unwrap().encode_metadata();
        assert_eq!(metadata.get("title"), Some(&Metadata::from("Notes")));
        assert_eq!(metadata.get("pages"), Some(&Metadata::from(vec!["first", "second"])));
    }

    #[test]
    fn test_from_json_rejects_missing_id() {
        let result = ItemDefinition::from_json(r#"{ "name": "Nothing" }"#);
        assert!(matches!(result, Err(StackError::Definition(_))));
    }

    #[test]
    fn test_rename_writes_display_name() {
        let sword = ItemDefinition::new(267, 0, "Iron Sword").renameable();
        let renamed = sword.with_name(&[&"Excalibur", &2]);

        let holder = renamed.as_metadata_holder().unwrap();
        let expected = Metadata::compound()
            .with("display", Metadata::compound().with("Name", "Excalibur 2"));
        assert_eq!(holder.encode_metadata(), expected);

        // The source definition is untouched.
        assert_eq!(sword.display_name(), "Iron Sword");
        assert!(sword.as_metadata_holder().is_none());
    }

    #[test]
    fn test_rename_keeps_existing_display_keys() {
        let banner = ItemDefinition::new(425, 0, "Banner")
            .renameable()
            .with_metadata(Metadata::compound().with(
                "display",
                Metadata::compound().with("Lore", vec!["keep"]),
            ))
            .with_name(&[&"X"]);

        let expected = Metadata::compound().with(
            "display",
            Metadata::compound().with("Lore", vec!["keep"]).with("Name", "X"),
        );
        assert_eq!(banner.as_metadata_holder().unwrap().encode_metadata(), expected);
    }

    #[test]
    fn test_rename_replaces_non_compound_display() {
        let odd = ItemDefinition::new(1, 0, "Odd")
            .renameable()
            .with_metadata(Metadata::compound().with("display", 5))
            .with_name(&[&"Y"]);

        let expected =
            Metadata::compound().with("display", Metadata::compound().with("Name", "Y"));
        assert_eq!(odd.as_metadata_holder().unwrap().encode_metadata(), expected);
    }

    #[test]
    fn test_rename_with_no_values_clears_display_name() {
        let mut sword = ItemDefinition::new(267, 0, "Iron Sword").renameable();
        sword.display_name = Some("Old".to_string());

        let cleared = sword.with_name(&[]);
        assert!(cleared.as_metadata_holder().is_none());
    }
}
