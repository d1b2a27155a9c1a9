use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::capability::{format_values, Item};
use super::defaults::{DEFAULT_ATTACK_DAMAGE, DEFAULT_MAX_COUNT};
use super::error::StackError;

/// A quantity of identical items
///
/// A stack is an immutable value: every operation that "changes" it returns
/// a new stack and leaves the original alone, so stacks can be cloned and
/// shared freely. The item itself is shared behind an `Arc`.
///
/// A stack with a count of 0 is empty, and an empty stack never exposes its
/// item, even if it was created from one. That keeps "no item" and "zero of
/// some item" indistinguishable to callers.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    item: Option<Arc<dyn Item>>,
    count: u32,
    custom_name: String,
    lore: Vec<String>,
}

impl Stack {
    /// Creates a new stack of `count` items
    ///
    /// Fails with `StackError::InvalidStack` if the count is negative or no
    /// item is given.
    ///
    /// # Example
    /// ```
    /// use item_stack::item::{ItemDefinition, Stack};
    ///
    /// let apple = ItemDefinition::new(260, 0, "Apple").into_item();
    /// let stack = Stack::new(Some(apple), 12).unwrap();
    /// assert_eq!(stack.count(), 12);
    ///
    /// assert!(Stack::new(None, 1).is_err());
    /// ```
    pub fn new(item: Option<Arc<dyn Item>>, count: i32) -> Result<Self, StackError> {
        let Ok(count) = u32::try_from(count) else {
            debug!(count, "rejected stack with negative count");
            return Err(StackError::InvalidStack {
                reason: "cannot use negative count for item stack",
            });
        };
        let Some(item) = item else {
            debug!(count, "rejected stack without an item");
            return Err(StackError::InvalidStack {
                reason: "cannot have a stack without an item",
            });
        };

        Ok(Stack::from_parts(item, count))
    }

    /// Creates a new stack from a concrete item
    ///
    /// Infallible counterpart of `new` for callers that already hold an item
    /// and an unsigned count.
    pub fn of<I: Item + 'static>(item: I, count: u32) -> Self {
        Stack::from_parts(Arc::new(item), count)
    }

    /// Creates a stack holding no item at all
    pub fn empty() -> Self {
        Stack::default()
    }

    fn from_parts(item: Arc<dyn Item>, count: u32) -> Self {
        Stack {
            item: Some(item),
            count,
            custom_name: String::new(),
            lore: Vec::new(),
        }
    }

    fn with_count(&self, count: u32) -> Stack {
        let mut stack = self.clone();
        stack.count = count;
        stack
    }

    /// Returns how many items are in the stack
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns true if the stack holds no items
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the held item, or `None` if the stack is empty
    pub fn item(&self) -> Option<&Arc<dyn Item>> {
        if self.is_empty() {
            return None;
        }
        self.item.as_ref()
    }

    /// Returns the maximum count this stack can hold
    ///
    /// 64 unless the item overrides it through `MaxCounter`.
    pub fn max_count(&self) -> u32 {
        self.item()
            .and_then(|item| item.as_max_counter())
            .map_or(DEFAULT_MAX_COUNT, |counter| counter.max_count())
    }

    /// Returns the melee damage dealt with this stack in hand
    ///
    /// 2.0 unless the item overrides it through `Weapon`.
    pub fn attack_damage(&self) -> f32 {
        self.item()
            .and_then(|item| item.as_weapon())
            .map_or(DEFAULT_ATTACK_DAMAGE, |weapon| weapon.attack_damage())
    }

    /// Returns the custom name, or an empty string if none is set
    pub fn custom_name(&self) -> &str {
        &self.custom_name
    }

    /// Returns the lore lines, top to bottom
    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    /// Returns a copy of the stack with a custom name
    ///
    /// The values are joined with spaces (see `format_values`). If the item
    /// is `Nameable`, the copy also holds the renamed item. Passing no values
    /// clears the name.
    ///
    /// # Example
    /// ```
    /// use item_stack::item::{ItemDefinition, Stack};
    ///
    /// let stack = Stack::of(ItemDefinition::new(1, 0, "Stone"), 1);
    /// let named = stack.with_custom_name(&[&"Hello", &"World"]);
    ///
    /// assert_eq!(named.custom_name(), "Hello World");
    /// assert_eq!(stack.custom_name(), "");
    /// ```
    pub fn with_custom_name(&self, values: &[&dyn fmt::Display]) -> Stack {
        let mut stack = self.clone();
        stack.custom_name = format_values(values);

        if let Some(nameable) = self.item().and_then(|item| item.as_nameable()) {
            stack.item = Some(nameable.with_name(values));
        }
        stack
    }

    /// Returns a copy of the stack with the given lore lines
    ///
    /// Passing no lines clears the lore.
    pub fn with_lore<S: AsRef<str>>(&self, lines: &[S]) -> Stack {
        let mut stack = self.clone();
        stack.lore = lines.iter().map(|line| line.as_ref().to_string()).collect();
        stack
    }

    /// Returns a copy of the stack with the count changed by `n`
    ///
    /// Negative values shrink the stack. The count never drops below zero.
    pub fn grow(&self, n: i32) -> Stack {
        let count = (i64::from(self.count) + i64::from(n)).clamp(0, i64::from(u32::MAX));

        self.with_count(count as u32)
    }

    /// Moves as many items from `other` into this stack as fit
    ///
    /// Returns the filled stack and what is left of `other`, which may be
    /// empty. If the stacks are not comparable, or this stack is already
    /// full, both are returned unchanged. Only counts change; names and lore
    /// stay with their stacks.
    ///
    /// An empty destination takes on the item, name and lore of `other`, and
    /// is filled up to `other`'s max count.
    ///
    /// # Example
    /// ```
    /// use item_stack::item::{ItemDefinition, Stack};
    ///
    /// let planks = ItemDefinition::new(5, 0, "Planks");
    /// let a = Stack::of(planks.clone(), 60);
    /// let b = Stack::of(planks, 10);
    ///
    /// let (a, b) = a.add_stack(&b);
    /// assert_eq!(a.count(), 64);
    /// assert_eq!(b.count(), 6);
    /// ```
    pub fn add_stack(&self, other: &Stack) -> (Stack, Stack) {
        if !self.comparable(other) {
            trace!(
                destination = %self,
                source = %other,
                "stacks not comparable, nothing merged"
            );
            return (self.clone(), other.clone());
        }

        let (mut filled, max) = if self.is_empty() {
            (other.with_count(0), other.max_count())
        } else {
            (self.clone(), self.max_count())
        };
        if filled.count >= max {
            trace!(destination = %self, max, "destination full, nothing merged");
            return (self.clone(), other.clone());
        }

        let transfer = (max - filled.count).min(other.count);
        if transfer == 0 {
            return (self.clone(), other.clone());
        }
        trace!(transfer, "merging stacks");

        filled.count += transfer;
        (filled, other.with_count(other.count - transfer))
    }

    /// Splits off up to `amount` items into a new stack
    ///
    /// Returns what remains of this stack and the split-off part. The split
    /// part keeps the item, name and lore. Asking for more than the stack
    /// holds takes everything.
    pub fn split(&self, amount: u32) -> (Stack, Stack) {
        let taken = amount.min(self.count);

        (self.with_count(self.count - taken), self.with_count(taken))
    }

    /// Splits the stack in half
    ///
    /// The remaining stack keeps the odd item, so splitting 7 gives (4, 3).
    pub fn split_half(&self) -> (Stack, Stack) {
        self.split(self.count / 2)
    }

    /// Returns true if the two stacks could share one slot
    ///
    /// Non-empty stacks are comparable when their items have the same
    /// identity, the custom names and lore match, and their structured
    /// metadata is deeply equal (or absent on both sides). An empty stack is
    /// comparable with anything, since items can always be moved into an
    /// empty slot.
    ///
    /// This is a mergeability check, not equality: use `==` to test whether
    /// two stacks are the same.
    pub fn comparable(&self, other: &Stack) -> bool {
        let (Some(item), Some(other_item)) = (self.item(), other.item()) else {
            return true;
        };

        if item.encode_item() != other_item.encode_item() {
            return false;
        }
        if self.custom_name != other.custom_name || self.lore != other.lore {
            return false;
        }

        match (item.as_metadata_holder(), other_item.as_metadata_holder()) {
            (Some(a), Some(b)) => a.encode_metadata().deep_eq(&b.encode_metadata()),
            (None, None) => true,
            _ => false,
        }
    }
}

impl PartialEq for Stack {
    /// Two empty stacks are equal; otherwise stacks are equal when they are
    /// comparable and hold the same count.
    fn eq(&self, other: &Self) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => true,
            (false, false) => self.count == other.count && self.comparable(other),
            _ => false,
        }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.item {
            None => write!(f, "Stack<nil> x{}", self.count),
            Some(item) => write!(
                f,
                "Stack<{:?}>(custom name='{}', lore={:?}) x{}",
                item, self.custom_name, self.lore, self.count
            ),
        }
    }
}
