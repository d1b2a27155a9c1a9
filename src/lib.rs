//! Immutable item stacks for a block-game server
//!
//! A [`Stack`](item::Stack) is a quantity of identical items plus display
//! metadata (custom name, lore). Stacks never change in place: growing,
//! renaming and merging all return new stacks, which makes them safe to
//! share between threads without locking. Inventories, crafting and item
//! entities build on the merge and comparison rules defined here.
//!
//! Items plug in through the [`Item`](item::Item) trait and may opt into
//! capabilities that override stack behavior (max count, weapon damage,
//! renaming, structured metadata).

pub mod item;
