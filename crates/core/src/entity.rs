//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stocks and lines are entities: two stocks with identical capacity and date
/// are still different supply units.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
