//! Things the storefront refers to by id.

/// Anything kept by reference rather than by value.
///
/// The basket holds product ids only and resolves them against whatever
/// catalog is current; a product reloaded with a new price or title is still
/// the same basket line.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
