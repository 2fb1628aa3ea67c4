use shopfront_core::ProductId;

/// What a basket toggle should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasketAction {
    Add,
    Remove,
}

impl BasketAction {
    /// The action that flips membership: remove if present, add otherwise.
    pub fn toggle_for(in_basket: bool) -> Self {
        if in_basket {
            BasketAction::Remove
        } else {
            BasketAction::Add
        }
    }
}

/// Insertion-ordered set of product ids.
///
/// Ids are not checked against the catalog: a basket may briefly hold an id
/// the current catalog no longer has; readers treat it as unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket {
    items: Vec<ProductId>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` unless already present. Returns whether the basket changed.
    pub fn add(&mut self, id: ProductId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.items.push(id);
        true
    }

    /// Remove `id` if present. Returns whether the basket changed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item != id);
        self.items.len() != before
    }

    pub fn apply(&mut self, id: ProductId, action: BasketAction) -> bool {
        match action {
            BasketAction::Add => self.add(id),
            BasketAction::Remove => self.remove(&id),
        }
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.contains(id)
    }

    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
