use serde::{Deserialize, Serialize};

use shopfront_core::{Entity, ProductId};

/// A catalog product, exactly as served by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    pub category: String,
    /// Price in whole currency units; `None` means the product cannot be bought.
    pub price: Option<u64>,
}

impl Product {
    /// Check if product can be bought (has a price).
    pub fn is_purchasable(&self) -> bool {
        self.price.is_some()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Ordered product list.
///
/// Lookups by id are linear; storefront catalogs are small and ordering
/// matters for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    pub fn new(items: Vec<Product>) -> Self {
        Self(items)
    }

    pub fn items(&self) -> &[Product] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.0.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Price of `id` for totals: unknown ids and unpriced products count as 0.
    pub fn price_of(&self, id: &ProductId) -> u64 {
        self.find(id).and_then(|p| p.price).unwrap_or(0)
    }

    /// Sum of `price_of` over `ids`.
    pub fn total_for<'a>(&self, ids: impl IntoIterator<Item = &'a ProductId>) -> u64 {
        ids.into_iter().map(|id| self.price_of(id)).sum()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(items: Vec<Product>) -> Self {
        Self::new(items)
    }
}

impl IntoIterator for Catalog {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Wire shape of `GET /product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductList {
    pub total: u64,
    pub items: Vec<Product>,
}

impl ProductList {
    pub fn into_catalog(self) -> Catalog {
        Catalog::new(self.items)
    }
}
