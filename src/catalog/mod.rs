
pub mod matcher;
pub mod models;
pub mod store;

use std::collections::HashSet;

pub use matcher::find_products;
pub use models::{Product, ProductBuilder};
pub use store::load_catalog;


#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    token_sets: Vec<HashSet<String>>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let token_sets = products.iter().map(Product::token_set).collect();
        Self { products, token_sets }
    }


    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub(crate) fn indexed(&self) -> impl Iterator<Item = (&Product, &HashSet<String>)> {
        self.products.iter().zip(&self.token_sets)
    }
}
