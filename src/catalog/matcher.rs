use std::collections::HashSet;

use tracing::debug;

use super::Catalog;
use super::models::Product;
use crate::nlp::normalizer::tokens;

pub fn find_products(query: &str, catalog: &Catalog, limit: usize) -> Vec<Product> {
    let query_tokens: HashSet<String> = tokens(query).into_iter().collect();
    if query_tokens.is_empty() {
        return Vec::new();
    }

    let matches: Vec<Product> = catalog
        .indexed()
        .filter(|(_, product_tokens)| !product_tokens.is_disjoint(&query_tokens))
        .map(|(product, _)| product.clone())
        .take(limit)
        .collect();

    debug!("Query {:?} matched {} product(s)", query, matches.len());
    matches
}
