use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::nlp::normalizer::tokens;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub image: Option<String>,
}

impl Product {
    pub fn builder(id: i64, name: impl Into<String>) -> ProductBuilder {
        ProductBuilder {
            product: Product {
                id,
                name: name.into(),
                description: None,
                category: None,
                price: 0.0,
                image: None,
            },
        }
    }


    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.is_empty())
    }

    pub fn token_set(&self) -> HashSet<String> {
        let text = format!(
            "{} {} {}",
            self.name,
            self.description_or_empty(),
            self.category.as_deref().unwrap_or("")
        );
        tokens(&text).into_iter().collect()
    }
}


pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.product.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.product.category = Some(category.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.product.price = price;
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.product.image = Some(image.into());
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}
