use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};
use tracing::info;

use super::Catalog;
use super::models::Product;
use crate::core::error::{GiftbotError, Result};

const PRODUCTS_QUERY: &str =
    "SELECT id, name, description, category, price, image FROM products ORDER BY rowid";


pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        return Err(GiftbotError::Catalog(format!(
            "catalog database not found: {}",
            path.display()
        )));
    }

    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let products = read_products(&conn)?;
    info!("Loaded {} products from {}", products.len(), path.display());

    Ok(Catalog::new(products))
}


pub fn read_products(conn: &Connection) -> Result<Vec<Product>> {
    let mut stmt = conn.prepare(PRODUCTS_QUERY)?;
    let products = stmt
        .query_map([], product_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(products)
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        description: row.get(2)?,
        category: row.get(3)?,
        price: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
        image: row.get(5)?,
    })
}
