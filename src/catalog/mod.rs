//! Sample product catalog displayed by the pager.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Books,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Books,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Books => "Books",
        };
        f.write_str(name)
    }
}

/// One catalog entry. Items are never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    /// Price in cents
    pub price_cents: u32,
    /// Rating out of 5
    pub rating: u8,
    pub in_stock: bool,
    /// Placeholder image URL, shown as text only
    pub image: String,
}

impl Item {
    /// Price formatted as dollars, e.g. `$12.05`
    pub fn price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }

    /// Rating formatted as `n/5`
    pub fn rating_label(&self) -> String {
        format!("{}/5", self.rating)
    }

    pub fn stock_label(&self) -> &'static str {
        if self.in_stock {
            "In stock"
        } else {
            "Out of stock"
        }
    }
}

/// Build `count` sample items.
///
/// Identifiers, names and categories depend only on the position; price and
/// rating are random, reproducible when a `seed` is given.
pub fn sample_catalog(count: usize, seed: Option<u64>) -> Vec<Item> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    (0..count)
        .map(|i| Item {
            id: format!("ID-{}", 1000 + i),
            name: format!("Product {}", i + 1),
            description: format!("Description for item {}", i + 1),
            category: Category::ALL[i % Category::ALL.len()],
            price_cents: rng.gen_range(0..10_000),
            rating: rng.gen_range(1..=5),
            in_stock: i % 5 != 0,
            image: format!("https://picsum.photos/300/300?random={}", i + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_catalog_shape() {
        let items = sample_catalog(50, Some(7));
        assert_eq!(items.len(), 50);
        assert_eq!(items[0].id, "ID-1000");
        assert_eq!(items[49].name, "Product 50");
        assert_eq!(items[1].category, Category::Clothing);
        assert_eq!(items[7].category, Category::Books);
        assert!(!items[0].in_stock);
        assert!(items[1].in_stock);

        let ids: HashSet<_> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids.len(), 50);

        for item in &items {
            assert!((1..=5).contains(&item.rating));
            assert!(item.price_cents < 10_000);
        }
    }

    #[test]
    fn test_seed_is_reproducible() {
        assert_eq!(sample_catalog(20, Some(42)), sample_catalog(20, Some(42)));
    }

    #[test]
    fn test_labels() {
        let mut item = sample_catalog(1, Some(1)).remove(0);
        item.price_cents = 1205;
        item.rating = 4;
        assert_eq!(item.price(), "$12.05");
        assert_eq!(item.rating_label(), "4/5");
        assert_eq!(item.stock_label(), "Out of stock");
    }
}
