//! # Catalog Module
//!
//! The static product catalog and the browse queries run against it.
//!
//! ## Queries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Queries                                    │
//! │                                                                         │
//! │  Home page                                                              │
//! │  ├── top_deals(n)   ── highest discount first                          │
//! │  └── trending(n)    ── highest rating first                            │
//! │                                                                         │
//! │  Product grid                                                           │
//! │  └── query(ProductQuery)                                               │
//! │        1. category filter   (empty set = every category)               │
//! │        2. price range       (inclusive, open upper bound allowed)      │
//! │        3. sort              (relevance keeps catalog order)            │
//! │                                                                         │
//! │  All sorts are stable: ties keep catalog order.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Category, Product};

/// Built-in categories: (id, name, icon).
const CATEGORIES: &[(&str, &str, &str)] = &[
    ("mobiles", "Mobiles", "📱"),
    ("electronics", "Electronics", "💻"),
    ("fashion", "Fashion", "👕"),
    ("home", "Home", "🏠"),
    ("appliances", "Appliances", "🔌"),
    ("beauty", "Beauty", "💄"),
    ("toys", "Toys", "🧸"),
    ("grocery", "Grocery", "🛒"),
];

/// Built-in products:
/// (id, name, price ₹, original ₹, discount %, category, rating, reviews).
#[allow(clippy::type_complexity)]
const PRODUCTS: &[(&str, &str, i64, i64, u8, &str, f64, u32)] = &[
    ("1", "Apple iPhone 15 (Blue, 128 GB)", 65_999, 79_900, 17, "mobiles", 4.6, 48_213),
    ("2", "Samsung Galaxy S24 Ultra (Titanium Gray, 256 GB)", 121_999, 134_999, 10, "mobiles", 4.5, 12_877),
    ("3", "Sony WH-1000XM5 Wireless Headphones", 26_990, 34_990, 23, "electronics", 4.7, 9_412),
    ("4", "Apple MacBook Air M2 (8 GB / 256 GB)", 99_990, 114_900, 13, "electronics", 4.8, 6_530),
    ("5", "Nike Air Max SC Sneakers", 7_495, 10_995, 32, "fashion", 4.3, 2_204),
    ("6", "Levi's 511 Slim Fit Jeans", 1_799, 3_599, 50, "fashion", 4.2, 15_978),
    ("7", "Prestige PIC 20 Induction Cooktop", 2_199, 3_895, 44, "appliances", 4.1, 88_120),
    ("8", "LG 8 kg Front Load Washing Machine", 36_990, 47_990, 23, "appliances", 4.4, 21_345),
    ("9", "boAt Airdopes 141 TWS Earbuds", 1_099, 4_490, 76, "electronics", 4.0, 301_552),
    ("10", "Engineered Wood Study Table", 4_999, 9_999, 50, "home", 3.9, 1_087),
    ("11", "Maybelline Fit Me Matte Foundation", 399, 599, 33, "beauty", 4.3, 54_760),
    ("12", "LEGO Classic Creative Brick Box", 2_799, 3_499, 20, "toys", 4.9, 3_318),
];

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price filter; `max: None` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Option<Money>,
}

impl PriceRange {
    /// Creates a bounded range, rejecting `min > max`.
    pub fn new(min: Money, max: Money) -> CoreResult<Self> {
        if min > max {
            return Err(CoreError::InvalidPriceRange {
                min: min.major(),
                max: max.major(),
            });
        }
        Ok(PriceRange {
            min,
            max: Some(max),
        })
    }

    /// A range with only a lower bound.
    pub const fn at_least(min: Money) -> Self {
        PriceRange { min, max: None }
    }

    /// Returns true when `price` falls inside the range.
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }

    /// The sidebar presets: under ₹5,000 up to above ₹1,00,000.
    pub fn presets() -> [PriceRange; 5] {
        [
            PriceRange {
                min: Money::zero(),
                max: Some(Money::from_major(5_000)),
            },
            PriceRange {
                min: Money::from_major(5_000),
                max: Some(Money::from_major(15_000)),
            },
            PriceRange {
                min: Money::from_major(15_000),
                max: Some(Money::from_major(50_000)),
            },
            PriceRange {
                min: Money::from_major(50_000),
                max: Some(Money::from_major(100_000)),
            },
            PriceRange::at_least(Money::from_major(100_000)),
        ]
    }
}

// =============================================================================
// Product Query
// =============================================================================

/// Sort order for the product grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Relevance,
    PriceLowToHigh,
    PriceHighToLow,
    /// Highest discount first.
    Discount,
    /// Highest rating first.
    Rating,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(SortOrder::Relevance),
            "price-low" | "price-low-to-high" => Ok(SortOrder::PriceLowToHigh),
            "price-high" | "price-high-to-low" => Ok(SortOrder::PriceHighToLow),
            "discount" => Ok(SortOrder::Discount),
            "rating" => Ok(SortOrder::Rating),
            other => Err(format!(
                "Unknown sort order: '{}'. Valid options: relevance, price-low, price-high, discount, rating",
                other
            )),
        }
    }
}

/// Filters and sort for [`Catalog::query`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Category ids to keep; empty keeps every category.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Price filter; `None` keeps every price.
    #[serde(default)]
    pub price_range: Option<PriceRange>,

    #[serde(default)]
    pub sort: SortOrder,
}

impl ProductQuery {
    /// Toggles a category in the filter set, as the sidebar checkboxes do.
    pub fn toggle_category(&mut self, category: &str) {
        if let Some(pos) = self.categories.iter().position(|c| c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category.to_string());
        }
    }

    fn matches(&self, product: &Product) -> bool {
        let category_ok =
            self.categories.is_empty() || self.categories.iter().any(|c| *c == product.category);
        let price_ok = self
            .price_range
            .map_or(true, |range| range.contains(product.price));
        category_ok && price_ok
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The product catalog: categories and products in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from explicit data.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Catalog {
            categories,
            products,
        }
    }

    /// The built-in demo catalog.
    pub fn demo() -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|(id, name, icon)| Category {
                id: (*id).to_string(),
                name: (*name).to_string(),
                icon: (*icon).to_string(),
            })
            .collect();

        let products = PRODUCTS
            .iter()
            .map(
                |(id, name, price, original, discount, category, rating, reviews)| Product {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                    price: Money::from_major(*price),
                    original_price: Money::from_major(*original),
                    discount: *discount,
                    image: format!("https://images.storefront.local/products/{}.jpg", id),
                    category: (*category).to_string(),
                    rating: *rating,
                    reviews: *reviews,
                },
            )
            .collect();

        Catalog::new(categories, products)
    }

    /// Finds a product by id.
    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Gets a product by id, failing with `ProductNotFound`.
    pub fn get(&self, id: &str) -> CoreResult<&Product> {
        self.find(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Finds a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// The `n` products with the highest discount.
    pub fn top_deals(&self, n: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        sort_products(&mut products, SortOrder::Discount);
        products.truncate(n);
        products
    }

    /// The `n` highest-rated products.
    pub fn trending(&self, n: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        sort_products(&mut products, SortOrder::Rating);
        products.truncate(n);
        products
    }

    /// Runs a product grid query.
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut products: Vec<&Product> =
            self.products.iter().filter(|p| query.matches(p)).collect();
        sort_products(&mut products, query.sort);
        products
    }
}

/// Stable sort in place.
fn sort_products(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::Relevance => {}
        SortOrder::PriceLowToHigh => products.sort_by_key(|p| p.price),
        SortOrder::PriceHighToLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Discount => products.sort_by(|a, b| b.discount.cmp(&a.discount)),
        SortOrder::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_demo_catalog_is_consistent() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.products.len(), PRODUCTS.len());

        for product in &catalog.products {
            assert!(product.price <= product.original_price, "{}", product.id);
            assert_eq!(product.discount, product.computed_discount(), "{}", product.id);
            assert!(catalog.category(&product.category).is_some(), "{}", product.id);
        }
    }

    #[test]
    fn test_get_and_find() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.get("3").unwrap().category, "electronics");
        assert!(catalog.find("nope").is_none());
        assert!(matches!(
            catalog.get("nope"),
            Err(CoreError::ProductNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_top_deals_highest_discount_first_with_stable_ties() {
        let catalog = Catalog::demo();
        let deals = catalog.top_deals(4);
        // 76%, then the two 50% products in catalog order, then 44%
        assert_eq!(ids(&deals), vec!["9", "6", "10", "7"]);
    }

    #[test]
    fn test_trending_highest_rating_first() {
        let catalog = Catalog::demo();
        assert_eq!(ids(&catalog.trending(4)), vec!["12", "4", "3", "1"]);
        assert_eq!(catalog.trending(100).len(), PRODUCTS.len());
    }

    #[test]
    fn test_query_category_and_price() {
        let catalog = Catalog::demo();

        let mut query = ProductQuery::default();
        assert_eq!(catalog.query(&query).len(), PRODUCTS.len());

        query.toggle_category("mobiles");
        query.toggle_category("fashion");
        assert_eq!(ids(&catalog.query(&query)), vec!["1", "2", "5", "6"]);

        query.toggle_category("mobiles");
        assert_eq!(query.categories, vec!["fashion".to_string()]);

        query.price_range = Some(PriceRange::presets()[0]);
        assert_eq!(ids(&catalog.query(&query)), vec!["6"]);
    }

    #[test]
    fn test_query_sorts() {
        let catalog = Catalog::demo();
        let query = ProductQuery {
            categories: vec!["electronics".to_string()],
            price_range: None,
            sort: SortOrder::PriceLowToHigh,
        };
        assert_eq!(ids(&catalog.query(&query)), vec!["9", "3", "4"]);

        let query = ProductQuery {
            sort: SortOrder::PriceHighToLow,
            ..query
        };
        assert_eq!(ids(&catalog.query(&query)), vec!["4", "3", "9"]);
    }

    #[test]
    fn test_price_range_bounds() {
        let range = PriceRange::new(Money::from_major(5_000), Money::from_major(15_000)).unwrap();
        assert!(range.contains(Money::from_major(5_000)));
        assert!(range.contains(Money::from_major(15_000)));
        assert!(!range.contains(Money::from_major(15_001)));

        let open = PriceRange::presets()[4];
        assert!(open.contains(Money::from_major(10_000_000)));
        assert!(!open.contains(Money::from_major(99_999)));

        assert!(matches!(
            PriceRange::new(Money::from_major(10), Money::from_major(5)),
            Err(CoreError::InvalidPriceRange { min: 10, max: 5 })
        ));
    }

    #[test]
    fn test_sort_order_from_str() {
        assert_eq!("price-low".parse::<SortOrder>(), Ok(SortOrder::PriceLowToHigh));
        assert_eq!("Rating".parse::<SortOrder>(), Ok(SortOrder::Rating));
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
