//! # Domain Types
//!
//! Core domain types shared by the catalog, the stores and the view layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  price          │   │  name           │   │  email          │       │
//! │  │  original_price │   │  icon           │   │  name           │       │
//! │  │  discount (%)   │   └─────────────────┘   │  avatar?        │       │
//! │  │  rating/reviews │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase so persisted and exported records keep
//! the shape the view layer already reads (`originalPrice`, `isAuthenticated`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the static catalog.
///
/// ## Invariant
/// `price <= original_price`. The catalog guarantees it for its own data;
/// the cart uses whatever it is given as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Stable catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Selling price.
    pub price: Money,

    /// List price before discount.
    pub original_price: Money,

    /// Advertised discount in whole percent.
    pub discount: u8,

    /// Image URL.
    pub image: String,

    /// Category id (see [`Category`]).
    pub category: String,

    /// Average customer rating, 0.0 - 5.0.
    pub rating: f64,

    /// Number of customer reviews.
    pub reviews: u32,
}

impl Product {
    /// Saving per unit (`original_price - price`).
    #[inline]
    pub fn saving(&self) -> Money {
        self.original_price - self.price
    }

    /// Returns true when the product is sold below its list price.
    #[inline]
    pub fn is_discounted(&self) -> bool {
        self.saving().is_positive()
    }

    /// Discount recomputed from the two prices, for checking catalog data.
    pub fn computed_discount(&self) -> u8 {
        self.price.percentage_off(self.original_price)
    }
}

// =============================================================================
// Category
// =============================================================================

/// A browse category shown in the category bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Emoji icon.
    pub icon: String,
}

// =============================================================================
// User
// =============================================================================

/// The signed-in shopper.
///
/// Created on login and cleared on logout; only the auth store holds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub avatar: Option<String>,
}

impl User {
    /// Creates a user without an avatar.
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        User {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            avatar: None,
        }
    }

    /// Sets the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// First name for greetings ("Hello, Asha").
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i64, original: i64) -> Product {
        Product {
            id: "p1".to_string(),
            name: "Test Phone".to_string(),
            price: Money::from_major(price),
            original_price: Money::from_major(original),
            discount: 0,
            image: String::new(),
            category: "mobiles".to_string(),
            rating: 4.2,
            reviews: 10,
        }
    }

    #[test]
    fn test_product_saving() {
        let p = product(100, 150);
        assert_eq!(p.saving(), Money::from_major(50));
        assert!(p.is_discounted());
        assert_eq!(p.computed_discount(), 33);

        let full_price = product(100, 100);
        assert!(!full_price.is_discounted());
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(product(100, 150)).unwrap();
        assert_eq!(json["originalPrice"], 15000);
        assert!(json.get("original_price").is_none());
    }

    #[test]
    fn test_user_avatar_is_optional() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","email":"a@b.co","name":"Asha Rao"}"#).unwrap();
        assert_eq!(user.avatar, None);
        assert_eq!(user.first_name(), "Asha");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("avatar"));

        let with = user.with_avatar("https://img/1.png");
        assert_eq!(with.avatar.as_deref(), Some("https://img/1.png"));
    }
}
