//! Item model
//!
//! An item is one unit of desired spend: a name and a fixed price.
//!
//! CRITICAL: All money values are i64 (cents)

use serde::{Deserialize, Serialize};

/// Name given to the synthetic item recorded for a fallback cash grant.
pub const SCHOLARSHIP_ITEM_NAME: &str = "Scholarship";

/// Immutable (name, price) pair
///
/// Items have no identity beyond their value. Two items with the same name
/// and price are still distinct entries in a department's queue.
///
/// # Example
/// ```
/// use budget_allocator_core_rs::Item;
///
/// let item = Item::new("Textbook".to_string(), 20_000);
/// assert_eq!(item.name(), "Textbook");
/// assert_eq!(item.price(), 20_000); // $200.00 in cents
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    name: String,

    /// Price in cents. Zero and negative prices are representable.
    price: i64,
}

impl Item {
    /// Create a new item
    pub fn new(name: String, price: i64) -> Self {
        Self { name, price }
    }

    /// Synthetic item recorded when a department receives a fallback grant
    ///
    /// # Example
    /// ```
    /// use budget_allocator_core_rs::Item;
    ///
    /// let grant = Item::scholarship(50_000);
    /// assert_eq!(grant.name(), "Scholarship");
    /// assert_eq!(grant.price(), 50_000);
    /// ```
    pub fn scholarship(amount: i64) -> Self {
        Self::new(SCHOLARSHIP_ITEM_NAME.to_string(), amount)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> i64 {
        self.price
    }
}
