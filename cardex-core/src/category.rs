//! The closed spending-category set. Labels are case-sensitive and match the
//! cache files and the categorization prompt byte-for-byte.

use serde::{Deserialize, Serialize};

/// Spending categories assigned by the categorizer.
///
/// `PaymentCredit` is reserved for payments made *to* the card issuer (not
/// rent or other bill payments); aggregation treats it as non-spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food/Restaurant")]
    FoodRestaurant,
    #[serde(rename = "Grocery")]
    Grocery,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Subscriptions")]
    Subscriptions,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Rent/Housing")]
    RentHousing,
    #[serde(rename = "Payment/Credit")]
    PaymentCredit,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in prompt order.
    pub const ALL: [Category; 11] = [
        Category::FoodRestaurant,
        Category::Grocery,
        Category::Transportation,
        Category::Subscriptions,
        Category::Utilities,
        Category::Shopping,
        Category::Healthcare,
        Category::Entertainment,
        Category::RentHousing,
        Category::PaymentCredit,
        Category::Other,
    ];

    pub fn as_label(self) -> &'static str {
        match self {
            Category::FoodRestaurant => "Food/Restaurant",
            Category::Grocery => "Grocery",
            Category::Transportation => "Transportation",
            Category::Subscriptions => "Subscriptions",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Entertainment => "Entertainment",
            Category::RentHousing => "Rent/Housing",
            Category::PaymentCredit => "Payment/Credit",
            Category::Other => "Other",
        }
    }

    /// Exact-match lookup; anything outside the closed set is None.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_label() == label)
    }

    /// Comma-separated label list for prompt construction.
    pub fn prompt_list() -> String {
        let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_label()).collect();
        labels.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for c in Category::ALL {
            assert_eq!(Category::from_label(c.as_label()), Some(c));
        }
    }

    #[test]
    fn test_from_label_is_case_sensitive() {
        assert_eq!(Category::from_label("grocery"), None);
        assert_eq!(Category::from_label("Payment/credit"), None);
        assert_eq!(Category::from_label("Dining"), None);
    }

    #[test]
    fn test_serde_uses_exact_labels() {
        let json = serde_json::to_string(&Category::RentHousing).unwrap();
        assert_eq!(json, "\"Rent/Housing\"");
        let back: Category = serde_json::from_str("\"Food/Restaurant\"").unwrap();
        assert_eq!(back, Category::FoodRestaurant);
    }

    #[test]
    fn test_prompt_list_order() {
        let list = Category::prompt_list();
        assert!(list.starts_with("Food/Restaurant, Grocery"));
        assert!(list.ends_with("Payment/Credit, Other"));
    }
}
