use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Entity;
use crate::schema::price_lists;

/// Name used when a price list is created without an explicit one.
pub const DEFAULT_PRICE_LIST_NAME: &str = "Default price list";

/// A priced validity window for one article. Cannot outlive its article:
/// the `article_id` foreign key cascades on delete.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset,
)]
#[diesel(table_name = price_lists)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct PriceList {
    #[serde(default)]
    pub id: Uuid,
    pub article_id: Uuid,
    /// Fixed-point price, 4 fractional digits in the store. Serialized as a
    /// string so precision never round-trips through binary floating point.
    pub price: BigDecimal,
    #[serde(default = "default_name")]
    pub name: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

fn default_name() -> String {
    DEFAULT_PRICE_LIST_NAME.to_string()
}

impl Entity for PriceList {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("price list name is required".to_string());
        }
        if self.valid_from > self.valid_to {
            return Err("price list validity window is inverted".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn price_list() -> PriceList {
        PriceList {
            id: Uuid::new_v4(),
            article_id: Uuid::new_v4(),
            price: BigDecimal::from_str("12.3400").expect("valid decimal"),
            name: DEFAULT_PRICE_LIST_NAME.to_string(),
            valid_from: Utc::now(),
            valid_to: Utc::now() + chrono::Duration::days(30),
        }
    }

    #[test]
    fn name_defaults_when_omitted() {
        let json = format!(
            r#"{{"articleId":"{}","price":"9.99","validFrom":"2026-01-01T00:00:00Z","validTo":"2026-02-01T00:00:00Z"}}"#,
            Uuid::new_v4()
        );
        let parsed: PriceList = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed.name, DEFAULT_PRICE_LIST_NAME);
    }

    #[test]
    fn price_serializes_as_string() {
        let json = serde_json::to_value(price_list()).expect("serializes");
        assert_eq!(json["price"], serde_json::json!("12.3400"));
    }

    #[test]
    fn inverted_window_fails_validation() {
        let mut list = price_list();
        list.valid_to = list.valid_from - chrono::Duration::seconds(1);
        assert!(list.validate().is_err());
    }
}
