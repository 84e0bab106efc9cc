use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::models::Entity;
use crate::schema::ordered_articles;

/// A line of an order: an article snapshot taken at order time, including the
/// price-list name and validity window that were active when it was placed.
///
/// `order_id` is the sole ownership link back to the order; there is no
/// serialized back-reference, which keeps the aggregate acyclic on the wire.
/// The line cannot outlive its order (foreign key cascades on delete).
#[derive(
    Debug, Clone, PartialEq, Deserialize, Queryable, Selectable, Insertable, AsChangeset,
)]
#[diesel(table_name = ordered_articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct OrderedArticle {
    #[serde(default)]
    pub id: Uuid,
    pub order_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub price_list_name: String,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}

impl OrderedArticle {
    /// Line total, recomputed on every read. Never persisted: any `total`
    /// submitted by a caller is ignored on deserialization.
    pub fn total(&self) -> BigDecimal {
        self.price.clone() * BigDecimal::from(self.quantity)
    }
}

// Hand-written so the derived `total` rides along on every serialization
// without ever being a struct field the store could persist.
impl Serialize for OrderedArticle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("OrderedArticle", 10)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("orderId", &self.order_id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("price", &self.price)?;
        state.serialize_field("quantity", &self.quantity)?;
        state.serialize_field("total", &self.total())?;
        state.serialize_field("priceListName", &self.price_list_name)?;
        state.serialize_field("validFrom", &self.valid_from)?;
        state.serialize_field("validTo", &self.valid_to)?;
        state.end()
    }
}

impl Entity for OrderedArticle {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("ordered article name is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("ordered article description is required".to_string());
        }
        if self.quantity < 1 {
            return Err(format!("quantity must be positive, got {}", self.quantity));
        }
        if self.valid_from > self.valid_to {
            return Err("ordered article validity window is inverted".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn line(price: &str, quantity: i32) -> OrderedArticle {
        OrderedArticle {
            id: Uuid::new_v4(),
            order_id: Uuid::new_v4(),
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            quantity,
            price_list_name: "Default price list".to_string(),
            valid_from: Utc::now(),
            valid_to: Utc::now() + chrono::Duration::days(30),
        }
    }

    #[test]
    fn total_is_price_times_quantity() {
        let expected = BigDecimal::from_str("7.5000").expect("valid decimal");
        assert_eq!(line("2.5000", 3).total(), expected);
    }

    #[test]
    fn serialized_form_carries_derived_total() {
        let entity = line("2.50", 2);
        let json = serde_json::to_value(&entity).expect("serializes");
        assert_eq!(json["total"], serde_json::json!("5.00"));
        assert_eq!(json["orderId"], serde_json::json!(entity.order_id));
    }

    #[test]
    fn submitted_total_is_ignored() {
        let original = line("4.00", 2);
        let mut json = serde_json::to_value(&original).expect("serializes");
        json["total"] = serde_json::json!("999.99");
        let reparsed: OrderedArticle = serde_json::from_value(json).expect("deserializes");
        assert_eq!(reparsed.total(), original.total());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        assert!(line("2.50", 0).validate().is_err());
    }
}
