use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Entity;
use crate::schema::articles;

/// Catalog article. Owns its price lists at the store level only: deleting an
/// article cascades to `price_lists` via the foreign key, and catalog reads
/// stay flat (price lists are fetched through their own endpoint).
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable, Insertable, AsChangeset,
)]
#[diesel(table_name = articles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl Entity for Article {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("article name is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("article description is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_deserializes_to_nil() {
        let article: Article =
            serde_json::from_str(r#"{"name":"Lamp","description":"Desk lamp"}"#)
                .expect("valid json");
        assert!(article.id.is_nil());
    }

    #[test]
    fn empty_name_fails_validation() {
        let article = Article {
            id: Uuid::new_v4(),
            name: "  ".to_string(),
            description: "Desk lamp".to_string(),
        };
        assert!(article.validate().is_err());
    }

    #[test]
    fn wire_fields_are_camel_case() {
        let article = Article {
            id: Uuid::new_v4(),
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
        };
        let json = serde_json::to_value(&article).expect("serializes");
        assert!(json.get("description").is_some());
        assert!(json.get("Description").is_none());
    }
}
