use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Entity, OrderedArticle};

/// Order aggregate root. The `articles` collection is owned (cascade
/// add/remove) and is not a store column: it is filled by the aggregate read
/// path and may legitimately start empty — lines are usually attached
/// incrementally once pricing has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: Uuid,
    pub address_id: Uuid,
    pub user_id: Uuid,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub articles: Vec<OrderedArticle>,
}

impl Entity for Order {
    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), String> {
        for line in &self.articles {
            line.validate()?;
        }
        Ok(())
    }
}
