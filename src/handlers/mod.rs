pub mod articles;
pub mod ordered_articles;
pub mod orders;
pub mod price_lists;

use serde::Deserialize;
use uuid::Uuid;

/// Query parameters of the `GetOne` verb (`GET {entity}?Id={id}`).
#[derive(Debug, Deserialize)]
pub struct GetOneParams {
    #[serde(rename = "Id")]
    pub id: Uuid,
}
