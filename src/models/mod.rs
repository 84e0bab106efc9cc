pub mod article;
pub mod order;
pub mod ordered_article;
pub mod price_list;

pub use article::Article;
pub use order::Order;
pub use ordered_article::OrderedArticle;
pub use price_list::{PriceList, DEFAULT_PRICE_LIST_NAME};

use uuid::Uuid;

/// Contract every persisted entity fulfils: a unique identifier plus the
/// field/range checks the store expects to hold before a write.
///
/// Callers may submit the nil UUID (or omit the field, which deserializes to
/// nil) to let the store assign one; the identifier actually stored is
/// authoritative.
pub trait Entity: Clone {
    fn id(&self) -> Uuid;

    fn set_id(&mut self, id: Uuid);

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}
