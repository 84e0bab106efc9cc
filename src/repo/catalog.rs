use diesel::prelude::*;
use uuid::Uuid;

use crate::models::{Article, Entity, PriceList};
use crate::repo::{crud_repo, Repo, RepoError};

crud_repo!(
    /// Flat CRUD over the `articles` table. Removing an article cascades to
    /// its price lists through the store foreign key.
    ArticlesRepo,
    Article,
    articles
);

crud_repo!(
    /// Flat CRUD over the `price_lists` table. Rows carry an `article_id`
    /// foreign key and cannot outlive their article.
    PriceListsRepo,
    PriceList,
    price_lists
);
