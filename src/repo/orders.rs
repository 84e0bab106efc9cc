use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::models::{Entity, Order, OrderedArticle};
use crate::repo::{crud_repo, Repo, RepoError};
use crate::schema::{ordered_articles, orders};

crud_repo!(
    /// Flat CRUD over the `ordered_articles` table. A row must reference an
    /// order that already exists, which is what lets callers build an order
    /// aggregate incrementally: add the order first, attach lines afterwards.
    OrderedArticlesRepo,
    OrderedArticle,
    ordered_articles
);

/// The `orders` columns without the owned collection, which is not a column.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct OrderRow {
    id: Uuid,
    address_id: Uuid,
    user_id: Uuid,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl OrderRow {
    fn of(order: &Order) -> Self {
        Self {
            id: order.id,
            address_id: order.address_id,
            user_id: order.user_id,
            created: order.created,
            modified: order.modified,
        }
    }

    fn assemble(self, articles: Vec<OrderedArticle>) -> Order {
        Order {
            id: self.id,
            address_id: self.address_id,
            user_id: self.user_id,
            created: self.created,
            modified: self.modified,
            articles,
        }
    }
}

/// Order aggregate repository. A plain flat repo over `orders` would hand
/// back aggregates with an empty `articles` collection, so the read verbs
/// eager-load the owned lines; removal cascades to them through the store
/// foreign key.
pub struct OrdersRepo {
    pool: DbPool,
}

impl OrdersRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Clones the order's lines with fresh ids where needed and the parent id
    /// stamped in, ready for insertion alongside the order row.
    fn owned_lines(order: &Order) -> Vec<OrderedArticle> {
        order
            .articles
            .iter()
            .map(|line| {
                let mut line = line.clone();
                if line.id().is_nil() {
                    line.set_id(Uuid::new_v4());
                }
                line.order_id = order.id;
                line
            })
            .collect()
    }

    fn insert_aggregate(
        conn: &mut PgConnection,
        entity: &Order,
    ) -> Result<Uuid, RepoError> {
        entity.validate().map_err(RepoError::Validation)?;
        let mut order = entity.clone();
        if order.id().is_nil() {
            order.set_id(Uuid::new_v4());
        }
        diesel::insert_into(orders::table)
            .values(&OrderRow::of(&order))
            .execute(conn)?;

        let lines = Self::owned_lines(&order);
        if !lines.is_empty() {
            diesel::insert_into(ordered_articles::table)
                .values(&lines)
                .execute(conn)?;
        }
        Ok(order.id)
    }

    fn lines_of(conn: &mut PgConnection, order_id: Uuid) -> Result<Vec<OrderedArticle>, RepoError> {
        let lines = ordered_articles::table
            .filter(ordered_articles::order_id.eq(order_id))
            .select(OrderedArticle::as_select())
            .load(conn)?;
        Ok(lines)
    }
}

impl Repo<Order> for OrdersRepo {
    fn add(&self, entity: &Order) -> Result<Uuid, RepoError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, RepoError, _>(|conn| Self::insert_aggregate(conn, entity))
    }

    fn add_range(&self, entities: &[Order]) -> Result<Vec<Uuid>, RepoError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, RepoError, _>(|conn| {
            entities
                .iter()
                .map(|entity| Self::insert_aggregate(conn, entity))
                .collect()
        })
    }

    fn update(&self, entity: &Order) -> Result<Order, RepoError> {
        entity.validate().map_err(RepoError::Validation)?;
        let mut conn = self.pool.get()?;
        let row: OrderRow = diesel::update(orders::table.find(entity.id))
            .set(&OrderRow::of(entity))
            .returning(OrderRow::as_returning())
            .get_result(&mut conn)?;
        let lines = Self::lines_of(&mut conn, row.id)?;
        Ok(row.assemble(lines))
    }

    fn remove(&self, id: Uuid) -> Result<(), RepoError> {
        let mut conn = self.pool.get()?;
        // The ordered_articles foreign key cascades, so children go with us.
        let deleted = diesel::delete(orders::table.find(id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    fn remove_range(&self, ids: &[Uuid]) -> Result<(), RepoError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, RepoError, _>(|conn| {
            for &id in ids {
                let deleted = diesel::delete(orders::table.find(id)).execute(conn)?;
                if deleted == 0 {
                    return Err(RepoError::NotFound);
                }
            }
            Ok(())
        })
    }

    fn get_one(&self, id: Uuid) -> Result<Option<Order>, RepoError> {
        let mut conn = self.pool.get()?;
        let row = orders::table
            .find(id)
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let lines = Self::lines_of(&mut conn, row.id)?;
        Ok(Some(row.assemble(lines)))
    }

    fn get_all(&self) -> Result<Vec<Order>, RepoError> {
        let mut conn = self.pool.get()?;
        let rows = orders::table.select(OrderRow::as_select()).load(&mut conn)?;
        let lines = ordered_articles::table
            .select(OrderedArticle::as_select())
            .load::<OrderedArticle>(&mut conn)?;

        let mut by_order: HashMap<Uuid, Vec<OrderedArticle>> = HashMap::new();
        for line in lines {
            by_order.entry(line.order_id).or_default().push(line);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = by_order.remove(&row.id).unwrap_or_default();
                row.assemble(lines)
            })
            .collect())
    }
}
