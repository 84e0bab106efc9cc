//! Ordered-article endpoints. Lines are attached to an existing order one
//! call at a time (the aggregate is built incrementally); every verb requires
//! a bearer token.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::auth::BearerClaims;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::handlers::GetOneParams;
use crate::models::OrderedArticle;
use crate::repo::{OrderedArticlesRepo, Repo};

pub async fn add(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
    body: web::Json<OrderedArticle>,
) -> Result<HttpResponse, AppError> {
    let entity = body.into_inner();
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    let id = web::block(move || repo.add(&entity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(id))
}

pub async fn add_range(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
    body: web::Json<Vec<OrderedArticle>>,
) -> Result<HttpResponse, AppError> {
    let entities = body.into_inner();
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    let ids = web::block(move || repo.add_range(&entities))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(ids))
}

pub async fn update(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
    body: web::Json<OrderedArticle>,
) -> Result<HttpResponse, AppError> {
    let entity = body.into_inner();
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    let updated = web::block(move || repo.update(&entity))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(updated))
}

pub async fn remove(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
    body: web::Json<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = body.into_inner();
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    web::block(move || repo.remove(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn remove_range(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
    body: web::Json<Vec<Uuid>>,
) -> Result<HttpResponse, AppError> {
    let ids = body.into_inner();
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    web::block(move || repo.remove_range(&ids))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn get_one(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
    query: web::Query<GetOneParams>,
) -> Result<HttpResponse, AppError> {
    let id = query.into_inner().id;
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    let found = web::block(move || repo.get_one(id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    match found {
        Some(entity) => Ok(HttpResponse::Ok().json(entity)),
        None => Err(AppError::NotFound),
    }
}

pub async fn get_all(
    pool: web::Data<DbPool>,
    _claims: BearerClaims,
) -> Result<HttpResponse, AppError> {
    let repo = OrderedArticlesRepo::new(pool.get_ref().clone());
    let entities = web::block(move || repo.get_all())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;
    Ok(HttpResponse::Ok().json(entities))
}
