use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;

use crate::{db_interaction::get_flowers, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetFlowerQuery {
    page: i64,
    limit: i64
}

#[tracing::instrument(
    "Get flower catalogue entries",
    skip(pool)
)]
pub async fn get_flower(
    pool: web::Data<DbPool>,
    query: web::Query<GetFlowerQuery>
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let flowers = get_flowers(conn, query.0.page, query.0.limit)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(flowers))
}
