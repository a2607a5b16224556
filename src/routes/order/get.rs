use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::db_interaction::get_order_with_items;
use crate::utils::{get_pooled_connection, DbPool};

#[derive(Deserialize, Debug)]
pub struct GetOrderQuery{
    pub page: i64,
    pub limit: i64,
    pub customer_id: Option<Uuid>
}

#[tracing::instrument(
    "Getting list of orders",
    skip(pool)
)]
pub async fn get_order(
    pool: web::Data<DbPool>,
    query: web::Query<GetOrderQuery>
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
                .await
                .map_err(|_| ErrorInternalServerError("Failed due to internal error"))?;

    let order = get_order_with_items(
        conn,
        query.0.page,
        query.0.limit,
        query.0.customer_id
    )
    .await
    .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(order))
}
