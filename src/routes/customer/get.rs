use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;

use crate::{db_interaction::get_customers, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct GetCustomerQuery {
    page: i64,
    limit: i64
}

#[tracing::instrument(
    "Get customer entries",
    skip(pool)
)]
pub async fn get_customer(
    pool: web::Data<DbPool>,
    query: web::Query<GetCustomerQuery>
) -> Result<HttpResponse, actix_web::Error> {
    let conn = get_pooled_connection(&pool)
        .await
        .map_err(ErrorInternalServerError)?;

    let customers = get_customers(conn, query.0.page, query.0.limit)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(customers))
}
