use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::{update_order_status, UpdateOrderStatusError}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct UpdateOrderStatusForm{
    pub order_id: Uuid,
    pub status: OrderStatus
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus{
    Pending,
    Prepared,
    Delivered,
    Cancelled
}

#[derive(Error)]
pub enum UpdateOrderError{
    #[error("Failed to update order status")]
    UpdateError(#[from] UpdateOrderStatusError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for UpdateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for UpdateOrderError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            UpdateOrderError::UpdateError(e @ UpdateOrderStatusError::NoOrderIdError(_)) => {
                HttpResponse::BadRequest().body(format!("{}", e))
            },
            _ => HttpResponse::InternalServerError().body(format!("{}", self))
        }
    }
}

#[tracing::instrument(
    "Updating order status",
    skip(pool)
)]
pub async fn update_order(
    pool: web::Data<DbPool>,
    form: web::Form<UpdateOrderStatusForm>
) -> Result<HttpResponse, UpdateOrderError>{
    let conn = get_pooled_connection(&pool)
        .await
        .context("Failed to get connection from pool")?;

    update_order_status(conn, form.status, form.order_id).await?;

    Ok(HttpResponse::Ok().finish())
}
