use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::{create_order_with_items, CreateOrderError, LineItemInsertError, NewLineItem}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct OrderForm{
    customer_id: Uuid,
    employee_id: Uuid,
    items: Vec<NewLineItem>
}

#[derive(Error)]
pub enum PostOrderError{
    #[error("Failed to create order")]
    CreateError(#[from] CreateOrderError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostOrderError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        // Stock-guard rejections are the caller's to handle, everything
        // else stays an internal error
        match self {
            PostOrderError::CreateError(CreateOrderError::LineItemError(e)) => {
                match e {
                    LineItemInsertError::UnknownFlower(_)
                    | LineItemInsertError::InsufficientStock{..} => {
                        HttpResponse::BadRequest().body(format!("{}", e))
                    },
                    _ => HttpResponse::InternalServerError().body(format!("{}", self))
                }
            },
            PostOrderError::CreateError(CreateOrderError::NoLineItemsError) => {
                HttpResponse::BadRequest().body(format!("{}", self))
            },
            _ => HttpResponse::InternalServerError().body(format!("{}", self))
        }
    }
}

#[tracing::instrument(
    "Posting order",
    skip(pool)
)]
pub async fn post_order(
    pool: web::Data<DbPool>,
    order: web::Json<OrderForm>
) -> Result<HttpResponse, PostOrderError> {
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let order = order.0;

    let order_id = create_order_with_items(
        conn,
        order.customer_id,
        order.employee_id,
        order.items
    )
    .await?;

    Ok(HttpResponse::Ok().json(order_id))
}
