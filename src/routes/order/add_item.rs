use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::{insert_line_item, LineItemInsertError, NewLineItem}, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct AddLineItemJson{
    pub order_id: Uuid,
    pub flower_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64
}

#[derive(Error)]
pub enum AddLineItemError{
    #[error("Failed to add line item")]
    InsertError(#[from] LineItemInsertError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for AddLineItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for AddLineItemError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            AddLineItemError::InsertError(e @ LineItemInsertError::UnknownFlower(_))
            | AddLineItemError::InsertError(e @ LineItemInsertError::InsufficientStock{..}) => {
                HttpResponse::BadRequest().body(format!("{}", e))
            },
            _ => HttpResponse::InternalServerError().body(format!("{}", self))
        }
    }
}

#[tracing::instrument(
    "Adding line item to order",
    skip(pool)
)]
pub async fn post_order_item(
    pool: web::Data<DbPool>,
    json: web::Json<AddLineItemJson>
) -> Result<HttpResponse, AddLineItemError> {
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let line_item = NewLineItem{
        flower_id: json.flower_id,
        quantity: json.quantity,
        unit_price: json.unit_price
    };

    insert_line_item(conn, json.order_id, line_item).await?;

    Ok(HttpResponse::Ok().finish())
}
