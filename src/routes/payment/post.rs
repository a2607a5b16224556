use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::{insert_payment, PaymentInsertError}, models::Payment, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct PaymentForm{
    pub order_id: Uuid,
    pub method: PaymentMethod,
    pub amount: f64
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod{
    Cash,
    Card,
    Online
}

#[derive(Error)]
pub enum PostPaymentError{
    #[error("Failed to record payment")]
    InsertError(#[from] PaymentInsertError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostPaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostPaymentError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            PostPaymentError::InsertError(e @ PaymentInsertError::AlreadyPaid(_)) => {
                HttpResponse::BadRequest().body(format!("{}", e))
            },
            _ => HttpResponse::InternalServerError().body(format!("{}", self))
        }
    }
}

#[tracing::instrument(
    "Recording payment",
    skip(pool)
)]
pub async fn post_payment(
    pool: web::Data<DbPool>,
    form: web::Form<PaymentForm>
) -> Result<HttpResponse, PostPaymentError>{
    let method = match form.method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Card => "card",
        PaymentMethod::Online => "online"
    }.to_string();

    let payment = Payment{
        payment_id: Uuid::new_v4(),
        order_id: form.order_id,
        method,
        amount: form.amount,
        paid_at: Utc::now()
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    insert_payment(conn, payment).await?;

    Ok(HttpResponse::Ok().finish())
}
