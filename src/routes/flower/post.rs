use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::{insert_flower, FlowerInsertError}, models::Flower, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct FlowerForm{
    supplier_id: Uuid,
    name: String,
    price: f64,
    stock: i32
}

#[derive(Error)]
pub enum PostFlowerError{
    #[error("Failed to insert flower")]
    InsertFlowerError(#[from] FlowerInsertError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostFlowerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostFlowerError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        HttpResponse::InternalServerError().body(format!("{}", self))
    }
}

#[tracing::instrument(
    "Adding flower to catalogue",
    skip(pool)
)]
pub async fn post_flower(
    pool: web::Data<DbPool>,
    form: web::Form<FlowerForm>
) -> Result<HttpResponse, PostFlowerError>{

    let flower = Flower{
        flower_id: Uuid::new_v4(),
        supplier_id: form.supplier_id,
        name: form.name.clone(),
        price: form.price,
        stock: form.stock
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool from within spawned task")?;

    insert_flower(conn, flower).await?;

    Ok(HttpResponse::Ok().finish())
}
