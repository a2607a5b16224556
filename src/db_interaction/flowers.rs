use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{RunQueryDsl, QueryDsl};
use thiserror::Error;

use crate::{models::Flower, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[tracing::instrument(
    "Getting flowers from db",
    skip_all
)]
pub async fn get_flowers(
    mut conn: DbConnection,
    page: i64,
    limit: i64
) -> Result<Vec<Flower>, anyhow::Error>{
    let offset_value = (page - 1) * limit;

    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::flowers;

        flowers::table
            .limit(limit)
            .offset(offset_value)
            .load::<Flower>(&mut conn)
            .context("Failed to get flowers")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[derive(Error)]
pub enum FlowerInsertError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to insert into flowers table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for FlowerInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Insert a flower to db",
    skip_all
)]
pub async fn insert_flower(
    mut conn: DbConnection,
    flower: Flower
) -> Result<(), FlowerInsertError> {

    spawn_blocking_with_tracing(move || {
        use crate::schema::flowers;

        diesel::insert_into(
            flowers::table
        )
        .values(flower)
        .execute(&mut conn)
    })
    .await??;

    Ok(())
}
