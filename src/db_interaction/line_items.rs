use std::{error::Error, fmt::Debug};

use diesel::{Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{models::{Flower, OrderFlowerModel}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Deserialize, Debug)]
pub struct NewLineItem{
    pub flower_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64
}

// Error associated with inserting a line item against available stock
#[derive(Error)]
pub enum LineItemInsertError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("flower_id: {0} doesn't exist")]
    UnknownFlower(Uuid),
    #[error("Requested {requested} of flower_id: {flower_id} but only {available} in stock")]
    InsufficientStock{
        flower_id: Uuid,
        requested: i32,
        available: i32
    }
}

impl Debug for LineItemInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Adding a line item to an existing order",
    skip(conn)
)]
pub async fn insert_line_item(
    mut conn: DbConnection,
    order_id: Uuid,
    line_item: NewLineItem
) -> Result<(), LineItemInsertError> {

    spawn_blocking_with_tracing(move || {
        conn.transaction::<(), LineItemInsertError, _>(|conn| {
            insert_line_item_guarded(conn, order_id, &line_item)
        })
    })
    .await??;

    Ok(())
}

// Lock-then-check-then-decrement. Must run inside a transaction, the
// FOR UPDATE lock on the flower row serializes concurrent insertions
// against the same flower and is held until the transaction ends.
pub fn insert_line_item_guarded(
    conn: &mut DbConnection,
    order_id: Uuid,
    line_item: &NewLineItem
) -> Result<(), LineItemInsertError> {
    use crate::schema::flowers;
    use crate::schema::order_flowers;

    let flower = flowers::table
        .filter(flowers::flower_id.eq(line_item.flower_id))
        .for_update()
        .first::<Flower>(conn)
        .optional()?;

    let flower = match flower {
        Some(flower) => flower,
        None => return Err(LineItemInsertError::UnknownFlower(line_item.flower_id))
    };

    if line_item.quantity > flower.stock {
        return Err(LineItemInsertError::InsufficientStock{
            flower_id: line_item.flower_id,
            requested: line_item.quantity,
            available: flower.stock
        });
    }

    let row = OrderFlowerModel{
        order_id,
        flower_id: line_item.flower_id,
        quantity: line_item.quantity,
        unit_price: line_item.unit_price
    };

    diesel::insert_into(order_flowers::table)
        .values(row)
        .execute(conn)?;

    diesel::update(flowers::table.filter(flowers::flower_id.eq(line_item.flower_id)))
        .set(flowers::stock.eq(flower.stock - line_item.quantity))
        .execute(conn)?;

    Ok(())
}
