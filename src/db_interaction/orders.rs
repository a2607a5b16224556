use std::{error::Error, fmt::Debug};

use chrono::Utc;
use diesel::{Connection, JoinOnDsl};
use anyhow::Context;
use diesel::{RunQueryDsl, QueryDsl, ExpressionMethods};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::line_items::{insert_line_item_guarded, LineItemInsertError, NewLineItem}, models::{Order, OrderIntermediate}, routes::order::update::OrderStatus, schema::{order_flowers, orders}, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Function to delete order from DB, line items go with it via cascade
pub async fn delete_order_from_database(
    mut conn: DbConnection,
    order_id: Uuid
) -> Result<(), anyhow::Error> {
    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<(), anyhow::Error, _>(|conn| {

            diesel::delete(orders::table)
                .filter(orders::order_id.eq(order_id))
                .execute(conn)
                .context("Failed to delete order")?;

            Ok(())
        })
    })
    .await
    .map_err(|_| anyhow::anyhow!("Failed due to internal error"))??;

    Ok(res)
}

#[tracing::instrument(
    "Getting orders along with associated line items",
    skip_all
)]
pub async fn get_order_with_items(
    mut conn: DbConnection,
    page: i64,
    limit: i64,
    customer_id: Option<Uuid>
) -> Result<Vec<OrderWithItems>, anyhow::Error> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<Vec<OrderWithItems>, anyhow::Error, _>(|conn|{
            let order_ids = get_order_ids(conn, customer_id, page, limit)?;
            let mut ret: Vec<OrderWithItems> = Vec::new();

            for order_id in order_ids{
                let curr = get_order_with_items_by_id(conn, order_id)?;
                ret.push(curr);
            }

            Ok(ret)
        })
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}

#[tracing::instrument(
    "Getting order ids",
    skip_all
)]
pub fn get_order_ids(
    conn: &mut DbConnection,
    customer_id: Option<Uuid>,
    page: i64,
    limit: i64
) -> Result<Vec<Uuid>, anyhow::Error>{
    let mut query = orders::table
        .into_boxed();

    if let Some(customer_id) = customer_id {
        query = query.filter(orders::customer_id.eq(customer_id));
    }

    let offset_value = (page - 1) * limit;

    let result = query.select(orders::order_id)
        .limit(limit)
        .offset(offset_value)
        .load::<Uuid>(conn)
        .context("Failed to load order_ids")?;

    Ok(result)
}

// Struct to represent a line item within OrderWithItems
#[derive(Serialize, Deserialize)]
pub struct OrderLineItem {
    pub flower_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
}

// Struct to represent an order (with associated line items)
#[derive(Serialize, Deserialize)]
pub struct OrderWithItems {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub order_date: String,
    pub status: String,
    pub items: Vec<OrderLineItem>,
}

#[tracing::instrument(
    "Getting joined order with line items by id",
    skip_all
)]
pub fn get_order_with_items_by_id(conn: &mut DbConnection, target_order_id: Uuid) -> Result<OrderWithItems, anyhow::Error> {
    let results: Vec<OrderIntermediate> = orders::table
        .inner_join(order_flowers::table.on(order_flowers::order_id.eq(orders::order_id)))
        .filter(orders::order_id.eq(target_order_id))
        .select((
            orders::order_id,
            orders::customer_id,
            orders::employee_id,
            orders::order_date,
            orders::status,
            order_flowers::flower_id,
            order_flowers::quantity,
            order_flowers::unit_price,
        ))
        .load::<OrderIntermediate>(conn)
        .context("Failed to get line items by order_id")?;

    // Group line items by order and create OrderWithItems structure
    let mut items = Vec::new();
    let mut order_info: Option<OrderWithItems> = None;

    for order_intermediate in results {
        if order_info.is_none() {
            order_info = Some(OrderWithItems {
                order_id: order_intermediate.order_id,
                customer_id: order_intermediate.customer_id,
                employee_id: order_intermediate.employee_id,
                order_date: order_intermediate.order_date.to_string(),
                status: order_intermediate.status.clone(),
                items: Vec::new(),
            });
        }

        items.push(OrderLineItem{
            flower_id: order_intermediate.flower_id,
            quantity: order_intermediate.quantity,
            unit_price: order_intermediate.unit_price
        });
    }

    if let Some(mut order) = order_info {
        order.items = items;
        Ok(order)
    } else {
        Err(anyhow::anyhow!("No line items found for order"))
    }
}

// Error associated with creating an order and decrementing flower stock
#[derive(Error)]
pub enum CreateOrderError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Failed to add line item to order")]
    LineItemError(#[from] LineItemInsertError),
    #[error("An order needs at least one line item")]
    NoLineItemsError
}

impl Debug for CreateOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Creating order with line items and updating stock",
    skip_all
)]
pub async fn create_order_with_items(
    mut conn: DbConnection,
    customer_id: Uuid,
    employee_id: Uuid,
    items: Vec<NewLineItem>
) -> Result<Uuid, CreateOrderError> {

    if items.is_empty() {
        return Err(CreateOrderError::NoLineItemsError)
    }

    let ret: Uuid = spawn_blocking_with_tracing(move || {
        conn.transaction::<Uuid, CreateOrderError, _>(|conn|{
            let order = Order{
                order_id: Uuid::new_v4(),
                customer_id,
                employee_id,
                order_date: Utc::now(),
                status: "pending".to_string()
            };

            diesel::insert_into(orders::table)
                .values(&order)
                .execute(conn)?;

            // A single line item failing the stock guard rolls back the
            // whole order, an order is never persisted half-filled
            for item in items.iter(){
                insert_line_item_guarded(conn, order.order_id, item)?;
            }

            Ok(order.order_id)
        })
    })
    .await??;

    Ok(ret)
}

// Error associated with updating order status
#[derive(Error)]
pub enum UpdateOrderStatusError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("order_id: {0} doesn't exist")]
    NoOrderIdError(Uuid)
}

impl Debug for UpdateOrderStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Function to perform update order status operation
pub async fn update_order_status(
    mut conn: DbConnection,
    status: OrderStatus,
    order_id: Uuid
) -> Result<(), UpdateOrderStatusError> {

    let res = spawn_blocking_with_tracing(move || {
        conn.transaction::<(), UpdateOrderStatusError, _>(|conn| {
            let status = match status {
                OrderStatus::Pending => "pending",
                OrderStatus::Prepared => "prepared",
                OrderStatus::Delivered => "delivered",
                OrderStatus::Cancelled => "cancelled"
            }.to_string();

            let affected_rows = diesel::update(orders::table)
                                    .filter(orders::order_id.eq(order_id))
                                    .set(orders::status.eq(status))
                                    .execute(conn)?;

            if affected_rows == 0 {
                return Err(UpdateOrderStatusError::NoOrderIdError(order_id))
            }

            Ok(())
        })
    })
    .await??;

    Ok(res)
}
