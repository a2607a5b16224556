use chrono::{DateTime, Utc};
use diesel::prelude::{Insertable, Queryable};
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::schema::customers;
use crate::schema::employees;
use crate::schema::flowers;
use crate::schema::order_flowers;
use crate::schema::orders;
use crate::schema::payments;
use crate::schema::suppliers;

#[derive(Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = customers)]
pub struct Customer{
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>
}

#[derive(Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = employees)]
pub struct Employee{
    pub employee_id: Uuid,
    pub name: String,
    pub role: String,
    pub phone: Option<String>
}

#[derive(Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = suppliers)]
pub struct Supplier{
    pub supplier_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>
}

#[derive(Queryable, Insertable, Serialize, Deserialize, Clone)]
#[diesel(table_name = flowers)]
pub struct Flower{
    pub flower_id: Uuid,
    pub supplier_id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = orders)]
pub struct Order{
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String
}

#[derive(Queryable, Insertable, Serialize, Deserialize)]
#[diesel(table_name = payments)]
pub struct Payment{
    pub payment_id: Uuid,
    pub order_id: Uuid,
    pub method: String,
    pub amount: f64,
    pub paid_at: DateTime<Utc>
}

#[derive(Queryable, Insertable)]
#[diesel(table_name = order_flowers)]
pub struct OrderFlowerModel{
    pub order_id: Uuid,
    pub flower_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64
}

// Row shape produced by joining orders with order_flowers
#[derive(Queryable)]
pub struct OrderIntermediate{
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub status: String,
    pub flower_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64
}
