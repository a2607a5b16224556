use std::{error::Error, fmt::Debug};

use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{db_interaction::{insert_customer, CustomerInsertError}, domain::{customer_email::CustomerEmail, phone_number::PhoneNumber}, models::Customer, utils::{error_fmt_chain, get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct CustomerForm{
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>
}

#[derive(Error)]
pub enum PostCustomerError{
    #[error("customer with this email already exists")]
    CustomerAlreadyExists(#[source] CustomerInsertError),
    #[error("Failed due to internal server error")]
    UnexpectedError(#[from] anyhow::Error)
}

impl Debug for PostCustomerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

impl ResponseError for PostCustomerError {
    fn error_response(&self) -> HttpResponse<actix_web::body::BoxBody> {
        match self {
            PostCustomerError::CustomerAlreadyExists(_) => {
                HttpResponse::BadRequest().body(format!("{}", self))
            },
            PostCustomerError::UnexpectedError(_) => {
                HttpResponse::InternalServerError().body(format!("{}", self))
            }
        }
    }
}

#[tracing::instrument(
    "Registering customer",
    skip(pool)
)]
pub async fn post_customer(
    pool: web::Data<DbPool>,
    form: web::Form<CustomerForm>
) -> Result<HttpResponse, actix_web::Error> {

    let email = match CustomerEmail::parse(form.email.clone()){
        Ok(email) => email,
        Err(e) => return Ok(HttpResponse::BadRequest().body(e))
    };

    let phone = match form.phone.clone(){
        Some(number) => {
            match PhoneNumber::parse(number){
                Ok(phone) => Some(phone.inner()),
                Err(e) => return Ok(HttpResponse::BadRequest().body(e))
            }
        },
        None => None
    };

    let customer = Customer{
        customer_id: Uuid::new_v4(),
        name: form.0.name,
        email: email.inner(),
        phone,
        address: form.0.address
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")
                .map_err(PostCustomerError::UnexpectedError)?;

    insert_customer(conn, customer)
        .await
        .map_err(|e| {
            match e {
                CustomerInsertError::EmailNotUnique(_) => PostCustomerError::CustomerAlreadyExists(e),
                _ => PostCustomerError::UnexpectedError(e.into())
            }
        })?;

    Ok(HttpResponse::Ok().finish())
}
