use std::{error::Error, fmt::Debug};

use anyhow::Context;
use diesel::{RunQueryDsl, QueryDsl};
use thiserror::Error;

use crate::{models::Customer, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Error)]
pub enum CustomerInsertError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("email field is not unique")]
    EmailNotUnique(#[source] anyhow::Error),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for CustomerInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting customer into the database",
    skip_all
)]
pub async fn insert_customer(
    mut conn: DbConnection,
    customer: Customer
) -> Result<(), CustomerInsertError> {

    spawn_blocking_with_tracing(move || {
        use crate::schema::customers;

        diesel::insert_into(customers::table)
            .values(customer)
            .execute(&mut conn)
            .map_err(|e|{
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        a
                    ) => {
                        CustomerInsertError::EmailNotUnique(anyhow::anyhow!(a.message().to_string()))
                    },

                    other => CustomerInsertError::RunQueryError(other)
                }
            })
    })
    .await??;

    Ok(())
}

#[tracing::instrument(
    "Getting customers from db",
    skip_all
)]
pub async fn get_customers(
    mut conn: DbConnection,
    page: i64,
    limit: i64
) -> Result<Vec<Customer>, anyhow::Error>{
    let offset_value = (page - 1) * limit;

    let res = spawn_blocking_with_tracing(move || {
        use crate::schema::customers;

        customers::table
            .limit(limit)
            .offset(offset_value)
            .load::<Customer>(&mut conn)
            .context("Failed to get customers")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(res)
}
