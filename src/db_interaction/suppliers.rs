use std::{error::Error, fmt::Debug};

use diesel::RunQueryDsl;
use thiserror::Error;

use crate::{models::Supplier, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Error)]
pub enum SupplierInsertError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to insert into suppliers table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for SupplierInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting supplier into the database",
    skip_all
)]
pub async fn insert_supplier(
    mut conn: DbConnection,
    supplier: Supplier
) -> Result<(), SupplierInsertError> {

    spawn_blocking_with_tracing(move || {
        use crate::schema::suppliers;

        diesel::insert_into(suppliers::table)
            .values(supplier)
            .execute(&mut conn)
    })
    .await??;

    Ok(())
}
