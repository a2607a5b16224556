use std::{error::Error, fmt::Debug};

use diesel::RunQueryDsl;
use thiserror::Error;

use crate::{models::Employee, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

#[derive(Error)]
pub enum EmployeeInsertError{
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("Failed to insert into employees table")]
    InsertError(#[from] diesel::result::Error)
}

impl Debug for EmployeeInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Inserting employee into the database",
    skip_all
)]
pub async fn insert_employee(
    mut conn: DbConnection,
    employee: Employee
) -> Result<(), EmployeeInsertError> {

    spawn_blocking_with_tracing(move || {
        use crate::schema::employees;

        diesel::insert_into(employees::table)
            .values(employee)
            .execute(&mut conn)
    })
    .await??;

    Ok(())
}
