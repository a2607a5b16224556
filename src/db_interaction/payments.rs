use std::{error::Error, fmt::Debug};

use thiserror::Error;
use diesel::RunQueryDsl;
use uuid::Uuid;

use crate::{models::Payment, telemetry::spawn_blocking_with_tracing, utils::{error_fmt_chain, DbConnection}};

// Error associated with recording a payment against an order
#[derive(Error)]
pub enum PaymentInsertError{
    #[error("Tokio threadpool error occured")]
    ThreadpoolError(#[from] tokio::task::JoinError),
    #[error("order_id: {0} already has a payment recorded")]
    AlreadyPaid(Uuid),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error)
}

impl Debug for PaymentInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

#[tracing::instrument(
    "Recording payment for order",
    skip_all
)]
pub async fn insert_payment(
    mut conn: DbConnection,
    payment: Payment
) -> Result<(), PaymentInsertError> {
    let order_id = payment.order_id;

    spawn_blocking_with_tracing(move || {
        use crate::schema::payments;

        diesel::insert_into(payments::table)
            .values(payment)
            .execute(&mut conn)
            .map_err(|e|{
                match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    ) => PaymentInsertError::AlreadyPaid(order_id),

                    other => PaymentInsertError::RunQueryError(other)
                }
            })
    })
    .await??;

    Ok(())
}
