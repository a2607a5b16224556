use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{db_interaction::insert_supplier, domain::phone_number::PhoneNumber, models::Supplier, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct SupplierForm{
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>
}

#[tracing::instrument(
    "Registering supplier",
    skip(pool)
)]
pub async fn post_supplier(
    pool: web::Data<DbPool>,
    form: web::Form<SupplierForm>
) -> Result<HttpResponse, actix_web::Error> {

    let phone = match form.phone.clone(){
        Some(number) => {
            match PhoneNumber::parse(number){
                Ok(phone) => Some(phone.inner()),
                Err(e) => return Ok(HttpResponse::BadRequest().body(e))
            }
        },
        None => None
    };

    let supplier = Supplier{
        supplier_id: Uuid::new_v4(),
        name: form.0.name,
        email: form.0.email,
        phone,
        address: form.0.address
    };

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(|_|{
            ErrorInternalServerError(
                anyhow::anyhow!("Failed due to internal error")
            )
        })?;

    insert_supplier(conn, supplier)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().finish())
}
