use actix_web::{error::ErrorInternalServerError, web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::{db_interaction::insert_employee, domain::phone_number::PhoneNumber, models::Employee, utils::{get_pooled_connection, DbPool}};

#[derive(Deserialize, Debug)]
pub struct EmployeeForm{
    name: String,
    role: String,
    phone: Option<String>
}

#[tracing::instrument(
    "Registering employee",
    skip(pool)
)]
pub async fn post_employee(
    pool: web::Data<DbPool>,
    form: web::Form<EmployeeForm>
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

    let employee = Employee{
        employee_id: Uuid::new_v4(),
        name: form.0.name,
        role: form.0.role,
        phone
    };

    let conn = get_pooled_connection(&pool)
        .await
        .map_err(|_|{
            ErrorInternalServerError(
                anyhow::anyhow!("Failed due to internal error")
            )
        })?;

    insert_employee(conn, employee)
        .await
        .map_err(ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().finish())
}
