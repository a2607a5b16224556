use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use diesel::{r2d2::ConnectionManager, PgConnection};
use r2d2::Pool;
use tracing_actix_web::TracingLogger;

use crate::{
    configuration::{DatabaseSettings, Settings},
    routes::{
        customer::{get_customer, post_customer},
        employee::post_employee,
        flower::{get_flower, post_flower},
        health_check,
        order::{delete_order, get_order, post_order, post_order_item, update_order},
        payment::post_payment,
        supplier::post_supplier,
    },
    utils::DbPool,
};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub async fn new(settings: Settings) -> Result<Application, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)?;

        let listener = TcpListener::bind((
            settings.application.host.as_str(),
            settings.application.port
        ))?;
        let port = listener.local_addr()?.port();

        let server = run(listener, pool)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    let manager = ConnectionManager::<PgConnection>::new(settings.get_database_table_url());
    let pool = Pool::builder().build(manager)?;

    Ok(pool)
}

fn run(listener: TcpListener, pool: DbPool) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health", web::get().to(health_check))
            .route("/customer", web::post().to(post_customer))
            .route("/customer", web::get().to(get_customer))
            .route("/employee", web::post().to(post_employee))
            .route("/supplier", web::post().to(post_supplier))
            .route("/flower", web::post().to(post_flower))
            .route("/flower", web::get().to(get_flower))
            .route("/order", web::post().to(post_order))
            .route("/order", web::get().to(get_order))
            .route("/order", web::delete().to(delete_order))
            .route("/order/item", web::post().to(post_order_item))
            .route("/order/status", web::post().to(update_order))
            .route("/payment", web::post().to(post_payment))
            .app_data(pool.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
