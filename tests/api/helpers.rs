use std::error::Error;

use diesel::{pg::Pg, r2d2::ConnectionManager, Connection, ExpressionMethods, PgConnection, QueryDsl, RunQueryDsl};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use flowershop::{configuration::{DatabaseSettings, Settings}, models::{Customer, Employee, Flower, Supplier}, startup::Application, telemetry::{get_subscriber, init_subscriber}, utils::DbPool};
use once_cell::sync::Lazy;
use r2d2::Pool;
use reqwest::redirect::Policy;
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "flowershop-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }

    ()
});

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

fn run_migrations(connection: &mut impl MigrationHarness<Pg>)
    -> Result<(), Box<dyn Error + Send + Sync + 'static>>
{
    connection.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub api_client: reqwest::Client
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) -> DbPool{
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");

        let pool = Pool::new(ConnectionManager::<PgConnection>::new(settings.get_database_table_url()))
            .expect("Failed to build connection pool to test database");

        let mut conn = pool.get().expect("Failed to get connection to test database");
        run_migrations(&mut conn).expect("Failed to run migrations");

        pool
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let mut settings = Settings::get();
        settings.application.port = 0;
        settings.database.name = Uuid::new_v4().to_string();

        let pool = TestApp::create_db(&settings.database);

        let application = Application::new(settings)
                            .await
                            .expect("Failed to build application");

        tokio::task::spawn(application.server);

        let api_client = reqwest::Client::builder()
                            .redirect(Policy::none())
                            .cookie_store(true)
                            .build()
                            .unwrap();

        return TestApp{
            host: application.host,
            port: application.port,
            pool,
            api_client
        }
    }

    pub async fn post_order(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(format!("{}/order", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to order endpoint")
    }

    pub async fn post_order_item(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(format!("{}/order/item", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to order item endpoint")
    }

    pub async fn post_payment(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(format!("{}/payment", self.get_app_url()))
            .form(body)
            .send()
            .await
            .expect("Failed to send request to payment endpoint")
    }

    pub async fn post_customer(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(format!("{}/customer", self.get_app_url()))
            .form(body)
            .send()
            .await
            .expect("Failed to send request to customer endpoint")
    }

    pub async fn post_flower(&self, body: &serde_json::Value) -> reqwest::Response{
        self.api_client.post(format!("{}/flower", self.get_app_url()))
            .form(body)
            .send()
            .await
            .expect("Failed to send request to flower endpoint")
    }
}

// Seed a supplier row and one flower it supplies, bypassing the http layer
pub fn create_supplier_and_flower(app: &TestApp, stock: i32, price: f64) -> (Uuid, Uuid){
    use flowershop::schema::{flowers, suppliers};

    let supplier = Supplier{
        supplier_id: Uuid::new_v4(),
        name: "Verdant Fields".to_string(),
        email: Some("orders@verdantfields.example".to_string()),
        phone: None,
        address: None
    };

    let flower = Flower{
        flower_id: Uuid::new_v4(),
        supplier_id: supplier.supplier_id,
        name: "Red Rose".to_string(),
        price,
        stock
    };

    let mut conn = app.pool.get().unwrap();

    diesel::insert_into(suppliers::table)
        .values(&supplier)
        .execute(&mut conn)
        .unwrap();

    diesel::insert_into(flowers::table)
        .values(&flower)
        .execute(&mut conn)
        .unwrap();

    (supplier.supplier_id, flower.flower_id)
}

// Seed the customer and employee an order hangs off
pub fn create_customer_and_employee(app: &TestApp) -> (Uuid, Uuid){
    use flowershop::schema::{customers, employees};

    let customer = Customer{
        customer_id: Uuid::new_v4(),
        name: "Asha Mehta".to_string(),
        email: format!("{}@customers.example", Uuid::new_v4()),
        phone: Some("9876543210".to_string()),
        address: Some("12 Lotus Lane".to_string())
    };

    let employee = Employee{
        employee_id: Uuid::new_v4(),
        name: "Ravi Kumar".to_string(),
        role: "florist".to_string(),
        phone: None
    };

    let mut conn = app.pool.get().unwrap();

    diesel::insert_into(customers::table)
        .values(&customer)
        .execute(&mut conn)
        .unwrap();

    diesel::insert_into(employees::table)
        .values(&employee)
        .execute(&mut conn)
        .unwrap();

    (customer.customer_id, employee.employee_id)
}

pub fn get_flower_stock(app: &TestApp, flower_id: Uuid) -> i32{
    use flowershop::schema::flowers;

    let mut conn = app.pool.get().unwrap();

    flowers::table
        .filter(flowers::flower_id.eq(flower_id))
        .select(flowers::stock)
        .first::<i32>(&mut conn)
        .unwrap()
}
