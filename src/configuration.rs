use config::{Config, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings
}

#[derive(Deserialize, Debug)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16
}

#[derive(Deserialize, Debug)]
pub struct DatabaseSettings{
    pub username: String,
    pub password: SecretString,
    pub host: String,
    pub port: u16,
    pub name: String
}

impl Settings{
    pub fn get() -> Self{
        let config = Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .build()
            .expect("Failed to get configuration")
            .try_deserialize::<Settings>()
            .expect("Failed to deserialize to Settings struct");

        config
    }
}

impl DatabaseSettings{
    // Server-level url, used when the database itself doesn't exist yet
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}
