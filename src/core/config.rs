use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use sqlx::mysql::MySqlConnectOptions;
use sqlx::ConnectOptions;

use super::{AppError, AppErrorType};

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub catalog_server_config: CatalogServerConfig,
    pub mysql: MySqlConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir().expect("Failed to find the current dir");
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("EBOOK_CATALOG_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse EBOOK_CATALOG_APP_ENVIRONMENT");

        let configurations = config::Config::builder()
            .add_source(
                config::File::from(config_dir.join(app_environment.as_str())).required(true),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone)]
pub struct CatalogServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct MySqlConfig {
    pub username: String,
    pub password: Secret<String>,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

impl MySqlConfig {
    /// All four connection parameters are required; checked before any
    /// connection attempt.
    pub fn validate(&self) -> Result<(), AppError> {
        let missing = [
            ("host", self.host.is_empty()),
            ("user", self.username.is_empty()),
            ("password", self.password.expose_secret().is_empty()),
            ("database", self.database_name.is_empty()),
        ]
        .into_iter()
        .find(|(_, empty)| *empty);

        match missing {
            Some((field, _)) => Err(AppError {
                message: Some(format!("Missing required connection field: {}", field)),
                cause: None,
                error_type: AppErrorType::ConfigurationError,
            }),
            None => Ok(()),
        }
    }

    pub fn connect(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .database(&self.database_name);

        options.log_statements(tracing::log::LevelFilter::Trace)
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local` or `production` ",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_err, assert_ok};

    fn valid_config() -> MySqlConfig {
        MySqlConfig {
            username: "root".into(),
            password: Secret::new("admin".into()),
            host: "localhost".into(),
            port: 3306,
            database_name: "ebooks_db".into(),
        }
    }

    #[test]
    fn valid_connection_parameters_pass_validation() {
        assert_ok!(valid_config().validate());
    }

    #[test]
    fn each_empty_field_is_rejected_as_configuration_error() {
        let mut missing_host = valid_config();
        missing_host.host.clear();
        let mut missing_user = valid_config();
        missing_user.username.clear();
        let mut missing_password = valid_config();
        missing_password.password = Secret::new(String::new());
        let mut missing_database = valid_config();
        missing_database.database_name.clear();

        for config in [missing_host, missing_user, missing_password, missing_database] {
            let error = config.validate().unwrap_err();
            assert_eq!(error.error_type, AppErrorType::ConfigurationError);
        }
    }

    #[test]
    fn shipped_configurations_pass_validation() {
        let config_dir = std::path::Path::new("src/core/configurations");
        for environment in [Environment::Local, Environment::Production] {
            let settings = config::Config::builder()
                .add_source(
                    config::File::from(config_dir.join(environment.as_str())).required(true),
                )
                .build()
                .unwrap();
            let app_config: AppConfig = settings.try_deserialize().unwrap();
            assert_ok!(app_config.mysql.validate());
        }
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert_ok!(Environment::try_from("local".to_string()));
        assert_ok!(Environment::try_from("PRODUCTION".to_string()));
        assert_err!(Environment::try_from("sandbox".to_string()));
    }
}
