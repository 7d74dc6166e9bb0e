pub mod config;
mod responses;
mod telemetry;

pub use self::config::AppConfig;
pub use self::config::MySqlConfig;
pub use responses::*;
pub use telemetry::*;
