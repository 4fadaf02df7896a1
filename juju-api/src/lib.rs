pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod state;
pub mod yaml;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routes::create_app;
pub use state::AppState;
