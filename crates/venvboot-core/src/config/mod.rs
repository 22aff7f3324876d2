//! venvboot configuration layer
//!
//! Every environment variable read goes through this module; callers get
//! structured config instead of calling `std::env::var` directly.
//!
//! - `loader`: `env_or`, `env_optional`, `env_bool` and `.env` loading
//! - `schema`: `InterpreterConfig`, `PathsConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants (with legacy aliases)

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv};
pub use schema::{InterpreterConfig, ObservabilityConfig, PathsConfig};
