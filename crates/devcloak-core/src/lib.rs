pub mod config;
pub mod error;
pub mod flags;
pub mod types;

pub use config::{Config, ConcealmentConfig, ConfigPaths, FileFlagStore, ReportConfig};
pub use error::CoercionError;
pub use flags::{FlagSnapshot, FlagStore, PolicyFlag};
pub use types::{CallTarget, InterceptedCall, ProfileQuery, PropValue, ReturnType};
