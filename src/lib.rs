pub mod checks;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod paste;
pub mod routing;

pub use error::{ErrorKind, LogRouterError, Result};
pub use routing::LogRouter;
