//! Command implementations.

pub mod config;
pub mod import;
pub mod lookup;

pub use self::config::execute_config;
pub use self::import::execute_import;
pub use self::lookup::execute_lookup;
