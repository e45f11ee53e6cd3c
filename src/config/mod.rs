//! Configuration module

mod site;

pub use site::ConfigError;
pub use site::DirConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILE;
