//! Fixed account settings.
//!
//! The connection literals are the only source of parameters: nothing is read
//! from files or the environment, so every run talks to the same account.

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1247;
pub const DEFAULT_USER_NAME: &str = "rods";
pub const DEFAULT_PASSWORD: &str = "rods";
pub const DEFAULT_HOME_DIRECTORY: &str = "/tempZone/home/rods";
pub const DEFAULT_ZONE: &str = "tempZone";
pub const DEFAULT_STORAGE_RESOURCE: &str = "demoResc";

/// Name printed in the usage line.
pub const PROGRAM_NAME: &str = "gridprobe";
