pub mod format;
pub mod logger;
