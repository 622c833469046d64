//! # System Constants
//!
//! Operational defaults and record field names shared by the parser,
//! the ingestion layer and configuration.

/// Defaults applied when neither a config file nor the environment override them
pub mod defaults {
    pub const WORKER_COUNT: usize = 6;
    pub const INPUT_PATH: &str = "1.json";
    pub const ENVIRONMENT: &str = "development";
}

/// Keys recognized inside a debt record
pub mod fields {
    pub const COMPANY: &str = "company";
    pub const DEBT: &str = "debt";
    pub const PHONES: &str = "phones";
    pub const PHONE: &str = "phone";
}

/// Byte a line must contain to be considered a record
pub const RECORD_OPEN: u8 = b'{';

/// Prefix for environment variable configuration overrides
pub const ENV_PREFIX: &str = "DEBT_CONSOLIDATOR";
