//! CLI command implementations.
//!
//! | Module     | Commands handled         |
//! |------------|--------------------------|
//! | `record`   | `Init`, `Register`       |
//! | `status`   | `Status`, `Rollup`       |
//! | `config`   | `Config`                 |

pub mod config;
pub mod record;
pub mod status;

pub use config::cmd_config;
pub use record::{cmd_init, cmd_register};
pub use status::{cmd_rollup, cmd_status};
