//! oxpart - PostgreSQL 分区触发器管理工具
//!
//! 通过数据库端的 `generate_partition_triggers_ddl` 函数为单张表
//! 启用或禁用基于时间的分区触发器，并可选开启过期分区自动清理。

#![doc(html_root_url = "https://docs.rs/oxpart/0.1.0")]

pub mod app;
pub mod config;
pub mod database;
pub mod error;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use database::{DbSession, Interval, PartitionSpec, PartitionTriggerManager};
pub use error::{PartitionError, Result};

/// oxpart 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
