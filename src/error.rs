//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了分区工具的错误类型和处理机制。

use thiserror::Error;

/// 分区工具错误类型枚举
///
/// 定义了启用/禁用分区触发器过程中可能发生的各种错误类型
#[derive(Error, Debug)]
pub enum PartitionError {
    /// 配置错误
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// 输入校验错误
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 数据库连接错误
    #[error("Database connection error: {0}")]
    DatabaseError(String),

    /// Sea-ORM数据库错误
    #[error("Sea-ORM error: {0}")]
    SeaOrmError(#[from] sea_orm::DbErr),

    /// 数据库端函数未返回DDL
    #[error("Generated DDL missing: {0}")]
    MissingDdl(String),

    /// purge开关修补失败
    #[error("Purge patch failed: {0}")]
    PurgePatch(String),

    /// 配置文件解析错误
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// IO错误
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// 分区操作结果类型别名
///
/// 简化错误处理，所有分区操作都返回此类型
pub type Result<T> = std::result::Result<T, PartitionError>;
