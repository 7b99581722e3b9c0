//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 数据库分区触发器模块
//!
//! 提供PostgreSQL基于时间的分区触发器的启用/禁用功能。
//! 分区本身的创建、区间推进和清理决策都在数据库端的
//! `generate_partition_triggers_ddl`函数内实现，本模块只负责
//! 生成调用语句、修补purge开关并执行返回的DDL。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PartitionError, Result};
use crate::utils::validate_identifier;

pub mod connection;
pub mod connection_string;
pub mod trigger;

pub use connection::DbSession;
pub use connection_string::ParsedConnectionString;
pub use trigger::PartitionTriggerManager;

/// 分区区间单位
///
/// 对应Postgres支持的interval单位，一个分区的跨度是一个单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// 按年分区
    Year,
    /// 按月分区
    Month,
    /// 按日分区
    Day,
    /// 按小时分区
    Hour,
    /// 按分钟分区
    Minute,
}

impl Interval {
    /// SQL中使用的区间单位写法
    pub fn as_sql(&self) -> &'static str {
        match self {
            Interval::Year => "YEAR",
            Interval::Month => "MONTH",
            Interval::Day => "DAY",
            Interval::Hour => "HOUR",
            Interval::Minute => "MINUTE",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// 单表分区触发器配置
///
/// 完整描述一张表的分区触发器参数。字段默认值即默认工作流
/// 所使用的参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionSpec {
    /// 目标表名
    pub table_name: String,
    /// 分区键列名，必须是Postgres timestamp类型的列
    pub column_name: String,
    /// 分区区间单位
    pub interval: Interval,
    /// purge前保留的区间数量
    pub interval_to_keep: u32,
    /// 是否在创建新分区时删除过期分区
    pub enable_purging: bool,
}

impl Default for PartitionSpec {
    fn default() -> Self {
        Self {
            table_name: "data_sample_raw".to_string(),
            column_name: "time_stamp".to_string(),
            interval: Interval::Day,
            interval_to_keep: 10,
            enable_purging: true,
        }
    }
}

impl PartitionSpec {
    /// 校验分区配置
    ///
    /// 表名和列名会被拼接进DDL语句，必须是普通SQL标识符；
    /// 保留区间数必须为正数。
    pub fn validate(&self) -> Result<()> {
        validate_identifier("table name", &self.table_name)?;
        validate_identifier("column name", &self.column_name)?;
        if self.interval_to_keep == 0 {
            return Err(PartitionError::InvalidInput(
                "interval_to_keep must be a positive number of intervals".to_string(),
            ));
        }
        Ok(())
    }
}
