//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 数据库会话模块
//!
//! 持有进程生命周期内唯一的一条PostgreSQL连接，
//! 由调用方显式构造、显式关闭，并注入到需要执行SQL的组件中。

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::time::Duration;

use super::connection_string::ParsedConnectionString;
use crate::error::{PartitionError, Result};
use crate::utils::redaction::redact_connection_string;

/// 数据库会话
///
/// 封装单条数据库连接，不做连接池、不做重试。
pub struct DbSession {
    connection: DatabaseConnection,
}

impl DbSession {
    /// 建立数据库会话
    ///
    /// `db_url` 必须是 PostgreSQL 连接串，支持 `postgresql+<driver>://`
    /// 方言前缀（driver 后缀在连接前被去除）。`echo_sql` 为 true 时
    /// 回显实际发送到数据库的 SQL 语句。
    pub async fn connect(db_url: &str, echo_sql: bool) -> Result<Self> {
        let parsed = ParsedConnectionString::parse(db_url)?;

        let mut opt = ConnectOptions::new(parsed.normalized());
        opt.max_connections(1)
            .connect_timeout(Duration::from_secs(5))
            .sqlx_logging(echo_sql);

        let connection = Database::connect(opt).await.map_err(|e| {
            PartitionError::DatabaseError(format!(
                "failed to connect to {}: {}",
                redact_connection_string(db_url),
                e
            ))
        })?;

        tracing::debug!("connected to {}", redact_connection_string(db_url));
        Ok(Self { connection })
    }

    /// 执行返回单个标量文本的查询
    pub async fn query_scalar(&self, sql: &str) -> Result<Option<String>> {
        let statement =
            Statement::from_string(sea_orm::DatabaseBackend::Postgres, sql.to_owned());
        match self.connection.query_one(statement).await? {
            Some(row) => Ok(row.try_get_by_index::<Option<String>>(0)?),
            None => Ok(None),
        }
    }

    /// 以原始文本方式执行DDL
    ///
    /// 生成的DDL可能包含多条语句，走非预编译路径执行。
    pub async fn execute_ddl(&self, sql: &str) -> Result<()> {
        self.connection.execute_unprepared(sql).await?;
        Ok(())
    }

    /// 关闭会话，释放底层连接
    pub async fn close(self) -> Result<()> {
        self.connection.close().await?;
        Ok(())
    }
}
