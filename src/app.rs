//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块实现默认的分区触发器工作流。

use anyhow::{Context, Result};
use secrecy::ExposeSecret;

use crate::config::{self, Config};
use crate::database::{DbSession, PartitionTriggerManager};

/// 运行默认工作流
///
/// 读取 `PG_DB_URL` 和配置，建立会话后先禁用目标表上既有的
/// 分区触发器，再按配置安装新的触发器。会话在所有退出路径上
/// 都会被关闭。
pub async fn run() -> Result<()> {
    crate::telemetry::init_tracing();

    let db_url = config::db_url_from_env()?;
    let config = Config::load().context("failed to load configuration")?;

    let session = DbSession::connect(db_url.expose_secret(), config.global.echo_sql).await?;
    let outcome = run_default_workflow(&session, &config).await;
    let closed = session.close().await;
    outcome?;
    closed?;
    Ok(())
}

async fn run_default_workflow(session: &DbSession, config: &Config) -> crate::error::Result<()> {
    let manager = PartitionTriggerManager::new(session);
    manager.disable(&config.partition.table_name).await?;
    manager.enable(&config.partition).await?;
    Ok(())
}
