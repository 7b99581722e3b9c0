//! 集成测试共用工具
//!
//! 需要一个可用的PostgreSQL实例，连接串通过 `OXPART_TEST_PG_URL`
//! 环境变量提供；未设置或无法连接时测试跳过而不是失败。

use std::time::Duration;

use oxpart::database::DbSession;
use oxpart::{Interval, PartitionSpec};

pub const TEST_URL_ENV: &str = "OXPART_TEST_PG_URL";

/// 测试库中代替真实 `generate_partition_triggers_ddl` 的桩函数
///
/// 返回的DDL与真实函数的输出约定一致：一个
/// `<table>_partition_handler()` 处理函数（内含注释形式的purge语句）
/// 和一个 `insert_<table>_trigger` 插入触发器。
pub const STUB_GENERATOR_SQL: &str = r#"
CREATE OR REPLACE FUNCTION generate_partition_triggers_ddl(
    table_name text,
    column_name text,
    interval_unit text,
    interval_to_keep int
) RETURNS text AS $FN$
SELECT 'CREATE OR REPLACE FUNCTION ' || table_name || '_partition_handler() RETURNS trigger AS $HANDLER$'
    || E'\nBEGIN'
    || E'\n    -- split every 1 ' || interval_unit || ' on ' || column_name
        || ', keep ' || interval_to_keep::text
    || E'\n    -- EXECUTE(''DROP TABLE IF EXISTS '' || quote_ident(''' || table_name || '_expired''));'
    || E'\n    RETURN NEW;'
    || E'\nEND;'
    || E'\n$HANDLER$ LANGUAGE plpgsql;'
    || E'\nCREATE TRIGGER insert_' || table_name || '_trigger'
    || E'\n    BEFORE INSERT ON ' || table_name
    || E'\n    FOR EACH ROW EXECUTE FUNCTION ' || table_name || '_partition_handler();'
$FN$ LANGUAGE sql;
"#;

/// 建立测试会话，环境不可用时返回None并跳过
pub async fn test_session() -> Option<DbSession> {
    let url = match std::env::var(TEST_URL_ENV) {
        Ok(url) => url,
        Err(_) => {
            println!("⚠️  {} not set. Skipping test.", TEST_URL_ENV);
            return None;
        }
    };

    match tokio::time::timeout(Duration::from_secs(30), DbSession::connect(&url, false)).await {
        Ok(Ok(session)) => Some(session),
        Ok(Err(e)) => {
            println!("⚠️  PostgreSQL connection failed: {}. Skipping test.", e);
            None
        }
        Err(_) => {
            println!("⚠️  PostgreSQL connection timeout. Skipping test.");
            None
        }
    }
}

pub fn spec_for(table: &str) -> PartitionSpec {
    PartitionSpec {
        table_name: table.to_string(),
        column_name: "time_stamp".to_string(),
        interval: Interval::Day,
        interval_to_keep: 10,
        enable_purging: true,
    }
}

pub async fn create_test_table(session: &DbSession, table: &str) -> oxpart::Result<()> {
    session
        .execute_ddl(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id SERIAL,
                time_stamp TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
            )",
            table
        ))
        .await
}

pub async fn install_stub_generator(session: &DbSession) -> oxpart::Result<()> {
    session.execute_ddl(STUB_GENERATOR_SQL).await
}

/// 清理测试对象，顺序与依赖关系一致
pub async fn cleanup(session: &DbSession, table: &str) {
    let _ = session
        .execute_ddl(&format!(
            "DROP TRIGGER IF EXISTS insert_{}_trigger ON {}",
            table, table
        ))
        .await;
    let _ = session
        .execute_ddl(&format!(
            "DROP FUNCTION IF EXISTS {}_partition_handler()",
            table
        ))
        .await;
    let _ = session
        .execute_ddl(&format!("DROP TABLE IF EXISTS {}", table))
        .await;
}

pub async fn trigger_count(session: &DbSession, table: &str) -> oxpart::Result<i64> {
    let sql = format!(
        "SELECT COUNT(*)::text FROM pg_trigger t \
         JOIN pg_class c ON c.oid = t.tgrelid \
         WHERE t.tgname = 'insert_{}_trigger' AND c.relname = '{}' AND NOT t.tgisinternal",
        table, table
    );
    let count = session.query_scalar(&sql).await?.unwrap_or_default();
    Ok(count.parse::<i64>().unwrap_or(0))
}

pub async fn handler_count(session: &DbSession, table: &str) -> oxpart::Result<i64> {
    let sql = format!(
        "SELECT COUNT(*)::text FROM pg_proc WHERE proname = '{}_partition_handler'",
        table
    );
    let count = session.query_scalar(&sql).await?.unwrap_or_default();
    Ok(count.parse::<i64>().unwrap_or(0))
}

pub async fn handler_source(session: &DbSession, table: &str) -> oxpart::Result<Option<String>> {
    let sql = format!(
        "SELECT prosrc FROM pg_proc WHERE proname = '{}_partition_handler'",
        table
    );
    session.query_scalar(&sql).await
}
