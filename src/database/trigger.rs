//! 分区触发器管理器实现
//!
//! 启用路径：调用数据库端的 `generate_partition_triggers_ddl` 函数取得
//! 触发器/处理函数的DDL文本，按需修补purge开关后整体执行。
//! 禁用路径：按命名约定DROP触发器和处理函数，现有分区保持不动。

use crate::database::connection::DbSession;
use crate::database::PartitionSpec;
use crate::error::{PartitionError, Result};
use crate::utils::validate_identifier;

/// 生成的DDL中被注释掉的purge语句前缀
///
/// `generate_partition_triggers_ddl` 默认以注释形式输出删除过期分区的
/// 语句，取消注释即开启随插入自动清理。匹配是字面前缀匹配，
/// 前缀变化意味着数据库端函数的输出约定变了。
pub const PURGE_STMT_COMMENTED: &str = "-- EXECUTE('DROP TABLE IF EXISTS ' || quote_ident('";

/// 取消注释后的purge语句前缀
pub const PURGE_STMT_ACTIVE: &str = "EXECUTE('DROP TABLE IF EXISTS ' || quote_ident('";

/// 根据表名构造插入触发器名
pub fn trigger_name(table_name: &str) -> String {
    format!("insert_{}_trigger", table_name)
}

/// 根据表名构造分区处理函数名
pub fn handler_name(table_name: &str) -> String {
    format!("{}_partition_handler", table_name)
}

/// 构造调用数据库端DDL生成函数的语句
pub fn generate_ddl_statement(spec: &PartitionSpec) -> String {
    format!(
        "SELECT generate_partition_triggers_ddl('{}', '{}', '{}', {});",
        spec.table_name, spec.column_name, spec.interval, spec.interval_to_keep
    )
}

/// 构造删除插入触发器的语句
///
/// RESTRICT：有依赖对象时删除失败并上抛，不做级联
pub fn drop_trigger_statement(table_name: &str) -> String {
    format!(
        "DROP TRIGGER IF EXISTS {} ON {} RESTRICT;",
        trigger_name(table_name),
        table_name
    )
}

/// 构造删除分区处理函数的语句
pub fn drop_function_statement(table_name: &str) -> String {
    format!(
        "DROP FUNCTION IF EXISTS {}() RESTRICT;",
        handler_name(table_name)
    )
}

/// 在生成的DDL中取消注释purge语句
///
/// 生成的DDL不含预期的注释前缀时返回错误，而不是安装一个
/// 实际不会purge的处理函数。
pub fn activate_purge(ddl: &str) -> Result<String> {
    if !ddl.contains(PURGE_STMT_COMMENTED) {
        return Err(PartitionError::PurgePatch(format!(
            "generated DDL does not contain the expected commented purge statement '{}'",
            PURGE_STMT_COMMENTED
        )));
    }
    Ok(ddl.replace(PURGE_STMT_COMMENTED, PURGE_STMT_ACTIVE))
}

/// 分区触发器管理器
///
/// 借用一个已建立的数据库会话，顺序执行启用/禁用DDL流程。
/// 所有数据库错误原样上抛，不做本地恢复。
pub struct PartitionTriggerManager<'a> {
    session: &'a DbSession,
}

impl<'a> PartitionTriggerManager<'a> {
    /// 创建新的分区触发器管理器
    pub fn new(session: &'a DbSession) -> Self {
        Self { session }
    }

    /// 禁用一张表的分区触发器
    ///
    /// 依次DROP触发器 `insert_<table>_trigger` 和处理函数
    /// `<table>_partition_handler()`，IF EXISTS保证幂等。
    /// 已生成的分区保持不动。
    pub async fn disable(&self, table_name: &str) -> Result<()> {
        validate_identifier("table name", table_name)?;

        let drop_trigger = drop_trigger_statement(table_name);
        println!("{}", drop_trigger);
        self.session.execute_ddl(&drop_trigger).await?;

        let drop_function = drop_function_statement(table_name);
        println!("{}", drop_function);
        self.session.execute_ddl(&drop_function).await?;

        println!(
            "Partition trigger disabled for table '{}.'  Existing partitions left as is.",
            table_name
        );
        tracing::info!(table = table_name, "partition trigger disabled");
        Ok(())
    }

    /// 为一张表启用分区触发器
    ///
    /// 不要求表上已有触发器；对已启用的表，先调用 [`disable`]
    /// 再启用是唯一受支持的更新路径。
    ///
    /// [`disable`]: PartitionTriggerManager::disable
    pub async fn enable(&self, spec: &PartitionSpec) -> Result<()> {
        spec.validate()?;

        let generate_stmt = generate_ddl_statement(spec);
        println!("{}", generate_stmt);
        let ddl = self
            .session
            .query_scalar(&generate_stmt)
            .await?
            .ok_or_else(|| {
                PartitionError::MissingDdl(format!(
                    "generate_partition_triggers_ddl returned no DDL for table '{}'",
                    spec.table_name
                ))
            })?;

        let ddl = if spec.enable_purging {
            let patched = activate_purge(&ddl)?;
            println!(
                "Uncommented the DROP expired partition as new partition being created"
            );
            patched
        } else {
            ddl
        };

        println!("{}", ddl);
        self.session.execute_ddl(&ddl).await?;

        let retention = if spec.enable_purging {
            format!("keep only last {} intervals", spec.interval_to_keep)
        } else {
            "keep all intervals".to_string()
        };
        println!(
            "Partition trigger enabled for table '{}' on column '{}' split every 1 {} and {}",
            spec.table_name, spec.column_name, spec.interval, retention
        );
        tracing::info!(
            table = %spec.table_name,
            column = %spec.column_name,
            "partition trigger enabled"
        );
        Ok(())
    }
}
