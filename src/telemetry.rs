//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块定义了日志初始化功能。

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// 初始化 tracing 日志
///
/// 应用启动时调用一次，重复调用是无操作。
/// 日志级别通过 `RUST_LOG` 环境变量控制，默认 `info`。
/// 操作性输出（执行的SQL和状态行）直接走标准输出，不经过日志。
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .try_init()
            .ok();
    });
}
