//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! 该模块是分区触发器工具的入口点。

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    oxpart::app::run().await
}
