//! Copyright (c) 2025, Kirky.X
//!
//! MIT License
//!
//! 统一工具模块
//!
//! 提供输入验证和敏感信息脱敏工具。

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::PartitionError;

pub mod redaction;

lazy_static! {
    static ref IDENTIFIER_RE: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex should compile");
}

/// 校验SQL标识符
///
/// 表名和列名会被直接拼接进DDL语句，只接受普通标识符。
pub fn validate_identifier(kind: &str, name: &str) -> Result<(), PartitionError> {
    if name.is_empty() {
        return Err(PartitionError::InvalidInput(format!(
            "{} cannot be empty",
            kind
        )));
    }
    if !IDENTIFIER_RE.is_match(name) {
        return Err(PartitionError::InvalidInput(format!(
            "{} '{}' is not a plain SQL identifier. Valid characters are: \
             alphanumeric and _, not starting with a digit",
            kind, name
        )));
    }
    Ok(())
}
