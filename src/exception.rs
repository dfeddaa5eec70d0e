// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # Exception 模块
//!
//! 该模块定义了文件服务器在请求处理生命周期中可能抛出的各类异常情况。
//!
//! ## 设计意图
//! - **错误分类**：涵盖协议解析错误与文件系统读取错误两类。
//! - **语义映射**：每个变体都对应特定的 HTTP 响应状态码，便于上层模块直接转化。
//! - **可记录性**：通过实现 `std::fmt::Display`，确保错误信息可以被安全地写入日志。
//!
//! 注意"文件不存在"不在此列：路径解析的命中与否通过
//! [`crate::directory::FileLookup`] 显式返回，而不是异常控制流。

use std::fmt;

/// 服务器处理请求过程中发生的异常类型。
///
/// 该枚举通常作为 `Result` 的 `Err` 部分返回，用于指示处理失败的具体原因。
/// 每个变体都是可恢复的：连接处理器总能据此产生一个格式完整的 HTTP 响应。
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exception {
    /// 请求行字节无法解析为合法的 UTF-8 字符串。按照畸形请求处理，对应 `400 Bad Request`。
    RequestNotUtf8,
    /// 请求行残缺（不足两个字段）或在读取上限内找不到行终止符。对应 `400 Bad Request`。
    MalformedRequest,
    /// 读取一个已确认存在的文件时失败（权限不足、与删除操作竞争等）。
    /// 对外统一按 `404 Not Found` 处理，不向客户端区分"禁止"与"不存在"。
    IoFailure,
}

use Exception::*;

impl fmt::Display for Exception {
    /// 根据错误类型写入人类可读的描述文本。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestNotUtf8 => write!(f, "Request line can't be parsed in UTF-8"),
            MalformedRequest => write!(f, "Malformed request line (400)"),
            IoFailure => write!(f, "Failed to read an existing file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Display 输出应可直接写入日志
    #[test]
    fn test_display() {
        assert_eq!(
            Exception::MalformedRequest.to_string(),
            "Malformed request line (400)"
        );
        assert_eq!(
            Exception::RequestNotUtf8.to_string(),
            "Request line can't be parsed in UTF-8"
        );
        assert_eq!(
            Exception::IoFailure.to_string(),
            "Failed to read an existing file"
        );
    }
}
