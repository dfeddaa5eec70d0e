// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 协议参数与常量模块
//!
//! 该模块定义了 `shaneyale-fileserver` 遵循的 HTTP 协议相关常量和数据结构，包括：
//! - 服务器支持的 HTTP 状态码及其原因短语（Reason Phrase）。
//! - 文件后缀名到 `Content-Type` 的映射表。
//! - 构建响应报文所需的协议常量。

use std::collections::HashMap;
use lazy_static::lazy_static;

/// 服务器名称标识，用于 HTTP 响应头的 `Server` 字段
pub const SERVER_NAME: &str = "shaneyale-fileserver";

/// HTTP 协议规定的换行符（Carriage Return Line Feed）
pub const CRLF: &str = "\r\n";

/// 目录请求的默认索引文件名
pub const INDEX_FILE: &str = "index.html";

/// 请求行解析失败、无法得知客户端协议版本时使用的默认版本串
pub const DEFAULT_PROTOCOL: &str = "HTTP/1.1";

/// 生成页面（错误页、重定向响应）使用的内容类型
pub const TEXT_HTML: &str = "text/html";

/// 无法识别后缀时的兜底内容类型
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

lazy_static! {
    /// 服务器词汇表内的 HTTP 状态码与原因短语映射。
    ///
    /// 这是一个封闭集合：不在表内的状态码一律归一化为 500。
    pub static ref STATUS_CODES: HashMap<u16, &'static str> = {
        let mut map = HashMap::new();
        map.insert(200, "OK");
        map.insert(301, "Moved Permanently");
        map.insert(400, "Bad Request");
        map.insert(401, "Unauthorized");
        map.insert(402, "Forbidden");
        map.insert(404, "Not Found");
        map.insert(500, "Internal Server Error");
        map.insert(501, "Not Implemented");
        map.insert(505, "HTTP Version Not Supported");
        map
    };
}

lazy_static! {
    /// 文件后缀名到 `Content-Type` 的映射表。
    ///
    /// 仅做后缀匹配，不做任何基于文件内容的类型嗅探；
    /// 表外的后缀统一按 [`DEFAULT_CONTENT_TYPE`] 处理。
    pub static ref CONTENT_TYPES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("html", "text/html");
        map.insert("css", "text/css");
        map
    };
}

/// 一个经过归一化的 HTTP 状态，由状态码和标准原因短语组成。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatus {
    code: u16,
    reason: &'static str,
}

impl HttpStatus {
    /// 根据状态码从注册表中取出状态。
    ///
    /// 表外的状态码一律退回 `500 Internal Server Error`，
    /// 因此任何调用处都能得到一个合法的状态行。
    pub fn from_code(code: u16) -> Self {
        match STATUS_CODES.get(&code) {
            Some(reason) => Self { code, reason },
            None => Self {
                code: 500,
                reason: STATUS_CODES[&500],
            },
        }
    }

    /// 状态码是否在注册表内
    pub fn is_known(code: u16) -> bool {
        STATUS_CODES.contains_key(&code)
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

use std::fmt;

impl fmt::Display for HttpStatus {
    /// 格式化为状态行中的 `{code} {reason}` 片段
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.reason)
    }
}
