// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 响应报文构建模块
//!
//! 该模块负责把请求处理的结论组装为逐字节确定的响应报文。
//! 响应头的字段顺序是一份契约，在任何实例之间都不会改变：
//! 状态行、`Date`、`Server`、`Content-Type`、`Content-Length`、
//! （仅重定向时的 `Location`）、空行、响应体。
//! 所有行都以 CRLF 结尾；`Content-Length` 恒等于其后响应体的真实字节数。

use crate::param::{HttpStatus, CRLF, SERVER_NAME, TEXT_HTML};
use crate::util::HtmlErrorPage;

use bytes::Bytes;
use chrono::prelude::*;

/// 一次完整的 HTTP 响应：头部字段加可选的响应体。
///
/// 响应体要么是文件的原始字节，要么是生成的错误页；
/// 重定向响应没有响应体。
#[derive(Debug, Clone)]
pub struct Response {
    version: String,
    status: HttpStatus,
    content_type: String,
    content_length: u64,
    date: DateTime<Utc>,
    server_name: String,
    location: Option<String>,
    content: Option<Bytes>,
}

impl Response {
    fn new(version: &str, status: HttpStatus) -> Self {
        Self {
            version: version.to_string(),
            status,
            content_type: TEXT_HTML.to_string(),
            content_length: 0,
            // Date每次构建时取当前时刻，不跨请求复用
            date: Utc::now(),
            server_name: SERVER_NAME.to_string(),
            location: None,
            content: None,
        }
    }

    /// 用文件内容构建 `200 OK` 响应。
    ///
    /// `Content-Length` 取实际读出的字节数，
    /// 即使文件在存在性检查之后被修改过，头部与响应体也保持一致。
    pub fn from_file(version: &str, content_type: &str, contents: Bytes) -> Self {
        let mut response = Self::new(version, HttpStatus::from_code(200));
        response.content_type = content_type.to_string();
        response.content_length = contents.len() as u64;
        response.content = Some(contents);
        response
    }

    /// 构建 `301 Moved Permanently` 重定向响应。
    ///
    /// 响应体为空，`Location` 行插入在头部终止空行之前。
    pub fn from_redirect(version: &str, location: &str) -> Self {
        let mut response = Self::new(version, HttpStatus::from_code(301));
        response.location = Some(location.to_string());
        response
    }

    /// 用生成的错误页构建任意状态码的响应。
    ///
    /// 状态码经注册表归一化（表外退回 500）；
    /// `Content-Length` 一律按生成页面的字节数重新计算，
    /// 不接受调用方提供的长度。
    pub fn from_status_code(version: &str, code: u16) -> Self {
        let page = HtmlErrorPage::from_code(code);
        let mut response = Self::new(version, page.status());
        response.content_length = page.byte_size() as u64;
        response.content = Some(Bytes::from(page.build()));
        response
    }

    /// 把响应序列化为发送到连接上的字节序列。
    pub fn as_bytes(&self) -> Vec<u8> {
        let version: &str = &self.version;
        let status_code: &str = &self.status.code().to_string();
        let content_length: &str = &self.content_length.to_string();
        let date: &str = &format_date(&self.date);
        let server: &str = &self.server_name;
        let content_type: &str = &self.content_type;

        let header = [
            version,
            " ",
            status_code,
            " ",
            self.status.reason(),
            CRLF,
            "Date: ",
            date,
            CRLF,
            "Server: ",
            server,
            CRLF,
            "Content-Type: ",
            content_type,
            CRLF,
            "Content-Length: ",
            content_length,
            CRLF,
            match &self.location {
                Some(location) => ["Location: ", location, CRLF].concat(),
                None => "".to_string(),
            }
            .as_str(),
            CRLF,
        ]
        .concat();

        [
            header.as_bytes(),
            match &self.content {
                Some(content) => content,
                None => b"",
            },
        ]
        .concat()
    }
}

// --- Getter 访问器实现 ---

impl Response {
    pub fn status_code(&self) -> u16 {
        self.status.code()
    }

    pub fn information(&self) -> &str {
        self.status.reason()
    }

    pub fn content_length(&self) -> u64 {
        self.content_length
    }
}

/// 按 RFC 1123 格式输出 `Date` 头的时间戳
fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
