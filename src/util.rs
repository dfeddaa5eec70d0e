// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 通用工具模块
//!
//! 目前只包含错误页生成器。页面结构是固定的：doctype、`<html>`、
//! 带原因短语标题的 `<head>`、以及由状态码标题和原因短语段落组成的
//! `<body>`。响应头的 `Content-Length` 必须使用该文档 UTF-8 编码后的
//! 字节长度，而不是字符数。

use crate::param::HttpStatus;

/// 描述某个 HTTP 状态码的最小 HTML 错误页。
///
/// 状态码在构造时通过注册表归一化：表外状态码生成的页面
/// 与 500 页面逐字节相同。每次调用都独立构建新实例，
/// 不存在任何跨请求共享的可变状态。
pub struct HtmlErrorPage {
    status: HttpStatus,
}

impl HtmlErrorPage {
    /// 构建指定状态码的错误页，表外状态码退回 500。
    pub fn from_code(code: u16) -> Self {
        Self {
            status: HttpStatus::from_code(code),
        }
    }

    /// 生成完整的 HTML 文档
    pub fn build(&self) -> String {
        format!(
            "<!DOCTYPE html>\n\
             <html>\n\
             <head><title>{reason}</title></head>\n\
             <body>\n\
             <h4>{code}</h4>\n\
             <p>{reason}</p>\n\
             </body>\n\
             </html>\n",
            code = self.status.code(),
            reason = self.status.reason(),
        )
    }

    /// 文档 UTF-8 编码后的字节长度
    pub fn byte_size(&self) -> usize {
        self.build().len()
    }

    /// 归一化后的状态
    pub fn status(&self) -> HttpStatus {
        self.status
    }
}
