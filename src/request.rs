// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # HTTP 请求行解析模块
//!
//! 该模块负责将 TCP 流中读取的原始字节解析为强类型的 `Request` 结构体。
//! 服务器只关心报文的第一行（Request-Line），其余标头一概忽略：
//! 1. 提取首行（以第一个行终止符为界）。
//! 2. 按空白字符切分出方法、目标路径和协议版本。
//! 3. 对字段数量异常的请求行做确定性的尽力恢复。

use crate::exception::Exception;
use crate::param::DEFAULT_PROTOCOL;
use log::error;

/// 一次连接解析出的请求行元数据。
///
/// 每个连接只构建一次，构建后不再修改。
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP 请求方法，保留客户端原样写法（不做大小写折叠）
    method: String,
    /// 请求的目标路径，尚未对照任何文件系统根目录
    target: String,
    /// HTTP 协议版本串（如 `HTTP/1.1`）
    version: String,
}

impl Request {
    /// 从原始字节缓冲区尝试构建 `Request` 实例。
    ///
    /// # 逻辑步骤
    /// 1. 截取首行：以第一个 `\n` 为界，并去掉行尾可能存在的 `\r`；
    ///    缓冲区内没有行终止符时，将收到的全部字节当作首行处理。
    /// 2. 验证编码：首行必须是合法的 UTF-8。
    /// 3. 按空白切分并分配字段：
    ///    - 恰好 3 个字段：方法、目标、版本；
    ///    - 多于 3 个字段：首字段为方法，末字段为版本，中间各字段以单个空格
    ///      重新拼合为目标（目标中含未转义空格时的尽力恢复，不保证符合 RFC）；
    ///    - 恰好 2 个字段：方法与目标，版本取默认值；
    ///    - 不足 2 个字段：判定为畸形请求。
    ///
    /// # 参数
    /// * `buffer` - 从网络 Socket 读取的原始数据（有界读取的结果）。
    /// * `id` - 全局连接 ID，用于在多任务环境下追踪日志。
    pub fn try_from(buffer: &[u8], id: u128) -> Result<Self, Exception> {
        let line_bytes = match buffer.iter().position(|&b| b == b'\n') {
            Some(pos) => &buffer[..pos],
            None => buffer,
        };
        let line_bytes = match line_bytes.last() {
            Some(&b'\r') => &line_bytes[..line_bytes.len() - 1],
            _ => line_bytes,
        };

        let line = match std::str::from_utf8(line_bytes) {
            Ok(s) => s,
            Err(_) => {
                error!("[ID{}]请求行不是合法的UTF-8", id);
                return Err(Exception::RequestNotUtf8);
            }
        };

        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() < 2 {
            error!("[ID{}]HTTP请求行格式不正确：{}", id, line);
            return Err(Exception::MalformedRequest);
        }

        let method = parts[0].to_string();
        let (target, version) = match parts.len() {
            2 => (parts[1].to_string(), DEFAULT_PROTOCOL.to_string()),
            3 => (parts[1].to_string(), parts[2].to_string()),
            _ => (
                parts[1..parts.len() - 1].join(" "),
                parts[parts.len() - 1].to_string(),
            ),
        };

        Ok(Self {
            method,
            target,
            version,
        })
    }
}

// --- Getter 访问器实现 ---

impl Request {
    /// 获取请求方法
    pub fn method(&self) -> &str {
        &self.method
    }

    /// 获取目标路径
    pub fn target(&self) -> &str {
        &self.target
    }

    /// 获取 HTTP 协议版本串
    pub fn version(&self) -> &str {
        &self.version
    }
}
