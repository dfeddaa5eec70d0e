// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 请求结局判定模块
//!
//! 每个请求经过一趟固定顺序的判定，得到四种终局之一：
//! 命中文件（200）、目录重定向（301）、未找到（404）、方法不支持（501）。
//! 除第一步的方法检查外，任何结局都不再依赖请求方法。
//!
//! 判定只读取 [`ServerDirectory`]，自身不持有状态，
//! 因此可以被任意数量的连接任务并发调用。

use std::path::PathBuf;

use log::{debug, warn};

use crate::directory::{FileLookup, ServerDirectory};
use crate::request::Request;
use crate::response::Response;

/// 请求判定的终局。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 命中常规文件：携带解析后的绝对路径、当前大小与内容类型
    Found {
        path: PathBuf,
        size: u64,
        content_type: &'static str,
    },
    /// 不带尾部斜杠的目录请求：重定向到补全斜杠后的相对地址
    Redirect { location: String },
    /// 目标在根目录下不存在（或不是常规文件）
    NotFound,
    /// 非 GET 方法
    Unsupported,
}

/// 对一个请求做一趟结局判定。
///
/// ## 判定顺序
/// 1. 方法检查：非 `GET` 即为 `Unsupported`。
/// 2. 目标归一化：去掉单个前导 `/`，经 [`ServerDirectory::build_abspath`]
///    映射为根目录下的绝对路径。
/// 3. 目录且目标无尾部斜杠：`Redirect`，`Location` 为相对目标补一个 `/`。
/// 4. 目录且目标带尾部斜杠：拼接索引文件后重新查找。
/// 5. 常规文件存在：`Found`。
/// 6. 其余情况：`NotFound`。
pub fn decide(directory: &ServerDirectory, request: &Request, id: u128) -> Outcome {
    if request.method() != "GET" {
        debug!("[ID{}]方法{}不受支持", id, request.method());
        return Outcome::Unsupported;
    }

    let target = request.target();
    let stripped = target.strip_prefix('/').unwrap_or(target);
    let mut path = directory.build_abspath(stripped);
    debug!("[ID{}]映射物理路径：{}", id, path.display());

    if directory.is_directory(&path) {
        if !target.ends_with('/') {
            let relative = directory.remove_root(&path);
            let location = if relative.is_empty() {
                "/".to_string()
            } else {
                format!("/{}/", relative)
            };
            debug!("[ID{}]目录请求缺少尾部斜杠，重定向到{}", id, location);
            return Outcome::Redirect { location };
        }
        path = directory.append_index(&path);
        debug!("[ID{}]目录请求改查索引文件：{}", id, path.display());
    }

    match directory.lookup_file(&path) {
        FileLookup::Found { size } => Outcome::Found {
            content_type: ServerDirectory::content_type(&path),
            path,
            size,
        },
        FileLookup::NotFound => Outcome::NotFound,
    }
}

/// 把判定结局转化为完整的响应报文。
///
/// 命中文件时读出文件内容；读取失败（权限、与删除竞争）按 404 处理，
/// 不向客户端区分"禁止"与"不存在"。
pub fn respond(directory: &ServerDirectory, request: &Request, id: u128) -> Response {
    let version = request.version();
    match decide(directory, request, id) {
        Outcome::Found {
            path,
            size,
            content_type,
        } => match directory.read_file(&path) {
            Ok(contents) => {
                debug!(
                    "[ID{}]命中文件{}，大小{}字节",
                    id,
                    path.display(),
                    size
                );
                Response::from_file(version, content_type, contents)
            }
            Err(e) => {
                warn!("[ID{}]读取{}失败（{}），按404处理", id, path.display(), e);
                Response::from_status_code(version, 404)
            }
        },
        Outcome::Redirect { location } => Response::from_redirect(version, &location),
        Outcome::NotFound => {
            warn!("[ID{}]请求的路径：{} 不存在，返回404", id, request.target());
            Response::from_status_code(version, 404)
        }
        Outcome::Unsupported => {
            warn!(
                "[ID{}]不支持的请求方法：{}，返回501",
                id,
                request.method()
            );
            Response::from_status_code(version, 501)
        }
    }
}
