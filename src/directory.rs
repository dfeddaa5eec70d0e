// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 服务目录与路径解析模块
//!
//! 该模块是文件服务器的安全核心，负责把客户端提交的任意目标路径约束在
//! 固定的根目录之内。约束方式是先把目标路径当作挂在虚拟根（`/`）下的路径
//! 做词法归一化（折叠 `.` 与 `..` 片段），然后才拼接到真实根目录上。
//! 归一化发生在拼接之前，因此无论客户端提供多少个 `..` 片段，
//! 结果都不可能越出根目录。
//!
//! 所有存在性、类型与大小检查都在调用时直接查询文件系统，
//! 不维护任何启动时快照：快照会在文件变动后返回过期的大小与存在性结论。

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use log::{debug, error};

use crate::exception::Exception;
use crate::param::{CONTENT_TYPES, DEFAULT_CONTENT_TYPE, INDEX_FILE};

/// 文件查找的显式结果。
///
/// 命中与否通过枚举值表达，而不是异常控制流；
/// 元数据读取失败（权限、删除竞争）一律归入 `NotFound`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLookup {
    /// 路径存在且是常规文件，附带当前的字节大小
    Found { size: u64 },
    /// 路径不存在、不是常规文件、或无法读取元数据
    NotFound,
}

/// 服务器的资源根目录。
///
/// 启动时构建一次，之后只读共享；本身不缓存任何目录内容。
#[derive(Debug, Clone)]
pub struct ServerDirectory {
    root: PathBuf,
}

impl ServerDirectory {
    /// 以给定路径为根目录构建实例。
    ///
    /// 相对路径会以启动时的工作目录为基准转为绝对路径。
    pub fn new(root: &str) -> Self {
        let mut path = PathBuf::from(root);
        if path.is_relative() {
            match env::current_dir() {
                Ok(cwd) => path = cwd.join(path),
                Err(e) => panic!("无法获取当前工作目录：{}", e),
            }
        }
        Self { root: path }
    }

    /// 获取根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 把客户端目标路径映射为根目录下的绝对路径。
    ///
    /// 先对目标做虚拟根下的词法归一化：`.` 片段丢弃，`..` 片段弹出
    /// 已积累的一层（到顶后继续出现的 `..` 直接丢弃），
    /// 然后把归一化结果拼接到根目录上。
    pub fn build_abspath(&self, target: &str) -> PathBuf {
        let mut clean = PathBuf::new();
        for component in Path::new(target).components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::ParentDir => {
                    clean.pop();
                }
                Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
            }
        }
        self.root.join(clean)
    }

    /// 路径当前是否存在（文件或目录均可）
    pub fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    /// 路径当前是否是目录
    pub fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    /// 查询路径是否为常规文件，并取得当前大小。
    pub fn lookup_file(&self, path: &Path) -> FileLookup {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => FileLookup::Found {
                size: metadata.len(),
            },
            Ok(_) => FileLookup::NotFound,
            Err(e) => {
                debug!("查询路径{}的元数据失败：{}", path.display(), e);
                FileLookup::NotFound
            }
        }
    }

    /// 读出文件的全部字节，作为响应体使用。
    pub fn read_file(&self, path: &Path) -> Result<Bytes, Exception> {
        match fs::read(path) {
            Ok(contents) => Ok(Bytes::from(contents)),
            Err(e) => {
                error!("无法读取文件{}：{}", path.display(), e);
                Err(Exception::IoFailure)
            }
        }
    }

    /// 在目录路径后拼接索引文件名
    pub fn append_index(&self, path: &Path) -> PathBuf {
        path.join(INDEX_FILE)
    }

    /// 根据文件后缀名决定 `Content-Type`。
    ///
    /// 只做后缀匹配，表外后缀与无后缀文件统一按纯文本处理。
    pub fn content_type(path: &Path) -> &'static str {
        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|extension| CONTENT_TYPES.get(extension).copied())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// 去掉路径的根目录前缀，得到相对路径串。
    ///
    /// 仅用于构建重定向响应的 `Location` 字段，
    /// 绝对文件系统路径在其他任何场合都不会暴露给客户端。
    pub fn remove_root(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) => relative.to_string_lossy().into_owned(),
            Err(_) => String::new(),
        }
    }
}
