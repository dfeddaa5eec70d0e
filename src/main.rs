// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 异步静态文件服务器
//!
//! 该模块实现了基于 Tokio 运行时的 HTTP/1.1 静态文件服务器入口。
//! 核心功能包括：
//! - 将客户端目标路径约束在固定根目录内的安全解析
//! - 目录请求的索引文件解析与尾部斜杠重定向
//! - 逐字节确定的响应报文构建（含生成的错误页）
//! - 支持多线程异步 I/O 处理，每个连接独立成任务

// --- 模块定义 ---
mod config;     // 配置解析与管理
mod directory;  // 服务目录与路径解析
mod exception;  // 自定义异常与错误处理
mod handler;    // 请求结局判定
mod param;      // 全局常量与静态参数
mod request;    // HTTP 请求行解析器
mod response;   // HTTP 响应报文构建器
mod util;       // 错误页生成

use config::Config;
use directory::ServerDirectory;
use param::DEFAULT_PROTOCOL;
use request::Request;
use response::Response;

use log::{debug, error, info, warn};
use log4rs;
use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpStream},
    runtime::Builder,
};

use std::{
    net::{Ipv4Addr, SocketAddrV4},
    sync::Arc,
    time::Instant,
};

/// # 程序入口点
///
/// 初始化日志与配置，构建异步运行时并启动监听循环。
/// 启动阶段的任何失败（配置缺失、端口绑定失败）都直接终止进程。
fn main() {
    // 1. 初始化日志系统：采用 log4rs 架构，通过外部 YAML 灵活配置级别与输出目的地
    log4rs::init_file("config/log4rs.yaml", Default::default()).unwrap();

    // 2. 环境配置加载：从 TOML 文件读取运行参数
    let config = Config::from_toml("config/development.toml");
    info!("配置文件已载入");

    // 3. 服务目录构建：根目录在启动时确定一次，之后只读共享
    let directory = Arc::new(ServerDirectory::new(config.www_root()));
    info!("www root: {}", directory.root().display());

    // 4. 异步运行时定制：根据配置文件动态分配工作线程数
    let worker_threads = config.worker_threads();
    let runtime = Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(serve(config, directory));
}

/// # 监听循环
///
/// 绑定端口后持续接收新连接，并将每个连接分发至独立的 Tokio 任务。
/// 服务目录只读共享，响应在写出前整体缓冲，任务之间互不影响。
async fn serve(config: Config, directory: Arc<ServerDirectory>) {
    // 支持全地址监听 (0.0.0.0) 或本地回环监听 (127.0.0.1)
    let port: u16 = config.port();
    info!("服务端将在{}端口上监听Socket连接", port);
    let address = match config.local() {
        true => Ipv4Addr::new(127, 0, 0, 1),
        false => Ipv4Addr::new(0, 0, 0, 0),
    };
    info!("服务端将在{}地址上监听Socket连接", address);
    let socket = SocketAddrV4::new(address, port);

    // 绑定端口并启动监听器。绑定失败属于致命错误，直接终止进程
    let listener = match TcpListener::bind(socket).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("无法绑定端口：{}，错误：{}", port, e);
            panic!("无法绑定端口：{}，错误：{}", port, e);
        }
    };
    info!("端口{}绑定完成", port);

    let mut id: u128 = 0;
    let read_buffer_size = config.read_buffer_size();

    loop {
        // 等待新的 TCP 连接
        let (mut stream, addr) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                error!("接受连接失败：{}", e);
                continue;
            }
        };
        debug!("新的连接：{}，[ID{}]", addr, id);

        let directory = Arc::clone(&directory);

        // 使用轻量级任务处理具体请求，确保监听循环不被单个连接阻塞
        tokio::spawn(async move {
            handle_connection(&mut stream, id, &directory, read_buffer_size).await;
        });
        id += 1; // 递增连接唯一标识序列
    }
}

/// # 连接处理器
///
/// 负责单个 TCP 流的生命周期：有界读取、解析请求行、判定结局、
/// 构建并整体写出响应。每条出错路径都以一个格式完整的响应收尾。
async fn handle_connection(
    stream: &mut TcpStream,
    id: u128,
    directory: &ServerDirectory,
    read_buffer_size: usize,
) {
    let mut buffer = vec![0; read_buffer_size];

    // 等待流进入可读状态
    if let Err(e) = stream.readable().await {
        error!("[ID{}]等待TCPStream可读时遇到错误: {}", id, e);
        return;
    }

    // 尝试非阻塞读取 HTTP 报文，读取量以缓冲区大小为上限
    let n = match stream.try_read(&mut buffer) {
        Ok(0) => return, // 客户端主动关闭连接
        Ok(n) => n,
        Err(e) => {
            error!("[ID{}]读取TCPStream时遇到错误: {}", id, e);
            return;
        }
    };
    debug!("[ID{}]HTTP请求接收完毕，共{}字节", id, n);

    let start_time = Instant::now();

    // 1. 协议解析阶段：读满缓冲区仍未出现行终止符的请求行按畸形处理
    let request = if n == buffer.len() && !buffer.contains(&b'\n') {
        warn!("[ID{}]请求行超出{}字节读取上限", id, read_buffer_size);
        None
    } else {
        match Request::try_from(&buffer[..n], id) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!("[ID{}]解析HTTP请求失败: {}", id, e);
                None
            }
        }
    };

    // 2. 结局判定与响应构建阶段
    let response = match &request {
        Some(request) => handler::respond(directory, request, id),
        None => Response::from_status_code(DEFAULT_PROTOCOL, 400),
    };

    debug!(
        "[ID{}]HTTP响应构建完成，服务端用时{}ms。",
        id,
        start_time.elapsed().as_millis()
    );

    // 3. 结构化日志记录：便于后期审计
    if let Some(request) = &request {
        info!(
            "[ID{}] {}, {}, {}, {}, {}",
            id,
            request.version(),
            request.target(),
            request.method(),
            response.status_code(),
            response.information(),
        );
    } else {
        info!(
            "[ID{}] -, -, -, {}, {}",
            id,
            response.status_code(),
            response.information(),
        );
    }

    // 4. 数据发送阶段：响应整体缓冲后一次写出
    let response_bytes = response.as_bytes();
    debug!("[ID{}]发送全量响应，长度: {}", id, response_bytes.len());
    if let Err(e) = stream.write_all(&response_bytes).await {
        error!("[ID{}]发送响应失败: {}", id, e);
        return;
    }
    let _ = stream.flush().await;
}
