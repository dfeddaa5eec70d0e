// Copyright (c) 2026 shaneyale (shaneyale86@gmail.com)
// All rights reserved.

//! # 请求处理流水线端到端测试
//!
//! 在临时目录中搭建一棵站点树，把原始请求字节送入解析→判定→构建的
//! 完整流水线，逐字节核对响应报文。不依赖运行中的服务器进程。

use std::fs::{self, File};
use std::io::Write;

use tempfile::TempDir;

use fileserver::handler;
use fileserver::{HtmlErrorPage, Request, ServerDirectory};

/// 搭建测试站点：根目录含13字节的index.html，子目录subdir含自己的索引文件
fn test_site() -> (TempDir, ServerDirectory) {
    let dir = TempDir::new().unwrap();

    let mut index = File::create(dir.path().join("index.html")).unwrap();
    write!(index, "<HTML></HTML>").unwrap();

    fs::create_dir(dir.path().join("subdir")).unwrap();
    let mut sub_index = File::create(dir.path().join("subdir/index.html")).unwrap();
    write!(sub_index, "<HTML></HTML>").unwrap();

    let mut style = File::create(dir.path().join("style.css")).unwrap();
    write!(style, "body {{}}").unwrap();

    let directory = ServerDirectory::new(dir.path().to_str().unwrap());
    (dir, directory)
}

/// 把一行请求送入完整流水线，返回响应字节
fn run_pipeline(directory: &ServerDirectory, request_line: &str) -> Vec<u8> {
    let raw = format!("{}\r\nHost: localhost:8080\r\n\r\n", request_line);
    let request = Request::try_from(raw.as_bytes(), 0).unwrap();
    handler::respond(directory, &request, 0).as_bytes()
}

/// 拆出响应的头部各行与响应体
fn split_response(bytes: &[u8]) -> (Vec<String>, Vec<u8>) {
    let boundary = bytes
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .expect("响应缺少头部终止空行");
    let header = String::from_utf8_lossy(&bytes[..boundary]);
    let body = bytes[boundary + 4..].to_vec();
    let lines = header.split("\r\n").map(|line| line.to_string()).collect();
    (lines, body)
}

/// 现存文件的GET：200、后缀对应的类型、精确的字节长度、原样的响应体
#[test]
fn test_get_existing_file() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "GET /index.html HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert!(lines.contains(&"Content-Type: text/html".to_string()));
    assert!(lines.contains(&"Content-Length: 13".to_string()));
    assert_eq!(body, b"<HTML></HTML>");
}

/// css文件按后缀规则取text/css
#[test]
fn test_get_css_file() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "GET /style.css HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert!(lines.contains(&"Content-Type: text/css".to_string()));
    assert!(lines.contains(&format!("Content-Length: {}", body.len())));
}

/// 缺失文件的GET：404，响应体逐字节等于生成的404页面
#[test]
fn test_get_missing_file() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "GET /missing.html HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 404 Not Found");
    assert_eq!(body, HtmlErrorPage::from_code(404).build().into_bytes());
}

/// 不带尾部斜杠的目录：301，Location为原相对目标加恰好一个斜杠
#[test]
fn test_directory_without_slash_redirects() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "GET /subdir HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 301 Moved Permanently");
    assert!(lines.contains(&"Location: /subdir/".to_string()));
    assert!(lines.contains(&"Content-Length: 0".to_string()));
    assert!(body.is_empty());
}

/// 带尾部斜杠的目录：服务目录下的index.html
#[test]
fn test_directory_with_slash_serves_index() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "GET /subdir/ HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 200 OK");
    assert_eq!(body, b"<HTML></HTML>");
}

/// 遍历攻击：解析结果始终在根目录内，命不中即404，绝不泄露根外文件
#[test]
fn test_traversal_never_escapes_root() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "GET /../../../../etc/passwd HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 404 Not Found");
    assert!(!body.windows(5).any(|window| window == b"root:"));
}

/// 非GET方法：501 Not Implemented
#[test]
fn test_post_is_not_implemented() {
    let (_dir, directory) = test_site();

    let bytes = run_pipeline(&directory, "POST /index.html HTTP/1.1");
    let (lines, body) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 501 Not Implemented");
    assert_eq!(body, HtmlErrorPage::from_code(501).build().into_bytes());
}

/// 头部字段顺序固定：状态行、Date、Server、Content-Type、Content-Length
#[test]
fn test_header_order_contract() {
    let (_dir, directory) = test_site();

    for line in [
        "GET /index.html HTTP/1.1",
        "GET /missing.html HTTP/1.1",
        "POST /index.html HTTP/1.1",
    ] {
        let bytes = run_pipeline(&directory, line);
        let (lines, _body) = split_response(&bytes);

        assert!(lines[1].starts_with("Date: "));
        assert!(lines[2].starts_with("Server: shaneyale-fileserver"));
        assert!(lines[3].starts_with("Content-Type: "));
        assert!(lines[4].starts_with("Content-Length: "));
        assert_eq!(lines.len(), 5);
    }
}

/// 幂等性：文件系统未变动时，两次请求的响应除Date行外逐字节相同
#[test]
fn test_idempotent_except_date() {
    let (_dir, directory) = test_site();

    let first = run_pipeline(&directory, "GET /index.html HTTP/1.1");
    let second = run_pipeline(&directory, "GET /index.html HTTP/1.1");

    let strip_date = |bytes: &[u8]| -> Vec<String> {
        let (lines, body) = split_response(bytes);
        let mut kept: Vec<String> = lines
            .into_iter()
            .filter(|line| !line.starts_with("Date: "))
            .collect();
        kept.push(String::from_utf8_lossy(&body).into_owned());
        kept
    };

    assert_eq!(strip_date(&first), strip_date(&second));
}

/// 文件在运行期间被修改后，响应反映新内容与新长度（无启动时快照）
#[test]
fn test_live_filesystem_no_snapshot() {
    let (dir, directory) = test_site();

    let before = run_pipeline(&directory, "GET /index.html HTTP/1.1");
    let (_, body_before) = split_response(&before);
    assert_eq!(body_before, b"<HTML></HTML>");

    let mut file = File::create(dir.path().join("index.html")).unwrap();
    write!(file, "<HTML><p>changed</p></HTML>").unwrap();

    let after = run_pipeline(&directory, "GET /index.html HTTP/1.1");
    let (lines, body_after) = split_response(&after);

    assert_eq!(body_after, b"<HTML><p>changed</p></HTML>");
    assert!(lines.contains(&format!("Content-Length: {}", body_after.len())));
}

/// 文件被删除后，同一目标转为404
#[test]
fn test_deleted_file_becomes_404() {
    let (dir, directory) = test_site();

    fs::remove_file(dir.path().join("index.html")).unwrap();

    let bytes = run_pipeline(&directory, "GET /index.html HTTP/1.1");
    let (lines, _) = split_response(&bytes);

    assert_eq!(lines[0], "HTTP/1.1 404 Not Found");
}
