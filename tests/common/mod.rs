// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

use std::path::PathBuf;

use tokio::fs;

/// Write `contents` to a uniquely named temp file and return its path.
pub async fn write_temp_file(prefix: &str, ext: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!(
        "lint-page_{}_{}.{}",
        prefix,
        uuid::Uuid::new_v4(),
        ext
    ));
    fs::write(&path, contents).await?;
    Ok(path)
}

/// A capture of one HTML page on www.example.com, reached through
/// `redirects` hops starting at http://example.com/, that references the
/// given same-site stylesheets and scripts.
pub fn page_capture(
    redirects: usize,
    stylesheets: &[(&str, usize)],
    scripts: &[(&str, usize)],
) -> serde_json::Value {
    let page_url = "https://www.example.com/";
    let mut resources = Vec::new();

    let mut hops: Vec<String> = (0..redirects)
        .map(|i| format!("http://example.com/hop{}", i))
        .collect();
    if let Some(first) = hops.first_mut() {
        *first = "http://example.com/".to_string();
    }
    for (i, url) in hops.iter().enumerate() {
        let next = hops.get(i + 1).map(String::as_str).unwrap_or(page_url);
        resources.push(serde_json::json!({
            "request_url": url,
            "request_start_millis": i,
            "response_status_code": 302,
            "response_headers": [["location", next]]
        }));
    }

    let mut body = String::from("<html><head>");
    for (name, _) in stylesheets {
        body.push_str(&format!(r#"<link rel="stylesheet" href="/{}">"#, name));
    }
    for (name, _) in scripts {
        body.push_str(&format!(r#"<script src="/{}"></script>"#, name));
    }
    body.push_str("</head><body></body></html>");
    resources.push(serde_json::json!({
        "request_url": page_url,
        "request_start_millis": 100,
        "response_headers": [["content-type", "text/html; charset=utf-8"]],
        "response_body": body
    }));

    for (list, content_type) in [(stylesheets, "text/css"), (scripts, "application/javascript")] {
        for (name, size) in list {
            resources.push(serde_json::json!({
                "request_url": format!("https://www.example.com/{}", name),
                "request_start_millis": 200,
                "response_headers": [["content-type", content_type]],
                "response_body": "x".repeat(*size)
            }));
        }
    }

    serde_json::json!({
        "primary_url": hops.first().map(String::as_str).unwrap_or(page_url),
        "onload_millis": 1000,
        "resources": resources
    })
}
