//! Static file serving module
//!
//! Maps a URL path onto the root directory and serves the file bytes. The
//! content type is supplied by the caller, so the same primitive serves any
//! MIME policy.

use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime::ContentTypeFn};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::percent_decode_str;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncReadExt;

/// Files tried, in order, when a directory is requested
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

const NOT_FOUND: &str = "File not found";

/// Serve the file (or directory) a request path maps to under `root`
pub async fn serve(
    ctx: &RequestContext<'_>,
    root: &Path,
    content_type: ContentTypeFn,
) -> Response<Full<Bytes>> {
    let fs_path = translate_path(root, ctx.path);

    match fs::metadata(&fs_path).await {
        Ok(meta) if meta.is_dir() => serve_directory(ctx, &fs_path, content_type).await,
        // A trailing slash names a directory, never a file
        Ok(_) if ctx.path.ends_with('/') => http::build_404_response(NOT_FOUND, ctx.is_head),
        Ok(_) => serve_file(ctx, &fs_path, content_type).await,
        Err(_) => http::build_404_response(NOT_FOUND, ctx.is_head),
    }
}

/// Translate a URL path into a file system path under `root`
///
/// The path is percent-decoded and normalized lexically: empty and `.`
/// segments vanish, `..` drops the previous segment but never climbs above
/// `root`.
pub fn translate_path(root: &Path, url_path: &str) -> PathBuf {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for seg in decoded.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\\') || (cfg!(windows) && s.contains(':')) => {}
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    path
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &Path,
    content_type: ContentTypeFn,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        let location = match ctx.query {
            Some(query) => format!("{}/?{query}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    for index_file in INDEX_FILES {
        let index_path = dir.join(index_file);
        if fs::metadata(&index_path)
            .await
            .is_ok_and(|meta| meta.is_file())
        {
            return serve_file(ctx, &index_path, content_type).await;
        }
    }

    listing::list_directory(ctx, dir).await
}

/// Serve a single regular file
pub async fn serve_file(
    ctx: &RequestContext<'_>,
    path: &Path,
    content_type: ContentTypeFn,
) -> Response<Full<Bytes>> {
    let mut file = match fs::File::open(path).await {
        Ok(f) => f,
        Err(e) => {
            log_open_failure(path, &e);
            return http::build_404_response(NOT_FOUND, ctx.is_head);
        }
    };

    let metadata = match file.metadata().await {
        Ok(m) => m,
        Err(e) => {
            log_open_failure(path, &e);
            return http::build_404_response(NOT_FOUND, ctx.is_head);
        }
    };

    // Not every platform reports mtime
    let modified = metadata.modified().ok();
    if let Some(modified) = modified {
        if cache::is_not_modified(
            ctx.if_modified_since.as_deref(),
            ctx.has_if_none_match,
            modified,
        ) {
            return http::build_304_response();
        }
    }

    let mut content = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    if let Err(e) = file.read_to_end(&mut content).await {
        logger::log_error(&format!(
            "Failed to read file '{}': {}",
            path.display(),
            e
        ));
        return http::build_404_response(NOT_FOUND, ctx.is_head);
    }

    let last_modified =
        cache::format_http_date(modified.unwrap_or_else(std::time::SystemTime::now));

    http::build_file_response(
        Bytes::from(content),
        &content_type(path),
        &last_modified,
        ctx.is_head,
    )
}

/// Missing files are routine 404s; anything else (permissions, I/O) is worth a warning
fn log_open_failure(path: &Path, err: &std::io::Error) {
    if err.kind() != ErrorKind::NotFound {
        logger::log_warning(&format!(
            "Cannot open '{}': {}",
            path.display(),
            err
        ));
    }
}
