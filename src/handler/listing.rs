//! Directory listing module
//!
//! Generates the HTML index for directories without an index file.

use crate::handler::router::RequestContext;
use crate::http::{self, response::escape_html};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// Characters left unescaped in entry links
const LINK_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// One row of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown to the user: `dir/` for directories, `link@` for symlinks
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else if self.is_symlink {
            format!("{}@", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Relative link target; symlinked directories still get their slash
    pub fn link_target(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Serve the listing for `dir`, or a 404 when it cannot be read
pub async fn list_directory(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    let Ok(mut entries) = read_entries(dir).await else {
        return http::build_404_response("No permission to list directory", ctx.is_head);
    };
    entries.sort_by_key(|entry| entry.name.to_lowercase());

    let display_path = percent_decode_str(ctx.path).decode_utf8_lossy();
    let html = render_listing(&display_path, &entries);
    http::build_html_response(html, ctx.is_head)
}

async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut read_dir = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_symlink = entry
            .file_type()
            .await
            .is_ok_and(|file_type| file_type.is_symlink());
        // Follows symlinks, so a link to a directory lists as one
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|meta| meta.is_dir());

        entries.push(ListingEntry {
            name,
            is_dir,
            is_symlink,
        });
    }

    Ok(entries)
}

/// Render listing HTML; `entries` are emitted in the given order
pub fn render_listing(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));

    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{title}</title>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{title}</h1>");
    html.push_str("<hr>\n<ul>\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            utf8_percent_encode(&entry.link_target(), LINK_SET),
            escape_html(&entry.display_name())
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}
