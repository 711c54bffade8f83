//! MIME type detection module
//!
//! Generic inference comes from `mime_guess`; the WebAssembly override layer
//! pins the types browsers insist on before delegating to it.

use std::borrow::Cow;
use std::path::Path;

pub const APPLICATION_WASM: &str = "application/wasm";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";

/// Resolves the `Content-Type` for a file on disk
pub type ContentTypeFn = fn(&Path) -> Cow<'static, str>;

/// Generic `Content-Type` inference from the file extension
///
/// # Examples
/// ```
/// use std::path::Path;
/// use wasm_devserver::http::mime::guess_content_type;
/// assert_eq!(guess_content_type(Path::new("index.html")), "text/html");
/// assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
/// ```
pub fn guess_content_type(path: &Path) -> Cow<'static, str> {
    Cow::Owned(
        mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_owned(),
    )
}

/// `Content-Type` with `.wasm` and `.js` overrides taking precedence over
/// [`guess_content_type`]
///
/// Overrides match the file name suffix case-sensitively, so a bare `.wasm`
/// dotfile is covered too.
pub fn wasm_content_type(path: &Path) -> Cow<'static, str> {
    let name = path.file_name().map(|n| n.to_string_lossy());
    match name.as_deref() {
        Some(n) if n.ends_with(".wasm") => Cow::Borrowed(APPLICATION_WASM),
        Some(n) if n.ends_with(".js") => Cow::Borrowed(APPLICATION_JAVASCRIPT),
        _ => guess_content_type(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_override() {
        assert_eq!(wasm_content_type(Path::new("app.wasm")), "application/wasm");
        assert_eq!(
            wasm_content_type(Path::new("/srv/pkg/praat_bg.wasm")),
            "application/wasm"
        );
    }

    #[test]
    fn test_js_override() {
        assert_eq!(
            wasm_content_type(Path::new("praat_wasm_wrapper.js")),
            "application/javascript"
        );
    }

    #[test]
    fn test_dotfile_override() {
        assert_eq!(wasm_content_type(Path::new("/srv/.wasm")), "application/wasm");
        assert_eq!(wasm_content_type(Path::new("/srv/.js")), "application/javascript");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(wasm_content_type(Path::new("index.html")), "text/html");
        assert_eq!(wasm_content_type(Path::new("style.css")), "text/css");
        assert_eq!(wasm_content_type(Path::new("logo.png")), "image/png");
        assert_eq!(wasm_content_type(Path::new("data.json")), "application/json");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(
            wasm_content_type(Path::new("file.xyzzy")),
            "application/octet-stream"
        );
        assert_eq!(
            wasm_content_type(Path::new("Makefile")),
            "application/octet-stream"
        );
    }
}
