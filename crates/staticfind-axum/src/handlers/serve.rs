//! The static asset serving view.
//!
//! Resolves request paths through the finder chain (or below a fixed
//! document root), honors `If-Modified-Since`, and optionally renders a
//! minimal directory index. Development use only - see
//! [`bootstrap`](crate::bootstrap::bootstrap) for the safety policy.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use askama::Template;
use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::bootstrap::{ServeContext, ServeMode};
use crate::conditional::{http_date, was_modified_since};
use crate::error::HttpError;
use crate::state::AppState;

/// `GET {url}/` - the mount root, an empty asset path.
pub async fn index_root(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    serve_path(&state, "", &headers)
}

/// `GET {url}/{*path}` - the path-capturing asset route.
pub async fn asset(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    serve_path(&state, &path, &headers)
}

fn serve_path(state: &ServeContext, raw: &str, headers: &HeaderMap) -> Result<Response, HttpError> {
    // Only serve below the mount: drop empty components, `.` and `..`,
    // and bounce the client to the cleaned path if anything was dropped.
    let trimmed = raw.trim_start_matches('/');
    let cleaned = clean_path(trimmed);
    if cleaned != trimmed {
        let location = format!("{}/{}", state.config.url_mount(), cleaned);
        return Ok(Redirect::temporary(&location).into_response());
    }

    let resolved = match &state.mode {
        ServeMode::Finders => state.registry.find(&cleaned),
        ServeMode::DocumentRoot(root) => Some(root.join(&cleaned)),
    };
    let Some(fullpath) = resolved else {
        return Err(HttpError::NotFound(format!(
            "\"{cleaned}\" could not be found"
        )));
    };

    if fullpath.is_dir() {
        if state.show_indexes {
            return directory_index(state, &cleaned, &fullpath);
        }
        return Err(HttpError::NotFound(
            "Directory indexes are not allowed here.".to_string(),
        ));
    }
    if !fullpath.exists() {
        return Err(HttpError::NotFound(format!(
            "\"{}\" does not exist",
            fullpath.display()
        )));
    }

    serve_file(&fullpath, headers)
}

/// Drop empty components, `.` and `..` without resolving them.
fn clean_path(path: &str) -> String {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect::<Vec<_>>()
        .join("/")
}

fn serve_file(fullpath: &Path, headers: &HeaderMap) -> Result<Response, HttpError> {
    let internal = |e: std::io::Error| HttpError::Internal(e.to_string());

    let metadata = fs::metadata(fullpath).map_err(internal)?;
    let mtime = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
    let size = metadata.len();
    let (content_type, content_encoding) = guess_type(fullpath);

    let if_modified_since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok());
    if !was_modified_since(if_modified_since, mtime, size) {
        return Ok(
            (StatusCode::NOT_MODIFIED, [(header::CONTENT_TYPE, content_type)]).into_response(),
        );
    }

    let contents = fs::read(fullpath).map_err(internal)?;
    let mut response = contents.into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if let Ok(last_modified) = HeaderValue::from_str(&http_date(mtime)) {
        response_headers.insert(header::LAST_MODIFIED, last_modified);
    }
    if let Some(encoding) = content_encoding {
        response_headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static(encoding));
    }
    Ok(response)
}

/// Guess `(content type, content encoding)` from the file name. Compressed
/// suffixes contribute the encoding; the type comes from the inner name
/// (`app.js.gz` is gzip-encoded javascript).
fn guess_type(path: &Path) -> (&'static str, Option<&'static str>) {
    let (base, encoding) = match path.extension().and_then(OsStr::to_str) {
        Some("gz") => (path.with_extension(""), Some("gzip")),
        Some("bz2") => (path.with_extension(""), Some("bzip2")),
        Some("xz") => (path.with_extension(""), Some("xz")),
        _ => (path.to_path_buf(), None),
    };
    let content_type = mime_guess::from_path(&base)
        .first_raw()
        .unwrap_or("application/octet-stream");
    (content_type, encoding)
}

#[derive(Template)]
#[template(path = "directory_index.html")]
struct DirectoryIndexTemplate {
    directory: String,
    show_parent: bool,
    entries: Vec<IndexEntry>,
}

struct IndexEntry {
    href: String,
    name: String,
}

fn directory_index(
    state: &ServeContext,
    path: &str,
    fullpath: &Path,
) -> Result<Response, HttpError> {
    let (dirs, files) = match &state.mode {
        ServeMode::Finders => state.registry.listdir(path),
        ServeMode::DocumentRoot(_) => listdir_local(fullpath)?,
    };

    let mut dirs: Vec<String> = dirs
        .into_iter()
        .filter(|name| !name.starts_with('.'))
        .map(|name| format!("{name}/"))
        .collect();
    let mut files: Vec<String> = files
        .into_iter()
        .filter(|name| !name.starts_with('.'))
        .collect();
    dirs.sort();
    files.sort();

    let mut directory = format!("{}{}", state.config.url, path);
    if !directory.ends_with('/') {
        directory.push('/');
    }
    let show_parent = directory != "/";

    let entries = dirs
        .into_iter()
        .chain(files)
        .map(|name| IndexEntry {
            href: encode_href(&name),
            name,
        })
        .collect();

    let template = DirectoryIndexTemplate {
        directory,
        show_parent,
        entries,
    };
    let html = template
        .render()
        .map_err(|e| HttpError::Internal(e.to_string()))?;
    Ok(Html(html).into_response())
}

fn listdir_local(fullpath: &Path) -> Result<(Vec<String>, Vec<String>), HttpError> {
    let entries = fs::read_dir(fullpath).map_err(|e| HttpError::Internal(e.to_string()))?;
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| HttpError::Internal(e.to_string()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            dirs.push(name);
        } else {
            files.push(name);
        }
    }
    Ok((dirs, files))
}

/// URL-encode an index entry, keeping a directory's trailing slash intact.
fn encode_href(name: &str) -> String {
    match name.strip_suffix('/') {
        Some(stem) => format!("{}/", urlencoding::encode(stem)),
        None => urlencoding::encode(name).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_path_drops_dot_segments() {
        assert_eq!(clean_path("a/b.txt"), "a/b.txt");
        assert_eq!(clean_path("a//b.txt"), "a/b.txt");
        assert_eq!(clean_path("./a/../b.txt"), "a/b.txt");
        assert_eq!(clean_path("a/b/"), "a/b");
        assert_eq!(clean_path(""), "");
    }

    #[test]
    fn guess_type_sees_through_compression_suffixes() {
        assert_eq!(
            guess_type(Path::new("base.css.gz")),
            ("text/css", Some("gzip"))
        );
        assert_eq!(guess_type(Path::new("base.css")), ("text/css", None));
        assert_eq!(
            guess_type(Path::new("blob")),
            ("application/octet-stream", None)
        );
    }

    #[test]
    fn encode_href_preserves_directory_slash() {
        assert_eq!(encode_href("sub dir/"), "sub%20dir/");
        assert_eq!(encode_href("file name.txt"), "file%20name.txt");
    }
}
