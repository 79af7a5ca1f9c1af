//! Static file serving for the frontend.

use tower_http::services::ServeDir;

/// Create the static file service for the frontend directory.
///
/// `index.html` is served for directory requests, so `/` renders the status
/// page. Paths that match nothing return 404.
pub fn create_static_service(static_dir: &str) -> ServeDir {
    ServeDir::new(static_dir).append_index_html_on_directories(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_construction_accepts_missing_directory() {
        // ServeDir resolves paths per-request; a missing directory must not
        // panic at construction time.
        let _service = create_static_service("does-not-exist");
    }
}
