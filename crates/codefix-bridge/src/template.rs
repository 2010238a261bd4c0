//! Host page rendering for the panel surface.
//!
//! The host page is a template shipped in the assets directory with a
//! single placeholder for the UI bundle's URI. A missing template or a
//! template without the placeholder is an error the caller surfaces to
//! the user; the panel is never created without a page.

use std::path::Path;

use codefix_core::{CodefixError, Result};

/// Placeholder token the template must contain.
pub const BUNDLE_TOKEN: &str = "{{bundleUri}}";

/// File names inside the assets directory.
pub const TEMPLATE_FILE: &str = "panel.html";
pub const BUNDLE_FILE: &str = "panel.js";

/// Read the host page template and substitute the bundle token with the
/// resolved bundle URI.
pub fn render_host_page(assets_dir: &Path) -> Result<String> {
    let template_path = assets_dir.join(TEMPLATE_FILE);
    let template = std::fs::read_to_string(&template_path).map_err(|e| {
        CodefixError::Template(format!(
            "Failed to read {}: {e}",
            template_path.display()
        ))
    })?;

    if !template.contains(BUNDLE_TOKEN) {
        return Err(CodefixError::Template(format!(
            "{} is missing the {} placeholder",
            template_path.display(),
            BUNDLE_TOKEN
        )));
    }

    Ok(template.replace(BUNDLE_TOKEN, &bundle_uri(assets_dir)))
}

/// Resolved URI of the UI bundle. The bundle is resolved, not read; the
/// surface loads it itself once the page is injected.
fn bundle_uri(assets_dir: &Path) -> String {
    let bundle_path = assets_dir.join(BUNDLE_FILE);
    let absolute = bundle_path.canonicalize().unwrap_or(bundle_path);
    format!("file://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codefix_core::CodefixError;

    #[test]
    fn substitutes_the_bundle_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(TEMPLATE_FILE),
            "<html><script src=\"{{bundleUri}}\"></script></html>",
        )
        .unwrap();
        std::fs::write(dir.path().join(BUNDLE_FILE), "// bundle").unwrap();

        let page = render_host_page(dir.path()).unwrap();
        assert!(!page.contains(BUNDLE_TOKEN));
        assert!(page.contains("file://"));
        assert!(page.contains(BUNDLE_FILE));
    }

    #[test]
    fn missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_host_page(dir.path()).unwrap_err();
        assert!(matches!(err, CodefixError::Template(_)));
    }

    #[test]
    fn template_without_token_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TEMPLATE_FILE), "<html></html>").unwrap();
        let err = render_host_page(dir.path()).unwrap_err();
        assert!(matches!(err, CodefixError::Template(_)));
    }
}
