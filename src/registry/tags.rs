//! HTML tag rendering for registered assets

use url::Url;

use crate::resolver::{AssetKind, Registration, Version};
use crate::utils::clean_path;

/// Build the asset URL: base prefix + theme-relative path + `?ver=` token.
///
/// An absolute `base_url` is joined structurally; a bare path prefix like
/// `/` or `/wp-content/themes/custom` is joined textually.
pub fn asset_url(base_url: &str, path: &str, version: &Version) -> String {
    let rel = path.trim_start_matches('/');

    let href = match Url::parse(base_url) {
        Ok(mut base) => {
            // Url::join replaces the last segment unless the base path
            // ends with a slash
            if !base.path().ends_with('/') {
                let with_slash = format!("{}/", base.path());
                base.set_path(&with_slash);
            }
            match base.join(rel) {
                Ok(joined) => joined.to_string(),
                Err(_) => clean_path(&format!("{}/{}", base_url.trim_end_matches('/'), rel)),
            }
        }
        Err(_) => clean_path(&format!("{}/{}", base_url.trim_end_matches('/'), rel)),
    };

    format!("{}?ver={}", href, version)
}

/// Render the HTML tag for one registered asset.
pub fn render_tag(registration: &Registration, base_url: &str) -> String {
    let url = asset_url(base_url, &registration.path, &registration.version);

    match registration.kind {
        AssetKind::Stylesheet => format!(
            r#"<link rel="stylesheet" id="{}-css" href="{}" media="all" />"#,
            registration.handle, url
        ),
        AssetKind::Script => format!(
            r#"<script src="{}" id="{}-js"></script>"#,
            url, registration.handle
        ),
    }
}
