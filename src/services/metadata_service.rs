//! Metadata synthesis for link previews, sitemap and robots
//!
//! 页面元数据注入到前端 `index.html` 的占位符处；sitemap/robots 仅在设置了
//! 实例地址后启用。

use std::sync::Arc;

use tracing::debug;

use crate::api::constants::COLLECTION_ROUTE_PREFIX;
use crate::config::FrontendConfig;
use crate::errors::{LinkhubError, Result};
use crate::storage::{
    Collection, FindCollection, FindShortcut, Shortcut, Store, Visibility, WorkspaceSettingKey,
};

/// Placeholder in `index.html` replaced by the rendered tags
pub const METADATA_PLACEHOLDER: &str = "<!-- linkhub.metadata -->";

const SITEMAP_URLSET_OPEN: &str = concat!(
    r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" "#,
    r#"xmlns:news="http://www.google.com/schemas/sitemap-news/0.9" "#,
    r#"xmlns:xhtml="http://www.w3.org/1999/xhtml" "#,
    r#"xmlns:mobile="http://www.google.com/schemas/sitemap-mobile/1.0" "#,
    r#"xmlns:image="http://www.google.com/schemas/sitemap-image/1.1" "#,
    r#"xmlns:video="http://www.google.com/schemas/sitemap-video/1.1">"#,
);

/// Simple HTML escaping for attribute and text values.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// 以这些路径开头的前缀会与已有路由冲突
const RESERVED_PREFIXES: &[&str] = &[
    "api",
    "slash",
    "robots.txt",
    "sitemap.xml",
    "crossdomain.xml",
    "favicon.ico",
    "metrics",
];

/// Normalizes a shortcut page prefix, rejecting ones that shadow other routes
pub fn validate_shortcut_prefix(prefix: &str) -> Result<String> {
    let normalized = prefix.trim().trim_matches('/');
    let invalid = normalized.is_empty()
        || normalized == COLLECTION_ROUTE_PREFIX
        || RESERVED_PREFIXES.iter().any(|p| normalized.starts_with(p));

    if invalid {
        return Err(LinkhubError::invalid_argument(format!(
            "Invalid shortcut prefix {:?}",
            prefix
        )));
    }
    Ok(normalized.to_string())
}

fn first_non_empty<'a>(candidates: &[&'a str]) -> &'a str {
    candidates
        .iter()
        .copied()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl SeoMetadata {
    /// Ordered head tags; values are HTML-escaped
    pub fn tags(&self) -> Vec<String> {
        let title = html_escape(&self.title);
        let description = html_escape(&self.description);
        let image = html_escape(&self.image);

        vec![
            format!("<title>{}</title>", title),
            format!(r#"<meta name="description" content="{}" />"#, description),
            format!(r#"<meta property="og:title" content="{}" />"#, title),
            format!(r#"<meta property="og:description" content="{}" />"#, description),
            format!(r#"<meta property="og:image" content="{}" />"#, image),
            r#"<meta property="og:type" content="website" />"#.to_string(),
            format!(r#"<meta property="twitter:title" content="{}" />"#, title),
            format!(
                r#"<meta property="twitter:description" content="{}" />"#,
                description
            ),
            format!(r#"<meta property="twitter:image" content="{}" />"#, image),
        ]
    }

    pub fn render(&self) -> String {
        self.tags().join("\n")
    }

    pub fn inject(&self, index_html: &str) -> String {
        index_html.replace(METADATA_PLACEHOLDER, &self.render())
    }
}

pub struct MetadataService {
    store: Arc<dyn Store>,
    site_name: String,
    shortcut_prefix: String,
}

impl MetadataService {
    pub fn new(store: Arc<dyn Store>, frontend: &FrontendConfig) -> Result<Self> {
        Ok(Self {
            store,
            site_name: frontend.site_name.clone(),
            shortcut_prefix: validate_shortcut_prefix(&frontend.shortcut_prefix)?,
        })
    }

    pub fn shortcut_prefix(&self) -> &str {
        &self.shortcut_prefix
    }

    /// 非空的 OpenGraph 字段逐项覆盖实体字段
    pub fn shortcut_metadata(&self, shortcut: &Shortcut) -> SeoMetadata {
        let og = &shortcut.og_metadata;
        SeoMetadata {
            title: first_non_empty(&[&og.title, &shortcut.title, &self.site_name]).to_string(),
            description: first_non_empty(&[&og.description, &shortcut.description]).to_string(),
            image: og.image.clone(),
        }
    }

    pub fn collection_metadata(&self, collection: &Collection) -> SeoMetadata {
        SeoMetadata {
            title: first_non_empty(&[&collection.title, &self.site_name]).to_string(),
            description: collection.description.clone(),
            image: String::new(),
        }
    }

    /// Page metadata when no entity applies
    pub fn default_metadata(&self) -> SeoMetadata {
        SeoMetadata {
            title: self.site_name.clone(),
            ..Default::default()
        }
    }

    /// 未设置或为空时返回 None
    async fn instance_url(&self) -> Result<Option<String>> {
        let setting = self
            .store
            .get_workspace_setting(WorkspaceSettingKey::InstanceUrl)
            .await?;
        Ok(setting
            .map(|s| s.value.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty()))
    }

    pub async fn robots(&self) -> Result<Option<String>> {
        let Some(base) = self.instance_url().await? else {
            return Ok(None);
        };

        Ok(Some(format!(
            "User-agent: *\nAllow: /\nHost: {}\nSitemap: {}/sitemap.xml",
            base, base
        )))
    }

    /// One `<url>` per public shortcut and public collection
    pub async fn sitemap(&self) -> Result<Option<String>> {
        let Some(base) = self.instance_url().await? else {
            return Ok(None);
        };

        let shortcuts = self
            .store
            .list_shortcuts(&FindShortcut {
                visibility_list: vec![Visibility::Public],
                ..Default::default()
            })
            .await?;
        let collections = self
            .store
            .list_collections(&FindCollection {
                visibility_list: vec![Visibility::Public],
                ..Default::default()
            })
            .await?;

        let mut urls = Vec::with_capacity(shortcuts.len() + collections.len());
        for shortcut in &shortcuts {
            let loc = format!(
                "{}/{}/{}",
                base,
                self.shortcut_prefix,
                urlencoding::encode(&shortcut.name)
            );
            urls.push(format!("<url><loc>{}</loc></url>", html_escape(&loc)));
        }
        for collection in &collections {
            let loc = format!(
                "{}/{}/{}",
                base,
                COLLECTION_ROUTE_PREFIX,
                urlencoding::encode(&collection.name)
            );
            urls.push(format!("<url><loc>{}</loc></url>", html_escape(&loc)));
        }

        debug!("Sitemap generated with {} urls", urls.len());
        Ok(Some(format!(
            "{}{}</urlset>",
            SITEMAP_URLSET_OPEN,
            urls.join("\n")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_order_and_escaping() {
        let metadata = SeoMetadata {
            title: "Tom & \"Jerry\"".to_string(),
            description: "<b>cartoon</b>".to_string(),
            image: "https://img.example/x.png".to_string(),
        };
        let tags = metadata.tags();

        assert_eq!(tags.len(), 9);
        assert_eq!(tags[0], "<title>Tom &amp; &quot;Jerry&quot;</title>");
        assert_eq!(
            tags[1],
            r#"<meta name="description" content="&lt;b&gt;cartoon&lt;/b&gt;" />"#
        );
        assert!(tags[2].contains("og:title"));
        assert!(tags[4].contains("og:image"));
        assert_eq!(tags[5], r#"<meta property="og:type" content="website" />"#);
        assert!(tags[8].contains("twitter:image"));
    }

    #[test]
    fn test_inject_replaces_placeholder() {
        let metadata = SeoMetadata {
            title: "Docs".to_string(),
            ..Default::default()
        };
        let html = format!("<head>{}</head>", METADATA_PLACEHOLDER);
        let injected = metadata.inject(&html);

        assert!(injected.starts_with("<head><title>Docs</title>\n"));
        assert!(!injected.contains(METADATA_PLACEHOLDER));
    }

    #[test]
    fn test_shortcut_prefix_normalized() {
        assert_eq!(validate_shortcut_prefix("s").unwrap(), "s");
        assert_eq!(validate_shortcut_prefix("/go/").unwrap(), "go");
        assert_eq!(validate_shortcut_prefix("links/s").unwrap(), "links/s");
    }

    #[test]
    fn test_shortcut_prefix_rejects_route_collisions() {
        for prefix in [
            "", "/", "c", "/c/", "api", "/api", "apis", "slash", "slashes", "robots.txt",
            "sitemap.xml", "crossdomain.xml", "favicon.ico", "metrics",
        ] {
            let err = validate_shortcut_prefix(prefix).unwrap_err();
            assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidArgument, "{:?}", prefix);
        }
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&["", "b", "c"]), "b");
        assert_eq!(first_non_empty(&["", ""]), "");
    }
}
