// Finding external links in compiled post bodies.

use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use super::{ImageFormat, PreviewConfig};
use crate::layout::seeded::hash_seed;

/// A compiled post as emitted by the content pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    pub code: String,
    #[serde(default)]
    pub draft: bool,
}

/// Key of a URL in the manifest and the screenshot's file stem.
///
/// Twelve lower-case hex digits of the absolute 32-bit seed hash. The blog
/// renders previews by recomputing this key, so it must stay stable.
pub fn preview_key(url: &str) -> String {
    format!("{:012x}", hash_seed(url).unsigned_abs())
}

pub fn screenshot_filename(url: &str, format: ImageFormat) -> String {
    format!("{}.{}", preview_key(url), format.extension())
}

/// True for absolute http(s) links that leave the site.
pub fn is_external_url(url: &str, cfg: &PreviewConfig) -> bool {
    if url.is_empty() || url.starts_with('/') || url.starts_with('#') {
        return false;
    }
    if !cfg.site_host.is_empty() && url.contains(&cfg.site_host) {
        return false;
    }
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// External and not on an excluded (social/video) host.
pub fn should_generate_preview(url: &str, cfg: &PreviewConfig) -> bool {
    if !is_external_url(url, cfg) {
        return false;
    }
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let host = parsed.host_str().unwrap_or_default();
    !cfg.excluded_domains.iter().any(|domain| host.contains(domain.as_str()))
}

fn href_patterns() -> &'static [Regex; 3] {
    static RE: OnceLock<[Regex; 3]> = OnceLock::new();

    RE.get_or_init(|| {
        [
            // JSX in compiled code, possibly with escaped quotes: href=\"...\" or href:\"...\"
            Regex::new(r#"href[=:]\\?"([^"\\]+)\\?""#).unwrap(),
            // Object props: href: "..." or href: '...'
            Regex::new(r#"href:\s*["']([^"']+)["']"#).unwrap(),
            // Plain HTML attributes
            Regex::new(r#"href="([^"]+)""#).unwrap(),
        ]
    })
}

/// Extract preview-worthy URLs from compiled post code, first-seen order.
pub fn extract_urls(code: &str, cfg: &PreviewConfig) -> Vec<String> {
    let mut urls: IndexSet<String> = IndexSet::new();

    for re in href_patterns() {
        for caps in re.captures_iter(code) {
            let url = &caps[1];
            if should_generate_preview(url, cfg) {
                urls.insert(url.to_string());
            }
        }
    }

    urls.into_iter().collect()
}

/// Unique URLs across all published posts.
pub fn collect_post_urls(posts: &[Post], cfg: &PreviewConfig) -> Vec<String> {
    let mut all: IndexSet<String> = IndexSet::new();
    for post in posts.iter().filter(|p| !p.draft) {
        all.extend(extract_urls(&post.code, cfg));
    }
    all.into_iter().collect()
}

/// Digest of every post body, drafts included, to skip runs with no content change.
pub fn content_hash(posts: &[Post]) -> String {
    let mut hasher = blake3::Hasher::new();
    for post in posts {
        hasher.update(post.code.as_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_key() {
        assert_eq!(preview_key("https://example.com"), "000025b884ce");
        assert_eq!(preview_key("https://github.com/rust-lang/rust"), "00001c086f06");
        assert_eq!(preview_key(""), "000000000000");
        assert_eq!(preview_key("https://example.com").len(), 12);
    }

    #[test]
    fn test_screenshot_filename() {
        assert_eq!(
            screenshot_filename("https://example.com", ImageFormat::Jpeg),
            "000025b884ce.jpeg"
        );
        assert_eq!(screenshot_filename("https://example.com", ImageFormat::Png), "000025b884ce.png");
    }

    #[test]
    fn test_is_external_url() {
        let cfg = PreviewConfig::default();
        assert!(is_external_url("https://example.com/post", &cfg));
        assert!(is_external_url("http://example.com", &cfg));

        assert!(!is_external_url("", &cfg));
        assert!(!is_external_url("/blog/hello", &cfg));
        assert!(!is_external_url("#section", &cfg));
        assert!(!is_external_url("https://braydoncoyer.dev/blog", &cfg));
        assert!(!is_external_url("mailto:hi@example.com", &cfg));
        assert!(!is_external_url("not a url", &cfg));
    }

    #[test]
    fn test_excluded_domains() {
        let cfg = PreviewConfig::default();
        assert!(should_generate_preview("https://developer.mozilla.org/en-US/", &cfg));
        assert!(!should_generate_preview("https://twitter.com/someone", &cfg));
        assert!(!should_generate_preview("https://www.youtube.com/watch?v=abc", &cfg));
        assert!(!should_generate_preview("https://old.reddit.com/r/rust", &cfg));
        assert!(!should_generate_preview("/about", &cfg));
    }

    #[test]
    fn test_extract_urls() {
        let cfg = PreviewConfig::default();
        let code = concat!(
            r#"_jsx(a, {href: "https://tailwindcss.com/docs", children: "docs"}),"#,
            r#"_jsx(a, {href: 'https://nextjs.org'}),"#,
            r#"<a href=\"https://vercel.com\">x</a>"#,
            r#"<a href="https://tailwindcss.com/docs">again</a>"#,
            r#"<a href="/blog/local">local</a>"#,
            r#"<a href="https://twitter.com/x">tweet</a>"#,
        );

        let urls = extract_urls(code, &cfg);
        assert_eq!(
            urls,
            vec![
                "https://vercel.com".to_string(),
                "https://tailwindcss.com/docs".to_string(),
                "https://nextjs.org".to_string(),
            ]
        );
    }

    #[test]
    fn test_collect_skips_drafts() {
        let cfg = PreviewConfig::default();
        let posts = vec![
            Post { code: r#"href="https://a.example.com""#.to_string(), draft: false },
            Post { code: r#"href="https://draft.example.com""#.to_string(), draft: true },
            Post { code: r#"href="https://a.example.com" href="https://b.example.com""#.to_string(), draft: false },
        ];

        let urls = collect_post_urls(&posts, &cfg);
        assert_eq!(urls, vec!["https://a.example.com", "https://b.example.com"]);
    }

    #[test]
    fn test_content_hash_tracks_changes() {
        let posts = vec![Post { code: "one".to_string(), draft: false }];
        let same = vec![Post { code: "one".to_string(), draft: false }];
        let edited = vec![Post { code: "one!".to_string(), draft: false }];

        assert_eq!(content_hash(&posts), content_hash(&same));
        assert_ne!(content_hash(&posts), content_hash(&edited));
        assert_eq!(content_hash(&posts).len(), 64);
    }
}
