//! XML serialization for sitemaps, the RSS feed and the Google Merchant feed.
//!
//! Builders take fully-loaded rows and return the complete document as a
//! `String`, so a failed query upstream never produces a truncated document.
//! All free text goes through [`escape_xml`].

use std::fmt::Write;

use crate::types::Timestamp;

/// `Cache-Control` value for every feed response.
pub const FEED_CACHE_CONTROL: &str = "public, max-age=3600";

/// Number of posts included in the RSS feed.
pub const RSS_ITEM_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Escaping / formatting
// ---------------------------------------------------------------------------

pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline/CR are not allowed in XML 1.0.
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

/// RFC 822 date as used by RSS `pubDate`.
pub fn rfc822(dt: &Timestamp) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S +0000").to_string()
}

/// W3C datetime as used by sitemap `lastmod`.
pub fn w3c_date(dt: &Timestamp) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
}

/// Join the site base URL and an absolute path, tolerating a trailing slash
/// on the base. Values that are already absolute URLs pass through.
pub fn absolute_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

// ---------------------------------------------------------------------------
// Sitemaps
// ---------------------------------------------------------------------------

/// The per-type sitemaps listed in the sitemap index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Pages,
    Blog,
    Gallery,
    Routes,
}

impl SitemapKind {
    pub const ALL: [SitemapKind; 4] = [
        SitemapKind::Pages,
        SitemapKind::Blog,
        SitemapKind::Gallery,
        SitemapKind::Routes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SitemapKind::Pages => "pages",
            SitemapKind::Blog => "blog",
            SitemapKind::Gallery => "gallery",
            SitemapKind::Routes => "routes",
        }
    }

    /// Parse `blog` or `blog.xml`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(".xml").unwrap_or(name);
        Self::ALL.into_iter().find(|k| k.as_str() == stem)
    }

    pub fn path(self) -> String {
        format!("/sitemaps/{}.xml", self.as_str())
    }
}

/// Static public pages always present in the `pages` sitemap.
pub const STATIC_PAGES: &[(&str, &str, f32)] = &[
    ("/", "daily", 1.0),
    ("/routes", "weekly", 0.9),
    ("/vehicles", "weekly", 0.8),
    ("/blog", "daily", 0.8),
    ("/gallery", "weekly", 0.7),
    ("/reviews", "weekly", 0.7),
    ("/contacts", "monthly", 0.5),
];

#[derive(Debug, Clone)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<Timestamp>,
    pub changefreq: Option<&'static str>,
    pub priority: Option<f32>,
}

impl SitemapUrl {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }

    pub fn lastmod(mut self, at: Timestamp) -> Self {
        self.lastmod = Some(at);
        self
    }

    pub fn changefreq(mut self, freq: &'static str) -> Self {
        self.changefreq = Some(freq);
        self
    }

    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// The `pages` sitemap entries for a site rooted at `base_url`.
pub fn static_page_urls(base_url: &str) -> Vec<SitemapUrl> {
    STATIC_PAGES
        .iter()
        .map(|(path, freq, priority)| {
            SitemapUrl::new(absolute_url(base_url, path))
                .changefreq(freq)
                .priority(*priority)
        })
        .collect()
}

pub fn render_urlset(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for url in urls {
        xml.push_str("  <url>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&url.loc));
        if let Some(at) = &url.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", w3c_date(at));
        }
        if let Some(freq) = url.changefreq {
            let _ = writeln!(xml, "    <changefreq>{freq}</changefreq>");
        }
        if let Some(priority) = url.priority {
            let _ = writeln!(xml, "    <priority>{priority:.1}</priority>");
        }
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// One `<sitemap>` entry of the index.
#[derive(Debug, Clone)]
pub struct SitemapRef {
    pub loc: String,
    pub lastmod: Option<Timestamp>,
}

pub fn render_sitemap_index(sitemaps: &[SitemapRef]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for sitemap in sitemaps {
        xml.push_str("  <sitemap>\n");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&sitemap.loc));
        if let Some(at) = &sitemap.lastmod {
            let _ = writeln!(xml, "    <lastmod>{}</lastmod>", w3c_date(at));
        }
        xml.push_str("  </sitemap>\n");
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

// ---------------------------------------------------------------------------
// RSS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RssChannel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    /// URL of the feed itself, for `atom:link rel="self"`.
    pub self_link: String,
}

#[derive(Debug, Clone)]
pub struct RssItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: Timestamp,
    pub image_url: Option<String>,
}

pub fn render_rss(channel: &RssChannel, items: &[RssItem]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n  <channel>\n",
    );
    let _ = writeln!(xml, "    <title>{}</title>", escape_xml(&channel.title));
    let _ = writeln!(xml, "    <link>{}</link>", escape_xml(&channel.link));
    let _ = writeln!(
        xml,
        "    <description>{}</description>",
        escape_xml(&channel.description)
    );
    let _ = writeln!(xml, "    <language>{}</language>", escape_xml(&channel.language));
    let _ = writeln!(
        xml,
        "    <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>",
        escape_xml(&channel.self_link)
    );
    if let Some(latest) = items.iter().map(|i| i.pub_date).max() {
        let _ = writeln!(xml, "    <lastBuildDate>{}</lastBuildDate>", rfc822(&latest));
    }

    for item in items {
        xml.push_str("    <item>\n");
        let _ = writeln!(xml, "      <title>{}</title>", escape_xml(&item.title));
        let _ = writeln!(xml, "      <link>{}</link>", escape_xml(&item.link));
        let _ = writeln!(
            xml,
            "      <description>{}</description>",
            escape_xml(&item.description)
        );
        let _ = writeln!(xml, "      <pubDate>{}</pubDate>", rfc822(&item.pub_date));
        let _ = writeln!(
            xml,
            "      <guid isPermaLink=\"true\">{}</guid>",
            escape_xml(&item.link)
        );
        if let Some(image) = &item.image_url {
            let _ = writeln!(
                xml,
                "      <enclosure url=\"{}\" type=\"image/jpeg\" length=\"0\"/>",
                escape_xml(image)
            );
        }
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n</rss>\n");
    xml
}

// ---------------------------------------------------------------------------
// Google Merchant
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MerchantProduct {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub image_link: Option<String>,
    pub price: f64,
    pub currency: String,
    pub in_stock: bool,
    pub brand: String,
}

/// Google Merchant Center RSS 2.0 product feed.
pub fn render_merchant_feed(channel: &RssChannel, products: &[MerchantProduct]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <rss version=\"2.0\" xmlns:g=\"http://base.google.com/ns/1.0\">\n  <channel>\n",
    );
    let _ = writeln!(xml, "    <title>{}</title>", escape_xml(&channel.title));
    let _ = writeln!(xml, "    <link>{}</link>", escape_xml(&channel.link));
    let _ = writeln!(
        xml,
        "    <description>{}</description>",
        escape_xml(&channel.description)
    );

    for p in products {
        xml.push_str("    <item>\n");
        let _ = writeln!(xml, "      <g:id>{}</g:id>", escape_xml(&p.id));
        let _ = writeln!(xml, "      <g:title>{}</g:title>", escape_xml(&p.title));
        let _ = writeln!(
            xml,
            "      <g:description>{}</g:description>",
            escape_xml(&p.description)
        );
        let _ = writeln!(xml, "      <g:link>{}</g:link>", escape_xml(&p.link));
        if let Some(image) = &p.image_link {
            let _ = writeln!(xml, "      <g:image_link>{}</g:image_link>", escape_xml(image));
        }
        let _ = writeln!(
            xml,
            "      <g:availability>{}</g:availability>",
            if p.in_stock { "in_stock" } else { "out_of_stock" }
        );
        let _ = writeln!(
            xml,
            "      <g:price>{:.2} {}</g:price>",
            p.price,
            escape_xml(&p.currency)
        );
        xml.push_str("      <g:condition>new</g:condition>\n");
        let _ = writeln!(xml, "      <g:brand>{}</g:brand>", escape_xml(&p.brand));
        xml.push_str("      <g:identifier_exists>no</g:identifier_exists>\n");
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n</rss>\n");
    xml
}

/// Plain-text excerpt for feed descriptions: tags stripped, whitespace
/// collapsed, cut on a word boundary to at most `max_chars` characters.
pub fn plain_excerpt(text: &str, max_chars: usize) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                stripped.push(' ');
            }
            c if !in_tag => stripped.push(c),
            _ => {}
        }
    }
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    match cut.rfind(' ') {
        Some(pos) if pos > 0 => format!("{}...", &cut[..pos]),
        _ => format!("{cut}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn escape_xml_handles_special_characters() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<title>"), "&lt;title&gt;");
        assert_eq!(escape_xml("\"q\" 'a'"), "&quot;q&quot; &apos;a&apos;");
        assert_eq!(escape_xml("bell\u{7}"), "bell");
    }

    #[test]
    fn date_formats() {
        assert_eq!(rfc822(&ts()), "Mon, 15 Jan 2024 12:00:00 +0000");
        assert_eq!(w3c_date(&ts()), "2024-01-15T12:00:00+00:00");
    }

    #[test]
    fn absolute_url_joins_paths() {
        assert_eq!(absolute_url("https://site.test/", "/blog/a"), "https://site.test/blog/a");
        assert_eq!(absolute_url("https://site.test", "blog"), "https://site.test/blog");
        assert_eq!(
            absolute_url("https://site.test", "https://cdn.test/x.jpg"),
            "https://cdn.test/x.jpg"
        );
    }

    #[test]
    fn sitemap_kind_parsing() {
        assert_eq!(SitemapKind::from_file_name("blog.xml"), Some(SitemapKind::Blog));
        assert_eq!(SitemapKind::from_file_name("routes"), Some(SitemapKind::Routes));
        assert_eq!(SitemapKind::from_file_name("users.xml"), None);
        assert_eq!(SitemapKind::Gallery.path(), "/sitemaps/gallery.xml");
    }

    #[test]
    fn urlset_contains_escaped_locations() {
        let xml = render_urlset(&[SitemapUrl::new("https://site.test/blog/a?x=1&y=2")
            .lastmod(ts())
            .changefreq("weekly")
            .priority(0.7)]);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://site.test/blog/a?x=1&amp;y=2</loc>"));
        assert!(xml.contains("<lastmod>2024-01-15T12:00:00+00:00</lastmod>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_index_lists_children() {
        let xml = render_sitemap_index(&[
            SitemapRef {
                loc: "https://site.test/sitemaps/blog.xml".into(),
                lastmod: Some(ts()),
            },
            SitemapRef {
                loc: "https://site.test/sitemaps/pages.xml".into(),
                lastmod: None,
            },
        ]);
        assert_eq!(xml.matches("<sitemap>").count(), 2);
        assert!(xml.contains("<sitemapindex"));
    }

    #[test]
    fn rss_escapes_item_text() {
        let channel = RssChannel {
            title: "Blog & News".into(),
            link: "https://site.test/blog".into(),
            description: "Latest".into(),
            language: "ru".into(),
            self_link: "https://site.test/rss.xml".into(),
        };
        let xml = render_rss(
            &channel,
            &[RssItem {
                title: "<b>Sochi</b>".into(),
                link: "https://site.test/blog/sochi".into(),
                description: "Fast & cheap".into(),
                pub_date: ts(),
                image_url: None,
            }],
        );
        assert!(xml.contains("<title>Blog &amp; News</title>"));
        assert!(xml.contains("<title>&lt;b&gt;Sochi&lt;/b&gt;</title>"));
        assert!(xml.contains("<pubDate>Mon, 15 Jan 2024 12:00:00 +0000</pubDate>"));
        assert!(xml.contains("<lastBuildDate>"));
    }

    #[test]
    fn merchant_feed_formats_price() {
        let channel = RssChannel {
            title: "Transfers".into(),
            link: "https://site.test".into(),
            description: "Routes".into(),
            language: "ru".into(),
            self_link: String::new(),
        };
        let xml = render_merchant_feed(
            &channel,
            &[MerchantProduct {
                id: "route-1".into(),
                title: "Sochi - Adler".into(),
                description: "Airport transfer".into(),
                link: "https://site.test/routes/1".into(),
                image_link: None,
                price: 1500.0,
                currency: "RUB".into(),
                in_stock: true,
                brand: "Site".into(),
            }],
        );
        assert!(xml.contains("<g:price>1500.00 RUB</g:price>"));
        assert!(xml.contains("<g:availability>in_stock</g:availability>"));
        assert!(xml.contains("xmlns:g=\"http://base.google.com/ns/1.0\""));
    }

    #[test]
    fn excerpt_strips_tags_and_cuts_on_words() {
        assert_eq!(plain_excerpt("<p>Hello <b>world</b></p>", 100), "Hello world");
        assert_eq!(plain_excerpt("one two three four", 9), "one two...");
    }
}
