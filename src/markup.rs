// Text/XML generators: sitemaps, robots.txt, and HTML meta-tag blocks
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::InputError;

/// One `<url>` entry in a sitemap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapUrl {
    pub path: String,
    pub priority: Option<String>,
    pub change_freq: Option<String>,
    pub last_mod: Option<NaiveDate>,
}

impl SitemapUrl {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            priority: Some("0.5".to_string()),
            change_freq: Some("monthly".to_string()),
            last_mod: None,
        }
    }
}

/// Render a sitemap XML document for `base_url` and its URL entries.
/// The base URL is normalized: https scheme added if missing, trailing slash
/// stripped so paths join cleanly.
pub fn build_sitemap(base_url: &str, urls: &[SitemapUrl]) -> Result<String, InputError> {
    if base_url.trim().is_empty() {
        return Err(InputError::EmptyUrl);
    }

    let mut base = base_url.trim().to_string();
    if !base.starts_with("http") {
        base = format!("https://{base}");
    }
    if base.ends_with('/') {
        base.pop();
    }

    let mut sitemap = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    sitemap.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");
    for url in urls {
        sitemap.push_str("  <url>\n");
        sitemap.push_str(&format!("    <loc>{base}{}</loc>\n", url.path));
        if let Some(last_mod) = url.last_mod {
            sitemap.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                last_mod.format("%Y-%m-%d")
            ));
        }
        if let Some(freq) = &url.change_freq {
            sitemap.push_str(&format!("    <changefreq>{freq}</changefreq>\n"));
        }
        if let Some(priority) = &url.priority {
            sitemap.push_str(&format!("    <priority>{priority}</priority>\n"));
        }
        sitemap.push_str("  </url>\n");
    }
    sitemap.push_str("</urlset>");
    Ok(sitemap)
}

/// Per-crawler rule block for robots.txt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRule {
    pub user_agent: String,
    pub disallow: Vec<String>,
    pub allow: Vec<String>,
}

impl Default for AgentRule {
    fn default() -> Self {
        Self {
            user_agent: "*".to_string(),
            disallow: Vec::new(),
            allow: Vec::new(),
        }
    }
}

pub fn build_robots_txt(rules: &[AgentRule], sitemap_url: Option<&str>) -> String {
    let mut out = String::from("# robots.txt generated by SiteForge\n# https://siteforge.diy\n");
    for rule in rules {
        out.push('\n');
        out.push_str(&format!("User-agent: {}\n", rule.user_agent));
        for path in &rule.disallow {
            out.push_str(&format!("Disallow: {path}\n"));
        }
        for path in &rule.allow {
            out.push_str(&format!("Allow: {path}\n"));
        }
    }
    if let Some(url) = sitemap_url {
        out.push('\n');
        out.push_str(&format!("Sitemap: {url}\n"));
    }
    out
}

/// Form input for the meta-tag block. Open Graph and Twitter fields fall back
/// to the basic title/description when left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaTagForm {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub author: String,
    pub canonical: String,
    pub robots: String,
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
}

fn require(field: &'static str, value: &str, max: usize) -> Result<(), InputError> {
    if value.is_empty() {
        return Err(InputError::EmptyField(field));
    }
    if value.chars().count() > max {
        return Err(InputError::FieldTooLong { field, max });
    }
    Ok(())
}

/// Render the head-section meta tags for a page. Title is capped at 60
/// characters and description at 160, the lengths search results display
/// without truncation.
pub fn build_meta_tags(form: &MetaTagForm) -> Result<String, InputError> {
    require("title", &form.title, 60)?;
    require("description", &form.description, 160)?;

    let or = |value: &str, fallback: &str| -> String {
        if value.is_empty() {
            fallback.to_string()
        } else {
            value.to_string()
        }
    };
    let robots = or(&form.robots, "index, follow");

    let mut tags = String::new();
    tags.push_str(&format!("<title>{}</title>\n", form.title));
    tags.push_str(&format!(
        "<meta name=\"description\" content=\"{}\" />\n",
        form.description
    ));
    if !form.keywords.is_empty() {
        tags.push_str(&format!(
            "<meta name=\"keywords\" content=\"{}\" />\n",
            form.keywords
        ));
    }
    if !form.author.is_empty() {
        tags.push_str(&format!(
            "<meta name=\"author\" content=\"{}\" />\n",
            form.author
        ));
    }
    if !form.canonical.is_empty() {
        tags.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\" />\n",
            form.canonical
        ));
    }
    tags.push_str(&format!("<meta name=\"robots\" content=\"{robots}\" />\n"));

    tags.push_str("<meta property=\"og:type\" content=\"website\" />\n");
    tags.push_str(&format!(
        "<meta property=\"og:title\" content=\"{}\" />\n",
        or(&form.og_title, &form.title)
    ));
    tags.push_str(&format!(
        "<meta property=\"og:description\" content=\"{}\" />\n",
        or(&form.og_description, &form.description)
    ));
    if !form.canonical.is_empty() {
        tags.push_str(&format!(
            "<meta property=\"og:url\" content=\"{}\" />\n",
            form.canonical
        ));
    }
    if !form.og_image.is_empty() {
        tags.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\" />\n",
            form.og_image
        ));
    }

    tags.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\" />\n");
    tags.push_str(&format!(
        "<meta name=\"twitter:title\" content=\"{}\" />\n",
        or(&form.twitter_title, &form.title)
    ));
    tags.push_str(&format!(
        "<meta name=\"twitter:description\" content=\"{}\" />\n",
        or(&form.twitter_description, &form.description)
    ));
    if !form.twitter_image.is_empty() {
        tags.push_str(&format!(
            "<meta name=\"twitter:image\" content=\"{}\" />\n",
            form.twitter_image
        ));
    }

    Ok(tags)
}
