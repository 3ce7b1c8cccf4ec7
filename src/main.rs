use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use siteforge::audit::audit_url;
use siteforge::backlinks::generate_backlink_data;
use siteforge::content::analyze_content;
use siteforge::keywords::generate_keyword_data;
use siteforge::markup::{build_meta_tags, build_robots_txt, build_sitemap, AgentRule, MetaTagForm, SitemapUrl};
use siteforge::pagespeed::{extract_performance_metrics, PagespeedClient, PagespeedOutcome, Strategy};
use siteforge::report;

#[derive(Parser)]
#[command(name = "siteforge")]
#[command(about = "SEO toolkit: keyword research, backlink profiles, content analysis", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Research keyword variations for a seed keyword
    Keywords {
        /// Seed keyword to expand
        seed: String,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the backlink profile of a domain
    Backlinks {
        /// Domain to profile
        domain: String,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Analyze content for readability and on-page SEO
    Content {
        /// File to read content from (stdin if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Target keyword to check density for
        #[arg(short, long)]
        keyword: Option<String>,

        /// Output format (summary, json, report)
        #[arg(long, default_value = "summary")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query PageSpeed Insights for a URL
    Pagespeed {
        /// URL to analyze
        url: String,

        /// Lighthouse strategy
        #[arg(short, long, value_enum, default_value_t = Strategy::Mobile)]
        strategy: Strategy,

        /// API key (falls back to $PAGESPEED_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Run a full site audit (live page-speed data with mock fallback)
    Audit {
        /// URL to audit
        url: String,

        /// Output format (summary, json)
        #[arg(short, long, default_value = "summary")]
        format: String,

        /// API key (falls back to $PAGESPEED_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a sitemap.xml document
    Sitemap {
        /// Base URL of the site
        base_url: String,

        /// Paths to include (repeatable; "/" if none given)
        #[arg(short, long)]
        path: Vec<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate a robots.txt file
    Robots {
        /// User-agent the rules apply to
        #[arg(long, default_value = "*")]
        agent: String,

        /// Disallowed paths (repeatable)
        #[arg(long)]
        disallow: Vec<String>,

        /// Allowed paths (repeatable)
        #[arg(long)]
        allow: Vec<String>,

        /// Sitemap URL to reference
        #[arg(long)]
        sitemap: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate HTML meta tags for a page
    Meta {
        /// Page title (60 characters max)
        #[arg(long)]
        title: String,

        /// Meta description (160 characters max)
        #[arg(long)]
        description: String,

        /// Comma-separated keywords
        #[arg(long, default_value = "")]
        keywords: String,

        /// Page author
        #[arg(long, default_value = "")]
        author: String,

        /// Canonical URL
        #[arg(long, default_value = "")]
        canonical: String,

        /// Robots directive (defaults to "index, follow")
        #[arg(long, default_value = "")]
        robots: String,

        /// Open Graph image URL
        #[arg(long, default_value = "")]
        og_image: String,

        /// Twitter card image URL
        #[arg(long, default_value = "")]
        twitter_image: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn write_output(content: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, content)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn resolve_api_key(flag: Option<String>) -> Option<String> {
    flag.or_else(|| std::env::var("PAGESPEED_API_KEY").ok())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Keywords {
            seed,
            format,
            output,
        } => {
            info!("🔑 Researching keyword variations for '{seed}'...");
            let results = generate_keyword_data(&seed)?;
            match format.as_str() {
                "json" => write_output(&serde_json::to_string_pretty(&results)?, output)?,
                "csv" => {
                    let default = output.or(Some(PathBuf::from(report::keywords_csv_filename(
                        &seed,
                    ))));
                    write_output(&report::keywords_csv(&results), default)?;
                }
                _ => {
                    let rendered = format!(
                        "{}\n\n{}",
                        report::keywords_table(&results),
                        report::keyword_insights(&seed, &results)
                    );
                    write_output(&rendered, output)?;
                }
            }
            Ok(())
        }

        Commands::Backlinks {
            domain,
            format,
            output,
        } => {
            info!("🔗 Building backlink profile for {domain}...");
            let profile = generate_backlink_data(&domain, Utc::now())?;
            match format.as_str() {
                "json" => write_output(&serde_json::to_string_pretty(&profile)?, output)?,
                "csv" => {
                    let default = output.or(Some(PathBuf::from(report::backlinks_csv_filename(
                        &domain,
                    ))));
                    write_output(&report::backlinks_csv(&profile), default)?;
                }
                _ => {
                    let rendered = format!(
                        "{}\n{}",
                        report::backlink_summary(&profile),
                        report::backlinks_table(&profile)
                    );
                    write_output(&rendered, output)?;
                }
            }
            Ok(())
        }

        Commands::Content {
            file,
            keyword,
            format,
            output,
        } => {
            let text = match file {
                Some(path) => fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            if text.trim().is_empty() {
                anyhow::bail!("no content to analyze");
            }

            let analysis = analyze_content(&text, keyword.as_deref());
            match format.as_str() {
                "json" => write_output(&serde_json::to_string_pretty(&analysis)?, output)?,
                "report" => write_output(
                    &report::content_report(&analysis, Utc::now().date_naive()),
                    output,
                )?,
                _ => write_output(&report::content_summary(&analysis), output)?,
            }
            Ok(())
        }

        Commands::Pagespeed {
            url,
            strategy,
            api_key,
        } => {
            info!("⚡ Querying PageSpeed Insights for {url} ({strategy})...");
            let client = PagespeedClient::new(resolve_api_key(api_key));
            match client.analyze(&url, strategy).await {
                PagespeedOutcome::Ok { result } => match extract_performance_metrics(&result) {
                    Some(metrics) => {
                        println!("{}", serde_json::to_string_pretty(&metrics)?);
                    }
                    None => anyhow::bail!("response carried no lighthouse data"),
                },
                PagespeedOutcome::RateLimited { message } => anyhow::bail!(message),
                PagespeedOutcome::Error { message } => anyhow::bail!(message),
            }
            Ok(())
        }

        Commands::Audit {
            url,
            format,
            api_key,
            output,
        } => {
            info!("🔍 Auditing {url}...");
            let client = PagespeedClient::new(resolve_api_key(api_key));
            let audit = audit_url(&client, &url).await?;
            match format.as_str() {
                "json" => write_output(&serde_json::to_string_pretty(&audit)?, output)?,
                _ => write_output(&report::audit_summary(&audit), output)?,
            }
            Ok(())
        }

        Commands::Sitemap {
            base_url,
            path,
            output,
        } => {
            let mut urls: Vec<SitemapUrl> = if path.is_empty() {
                vec![SitemapUrl::new("/")]
            } else {
                path.into_iter().map(SitemapUrl::new).collect()
            };
            for url in &mut urls {
                url.last_mod = Some(Utc::now().date_naive());
            }
            write_output(&build_sitemap(&base_url, &urls)?, output)
        }

        Commands::Robots {
            agent,
            disallow,
            allow,
            sitemap,
            output,
        } => {
            let rules = vec![AgentRule {
                user_agent: agent,
                disallow,
                allow,
            }];
            write_output(&build_robots_txt(&rules, sitemap.as_deref()), output)
        }

        Commands::Meta {
            title,
            description,
            keywords,
            author,
            canonical,
            robots,
            og_image,
            twitter_image,
            output,
        } => {
            let form = MetaTagForm {
                title,
                description,
                keywords,
                author,
                canonical,
                robots,
                og_image,
                twitter_image,
                ..MetaTagForm::default()
            };
            write_output(&build_meta_tags(&form)?, output)
        }
    }
}
