use anyhow::{Context, Result};

use crate::layout::units::PaperSize;
use crate::render::templates::TemplateId;

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub default_template: TemplateId,
    pub default_paper_size: PaperSize,
    /// Exports paginating to more pages than this are rejected.
    pub max_export_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            default_template: TemplateId::Modern,
            default_paper_size: PaperSize::A4,
            max_export_pages: 10,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let var = |key: &str, default: String| lookup(key).unwrap_or(default);

        let max_export_pages = var("MAX_EXPORT_PAGES", defaults.max_export_pages.to_string())
            .parse::<usize>()
            .context("MAX_EXPORT_PAGES must be a positive integer")?;
        if max_export_pages == 0 {
            anyhow::bail!("MAX_EXPORT_PAGES must be at least 1");
        }

        Ok(Config {
            port: var("PORT", defaults.port.to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", defaults.rust_log),
            default_template: var("DEFAULT_TEMPLATE", defaults.default_template.to_string())
                .parse()
                .context("DEFAULT_TEMPLATE must name one of the built-in templates")?,
            default_paper_size: var("DEFAULT_PAPER_SIZE", defaults.default_paper_size.to_string())
                .parse()
                .context("DEFAULT_PAPER_SIZE must be a4, letter or legal")?,
            max_export_pages,
        })
    }
}
