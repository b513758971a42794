use std::{net::SocketAddr, path::PathBuf};

use teloxide::types::ChatId;
use url::Url;

use crate::{error::ConfigError, render::Links};

pub const DEFAULT_CONTENT_DIR: &str = "data";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SITE_URL: &str = "https://moscowzoo.ru";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Webhook {
    pub url: Url,
    pub addr: SocketAddr,
}

/// Startup settings, read once from the environment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub admin_chat_id: Option<ChatId>,
    pub content_dir: PathBuf,
    pub log_level: String,
    pub links: Links,
    pub webhook: Option<Webhook>,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = var("BOT_TOKEN").ok_or(ConfigError::MissingToken)?;

        let admin_chat_id = var("ADMIN_CHAT_ID")
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map(ChatId)
                    .map_err(|_| ConfigError::InvalidAdminChatId(raw))
            })
            .transpose()?;

        let site = var("SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string());
        let links = Links::from_site(&site).map_err(|_| ConfigError::InvalidSiteUrl(site))?;

        let webhook = match (var("WEBHOOK_URL"), var("WEBHOOK_ADDR")) {
            (Some(url), Some(addr)) => Some(Webhook {
                url: url
                    .parse()
                    .map_err(|_| ConfigError::InvalidWebhookUrl(url.clone()))?,
                addr: addr
                    .parse()
                    .map_err(|_| ConfigError::InvalidWebhookAddr(addr.clone()))?,
            }),
            _ => None,
        };

        Ok(Self {
            token,
            admin_chat_id,
            content_dir: var("CONTENT_DIR")
                .unwrap_or_else(|| DEFAULT_CONTENT_DIR.to_string())
                .into(),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            links,
            webhook,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_is_required() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::MissingToken);
        assert_eq!(
            config(&[("BOT_TOKEN", "  ")]).unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("BOT_TOKEN", "123:abc")]).unwrap();

        assert_eq!(config.token, "123:abc");
        assert_eq!(config.admin_chat_id, None);
        assert_eq!(config.content_dir, PathBuf::from("data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.links.site().as_str(), "https://moscowzoo.ru/");
        assert_eq!(config.webhook, None);
    }

    #[test]
    fn admin_chat_id_must_be_numeric() {
        let ok = config(&[("BOT_TOKEN", "t"), ("ADMIN_CHAT_ID", "-100123")]).unwrap();
        assert_eq!(ok.admin_chat_id, Some(ChatId(-100123)));

        let err = config(&[("BOT_TOKEN", "t"), ("ADMIN_CHAT_ID", "admin")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidAdminChatId("admin".into()));
    }

    #[test]
    fn webhook_needs_both_values() {
        let half = config(&[("BOT_TOKEN", "t"), ("WEBHOOK_URL", "https://example.org/bot")]).unwrap();
        assert_eq!(half.webhook, None);

        let full = config(&[
            ("BOT_TOKEN", "t"),
            ("WEBHOOK_URL", "https://example.org/bot"),
            ("WEBHOOK_ADDR", "0.0.0.0:8443"),
        ])
        .unwrap();
        let webhook = full.webhook.unwrap();
        assert_eq!(webhook.addr.port(), 8443);
        assert_eq!(webhook.url.host_str(), Some("example.org"));

        let bad = config(&[
            ("BOT_TOKEN", "t"),
            ("WEBHOOK_URL", "https://example.org/bot"),
            ("WEBHOOK_ADDR", "nowhere"),
        ])
        .unwrap_err();
        assert_eq!(bad, ConfigError::InvalidWebhookAddr("nowhere".into()));
    }

    #[test]
    fn site_url_is_validated() {
        let err = config(&[("BOT_TOKEN", "t"), ("SITE_URL", "not a url")]).unwrap_err();
        assert_eq!(err, ConfigError::InvalidSiteUrl("not a url".into()));
    }
}
