use std::env;

use anyhow::{Context, Result};

pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";
pub const SITE_URL_ENV: &str = "SITE_URL";

/// Конфигурация из окружения. Значения не проверяются на корректность при
/// старте: неверный URL или ключ проявятся как ошибки запросов.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Адрес сайта для второстепенной отправки формы; без него она пропускается
    pub site_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            supabase_url: env::var(SUPABASE_URL_ENV)
                .with_context(|| format!("{} must be set", SUPABASE_URL_ENV))?,
            supabase_anon_key: env::var(SUPABASE_ANON_KEY_ENV)
                .with_context(|| format!("{} must be set", SUPABASE_ANON_KEY_ENV))?,
            site_url: env::var(SITE_URL_ENV).ok(),
        })
    }
}
