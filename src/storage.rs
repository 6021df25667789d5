use async_trait::async_trait;

use crate::models::BookingRecord;

/// Код PostgREST "insufficient_privilege", включает резервный путь вставки
pub const INSUFFICIENT_PRIVILEGE_CODE: &str = "42501";

const TABLE_ENDPOINT: &str = "rest/v1/car_services";

#[derive(Debug)]
pub enum StorageError {
    /// Сетевая ошибка, до сервера не дошли
    Request(String),
    /// Ответ сервера с ошибкой; code — машинный код PostgREST, если он был
    Api { code: Option<String>, message: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Request(e) => write!(f, "Request error: {}", e),
            StorageError::Api { code: Some(code), message } => {
                write!(f, "Storage error {}: {}", code, message)
            }
            StorageError::Api { code: None, message } => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Request(err.to_string())
    }
}

impl StorageError {
    pub fn is_insufficient_privilege(&self) -> bool {
        matches!(self, StorageError::Api { code: Some(code), .. } if code == INSUFFICIENT_PRIVILEGE_CODE)
    }

    /// Сообщение сервера для баннера; None, если показывать нечего
    pub fn message(&self) -> Option<&str> {
        match self {
            StorageError::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Хранилище записей. Внедряется в оркестратор, в тестах подменяется фейком.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Основная вставка одной записи
    async fn insert(&self, record: &BookingRecord) -> Result<(), StorageError>;

    /// Резервная вставка прямым REST-запросом к той же коллекции
    async fn insert_direct(&self, record: &BookingRecord) -> Result<(), StorageError>;
}

/// Клиент Supabase. Создаётся один раз при старте и дальше не меняется.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/{}", self.base_url, TABLE_ENDPOINT)
    }

    async fn post_record(&self, record: &BookingRecord) -> Result<(), StorageError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            log::debug!("Создана запись: {}", body);
            return Ok(());
        }
        Err(parse_api_error(status.as_u16(), &body))
    }
}

/// Тело ошибки PostgREST: {"code": "...", "message": "...", ...}
fn parse_api_error(status: u16, body: &str) -> StorageError {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let code = value
                .get("code")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let message = value
                .get("message")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();
            StorageError::Api { code, message }
        }
        Err(_) => StorageError::Api {
            code: None,
            message: format!("HTTP {}", status),
        },
    }
}

#[async_trait]
impl BookingStore for SupabaseClient {
    async fn insert(&self, record: &BookingRecord) -> Result<(), StorageError> {
        log::debug!("📦 Вставка записи в car_services");
        self.post_record(record).await
    }

    async fn insert_direct(&self, record: &BookingRecord) -> Result<(), StorageError> {
        log::debug!("📦 Резервная вставка прямым REST-запросом");
        self.post_record(record).await
    }
}
