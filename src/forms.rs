use anyhow::Result;
use async_trait::async_trait;

use crate::models::BookingRecord;

/// Фиксированный идентификатор формы на стороне Netlify
pub const FORM_NAME: &str = "service-registration";

/// Второстепенный приёмник формы. Его сбой никогда не влияет на итог отправки.
#[async_trait]
pub trait FormSink: Send + Sync {
    async fn post(&self, record: &BookingRecord) -> Result<()>;
}

/// Отправка формы в Netlify Forms: POST на корень сайта в формате
/// application/x-www-form-urlencoded
#[derive(Clone)]
pub struct NetlifyClient {
    http: reqwest::Client,
    site_url: String,
}

impl NetlifyClient {
    pub fn new(site_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            site_url: site_url.trim_end_matches('/').to_string() + "/",
        }
    }
}

/// Поля формы в том же составе, что и payload для базы
fn form_fields(record: &BookingRecord) -> Vec<(&'static str, String)> {
    let work_types = record
        .work_types
        .iter()
        .map(|w| w.code())
        .collect::<Vec<_>>()
        .join(", ");

    let mut fields = vec![
        ("form-name", FORM_NAME.to_string()),
        ("name", record.name.clone()),
        ("phone", record.phone.clone()),
        ("car_brand", record.car_brand.clone()),
        ("car_number", record.car_number.clone()),
        ("mileage", record.mileage.to_string()),
        ("next_service_date", record.next_service_date.clone()),
        ("service_date", record.service_date.clone()),
        ("work_types", work_types),
        ("additional_work", record.additional_work.clone()),
    ];
    if let Some(oil_type) = &record.oil_type {
        fields.push(("oil_type", oil_type.clone()));
    }
    if let Some(interval) = record.oil_change_interval {
        fields.push(("oil_change_interval", interval.to_string()));
    }
    fields
}

#[async_trait]
impl FormSink for NetlifyClient {
    async fn post(&self, record: &BookingRecord) -> Result<()> {
        let response = self
            .http
            .post(&self.site_url)
            .form(&form_fields(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Netlify form response not OK: {}", status);
        }
        Ok(())
    }
}
