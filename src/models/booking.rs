use serde::{Serialize, Deserialize};

/// Значение-маркер для марки, которой нет в списке
pub const OTHER_BRAND: &str = "other";

/// Марки автомобилей для выпадающего списка (уже отсортированы)
pub const CAR_BRANDS: [&str; 20] = [
    "Audi", "BMW", "Chevrolet", "Ford", "Honda", "Hyundai", "Kia", "Lada", "Lexus",
    "Mazda", "Mercedes-Benz", "Mitsubishi", "Nissan", "Opel", "Peugeot", "Renault",
    "Skoda", "Toyota", "Volkswagen", "Volvo",
];

/// Вид работ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkType {
    OilEngine,
    OilTransmission,
    Coolant,
}

impl WorkType {
    pub fn all() -> [WorkType; 3] {
        [WorkType::OilEngine, WorkType::OilTransmission, WorkType::Coolant]
    }

    /// Код для таблицы car_services и формы Netlify
    pub fn code(&self) -> &'static str {
        match self {
            WorkType::OilEngine => "oil_engine",
            WorkType::OilTransmission => "oil_transmission",
            WorkType::Coolant => "coolant",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkType::OilEngine => "Замена масла двигатель",
            WorkType::OilTransmission => "Замена масла КПП",
            WorkType::Coolant => "Замена охлаждающей жидкости",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|work| work.code() == code)
    }
}

/// Сырые значения полей формы, как их ввёл пользователь
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub car_brand: String,
    pub custom_brand: String,
    pub car_number: String,
    pub mileage: String,
    pub next_service_date: String,
    pub service_date: String,
    pub oil_type: String,
    pub oil_change_interval: String,
    pub work_types: Vec<WorkType>,
    pub additional_work: String,
}

impl BookingForm {
    /// Выбранная марка или введённая вручную, если выбрано "Другое"
    pub fn resolved_brand(&self) -> &str {
        if self.car_brand == OTHER_BRAND {
            &self.custom_brand
        } else {
            &self.car_brand
        }
    }

    pub fn toggle_work_type(&mut self, work: WorkType) {
        if let Some(pos) = self.work_types.iter().position(|w| *w == work) {
            self.work_types.remove(pos);
        } else {
            self.work_types.push(work);
        }
    }
}

/// Нормализованная запись для вставки в car_services.
/// id и created_at назначает сервер, клиент их не отправляет.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub name: String,
    pub phone: String,
    pub car_brand: String,
    pub car_number: String,
    pub mileage: i64,
    pub next_service_date: String,
    pub service_date: String,
    pub work_types: Vec<WorkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oil_change_interval: Option<i64>,
    pub additional_work: String,
}

impl BookingRecord {
    /// Собирает нормализованный payload. Вызывается только после успешной
    /// валидации формы, поэтому пробег здесь уже гарантированно число.
    pub fn from_form(form: &BookingForm) -> Self {
        BookingRecord {
            name: form.name.clone(),
            phone: form.phone.clone(),
            car_brand: form.resolved_brand().to_string(),
            car_number: form.car_number.clone(),
            mileage: form.mileage.trim().parse().unwrap_or(0),
            next_service_date: form.next_service_date.clone(),
            service_date: form.service_date.clone(),
            work_types: form.work_types.clone(),
            oil_type: non_empty(&form.oil_type),
            oil_change_interval: parse_positive(&form.oil_change_interval),
            additional_work: form.additional_work.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Пустая или некорректная числовая строка превращается в None, не в ноль
fn parse_positive(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|n| *n > 0)
}
