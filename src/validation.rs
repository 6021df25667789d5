use crate::models::{BookingForm, OTHER_BRAND};

/// Ошибки по отдельным полям; None — поле корректно
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    pub phone: Option<String>,
    pub mileage: Option<String>,
    pub car_number: Option<String>,
    pub date: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none()
            && self.mileage.is_none()
            && self.car_number.is_none()
            && self.date.is_none()
    }

    /// Первая сработавшая ошибка в порядке проверки полей
    pub fn first(&self) -> Option<&str> {
        self.phone
            .as_deref()
            .or(self.mileage.as_deref())
            .or(self.car_number.as_deref())
            .or(self.date.as_deref())
    }
}

/// Сегодняшняя дата в формате ISO, сравнение строк совпадает с хронологией
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub fn validate_phone(phone: &str, errors: &mut FieldErrors) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digits != 11 {
        errors.phone = Some("Введите корректный номер телефона".to_string());
        return false;
    }
    errors.phone = None;
    true
}

pub fn validate_mileage(mileage: &str, errors: &mut FieldErrors) -> bool {
    match mileage.trim().parse::<i64>() {
        Ok(num) if num > 0 => {
            errors.mileage = None;
            true
        }
        _ => {
            errors.mileage = Some("Пробег должен быть положительным числом".to_string());
            false
        }
    }
}

pub fn validate_car_number(number: &str, errors: &mut FieldErrors) -> bool {
    if number.chars().count() < 3 {
        errors.car_number = Some("Номер должен содержать минимум 3 символа".to_string());
        return false;
    }
    errors.car_number = None;
    true
}

pub fn validate_service_date(date: &str, today: &str, errors: &mut FieldErrors) -> bool {
    if date < today {
        errors.date = Some("Дата ТО не может быть в прошлом".to_string());
        return false;
    }
    errors.date = None;
    true
}

/// Общая проверка перед отправкой. Полевые валидаторы выполняются всегда,
/// чтобы ошибки остались видимыми, даже если первая проверка уже провалилась.
/// Err несёт сообщение для общего баннера.
pub fn validate_form(form: &BookingForm, today: &str, errors: &mut FieldErrors) -> Result<(), String> {
    let phone_ok = validate_phone(&form.phone, errors);
    let mileage_ok = validate_mileage(&form.mileage, errors);
    let number_ok = validate_car_number(&form.car_number, errors);
    let date_ok = validate_service_date(&form.service_date, today, errors);

    if form.car_brand == OTHER_BRAND && form.custom_brand.trim().is_empty() {
        return Err("Пожалуйста, укажите марку автомобиля".to_string());
    }

    if form.work_types.is_empty() {
        return Err("Пожалуйста, выберите хотя бы один вид работ".to_string());
    }

    if phone_ok && mileage_ok && number_ok && date_ok {
        Ok(())
    } else {
        // общий баннер показывает первую из полевых ошибок
        Err(errors.first().unwrap_or("Проверьте поля формы").to_string())
    }
}

/// Приводит номер автомобиля к латинским заглавным буквам и цифрам.
/// Кириллические буквы, совпадающие по начертанию с латинскими на номерных
/// знаках, заменяются на латинские; всё остальное за пределами [A-Z0-9]
/// отбрасывается.
pub fn to_latin(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.to_lowercase().chars() {
        match ch {
            'а' => out.push('A'),
            'в' => out.push('B'),
            'е' => out.push('E'),
            'к' => out.push('K'),
            'м' => out.push('M'),
            'н' => out.push('H'),
            'о' => out.push('O'),
            'р' => out.push('P'),
            'с' => out.push('C'),
            'т' => out.push('T'),
            'у' => out.push('Y'),
            'х' => out.push('X'),
            'a'..='z' => out.push(ch.to_ascii_uppercase()),
            _ => out.extend(ch.to_uppercase()),
        }
    }
    out.retain(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    out
}
