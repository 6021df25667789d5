use crate::models::BookingForm;
use crate::validation::{self, FieldErrors};

/// Явная фаза отправки вместо набора независимых флагов
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Success,
    Error(String),
}

/// Состояние формы: данные полей, ошибки и фаза отправки.
/// Владеет формой единолично, один экземпляр на сессию.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub form: BookingForm,
    pub errors: FieldErrors,
    pub phase: SubmitPhase,
    pub is_submitting: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Контролируемый ввод телефона: живая валидация на каждое изменение
    pub fn set_phone(&mut self, value: &str) {
        self.form.phone = value.to_string();
        validation::validate_phone(value, &mut self.errors);
    }

    pub fn set_mileage(&mut self, value: &str) {
        self.form.mileage = value.to_string();
        validation::validate_mileage(value, &mut self.errors);
    }

    /// Номер транслитерируется на каждое нажатие, поле хранит уже
    /// канонический вид
    pub fn set_car_number(&mut self, raw: &str) {
        let value = validation::to_latin(raw);
        validation::validate_car_number(&value, &mut self.errors);
        self.form.car_number = value;
    }

    pub fn set_service_date(&mut self, value: &str, today: &str) {
        self.form.service_date = value.to_string();
        validation::validate_service_date(value, today, &mut self.errors);
    }

    /// Возврат к пустой форме после успешной отправки
    pub fn reset(&mut self) {
        self.form = BookingForm::default();
        self.errors = FieldErrors::default();
        self.is_submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_empty() {
        let state = FormState::new();
        assert_eq!(state.phase, SubmitPhase::Idle);
        assert!(!state.is_submitting);
        assert_eq!(state.form, BookingForm::default());
    }

    #[test]
    fn car_number_input_is_transliterated_in_place() {
        let mut state = FormState::new();
        state.set_car_number("м123мм77");
        assert_eq!(state.form.car_number, "M123MM77");
        assert!(state.errors.car_number.is_none());

        state.set_car_number("ав");
        assert_eq!(state.form.car_number, "AB");
        assert!(state.errors.car_number.is_some());
    }

    #[test]
    fn live_validation_publishes_and_clears_errors() {
        let mut state = FormState::new();
        state.set_phone("123");
        assert!(state.errors.phone.is_some());
        state.set_phone("+7 (912) 345-67-89");
        assert!(state.errors.phone.is_none());

        state.set_mileage("abc");
        assert!(state.errors.mileage.is_some());
        state.set_mileage("50000");
        assert!(state.errors.mileage.is_none());
    }

    #[test]
    fn reset_restores_initial_form() {
        let mut state = FormState::new();
        state.set_phone("123");
        state.form.name = "Иван".to_string();
        state.is_submitting = true;

        state.reset();
        assert_eq!(state.form, BookingForm::default());
        assert_eq!(state.errors, FieldErrors::default());
        assert!(!state.is_submitting);
    }
}
