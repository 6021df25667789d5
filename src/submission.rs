use std::time::Duration;

use crate::form_state::{FormState, SubmitPhase};
use crate::forms::FormSink;
use crate::models::BookingRecord;
use crate::storage::BookingStore;
use crate::validation;

/// Сколько показывается экран успеха перед сбросом формы
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(2);

pub const SUCCESS_MESSAGE: &str = "Запись успешно создана!";
const GENERIC_ERROR: &str =
    "Произошла ошибка при отправке формы. Пожалуйста, попробуйте позже.";
const PERMISSION_ERROR: &str =
    "Не удалось сохранить запись: недостаточно прав. Проверьте настройки доступа к базе.";

/// Отправка формы: валидация → сборка payload → основная вставка →
/// резервная вставка только при ошибке прав (42501) → второстепенная отправка
/// формы, результат которой не влияет на итог.
///
/// При терминальной ошибке данные формы не трогаются, чтобы пользователь мог
/// исправить их и отправить снова. Флаг is_submitting снимается на любом пути.
pub async fn handle_submit<S, F>(state: &mut FormState, store: &S, forms: Option<&F>)
where
    S: BookingStore + ?Sized,
    F: FormSink + ?Sized,
{
    state.is_submitting = true;
    state.phase = SubmitPhase::Validating;

    let today = validation::today_iso();
    if let Err(message) = validation::validate_form(&state.form, &today, &mut state.errors) {
        state.phase = SubmitPhase::Error(message);
        state.is_submitting = false;
        return;
    }

    state.phase = SubmitPhase::Submitting;
    let record = BookingRecord::from_form(&state.form);

    match store.insert(&record).await {
        Ok(()) => log::info!("✅ Запись сохранена в базе"),
        Err(err) if err.is_insufficient_privilege() => {
            // Обход неправильно настроенной RLS-политики тем же ключом,
            // унаследованное поведение
            log::warn!("⚠️ Недостаточно прав на вставку ({}), пробуем прямой REST-запрос", err);
            match store.insert_direct(&record).await {
                Ok(()) => log::info!("✅ Запись сохранена прямым REST-запросом"),
                Err(fallback_err) => {
                    log::error!("Ошибка резервной вставки: {}", fallback_err);
                    state.phase = SubmitPhase::Error(PERMISSION_ERROR.to_string());
                    state.is_submitting = false;
                    return;
                }
            }
        }
        Err(err) => {
            log::error!("Ошибка сохранения: {}", err);
            let message = err
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_ERROR.to_string());
            state.phase = SubmitPhase::Error(message);
            state.is_submitting = false;
            return;
        }
    }

    // Запись уже сохранена, результат второстепенной отправки отбрасывается
    match forms {
        Some(sink) => match sink.post(&record).await {
            Ok(()) => log::info!("✅ Форма продублирована в Netlify Forms"),
            Err(err) => log::warn!("Netlify form submission failed: {}", err),
        },
        None => log::debug!("SITE_URL не задан, второстепенная отправка пропущена"),
    }

    state.phase = SubmitPhase::Success;
    state.is_submitting = false;
}

/// Завершение успешной отправки: выдержать паузу с экраном успеха,
/// очистить форму и вернуться в Idle
pub async fn complete_success(state: &mut FormState) {
    tokio::time::sleep(SUCCESS_RESET_DELAY).await;
    state.reset();
    state.phase = SubmitPhase::Idle;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::{BookingForm, WorkType, OTHER_BRAND};
    use crate::storage::StorageError;
    use crate::validation::today_iso;

    /// Хранилище со сценарием ответов и счётчиками вызовов
    #[derive(Default)]
    struct FakeStore {
        insert_results: Mutex<Vec<Result<(), StorageError>>>,
        direct_results: Mutex<Vec<Result<(), StorageError>>>,
        insert_calls: AtomicUsize,
        direct_calls: AtomicUsize,
    }

    impl FakeStore {
        fn with_insert(result: Result<(), StorageError>) -> Self {
            let store = FakeStore::default();
            store.insert_results.lock().unwrap().push(result);
            store
        }

        fn privilege_error() -> StorageError {
            StorageError::Api {
                code: Some("42501".to_string()),
                message: "new row violates row-level security policy".to_string(),
            }
        }
    }

    #[async_trait]
    impl BookingStore for FakeStore {
        async fn insert(&self, _record: &BookingRecord) -> Result<(), StorageError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.insert_results.lock().unwrap();
            if results.is_empty() { Ok(()) } else { results.remove(0) }
        }

        async fn insert_direct(&self, _record: &BookingRecord) -> Result<(), StorageError> {
            self.direct_calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.direct_results.lock().unwrap();
            if results.is_empty() { Ok(()) } else { results.remove(0) }
        }
    }

    #[derive(Default)]
    struct FakeSink {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl FormSink for FakeSink {
        async fn post(&self, _record: &BookingRecord) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("500 Internal Server Error");
            }
            Ok(())
        }
    }

    fn valid_state() -> FormState {
        let mut state = FormState::new();
        state.form = BookingForm {
            name: "Иван".to_string(),
            phone: "+7 (912) 345-67-89".to_string(),
            car_brand: "Toyota".to_string(),
            car_number: "M123MM77".to_string(),
            mileage: "50000".to_string(),
            service_date: today_iso(),
            work_types: vec![WorkType::OilEngine],
            ..BookingForm::default()
        };
        state
    }

    #[tokio::test(start_paused = true)]
    async fn success_path_inserts_once_and_resets_after_delay() {
        let mut state = valid_state();
        let store = FakeStore::default();
        let sink = FakeSink::default();

        handle_submit(&mut state, &store, Some(&sink)).await;

        assert_eq!(state.phase, SubmitPhase::Success);
        assert!(!state.is_submitting);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.direct_calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);

        complete_success(&mut state).await;
        assert_eq!(state.phase, SubmitPhase::Idle);
        assert_eq!(state.form, BookingForm::default());
    }

    #[tokio::test]
    async fn privilege_error_triggers_exactly_one_fallback() {
        let mut state = valid_state();
        let store = FakeStore::with_insert(Err(FakeStore::privilege_error()));
        let sink = FakeSink::default();

        handle_submit(&mut state, &store, Some(&sink)).await;

        assert_eq!(state.phase, SubmitPhase::Success);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.direct_calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fallback_failure_is_terminal_with_permissions_message() {
        let mut state = valid_state();
        let store = FakeStore::with_insert(Err(FakeStore::privilege_error()));
        store.direct_results.lock().unwrap().push(Err(StorageError::Api {
            code: Some("42501".to_string()),
            message: "permission denied".to_string(),
        }));
        let sink = FakeSink::default();

        handle_submit(&mut state, &store, Some(&sink)).await;

        assert_eq!(state.phase, SubmitPhase::Error(PERMISSION_ERROR.to_string()));
        assert!(!state.is_submitting);
        // запись не прошла, второстепенная отправка не делается
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
        // данные формы не тронуты
        assert_eq!(state.form.name, "Иван");
    }

    #[tokio::test]
    async fn other_errors_do_not_trigger_fallback() {
        let mut state = valid_state();
        let store = FakeStore::with_insert(Err(StorageError::Api {
            code: Some("23505".to_string()),
            message: "duplicate key".to_string(),
        }));

        handle_submit(&mut state, &store, None::<&FakeSink>).await;

        assert_eq!(state.phase, SubmitPhase::Error("duplicate key".to_string()));
        assert_eq!(store.direct_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn error_without_server_message_gets_generic_banner() {
        let mut state = valid_state();
        let store = FakeStore::with_insert(Err(StorageError::Request(
            "connection refused".to_string(),
        )));

        handle_submit(&mut state, &store, None::<&FakeSink>).await;

        assert_eq!(state.phase, SubmitPhase::Error(GENERIC_ERROR.to_string()));
    }

    #[tokio::test]
    async fn aggregate_validation_failure_makes_no_network_call() {
        let mut state = valid_state();
        state.form.car_brand = OTHER_BRAND.to_string();
        state.form.custom_brand = String::new();
        let store = FakeStore::default();
        let sink = FakeSink::default();

        handle_submit(&mut state, &store, Some(&sink)).await;

        assert_eq!(
            state.phase,
            SubmitPhase::Error("Пожалуйста, укажите марку автомобиля".to_string())
        );
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
        assert!(!state.is_submitting);
    }

    #[tokio::test]
    async fn sink_failure_never_affects_outcome() {
        let mut state = valid_state();
        let store = FakeStore::default();
        let sink = FakeSink { fail: true, ..FakeSink::default() };

        handle_submit(&mut state, &store, Some(&sink)).await;

        assert_eq!(state.phase, SubmitPhase::Success);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_sink_is_not_an_error() {
        let mut state = valid_state();
        let store = FakeStore::default();

        handle_submit(&mut state, &store, None::<&FakeSink>).await;

        assert_eq!(state.phase, SubmitPhase::Success);
    }
}
