use std::io::{self, BufRead, Write};

use bia_booking::config::AppConfig;
use bia_booking::form_state::{FormState, SubmitPhase};
use bia_booking::forms::NetlifyClient;
use bia_booking::models::oil_types::all_oil_options;
use bia_booking::models::{WorkType, CAR_BRANDS, OTHER_BRAND};
use bia_booking::storage::SupabaseClient;
use bia_booking::submission::{self, SUCCESS_MESSAGE};
use bia_booking::validation::today_iso;

type Input = io::Lines<io::StdinLock<'static>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Запуск формы записи на ТО (B.I.A. Oil)...");

    let config = AppConfig::from_env()?;
    let store = SupabaseClient::new(&config.supabase_url, &config.supabase_anon_key);
    let netlify = config.site_url.as_deref().map(NetlifyClient::new);
    if netlify.is_none() {
        log::info!("SITE_URL не задан, дублирование в Netlify Forms отключено");
    }
    log::info!("✅ Клиенты инициализированы");

    println!("B.I.A. Oil — запись на техническое обслуживание\n");

    let mut lines = io::stdin().lock().lines();
    let mut state = FormState::new();
    let today = today_iso();

    fill_form(&mut state, &mut lines, &today)?;

    println!("\nОтправка...");
    submission::handle_submit(&mut state, &store, netlify.as_ref()).await;

    match &state.phase {
        SubmitPhase::Success => {
            println!("\n✅ Успешно! Ваша запись принята");
            println!("{}", SUCCESS_MESSAGE);
            submission::complete_success(&mut state).await;
        }
        SubmitPhase::Error(message) => {
            // данные формы сохранены, можно исправить и отправить снова
            println!("\n❌ {}", message);
        }
        other => log::warn!("Неожиданная фаза после отправки: {:?}", other),
    }

    Ok(())
}

/// Пошаговый опрос полей. Поля с живой валидацией перечитываются,
/// пока значение не станет корректным.
fn fill_form(state: &mut FormState, lines: &mut Input, today: &str) -> io::Result<()> {
    loop {
        let name = prompt(lines, "Имя")?;
        if !name.is_empty() {
            state.form.name = name;
            break;
        }
    }

    loop {
        let phone = prompt(lines, "Телефон (+7 (999) 999-99-99)")?;
        state.set_phone(&phone);
        match &state.errors.phone {
            None => break,
            Some(message) => println!("  ⚠ {}", message),
        }
    }

    println!("Марка автомобиля:");
    for (i, brand) in CAR_BRANDS.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, brand);
    }
    println!("   0. Другое");
    loop {
        let choice = prompt(lines, "Номер марки")?;
        match choice.parse::<usize>() {
            Ok(0) => {
                state.form.car_brand = OTHER_BRAND.to_string();
                loop {
                    let custom = prompt(lines, "Введите марку автомобиля")?;
                    if !custom.is_empty() {
                        state.form.custom_brand = custom;
                        break;
                    }
                }
                break;
            }
            Ok(n) if (1..=CAR_BRANDS.len()).contains(&n) => {
                state.form.car_brand = CAR_BRANDS[n - 1].to_string();
                break;
            }
            _ => println!("  ⚠ Выберите номер из списка"),
        }
    }

    loop {
        let number = prompt(lines, "Номер автомобиля (латинские буквы и цифры)")?;
        state.set_car_number(&number);
        println!("  → {}", state.form.car_number);
        match &state.errors.car_number {
            None => break,
            Some(message) => println!("  ⚠ {}", message),
        }
    }

    loop {
        let mileage = prompt(lines, "Пробег (км)")?;
        state.set_mileage(&mileage);
        match &state.errors.mileage {
            None => break,
            Some(message) => println!("  ⚠ {}", message),
        }
    }

    println!("Масла в наличии:");
    for option in all_oil_options() {
        println!("  - {}", option);
    }
    state.form.oil_type = prompt(lines, "Тип масла (Enter — пропустить)")?;
    state.form.oil_change_interval =
        prompt(lines, "Интервал замены масла, км (Enter — пропустить)")?;
    state.form.next_service_date =
        prompt(lines, "Дата следующего ТО, ГГГГ-ММ-ДД (Enter — пропустить)")?;

    loop {
        let date = prompt(lines, "Желаемая дата ТО (ГГГГ-ММ-ДД)")?;
        state.set_service_date(&date, today);
        match &state.errors.date {
            None => break,
            Some(message) => println!("  ⚠ {}", message),
        }
    }

    println!("Виды работ:");
    for (i, work) in WorkType::all().iter().enumerate() {
        println!("  {}. {}", i + 1, work.label());
    }
    let picked = prompt(lines, "Номера через запятую")?;
    for part in picked.split(',') {
        if let Ok(n) = part.trim().parse::<usize>() {
            if (1..=3).contains(&n) {
                state.form.toggle_work_type(WorkType::all()[n - 1]);
            }
        }
    }

    state.form.additional_work = prompt(lines, "Дополнительные работы (Enter — пропустить)")?;
    Ok(())
}

fn prompt(lines: &mut Input, label: &str) -> io::Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(line?.trim().to_string()),
        None => Ok(String::new()),
    }
}
