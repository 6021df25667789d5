//! Запись на техническое обслуживание B.I.A. Oil: валидация полей формы
//! и отправка записи в car_services с резервным REST-путём и дублированием
//! в Netlify Forms.

pub mod config;
pub mod form_state;
pub mod forms;
pub mod models;
pub mod storage;
pub mod submission;
pub mod validation;
