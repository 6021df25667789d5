pub mod booking;
pub mod oil_types;

pub use booking::{BookingForm, BookingRecord, WorkType, CAR_BRANDS, OTHER_BRAND};
pub use oil_types::{OilBrand, OIL_BRANDS};
