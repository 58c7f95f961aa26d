pub mod use_month;
pub mod use_schedule;
pub mod use_unit_schedule;
