pub mod day_detail;
pub mod legend;
pub mod month_calendar;
pub mod reset_password;
pub mod search_bar;
pub mod unit_schedule;
pub mod vacation_panel;
