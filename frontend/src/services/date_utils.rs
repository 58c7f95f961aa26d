use chrono::{Datelike, NaiveDate};

/// Sunday-first weekday abbreviations, pt-BR.
pub const WEEKDAYS_SHORT: [&str; 7] = ["DOM", "SEG", "TER", "QUA", "QUI", "SEX", "SAB"];

/// Today's date from the browser clock.
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Uppercase pt-BR month name.
pub fn month_name_pt(month: u32) -> &'static str {
    match month {
        1 => "JANEIRO",
        2 => "FEVEREIRO",
        3 => "MARÇO",
        4 => "ABRIL",
        5 => "MAIO",
        6 => "JUNHO",
        7 => "JULHO",
        8 => "AGOSTO",
        9 => "SETEMBRO",
        10 => "OUTUBRO",
        11 => "NOVEMBRO",
        _ => "DEZEMBRO",
    }
}

/// Navigation header title, e.g. "AGOSTO 2026".
pub fn month_title(date: NaiveDate) -> String {
    format!("{} {}", month_name_pt(date.month()), date.year())
}

/// Column header abbreviation for a given day.
pub fn weekday_short(date: NaiveDate) -> &'static str {
    WEEKDAYS_SHORT[date.weekday().num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_title_is_uppercase_pt() {
        assert_eq!(month_title(date(2026, 8, 30)), "AGOSTO 2026");
        assert_eq!(month_title(date(2025, 3, 1)), "MARÇO 2025");
    }

    #[test]
    fn weekday_abbreviations_follow_sunday_first_grid() {
        // 2025-06-01 is a Sunday.
        assert_eq!(weekday_short(date(2025, 6, 1)), "DOM");
        assert_eq!(weekday_short(date(2025, 6, 2)), "SEG");
        assert_eq!(weekday_short(date(2025, 6, 7)), "SAB");
    }
}
