use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Employee record (row: `funcionarios`). Fetched by CPF, never mutated
/// by this application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(default)]
    pub cpf: String,
}

/// Work unit (row: `unidades`), looked up by its short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Joined unit name on a schedule row (`unidade:unidades(nome)`). A day's
/// entry may point at a unit other than the employee's home assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRef {
    #[serde(rename = "nome")]
    pub name: String,
}

/// Row of the `funcionarios_unidades` assignment table with the employee
/// joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitAssignment {
    #[serde(rename = "funcionario")]
    pub employee: Employee,
}

/// The fixed schedule-type enumeration, serialized as the backend's
/// uppercase tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftKind {
    #[serde(rename = "TRABALHAR")]
    Work,
    #[serde(rename = "FOLGA")]
    DayOff,
    #[serde(rename = "AFASTADO")]
    Leave,
    #[serde(rename = "FALTA")]
    Absence,
    #[serde(rename = "FÉRIAS")]
    Vacation,
    #[serde(rename = "SERVIÇO EXTERNO")]
    ExternalService,
}

impl ShiftKind {
    pub const ALL: [ShiftKind; 6] = [
        ShiftKind::Work,
        ShiftKind::DayOff,
        ShiftKind::Leave,
        ShiftKind::Absence,
        ShiftKind::Vacation,
        ShiftKind::ExternalService,
    ];

    /// The backend's tag, also what the day-detail view displays.
    pub fn tag(&self) -> &'static str {
        match self {
            ShiftKind::Work => "TRABALHAR",
            ShiftKind::DayOff => "FOLGA",
            ShiftKind::Leave => "AFASTADO",
            ShiftKind::Absence => "FALTA",
            ShiftKind::Vacation => "FÉRIAS",
            ShiftKind::ExternalService => "SERVIÇO EXTERNO",
        }
    }

    /// Human label used by the legend.
    pub fn label(&self) -> &'static str {
        match self {
            ShiftKind::Work => "Trabalhar",
            ShiftKind::DayOff => "Folga",
            ShiftKind::Leave => "Afastado",
            ShiftKind::Absence => "Falta",
            ShiftKind::Vacation => "Férias",
            ShiftKind::ExternalService => "Serviço Externo",
        }
    }

    /// One/two-letter swatch printed inside the legend squares. Narrower
    /// than the grid's cell labels so the swatches stay square.
    pub fn legend_swatch(&self) -> &'static str {
        match self {
            ShiftKind::Work => "T",
            ShiftKind::DayOff => "F",
            ShiftKind::Leave => "A",
            ShiftKind::Absence => "F",
            ShiftKind::Vacation => "FÉ",
            ShiftKind::ExternalService => "S.E",
        }
    }
}

/// Rendering style for a calendar day cell: a CSS class plus the short
/// label printed inside the cell. Total over `Option<ShiftKind>` — the
/// no-entry case gets its own, visually distinct style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStyle {
    pub css_class: &'static str,
    pub short_label: &'static str,
}

pub fn day_style(kind: Option<ShiftKind>) -> DayStyle {
    match kind {
        Some(ShiftKind::Work) => DayStyle { css_class: "day-work", short_label: "T" },
        Some(ShiftKind::DayOff) => DayStyle { css_class: "day-off", short_label: "FOLGA" },
        Some(ShiftKind::Leave) => DayStyle { css_class: "day-leave", short_label: "AFAST." },
        Some(ShiftKind::Absence) => DayStyle { css_class: "day-absence", short_label: "FALTA" },
        Some(ShiftKind::Vacation) => DayStyle { css_class: "day-vacation", short_label: "FÉRIAS" },
        Some(ShiftKind::ExternalService) => DayStyle { css_class: "day-external", short_label: "S/EXT." },
        None => DayStyle { css_class: "day-none", short_label: "S/E" },
    }
}

/// One schedule entry (row: `escalas`). At most one entry exists per
/// (employee, day); lookups assume a single match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(rename = "funcionario_id")]
    pub employee_id: String,
    #[serde(rename = "dia")]
    pub day: NaiveDate,
    #[serde(rename = "tipo")]
    pub kind: ShiftKind,
    /// Time-of-day fields as Postgres `time` strings (`HH:MM:SS`), only
    /// meaningful when `kind` is `Work`.
    #[serde(rename = "inicio", default)]
    pub start: Option<String>,
    #[serde(rename = "fim", default)]
    pub end: Option<String>,
    #[serde(rename = "almoco_inicio", default)]
    pub lunch_start: Option<String>,
    #[serde(rename = "almoco_fim", default)]
    pub lunch_end: Option<String>,
    /// Free-text reason, meaningful for absences and leave.
    #[serde(rename = "motivo", default)]
    pub reason: Option<String>,
    /// Where the day's work happens, when it differs from the home unit.
    #[serde(rename = "unidade", default)]
    pub unit: Option<UnitRef>,
}

/// Finds the entry for one employee on one day. Uniqueness of
/// (employee, day) is a data invariant, so the first match is the match.
pub fn entry_for<'a>(
    entries: &'a [ScheduleEntry],
    employee_id: &str,
    day: NaiveDate,
) -> Option<&'a ScheduleEntry> {
    entries
        .iter()
        .find(|e| e.employee_id == employee_id && e.day == day)
}

/// The displayed month: its boundaries, every day in order, and the
/// number of leading blank cells needed so day 1 lands in the right
/// column of a Sunday-first 7-column grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub days: Vec<NaiveDate>,
    pub leading_blanks: u32,
}

impl MonthGrid {
    /// Builds the grid for the month containing `reference`. Well-defined
    /// for any valid date.
    pub fn containing(reference: NaiveDate) -> MonthGrid {
        let first = reference.with_day(1).unwrap_or(reference);
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .unwrap_or(first);
        let days: Vec<NaiveDate> = first.iter_days().take_while(|d| *d <= last).collect();
        let leading_blanks = first.weekday().num_days_from_sunday();
        MonthGrid {
            first,
            last,
            days,
            leading_blanks,
        }
    }

    /// Server-side fetch range: the displayed month widened by one full
    /// month on each side, so vacation runs touching a month edge still
    /// merge across it.
    pub fn query_window(&self) -> (NaiveDate, NaiveDate) {
        let from = self
            .first
            .checked_sub_months(Months::new(1))
            .unwrap_or(self.first);
        let to = self
            .last
            .checked_add_months(Months::new(1))
            .unwrap_or(self.last);
        (from, to)
    }
}

/// Shifts a date by `delta` whole months, clamping the day-of-month when
/// the target month is shorter.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        date.checked_add_months(Months::new(delta as u32))
    } else {
        date.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// A maximal contiguous run of vacation days for one employee. Derived on
/// every fetch, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacationPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for VacationPeriod {
    // Range form even when start == end ("D – D"); the app's established
    // display for a single-day vacation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}",
            format_day_br(self.start),
            format_day_br(self.end)
        )
    }
}

/// Merges vacation-typed entries into contiguous periods: filter to
/// vacation days, sort ascending, extend the current run while each date
/// is exactly one day after the last, otherwise close the run and start a
/// new one at that date.
pub fn group_vacation_periods(entries: &[ScheduleEntry]) -> Vec<VacationPeriod> {
    let mut days: Vec<NaiveDate> = entries
        .iter()
        .filter(|e| e.kind == ShiftKind::Vacation)
        .map(|e| e.day)
        .collect();
    days.sort();

    let mut periods = Vec::new();
    let mut run: Option<(NaiveDate, NaiveDate)> = None;
    for day in days {
        run = match run {
            Some((start, last)) if Some(day) == last.succ_opt() => Some((start, day)),
            Some((start, last)) => {
                periods.push(VacationPeriod { start, end: last });
                Some((day, day))
            }
            None => Some((day, day)),
        };
    }
    if let Some((start, last)) = run {
        periods.push(VacationPeriod { start, end: last });
    }
    periods
}

/// `dd/mm/yyyy`, the app's display format for single dates.
pub fn format_day_br(day: NaiveDate) -> String {
    day.format("%d/%m/%Y").to_string()
}

/// `HH:MM:SS` → `HHhMM` for the day-detail view; `-` when absent. Each of
/// the four WORK time fields goes through this independently.
pub fn format_time_of_day(time: Option<&str>) -> String {
    match time {
        Some(t) => match (t.get(0..2), t.get(3..5)) {
            (Some(h), Some(m)) => format!("{}h{}", h, m),
            _ => "-".to_string(),
        },
        None => "-".to_string(),
    }
}

/// `HH:MM:SS` → `HH:MM` for the unit matrix cells; `--` when absent.
pub fn format_time_hm(time: Option<&str>) -> String {
    match time {
        Some(t) => t.get(0..5).map(str::to_string).unwrap_or_else(|| "--".to_string()),
        None => "--".to_string(),
    }
}

/// Where a free-text search should be routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Empty input: prompt state, nothing displayed.
    Idle,
    /// An 11-digit national ID (CPF); carries the raw input.
    Person(String),
    /// Anything else is treated as a unit code, uppercased.
    Unit(String),
}

impl SearchQuery {
    /// Classifies raw input: if stripping non-digits leaves exactly 11
    /// digits the original input is a person lookup; any other non-empty
    /// input is a unit code. Validation is advisory only — a malformed
    /// CPF simply becomes a unit lookup that finds nothing.
    pub fn classify(raw: &str) -> SearchQuery {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SearchQuery::Idle;
        }
        let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
        if digits == 11 {
            SearchQuery::Person(trimmed.to_string())
        } else {
            SearchQuery::Unit(trimmed.to_uppercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vacation_entry(day: NaiveDate) -> ScheduleEntry {
        ScheduleEntry {
            employee_id: "emp-1".to_string(),
            day,
            kind: ShiftKind::Vacation,
            start: None,
            end: None,
            lunch_start: None,
            lunch_end: None,
            reason: None,
            unit: None,
        }
    }

    fn work_entry(employee_id: &str, day: NaiveDate) -> ScheduleEntry {
        ScheduleEntry {
            employee_id: employee_id.to_string(),
            day,
            kind: ShiftKind::Work,
            start: Some("09:00:00".to_string()),
            end: Some("18:00:00".to_string()),
            lunch_start: Some("12:00:00".to_string()),
            lunch_end: Some("13:00:00".to_string()),
            reason: None,
            unit: None,
        }
    }

    #[test]
    fn month_grid_covers_every_day_without_gaps() {
        for reference in [
            date(2025, 1, 15),
            date(2025, 2, 28),
            date(2024, 2, 1),
            date(2025, 12, 31),
        ] {
            let grid = MonthGrid::containing(reference);
            assert_eq!(grid.days.first(), Some(&grid.first));
            assert_eq!(grid.days.last(), Some(&grid.last));
            assert_eq!(grid.days.len() as u32, grid.last.day());
            for pair in grid.days.windows(2) {
                assert_eq!(pair[0].succ_opt(), Some(pair[1]));
            }
        }
    }

    #[test]
    fn month_grid_lengths() {
        assert_eq!(MonthGrid::containing(date(2025, 1, 10)).days.len(), 31);
        assert_eq!(MonthGrid::containing(date(2025, 4, 10)).days.len(), 30);
        assert_eq!(MonthGrid::containing(date(2025, 2, 10)).days.len(), 28);
        assert_eq!(MonthGrid::containing(date(2024, 2, 10)).days.len(), 29);
    }

    #[test]
    fn leading_blanks_match_first_weekday() {
        // 2025-06-01 is a Sunday, 2025-05-01 a Thursday, 2025-08-01 a Friday.
        assert_eq!(MonthGrid::containing(date(2025, 6, 15)).leading_blanks, 0);
        assert_eq!(MonthGrid::containing(date(2025, 5, 15)).leading_blanks, 4);
        assert_eq!(MonthGrid::containing(date(2025, 8, 15)).leading_blanks, 5);
        for month in 1..=12 {
            let blanks = MonthGrid::containing(date(2025, month, 1)).leading_blanks;
            assert!(blanks <= 6);
        }
    }

    #[test]
    fn query_window_spans_adjacent_months() {
        let grid = MonthGrid::containing(date(2025, 3, 10));
        let (from, to) = grid.query_window();
        assert_eq!(from, date(2025, 2, 1));
        assert_eq!(to, date(2025, 4, 30));
    }

    #[test]
    fn query_window_clamps_short_neighbours() {
        // Widening Jan 31 forwards lands on Feb 28.
        let grid = MonthGrid::containing(date(2025, 1, 20));
        let (from, to) = grid.query_window();
        assert_eq!(from, date(2024, 12, 1));
        assert_eq!(to, date(2025, 2, 28));
    }

    #[test]
    fn shift_months_navigates_and_clamps() {
        assert_eq!(shift_months(date(2025, 1, 15), 1), date(2025, 2, 15));
        assert_eq!(shift_months(date(2025, 1, 15), -1), date(2024, 12, 15));
        assert_eq!(shift_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(shift_months(date(2025, 3, 31), -1), date(2025, 2, 28));
    }

    #[test]
    fn vacation_grouping_merges_consecutive_runs() {
        let entries: Vec<ScheduleEntry> = [
            date(2025, 1, 1),
            date(2025, 1, 2),
            date(2025, 1, 3),
            date(2025, 1, 10),
            date(2025, 1, 11),
        ]
        .into_iter()
        .map(vacation_entry)
        .collect();

        let formatted: Vec<String> = group_vacation_periods(&entries)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(
            formatted,
            vec![
                "01/01/2025 – 03/01/2025".to_string(),
                "10/01/2025 – 11/01/2025".to_string(),
            ]
        );
    }

    #[test]
    fn vacation_grouping_handles_unsorted_input() {
        let entries: Vec<ScheduleEntry> = [
            date(2025, 1, 11),
            date(2025, 1, 2),
            date(2025, 1, 10),
            date(2025, 1, 1),
            date(2025, 1, 3),
        ]
        .into_iter()
        .map(vacation_entry)
        .collect();

        let periods = group_vacation_periods(&entries);
        assert_eq!(
            periods,
            vec![
                VacationPeriod { start: date(2025, 1, 1), end: date(2025, 1, 3) },
                VacationPeriod { start: date(2025, 1, 10), end: date(2025, 1, 11) },
            ]
        );
    }

    #[test]
    fn vacation_grouping_single_day_keeps_range_form() {
        let entries = vec![vacation_entry(date(2025, 3, 5))];
        let formatted: Vec<String> = group_vacation_periods(&entries)
            .iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(formatted, vec!["05/03/2025 – 05/03/2025".to_string()]);
    }

    #[test]
    fn vacation_grouping_empty_input() {
        assert!(group_vacation_periods(&[]).is_empty());
    }

    #[test]
    fn vacation_grouping_ignores_other_kinds() {
        let entries = vec![
            work_entry("emp-1", date(2025, 1, 6)),
            vacation_entry(date(2025, 1, 7)),
        ];
        let periods = group_vacation_periods(&entries);
        assert_eq!(
            periods,
            vec![VacationPeriod { start: date(2025, 1, 7), end: date(2025, 1, 7) }]
        );
    }

    #[test]
    fn vacation_grouping_spans_month_boundary() {
        let entries: Vec<ScheduleEntry> = [date(2025, 1, 31), date(2025, 2, 1)]
            .into_iter()
            .map(vacation_entry)
            .collect();
        let periods = group_vacation_periods(&entries);
        assert_eq!(
            periods,
            vec![VacationPeriod { start: date(2025, 1, 31), end: date(2025, 2, 1) }]
        );
    }

    #[test]
    fn classify_eleven_digits_is_person() {
        assert_eq!(
            SearchQuery::classify("12345678901"),
            SearchQuery::Person("12345678901".to_string())
        );
        // Punctuation-formatted CPF still classifies as a person lookup
        // and keeps the raw input.
        assert_eq!(
            SearchQuery::classify("123.456.789-01"),
            SearchQuery::Person("123.456.789-01".to_string())
        );
    }

    #[test]
    fn classify_other_input_is_unit() {
        assert_eq!(
            SearchQuery::classify("abc123"),
            SearchQuery::Unit("ABC123".to_string())
        );
        assert_eq!(
            SearchQuery::classify("garagem-sul"),
            SearchQuery::Unit("GARAGEM-SUL".to_string())
        );
    }

    #[test]
    fn classify_empty_is_idle() {
        assert_eq!(SearchQuery::classify(""), SearchQuery::Idle);
        assert_eq!(SearchQuery::classify("   "), SearchQuery::Idle);
    }

    #[test]
    fn entry_lookup_is_by_employee_and_day() {
        let entries = vec![
            work_entry("emp-1", date(2025, 6, 10)),
            work_entry("emp-2", date(2025, 6, 10)),
        ];
        let hit = entry_for(&entries, "emp-1", date(2025, 6, 10));
        assert_eq!(hit.map(|e| e.employee_id.as_str()), Some("emp-1"));
        assert!(entry_for(&entries, "emp-1", date(2025, 6, 11)).is_none());
    }

    #[test]
    fn work_entry_times_format_for_detail_view() {
        let entry = work_entry("emp-1", date(2025, 6, 10));
        assert_eq!(format_time_of_day(entry.start.as_deref()), "09h00");
        assert_eq!(format_time_of_day(entry.end.as_deref()), "18h00");
        assert_eq!(format_time_of_day(entry.lunch_start.as_deref()), "12h00");
        assert_eq!(format_time_of_day(entry.lunch_end.as_deref()), "13h00");
        assert_eq!(format_time_of_day(None), "-");
    }

    #[test]
    fn unit_matrix_time_format() {
        assert_eq!(format_time_hm(Some("07:30:00")), "07:30");
        assert_eq!(format_time_hm(None), "--");
        assert_eq!(format_time_hm(Some("bad")), "--");
    }

    #[test]
    fn day_style_is_total_and_no_entry_is_distinct() {
        let none = day_style(None);
        assert_eq!(none.short_label, "S/E");
        for kind in ShiftKind::ALL {
            assert_ne!(day_style(Some(kind)).css_class, none.css_class);
        }
    }

    #[test]
    fn legend_swatches_are_short_forms() {
        assert_eq!(ShiftKind::Work.legend_swatch(), "T");
        assert_eq!(ShiftKind::DayOff.legend_swatch(), "F");
        assert_eq!(ShiftKind::Leave.legend_swatch(), "A");
        assert_eq!(ShiftKind::Absence.legend_swatch(), "F");
        assert_eq!(ShiftKind::Vacation.legend_swatch(), "FÉ");
        assert_eq!(ShiftKind::ExternalService.legend_swatch(), "S.E");
        for kind in ShiftKind::ALL {
            assert!(kind.legend_swatch().chars().count() <= 3);
        }
    }

    #[test]
    fn schedule_row_deserializes_from_backend_shape() {
        let json = r#"{
            "id": "row-1",
            "funcionario_id": "emp-1",
            "dia": "2025-06-10",
            "tipo": "TRABALHAR",
            "inicio": "09:00:00",
            "fim": "18:00:00",
            "almoco_inicio": "12:00:00",
            "almoco_fim": "13:00:00",
            "motivo": null,
            "unidade": {"nome": "Garagem Sul"}
        }"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, ShiftKind::Work);
        assert_eq!(entry.day, date(2025, 6, 10));
        assert_eq!(entry.unit.as_ref().map(|u| u.name.as_str()), Some("Garagem Sul"));
    }

    #[test]
    fn vacation_tag_deserializes_with_accent() {
        let json = r#"{"funcionario_id": "emp-1", "dia": "2025-01-01", "tipo": "FÉRIAS"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, ShiftKind::Vacation);
    }
}
