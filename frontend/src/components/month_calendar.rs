use chrono::{Datelike, NaiveDate};
use shared::{day_style, entry_for};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::day_detail::DayDetail;
use crate::components::legend::Legend;
use crate::components::vacation_panel::VacationPanel;
use crate::hooks::use_month::use_month;
use crate::hooks::use_schedule::use_schedule;
use crate::services::date_utils::{month_title, WEEKDAYS_SHORT};
use crate::services::supabase::SupabaseClient;

#[derive(Properties, PartialEq)]
pub struct MonthCalendarProps {
    pub client: SupabaseClient,
    /// Raw search input classified as a person identifier.
    pub cpf: String,
    /// Visual flag from the search box; not-found text only shows while
    /// a search is active.
    pub searching: bool,
}

/// Per-person month view: employee card with vacation periods, navigable
/// month grid colored by schedule type, legend, and a day-detail modal.
#[function_component(MonthCalendar)]
pub fn month_calendar(props: &MonthCalendarProps) -> Html {
    let month = use_month();
    let schedule = use_schedule(&props.client, &props.cpf, &month.state.grid);
    let selected_day = use_state(|| Option::<NaiveDate>::None);

    if !schedule.state.found {
        return if props.searching {
            html! { <p class="not-found">{"Funcionário não encontrado."}</p> }
        } else {
            html! {}
        };
    }
    let Some(employee) = schedule.state.employee.clone() else {
        return html! {};
    };

    let close_detail = {
        let selected_day = selected_day.clone();
        Callback::from(move |_: ()| selected_day.set(None))
    };

    let grid = &month.state.grid;
    let mut cells: Vec<Html> = Vec::new();
    for i in 0..grid.leading_blanks {
        cells.push(html! {
            <div key={format!("blank-{}", i)} class="calendar-day empty"></div>
        });
    }
    for day in &grid.days {
        let entry = entry_for(&schedule.state.entries, &employee.id, *day);
        let style = day_style(entry.map(|e| e.kind));
        let onclick = {
            let selected_day = selected_day.clone();
            let day = *day;
            Callback::from(move |_: MouseEvent| selected_day.set(Some(day)))
        };
        cells.push(html! {
            <button
                key={day.to_string()}
                class={classes!("calendar-day", style.css_class)}
                {onclick}
            >
                <div class="day-number">{day.day()}</div>
                <div class="day-kind">{style.short_label}</div>
            </button>
        });
    }

    html! {
        <div class="calendar-view">
            <VacationPanel
                name={employee.name.clone()}
                periods={schedule.state.vacation_periods.clone()}
                open={schedule.state.details_open}
                on_toggle={schedule.toggle_details.clone()}
            />

            <div class="calendar-header">
                <button class="calendar-nav-btn" onclick={month.actions.prev_month.clone()}>{"‹"}</button>
                <h2 class="calendar-title">{month_title(month.state.reference)}</h2>
                <button class="calendar-nav-btn" onclick={month.actions.next_month.clone()}>{"›"}</button>
            </div>

            <div class="calendar-weekdays">
                {for WEEKDAYS_SHORT.iter().map(|wd| {
                    let weekend = *wd == "DOM" || *wd == "SAB";
                    html! {
                        <div class={classes!("weekday", weekend.then_some("weekend"))}>
                            {*wd}
                        </div>
                    }
                })}
            </div>

            <div class="calendar-grid">
                {for cells}
            </div>

            <Legend />

            {if let Some(day) = *selected_day {
                let entry = entry_for(&schedule.state.entries, &employee.id, day).cloned();
                html! { <DayDetail day={day} entry={entry} on_close={close_detail} /> }
            } else {
                html! {}
            }}
        </div>
    }
}
