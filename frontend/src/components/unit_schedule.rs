use chrono::{Datelike, NaiveDate};
use shared::{day_style, entry_for, format_time_hm, Employee, ScheduleEntry, ShiftKind};
use yew::prelude::*;

use crate::hooks::use_month::use_month;
use crate::hooks::use_unit_schedule::use_unit_schedule;
use crate::services::date_utils::{month_title, weekday_short};
use crate::services::supabase::SupabaseClient;

#[derive(Properties, PartialEq)]
pub struct UnitScheduleProps {
    pub client: SupabaseClient,
    /// Uppercased unit code from the search box.
    pub code: String,
}

/// Unit view: a person × day matrix for the displayed month, colored by
/// schedule type. WORK cells show the day's time ranges; an entry
/// scheduled at a different unit also names that unit.
#[function_component(UnitSchedule)]
pub fn unit_schedule(props: &UnitScheduleProps) -> Html {
    let month = use_month();
    let lookup = use_unit_schedule(&props.client, &props.code, &month.state.grid);

    if !lookup.state.found {
        return html! { <p class="not-found">{"Unidade não encontrada."}</p> };
    }
    let Some(unit) = lookup.state.unit.clone() else {
        return html! {};
    };

    let grid = &month.state.grid;

    html! {
        <div class="unit-view">
            <div class="calendar-header">
                <button class="calendar-nav-btn" onclick={month.actions.prev_month.clone()}>{"‹"}</button>
                <h2 class="calendar-title">
                    {format!("{} — {}", unit.name, month_title(month.state.reference))}
                </h2>
                <button class="calendar-nav-btn" onclick={month.actions.next_month.clone()}>{"›"}</button>
            </div>

            <div class="unit-table-wrap">
                <table class="unit-table">
                    <thead>
                        <tr>
                            <th class="unit-name-col">{"Funcionário"}</th>
                            {for grid.days.iter().map(|day| html! {
                                <th key={day.to_string()} class="unit-day-col">
                                    {day.day()}
                                    <br />
                                    {weekday_short(*day)}
                                </th>
                            })}
                        </tr>
                    </thead>
                    <tbody>
                        {for lookup.state.members.iter().map(|member| html! {
                            <tr key={member.id.clone()}>
                                <td class="unit-name-col" title={member.name.clone()}>
                                    {&member.name}
                                </td>
                                {for grid.days.iter().map(|day| {
                                    unit_cell(&lookup.state.entries, member, *day, &unit.name)
                                })}
                            </tr>
                        })}
                    </tbody>
                </table>
            </div>
        </div>
    }
}

fn unit_cell(
    entries: &[ScheduleEntry],
    member: &Employee,
    day: NaiveDate,
    viewed_unit: &str,
) -> Html {
    // At most one entry exists per (member, day).
    let entry = entry_for(entries, &member.id, day);
    let style = day_style(entry.map(|e| e.kind));
    let other_unit = entry
        .and_then(|e| e.unit.as_ref())
        .filter(|u| u.name != viewed_unit)
        .map(|u| u.name.clone());

    html! {
        <td key={day.to_string()} class={classes!("unit-cell", style.css_class)}>
            {match entry {
                Some(e) if e.kind == ShiftKind::Work => html! {
                    <div class="unit-cell-times">
                        <span>
                            {format!(
                                "{} - {}",
                                format_time_hm(e.start.as_deref()),
                                format_time_hm(e.end.as_deref())
                            )}
                        </span>
                        <span class="unit-cell-lunch">
                            {format!(
                                "{} - {}",
                                format_time_hm(e.lunch_start.as_deref()),
                                format_time_hm(e.lunch_end.as_deref())
                            )}
                        </span>
                    </div>
                },
                Some(e) => html! { <span class="unit-cell-kind">{e.kind.tag()}</span> },
                None => html! { <span class="unit-cell-kind">{"-"}</span> },
            }}
            {if let Some(name) = other_unit {
                html! { <div class="unit-cell-other">{name}</div> }
            } else {
                html! {}
            }}
        </td>
    }
}
