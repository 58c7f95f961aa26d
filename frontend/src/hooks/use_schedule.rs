use shared::{group_vacation_periods, Employee, MonthGrid, ScheduleEntry};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::supabase::SupabaseClient;

/// View state of the per-person lookup: resolve the employee by CPF,
/// fetch the month window of entries, derive vacation periods.
#[derive(Clone, PartialEq)]
pub struct ScheduleState {
    pub employee: Option<Employee>,
    /// False both before a search resolves and when the CPF matched
    /// nobody; not-found is a normal state, not an error.
    pub found: bool,
    pub entries: Vec<ScheduleEntry>,
    /// Pre-formatted "dd/mm/yyyy – dd/mm/yyyy" ranges.
    pub vacation_periods: Vec<String>,
    /// The employee details card auto-opens on a successful resolve.
    pub details_open: bool,
}

pub struct UseScheduleResult {
    pub state: ScheduleState,
    pub toggle_details: Callback<()>,
}

#[hook]
pub fn use_schedule(client: &SupabaseClient, cpf: &str, grid: &MonthGrid) -> UseScheduleResult {
    let employee = use_state(|| Option::<Employee>::None);
    let found = use_state(|| false);
    let entries = use_state(Vec::<ScheduleEntry>::new);
    let vacation_periods = use_state(Vec::<String>::new);
    let details_open = use_state(|| false);
    // Monotonic tag per fetch; a response carrying a stale tag is dropped
    // so a slow earlier request cannot overwrite a newer one.
    let request_seq = use_mut_ref(|| 0u64);

    {
        let client = client.clone();
        let employee = employee.clone();
        let found = found.clone();
        let entries = entries.clone();
        let vacation_periods = vacation_periods.clone();
        let details_open = details_open.clone();
        let request_seq = request_seq.clone();
        let window = grid.query_window();

        use_effect_with((cpf.to_string(), grid.first), move |(cpf, _)| {
            let cpf = cpf.clone();
            let my_seq = {
                let mut seq = request_seq.borrow_mut();
                *seq += 1;
                *seq
            };

            spawn_local(async move {
                match client.employee_by_cpf(&cpf).await {
                    Ok(Some(person)) => {
                        let (from, to) = window;
                        let fetched = match client
                            .schedules_for_employee(&person.id, from, to)
                            .await
                        {
                            Ok(rows) => rows,
                            Err(e) => {
                                Logger::error_with_component(
                                    "use_schedule",
                                    &format!("schedule fetch failed: {}", e),
                                );
                                Vec::new()
                            }
                        };
                        if *request_seq.borrow() != my_seq {
                            return;
                        }
                        let periods: Vec<String> = group_vacation_periods(&fetched)
                            .iter()
                            .map(ToString::to_string)
                            .collect();
                        Logger::debug_with_component(
                            "use_schedule",
                            &format!("{} entries for {}", fetched.len(), person.name),
                        );
                        employee.set(Some(person));
                        found.set(true);
                        details_open.set(true);
                        vacation_periods.set(periods);
                        entries.set(fetched);
                    }
                    Ok(None) => {
                        if *request_seq.borrow() != my_seq {
                            return;
                        }
                        Logger::info_with_component("use_schedule", "employee not found");
                        employee.set(None);
                        found.set(false);
                        entries.set(Vec::new());
                        vacation_periods.set(Vec::new());
                    }
                    Err(e) => {
                        if *request_seq.borrow() != my_seq {
                            return;
                        }
                        Logger::error_with_component(
                            "use_schedule",
                            &format!("employee lookup failed: {}", e),
                        );
                        employee.set(None);
                        found.set(false);
                        entries.set(Vec::new());
                        vacation_periods.set(Vec::new());
                    }
                }
            });

            || ()
        });
    }

    let toggle_details = use_callback(details_open.clone(), |_: (), details_open| {
        details_open.set(!**details_open);
    });

    let state = ScheduleState {
        employee: (*employee).clone(),
        found: *found,
        entries: (*entries).clone(),
        vacation_periods: (*vacation_periods).clone(),
        details_open: *details_open,
    };

    UseScheduleResult {
        state,
        toggle_details,
    }
}
