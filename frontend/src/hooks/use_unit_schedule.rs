use shared::{Employee, MonthGrid, ScheduleEntry, Unit};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::supabase::SupabaseClient;

/// View state of the unit lookup: resolve the unit by code, fetch its
/// members (name-sorted) and their entries for the month window.
#[derive(Clone, PartialEq)]
pub struct UnitScheduleState {
    pub unit: Option<Unit>,
    pub found: bool,
    pub members: Vec<Employee>,
    pub entries: Vec<ScheduleEntry>,
}

pub struct UseUnitScheduleResult {
    pub state: UnitScheduleState,
}

#[hook]
pub fn use_unit_schedule(
    client: &SupabaseClient,
    code: &str,
    grid: &MonthGrid,
) -> UseUnitScheduleResult {
    let unit = use_state(|| Option::<Unit>::None);
    let found = use_state(|| false);
    let members = use_state(Vec::<Employee>::new);
    let entries = use_state(Vec::<ScheduleEntry>::new);
    // Same stale-response guard as the per-person lookup.
    let request_seq = use_mut_ref(|| 0u64);

    {
        let client = client.clone();
        let unit = unit.clone();
        let found = found.clone();
        let members = members.clone();
        let entries = entries.clone();
        let request_seq = request_seq.clone();
        let window = grid.query_window();

        use_effect_with((code.to_string(), grid.first), move |(code, _)| {
            let code = code.clone();
            let my_seq = {
                let mut seq = request_seq.borrow_mut();
                *seq += 1;
                *seq
            };

            spawn_local(async move {
                let resolved = match client.unit_by_code(&code).await {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        Logger::error_with_component(
                            "use_unit_schedule",
                            &format!("unit lookup failed: {}", e),
                        );
                        None
                    }
                };

                let Some(resolved_unit) = resolved else {
                    if *request_seq.borrow() != my_seq {
                        return;
                    }
                    Logger::info_with_component("use_unit_schedule", "unit not found");
                    unit.set(None);
                    found.set(false);
                    members.set(Vec::new());
                    entries.set(Vec::new());
                    return;
                };

                let mut assigned = match client.unit_members(&resolved_unit.id).await {
                    Ok(rows) => rows,
                    Err(e) => {
                        Logger::error_with_component(
                            "use_unit_schedule",
                            &format!("member fetch failed: {}", e),
                        );
                        Vec::new()
                    }
                };
                // Case-folded name order stands in for a locale collation.
                assigned.sort_by(|a, b| {
                    a.name
                        .to_lowercase()
                        .cmp(&b.name.to_lowercase())
                        .then_with(|| a.name.cmp(&b.name))
                });

                let ids: Vec<String> = assigned.iter().map(|m| m.id.clone()).collect();
                let (from, to) = window;
                let fetched = match client.schedules_for_employees(&ids, from, to).await {
                    Ok(rows) => rows,
                    Err(e) => {
                        Logger::error_with_component(
                            "use_unit_schedule",
                            &format!("schedule fetch failed: {}", e),
                        );
                        Vec::new()
                    }
                };

                if *request_seq.borrow() != my_seq {
                    return;
                }
                Logger::debug_with_component(
                    "use_unit_schedule",
                    &format!(
                        "{} members, {} entries for {}",
                        assigned.len(),
                        fetched.len(),
                        resolved_unit.name
                    ),
                );
                unit.set(Some(resolved_unit));
                found.set(true);
                members.set(assigned);
                entries.set(fetched);
            });

            || ()
        });
    }

    UseUnitScheduleResult {
        state: UnitScheduleState {
            unit: (*unit).clone(),
            found: *found,
            members: (*members).clone(),
            entries: (*entries).clone(),
        },
    }
}
