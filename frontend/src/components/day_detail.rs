use chrono::NaiveDate;
use shared::{format_day_br, format_time_of_day, ScheduleEntry, ShiftKind};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DayDetailProps {
    pub day: NaiveDate,
    /// The single entry for this day, if any.
    pub entry: Option<ScheduleEntry>,
    pub on_close: Callback<()>,
}

/// Modal detail view for a selected calendar day: date, optional unit
/// override, schedule type, optional reason, and (WORK only) the four
/// time fields.
#[function_component(DayDetail)]
pub fn day_detail(props: &DayDetailProps) -> Html {
    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let entry = props.entry.as_ref();

    html! {
        <div class="day-modal-backdrop" onclick={on_backdrop_click}>
            <div class="day-modal" onclick={on_modal_click}>
                <h1 class="day-modal-date">{format_day_br(props.day)}</h1>

                {if let Some(unit) = entry.and_then(|e| e.unit.as_ref()) {
                    html! { <p class="day-modal-unit">{format!("- {} -", unit.name)}</p> }
                } else {
                    html! {}
                }}

                <p class="day-modal-kind">
                    {match entry {
                        Some(e) => e.kind.tag(),
                        None => "Sem escala registrada.",
                    }}
                </p>

                {if let Some(reason) = entry.and_then(|e| e.reason.as_deref()) {
                    html! { <p class="day-modal-reason">{format!("Observação: {}", reason)}</p> }
                } else {
                    html! {}
                }}

                {if let Some(work) = entry.filter(|e| e.kind == ShiftKind::Work) {
                    html! {
                        <>
                            <div class="day-modal-times">
                                <span>{format!("Entrada: {}", format_time_of_day(work.start.as_deref()))}</span>
                                <span>{format!("Saída: {}", format_time_of_day(work.end.as_deref()))}</span>
                            </div>
                            <div class="day-modal-times">
                                <span>{format!("Almoço: {}", format_time_of_day(work.lunch_start.as_deref()))}</span>
                                <span>{format!("Saída: {}", format_time_of_day(work.lunch_end.as_deref()))}</span>
                            </div>
                        </>
                    }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}
