use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VacationPanelProps {
    pub name: String,
    /// Formatted "dd/mm/yyyy – dd/mm/yyyy" ranges, chronological.
    pub periods: Vec<String>,
    pub open: bool,
    pub on_toggle: Callback<()>,
}

/// Collapsible employee card: name plus the scheduled vacation periods.
/// Auto-opened by the lookup when a search resolves.
#[function_component(VacationPanel)]
pub fn vacation_panel(props: &VacationPanelProps) -> Html {
    let on_toggle_click = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };

    html! {
        <div class="employee-card">
            <button class="employee-card-header" onclick={on_toggle_click}>
                <span class="employee-name">{&props.name}</span>
                <span class="employee-card-chevron">
                    {if props.open { "▲" } else { "▼" }}
                </span>
            </button>
            {if props.open {
                html! {
                    <div class="employee-card-body">
                        {if props.periods.is_empty() {
                            html! { <span>{"Sem férias programadas."}</span> }
                        } else {
                            html! {
                                <div>
                                    <strong>{"Período de férias:"}</strong>
                                    <ul class="vacation-list">
                                        {for props.periods.iter().map(|p| html! {
                                            <li>{p}</li>
                                        })}
                                    </ul>
                                </div>
                            }
                        }}
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
