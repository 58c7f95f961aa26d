use shared::{day_style, ShiftKind};
use yew::prelude::*;

/// Fixed color legend: the grid's colors with one/two-letter swatches,
/// plus the no-entry swatch alongside the defined types.
#[function_component(Legend)]
pub fn legend() -> Html {
    html! {
        <div class="legend">
            <h2 class="legend-title">{"LEGENDA"}</h2>
            <div class="legend-items">
                {for ShiftKind::ALL.iter().map(|kind| {
                    let style = day_style(Some(*kind));
                    html! {
                        <div class="legend-item">
                            <span class={classes!("legend-swatch", style.css_class)}>
                                {kind.legend_swatch()}
                            </span>
                            <span class="legend-label">{kind.label()}</span>
                        </div>
                    }
                })}
                {{
                    let style = day_style(None);
                    html! {
                        <div class="legend-item">
                            <span class={classes!("legend-swatch", style.css_class)}>
                                {style.short_label}
                            </span>
                            <span class="legend-label">{"Sem Escala"}</span>
                        </div>
                    }
                }}
            </div>
        </div>
    }
}
