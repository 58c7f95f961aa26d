use shared::SearchQuery;
use yew::prelude::*;

use crate::components::month_calendar::MonthCalendar;
use crate::components::reset_password::ResetPassword;
use crate::components::search_bar::SearchBar;
use crate::components::unit_schedule::UnitSchedule;
use crate::services::supabase::SupabaseClient;

/// A recovery link either lands on the dedicated path or carries the
/// recovery fragment appended by the identity service.
fn is_recovery_url(pathname: &str, hash: &str) -> bool {
    pathname.trim_end_matches('/').ends_with("reset-senha")
        || (hash.contains("access_token") && hash.contains("type=recovery"))
}

/// Application shell: the password-reset page when the URL is a recovery
/// link, otherwise the search page routing to the per-person calendar or
/// the unit matrix.
#[function_component(App)]
pub fn app() -> Html {
    let client = use_memo((), |_| SupabaseClient::new());
    let search = use_state(|| SearchQuery::Idle);
    let searching = use_state(|| false);

    let recovery = web_sys::window()
        .map(|w| {
            let location = w.location();
            let pathname = location.pathname().unwrap_or_default();
            let hash = location.hash().unwrap_or_default();
            is_recovery_url(&pathname, &hash)
        })
        .unwrap_or(false);

    if recovery {
        return html! { <ResetPassword client={(*client).clone()} /> };
    }

    let on_classify = {
        let search = search.clone();
        Callback::from(move |query: SearchQuery| search.set(query))
    };

    let on_typing = {
        let searching = searching.clone();
        Callback::from(move |active: bool| searching.set(active))
    };

    html! {
        <div class="app-shell">
            <h1 class="app-title">{"Escala Mensal"}</h1>
            <SearchBar {on_classify} {on_typing} />
            {match (*search).clone() {
                SearchQuery::Idle => html! {
                    <p class="search-prompt">{"Busque por CPF ou código da unidade."}</p>
                },
                SearchQuery::Person(cpf) => html! {
                    <MonthCalendar
                        client={(*client).clone()}
                        cpf={cpf}
                        searching={*searching}
                    />
                },
                SearchQuery::Unit(code) => html! {
                    <UnitSchedule client={(*client).clone()} code={code} />
                },
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::is_recovery_url;

    #[test]
    fn recovery_path_routes_to_reset() {
        assert!(is_recovery_url("/reset-senha", ""));
        assert!(is_recovery_url("/app/reset-senha/", ""));
    }

    #[test]
    fn recovery_fragment_routes_to_reset() {
        assert!(is_recovery_url(
            "/",
            "#access_token=abc&refresh_token=def&type=recovery"
        ));
    }

    #[test]
    fn plain_urls_stay_on_search_page() {
        assert!(!is_recovery_url("/", ""));
        assert!(!is_recovery_url("/", "#access_token=abc"));
    }
}
