use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::supabase::SupabaseClient;

/// Pulls the recovery access token out of a URL fragment or query string
/// (`#access_token=…&refresh_token=…&type=recovery`).
fn recovery_token_from(params: &str) -> Option<String> {
    params
        .trim_start_matches('#')
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "access_token")
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[derive(Properties, PartialEq)]
pub struct ResetPasswordProps {
    pub client: SupabaseClient,
}

/// Password-reset flow, session-token variant: the recovery link carries
/// an access token in the URL fragment; the token is verified against the
/// identity service on load, and the new password is submitted under it.
/// Validation failures never reach the backend; backend rejections are
/// surfaced verbatim.
#[function_component(ResetPassword)]
pub fn reset_password(props: &ResetPasswordProps) -> Html {
    let session_token = use_state(|| Option::<String>::None);
    let verified = use_state(|| false);
    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let message = use_state(|| Option::<String>::None);
    let success = use_state(|| false);
    let submitting = use_state(|| false);

    {
        let client = props.client.clone();
        let session_token = session_token.clone();
        let verified = verified.clone();
        use_effect_with((), move |_| {
            let raw = web_sys::window()
                .map(|w| {
                    let location = w.location();
                    let hash = location.hash().unwrap_or_default();
                    if hash.contains("access_token") {
                        hash
                    } else {
                        location.search().unwrap_or_default()
                    }
                })
                .unwrap_or_default();

            if let Some(token) = recovery_token_from(&raw) {
                session_token.set(Some(token.clone()));
                spawn_local(async move {
                    match client.verify_recovery_token(&token).await {
                        Ok(()) => {
                            Logger::info_with_component(
                                "reset_password",
                                "recovery session established",
                            );
                            verified.set(true);
                        }
                        Err(e) => {
                            Logger::error_with_component(
                                "reset_password",
                                &format!("token verification failed: {}", e),
                            );
                        }
                    }
                });
            }

            || ()
        });
    }

    let on_new_password = {
        let new_password = new_password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_password.set(input.value());
        })
    };

    let on_confirm_password = {
        let confirm_password = confirm_password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            confirm_password.set(input.value());
        })
    };

    let on_submit = {
        let client = props.client.clone();
        let session_token = session_token.clone();
        let verified = verified.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let message = message.clone();
        let success = success.clone();
        let submitting = submitting.clone();

        Callback::from(move |_: MouseEvent| {
            let proposed = (*new_password).clone();
            let confirmed = (*confirm_password).clone();

            if proposed.is_empty() || confirmed.is_empty() {
                message.set(Some("Preencha todos os campos.".to_string()));
                return;
            }
            if proposed != confirmed {
                message.set(Some("As senhas não coincidem.".to_string()));
                return;
            }
            let token = match (*session_token).clone().filter(|_| *verified) {
                Some(token) => token,
                None => {
                    message.set(Some("O token não é válido ou expirou.".to_string()));
                    return;
                }
            };

            submitting.set(true);
            let client = client.clone();
            let new_password = new_password.clone();
            let confirm_password = confirm_password.clone();
            let message = message.clone();
            let success = success.clone();
            let submitting = submitting.clone();
            spawn_local(async move {
                match client.update_password(&token, &proposed).await {
                    Ok(()) => {
                        message.set(Some(
                            "Senha redefinida com sucesso! Agora você pode entrar no app."
                                .to_string(),
                        ));
                        success.set(true);
                        new_password.set(String::new());
                        confirm_password.set(String::new());
                    }
                    Err(e) => {
                        message.set(Some(e));
                    }
                }
                submitting.set(false);
            });
        })
    };

    html! {
        <div class="reset-page">
            <div class="reset-card">
                <h2 class="reset-title">{"Redefinir Senha"}</h2>
                <div class="reset-divider"></div>

                {if let Some(text) = (*message).as_ref() {
                    let class = if *success { "reset-message success" } else { "reset-message error" };
                    html! { <div class={class}>{text}</div> }
                } else {
                    html! {}
                }}

                {if !*success {
                    html! {
                        <>
                            <input
                                type="password"
                                class="reset-input"
                                placeholder="Nova senha"
                                value={(*new_password).clone()}
                                oninput={on_new_password}
                                disabled={*submitting}
                            />
                            <input
                                type="password"
                                class="reset-input"
                                placeholder="Confirmar nova senha"
                                value={(*confirm_password).clone()}
                                oninput={on_confirm_password}
                                disabled={*submitting}
                            />
                            <button
                                class="reset-submit"
                                onclick={on_submit}
                                disabled={*submitting}
                            >
                                {if *submitting { "Redefinindo..." } else { "Redefinir Senha" }}
                            </button>
                        </>
                    }
                } else {
                    html! {}
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::recovery_token_from;

    #[test]
    fn token_parses_from_fragment() {
        let hash = "#access_token=abc123&refresh_token=def&type=recovery";
        assert_eq!(recovery_token_from(hash), Some("abc123".to_string()));
    }

    #[test]
    fn token_parses_from_query_string() {
        let query = "?type=recovery&access_token=tok";
        assert_eq!(recovery_token_from(query), Some("tok".to_string()));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        assert_eq!(recovery_token_from("#refresh_token=def"), None);
        assert_eq!(recovery_token_from("#access_token="), None);
        assert_eq!(recovery_token_from(""), None);
    }
}
