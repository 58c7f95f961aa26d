use shared::SearchQuery;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    /// Fired when the field loses focus, with the classified query.
    pub on_classify: Callback<SearchQuery>,
    /// Fired on every keystroke: true while the field is non-empty.
    pub on_typing: Callback<bool>,
}

/// Single free-text search box. Classification (person CPF vs unit code)
/// happens only on blur; typing just drives the "searching" visual flag.
#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let value = use_state(String::new);

    let oninput = {
        let value = value.clone();
        let on_typing = props.on_typing.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            on_typing.emit(!raw.trim().is_empty());
            value.set(raw);
        })
    };

    let onblur = {
        let value = value.clone();
        let on_classify = props.on_classify.clone();
        Callback::from(move |_: FocusEvent| {
            on_classify.emit(SearchQuery::classify(&value));
        })
    };

    html! {
        <input
            type="text"
            class="search-input"
            placeholder="Buscar por CPF ou unidade"
            value={(*value).clone()}
            {oninput}
            {onblur}
        />
    }
}
