/// Screens and small pieces of the blurb browser

use patternfly_yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <div class="home-page">
            <h2>{"Welcome to the Blurbinator!"}</h2>
            <p>{"Select a blurb set to get started."}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub message: AttrValue,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    html! {
        <div class="toast">
            <Alert r#type={AlertType::Success} title={props.message.to_string()} inline={true}>
            </Alert>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CategoryPageProps {
    pub category: AttrValue,
    pub titles: Vec<String>,
    pub search: AttrValue,
    pub on_search: Callback<String>,
    pub on_select: Callback<String>,
    pub on_back: Callback<()>,
}

#[function_component(CategoryPage)]
pub fn category_page(props: &CategoryPageProps) -> Html {
    let on_search_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_search.emit(input.value());
            }
        })
    };

    html! {
        <div class="blurb-section">
            <h2>{format!("Blurbs - {}", props.category)}</h2>

            <input
                type="text"
                placeholder="Search blurbs..."
                value={props.search.clone()}
                oninput={on_search_input}
                class="search-box"
            />

            if props.titles.is_empty() {
                <p class="empty-state">{"No blurbs match your search."}</p>
            } else {
                {for props.titles.iter().map(|title| {
                    let on_select = props.on_select.clone();
                    let title_clone = title.clone();
                    html! {
                        <div key={title.clone()} class="blurb-item">
                            <Button
                                onclick={Callback::from(move |_: MouseEvent| on_select.emit(title_clone.clone()))}
                                variant={ButtonVariant::Secondary}
                                block={true}
                            >
                                {title}
                            </Button>
                        </div>
                    }
                })}
            }

            <Button onclick={props.on_back.reform(|_: MouseEvent| ())} variant={ButtonVariant::Secondary}>
                {"Back to File"}
            </Button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct BlurbPageProps {
    pub title: AttrValue,
    pub text: AttrValue,
    pub languages: Vec<String>,
    pub language: AttrValue,
    pub dark_mode: bool,
    pub on_language: Callback<String>,
    pub on_copy: Callback<()>,
    pub on_back: Callback<()>,
    pub on_home: Callback<()>,
}

#[function_component(BlurbPage)]
pub fn blurb_page(props: &BlurbPageProps) -> Html {
    let on_language_change = {
        let on_language = props.on_language.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                on_language.emit(select.value());
            }
        })
    };

    let text_class = if props.dark_mode {
        "blurb-text blurb-text-dark"
    } else {
        "blurb-text"
    };

    html! {
        <div class="blurb-display">
            <h2>{props.title.to_string()}</h2>
            <textarea class={text_class} value={props.text.clone()} readonly={true} />

            <div class="blurb-actions">
                <select onchange={on_language_change}>
                    {for props.languages.iter().map(|lang| html! {
                        <option
                            key={lang.clone()}
                            value={lang.clone()}
                            selected={*lang == *props.language}
                        >
                            {lang}
                        </option>
                    })}
                </select>
                <Button onclick={props.on_copy.reform(|_: MouseEvent| ())}>
                    {"Copy"}
                </Button>
            </div>

            <div class="blurb-actions">
                <Button onclick={props.on_back.reform(|_: MouseEvent| ())} variant={ButtonVariant::Secondary}>
                    {"Back to Categories"}
                </Button>
                <Button onclick={props.on_home.reform(|_: MouseEvent| ())} variant={ButtonVariant::Secondary}>
                    {"Return Home"}
                </Button>
            </div>
        </div>
    }
}
