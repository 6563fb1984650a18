/// Folder and category picker

use patternfly_yew::prelude::*;
use yew::prelude::*;

use crate::blurb_data::Folder;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub selected_folder: Option<Folder>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
    pub loading: bool,
    pub dark_mode: bool,
    pub on_folder: Callback<Folder>,
    pub on_category: Callback<String>,
    pub on_toggle_dark_mode: Callback<()>,
}

fn variant_for(active: bool) -> ButtonVariant {
    if active {
        ButtonVariant::Primary
    } else {
        ButtonVariant::Secondary
    }
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    html! {
        <div class="sidebar">
            <h2>{"Blurb Files"}</h2>
            {for Folder::ALL.iter().map(|&folder| {
                let on_folder = props.on_folder.clone();
                html! {
                    <Button
                        key={folder.name()}
                        onclick={Callback::from(move |_: MouseEvent| on_folder.emit(folder))}
                        variant={variant_for(props.selected_folder == Some(folder))}
                        block={true}
                    >
                        {folder.label()}
                    </Button>
                }
            })}

            if props.loading {
                <div class="loading-text-center">
                    <Spinner />
                </div>
            } else if !props.categories.is_empty() {
                <h3 class="categories-title">{"Categories"}</h3>
                {for props.categories.iter().map(|category| {
                    let on_category = props.on_category.clone();
                    let name = category.clone();
                    let active = props.selected_category.as_ref() == Some(category);
                    html! {
                        <Button
                            key={category.clone()}
                            onclick={Callback::from(move |_: MouseEvent| on_category.emit(name.clone()))}
                            variant={variant_for(active)}
                            block={true}
                        >
                            {category}
                        </Button>
                    }
                })}
            }

            <div class="dark-mode-toggle">
                <Button
                    onclick={props.on_toggle_dark_mode.reform(|_: MouseEvent| ())}
                    variant={ButtonVariant::Secondary}
                >
                    {if props.dark_mode { "🌞 Light" } else { "🌙 Dark" }}
                </Button>
            </div>
        </div>
    }
}
