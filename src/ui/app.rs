/// The blurb browser shown inside the floating panel

use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::blurb_data::{BlurbSet, Folder};
use crate::clipboard::{after, copy_text, TOAST_DURATION_MS};
use crate::error::NavigationError;
use crate::loader::load_folder;
use crate::navigation::{AppModel, LoadTicket, ViewState};
use crate::preferences::{apply_dark_mode, load_dark_mode, save_dark_mode};
use crate::ui::components::{BlurbPage, CategoryPage, HomePage, Toast};
use crate::ui::sidebar::Sidebar;

pub enum AppAction {
    LoadStarted(LoadTicket),
    LoadFinished(LoadTicket, BlurbSet),
    SelectCategory(String),
    SelectBlurb(String),
    ChangeLanguage(String, String),
    Search(String),
    Back,
    ReturnHome,
}

impl Reducible for AppModel {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: AppAction) -> Rc<Self> {
        let mut model = (*self).clone();

        let result: Result<(), NavigationError> = match action {
            AppAction::LoadStarted(ticket) => {
                model.begin_load(ticket);
                Ok(())
            }
            AppAction::LoadFinished(ticket, blurbs) => {
                if !model.finish_load(ticket, blurbs) {
                    log::debug!("Dropping stale load of {}", ticket.folder.name());
                    return self;
                }
                Ok(())
            }
            AppAction::SelectCategory(name) => model.select_category(&name),
            AppAction::SelectBlurb(title) => model.select_blurb(&title),
            AppAction::ChangeLanguage(title, lang) => model.change_language(&title, &lang),
            AppAction::Search(term) => model.set_search(&term),
            AppAction::Back => {
                model.back();
                Ok(())
            }
            AppAction::ReturnHome => {
                model.return_home();
                Ok(())
            }
        };

        match result {
            Ok(()) => Rc::new(model),
            Err(e) => {
                log::warn!("Ignoring navigation: {}", e);
                self
            }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let model = use_reducer(AppModel::new);
    let dark_mode = use_state(load_dark_mode);
    let show_toast = use_state(|| false);

    // Apply the stored theme on mount
    {
        let dark_mode = *dark_mode;
        use_effect_with((), move |_| {
            if let Err(e) = apply_dark_mode(dark_mode) {
                log::warn!("Could not apply theme: {}", e);
            }
            || ()
        });
    }

    let on_folder = {
        let model = model.clone();
        Callback::from(move |folder: Folder| {
            let ticket = LoadTicket::issue(folder);
            model.dispatch(AppAction::LoadStarted(ticket));

            let model = model.clone();
            spawn_local(async move {
                let blurbs = load_folder(folder).await;
                model.dispatch(AppAction::LoadFinished(ticket, blurbs));
            });
        })
    };

    let on_category = {
        let model = model.clone();
        Callback::from(move |name: String| model.dispatch(AppAction::SelectCategory(name)))
    };

    let on_toggle_dark_mode = {
        let dark_mode = dark_mode.clone();
        Callback::from(move |_: ()| {
            let enabled = !*dark_mode;
            dark_mode.set(enabled);
            if let Err(e) = apply_dark_mode(enabled) {
                log::warn!("Could not apply theme: {}", e);
            }
            if let Err(e) = save_dark_mode(enabled) {
                log::warn!("Could not save dark mode preference: {}", e);
            }
        })
    };

    let on_copy = {
        let show_toast = show_toast.clone();
        let text = model.displayed_text().unwrap_or_default().to_string();
        Callback::from(move |_: ()| {
            let show_toast = show_toast.clone();
            let text = text.clone();
            spawn_local(async move {
                let method = copy_text(&text).await;
                log::debug!("Copied blurb via {:?}", method);
                show_toast.set(true);

                let hide = show_toast.clone();
                if let Err(e) = after(TOAST_DURATION_MS, move || hide.set(false)) {
                    log::warn!("Could not schedule toast dismissal: {}", e);
                    show_toast.set(false);
                }
            });
        })
    };

    let back = {
        let model = model.clone();
        Callback::from(move |_: ()| model.dispatch(AppAction::Back))
    };

    let content = match &model.view {
        ViewState::Home => html! { <HomePage /> },
        ViewState::Category { category } => {
            let on_search = {
                let model = model.clone();
                Callback::from(move |term: String| model.dispatch(AppAction::Search(term)))
            };
            let on_select = {
                let model = model.clone();
                Callback::from(move |title: String| model.dispatch(AppAction::SelectBlurb(title)))
            };
            let titles = model
                .visible_titles()
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>();

            html! {
                <CategoryPage
                    category={category.clone()}
                    titles={titles}
                    search={model.search.clone()}
                    on_search={on_search}
                    on_select={on_select}
                    on_back={back.clone()}
                />
            }
        }
        ViewState::Blurb { title, .. } => {
            let languages = model
                .open_blurb()
                .map(|b| b.languages().map(str::to_string).collect::<Vec<_>>())
                .unwrap_or_default();
            let language = model.current_language(title).unwrap_or_default().to_string();
            let on_language = {
                let model = model.clone();
                let title = title.clone();
                Callback::from(move |lang: String| {
                    model.dispatch(AppAction::ChangeLanguage(title.clone(), lang))
                })
            };
            let on_home = {
                let model = model.clone();
                Callback::from(move |_: ()| model.dispatch(AppAction::ReturnHome))
            };

            html! {
                <BlurbPage
                    title={title.clone()}
                    text={model.displayed_text().unwrap_or_default().to_string()}
                    languages={languages}
                    language={language}
                    dark_mode={*dark_mode}
                    on_language={on_language}
                    on_copy={on_copy}
                    on_back={back.clone()}
                    on_home={on_home}
                />
            }
        }
    };

    html! {
        <div class="App">
            <div class="resizable-container">
                <Sidebar
                    selected_folder={model.selected_folder}
                    categories={model.blurbs.category_names().map(str::to_string).collect::<Vec<_>>()}
                    selected_category={model.view.category().map(str::to_string)}
                    loading={model.is_loading()}
                    dark_mode={*dark_mode}
                    on_folder={on_folder}
                    on_category={on_category}
                    on_toggle_dark_mode={on_toggle_dark_mode}
                />

                <div class="main-content">
                    if *show_toast {
                        <Toast message="Copied!" />
                    }
                    {content}
                </div>
            </div>

            <footer>
                <p class="footer-popup">{"Blurbinator v0.1.0"}</p>
            </footer>
        </div>
    }
}
