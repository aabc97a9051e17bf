/// Control surface panel for the extension popup

use yew::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use patternfly_yew::prelude::{Alert, AlertType};
use crate::bridge::{ChromeStorage, ChromeTabs};
use crate::config::ExtensionConfig;
use crate::control::ControlSurface;
use crate::error::StoreError;
use crate::site_data::SiteStyle;
use crate::storage::PreferenceStore;
use crate::ui::components::{Spinner, StylePicker};

type Surface = ControlSurface<ChromeStorage, ChromeTabs>;

#[derive(Clone, PartialEq)]
enum Change {
    Enabled(bool),
    Style(SiteStyle),
    Message(String),
}

/// Alert text for a save attempt. A failure also means the inputs must be
/// rebuilt, since the browser already moved them to the unsaved value.
fn save_failure(result: &Result<(), StoreError>) -> Option<String> {
    let e = result.as_ref().err()?;
    log::error!("Failed to save preference: {}", e);
    Some(format!("Failed to save: {}", e))
}

#[derive(Properties, PartialEq)]
pub struct ControlPanelProps {
    #[prop_or_default]
    pub config: ExtensionConfig,
}

#[function_component(ControlPanel)]
pub fn control_panel(props: &ControlPanelProps) -> Html {
    let surface = use_state(|| None::<Surface>);
    let busy = use_state(|| false);
    let error = use_state(|| None::<String>);
    // Bumped after a failed save so the inputs drop their unsaved DOM state
    let revision = use_state(|| 0u32);

    // Read the active tab and its record on mount
    {
        let surface = surface.clone();
        let error = error.clone();
        let config = props.config.clone();

        use_effect_with((), move |_| {
            spawn_local(async move {
                let store = PreferenceStore::with_key(
                    ChromeStorage::new(config.storage_area),
                    &config.storage_key,
                );
                match ControlSurface::open(store, ChromeTabs).await {
                    Ok(opened) => surface.set(Some(opened)),
                    Err(e) => error.set(Some(format!("Failed to load: {}", e))),
                }
            });
            || ()
        });
    }

    let on_change = {
        let surface = surface.clone();
        let busy = busy.clone();
        let error = error.clone();
        let revision = revision.clone();

        Callback::from(move |change: Change| {
            let Some(mut current) = (*surface).clone() else {
                return;
            };
            let surface = surface.clone();
            let busy = busy.clone();
            let error = error.clone();
            let revision = revision.clone();

            busy.set(true);

            spawn_local(async move {
                let result = match change {
                    Change::Enabled(enabled) => current.set_enabled(enabled).await,
                    Change::Style(style) => current.set_style(style).await,
                    Change::Message(message) => current.set_message(message).await,
                };

                let failure = save_failure(&result);
                if failure.is_some() {
                    revision.set(*revision + 1);
                }
                error.set(failure);

                surface.set(Some(current));
                busy.set(false);
            });
        })
    };

    let enabled = (*surface).as_ref().is_some_and(|s| s.record().enabled);

    let body = match &*surface {
        None if error.is_none() => html! { <Spinner message={"Loading..."} /> },
        None => html! {},
        Some(current) => {
            let disabled = *busy || !current.is_actionable();
            let record = current.record();

            let on_toggle = on_change.reform(|e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Change::Enabled(input.checked())
            });
            let on_message = on_change.reform(|e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Change::Message(input.value())
            });

            html! {
                <div class="panel-body">
                <div key={revision.to_string()} class="flex-column-gap">
                    <p class="domain-name">
                        {current.identity().unwrap_or("This page cannot be marked")}
                    </p>
                    <label class="enable-option">
                        <input
                            id="tc-enable-warning"
                            type="checkbox"
                            checked={record.enabled}
                            disabled={disabled}
                            onchange={on_toggle}
                        />
                        {"Warn me on this domain"}
                    </label>
                    <StylePicker
                        selected={record.options.style}
                        onchange={on_change.reform(Change::Style)}
                        disabled={disabled}
                    />
                    <label class="message-option">
                        {"Message"}
                        <input
                            type="text"
                            value={record.options.message.clone()}
                            disabled={disabled}
                            onchange={on_message}
                        />
                    </label>
                </div>
                </div>
            }
        }
    };

    html! {
        <div class="padding-20">
            <h1 id="header" class={classes!("popup-title", enabled.then_some("warning"))}>
                {"Tread Lightly"}
            </h1>

            if let Some(err) = (*error).clone() {
                <Alert r#type={AlertType::Danger} title={"Error"} inline={true}>
                    {err}
                </Alert>
            }

            {body}
        </div>
    }
}
