/// Reusable UI components

use yew::prelude::*;

use crate::site_data::SiteStyle;

#[derive(Properties, PartialEq)]
pub struct StylePickerProps {
    pub selected: SiteStyle,
    pub onchange: Callback<SiteStyle>,
    #[prop_or(false)]
    pub disabled: bool,
}

/// Radio group choosing where the banner is placed
#[function_component(StylePicker)]
pub fn style_picker(props: &StylePickerProps) -> Html {
    html! {
        <fieldset class="style-picker" disabled={props.disabled}>
            <legend>{"Banner style"}</legend>
            {for SiteStyle::ALL.iter().map(|style| {
                let style = *style;
                let onchange = props.onchange.reform(move |_: Event| style);
                html! {
                    <label class="style-option">
                        <input
                            type="radio"
                            name="tc-style"
                            value={style.class_name()}
                            checked={props.selected == style}
                            onchange={onchange}
                        />
                        {style.label()}
                    </label>
                }
            })}
        </fieldset>
    }
}

#[derive(Properties, PartialEq)]
pub struct SpinnerProps {
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(Spinner)]
pub fn spinner(props: &SpinnerProps) -> Html {
    html! {
        <div class="loading-container">
            <div class="loading-spinner"></div>
            if let Some(msg) = &props.message {
                <p class="loading-message">{msg}</p>
            }
        </div>
    }
}
