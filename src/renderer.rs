/// DOM banner for the page agent

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

use crate::config::DEFAULT_MESSAGE;
use crate::protocol::Renderer;
use crate::site_data::SiteOptions;

const BANNER_ID: &str = "tc-warning-header";
const ICON_ID: &str = "tc-warning-header-icon";

/// Renders the warning banner into the page body.
///
/// The banner element, its message heading and the dismiss listener are
/// owned here and dropped on `hide`.
pub struct DomRenderer {
    document: Document,
    banner: Option<Element>,
    heading: Option<Element>,
    on_dismiss: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl DomRenderer {
    pub fn new() -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        Ok(DomRenderer {
            document,
            banner: None,
            heading: None,
            on_dismiss: None,
        })
    }

    fn build(&mut self, options: &SiteOptions) -> Result<(), JsValue> {
        let banner = self.document.create_element("div")?;
        banner.set_id(BANNER_ID);
        banner.set_class_name(options.style.class_name());

        let icon = self.document.create_element("div")?;
        icon.set_id(ICON_ID);
        icon.set_text_content(Some("\u{2715}"));

        let heading = self.document.create_element("h1")?;
        heading.set_text_content(Some(message_text(&options.message)));

        banner.append_child(&icon)?;
        banner.append_child(&heading)?;

        // Dismissing only removes this banner; the stored preference is untouched.
        // The page agent notices through `is_showing`.
        let dismissed = banner.clone();
        let on_dismiss = Closure::wrap(Box::new(move |_: MouseEvent| {
            dismissed.remove();
        }) as Box<dyn FnMut(MouseEvent)>);
        icon.add_event_listener_with_callback("click", on_dismiss.as_ref().unchecked_ref())?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        body.append_child(&banner)?;

        self.banner = Some(banner);
        self.heading = Some(heading);
        self.on_dismiss = Some(on_dismiss);
        Ok(())
    }
}

impl Renderer for DomRenderer {
    fn show(&mut self, options: &SiteOptions) {
        self.hide();
        if let Err(e) = self.build(options) {
            log::error!("Failed to insert warning: {:?}", e);
        }
    }

    fn hide(&mut self) {
        if let Some(banner) = self.banner.take() {
            banner.remove();
        }
        self.heading = None;
        self.on_dismiss = None;
    }

    fn set_message(&mut self, text: &str) {
        if let Some(heading) = &self.heading {
            heading.set_text_content(Some(message_text(text)));
        }
    }

    fn is_showing(&self) -> bool {
        self.banner.as_ref().is_some_and(|banner| banner.is_connected())
    }
}

fn message_text(message: &str) -> &str {
    if message.trim().is_empty() {
        DEFAULT_MESSAGE
    } else {
        message
    }
}
