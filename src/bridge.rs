/// Chrome extension bindings: storage, tabs and the page agent's message listener

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{ExtensionConfig, StorageArea};
use crate::error::{MessagingError, StoreError};
use crate::page_agent::{PageAgent, load_page_record};
use crate::protocol::{ActiveTab, Command, TabMessenger};
use crate::renderer::DomRenderer;
use crate::storage::{PreferenceStore, StorageBackend};

// Import JS bridge functions
#[wasm_bindgen(module = "/js/extension.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getStorage(area: &str, key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setStorage(area: &str, key: &str, value: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn getActiveTab() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn sendTabMessage(tab_id: i32, message: JsValue) -> Result<JsValue, JsValue>;

    fn onCommand(callback: &js_sys::Function);
}

/// `chrome.storage` backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeStorage {
    area: StorageArea,
}

impl ChromeStorage {
    pub fn new(area: StorageArea) -> Self {
        ChromeStorage { area }
    }
}

#[async_trait(?Send)]
impl StorageBackend for ChromeStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let value_js = getStorage(self.area.as_str(), key)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;

        if value_js.is_null() || value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| StoreError::Unavailable(format!("Failed to parse storage: {:?}", e)))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let value_js = to_js(&value)
            .map_err(|e| StoreError::Unavailable(format!("Failed to serialize storage: {:?}", e)))?;

        setStorage(self.area.as_str(), key, value_js)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;

        Ok(())
    }
}

/// `chrome.tabs` messenger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabMessenger for ChromeTabs {
    async fn active_tab(&self) -> Result<ActiveTab, MessagingError> {
        let tab_js = getActiveTab()
            .await
            .map_err(|e| MessagingError::Delivery(format!("{:?}", e)))?;

        let tab: Option<ActiveTab> = serde_wasm_bindgen::from_value(tab_js)
            .map_err(|e| MessagingError::Delivery(format!("Failed to parse tab: {:?}", e)))?;

        tab.ok_or(MessagingError::NoActiveTab)
    }

    async fn send(&self, tab_id: i32, command: &Command) -> Result<(), MessagingError> {
        let message = to_js(command)
            .map_err(|e| MessagingError::Delivery(format!("Failed to serialize: {:?}", e)))?;

        sendTabMessage(tab_id, message)
            .await
            .map_err(|e| MessagingError::Delivery(format!("{:?}", e)))?;

        Ok(())
    }
}

/// Plain JS objects rather than `Map`s, so chrome can store and clone them
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

/// Run the page agent inside a content script.
///
/// The command listener is registered before the initial storage read, so
/// commands sent while the read is pending are not lost.
pub async fn launch_page_agent(config: ExtensionConfig) -> Result<(), String> {
    let renderer = DomRenderer::new().map_err(|e| format!("No document: {:?}", e))?;
    let agent = Rc::new(RefCell::new(PageAgent::new(renderer)));

    {
        let agent = agent.clone();
        let listener = Closure::wrap(Box::new(move |message: JsValue| {
            match serde_wasm_bindgen::from_value::<Command>(message) {
                Ok(command) => agent.borrow_mut().handle(command),
                Err(e) => log::debug!("Ignoring unknown message: {:?}", e),
            }
        }) as Box<dyn FnMut(JsValue)>);

        onCommand(listener.as_ref().unchecked_ref());
        // The listener lives as long as the page
        listener.forget();
    }

    let page_url = web_sys::window()
        .ok_or_else(|| "No window".to_string())?
        .location()
        .href()
        .map_err(|e| format!("Failed to read page URL: {:?}", e))?;

    let store = PreferenceStore::with_key(ChromeStorage::new(config.storage_area), &config.storage_key);

    let record = load_page_record(&store, &page_url)
        .await
        .map_err(|e| format!("Failed to load preferences: {}", e))?;

    if let Some(record) = record {
        agent.borrow_mut().apply_initial(&record);
    }

    Ok(())
}
