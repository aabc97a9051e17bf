/// Test doubles shared by the unit tests

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{MessagingError, StoreError};
use crate::protocol::{ActiveTab, Command, Renderer, TabMessenger};
use crate::site_data::SiteOptions;
use crate::storage::{MemoryBackend, StorageBackend};

/// Backend whose reads and writes always fail
pub struct FailingBackend;

#[async_trait(?Send)]
impl StorageBackend for FailingBackend {
    async fn get(&self, _key: &str) -> Result<Option<Value>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}

/// Backend that reads fine but rejects writes
#[derive(Clone, Default)]
pub struct ReadOnlyBackend {
    pub inner: MemoryBackend,
}

#[async_trait(?Send)]
impl StorageBackend for ReadOnlyBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("quota exceeded".to_string()))
    }
}

/// Memory backend that suspends once after each read, so concurrent
/// read-modify-write sequences interleave
#[derive(Clone, Default)]
pub struct YieldingBackend {
    pub inner: MemoryBackend,
}

#[async_trait(?Send)]
impl StorageBackend for YieldingBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let value = self.inner.get(key).await;
        YieldNow(false).await;
        value
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner.set(key, value).await
    }
}

struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCall {
    Show(SiteOptions),
    Hide,
    SetMessage(String),
}

/// Renderer that records every call
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Rc<RefCell<Vec<RenderCall>>>,
    visible: Rc<Cell<bool>>,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.borrow().clone()
    }

    /// Same as the user clicking the banner's close icon
    pub fn dismiss(&self) {
        self.visible.set(false);
    }
}

impl Renderer for RecordingRenderer {
    fn show(&mut self, options: &SiteOptions) {
        self.calls.borrow_mut().push(RenderCall::Show(options.clone()));
        self.visible.set(true);
    }

    fn hide(&mut self) {
        self.calls.borrow_mut().push(RenderCall::Hide);
        self.visible.set(false);
    }

    fn set_message(&mut self, text: &str) {
        self.calls.borrow_mut().push(RenderCall::SetMessage(text.to_string()));
    }

    fn is_showing(&self) -> bool {
        self.visible.get()
    }
}

/// Messenger with a fixed active tab that records sent commands
#[derive(Clone, Default)]
pub struct RecordingMessenger {
    pub tab: Option<ActiveTab>,
    pub fail_delivery: bool,
    pub sent: Rc<RefCell<Vec<(i32, Command)>>>,
}

impl RecordingMessenger {
    pub fn for_url(id: i32, url: &str) -> Self {
        RecordingMessenger {
            tab: Some(ActiveTab {
                id,
                url: Some(url.to_string()),
            }),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(i32, Command)> {
        self.sent.borrow().clone()
    }
}

#[async_trait(?Send)]
impl TabMessenger for RecordingMessenger {
    async fn active_tab(&self) -> Result<ActiveTab, MessagingError> {
        self.tab.clone().ok_or(MessagingError::NoActiveTab)
    }

    async fn send(&self, tab_id: i32, command: &Command) -> Result<(), MessagingError> {
        if self.fail_delivery {
            return Err(MessagingError::Delivery("receiving end does not exist".to_string()));
        }
        self.sent.borrow_mut().push((tab_id, command.clone()));
        Ok(())
    }
}
