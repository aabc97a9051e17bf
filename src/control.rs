/// Control surface session: view and edit the preference for the active tab

use crate::domain::extract_domain;
use crate::error::StoreError;
use crate::protocol::{ActiveTab, Command, TabMessenger};
use crate::site_data::{SiteRecord, SiteStyle};
use crate::storage::{PreferenceStore, StorageBackend};

/// One opened control surface.
///
/// Every change is persisted first and then sent to the tab's page agent,
/// so a lost message still leaves storage correct for the next page load.
/// The local record only changes once the write succeeded.
#[derive(Debug, Clone)]
pub struct ControlSurface<B, M> {
    store: PreferenceStore<B>,
    messenger: M,
    tab: Option<ActiveTab>,
    identity: Option<String>,
    record: SiteRecord,
}

impl<B: StorageBackend, M: TabMessenger> ControlSurface<B, M> {
    /// Read the active tab and its stored record. Tab lookup failures give
    /// an inert surface; store failures are returned.
    pub async fn open(store: PreferenceStore<B>, messenger: M) -> Result<Self, StoreError> {
        let tab = match messenger.active_tab().await {
            Ok(tab) => Some(tab),
            Err(e) => {
                log::warn!("Control surface opened without a tab: {}", e);
                None
            }
        };

        let identity = tab
            .as_ref()
            .and_then(|t| t.url.as_deref())
            .and_then(extract_domain);

        let record = match &identity {
            Some(id) => store.find_by_identity(id).await?,
            None => SiteRecord::default_for(""),
        };

        log::debug!("Opened control surface for {:?} (enabled={})", identity, record.enabled);

        Ok(ControlSurface {
            store,
            messenger,
            tab,
            identity,
            record,
        })
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn record(&self) -> &SiteRecord {
        &self.record
    }

    /// Whether changes made here can be persisted
    pub fn is_actionable(&self) -> bool {
        self.identity.is_some() && self.tab.is_some()
    }

    pub async fn set_enabled(&mut self, enabled: bool) -> Result<(), StoreError> {
        let mut next = self.record.clone();
        next.enabled = enabled;

        if self.commit(next).await? {
            let options = self.record.options.clone();
            self.send(Command::ToggleWarning { enabled, options }).await;
        }
        Ok(())
    }

    pub async fn set_style(&mut self, style: SiteStyle) -> Result<(), StoreError> {
        let mut next = self.record.clone();
        next.options.style = style;

        if self.commit(next).await? && self.record.enabled {
            let options = self.record.options.clone();
            self.send(Command::ChangeStyle { options }).await;
        }
        Ok(())
    }

    pub async fn set_message(&mut self, message: String) -> Result<(), StoreError> {
        let mut next = self.record.clone();
        next.options.message = message;

        if self.commit(next).await? && self.record.enabled {
            let msg = self.record.options.message.clone();
            self.send(Command::ChangeMessage { msg }).await;
        }
        Ok(())
    }

    /// Persist `next` and adopt it. `Ok(false)` when there is nothing to persist to.
    async fn commit(&mut self, next: SiteRecord) -> Result<bool, StoreError> {
        let Some(identity) = self.identity.as_deref() else {
            log::debug!("No domain for the active tab, change not saved");
            return Ok(false);
        };

        self.store
            .upsert(identity, next.enabled, next.options.clone())
            .await?;
        self.record = next;
        Ok(true)
    }

    async fn send(&self, command: Command) {
        let Some(tab) = &self.tab else {
            return;
        };

        if let Err(e) = self.messenger.send(tab.id, &command).await {
            log::warn!("Could not reach the page in tab {}: {}", tab.id, e);
        }
    }
}
