/// Page agent: keeps the banner on one loaded page in line with stored preferences

use crate::domain::extract_domain;
use crate::error::StoreError;
use crate::protocol::{Command, Renderer};
use crate::site_data::{SiteOptions, SiteRecord};
use crate::storage::{PreferenceStore, StorageBackend};

/// Look up the stored record for a page. `Ok(None)` when the URL has no
/// domain identity.
pub async fn load_page_record<B: StorageBackend>(
    store: &PreferenceStore<B>,
    page_url: &str,
) -> Result<Option<SiteRecord>, StoreError> {
    let Some(identity) = extract_domain(page_url) else {
        log::debug!("No domain identity for {}", page_url);
        return Ok(None);
    };

    store.find_by_identity(&identity).await.map(Some)
}

pub struct PageAgent<R> {
    renderer: R,
    /// Options of the banner currently on the page, `None` while hidden
    shown: Option<SiteOptions>,
    /// A toggle has set the banner state, so the initial read is stale
    toggled: bool,
    /// Style and message changes received while hidden, applied if the
    /// initial read turns out enabled
    pending_style: Option<SiteOptions>,
    pending_message: Option<String>,
}

impl<R: Renderer> PageAgent<R> {
    pub fn new(renderer: R) -> Self {
        PageAgent {
            renderer,
            shown: None,
            toggled: false,
            pending_style: None,
            pending_message: None,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown.is_some()
    }

    pub fn shown_options(&self) -> Option<&SiteOptions> {
        self.shown.as_ref()
    }

    /// Read storage for `page_url` and show the banner if the domain is enabled
    pub async fn start<B: StorageBackend>(
        &mut self,
        store: &PreferenceStore<B>,
        page_url: &str,
    ) -> Result<(), StoreError> {
        if let Some(record) = load_page_record(store, page_url).await? {
            self.apply_initial(&record);
        }
        Ok(())
    }

    /// Apply the record read at page load. Ignored once a toggle has been
    /// handled, since the toggle is newer than the read.
    pub fn apply_initial(&mut self, record: &SiteRecord) {
        if self.toggled {
            log::debug!("Discarding initial record for {}: a toggle arrived first", record.url);
            return;
        }
        if record.enabled {
            let mut options = self
                .pending_style
                .take()
                .unwrap_or_else(|| record.options.clone());
            if let Some(msg) = self.pending_message.take() {
                options.message = msg;
            }
            self.show(options);
        }
    }

    pub fn handle(&mut self, command: Command) {
        self.forget_dismissed();

        match command {
            Command::ToggleWarning { enabled, options } => {
                self.toggled = true;
                if enabled {
                    self.show(options);
                } else {
                    self.hide();
                }
            }
            Command::ChangeStyle { options } => {
                if self.is_shown() {
                    self.renderer.hide();
                    self.renderer.show(&options);
                    self.shown = Some(options);
                } else {
                    log::debug!("Holding style change while the warning is hidden");
                    self.pending_style = Some(options);
                    self.pending_message = None;
                }
            }
            Command::ChangeMessage { msg } => match self.shown.as_mut() {
                Some(options) => {
                    self.renderer.set_message(&msg);
                    options.message = msg;
                }
                None => {
                    log::debug!("Holding message change while the warning is hidden");
                    self.pending_message = Some(msg);
                }
            },
        }
    }

    /// The user can dismiss the banner on the page; treat it as hidden from then on
    fn forget_dismissed(&mut self) {
        if self.shown.is_some() && !self.renderer.is_showing() {
            log::debug!("Warning was dismissed on the page");
            self.shown = None;
        }
    }

    fn show(&mut self, options: SiteOptions) {
        if self.shown.is_some() {
            self.renderer.hide();
        }
        self.renderer.show(&options);
        self.shown = Some(options);
    }

    fn hide(&mut self) {
        if self.shown.take().is_some() {
            self.renderer.hide();
        }
    }
}
