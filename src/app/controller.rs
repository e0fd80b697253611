use std::path::{Path, PathBuf};

use crate::app::browser::ImageBrowser;
use crate::app::categories::CategoryPanel;
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::error::SorterError;
use crate::infra::config::{AppConfig, ConfigStore};

pub const EMPTY_NOTICE: &str = "No images to display";
pub const UNDONE_NOTICE: &str = "Last move undone";

/// Owns everything the window shows, independent of the GUI toolkit.
pub struct SorterController {
    store: ConfigStore,
    config: AppConfig,
    browser: ImageBrowser,
    panel: CategoryPanel,
    state: AppState,
}

impl SorterController {
    pub fn new(store: ConfigStore) -> Self {
        Self {
            store,
            config: AppConfig::default(),
            browser: ImageBrowser::default(),
            panel: CategoryPanel::default(),
            state: AppState::default(),
        }
    }

    /// Loads the config and whichever folders it remembers. Only a config
    /// that cannot be written back is fatal; folder problems become notices.
    pub fn bootstrap(&mut self) -> Result<(), SorterError> {
        self.config = self.store.load_or_reset()?;

        if !self.config.image_folder.is_empty() {
            let folder = PathBuf::from(&self.config.image_folder);
            if let Err(error) = self.browser.load(&folder) {
                self.report(&error);
            }
            self.state.image_changed();
        }

        if !self.config.target_folder.is_empty() {
            let target = PathBuf::from(&self.config.target_folder);
            if let Err(error) = self.panel.rebuild(&target) {
                self.report(&error);
            }
            self.state.panel_changed();
        }

        Ok(())
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        if let Err(error) = self.try_dispatch(event) {
            self.report(&error);
        }
    }

    pub fn try_dispatch(&mut self, event: AppEvent) -> Result<(), SorterError> {
        match event {
            AppEvent::SelectSourceFolder(folder) => self.select_source_folder(&folder),
            AppEvent::SelectTargetFolder(folder) => self.select_target_folder(&folder),
            AppEvent::MoveToCategory(category) => {
                if self.browser.move_current_to(&category)?.is_some() {
                    self.state.notice = None;
                    if self.browser.is_empty() {
                        self.state.info(EMPTY_NOTICE);
                    }
                    self.state.image_changed();
                }
                Ok(())
            }
            AppEvent::Undo => {
                if self.browser.undo()?.is_some() {
                    self.state.info(UNDONE_NOTICE);
                    self.state.image_changed();
                }
                Ok(())
            }
            AppEvent::AddCategory(name) => {
                let target = PathBuf::from(&self.config.target_folder);
                if self.panel.create_category(&target, &name)?.is_some() {
                    self.state.panel_changed();
                }
                Ok(())
            }
            AppEvent::Search(keyword) => {
                self.panel.apply_filter(&keyword);
                Ok(())
            }
            AppEvent::ResetSearch => {
                self.panel.reset_filter();
                Ok(())
            }
        }
    }

    fn select_source_folder(&mut self, folder: &Path) -> Result<(), SorterError> {
        self.config.image_folder = folder.to_string_lossy().to_string();
        let loaded = self.browser.load(folder);
        self.state.notice = None;
        self.state.image_changed();
        self.store.save(&self.config)?;
        loaded
    }

    fn select_target_folder(&mut self, folder: &Path) -> Result<(), SorterError> {
        self.config.target_folder = folder.to_string_lossy().to_string();
        let rebuilt = self.panel.rebuild(folder);
        self.state.panel_changed();
        self.store.save(&self.config)?;
        rebuilt
    }

    fn report(&mut self, error: &SorterError) {
        log::error!("{error}");
        self.state.error(error.to_string());
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn browser(&self) -> &ImageBrowser {
        &self.browser
    }

    pub fn panel(&self) -> &CategoryPanel {
        &self.panel
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
