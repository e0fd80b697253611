#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// What the shell needs to know to redraw: a notice for the info line and
/// counters that bump whenever the image or the category icons must be
/// re-read from disk.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub notice: Option<Notice>,
    pub image_revision: u64,
    pub panel_revision: u64,
}

impl AppState {
    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn image_changed(&mut self) {
        self.image_revision += 1;
    }

    pub fn panel_changed(&mut self) {
        self.panel_revision += 1;
    }
}
