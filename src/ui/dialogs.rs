use eframe::egui;

use crate::app::events::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Search,
    AddCategory,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            Self::Search => "Search buttons",
            Self::AddCategory => "Add button",
        }
    }

    pub fn into_event(self, text: String) -> AppEvent {
        match self {
            Self::Search => AppEvent::Search(text),
            Self::AddCategory => AppEvent::AddCategory(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Submitted(String),
    Cancelled,
}

/// Single-line text prompt drawn as a centered window.
#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
    focus_requested: bool,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            focus_requested: false,
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn show(&mut self, ctx: &egui::Context) -> PromptOutcome {
        let mut outcome = PromptOutcome::Pending;

        egui::Window::new(self.kind.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Enter a button name:");
                let field = ui.text_edit_singleline(&mut self.input);
                if !self.focus_requested {
                    field.request_focus();
                    self.focus_requested = true;
                }

                let entered =
                    field.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                let escaped = ui.input(|input| input.key_pressed(egui::Key::Escape));

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || entered {
                        outcome = PromptOutcome::Submitted(self.input.clone());
                    }
                    if ui.button("Cancel").clicked() || escaped {
                        outcome = PromptOutcome::Cancelled;
                    }
                });
            });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_kind_maps_to_event() {
        assert_eq!(
            PromptKind::Search.into_event("cat".to_string()),
            AppEvent::Search("cat".to_string())
        );
        assert_eq!(
            PromptKind::AddCategory.into_event("dogs".to_string()),
            AppEvent::AddCategory("dogs".to_string())
        );
    }
}
