use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    SelectSourceFolder(PathBuf),
    SelectTargetFolder(PathBuf),
    MoveToCategory(PathBuf),
    Undo,
    AddCategory(String),
    Search(String),
    ResetSearch,
}
