use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SorterError;
use crate::library::scanner::{find_preview_image, list_category_folders};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    pub path: PathBuf,
    pub preview: Option<PathBuf>,
}

impl CategoryEntry {
    fn matches(&self, keyword_lower: &str) -> bool {
        self.name.to_lowercase().contains(keyword_lower)
    }
}

/// Buttons shown for the subfolders of the target folder.
#[derive(Debug, Clone, Default)]
pub struct CategoryPanel {
    entries: Vec<CategoryEntry>,
    filter: Option<String>,
}

impl CategoryPanel {
    /// Throws away every entry and the active filter, then rescans `target`.
    pub fn rebuild(&mut self, target: &Path) -> Result<(), SorterError> {
        self.entries.clear();
        self.filter = None;
        if target.as_os_str().is_empty() {
            return Ok(());
        }

        for name in list_category_folders(target)? {
            let path = target.join(&name);
            let preview = match find_preview_image(&path) {
                Ok(preview) => preview,
                Err(error) => {
                    log::warn!("no preview for {}: {error}", path.display());
                    None
                }
            };
            self.entries.push(CategoryEntry {
                name,
                path,
                preview,
            });
        }
        log::info!(
            "loaded {} categories from {}",
            self.entries.len(),
            target.display()
        );
        Ok(())
    }

    /// Creates `target/name` (an existing folder is fine) and rebuilds the
    /// panel. A blank name does nothing.
    pub fn create_category(
        &mut self,
        target: &Path,
        name: &str,
    ) -> Result<Option<PathBuf>, SorterError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        if target.as_os_str().is_empty() {
            return Err(SorterError::NoTargetFolder);
        }
        validate_category_name(name)?;

        let path = target.join(name);
        fs::create_dir_all(&path).map_err(|source| SorterError::CreateFolder {
            path: path.clone(),
            source,
        })?;
        log::info!("created category {}", path.display());

        self.rebuild(target)?;
        Ok(Some(path))
    }

    /// Hides entries whose name does not contain `keyword` (ignoring case).
    /// A blank keyword leaves the panel as it is.
    pub fn apply_filter(&mut self, keyword: &str) {
        if keyword.is_empty() {
            return;
        }
        self.filter = Some(keyword.to_lowercase());
    }

    pub fn reset_filter(&mut self) {
        self.filter = None;
    }

    /// The reset control is shown exactly while a filter is active.
    pub fn is_filtered(&self) -> bool {
        self.filter.is_some()
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn visible(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter().filter(move |entry| match &self.filter {
            Some(keyword) => entry.matches(keyword),
            None => true,
        })
    }
}

fn validate_category_name(name: &str) -> Result<(), SorterError> {
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(SorterError::InvalidInput(format!(
            "category name must be a plain folder name: {name}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn target_with(categories: &[&str]) -> TempDir {
        let dir = TempDir::new().expect("tempdir should be created");
        for name in categories {
            fs::create_dir(dir.path().join(name)).expect("dir should be created");
        }
        dir
    }

    fn visible_names(panel: &CategoryPanel) -> Vec<&str> {
        panel.visible().map(|entry| entry.name.as_str()).collect()
    }

    #[test]
    fn rebuild_lists_categories_with_previews() {
        let dir = target_with(&["Cats", "Dogs"]);
        fs::write(dir.path().join("Cats").join("tabby.jpg"), b"x").expect("file");

        let mut panel = CategoryPanel::default();
        panel.rebuild(dir.path()).expect("rebuild should succeed");

        let entries = panel.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Cats");
        assert_eq!(entries[0].path, dir.path().join("Cats"));
        assert_eq!(entries[0].preview, Some(dir.path().join("Cats").join("tabby.jpg")));
        assert_eq!(entries[1].preview, None);
    }

    #[test]
    fn empty_target_path_gives_empty_panel() {
        let mut panel = CategoryPanel::default();
        panel.rebuild(Path::new("")).expect("rebuild should succeed");
        assert!(panel.entries().is_empty());
    }

    #[test]
    fn created_category_appears_after_rebuild() {
        let dir = target_with(&["Cats"]);
        let mut panel = CategoryPanel::default();
        panel.rebuild(dir.path()).expect("rebuild should succeed");

        let created = panel
            .create_category(dir.path(), "  Birds ")
            .expect("create should succeed");

        assert_eq!(created, Some(dir.path().join("Birds")));
        assert!(dir.path().join("Birds").is_dir());
        assert_eq!(visible_names(&panel), vec!["Birds", "Cats"]);
    }

    #[test]
    fn creating_existing_category_is_fine() {
        let dir = target_with(&["Cats"]);
        let mut panel = CategoryPanel::default();

        panel
            .create_category(dir.path(), "Cats")
            .expect("existing folder should be accepted");

        assert_eq!(visible_names(&panel), vec!["Cats"]);
    }

    #[test]
    fn blank_category_name_is_noop() {
        let dir = target_with(&[]);
        let mut panel = CategoryPanel::default();

        let created = panel
            .create_category(dir.path(), "   ")
            .expect("blank name should be ignored");

        assert_eq!(created, None);
        assert!(panel.entries().is_empty());
    }

    #[test]
    fn category_name_with_separator_is_rejected() {
        let dir = target_with(&[]);
        let mut panel = CategoryPanel::default();

        for name in ["../escape", "a/b", "..", "a\\b"] {
            let result = panel.create_category(dir.path(), name);
            assert!(matches!(result, Err(SorterError::InvalidInput(_))), "{name}");
        }
    }

    #[test]
    fn create_without_target_folder_fails() {
        let mut panel = CategoryPanel::default();
        let result = panel.create_category(Path::new(""), "Cats");
        assert!(matches!(result, Err(SorterError::NoTargetFolder)));
    }

    #[test]
    fn filter_hides_non_matching_and_reset_restores_all() {
        let dir = target_with(&["Cats", "Dogs", "wildcat"]);
        let mut panel = CategoryPanel::default();
        panel.rebuild(dir.path()).expect("rebuild should succeed");
        assert!(!panel.is_filtered());

        panel.apply_filter("CAT");

        assert!(panel.is_filtered());
        assert_eq!(visible_names(&panel), vec!["Cats", "wildcat"]);

        panel.reset_filter();

        assert!(!panel.is_filtered());
        assert_eq!(visible_names(&panel), vec!["Cats", "Dogs", "wildcat"]);
    }

    #[test]
    fn empty_keyword_does_not_filter() {
        let dir = target_with(&["Cats", "Dogs"]);
        let mut panel = CategoryPanel::default();
        panel.rebuild(dir.path()).expect("rebuild should succeed");

        panel.apply_filter("");

        assert!(!panel.is_filtered());
        assert_eq!(visible_names(&panel).len(), 2);
    }

    #[test]
    fn rebuild_clears_active_filter() {
        let dir = target_with(&["Cats", "Dogs"]);
        let mut panel = CategoryPanel::default();
        panel.rebuild(dir.path()).expect("rebuild should succeed");
        panel.apply_filter("dog");

        panel.rebuild(dir.path()).expect("rebuild should succeed");

        assert!(!panel.is_filtered());
        assert_eq!(visible_names(&panel), vec!["Cats", "Dogs"]);
    }
}
