use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SorterError;
use crate::library::scanner::list_source_images;

/// The single move that undo can reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: PathBuf,
    pub to: PathBuf,
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ImageBrowser {
    folder: PathBuf,
    files: Vec<String>,
    index: usize,
    last_move: Option<MoveRecord>,
}

impl ImageBrowser {
    /// Replaces the image list with the contents of `folder` and rewinds the
    /// cursor. The list stays empty when the folder cannot be listed.
    pub fn load(&mut self, folder: &Path) -> Result<(), SorterError> {
        self.folder = folder.to_path_buf();
        self.files.clear();
        self.index = 0;
        self.files = list_source_images(folder)?;
        log::info!(
            "loaded {} images from {}",
            self.files.len(),
            folder.display()
        );
        Ok(())
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn position(&self) -> Option<usize> {
        (!self.files.is_empty()).then_some(self.index)
    }

    pub fn current_file(&self) -> Option<&str> {
        self.files.get(self.index).map(String::as_str)
    }

    pub fn current_path(&self) -> Option<PathBuf> {
        self.current_file().map(|name| self.folder.join(name))
    }

    pub fn can_undo(&self) -> bool {
        self.last_move.is_some()
    }

    /// Renames the current image into `category_dir`. Nothing changes when
    /// the rename fails.
    pub fn move_current_to(
        &mut self,
        category_dir: &Path,
    ) -> Result<Option<MoveRecord>, SorterError> {
        let Some(name) = self.current_file().map(str::to_string) else {
            return Ok(None);
        };

        let from = self.folder.join(&name);
        let to = category_dir.join(&name);
        rename(&from, &to)?;
        log::info!("moved {} -> {}", from.display(), to.display());

        let record = MoveRecord {
            from,
            to,
            index: self.index,
        };
        self.files.remove(self.index);
        if self.index >= self.files.len() {
            self.index = 0;
        }
        self.last_move = Some(record.clone());
        Ok(Some(record))
    }

    /// Reverses the last move. The record survives a failed rename so the
    /// undo can be retried.
    pub fn undo(&mut self) -> Result<Option<MoveRecord>, SorterError> {
        let Some(record) = self.last_move.clone() else {
            return Ok(None);
        };

        rename(&record.to, &record.from)?;
        log::info!(
            "restored {} -> {}",
            record.to.display(),
            record.from.display()
        );

        if record.to.parent() == Some(self.folder.as_path()) {
            self.forget(&record.to);
        }
        if record.from.parent() == Some(self.folder.as_path()) {
            if let Some(name) = record.from.file_name().and_then(|name| name.to_str()) {
                let index = record.index.min(self.files.len());
                self.files.insert(index, name.to_string());
                self.index = index;
            }
        }
        self.last_move = None;
        Ok(Some(record))
    }

    /// Drops the list entry for a file that left the current folder.
    fn forget(&mut self, path: &Path) {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return;
        };
        let Some(position) = self.files.iter().position(|file| file == name) else {
            return;
        };
        self.files.remove(position);
        if position < self.index {
            self.index -= 1;
        } else if self.index >= self.files.len() {
            self.index = 0;
        }
    }
}

fn rename(from: &Path, to: &Path) -> Result<(), SorterError> {
    fs::rename(from, to).map_err(|source| SorterError::Move {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        source: PathBuf,
        category: PathBuf,
    }

    fn fixture(names: &[&str]) -> Fixture {
        let dir = TempDir::new().expect("tempdir should be created");
        let source = dir.path().join("inbox");
        let category = dir.path().join("sorted").join("cats");
        fs::create_dir_all(&source).expect("source should exist");
        fs::create_dir_all(&category).expect("category should exist");
        for name in names {
            fs::write(source.join(name), b"img").expect("file should be written");
        }
        Fixture {
            _dir: dir,
            source,
            category,
        }
    }

    fn loaded(fixture: &Fixture) -> ImageBrowser {
        let mut browser = ImageBrowser::default();
        browser.load(&fixture.source).expect("load should succeed");
        browser
    }

    #[test]
    fn load_resets_cursor_to_first_image() {
        let fx = fixture(&["a.png", "b.jpg"]);
        let browser = loaded(&fx);

        assert_eq!(browser.len(), 2);
        assert_eq!(browser.position(), Some(0));
        assert_eq!(browser.current_file(), Some("a.png"));
        assert_eq!(browser.current_path(), Some(fx.source.join("a.png")));
    }

    #[test]
    fn move_removes_image_and_relocates_file() {
        let fx = fixture(&["a.png", "b.jpg", "c.gif"]);
        let mut browser = loaded(&fx);

        let record = browser
            .move_current_to(&fx.category)
            .expect("move should succeed")
            .expect("an image was current");

        assert_eq!(record.index, 0);
        assert!(!fx.source.join("a.png").exists());
        assert!(fx.category.join("a.png").exists());
        assert_eq!(browser.files(), ["b.jpg", "c.gif"]);
        assert_eq!(browser.current_file(), Some("b.jpg"));
        assert!(browser.can_undo());
    }

    #[test]
    fn moving_last_image_in_list_wraps_to_first() {
        let fx = fixture(&["a.png", "b.jpg"]);
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("first move");
        assert_eq!(browser.current_file(), Some("b.jpg"));

        browser.move_current_to(&fx.category).expect("second move");

        assert!(browser.is_empty());
        assert_eq!(browser.current_file(), None);
        assert_eq!(browser.position(), None);
    }

    #[test]
    fn undo_restores_file_at_original_position() {
        let fx = fixture(&["a.png", "b.jpg", "c.gif"]);
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("move");

        let record = browser
            .undo()
            .expect("undo should succeed")
            .expect("a move was recorded");

        assert_eq!(record.from, fx.source.join("a.png"));
        assert!(fx.source.join("a.png").exists());
        assert!(!fx.category.join("a.png").exists());
        assert_eq!(browser.files(), ["a.png", "b.jpg", "c.gif"]);
        assert_eq!(browser.current_file(), Some("a.png"));
        assert!(!browser.can_undo());
    }

    #[test]
    fn undo_after_emptying_list_brings_image_back() {
        let fx = fixture(&["only.png"]);
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("move");
        assert!(browser.is_empty());

        browser.undo().expect("undo should succeed");

        assert_eq!(browser.files(), ["only.png"]);
        assert_eq!(browser.position(), Some(0));
    }

    #[test]
    fn undo_without_prior_move_is_noop() {
        let fx = fixture(&["a.png"]);
        let mut browser = loaded(&fx);

        let result = browser.undo().expect("undo should not fail");

        assert!(result.is_none());
        assert_eq!(browser.files(), ["a.png"]);
        assert!(fx.source.join("a.png").exists());
    }

    #[test]
    fn only_one_move_is_undoable() {
        let fx = fixture(&["a.png", "b.jpg"]);
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("first move");
        browser.move_current_to(&fx.category).expect("second move");

        browser.undo().expect("undo should succeed");
        let second = browser.undo().expect("second undo should not fail");

        assert!(second.is_none());
        assert_eq!(browser.files(), ["b.jpg"]);
        assert!(fx.category.join("a.png").exists());
    }

    #[test]
    fn move_with_empty_list_is_noop() {
        let fx = fixture(&[]);
        let mut browser = loaded(&fx);

        let result = browser.move_current_to(&fx.category).expect("no-op");

        assert!(result.is_none());
        assert!(!browser.can_undo());
    }

    #[test]
    fn failed_move_leaves_state_untouched() {
        let fx = fixture(&["a.png"]);
        let mut browser = loaded(&fx);
        let missing = fx.category.join("does-not-exist");

        let result = browser.move_current_to(&missing);

        assert!(matches!(result, Err(SorterError::Move { .. })));
        assert_eq!(browser.files(), ["a.png"]);
        assert!(fx.source.join("a.png").exists());
        assert!(!browser.can_undo());
    }

    #[test]
    fn failed_undo_keeps_record() {
        let fx = fixture(&["a.png"]);
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("move");
        fs::remove_file(fx.category.join("a.png")).expect("file should be removed");

        let result = browser.undo();

        assert!(matches!(result, Err(SorterError::Move { .. })));
        assert!(browser.can_undo());
        assert!(browser.is_empty());
    }

    #[test]
    fn undo_while_browsing_destination_drops_stale_entry() {
        let fx = fixture(&["a.png"]);
        fs::write(fx.category.join("b.png"), b"img").expect("file should be written");
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("move");
        browser.load(&fx.category).expect("load should succeed");
        assert_eq!(browser.files(), ["a.png", "b.png"]);

        browser.undo().expect("undo should succeed");

        assert!(fx.source.join("a.png").exists());
        assert_eq!(browser.files(), ["b.png"]);
        assert_eq!(browser.current_file(), Some("b.png"));
        browser
            .move_current_to(&fx.source)
            .expect("remaining entry should still move");
        assert!(fx.source.join("b.png").exists());
    }

    #[test]
    fn undo_after_switching_folder_does_not_touch_new_list() {
        let fx = fixture(&["a.png"]);
        let mut browser = loaded(&fx);
        browser.move_current_to(&fx.category).expect("move");
        let elsewhere = fx.category.parent().expect("category has a parent");
        browser.load(elsewhere).expect("load should succeed");

        browser.undo().expect("undo should succeed");

        assert!(fx.source.join("a.png").exists());
        assert!(browser.files().is_empty());
    }
}
