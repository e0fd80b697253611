use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::SorterError;
use crate::library::formats::{is_preview_image, is_source_image};

/// Category folder that always sorts after the others ("other").
pub const RESERVED_LAST_FOLDER: &str = "其他";

/// File names of the supported images directly inside `folder`, sorted.
pub fn list_source_images(folder: &Path) -> Result<Vec<String>, SorterError> {
    let mut names = Vec::new();
    for entry in immediate_children(folder)? {
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            log::warn!("skipping non UTF-8 file name in {}", folder.display());
            continue;
        };
        if is_source_image(name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

/// Names of the immediate subfolders of `target`, sorted, with
/// [`RESERVED_LAST_FOLDER`] moved to the end.
pub fn list_category_folders(target: &Path) -> Result<Vec<String>, SorterError> {
    let mut names: Vec<String> = immediate_children(target)?
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();

    if let Some(position) = names.iter().position(|name| name == RESERVED_LAST_FOLDER) {
        let reserved = names.remove(position);
        names.push(reserved);
    }
    Ok(names)
}

pub fn find_preview_image(category: &Path) -> Result<Option<PathBuf>, SorterError> {
    Ok(immediate_children(category)?
        .into_iter()
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(is_preview_image)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path()))
}

/// Only a failure to read `folder` itself is fatal; unreadable children such
/// as dangling symlinks are skipped.
fn immediate_children(folder: &Path) -> Result<Vec<DirEntry>, SorterError> {
    let mut children = Vec::new();
    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => children.push(entry),
            Err(source) if source.depth() == 0 => {
                return Err(SorterError::ListFolder {
                    path: folder.to_path_buf(),
                    source,
                });
            }
            Err(error) => log::warn!("skipping entry in {}: {error}", folder.display()),
        }
    }
    Ok(children)
}
