use std::path::Path;

/// Suffixes the source browser accepts, matched against the lowercased name.
pub const SOURCE_SUFFIXES: [&str; 4] = [".png", ".jpg", ".jpeg", ".gif"];

/// The category preview scan matches a bare `gif` suffix, so `foogif` counts.
pub const PREVIEW_SUFFIXES: [&str; 4] = [".png", ".jpg", ".jpeg", "gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Still,
    Animated,
    Unsupported,
}

pub fn detect_image_kind(path: &Path) -> ImageKind {
    let Some(name) = lowercase_name(path) else {
        return ImageKind::Unsupported;
    };

    if name.ends_with(".gif") {
        ImageKind::Animated
    } else if has_suffix(&name, &SOURCE_SUFFIXES) {
        ImageKind::Still
    } else {
        ImageKind::Unsupported
    }
}

pub fn is_source_image(file_name: &str) -> bool {
    has_suffix(&file_name.to_lowercase(), &SOURCE_SUFFIXES)
}

pub fn is_preview_image(file_name: &str) -> bool {
    has_suffix(&file_name.to_lowercase(), &PREVIEW_SUFFIXES)
}

fn has_suffix(lowercased: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|suffix| lowercased.ends_with(suffix))
}

fn lowercase_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_images_match_case_insensitively() {
        assert!(is_source_image("a.png"));
        assert!(is_source_image("a.JPG"));
        assert!(is_source_image("a.Jpeg"));
        assert!(is_source_image("a.gif"));
        assert!(!is_source_image("a.bmp"));
        assert!(!is_source_image("agif"));
        assert!(!is_source_image("notes.txt"));
    }

    #[test]
    fn preview_scan_accepts_bare_gif_suffix() {
        assert!(is_preview_image("cover.PNG"));
        assert!(is_preview_image("cover.gif"));
        assert!(is_preview_image("covergif"));
        assert!(!is_preview_image("cover.webp"));
    }

    #[test]
    fn image_kind_detection_works() {
        assert_eq!(detect_image_kind(Path::new("a.jpg")), ImageKind::Still);
        assert_eq!(detect_image_kind(Path::new("dir/a.PNG")), ImageKind::Still);
        assert_eq!(detect_image_kind(Path::new("a.GIF")), ImageKind::Animated);
        assert_eq!(
            detect_image_kind(Path::new("a.tiff")),
            ImageKind::Unsupported
        );
    }
}
