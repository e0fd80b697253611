use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageReader, RgbaImage};

use crate::error::SorterError;
use crate::library::formats::{detect_image_kind, ImageKind};

/// Bounding box for the main view.
pub const DISPLAY_MAX_SIDE: u32 = 600;
/// Bounding box for category button icons.
pub const ICON_MAX_SIDE: u32 = 100;

#[derive(Debug, Clone)]
pub enum DisplayImage {
    Still(RgbaImage),
    Animated(Vec<RgbaImage>),
}

impl DisplayImage {
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Still(_) => 1,
            Self::Animated(frames) => frames.len(),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

pub fn decode_for_display(path: &Path) -> Result<DisplayImage, SorterError> {
    match detect_image_kind(path) {
        ImageKind::Animated => {
            let frames = decode_gif_frames(path)?
                .into_iter()
                .map(|frame| fit_within(frame, DISPLAY_MAX_SIDE))
                .collect();
            Ok(DisplayImage::Animated(frames))
        }
        ImageKind::Still | ImageKind::Unsupported => {
            let image = decode_still(path)?;
            Ok(DisplayImage::Still(
                image.thumbnail(DISPLAY_MAX_SIDE, DISPLAY_MAX_SIDE).to_rgba8(),
            ))
        }
    }
}

pub fn decode_icon(path: &Path) -> Result<RgbaImage, SorterError> {
    let image = decode_still(path)?;
    Ok(image.thumbnail(ICON_MAX_SIDE, ICON_MAX_SIDE).to_rgba8())
}

fn decode_still(path: &Path) -> Result<DynamicImage, SorterError> {
    ImageReader::open(path)
        .map_err(|source| SorterError::OpenImage {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| SorterError::OpenImage {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(|source| SorterError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

fn decode_gif_frames(path: &Path) -> Result<Vec<RgbaImage>, SorterError> {
    let file = File::open(path).map_err(|source| SorterError::OpenImage {
        path: path.to_path_buf(),
        source,
    })?;
    let decode_error = |source: image::ImageError| SorterError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let frames = GifDecoder::new(BufReader::new(file))
        .map_err(decode_error)?
        .into_frames()
        .collect_frames()
        .map_err(decode_error)?;
    Ok(frames.into_iter().map(|frame| frame.into_buffer()).collect())
}

fn fit_within(frame: RgbaImage, max_side: u32) -> RgbaImage {
    if frame.width() <= max_side && frame.height() <= max_side {
        return frame;
    }
    DynamicImage::ImageRgba8(frame)
        .thumbnail(max_side, max_side)
        .to_rgba8()
}
