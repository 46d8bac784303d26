// Thumbnail generation - decode, aspect-fit resample, encode beside the source
use image::error::{ParameterError, ParameterErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The four ways generation fails. The boolean shim collapses all of them;
/// handlers map them to distinct HTTP statuses.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("source image does not exist: {0}")]
    SourceMissing(PathBuf),
    #[error("unsupported image extension in {0:?}")]
    UnsupportedFormat(String),
    #[error("resampling failed: {0}")]
    Resample(#[source] image::ImageError),
    #[error("encoding failed: {0}")]
    Encode(#[source] image::ImageError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOutput {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Regenerates scaled copies of radar images, written next to the source as
/// `{stem}t.{ext}` in the same format family.
#[derive(Debug, Clone)]
pub struct Thumbnailer {
    image_directory: String,
}

impl Thumbnailer {
    pub fn new(image_directory: impl Into<String>) -> Self {
        Self {
            image_directory: image_directory.into(),
        }
    }

    /// Boolean compatibility wrapper over [`try_generate`](Self::try_generate);
    /// failures are logged and collapsed to `false`.
    pub fn generate(&self, base: &Path, image_name: &str, width: u32, height: u32) -> bool {
        match self.try_generate(base, image_name, width, height) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!("thumbnail generation failed for {}: {}", image_name, err);
                false
            }
        }
    }

    /// Decode the named image, scale it with the proportional fit below, and
    /// encode the result beside the source. Only the basename of
    /// `image_name` is used, so directory components in a request cannot
    /// escape the image directory.
    pub fn try_generate(
        &self,
        base: &Path,
        image_name: &str,
        width: u32,
        height: u32,
    ) -> Result<ThumbnailOutput, ThumbnailError> {
        let name = basename(image_name)
            .ok_or_else(|| ThumbnailError::SourceMissing(PathBuf::from(image_name)))?;
        let dir = base.join(&self.image_directory);
        let source = dir.join(name);
        if !source.is_file() {
            return Err(ThumbnailError::SourceMissing(source));
        }

        let (stem, ext) =
            split_name(name).ok_or_else(|| ThumbnailError::UnsupportedFormat(name.into()))?;
        let format =
            format_for_extension(ext).ok_or_else(|| ThumbnailError::UnsupportedFormat(ext.into()))?;

        let bytes = std::fs::read(&source)
            .map_err(|e| ThumbnailError::Resample(image::ImageError::IoError(e)))?;
        let src = image::load_from_memory_with_format(&bytes, format)
            .map_err(ThumbnailError::Resample)?;

        let (thumb_w, thumb_h) = scaled_dimensions(src.width(), src.height(), width, height);
        if thumb_w == 0 || thumb_h == 0 {
            return Err(ThumbnailError::Resample(image::ImageError::Parameter(
                ParameterError::from_kind(ParameterErrorKind::Generic(format!(
                    "computed thumbnail size {}x{} is empty",
                    thumb_w, thumb_h
                ))),
            )));
        }

        // True-color canvas: alpha is flattened away, for PNG as well.
        let resampled = src.resize_exact(thumb_w, thumb_h, FilterType::Lanczos3);
        let canvas = DynamicImage::ImageRgb8(resampled.to_rgb8());

        let out_path = dir.join(format!("{stem}t.{ext}"));
        canvas
            .save_with_format(&out_path, format)
            .map_err(ThumbnailError::Encode)?;

        Ok(ThumbnailOutput {
            path: out_path,
            width: thumb_w,
            height: thumb_h,
        })
    }

    /// Where the thumbnail for `image_name` lives, whether or not it has
    /// been generated yet. `None` for names without a usable basename or
    /// with an extension segment [`try_generate`](Self::try_generate) would
    /// reject.
    pub fn thumbnail_name(&self, image_name: &str) -> Option<String> {
        let name = basename(image_name)?;
        let (stem, ext) = split_name(name)?;
        format_for_extension(ext)?;
        Some(format!("{stem}t.{ext}"))
    }
}

fn basename(name: &str) -> Option<&str> {
    Path::new(name).file_name()?.to_str()
}

/// Split at the dots: `kbis_br1_0.png` → (`kbis_br1_0`, `png`). Only the
/// segment between the first and second dot counts as the extension; any
/// later segments take no part in the format decision or the output name,
/// so `a.b.png` reads as extension `b` and `a.png.bak` as extension `png`.
fn split_name(name: &str) -> Option<(&str, &str)> {
    let mut segments = name.split('.');
    let stem = segments.next()?;
    let ext = segments.next()?;
    Some((stem, ext))
}

/// Format chosen by case-sensitive substring match on the extension text;
/// PNG wins when both match. Anything else is unsupported.
fn format_for_extension(ext: &str) -> Option<ImageFormat> {
    if ext.contains("png") {
        Some(ImageFormat::Png)
    } else if ext.contains("jpg") || ext.contains("jpeg") {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

/// Proportional fit keyed on the larger source dimension. The long side takes
/// the target size; the short side scales by the opposite target/source ratio
/// (target height over source width for wide images, target width over source
/// height for tall ones), truncating fractions. Square sources take the
/// target size exactly.
pub fn scaled_dimensions(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    if src_w > src_h {
        let h = src_h as f64 * (target_h as f64 / src_w as f64);
        (target_w, h as u32)
    } else if src_w < src_h {
        let w = src_w as f64 * (target_w as f64 / src_h as f64);
        (w as u32, target_h)
    } else {
        (target_w, target_h)
    }
}
