//! Path, image and option parsing utilities

use image::{ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;

use crate::utils::config::{CONFIDENCE_MAX_PERCENT, Defaults};
use crate::{CoalescerError, Result};

/// Formats the recognition service accepts.
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Jpeg, ImageFormat::Png];

/// Check if a file should be excluded based on OS-specific hidden files
pub fn is_os_hidden_file(path: &Path) -> bool {
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        match name {
            // macOS
            ".DS_Store" | ".AppleDouble" | ".LSOverride" => true,
            // Windows
            "Thumbs.db" | "ehthumbs.db" | "Desktop.ini" => true,
            // Linux
            ".directory" => true,
            // macOS resource forks
            _ => name.starts_with("._"),
        }
    } else {
        false
    }
}

/// Format of `bytes` if it is a JPEG or PNG whose header decodes, else `None`.
pub fn sniff_image(bytes: &[u8]) -> Option<ImageFormat> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let format = reader.format()?;
    if !SUPPORTED_FORMATS.contains(&format) {
        return None;
    }
    reader.into_dimensions().ok()?;
    Some(format)
}

/// Raw percentage → threshold in `(0, 1]`. Values `<= 0` or above 99 fall back to the default (0.5).
pub fn normalize_confidence(raw_percent: f64) -> f64 {
    if !(raw_percent > 0.0 && raw_percent <= CONFIDENCE_MAX_PERCENT) {
        return Defaults::CONFIDENCE / 100.0;
    }
    raw_percent / 100.0
}

/// Split the `--combine` list: comma separated, trimmed, empty items dropped.
pub fn parse_combination(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Person key of a reference photo named `<name>_<anything>.<ext>`. The key becomes a folder
/// name, so `.`, `..` and keys holding a path separator are rejected.
pub fn person_key(filename: &str) -> Result<&str> {
    let key = match filename.find('_') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => {
            return Err(CoalescerError::Config(format!(
                "incorrect file name {filename}: expected <name>_<anything>.<ext>"
            )));
        }
    };
    if key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(CoalescerError::Config(format!(
            "incorrect file name {filename}: {key:?} cannot be used as a folder name"
        )));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_rejects_text_and_truncated_png() {
        assert_eq!(sniff_image(b"hello, not an image"), None);
        // PNG signature with nothing behind it: format guessed, header does not decode.
        assert_eq!(sniff_image(b"\x89PNG\r\n\x1a\n"), None);
    }

    #[test]
    fn sniff_accepts_png() {
        let mut bytes = Vec::new();
        image::RgbImage::new(2, 2)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        assert_eq!(sniff_image(&bytes), Some(ImageFormat::Png));
    }

    #[test]
    fn hidden_files() {
        assert!(is_os_hidden_file(Path::new("/p/.DS_Store")));
        assert!(is_os_hidden_file(Path::new("/p/._bill_1.jpg")));
        assert!(is_os_hidden_file(Path::new("Thumbs.db")));
        assert!(!is_os_hidden_file(Path::new("/p/bill_1.jpg")));
    }
}
