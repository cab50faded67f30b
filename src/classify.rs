/// File classification for the sorting engine.
///
/// This module decides, for one file, whether it is skipped and, if not,
/// whether it counts as a photo or a video. Classification is total: every
/// (name, size) input maps to exactly one verdict, and the checks run in a
/// fixed order so repeated runs over the same tree reproduce the same
/// decisions.
///
/// # Examples
///
/// ```
/// use mediasort::classify::{Classification, Classifier, MediaKind};
/// use std::collections::HashSet;
///
/// let photos: HashSet<String> = [".jpg".to_string()].into_iter().collect();
/// let videos: HashSet<String> = [".mp4".to_string()].into_iter().collect();
/// let classifier = Classifier::new(&[], &photos, &videos);
///
/// assert_eq!(
///     classifier.classify("holiday.JPG", 1024),
///     Classification::Media(MediaKind::Photo)
/// );
/// ```
use std::collections::HashSet;

/// The category a recognized media file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Returns the lowercase label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }
}

/// Why a file was passed over instead of relocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The file is empty.
    ZeroSize,
    /// The file name contains a configured skip pattern.
    MatchedSkipPattern,
    /// The extension belongs to neither configured set.
    UnrecognizedExtension,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ZeroSize => write!(f, "zero size"),
            SkipReason::MatchedSkipPattern => write!(f, "matched skip pattern"),
            SkipReason::UnrecognizedExtension => write!(f, "unrecognized extension"),
        }
    }
}

/// The verdict for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Skip(SkipReason),
    Media(MediaKind),
}

/// Classifies files against the configured skip patterns and extension sets.
///
/// Borrows the compiled configuration's lookup structures; the sets are
/// expected to hold lowercase extensions with leading dots.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    skip_patterns: &'a [String],
    photo_extensions: &'a HashSet<String>,
    video_extensions: &'a HashSet<String>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        skip_patterns: &'a [String],
        photo_extensions: &'a HashSet<String>,
        video_extensions: &'a HashSet<String>,
    ) -> Self {
        Self {
            skip_patterns,
            photo_extensions,
            video_extensions,
        }
    }

    /// Classify one file by name and size.
    ///
    /// Checks are performed in this order, first match wins:
    /// 1. Empty file - skip
    /// 2. Skip pattern contained in the file name (case-sensitive, full name
    ///    including extension) - skip
    /// 3. Extension in the photo set - photo
    /// 4. Extension in the video set - video
    /// 5. Anything else - skip
    pub fn classify(&self, file_name: &str, size: u64) -> Classification {
        if size == 0 {
            return Classification::Skip(SkipReason::ZeroSize);
        }

        if self
            .skip_patterns
            .iter()
            .any(|pattern| file_name.contains(pattern.as_str()))
        {
            return Classification::Skip(SkipReason::MatchedSkipPattern);
        }

        match dotted_extension(file_name) {
            Some(ext) if self.photo_extensions.contains(&ext) => {
                Classification::Media(MediaKind::Photo)
            }
            Some(ext) if self.video_extensions.contains(&ext) => {
                Classification::Media(MediaKind::Video)
            }
            _ => Classification::Skip(SkipReason::UnrecognizedExtension),
        }
    }
}

/// Extract the lowercased, dot-prefixed extension from a file name.
fn dotted_extension(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> (Vec<String>, HashSet<String>, HashSet<String>) {
        let patterns = vec!["IMG_dup".to_string(), "~".to_string()];
        let photos = [".jpg".to_string(), ".png".to_string()]
            .into_iter()
            .collect();
        let videos = [".mp4".to_string(), ".mov".to_string()]
            .into_iter()
            .collect();
        (patterns, photos, videos)
    }

    #[test]
    fn test_zero_size_always_skips() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        // Even a recognized photo extension skips at zero bytes
        assert_eq!(
            classifier.classify("photo.jpg", 0),
            Classification::Skip(SkipReason::ZeroSize)
        );
        assert_eq!(
            classifier.classify("clip.mp4", 0),
            Classification::Skip(SkipReason::ZeroSize)
        );
    }

    #[test]
    fn test_skip_pattern_beats_extension() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        assert_eq!(
            classifier.classify("IMG_dup_001.jpg", 100),
            Classification::Skip(SkipReason::MatchedSkipPattern)
        );
    }

    #[test]
    fn test_skip_pattern_is_case_sensitive() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        // "img_dup" does not match the configured "IMG_dup"
        assert_eq!(
            classifier.classify("img_dup_001.jpg", 100),
            Classification::Media(MediaKind::Photo)
        );
    }

    #[test]
    fn test_skip_pattern_matches_extension_part() {
        let (_, photos, videos) = sets();
        let patterns = vec![".jpg".to_string()];
        let classifier = Classifier::new(&patterns, &photos, &videos);

        // Patterns match against the full name, extension included
        assert_eq!(
            classifier.classify("photo.jpg", 100),
            Classification::Skip(SkipReason::MatchedSkipPattern)
        );
    }

    #[test]
    fn test_photo_extension_case_insensitive() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        assert_eq!(
            classifier.classify("holiday.JPG", 2048),
            Classification::Media(MediaKind::Photo)
        );
        assert_eq!(
            classifier.classify("holiday.Png", 2048),
            Classification::Media(MediaKind::Photo)
        );
    }

    #[test]
    fn test_video_extension() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        assert_eq!(
            classifier.classify("clip.mp4", 2048),
            Classification::Media(MediaKind::Video)
        );
        assert_eq!(
            classifier.classify("clip.MOV", 2048),
            Classification::Media(MediaKind::Video)
        );
    }

    #[test]
    fn test_unrecognized_extension_skips() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        assert_eq!(
            classifier.classify("notes.txt", 512),
            Classification::Skip(SkipReason::UnrecognizedExtension)
        );
    }

    #[test]
    fn test_no_extension_skips() {
        let (patterns, photos, videos) = sets();
        let classifier = Classifier::new(&patterns, &photos, &videos);

        assert_eq!(
            classifier.classify("README", 512),
            Classification::Skip(SkipReason::UnrecognizedExtension)
        );
    }

    #[test]
    fn test_media_kind_labels() {
        assert_eq!(MediaKind::Photo.label(), "photo");
        assert_eq!(MediaKind::Video.label(), "video");
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::ZeroSize.to_string(), "zero size");
        assert_eq!(
            SkipReason::MatchedSkipPattern.to_string(),
            "matched skip pattern"
        );
        assert_eq!(
            SkipReason::UnrecognizedExtension.to_string(),
            "unrecognized extension"
        );
    }
}
