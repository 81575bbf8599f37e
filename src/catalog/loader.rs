//! Catalog file loading.
//!
//! The catalog is a JSON document of the form
//! `{ "categories": [ { "category": {...}, "contents": [...] } ] }`.
//! Loading checks the few invariants the rest of the crate relies on
//! (unique slugs and category names, no category shadowing the "All" filter) and normalizes
//! media URLs.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::media_url::normalize_media_url;
use super::types::Catalog;
use crate::feed::ALL_LABEL;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog file too large: {0}")]
    TooLarge(String),

    #[error("Duplicate category slug '{0}'")]
    DuplicateCategory(String),

    #[error("Duplicate category name '{0}'")]
    DuplicateCategoryName(String),

    #[error("Duplicate video slug '{slug}' in category '{category}'")]
    DuplicateVideo { category: String, slug: String },

    #[error("Category name '{0}' is reserved for the all-categories filter")]
    ReservedName(String),
}

impl Catalog {
    /// Maximum catalog file size (4 MB).
    const MAX_FILE_SIZE: u64 = 4 * 1_048_576;

    /// Load and validate a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(CatalogError::TooLarge(format!(
                    "Catalog file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(CatalogError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;

        tracing::info!(
            path = %path.display(),
            categories = catalog.sections.len(),
            videos = catalog.video_count(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse, validate and normalize a catalog from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;

        for video in catalog.sections.iter_mut().flat_map(|s| s.contents.iter_mut()) {
            let normalized = normalize_media_url(&video.media_url);
            if normalized != video.media_url {
                tracing::debug!(slug = %video.slug, url = %normalized, "Normalized media URL");
                video.media_url = normalized.into_owned();
            }
        }

        if catalog.is_empty() {
            tracing::warn!("Catalog contains no categories");
        }
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut category_slugs = HashSet::with_capacity(self.sections.len());
        // Names key the feed filter, so they must be unique too.
        let mut category_names = HashSet::with_capacity(self.sections.len());

        for section in &self.sections {
            let category = &section.category;
            if category.name == ALL_LABEL {
                return Err(CatalogError::ReservedName(category.name.clone()));
            }
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.slug.clone()));
            }
            if !category_names.insert(category.name.as_str()) {
                return Err(CatalogError::DuplicateCategoryName(category.name.clone()));
            }

            let mut video_slugs = HashSet::with_capacity(section.contents.len());
            for video in &section.contents {
                if !video_slugs.insert(video.slug.as_str()) {
                    return Err(CatalogError::DuplicateVideo {
                        category: category.name.clone(),
                        slug: video.slug.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("clipdeck_catalog_test_{}", name));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("catalog.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    const VALID: &str = r#"{
        "categories": [
            {
                "category": {"slug": "music", "name": "Music", "iconUrl": ""},
                "contents": [
                    {"slug": "a", "title": "A", "thumbnailUrl": "",
                     "mediaUrl": "https://www.youtube.com/embed/AAA"},
                    {"slug": "b", "title": "B", "mediaUrl": "https://v.example/b"}
                ]
            },
            {
                "category": {"slug": "news", "name": "News", "iconUrl": ""},
                "contents": [
                    {"slug": "c", "title": "C", "mediaUrl": "https://v.example/c"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_valid_file() {
        let path = write_temp("valid", VALID);
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.sections.len(), 2);
        assert_eq!(catalog.video_count(), 3);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_embed_urls_normalized_on_load() {
        let catalog = Catalog::from_json(VALID).unwrap();
        assert_eq!(
            catalog.find_video("a").unwrap().media_url,
            "https://www.youtube.com/watch?v=AAA"
        );
        assert_eq!(catalog.find_video("b").unwrap().media_url, "https://v.example/b");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = Path::new("/tmp/clipdeck_catalog_does_not_exist.json");
        let err = Catalog::load(path).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.to_string().contains("Invalid catalog JSON"));
    }

    #[test]
    fn test_duplicate_video_in_category_rejected() {
        let json = r#"{"categories": [{
            "category": {"slug": "m", "name": "Music"},
            "contents": [
                {"slug": "a", "title": "A", "mediaUrl": "x"},
                {"slug": "a", "title": "A again", "mediaUrl": "y"}
            ]
        }]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateVideo { ref slug, .. } if slug == "a"));
    }

    #[test]
    fn test_same_video_in_two_categories_allowed() {
        let json = r#"{"categories": [
            {"category": {"slug": "m", "name": "Music"},
             "contents": [{"slug": "a", "title": "A", "mediaUrl": "x"}]},
            {"category": {"slug": "n", "name": "News"},
             "contents": [{"slug": "a", "title": "A", "mediaUrl": "x"}]}
        ]}"#;
        assert!(Catalog::from_json(json).is_ok());
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let json = r#"{"categories": [
            {"category": {"slug": "m", "name": "Music"}},
            {"category": {"slug": "m", "name": "More Music"}}
        ]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(_)));
    }

    #[test]
    fn test_reserved_all_name_rejected() {
        let json = r#"{"categories": [{"category": {"slug": "all", "name": "All"}}]}"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(matches!(err, CatalogError::ReservedName(_)));
    }

    #[test]
    fn test_empty_catalog_accepted() {
        let catalog = Catalog::from_json(r#"{"categories": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_too_large_file_rejected() {
        let path = write_temp("too_large", &" ".repeat(4 * 1_048_576 + 1));
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::TooLarge(_)));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
