use serde::{Deserialize, Serialize};

/// A category header. `name` doubles as the filter key in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub icon_url: String,
}

/// A playable catalog entry.
///
/// `slug` is the video's identity: it keys list rows and is what the player
/// uses to exclude the bound video from its recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub media_url: String,
    /// Length hint used by the simulated media backend.
    #[serde(default, rename = "durationSeconds", skip_serializing_if = "Option::is_none")]
    pub duration_hint: Option<f64>,
}

impl Video {
    /// True if both values refer to the same catalog entry.
    pub fn same_as(&self, other: &Video) -> bool {
        self.slug == other.slug
    }
}

/// One category together with its ordered contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    pub category: Category,
    #[serde(default)]
    pub contents: Vec<Video>,
}

/// Ordered sequence of sections, as read from the catalog file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "categories", default)]
    pub sections: Vec<CatalogSection>,
}

impl Catalog {
    pub fn new(sections: Vec<CatalogSection>) -> Self {
        Self { sections }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of video entries across all sections.
    pub fn video_count(&self) -> usize {
        self.sections.iter().map(|s| s.contents.len()).sum()
    }

    /// Category names in display order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.category.name.as_str())
    }

    /// First video with the given slug, searching sections in order.
    pub fn find_video(&self, slug: &str) -> Option<&Video> {
        self.sections
            .iter()
            .flat_map(|s| s.contents.iter())
            .find(|v| v.slug == slug)
    }

    /// Category that first lists the video with the given slug.
    pub fn category_of(&self, slug: &str) -> Option<&Category> {
        self.sections
            .iter()
            .find(|s| s.contents.iter().any(|v| v.slug == slug))
            .map(|s| &s.category)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn video(slug: &str, title: &str) -> Video {
        Video {
            slug: slug.to_string(),
            title: title.to_string(),
            thumbnail_url: format!("https://img.example.com/{}.jpg", slug),
            media_url: format!("https://www.youtube.com/watch?v={}", slug),
            duration_hint: None,
        }
    }

    pub fn section(name: &str, videos: &[(&str, &str)]) -> CatalogSection {
        CatalogSection {
            category: Category {
                slug: name.to_lowercase(),
                name: name.to_string(),
                icon_url: String::new(),
            },
            contents: videos.iter().map(|(s, t)| video(s, t)).collect(),
        }
    }

    /// `Music: [a, b]`, `News: [c]`
    pub fn music_and_news() -> Catalog {
        Catalog::new(vec![
            section("Music", &[("a", "Song A"), ("b", "Song B")]),
            section("News", &[("c", "Headline C")]),
        ])
    }
}
