use crate::catalog::{Catalog, Category, Video};

/// One "Up Next" group: a category and its videos minus the bound one.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationGroup<'a> {
    pub category: &'a Category,
    pub videos: Vec<&'a Video>,
}

/// Every catalog video except `current`, grouped by category in catalog order.
///
/// Exclusion is by slug, so a video listed under several categories is
/// removed from all of them. Groups left empty are dropped.
pub fn recommendations<'a>(catalog: &'a Catalog, current: &Video) -> Vec<RecommendationGroup<'a>> {
    catalog
        .sections
        .iter()
        .filter_map(|section| {
            let videos: Vec<&Video> = section
                .contents
                .iter()
                .filter(|v| !v.same_as(current))
                .collect();
            (!videos.is_empty()).then_some(RecommendationGroup {
                category: &section.category,
                videos,
            })
        })
        .collect()
}

/// Flattened `recommendations`, in display order.
pub fn recommended_videos<'a>(catalog: &'a Catalog, current: &Video) -> Vec<&'a Video> {
    recommendations(catalog, current)
        .into_iter()
        .flat_map(|g| g.videos)
        .collect()
}
