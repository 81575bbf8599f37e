use crate::catalog::{Catalog, CatalogSection, Category, Video};

use super::filter::{CategoryFilter, ALL_LABEL};

/// A selectable category pill in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill<'a> {
    pub label: &'a str,
    pub selected: bool,
}

/// Filter selection plus a cursor over the displayed cards.
///
/// The cursor indexes the flattened card list of the displayed sections, so it
/// is only meaningful together with the current filter. Changing the filter
/// resets it.
#[derive(Debug, Clone, Default)]
pub struct FeedView {
    filter: CategoryFilter,
    selected_card: usize,
}

impl FeedView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn selected_index(&self) -> usize {
        self.selected_card
    }

    /// Sections to display under the current filter.
    pub fn displayed_sections<'a>(&self, catalog: &'a Catalog) -> Vec<&'a CatalogSection> {
        self.filter.apply(&catalog.sections)
    }

    /// Displayed cards in order, each with the category it is shown under.
    pub fn cards<'a>(&self, catalog: &'a Catalog) -> Vec<(&'a Category, &'a Video)> {
        self.displayed_sections(catalog)
            .into_iter()
            .flat_map(|s| s.contents.iter().map(move |v| (&s.category, v)))
            .collect()
    }

    /// Pill bar: "All" followed by every category, exactly one selected.
    pub fn pills<'a>(&'a self, catalog: &'a Catalog) -> Vec<Pill<'a>> {
        let current = self.filter.label();
        std::iter::once(ALL_LABEL)
            .chain(catalog.category_names())
            .map(|label| Pill {
                label,
                selected: label == current,
            })
            .collect()
    }

    /// Switch the filter. Returns false if it was already active.
    pub fn select_filter(&mut self, filter: CategoryFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        tracing::debug!(from = %self.filter, to = %filter, "Category filter changed");
        self.filter = filter;
        self.selected_card = 0;
        true
    }

    pub fn next_pill(&mut self, catalog: &Catalog) -> bool {
        self.step_pill(catalog, 1)
    }

    pub fn prev_pill(&mut self, catalog: &Catalog) -> bool {
        self.step_pill(catalog, -1)
    }

    fn step_pill(&mut self, catalog: &Catalog, delta: isize) -> bool {
        let labels: Vec<&str> = std::iter::once(ALL_LABEL)
            .chain(catalog.category_names())
            .collect();
        let current = labels
            .iter()
            .position(|l| *l == self.filter.label())
            .unwrap_or(0);
        let len = labels.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        self.select_filter(CategoryFilter::from_label(labels[next]))
    }

    pub fn nav_down(&mut self, catalog: &Catalog) {
        let count = self.cards(catalog).len();
        if count > 0 && self.selected_card + 1 < count {
            self.selected_card += 1;
        }
    }

    pub fn nav_up(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
    }

    /// Move the cursor to a card index, clamped to the displayed cards.
    pub fn select_card(&mut self, index: usize, catalog: &Catalog) {
        let count = self.cards(catalog).len();
        self.selected_card = index.min(count.saturating_sub(1));
    }

    /// Card under the cursor, if any cards are displayed.
    pub fn selected_card<'a>(&self, catalog: &'a Catalog) -> Option<(&'a Category, &'a Video)> {
        self.cards(catalog).get(self.selected_card).copied()
    }
}
