// Catalog module: immutable merged collections, loaded once at startup.

pub mod loader;

use crate::model::{ActivityRecord, Category};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub use loader::load_catalog;

/// Detail lookups by bare id search the collections in this order.
const DETAIL_LOOKUP_ORDER: [Category; 4] = [
    Category::SummerPrograms,
    Category::Hackathons,
    Category::Essays,
    Category::Startups,
];

/// Read-only merged catalog. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<ActivityRecord>,
    loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub slug: String,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub count: usize,
}

impl Catalog {
    /// Builds the catalog from already normalized records. Records are
    /// ordered by `Category::ALL`, keeping source order inside a collection.
    pub fn new(mut records: Vec<ActivityRecord>) -> Self {
        records.sort_by_key(|r| Category::ALL.iter().position(|c| *c == r.category));
        Self {
            records,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn by_category(&self, category: Category) -> Vec<&ActivityRecord> {
        self.records
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn categories(&self) -> Vec<CategorySummary> {
        Category::ALL
            .iter()
            .map(|c| CategorySummary {
                slug: c.slug(),
                name: c.display_name(),
                title: c.title(),
                description: c.description(),
                count: self.records.iter().filter(|r| r.category == *c).count(),
            })
            .collect()
    }

    /// Exact lookup inside one collection.
    pub fn find(&self, category: Category, id: &str) -> Option<&ActivityRecord> {
        self.records
            .iter()
            .find(|r| r.category == category && r.id == id)
    }

    /// Ids are only unique within a collection; the first hit in
    /// `DETAIL_LOOKUP_ORDER` wins.
    pub fn find_by_id(&self, id: &str) -> Option<&ActivityRecord> {
        DETAIL_LOOKUP_ORDER
            .iter()
            .find_map(|category| self.find(*category, id))
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            record("1", Category::SummerPrograms, "Summer 1"),
            record("1", Category::Hackathons, "Hack 1"),
            record("2", Category::Hackathons, "Hack 2"),
            record("1", Category::Startups, "Startup 1"),
            record("5", Category::Essays, "Essay 5"),
        ])
    }

    #[test]
    fn records_follow_collection_merge_order() {
        let catalog = sample();
        let titles: Vec<_> = catalog.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Hack 1", "Hack 2", "Essay 5", "Startup 1", "Summer 1"]);
    }

    #[test]
    fn find_by_id_prefers_summer_programs() {
        let catalog = sample();
        assert_eq!(catalog.find_by_id("1").unwrap().title, "Summer 1");
        assert_eq!(catalog.find_by_id("5").unwrap().title, "Essay 5");
        assert!(catalog.find_by_id("42").is_none());
    }

    #[test]
    fn find_is_scoped_to_category() {
        let catalog = sample();
        assert_eq!(catalog.find(Category::Startups, "1").unwrap().title, "Startup 1");
        assert!(catalog.find(Category::Essays, "1").is_none());
    }

    #[test]
    fn categories_report_counts() {
        let catalog = sample();
        let summary = catalog.categories();
        assert_eq!(summary.len(), 4);
        assert_eq!(summary[0].slug, "хакатоны");
        assert_eq!(summary[0].count, 2);
        assert_eq!(summary[3].slug, "летние-программы");
        assert_eq!(summary[3].count, 1);
    }
}
