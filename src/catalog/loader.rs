use crate::catalog::Catalog;
use crate::model::{ActivityRecord, CatalogError, Category};
use crate::normalizer::{RawRecord, normalize_all};
use futures::future::try_join_all;
use std::path::Path;
use tracing::{info, warn};

/// Loads the four collections concurrently and merges them into one catalog.
pub async fn load_catalog(dir: &Path) -> Result<Catalog, CatalogError> {
    let tasks = Category::ALL
        .iter()
        .map(|category| load_collection(dir, *category));
    let collections = try_join_all(tasks).await?;

    let records = collections.into_iter().flatten().collect();
    let catalog = Catalog::new(records);
    if catalog.is_empty() {
        warn!("Catalog in {} is empty, every recommendation will be empty", dir.display());
    }
    info!("📚 Catalog loaded: {} activities from {}", catalog.len(), dir.display());
    Ok(catalog)
}

async fn load_collection(
    dir: &Path,
    category: Category,
) -> Result<Vec<ActivityRecord>, CatalogError> {
    let path = dir.join(category.file_name());
    let path_str = path.display().to_string();

    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| CatalogError::Io {
            path: path_str.clone(),
            source,
        })?;
    let raw: Vec<RawRecord> =
        serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path_str.clone(),
            source,
        })?;

    let records = normalize_all(raw, category)?;
    info!("Loaded {} records from {}", records.len(), path_str);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_collections(dir: &Path, hackathons: &str) {
        fs::write(dir.join("hackathons.json"), hackathons).unwrap();
        fs::write(
            dir.join("essays.json"),
            r#"[{"id": 1, "title": "Эссе", "description": "d", "language": "Русский"}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("startups.json"),
            r#"[{"id": 1, "title": "Стартап", "description": "d", "organization": "Hub"}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("summer_programs.json"),
            r#"[{"id": 1, "title": "Лагерь", "description": "d", "age_limit": "14-17 лет"}]"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn loads_and_merges_all_collections() {
        let dir = tempfile::tempdir().unwrap();
        write_collections(
            dir.path(),
            r#"[{"id": 1, "title": "Хак 1", "description": "d", "ageLimit": "15-18 лет"},
                {"id": 2, "title": "Хак 2", "description": "d"}]"#,
        );

        let catalog = load_catalog(dir.path()).await.unwrap();
        let titles: Vec<_> = catalog.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Хак 1", "Хак 2", "Эссе", "Стартап", "Лагерь"]);
        assert_eq!(catalog.records()[3].organizer.as_deref(), Some("Hub"));
        assert_eq!(catalog.records()[4].age_limit.as_deref(), Some("14-17 лет"));
    }

    #[tokio::test]
    async fn missing_collection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hackathons.json"), "[]").unwrap();

        let err = load_catalog(dir.path()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[tokio::test]
    async fn malformed_collection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_collections(dir.path(), r#"{"not": "a list"}"#);

        let err = load_catalog(dir.path()).await.unwrap_err();
        assert!(matches!(err, CatalogError::Json { .. }));
    }

    #[tokio::test]
    async fn bundled_data_directory_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let catalog = load_catalog(&dir).await.unwrap();

        assert_eq!(catalog.len(), 11);
        assert!(catalog.records().iter().all(|r| !r.title.is_empty()));
        let locke = catalog.find(Category::Essays, "2").unwrap();
        assert_eq!(locke.language.as_deref(), Some("Английский"));
        assert_eq!(locke.organizer.as_deref(), Some("John Locke Institute"));
    }
}
