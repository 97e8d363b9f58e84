//! Initial dataset loading.
//!
//! The resort starts from two static JSON arrays, one per collection
//! (`data/lifts.json` and `data/trails.json` by default). Loading checks
//! id uniqueness per collection; dangling cross-references are logged
//! and kept.

use std::path::{Path, PathBuf};

use snowtooth_types::{Lift, Trail};
use tracing::info;

use crate::error::ResortError;
use crate::resolver;
use crate::store::{EntityStore, Resort};

/// The raw entity lists read at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    /// Lifts in file order.
    pub lifts: Vec<Lift>,
    /// Trails in file order.
    pub trails: Vec<Trail>,
}

impl Dataset {
    /// Read both collections from JSON files.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::Io`] if a file cannot be read, or
    /// [`ResortError::Json`] if its contents do not match the entity shape.
    pub fn from_files(lifts_path: &Path, trails_path: &Path) -> Result<Self, ResortError> {
        let lifts = read_json(lifts_path)?;
        let trails = read_json(trails_path)?;
        info!(
            lifts_path = %lifts_path.display(),
            trails_path = %trails_path.display(),
            "dataset files loaded"
        );
        Ok(Self { lifts, trails })
    }

    /// Parse both collections from in-memory JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::Json`] if either document is malformed.
    pub fn from_json(lifts: &str, trails: &str) -> Result<Self, ResortError> {
        Ok(Self {
            lifts: parse_json(lifts, Path::new("<lifts>"))?,
            trails: parse_json(trails, Path::new("<trails>"))?,
        })
    }

    /// Validate ids and build the in-memory [`Resort`].
    ///
    /// # Errors
    ///
    /// Returns [`ResortError::DuplicateId`] if a collection repeats an id.
    pub fn into_resort(self) -> Result<Resort, ResortError> {
        let resort = Resort::new(EntityStore::new(self.lifts)?, EntityStore::new(self.trails)?);
        let dangling = resolver::dangling_references(&resort).len();
        info!(
            lifts = resort.lifts().len(),
            trails = resort.trails().len(),
            dangling,
            "dataset validated"
        );
        Ok(resort)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ResortError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ResortError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&contents, path)
}

fn parse_json<T: serde::de::DeserializeOwned>(contents: &str, label: &Path) -> Result<T, ResortError> {
    serde_json::from_str(contents).map_err(|source| ResortError::Json {
        path: PathBuf::from(label),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use snowtooth_types::Status;

    use super::*;

    const LIFTS: &str = r#"[
        {"id":"panorama","name":"Panorama","status":"OPEN","capacity":6,"night":false,"elevation":8000,"trails":["blue-bird"]},
        {"id":"summit","name":"Summit","status":"HOLD","capacity":4,"elevation":9200,"trails":[]}
    ]"#;

    const TRAILS: &str = r#"[
        {"id":"blue-bird","name":"Blue Bird","status":"OPEN","capacity":60,"elevation":7800,"lifts":["panorama","gondola"]}
    ]"#;

    #[test]
    fn parses_both_collections_in_order() {
        let dataset = Dataset::from_json(LIFTS, TRAILS).unwrap();
        assert_eq!(dataset.lifts.len(), 2);
        assert_eq!(dataset.lifts[1].status, Status::Hold);
        assert_eq!(dataset.lifts[1].night, None);
        assert_eq!(dataset.trails[0].lifts.len(), 2);
    }

    #[test]
    fn dangling_references_do_not_fail_loading() {
        let resort = Dataset::from_json(LIFTS, TRAILS).unwrap().into_resort().unwrap();
        assert_eq!(resort.trails().len(), 1);
    }

    #[test]
    fn out_of_domain_status_is_rejected_at_load() {
        let bad = r#"[{"id":"x","name":"X","status":"MELTED","capacity":1,"elevation":1}]"#;
        let err = Dataset::from_json(bad, "[]").unwrap_err();
        assert!(matches!(err, ResortError::Json { .. }));
    }

    #[test]
    fn collections_swapped_between_files_are_rejected() {
        let err = Dataset::from_json(TRAILS, LIFTS).unwrap_err();
        assert!(matches!(err, ResortError::Json { ref path, .. } if path == Path::new("<lifts>")));
    }

    #[test]
    fn duplicate_ids_fail_validation() {
        let dupes = r#"[
            {"id":"summit","name":"Summit","status":"OPEN","capacity":4,"elevation":9200},
            {"id":"summit","name":"Summit Again","status":"CLOSED","capacity":4,"elevation":9200}
        ]"#;
        let err = Dataset::from_json(dupes, "[]").unwrap().into_resort().unwrap_err();
        assert!(matches!(err, ResortError::DuplicateId { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Dataset::from_files(Path::new("does/not/exist.json"), Path::new("x.json"))
            .unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
