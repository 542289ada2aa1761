//! Per-country catalog of documents and their version links.
//!
//! The catalog is the handoff between the two CLI stages: the link scrape
//! writes it, the text extraction reads it back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the link scrape learned about one country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryCatalog {
    pub country: CountryMeta,
    pub documents: Vec<DocumentLinks>,
}

/// Provenance of one link-scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryMeta {
    pub name: String,
    pub code: u32,
    pub url: String,
    pub max_year: i32,
    pub all_files: bool,
    pub run_id: Uuid,
    pub scraped_at: DateTime<Utc>,
}

/// One document in the hierarchy with every version link found under it,
/// in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentLinks {
    pub title: String,
    pub versions: Vec<VersionLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionLink {
    pub title: String,
    pub url: String,
}

impl CountryCatalog {
    /// Write the catalog as pretty JSON to `<dir>/<country name>.json` and
    /// return the path written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.json", self.country.name));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write catalog: {}", path.display()))?;
        Ok(path)
    }

    /// Read a catalog back from a JSON file.
    pub fn load(path: &Path) -> Result<CountryCatalog> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog: {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("malformed catalog: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_preserves_documents() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CountryCatalog {
            country: CountryMeta {
                name: "Eastasia".to_string(),
                code: 86,
                url: "https://heinonline.org/HOL/Index?collection=cow&country=86".to_string(),
                max_year: 2024,
                all_files: false,
                run_id: Uuid::new_v4(),
                scraped_at: Utc::now(),
            },
            documents: vec![DocumentLinks {
                title: "Constitution of 1987".to_string(),
                versions: vec![VersionLink {
                    title: "1987 Original".to_string(),
                    url: "https://heinonline.org/HOL/Page?handle=hein.cow/zzea0001&id=1"
                        .to_string(),
                }],
            }],
        };

        let path = catalog.save(dir.path()).unwrap();
        assert!(path.ends_with("Eastasia.json"));

        let loaded = CountryCatalog::load(&path).unwrap();
        assert_eq!(loaded.country.code, 86);
        assert_eq!(loaded.documents.len(), 1);
        assert_eq!(loaded.documents[0].versions[0].title, "1987 Original");
    }
}
