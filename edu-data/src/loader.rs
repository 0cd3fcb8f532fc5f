//! Static catalog loading.
//!
//! ## Files
//!
//! A catalog is five JSON arrays. The bundled copy is compiled into the
//! binary; [`Catalog::from_dir`] reads the same file names from disk.
//!
//! | File | Element | Consumed fields |
//! |------|---------|-----------------|
//! | `service.json` | [`Service`] | `id`, `title`, `price`, `discount` (or `discout`) |
//! | `subject.json` | [`SubjectCategory`] | `id`, `area`, `details[].id`, `details[].detail` |
//! | `pass.json` | [`Pass`] | `id`, `title`, `description`, `benefits`, `isBest`, `icon` |
//! | `qna.json` | [`QnaEntry`] | `id`, `question`, `answer` |
//! | `cart_items.json` | [`CartLine`] | `id`, `serviceId` |
//!
//! ### Minimal `service.json`
//!
//! ```json
//! [{ "id": 1, "price": "10,000", "discount": 0.2 }]
//! ```

use std::path::{Path, PathBuf};

use edu_core::flow::service_for_pass;
use edu_core::{CartLine, Pass, QnaEntry, Service, SubjectCategory};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub const SERVICE_FILE: &str = "service.json";
pub const SUBJECT_FILE: &str = "subject.json";
pub const PASS_FILE: &str = "pass.json";
pub const QNA_FILE: &str = "qna.json";
pub const CART_FILE: &str = "cart_items.json";

const BUNDLED_SERVICES: &str = include_str!("../data/service.json");
const BUNDLED_SUBJECTS: &str = include_str!("../data/subject.json");
const BUNDLED_PASSES: &str = include_str!("../data/pass.json");
const BUNDLED_QNA: &str = include_str!("../data/qna.json");
const BUNDLED_CART: &str = include_str!("../data/cart_items.json");

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file} is not valid: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file} contains id {id} more than once")]
    DuplicateId { file: &'static str, id: u32 },
}

/// Cross-file problems that do not stop the catalog from loading but would
/// fail a cart or flow operation later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("cart line {line_id} references unknown service {service_id}")]
    UnknownCartService { line_id: u32, service_id: u32 },

    #[error("pass {0} has no service mapping")]
    UnmappedPass(u32),

    #[error("pass {pass_id} maps to service {service_id}, which is not in the catalog")]
    MissingPassService { pass_id: u32, service_id: u32 },

    #[error("service {service_id} has an unreadable price '{price}'")]
    InvalidPrice { service_id: u32, price: String },
}

/// Raw JSON text of each catalog file.
#[derive(Debug, Clone, Copy)]
pub struct CatalogSources<'a> {
    pub services: &'a str,
    pub subjects: &'a str,
    pub passes: &'a str,
    pub qna: &'a str,
    pub cart_items: &'a str,
}

/// Read-only catalog data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub services: Vec<Service>,
    pub subjects: Vec<SubjectCategory>,
    pub passes: Vec<Pass>,
    pub qna: Vec<QnaEntry>,
    pub cart_items: Vec<CartLine>,
}

fn parse_file<T: DeserializeOwned>(
    file: &'static str,
    text: &str,
) -> Result<Vec<T>, CatalogError> {
    serde_json::from_str(text).map_err(|source| CatalogError::Parse { file, source })
}

fn ensure_unique(
    file: &'static str,
    ids: impl Iterator<Item = u32>,
) -> Result<(), CatalogError> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { file, id });
        }
    }
    Ok(())
}

impl Catalog {
    /// The catalog compiled into this crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_sources(CatalogSources {
            services: BUNDLED_SERVICES,
            subjects: BUNDLED_SUBJECTS,
            passes: BUNDLED_PASSES,
            qna: BUNDLED_QNA,
            cart_items: BUNDLED_CART,
        })
    }

    /// Parses and validates every file.
    ///
    /// # Errors
    ///
    /// * [`CatalogError::Parse`] naming the first file that is not valid JSON
    ///   of the expected shape.
    /// * [`CatalogError::DuplicateId`] if a file repeats an id.
    pub fn from_sources(sources: CatalogSources<'_>) -> Result<Self, CatalogError> {
        let catalog = Self {
            services: parse_file(SERVICE_FILE, sources.services)?,
            subjects: parse_file(SUBJECT_FILE, sources.subjects)?,
            passes: parse_file(PASS_FILE, sources.passes)?,
            qna: parse_file(QNA_FILE, sources.qna)?,
            cart_items: parse_file(CART_FILE, sources.cart_items)?,
        };
        catalog.validate()?;

        debug!(
            services = catalog.services.len(),
            subjects = catalog.subjects.len(),
            passes = catalog.passes.len(),
            qna = catalog.qna.len(),
            cart_items = catalog.cart_items.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Reads the five catalog files from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
        };

        let services = read(SERVICE_FILE)?;
        let subjects = read(SUBJECT_FILE)?;
        let passes = read(PASS_FILE)?;
        let qna = read(QNA_FILE)?;
        let cart_items = read(CART_FILE)?;

        Self::from_sources(CatalogSources {
            services: &services,
            subjects: &subjects,
            passes: &passes,
            qna: &qna,
            cart_items: &cart_items,
        })
    }

    /// Rejects repeated ids within a file.
    pub fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique(SERVICE_FILE, self.services.iter().map(|s| s.id))?;
        ensure_unique(SUBJECT_FILE, self.subjects.iter().map(|s| s.id))?;
        ensure_unique(
            SUBJECT_FILE,
            self.subjects.iter().flat_map(|s| s.details.iter().map(|d| d.id)),
        )?;
        ensure_unique(PASS_FILE, self.passes.iter().map(|p| p.id))?;
        ensure_unique(QNA_FILE, self.qna.iter().map(|q| q.id))?;
        ensure_unique(CART_FILE, self.cart_items.iter().map(|c| c.id))?;
        Ok(())
    }

    /// Cross-file checks over cart joins, pass mappings and prices.
    pub fn issues(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        for line in &self.cart_items {
            if self.service(line.service_id).is_none() {
                issues.push(CatalogIssue::UnknownCartService {
                    line_id: line.id,
                    service_id: line.service_id,
                });
            }
        }

        for pass in &self.passes {
            match service_for_pass(pass.id) {
                None => issues.push(CatalogIssue::UnmappedPass(pass.id)),
                Some(service_id) if self.service(service_id).is_none() => {
                    issues.push(CatalogIssue::MissingPassService {
                        pass_id: pass.id,
                        service_id,
                    });
                }
                Some(_) => {}
            }
        }

        for service in &self.services {
            if edu_core::pricing::common::parse_price(&service.price).is_err() {
                issues.push(CatalogIssue::InvalidPrice {
                    service_id: service.id,
                    price: service.price.clone(),
                });
            }
        }

        issues
    }

    pub fn service(
        &self,
        id: u32,
    ) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Service at a fixed catalog position (detail pages pick by ordinal).
    pub fn service_at(
        &self,
        index: usize,
    ) -> Option<&Service> {
        self.services.get(index)
    }

    pub fn pass(
        &self,
        id: u32,
    ) -> Option<&Pass> {
        self.passes.iter().find(|p| p.id == id)
    }

    /// Whether `detail` is a selectable subject in any area.
    pub fn has_subject(
        &self,
        detail: &str,
    ) -> bool {
        self.subjects.iter().any(|c| c.contains(detail))
    }
}
