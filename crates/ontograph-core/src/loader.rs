//! Flat-file ontology loader.
//!
//! Reads a source directory of tab-separated files:
//!
//! ```text
//! terms.tsv       id  name  is_obsolete(Y/N)  [code]
//! relations.tsv   child_id  parent_id  relation
//! subsets.tsv     id  subset  type            (only SLIM rows are used)
//! ```
//!
//! Blank lines and lines starting with `!` or `#` are ignored. Only
//! `terms.tsv` is required.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{OntologyConfig, RELATIONS_FILE, SUBSETS_FILE, TERMS_FILE};
use crate::ontology::{Ontology, OntologyBuilder, OntologyError, TermRecord};
use crate::relation::RelationType;

/// Subset rows of this type define slims.
const SLIM_SUBSET_TYPE: &str = "SLIM";

/// Loads an [`Ontology`] from a source directory.
#[derive(Debug, Clone)]
pub struct OntologyLoader {
    source_dir: PathBuf,
    namespace: String,
    root_id: Option<String>,
    warm_up: bool,
}

impl OntologyLoader {
    pub fn new(source_dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            namespace: namespace.into(),
            root_id: None,
            warm_up: false,
        }
    }

    pub fn from_config(config: &OntologyConfig) -> Self {
        Self {
            source_dir: PathBuf::from(&config.source_dir),
            namespace: config.namespace.clone(),
            root_id: config.root_id.clone(),
            warm_up: config.warm_up,
        }
    }

    /// Edges whose parent is this term are not loaded.
    pub fn with_root(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = Some(root_id.into());
        self
    }

    /// Compute every ancestor closure right after loading.
    pub fn with_warm_up(mut self, warm_up: bool) -> Self {
        self.warm_up = warm_up;
        self
    }

    pub fn load(&self) -> Result<Ontology, OntologyError> {
        let mut builder = OntologyBuilder::new(&self.namespace);

        let terms = self.source_dir.join(TERMS_FILE);
        for (line, row) in read_rows(&terms)? {
            let [id, name, obsolete] = columns(&terms, line, &row)?;
            let mut record = TermRecord::new(id, name);
            record.is_obsolete = obsolete == "Y";
            if let Some(code) = row.get(3).filter(|c| !c.is_empty()) {
                record.code = Some(code.parse().map_err(|_| OntologyError::Malformed {
                    path: terms.clone(),
                    line,
                    message: format!("invalid term code {code:?}"),
                })?);
            }
            builder.add_term(record)?;
        }

        let relations = self.source_dir.join(RELATIONS_FILE);
        if relations.exists() {
            self.load_relations(&mut builder, &relations)?;
        }

        let subsets = self.source_dir.join(SUBSETS_FILE);
        if subsets.exists() {
            load_subsets(&mut builder, &subsets)?;
        }

        let ontology = builder.build()?;
        info!(
            namespace = %ontology.namespace(),
            terms = ontology.len(),
            source = %self.source_dir.display(),
            "loaded ontology"
        );

        if self.warm_up {
            ontology.warm_up();
        }
        Ok(ontology)
    }

    fn load_relations(
        &self,
        builder: &mut OntologyBuilder,
        path: &Path,
    ) -> Result<(), OntologyError> {
        for (line, row) in read_rows(path)? {
            let [child, parent, token] = columns(path, line, &row)?;
            if self.root_id.as_deref() == Some(parent) {
                continue;
            }
            if !builder.contains(child) || !builder.contains(parent) {
                debug!(child, parent, line, "relation names an unknown term, skipping");
                continue;
            }
            let relation = RelationType::by_code(token).map_err(|e| OntologyError::Malformed {
                path: path.to_path_buf(),
                line,
                message: e.to_string(),
            })?;
            builder.add_relation(child, parent, relation)?;
        }
        Ok(())
    }
}

fn load_subsets(builder: &mut OntologyBuilder, path: &Path) -> Result<(), OntologyError> {
    for (line, row) in read_rows(path)? {
        let [id, subset, kind] = columns(path, line, &row)?;
        if kind != SLIM_SUBSET_TYPE {
            continue;
        }
        if !builder.contains(id) {
            debug!(id, subset, line, "subset member is not a known term, skipping");
            continue;
        }
        builder.add_to_subset(subset, id)?;
    }
    Ok(())
}

/// Non-comment rows split on tabs, paired with their 1-based line number.
fn read_rows(path: &Path) -> Result<Vec<(usize, Vec<String>)>, OntologyError> {
    let content = fs::read_to_string(path).map_err(|e| OntologyError::io(path, e))?;
    Ok(content
        .lines()
        .enumerate()
        .filter(|(_, l)| {
            let trimmed = l.trim();
            !trimmed.is_empty() && !trimmed.starts_with('!') && !trimmed.starts_with('#')
        })
        .map(|(i, l)| (i + 1, l.split('\t').map(|c| c.trim().to_string()).collect()))
        .collect())
}

/// The first three columns of a row.
fn columns<'r>(
    path: &Path,
    line: usize,
    row: &'r [String],
) -> Result<[&'r str; 3], OntologyError> {
    match row {
        [a, b, c, ..] => Ok([a.as_str(), b.as_str(), c.as_str()]),
        _ => Err(OntologyError::Malformed {
            path: path.to_path_buf(),
            line,
            message: format!("expected at least 3 columns, found {}", row.len()),
        }),
    }
}
