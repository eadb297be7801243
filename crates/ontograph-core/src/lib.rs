pub mod config;
pub mod container;
pub mod loader;
pub mod ontology;
pub mod relation;
pub mod termset;

pub use config::{Config, ConfigError, OntologyConfig, SlimConfig};
pub use container::TermContainer;
pub use loader::OntologyLoader;
pub use ontology::{
    Ontology, OntologyBuilder, OntologyError, Term, TermIdx, TermRecord, TermSummary,
};
pub use relation::{Polarity, RelationError, RelationSet, RelationType, TermRelation};
pub use termset::{CodecError, TermSet};
