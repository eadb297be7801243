//! Default values for ontograph configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Ontology Defaults
// ============================================================================

/// Namespace of the default ontology (Gene Ontology).
pub const DEFAULT_NAMESPACE: &str = "GO";

/// Directory holding the ontology source files.
pub const DEFAULT_SOURCE_DIR: &str = "data";

/// Compute every ancestor closure right after loading.
pub const DEFAULT_WARM_UP: bool = true;

/// Term definitions file inside the source directory.
pub const TERMS_FILE: &str = "terms.tsv";

/// Relation (edge) file inside the source directory.
pub const RELATIONS_FILE: &str = "relations.tsv";

/// Subset membership file inside the source directory.
pub const SUBSETS_FILE: &str = "subsets.tsv";

// ============================================================================
// Slim Defaults
// ============================================================================

/// Relation filter used for slim ancestry: is_a, identity, part_of, occurs_in.
pub const DEFAULT_SLIM_RELATIONS: &str = "I=PO";

// ============================================================================
// Config File Locations
// ============================================================================

/// Project-local configuration file.
pub const LOCAL_CONFIG_FILE: &str = "ontograph.toml";

/// Directory name under the user's config dir.
pub const USER_CONFIG_DIR: &str = "ontograph";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Environment Overrides
// ============================================================================

pub const ENV_NAMESPACE: &str = "ONTOGRAPH_NAMESPACE";
pub const ENV_SOURCE_DIR: &str = "ONTOGRAPH_SOURCE_DIR";
pub const ENV_ROOT_ID: &str = "ONTOGRAPH_ROOT_ID";
pub const ENV_RELATIONS: &str = "ONTOGRAPH_RELATIONS";
