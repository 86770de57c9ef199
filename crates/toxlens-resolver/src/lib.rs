//! ToxLens Resolver
//!
//! Compound-name to SMILES resolution, isolated from the explanation
//! core so the engine stays testable without network access.
//!
//! Three collaborators sit behind one polymorphic trait:
//! - PubChem direct property lookup (name -> IsomericSMILES)
//! - PubChem CID lookup (name -> CID -> IsomericSMILES)
//! - OPSIN systematic-name parsing
//!
//! plus a fallback chain that tries them in order. Also home to the input
//! heuristics: deciding whether a query already is a SMILES string, and
//! picking the main fragment of a salt or mixture.

pub mod chain;
pub mod opsin;
pub mod pubchem;
pub mod resolver;
pub mod smiles;

pub use chain::FallbackResolver;
pub use opsin::OpsinResolver;
pub use pubchem::{PubChemCidResolver, PubChemPropertyResolver};
pub use resolver::{build_client, ResolveError, ResolvedSmiles, SmilesResolver};
pub use smiles::{largest_fragment, looks_like_smiles};
