//! SMILES input heuristics
//!
//! The core treats any string as valid vectorizer input; these helpers
//! only decide how to route a query (resolve the name or use it as-is)
//! and which fragment of a salt/mixture to predict on.

/// Minimum length before a query is considered a pasted SMILES rather
/// than a short compound name
const MIN_SMILES_LEN: usize = 6;

/// Characters that appear in SMILES structure notation but rarely in
/// compound names
const STRUCTURAL_CHARS: &str = "=#[]()\\/+-@0123456789";

/// Crude test for whether a query is already a SMILES string.
///
/// Deliberately permissive: a false positive just means the vectorizer
/// sees a name (and likely finds nothing), never a crash.
pub fn looks_like_smiles(text: &str) -> bool {
    let t = text.trim();
    t.chars().count() >= MIN_SMILES_LEN && t.chars().any(|c| STRUCTURAL_CHARS.contains(c))
}

/// Pick the main component of a salt or mixture SMILES.
///
/// Components are '.'-separated; the longest one (first on ties) is
/// taken to be the parent structure, counter-ions and solvents being
/// short. A string without '.' comes back unchanged (trimmed).
pub fn largest_fragment(smiles: &str) -> &str {
    smiles
        .trim()
        .split('.')
        .fold("", |best, fragment| {
            if fragment.chars().count() > best.chars().count() {
                fragment
            } else {
                best
            }
        })
}
