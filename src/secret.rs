//! The fixed signing secret shared with the CDN edge.

/// Secret appended as the final field of every string-to-sign.
///
/// The upstream client derives this at runtime through an obfuscated chain:
/// lowercase the fragment "DOT", append "net", prefix the result with "lt_",
/// then split on the underscore and rejoin with "fc" in between. The chain
/// has no semantic purpose beyond producing this one constant, so it is
/// flattened here; the test below re-runs the derivation to pin the value.
pub(crate) const SIGNING_SECRET: &str = "ltfcdotnet";
