//! Deciding whether canonical and remote records denote the same entity.
//!
//! No platform shares a stable identifier with the canonical profile, so
//! matching is deterministic best-effort text matching: the canonical name
//! is stripped of corporate-suffix noise and the first remote entry whose
//! name *contains* it as a substring wins. One-directional containment is
//! used instead of edit-distance similarity for predictability — a
//! canonical "Acme" must match a remote "(Inc.) Acme Korea" without false
//! positives across unrelated legal entity names.
//!
//! First match wins; multiple candidates are not ranked and ties are not
//! disambiguated by date-range overlap. That limitation is deliberate and
//! pinned by tests.

use profile_model::{
    CareerEntry, CertificationEntry, EducationRecord, RemoteActivity, RemoteCareer,
    RemoteEducation,
};

/// Corporate-suffix noise tokens stripped from canonical company names
/// before matching.
const CORPORATE_NOISE: [&str; 6] = ["(주)", "주식회사", "(Inc.)", "Inc.", "Ltd.", "Co."];

/// Strip known corporate-suffix noise tokens and trim.
pub fn strip_corporate_noise(name: &str) -> String {
    let mut cleaned = name.to_string();
    for token in CORPORATE_NOISE {
        cleaned = cleaned.replace(token, "");
    }
    cleaned.trim().to_string()
}

/// Find the remote career matching a canonical one, if any.
///
/// Matches the first remote entry whose company name contains the
/// noise-stripped canonical company name. An empty canonical name matches
/// nothing — an empty needle would be a substring of everything.
pub fn match_career<'r>(
    canonical: &CareerEntry,
    remote: &'r [RemoteCareer],
) -> Option<&'r RemoteCareer> {
    let needle = strip_corporate_noise(&canonical.company);
    if needle.is_empty() {
        return None;
    }
    remote.iter().find(|r| r.company_name.contains(&needle))
}

/// Find the remote education record matching a canonical one, if any.
pub fn match_education<'r>(
    canonical: &EducationRecord,
    remote: &'r [RemoteEducation],
) -> Option<&'r RemoteEducation> {
    let needle = canonical.school.trim();
    if needle.is_empty() {
        return None;
    }
    remote.iter().find(|r| r.school_name.contains(needle))
}

/// Find the remote activity matching a canonical certification, if any.
pub fn match_certification<'r>(
    canonical: &CertificationEntry,
    remote: &'r [RemoteActivity],
) -> Option<&'r RemoteActivity> {
    let needle = canonical.name.trim();
    if needle.is_empty() {
        return None;
    }
    remote.iter().find(|r| r.title.contains(needle))
}
