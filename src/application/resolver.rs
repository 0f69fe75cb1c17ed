// Dashboard resolver - maps a route token onto exactly one manifest node
use crate::domain::manifest::{DashboardEntry, DashboardRef, Manifest};
use crate::domain::normalize::{normalize, slugify};
use crate::domain::tree::DashboardSummary;
use serde::Serialize;
use std::borrow::Cow;

pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchTier {
    DashId,
    Name,
    NormalizedName,
    Slug,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDashboard {
    pub at: DashboardRef,
    pub entry: DashboardEntry,
    pub matched_by: MatchTier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(ResolvedDashboard),
    NotFound {
        query: String,
        suggestions: Vec<DashboardSummary>,
    },
}

/// Percent-decode a route token; undecodable input is used verbatim.
pub fn decode_token(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Resolve `token` against the manifest, trying each tier in order:
/// dashId, exact name, normalized name, slug. Within a tier the first
/// dashboard in department -> section -> dashboard order wins.
pub fn resolve(manifest: &Manifest, token: &str) -> Resolution {
    let decoded = decode_token(token);
    let decoded: &str = &decoded;

    for candidate in [decoded, token] {
        if let Some(hit) = find_first(manifest, |entry, _| {
            !entry.dash_id.is_empty() && entry.dash_id == candidate
        }) {
            return found(hit, MatchTier::DashId);
        }
    }

    for candidate in [decoded, token] {
        if let Some(hit) = find_first(manifest, |_, name| name == candidate) {
            return found(hit, MatchTier::Name);
        }
    }

    let wanted = normalize(decoded);
    if !wanted.is_empty() {
        if let Some(hit) = find_first(manifest, |_, name| normalize(name) == wanted) {
            return found(hit, MatchTier::NormalizedName);
        }

        let wanted_slug = wanted.replace(' ', "-");
        if let Some(hit) = find_first(manifest, |entry, name| {
            (!entry.dash_id.is_empty() && slugify(&entry.dash_id) == wanted_slug)
                || slugify(name) == wanted_slug
        }) {
            return found(hit, MatchTier::Slug);
        }
    }

    tracing::debug!("No dashboard matches token {:?}", decoded);
    Resolution::NotFound {
        query: decoded.to_string(),
        suggestions: suggest(manifest, &wanted),
    }
}

/// Dashboards whose normalized name contains the normalized query, in
/// manifest order, capped at [`MAX_SUGGESTIONS`].
pub fn suggest(manifest: &Manifest, normalized_query: &str) -> Vec<DashboardSummary> {
    if normalized_query.is_empty() {
        return Vec::new();
    }
    manifest
        .dashboards()
        .filter(|(at, _)| normalize(&at.name).contains(normalized_query))
        .take(MAX_SUGGESTIONS)
        .map(|(at, entry)| DashboardSummary::from_entry(&at.name, entry))
        .collect()
}

fn find_first<'m, F>(manifest: &'m Manifest, mut predicate: F) -> Option<(DashboardRef, &'m DashboardEntry)>
where
    F: FnMut(&DashboardEntry, &str) -> bool,
{
    manifest
        .dashboards()
        .find(|(at, entry)| predicate(*entry, at.name.as_str()))
}

fn found((at, entry): (DashboardRef, &DashboardEntry), matched_by: MatchTier) -> Resolution {
    Resolution::Found(ResolvedDashboard {
        at,
        entry: entry.clone(),
        matched_by,
    })
}
