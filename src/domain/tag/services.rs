// src/domain/tag/services.rs
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tag::{Tag, TagId, TagName, TagRepository};
use crate::domain::validation;

/// A candidate tag after reconciliation against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTag {
    /// A stored row with the same name; its identity is shared.
    Existing(Tag),
    /// No stored row yet; inserted together with the owning certificate.
    New(TagName),
}

impl ResolvedTag {
    pub fn name(&self) -> &TagName {
        match self {
            ResolvedTag::Existing(tag) => &tag.name,
            ResolvedTag::New(name) => name,
        }
    }
}

/// Domain service keeping tag rows unique and pruning tags nobody references.
///
/// Lookups here are advisory: the write repository links tags by name and
/// runs the orphan purge inside the transaction of the certificate write.
pub struct TagReconciler {
    tag_repo: Arc<dyn TagRepository>,
}

impl TagReconciler {
    pub fn new(tag_repo: Arc<dyn TagRepository>) -> Self {
        Self { tag_repo }
    }

    /// Resolve each candidate name to the stored tag with the same name, or
    /// keep it as a new tag. Duplicate names collapse; output is name-ordered.
    pub async fn reconcile<S: AsRef<str>>(&self, names: &[S]) -> DomainResult<Vec<ResolvedTag>> {
        let invalid: Vec<&str> = names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| !validation::is_name(name))
            .collect();
        if !invalid.is_empty() {
            return Err(DomainError::validation(format!(
                "invalid tag names: {}",
                invalid.join(", ")
            )));
        }

        let mut resolved = BTreeMap::new();
        for raw in names {
            let name = TagName::new(raw.as_ref())?;
            if resolved.contains_key(&name) {
                continue;
            }
            let entry = match self.tag_repo.find_by_name(&name).await? {
                Some(existing) => ResolvedTag::Existing(existing),
                None => ResolvedTag::New(name.clone()),
            };
            resolved.insert(name, entry);
        }

        Ok(resolved.into_values().collect())
    }

    /// Ids of `tags` to re-check for orphaning after a certificate write,
    /// ascending and without repeats.
    pub fn orphan_candidates(tags: &[Tag]) -> Vec<TagId> {
        tags.iter()
            .map(|tag| tag.id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
