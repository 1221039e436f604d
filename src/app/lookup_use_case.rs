use crate::apis::DirectoryBackend;
use crate::query::normalize;
use crate::types::{BatchResult, Field, Hit, LookupOutcome, Person};
use futures::stream::{self, StreamExt};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Resolves single queries and batches against one backend
pub struct LookupUseCase {
    backend: Box<dyn DirectoryBackend>,
    max_concurrency: usize,
}

impl LookupUseCase {
    pub fn new(backend: Box<dyn DirectoryBackend>, max_concurrency: usize) -> Self {
        Self {
            backend,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn fields(&self) -> &'static [Field] {
        self.backend.fields()
    }

    pub fn major_label(&self) -> &'static str {
        self.backend.major_label()
    }

    /// Look up one person. Transport errors propagate to the caller.
    pub async fn find_person(&self, query: &str) -> crate::error::Result<Option<Hit>> {
        let query = normalize(query);
        if query.is_empty() {
            return Ok(None);
        }
        self.backend.lookup_one(&query).await
    }

    /// Resolve every query. Unmatched queries become `Missing`, transport errors `Failed`;
    /// neither aborts the batch. Both carry the query exactly as submitted, while lookups
    /// use its normalized form. Blank lines are not queries and are skipped.
    #[instrument(skip(self, queries), fields(backend = self.backend.name(), count = queries.len()))]
    pub async fn resolve<S: AsRef<str>>(&self, queries: &[S]) -> BatchResult {
        let submitted: Vec<Submitted> = queries
            .iter()
            .map(|q| q.as_ref())
            .filter(|q| !q.trim().is_empty())
            .map(Submitted::new)
            .collect();
        let skipped = queries.len() - submitted.len();
        if skipped > 0 {
            debug!(skipped, "Skipped blank queries");
        }

        // One lookup per distinct normalized query
        let mut seen = HashSet::new();
        let lookups: Vec<String> = submitted
            .iter()
            .map(|s| s.normalized.clone())
            .filter(|n| !n.is_empty())
            .filter(|n| seen.insert(n.clone()))
            .collect();

        let result = if lookups.is_empty() {
            BatchResult::new(
                submitted
                    .iter()
                    .map(|s| LookupOutcome::Missing(s.original.clone()))
                    .collect(),
            )
        } else if self.backend.supports_batch() {
            self.resolve_compound(&submitted, &lookups).await
        } else {
            self.resolve_each(&submitted, &lookups).await
        };

        info!(
            resolved = result.resolved().count(),
            missing = result.missing().len(),
            failed = result.failed().len(),
            "Batch lookup finished"
        );
        result
    }

    /// One round trip; results sorted by identifier, then the unmatched queries in
    /// submission order.
    async fn resolve_compound(&self, submitted: &[Submitted], lookups: &[String]) -> BatchResult {
        let people = match self.backend.lookup_many(lookups).await {
            Ok(people) => people,
            Err(e) => {
                warn!(error = %e, "Batch lookup failed");
                let reason = e.to_string();
                return BatchResult::new(
                    submitted
                        .iter()
                        .map(|s| LookupOutcome::Failed {
                            query: s.original.clone(),
                            reason: reason.clone(),
                        })
                        .collect(),
                );
            }
        };

        // Identifiers compare case-insensitively, as the directory matches them
        let wanted: HashSet<String> = lookups.iter().map(|q| q.to_lowercase()).collect();
        let mut by_id: HashMap<String, Person> = HashMap::new();
        for person in people {
            let key = person.id.to_lowercase();
            if wanted.contains(&key) {
                by_id.entry(key).or_insert(person);
            }
        }

        let mut resolved: Vec<Person> = by_id.values().cloned().collect();
        resolved.sort_by(|a, b| a.id.cmp(&b.id));

        let mut outcomes: Vec<LookupOutcome> =
            resolved.into_iter().map(LookupOutcome::Resolved).collect();
        outcomes.extend(
            submitted
                .iter()
                .filter(|s| !by_id.contains_key(&s.normalized.to_lowercase()))
                .map(|s| LookupOutcome::Missing(s.original.clone())),
        );
        BatchResult::new(outcomes)
    }

    /// Independent lookups with bounded fan-out, reported in submission order
    async fn resolve_each(&self, submitted: &[Submitted], lookups: &[String]) -> BatchResult {
        let found: HashMap<String, std::result::Result<Option<Person>, String>> =
            stream::iter(lookups.iter())
                .map(|query| async move {
                    let outcome = match self.backend.lookup_one(query).await {
                        Ok(hit) => Ok(hit.map(|hit| hit.person)),
                        Err(e) => {
                            warn!(%query, error = %e, "Lookup failed");
                            Err(e.to_string())
                        }
                    };
                    (query.clone(), outcome)
                })
                .buffered(self.max_concurrency)
                .collect()
                .await;

        let mut emitted = HashSet::new();
        let mut outcomes = Vec::with_capacity(submitted.len());
        for s in submitted {
            match found.get(&s.normalized) {
                Some(Ok(Some(person))) => {
                    if emitted.insert(s.normalized.as_str()) {
                        outcomes.push(LookupOutcome::Resolved(person.clone()));
                    }
                }
                Some(Err(reason)) => outcomes.push(LookupOutcome::Failed {
                    query: s.original.clone(),
                    reason: reason.clone(),
                }),
                Some(Ok(None)) | None => outcomes.push(LookupOutcome::Missing(s.original.clone())),
            }
        }
        BatchResult::new(outcomes)
    }
}

/// A query as typed, paired with the form used for the lookup
struct Submitted {
    original: String,
    normalized: String,
}

impl Submitted {
    fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            normalized: normalize(original),
        }
    }
}
