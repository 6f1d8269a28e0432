//! Record store
//!
//! The store owns every connection type loaded for one environment, keyed by id in
//! insertion order. It is filled once by the loader, handed to the
//! [`Resolver`](crate::resolver::Resolver) which replaces each pending entry with
//! its resolved form, and is read-only afterwards.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{ConnGenError, ConnectionType, PendingRecord, RawRecord, RecordState};
use crate::resolver::merge::merge_parameters;

/// Owned mapping from connection id to its lifecycle state.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: IndexMap<String, RecordState>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from parsed records, failing on the first duplicate id.
    pub fn from_records<I>(records: I) -> Result<Self, ConnGenError>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Add a parsed record.
    ///
    /// Records without `inherit_from` are terminal and enter the store resolved. A
    /// terminal record that still carries `+parameters` has them merged onto its own
    /// `parameters` here, so no resolved record ever holds the marker.
    pub fn insert(&mut self, raw: RawRecord) -> Result<(), ConnGenError> {
        if let Some(existing) = self.records.get(&raw.id) {
            let first = match existing {
                RecordState::Resolved(record) => record.origin(),
                RecordState::Unresolved(pending) => pending.own.origin(),
            };
            let (incoming, _, _) = raw.into_parts();
            return Err(ConnGenError::DuplicateId {
                id: incoming.id.clone(),
                first,
                second: incoming.origin(),
            });
        }

        let (mut record, inherit_from, supplemental_parameters) = raw.into_parts();
        let state = match inherit_from {
            Some(parent) => RecordState::Unresolved(PendingRecord {
                inherit_from: parent,
                own: record,
                supplemental_parameters,
            }),
            None => {
                if let Some(overlay) = supplemental_parameters {
                    warn!("Connection {} has `+parameters` but no parent; merging onto its own parameters", record.id);
                    let base = record.parameters.take().unwrap_or_default();
                    let merged = merge_parameters(&base, &overlay).map_err(|e| {
                        ConnGenError::MalformedParameter {
                            id: record.id.clone(),
                            reason: e.to_string(),
                        }
                    })?;
                    record.parameters = Some(merged);
                }
                RecordState::Resolved(record)
            }
        };

        debug!("Stored connection {} (resolved: {})", state.id(), state.is_resolved());
        self.records.insert(state.id().to_string(), state);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&RecordState> {
        self.records.get(id)
    }

    /// The resolved record for `id`, if it exists and is resolved.
    pub fn resolved(&self, id: &str) -> Option<&ConnectionType> {
        match self.records.get(id) {
            Some(RecordState::Resolved(record)) => Some(record),
            _ => None,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn is_resolved(&self, id: &str) -> bool {
        self.records.get(id).is_some_and(RecordState::is_resolved)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Number of entries still waiting on a parent.
    pub fn pending_count(&self) -> usize {
        self.records.values().filter(|state| !state.is_resolved()).count()
    }

    /// Resolved records in insertion order; pending entries are skipped.
    pub fn resolved_records(&self) -> Vec<&ConnectionType> {
        self.records
            .values()
            .filter_map(|state| match state {
                RecordState::Resolved(record) => Some(record),
                RecordState::Unresolved(_) => None,
            })
            .collect()
    }

    /// Replace an entry with its resolved form.
    pub(crate) fn mark_resolved(&mut self, record: ConnectionType) {
        if let Some(state) = self.records.get_mut(&record.id) {
            *state = RecordState::Resolved(record);
        }
    }
}
