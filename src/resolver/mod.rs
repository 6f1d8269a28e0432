//! Inheritance resolution for connection types
//!
//! A connection document may declare `inherit_from: <id>` to start from another
//! connection's fields. The [`Resolver`] walks each chain depth-first, parent
//! before child, so by the time a child copies fields down its parent is already
//! complete and inheritance works through chains of any depth.
//!
//! # Algorithm
//!
//! For a pending record `child` with parent `parent_id`:
//!
//! 1. Resolve `parent_id` first (recursively).
//! 2. Copy down every parent field the child does not define. Child fields always
//!    win, including a full `parameters` list.
//! 3. If the child has `+parameters`, merge them onto the parent's parameters with
//!    [`merge::merge_parameters`] and use the result as the child's `parameters`.
//! 4. Replace the store entry with the resolved record.
//!
//! Each record is resolved at most once; a second request returns the stored
//! result, so resolving the whole store in any order reaches the same fixed point.
//!
//! # Failures
//!
//! - A parent id that is not in the store: [`ConnGenError::MissingAncestor`]
//! - A chain that revisits a record still being resolved, including
//!   self-inheritance: [`ConnGenError::CycleDetected`] with the full chain
//! - A parameter without `airflow_param_name` during a merge:
//!   [`ConnGenError::MalformedParameter`]
//!
//! # Example
//!
//! ```rust
//! use conngen_cli::core::RawRecord;
//! use conngen_cli::resolver::Resolver;
//! use conngen_cli::store::RecordStore;
//!
//! let mut base = RawRecord::new("postgres");
//! base.attributes.insert("name".into(), "Postgres".into());
//! let mut child = RawRecord::new("redshift");
//! child.inherit_from = Some("postgres".into());
//!
//! let mut store = RecordStore::from_records([base, child]).unwrap();
//! let mut resolver = Resolver::new(&mut store);
//! let resolved = resolver.resolve("redshift").unwrap();
//! assert_eq!(resolved.attribute("name").unwrap(), "Postgres");
//! ```

pub mod filter;
pub mod merge;

use tracing::{debug, warn};

use crate::core::{ConnGenError, ConnectionType, PendingRecord, RecordState};
use crate::store::RecordStore;

use self::merge::merge_parameters;

/// Resolves `inherit_from` chains in place inside a [`RecordStore`].
pub struct Resolver<'a> {
    store: &'a mut RecordStore,
    /// Ids currently being resolved, outermost first.
    visiting: Vec<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self {
            store,
            visiting: Vec::new(),
        }
    }

    /// Resolve `id` and return the resolved record.
    pub fn resolve(&mut self, id: &str) -> Result<&ConnectionType, ConnGenError> {
        self.resolve_in_place(id)?;
        self.store.resolved(id).ok_or_else(|| ConnGenError::RecordNotFound {
            id: id.to_string(),
        })
    }

    /// Resolve every record in the store, in store order.
    pub fn resolve_all(&mut self) -> Result<(), ConnGenError> {
        let ids: Vec<String> = self.store.ids().map(str::to_string).collect();
        for id in &ids {
            self.resolve_in_place(id)?;
        }
        debug!("Resolved {} connections", ids.len());
        Ok(())
    }

    fn resolve_in_place(&mut self, id: &str) -> Result<(), ConnGenError> {
        let parent_id = match self.store.get(id) {
            None => {
                return Err(ConnGenError::RecordNotFound {
                    id: id.to_string(),
                });
            }
            Some(RecordState::Resolved(_)) => return Ok(()),
            Some(RecordState::Unresolved(pending)) => pending.inherit_from.clone(),
        };

        if let Some(start) = self.visiting.iter().position(|visiting| visiting == id) {
            let mut chain = self.visiting[start..].to_vec();
            chain.push(id.to_string());
            return Err(ConnGenError::CycleDetected {
                id: id.to_string(),
                chain: chain.join(" -> "),
            });
        }

        if !self.store.contains(&parent_id) {
            return Err(ConnGenError::MissingAncestor {
                id: id.to_string(),
                parent: parent_id,
            });
        }

        debug!("Connection {id} inherits from {parent_id}");
        self.visiting.push(id.to_string());
        let parent_outcome = self.resolve_in_place(&parent_id);
        self.visiting.pop();
        parent_outcome?;

        let resolved = match (self.store.get(id), self.store.resolved(&parent_id)) {
            (Some(RecordState::Unresolved(child)), Some(parent)) => inherit(child, parent)?,
            _ => {
                return Err(ConnGenError::RecordNotFound {
                    id: parent_id.clone(),
                });
            }
        };

        debug!("Removing `inherit_from` from {id}");
        self.store.mark_resolved(resolved);
        Ok(())
    }
}

/// Combine a pending record with its resolved parent.
fn inherit(child: &PendingRecord, parent: &ConnectionType) -> Result<ConnectionType, ConnGenError> {
    let mut record = child.own.clone();

    for (key, value) in &parent.attributes {
        if !record.attributes.contains_key(key) {
            debug!("Adding {key} to {}", record.id);
            record.attributes.insert(key.clone(), value.clone());
        }
    }

    if record.visible.is_none() && parent.visible.is_some() {
        debug!("Adding visible to {}", record.id);
        record.visible = parent.visible;
    }

    match &child.supplemental_parameters {
        Some(overlay) => {
            if record.parameters.is_some() {
                warn!(
                    "Connection {} defines both `parameters` and `+parameters`; its own `parameters` are replaced by the merge",
                    record.id
                );
            }
            debug!("Merging parameters from {} into {}", child.inherit_from, record.id);
            let base = parent.parameters.as_deref().unwrap_or_default();
            let merged = merge_parameters(base, overlay).map_err(|e| {
                ConnGenError::MalformedParameter {
                    id: record.id.clone(),
                    reason: e.to_string(),
                }
            })?;
            record.parameters = Some(merged);
        }
        None => {
            if record.parameters.is_none() && parent.parameters.is_some() {
                debug!("Adding parameters to {}", record.id);
                record.parameters = parent.parameters.clone();
            }
        }
    }

    Ok(record)
}
