//! Ordered in-memory record store.
//!
//! A `RecordStore` owns every record of one entity type, in insertion order.
//! Records enter through `create` (or the seed), leave through `remove_one`,
//! and are replaced whole by `update`. Each operation holds the store's lock
//! for its full duration, so a lookup and the mutation that follows it are
//! never interleaved with another caller.
//!
//! Lookups that find nothing return `None`; errors are reserved for contract
//! and invariant violations (see [`CalrestError`]).

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{CalrestError, CalrestResult};
use crate::identity::{IdGenerator, UuidGenerator};
use crate::query::{Matcher, Query};
use crate::record::Record;

pub struct RecordStore<R> {
    records: Mutex<Vec<R>>,
    ids: Arc<dyn IdGenerator>,
}

impl<R: Record> RecordStore<R> {
    /// Build a store from its seed records, using random UUID identities.
    pub fn new(seed: Vec<R>) -> CalrestResult<Self> {
        Self::with_generator(seed, Arc::new(UuidGenerator))
    }

    /// Build a store with a specific identity generator.
    ///
    /// Seed records without an identity get one from `ids`. A seed that
    /// repeats an identity is rejected.
    pub fn with_generator(seed: Vec<R>, ids: Arc<dyn IdGenerator>) -> CalrestResult<Self> {
        let mut records = Vec::with_capacity(seed.len());
        let mut seen = HashSet::with_capacity(seed.len());
        let mut assigned = 0usize;

        for mut record in seed {
            if record.id().is_empty() {
                let id = ids.next_id();
                if id.is_empty() {
                    return Err(CalrestError::MissingIdentity { kind: R::KIND });
                }
                record.set_id(id);
                assigned += 1;
            }
            if !seen.insert(record.id().to_string()) {
                return Err(CalrestError::IdentityCollision {
                    kind: R::KIND,
                    id: record.id().to_string(),
                });
            }
            records.push(record);
        }

        debug!(
            target: "calrest::store",
            kind = R::KIND,
            records = records.len(),
            assigned,
            "Store seeded"
        );

        Ok(RecordStore {
            records: Mutex::new(records),
            ids,
        })
    }

    /// Assign a fresh identity to `input` and append it.
    pub fn create(&self, input: R::Creation) -> CalrestResult<R> {
        let mut records = self.records.lock();

        let id = self.ids.next_id();
        if id.is_empty() {
            return Err(CalrestError::MissingIdentity { kind: R::KIND });
        }
        if records.iter().any(|r| r.id() == id) {
            return Err(CalrestError::IdentityCollision { kind: R::KIND, id });
        }

        let record = R::from_creation(id, input);
        records.push(record.clone());

        debug!(target: "calrest::store", kind = R::KIND, id = record.id(), "Record created");
        Ok(record)
    }

    /// First record, in store order, accepted by `query`.
    pub fn find_one<M>(&self, query: &M) -> Option<R>
    where
        M: Matcher<R> + ?Sized,
    {
        let by_id = query.identity(R::ID_FIELD);
        self.records
            .lock()
            .iter()
            .find(|r| accepts(query, by_id, *r))
            .cloned()
    }

    /// Every record accepted by `query`, in store order.
    pub fn find_all<M>(&self, query: &M) -> Vec<R>
    where
        M: Matcher<R> + ?Sized,
    {
        let by_id = query.identity(R::ID_FIELD);
        self.records
            .lock()
            .iter()
            .filter(|r| accepts(query, by_id, *r))
            .cloned()
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<R> {
        self.records.lock().iter().find(|r| r.id() == id).cloned()
    }

    /// Replace the record sharing `record`'s identity, keeping its position.
    ///
    /// Returns `Ok(None)` when no such record exists. The replacement is
    /// stored as given; no fields are merged from the old record.
    pub fn update(&self, record: R) -> CalrestResult<Option<R>> {
        self.update_where(&Query::all(), record)
    }

    /// Like [`RecordStore::update`], but only replaces the existing record
    /// if `query` also accepts it. The check and the replacement happen
    /// under one lock.
    pub fn update_where<M>(&self, query: &M, record: R) -> CalrestResult<Option<R>>
    where
        M: Matcher<R> + ?Sized,
    {
        if record.id().is_empty() {
            return Err(CalrestError::MissingIdentity { kind: R::KIND });
        }

        let mut records = self.records.lock();
        let Some(slot) = records
            .iter_mut()
            .find(|r| r.id() == record.id() && query.matches(r))
        else {
            debug!(target: "calrest::store", kind = R::KIND, id = record.id(), "Update missed");
            return Ok(None);
        };

        *slot = record.clone();

        debug!(target: "calrest::store", kind = R::KIND, id = record.id(), "Record updated");
        Ok(Some(record))
    }

    /// Remove and return the first record accepted by `query`.
    pub fn remove_one<M>(&self, query: &M) -> Option<R>
    where
        M: Matcher<R> + ?Sized,
    {
        let by_id = query.identity(R::ID_FIELD);
        let mut records = self.records.lock();
        let position = records.iter().position(|r| accepts(query, by_id, r))?;
        let removed = records.remove(position);

        debug!(target: "calrest::store", kind = R::KIND, id = removed.id(), "Record removed");
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

/// Identity-only matchers compare ids directly instead of running `matches`.
fn accepts<R, M>(query: &M, by_id: Option<&str>, record: &R) -> bool
where
    R: Record,
    M: Matcher<R> + ?Sized,
{
    match by_id {
        Some(id) => record.id() == id,
        None => query.matches(record),
    }
}
