use crate::{
    db::{
        query::{FilterClause, TranslationQuery},
        store::{StoreError, StoreTransaction, TranslationStore},
        translation::{Translation, TranslationKey},
    },
    error::Error,
    key::RecordId,
    registry::EntityRegistry,
    RELATION_SEP,
};
use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    sync::{Arc, Condvar, Mutex, RwLock},
};

/// Address a write-intent lock covers: every field of one entity row in
/// one language.
type LockKey = (String, RecordId, String);

/// Relation-edge index key: (entity, id, reverse segment name).
type EdgeKey = (String, RecordId, String);

///
/// MemoryStore
///
/// Reference implementation of the store boundary: a BTreeMap side
/// table, a relation-edge index standing in for foreign-key joins, and
/// a lock table providing `SELECT ... FOR UPDATE` semantics. Reads take
/// no row locks and observe committed state only.
///

pub struct MemoryStore {
    registry: Arc<EntityRegistry>,
    rows: RwLock<BTreeMap<TranslationKey, String>>,
    edges: RwLock<HashMap<EdgeKey, Vec<(String, RecordId)>>>,
    locks: LockTable,
}

impl MemoryStore {
    #[must_use]
    pub fn new(registry: Arc<EntityRegistry>) -> Self {
        Self {
            registry,
            rows: RwLock::new(BTreeMap::new()),
            edges: RwLock::new(HashMap::new()),
            locks: LockTable::default(),
        }
    }

    /// Register one relation edge: `entity`/`id` reaches `target`/
    /// `target_id` under the reverse segment `name`. Mirrors a foreign
    /// key column on `entity`.
    pub fn link(
        &self,
        entity: impl Into<String>,
        id: impl Into<RecordId>,
        name: impl Into<String>,
        target: impl Into<String>,
        target_id: impl Into<RecordId>,
    ) -> Result<(), StoreError> {
        let mut edges = self.edges.write().map_err(|_| StoreError::LockPoisoned)?;
        edges
            .entry((entity.into(), id.into(), name.into()))
            .or_default()
            .push((target.into(), target_id.into()));

        Ok(())
    }

    /// All committed rows, in key order.
    pub fn snapshot(&self) -> Result<Vec<Translation>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;

        Ok(rows
            .iter()
            .map(|(key, text)| Translation {
                entity: key.entity.clone(),
                id: key.id.clone(),
                field: key.field.clone(),
                language: key.language.clone(),
                text: text.clone(),
            })
            .collect())
    }

    fn select_rows(&self, query: &TranslationQuery) -> Result<Vec<Translation>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::LockPoisoned)?;
        let edges = self.edges.read().map_err(|_| StoreError::LockPoisoned)?;

        // Row keys are unique, so a row matching several clauses still
        // appears once: the DISTINCT contract comes for free.
        let mut matched = Vec::new();
        for (key, text) in rows.iter() {
            if key.language != query.language {
                continue;
            }
            if self.matches_any(&edges, key, query)? {
                matched.push(Translation {
                    entity: key.entity.clone(),
                    id: key.id.clone(),
                    field: key.field.clone(),
                    language: key.language.clone(),
                    text: text.clone(),
                });
            }
        }

        Ok(matched)
    }

    fn matches_any(
        &self,
        edges: &HashMap<EdgeKey, Vec<(String, RecordId)>>,
        key: &TranslationKey,
        query: &TranslationQuery,
    ) -> Result<bool, StoreError> {
        for clause in &query.clauses {
            if self.clause_matches(edges, key, clause)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Evaluate one OR branch: walk the composed related name from this
    /// row's owner up the edge index and intersect the final ids with
    /// the clause's IN set.
    fn clause_matches(
        &self,
        edges: &HashMap<EdgeKey, Vec<(String, RecordId)>>,
        key: &TranslationKey,
        clause: &FilterClause,
    ) -> Result<bool, StoreError> {
        let mut segments = clause.related_name.split(RELATION_SEP);
        let Some(owner_name) = segments.next() else {
            return Ok(false);
        };
        let owner = self
            .registry
            .entity_for_translations_name(owner_name)
            .ok_or_else(|| StoreError::UnknownRelatedName(clause.related_name.clone()))?;
        if owner.entity_name != key.entity {
            return Ok(false);
        }

        let mut frontier = vec![(key.entity.clone(), key.id.clone())];
        for segment in segments {
            let mut next = Vec::new();
            for (entity, id) in frontier {
                if let Some(targets) = edges.get(&(entity, id, segment.to_string())) {
                    next.extend(targets.iter().cloned());
                }
            }
            if next.is_empty() {
                return Ok(false);
            }
            frontier = next;
        }

        Ok(frontier.iter().any(|(_, id)| clause.ids.contains(id)))
    }

    /// Address set a query's write-intent locks must cover. Owner
    /// clauses lock the full requested address range (so a first-time
    /// persist cannot race another); multi-hop clauses lock the
    /// addresses of currently matching rows.
    fn lock_keys(&self, query: &TranslationQuery) -> Result<BTreeSet<LockKey>, StoreError> {
        let mut keys = BTreeSet::new();
        let mut scan_matches = false;

        for clause in &query.clauses {
            if clause.related_name.contains(RELATION_SEP) {
                scan_matches = true;
                continue;
            }
            let owner = self
                .registry
                .entity_for_translations_name(&clause.related_name)
                .ok_or_else(|| StoreError::UnknownRelatedName(clause.related_name.clone()))?;
            for id in &clause.ids {
                keys.insert((
                    owner.entity_name.to_string(),
                    id.clone(),
                    query.language.clone(),
                ));
            }
        }

        if scan_matches {
            for row in self.select_rows(query)? {
                keys.insert((row.entity, row.id, row.language));
            }
        }

        Ok(keys)
    }
}

impl TranslationStore for MemoryStore {
    type Txn<'a> = MemoryTransaction<'a>;

    fn select(&self, query: &TranslationQuery) -> Result<Vec<Translation>, StoreError> {
        self.select_rows(query)
    }

    fn transaction<R>(
        &self,
        f: impl FnOnce(&mut Self::Txn<'_>) -> Result<R, Error>,
    ) -> Result<R, Error> {
        let mut txn = MemoryTransaction {
            store: self,
            locked: BTreeSet::new(),
            deletes: Vec::new(),
            inserts: Vec::new(),
        };

        f(&mut txn).and_then(|value| {
            txn.apply()?;
            Ok(value)
        })
    }
}

///
/// MemoryTransaction
///
/// Staged mutation set for one transaction window. Locks taken through
/// `select_for_update` are held until the owning `transaction` call
/// finishes, commit or rollback.
///

pub struct MemoryTransaction<'a> {
    store: &'a MemoryStore,
    locked: BTreeSet<LockKey>,
    deletes: Vec<TranslationKey>,
    inserts: Vec<Translation>,
}

impl MemoryTransaction<'_> {
    /// Validate the staged batch and apply it under the table write
    /// guard, making validate-then-apply atomic.
    fn apply(&self) -> Result<(), StoreError> {
        if self.deletes.is_empty() && self.inserts.is_empty() {
            return Ok(());
        }

        let mut rows = self
            .store
            .rows
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;

        let deleted: HashSet<&TranslationKey> = self.deletes.iter().collect();
        let mut staged: HashSet<TranslationKey> = HashSet::new();
        for row in &self.inserts {
            let key = row.key();
            let survives = rows.contains_key(&key) && !deleted.contains(&key);
            if survives || !staged.insert(key) {
                return Err(StoreError::DuplicateRow {
                    entity: row.entity.clone(),
                    id: row.id.to_string(),
                    field: row.field.clone(),
                    language: row.language.clone(),
                });
            }
        }

        for key in &self.deletes {
            rows.remove(key);
        }
        for row in &self.inserts {
            rows.insert(row.key(), row.text.clone());
        }

        Ok(())
    }
}

// Locks are released on drop, not in `transaction`, so a panicking
// closure cannot strand the lock table.
impl Drop for MemoryTransaction<'_> {
    fn drop(&mut self) {
        self.store.locks.release(&self.locked);
    }
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn select_for_update(
        &mut self,
        query: &TranslationQuery,
    ) -> Result<Vec<Translation>, StoreError> {
        let keys = self.store.lock_keys(query)?;
        let fresh: BTreeSet<LockKey> = keys.difference(&self.locked).cloned().collect();
        self.store.locks.acquire(&fresh)?;
        self.locked.extend(fresh);

        self.store.select_rows(query)
    }

    fn delete(&mut self, keys: &[TranslationKey]) -> Result<(), StoreError> {
        self.deletes.extend_from_slice(keys);

        Ok(())
    }

    fn insert(&mut self, rows: Vec<Translation>) -> Result<(), StoreError> {
        self.inserts.extend(rows);

        Ok(())
    }
}

///
/// LockTable
///
/// Write-intent row locks keyed by (entity, id, language). Acquisition
/// is all-or-wait: a waiter takes every requested key in one step or
/// blocks until the holder releases, so overlapping writers serialize
/// without partial holds and without deadlock.
///

#[derive(Default)]
struct LockTable {
    held: Mutex<HashSet<LockKey>>,
    released: Condvar,
}

impl LockTable {
    fn acquire(&self, keys: &BTreeSet<LockKey>) -> Result<(), StoreError> {
        let mut held = self.held.lock().map_err(|_| StoreError::LockPoisoned)?;
        while keys.iter().any(|key| held.contains(key)) {
            held = self
                .released
                .wait(held)
                .map_err(|_| StoreError::LockPoisoned)?;
        }
        held.extend(keys.iter().cloned());

        Ok(())
    }

    fn release(&self, keys: &BTreeSet<LockKey>) {
        if let Ok(mut held) = self.held.lock() {
            for key in keys {
                held.remove(key);
            }
        }
        self.released.notify_all();
    }
}
