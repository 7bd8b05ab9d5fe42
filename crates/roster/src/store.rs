use shared::{
    domain::{Record, RecordId},
    error::RosterError,
};

/// Insertion-ordered in-memory record collection. Ids are assigned from a
/// monotonic counter and are never reused, even after removal. The store is
/// session-scoped and non-durable.
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: Vec<Record>,
    next_id: i64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a new record. Both names are trimmed before validation; the
    /// first name is checked before the last, and the duplicate scan only
    /// runs once both names are well-formed.
    pub fn add(&mut self, first: &str, last: &str) -> Result<Record, RosterError> {
        let (first, last) = validated_names(first, last)?;
        if self.has_duplicate(&first, &last, None) {
            return Err(RosterError::DuplicateName);
        }

        let record = Record {
            id: RecordId(self.next_id),
            first,
            last,
        };
        self.next_id += 1;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replaces the names of an existing record in place; id and position are
    /// unchanged. Validation matches `add`, except the duplicate scan skips
    /// the record being updated, so re-submitting a record's own names is
    /// allowed.
    pub fn update(&mut self, id: RecordId, first: &str, last: &str) -> Result<Record, RosterError> {
        let (first, last) = validated_names(first, last)?;
        if self.has_duplicate(&first, &last, Some(id)) {
            return Err(RosterError::DuplicateName);
        }

        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(RosterError::not_found(id))?;
        record.first = first;
        record.last = last;
        Ok(record.clone())
    }

    /// Removes and returns the record with the given id.
    pub fn remove(&mut self, id: RecordId) -> Result<Record, RosterError> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(RosterError::not_found(id))?;
        Ok(self.records.remove(index))
    }

    /// Removes every record and returns how many were removed.
    pub fn remove_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // Exact, case-sensitive match over live records only; removed records
    // never block reuse of their name.
    fn has_duplicate(&self, first: &str, last: &str, skip: Option<RecordId>) -> bool {
        self.records
            .iter()
            .filter(|record| Some(record.id) != skip)
            .any(|record| record.first == first && record.last == last)
    }
}

fn validated_names(first: &str, last: &str) -> Result<(String, String), RosterError> {
    let first = first.trim();
    if first.is_empty() {
        return Err(RosterError::EmptyFirstName);
    }
    let last = last.trim();
    if last.is_empty() {
        return Err(RosterError::EmptyLastName);
    }
    Ok((first.to_string(), last.to_string()))
}
