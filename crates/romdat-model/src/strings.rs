//! Deduplicating table for shared cheat strings.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Maximum number of live slots; the packed `cheat_ref` field is 5 bits and
/// index 0 is the "no value" sentinel.
pub const STRING_TABLE_CAPACITY: usize = 31;

/// One interned string plus the display names of the entries that use it.
///
/// `used_by` is provenance decoration for generated output comments; it never
/// affects the table payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringSlot {
    pub value: String,
    pub used_by: Vec<String>,
}

/// Deduplicating store for shared free-text values, indexed 1..=31.
///
/// Owned by the pipeline driver and passed by reference into the parser;
/// index 0 is never allocated.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StringTable {
    slots: Vec<StringSlot>,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `value`, returning its 1-based index.
    ///
    /// An exact byte match reuses the existing slot (first occurrence wins);
    /// otherwise the next free index is allocated. `used_by` records the
    /// display name of the requesting entry against the slot.
    pub fn intern(&mut self, value: &str, used_by: &str) -> Result<u8, ModelError> {
        if let Some(pos) = self.slots.iter().position(|slot| slot.value == value) {
            self.slots[pos].used_by.push(used_by.to_string());
            return Ok((pos + 1) as u8);
        }
        if self.slots.len() >= STRING_TABLE_CAPACITY {
            return Err(ModelError::StringTableFull {
                capacity: STRING_TABLE_CAPACITY,
                value: value.to_string(),
            });
        }
        self.slots.push(StringSlot {
            value: value.to_string(),
            used_by: vec![used_by.to_string()],
        });
        Ok(self.slots.len() as u8)
    }

    /// Looks up a slot by its 1-based index.
    pub fn get(&self, index: u8) -> Option<&StringSlot> {
        if index == 0 {
            return None;
        }
        self.slots.get(index as usize - 1)
    }

    /// Number of allocated slots (excluding the index-0 sentinel).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slots in index order, starting at index 1.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &StringSlot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(pos, slot)| ((pos + 1) as u8, slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins_slot() {
        let mut table = StringTable::new();
        let a = table.intern("D109911A 0000", "Game A").unwrap();
        let b = table.intern("EE000000 0001", "Game B").unwrap();
        let again = table.intern("D109911A 0000", "Game C").unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(again, a);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get(a).unwrap().used_by,
            vec!["Game A".to_string(), "Game C".to_string()]
        );
    }

    #[test]
    fn index_zero_is_reserved() {
        let mut table = StringTable::new();
        assert!(table.get(0).is_none());
        let first = table.intern("x", "g").unwrap();
        assert_eq!(first, 1);
    }

    #[test]
    fn capacity_overflow_is_an_error() {
        let mut table = StringTable::new();
        for i in 0..STRING_TABLE_CAPACITY {
            table.intern(&format!("cheat {i}"), "g").unwrap();
        }
        let err = table.intern("one too many", "g").unwrap_err();
        assert!(matches!(err, ModelError::StringTableFull { .. }));
        // Table is unchanged after the failed intern.
        assert_eq!(table.len(), STRING_TABLE_CAPACITY);
    }
}
