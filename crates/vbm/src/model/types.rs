//! Soma type tags and the type table.

use std::fmt;

/// A soma type tag: a single ASCII letter.
///
/// The tag's numeric id is its index in the [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SomaType(u8);

impl SomaType {
    /// Creates a type tag, or `None` if `letter` is not an ASCII letter.
    pub fn new(letter: u8) -> Option<Self> {
        letter.is_ascii_alphabetic().then_some(Self(letter))
    }

    /// Creates a type tag from a `char`.
    pub fn from_char(letter: char) -> Option<Self> {
        u8::try_from(letter).ok().and_then(Self::new)
    }

    /// Returns the letter as a byte.
    pub fn letter(self) -> u8 {
        self.0
    }

    /// Returns the letter as a `char`.
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Display for SomaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Ordered soma types; the index of a tag is its type id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeTable {
    types: Vec<SomaType>,
}

impl TypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a type and returns its id.
    pub fn push(&mut self, ty: SomaType) -> usize {
        self.types.push(ty);
        self.types.len() - 1
    }

    /// Looks up a type by id.
    pub fn get(&self, id: u8) -> Option<SomaType> {
        self.types.get(usize::from(id)).copied()
    }

    /// Returns true if `id` indexes an entry of the table.
    pub fn contains_id(&self, id: u8) -> bool {
        usize::from(id) < self.types.len()
    }

    /// Returns the id of the first entry with this letter, ignoring ASCII case.
    pub fn id_of(&self, letter: char) -> Option<u8> {
        self.types
            .iter()
            .position(|t| t.as_char().eq_ignore_ascii_case(&letter))
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Returns the number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if there are no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates over the types in id order.
    pub fn iter(&self) -> impl Iterator<Item = SomaType> + '_ {
        self.types.iter().copied()
    }
}

impl FromIterator<SomaType> for TypeTable {
    fn from_iter<I: IntoIterator<Item = SomaType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soma_type_rejects_non_letters() {
        assert!(SomaType::new(b'N').is_some());
        assert!(SomaType::new(b'q').is_some());
        assert!(SomaType::new(b'1').is_none());
        assert!(SomaType::new(b' ').is_none());
        assert!(SomaType::from_char('é').is_none());
    }

    #[test]
    fn test_type_table_lookup() {
        let table: TypeTable = [b'N', b'P', b'M']
            .into_iter()
            .filter_map(SomaType::new)
            .collect();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1).map(SomaType::as_char), Some('P'));
        assert_eq!(table.get(3), None);
        assert_eq!(table.id_of('m'), Some(2));
        assert_eq!(table.id_of('X'), None);
        assert!(table.contains_id(2));
        assert!(!table.contains_id(3));
    }
}
