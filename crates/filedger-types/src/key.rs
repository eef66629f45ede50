//! Composite keys for secondary indexes.
//!
//! A composite key packs an index name and an ordered list of attribute
//! values into a single state key:
//!
//! ```text
//! U+0000 <index> U+0000 <attr 1> U+0000 <attr 2> U+0000 ...
//! ```
//!
//! The leading `U+0000` places every composite key in its own namespace, so
//! an index entry can never shadow a plain record key. Attributes may not
//! contain `U+0000` (the separator) or `U+10FFFF` (reserved as the upper
//! bound of partial-key range scans). Because the separator can never appear
//! inside an attribute, the encoding is injective and [`CompositeKey::parse`]
//! recovers the original parts exactly.

use std::fmt;

use crate::error::{KeyError, KeyResult};

/// First character of every composite key, also used as the separator.
pub const COMPOSITE_KEY_NAMESPACE: char = '\u{0}';

/// Highest code point. Appended to a partial key to form a range end.
pub const MAX_UNICODE_RUNE: char = char::MAX;

/// A decoded composite key: an index name plus its ordered attributes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompositeKey {
    index_name: String,
    attributes: Vec<String>,
}

impl CompositeKey {
    /// Validate and assemble a composite key.
    pub fn new<I, S>(index_name: impl Into<String>, attributes: I) -> KeyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index_name = index_name.into();
        validate_index_name(&index_name)?;

        let attributes: Vec<String> = attributes.into_iter().map(Into::into).collect();
        for (position, attr) in attributes.iter().enumerate() {
            if let Some(found) = attr.chars().find(|c| is_reserved(*c)) {
                return Err(KeyError::ReservedCharacter { position, found });
            }
        }

        Ok(Self {
            index_name,
            attributes,
        })
    }

    /// Build the encoded key string in one step.
    pub fn build<S: AsRef<str>>(index_name: &str, attributes: &[S]) -> KeyResult<String> {
        let key = Self::new(index_name, attributes.iter().map(|a| a.as_ref().to_string()))?;
        Ok(key.encode())
    }

    /// The index this key belongs to.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// The ordered attribute values.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Consume the key, returning `(index_name, attributes)`.
    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.index_name, self.attributes)
    }

    /// Encode to the on-ledger string form.
    pub fn encode(&self) -> String {
        let capacity = 2
            + self.index_name.len()
            + self.attributes.iter().map(|a| a.len() + 1).sum::<usize>();
        let mut out = String::with_capacity(capacity);
        out.push(COMPOSITE_KEY_NAMESPACE);
        out.push_str(&self.index_name);
        out.push(COMPOSITE_KEY_NAMESPACE);
        for attr in &self.attributes {
            out.push_str(attr);
            out.push(COMPOSITE_KEY_NAMESPACE);
        }
        out
    }

    /// Decode an encoded composite key.
    pub fn parse(key: &str) -> KeyResult<Self> {
        let body = key
            .strip_prefix(COMPOSITE_KEY_NAMESPACE)
            .ok_or_else(|| KeyError::NotComposite(key.to_string()))?;
        let body = body
            .strip_suffix(COMPOSITE_KEY_NAMESPACE)
            .ok_or_else(|| KeyError::Malformed("missing trailing separator".into()))?;

        let mut components = body.split(COMPOSITE_KEY_NAMESPACE);
        let index_name = components.next().unwrap_or_default();
        if index_name.is_empty() {
            return Err(KeyError::Malformed("empty index name".into()));
        }
        Self::new(index_name, components)
    }

    /// Returns `true` if `key` lives in the composite key namespace.
    pub fn is_composite(key: &str) -> bool {
        key.starts_with(COMPOSITE_KEY_NAMESPACE)
    }

    /// Exclusive upper bound for a range scan over every key that starts
    /// with the encoded partial key `prefix`.
    pub fn range_end(prefix: &str) -> String {
        let mut end = String::with_capacity(prefix.len() + MAX_UNICODE_RUNE.len_utf8());
        end.push_str(prefix);
        end.push(MAX_UNICODE_RUNE);
        end
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.index_name, self.attributes.join(", "))
    }
}

fn is_reserved(c: char) -> bool {
    c == COMPOSITE_KEY_NAMESPACE || c == MAX_UNICODE_RUNE
}

fn validate_index_name(name: &str) -> KeyResult<()> {
    if name.is_empty() {
        return Err(KeyError::EmptyIndexName);
    }
    match name.chars().find(|c| is_reserved(*c)) {
        Some(found) => Err(KeyError::ReservedInIndexName(found)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_with_namespace_and_separators() {
        let key = CompositeKey::build("hash~name", &["abc", "report.pdf"]).unwrap();
        assert_eq!(key, "\u{0}hash~name\u{0}abc\u{0}report.pdf\u{0}");
        assert!(CompositeKey::is_composite(&key));
    }

    #[test]
    fn differing_attributes_never_collide() {
        let a = CompositeKey::build("hash~name", &["h1", "n1"]).unwrap();
        let b = CompositeKey::build("hash~name", &["h1", "n2"]).unwrap();
        let c = CompositeKey::build("hash~name", &["h2", "n1"]).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn shifting_text_between_attributes_changes_key() {
        let a = CompositeKey::build("idx", &["ab", "c"]).unwrap();
        let b = CompositeKey::build("idx", &["a", "bc"]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn parse_recovers_parts() {
        let encoded = CompositeKey::build("hash~name", &["abc", "report.pdf"]).unwrap();
        let key = CompositeKey::parse(&encoded).unwrap();
        assert_eq!(key.index_name(), "hash~name");
        assert_eq!(key.attributes(), ["abc", "report.pdf"]);
    }

    #[test]
    fn empty_attribute_round_trips() {
        let encoded = CompositeKey::build("idx", &[""]).unwrap();
        let key = CompositeKey::parse(&encoded).unwrap();
        assert_eq!(key.attributes(), [""]);
    }

    #[test]
    fn separator_in_attribute_is_rejected() {
        let err = CompositeKey::build("idx", &["ok", "bad\u{0}part"]).unwrap_err();
        assert_eq!(
            err,
            KeyError::ReservedCharacter {
                position: 1,
                found: '\u{0}'
            }
        );
    }

    #[test]
    fn max_rune_in_attribute_is_rejected() {
        let err = CompositeKey::build("idx", &["x\u{10FFFF}"]).unwrap_err();
        assert!(matches!(err, KeyError::ReservedCharacter { position: 0, .. }));
    }

    #[test]
    fn index_name_is_validated() {
        assert_eq!(
            CompositeKey::build::<&str>("", &[]).unwrap_err(),
            KeyError::EmptyIndexName
        );
        assert!(matches!(
            CompositeKey::build::<&str>("a\u{0}b", &[]).unwrap_err(),
            KeyError::ReservedInIndexName(_)
        ));
    }

    #[test]
    fn parse_rejects_plain_keys() {
        assert!(matches!(
            CompositeKey::parse("report.pdf").unwrap_err(),
            KeyError::NotComposite(_)
        ));
        assert!(matches!(
            CompositeKey::parse("\u{0}idx").unwrap_err(),
            KeyError::Malformed(_)
        ));
        assert!(matches!(
            CompositeKey::parse("\u{0}\u{0}").unwrap_err(),
            KeyError::Malformed(_)
        ));
    }

    #[test]
    fn partial_key_is_prefix_of_full_key() {
        let partial = CompositeKey::build("hash~name", &["abc"]).unwrap();
        let full = CompositeKey::build("hash~name", &["abc", "report.pdf"]).unwrap();
        assert!(full.starts_with(&partial));
        assert!(full < CompositeKey::range_end(&partial));
    }

    #[test]
    fn partial_key_does_not_match_longer_attribute() {
        let partial = CompositeKey::build("hash~name", &["abc"]).unwrap();
        let other = CompositeKey::build("hash~name", &["abcd", "x"]).unwrap();
        assert!(!other.starts_with(&partial));
    }

    #[test]
    fn display_is_human_readable() {
        let key = CompositeKey::new("hash~name", ["abc", "f.txt"]).unwrap();
        assert_eq!(key.to_string(), "hash~name(abc, f.txt)");
    }

    proptest! {
        #[test]
        fn encoding_is_injective(
            a in proptest::collection::vec("[a-zA-Z0-9~./ ]{0,6}", 2),
            b in proptest::collection::vec("[a-zA-Z0-9~./ ]{0,6}", 2),
        ) {
            let ka = CompositeKey::build("hash~name", &a).unwrap();
            let kb = CompositeKey::build("hash~name", &b).unwrap();
            prop_assert_eq!(ka == kb, a == b);
        }

        #[test]
        fn parse_inverts_build(parts in proptest::collection::vec("[a-z0-9~./é -]{0,6}", 0..4)) {
            let encoded = CompositeKey::build("idx", &parts).unwrap();
            let decoded = CompositeKey::parse(&encoded).unwrap();
            prop_assert_eq!(decoded.index_name(), "idx");
            prop_assert_eq!(decoded.attributes(), parts.as_slice());
        }
    }
}
