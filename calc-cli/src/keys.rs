//! Key name translation
//!
//! Interactive input may name keys in braces, e.g. `12{Enter}` or
//! `{Backspace}`. Each name is replaced by the text it stands for; all other
//! characters go to the engine unchanged.

use std::collections::BTreeMap;

/// Opens a key name
pub const KEY_OPEN: char = '{';
/// Closes a key name
pub const KEY_CLOSE: char = '}';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("Unknown key: {{{0}}}")]
    UnknownKey(String),

    #[error("Unterminated key name starting at column {0}")]
    Unterminated(usize),
}

/// Mapping from key names to engine input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    keys: BTreeMap<String, String>,
}

impl KeyMap {
    /// Built-in key names for the given markers
    pub fn defaults(delete_marker: char, clear_marker: char) -> Self {
        let mut map = Self::default();
        map.insert("Enter", "=");
        map.insert("Backspace", delete_marker.to_string());
        map.insert("Delete", clear_marker.to_string());
        map.insert("Escape", clear_marker.to_string());
        map
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.keys.insert(name.into(), text.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.keys.get(name).map(String::as_str)
    }

    /// Names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    /// Replace every `{Name}` in `line` with its mapped text
    pub fn translate(&self, line: &str) -> Result<String, KeyError> {
        let mut output = String::with_capacity(line.len());
        let mut chars = line.char_indices();

        while let Some((column, c)) = chars.next() {
            if c != KEY_OPEN {
                output.push(c);
                continue;
            }

            let mut name = String::new();
            let mut closed = false;
            for (_, c) in chars.by_ref() {
                if c == KEY_CLOSE {
                    closed = true;
                    break;
                }
                name.push(c);
            }

            if !closed {
                return Err(KeyError::Unterminated(column));
            }

            let text = self
                .get(&name)
                .ok_or_else(|| KeyError::UnknownKey(name.clone()))?;
            output.push_str(text);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let keys = KeyMap::defaults('d', 'a');
        assert_eq!(keys.translate("12+3=").unwrap(), "12+3=");
        assert_eq!(keys.translate("").unwrap(), "");
    }

    #[test]
    fn test_named_keys() {
        let keys = KeyMap::defaults('d', 'a');
        assert_eq!(keys.translate("12{Backspace}+3{Enter}").unwrap(), "12d+3=");
        assert_eq!(keys.translate("{Delete}").unwrap(), "a");
    }

    #[test]
    fn test_custom_keys() {
        let mut keys = KeyMap::defaults('d', 'a');
        keys.insert("Half", "/2=");
        assert_eq!(keys.translate("9{Half}").unwrap(), "9/2=");
    }

    #[test]
    fn test_unknown_key() {
        let keys = KeyMap::defaults('d', 'a');
        assert_eq!(
            keys.translate("1{Tab}"),
            Err(KeyError::UnknownKey("Tab".to_string()))
        );
    }

    #[test]
    fn test_unterminated_key() {
        let keys = KeyMap::defaults('d', 'a');
        assert_eq!(keys.translate("12{Ent"), Err(KeyError::Unterminated(2)));
    }
}
