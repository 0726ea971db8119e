use indexmap::IndexMap;

/// A parsed document element.
///
/// Containers own their children outright.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Scalar(String),
    Sequence(Vec<Node>),
    Map(Mapping),
}

/// An ordered mapping.
///
/// Lookups and iteration see one value per key: the last one written, kept at
/// the position where the key first appeared. [`Mapping::occurrences`] replays
/// every entry in the order it was written, repeated keys included.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
    index: IndexMap<String, usize>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the key was already present.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> bool {
        let key = key.into();
        let position = self.entries.len();
        self.entries.push((key.clone(), value));
        self.index.insert(key, position).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.index
            .iter()
            .map(|(key, &i)| (key.as_str(), &self.entries[i].1))
    }

    pub fn occurrences(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn has_repeated_keys(&self) -> bool {
        self.entries.len() != self.index.len()
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl Node {
    pub fn scalar(text: impl Into<String>) -> Self {
        Node::Scalar(text.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Node::Scalar(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Reads a leading, optionally signed integer the way `atoi` does:
    /// `"42abc"` is 42, `"abc"` is `None`.
    pub fn as_int(&self) -> Option<i64> {
        let s = self.as_str()?.trim_start();
        let digits_start = usize::from(s.starts_with(['+', '-']));
        let digits_len = s[digits_start..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits_len == 0 {
            return None;
        }
        s[..digits_start + digits_len].parse().ok()
    }

    /// `true`, `yes` and `1` are true; every other scalar and every container is false.
    pub fn as_bool(&self) -> bool {
        self.as_str().is_some_and(is_truthy)
    }

    pub fn as_sequence(&self) -> Option<&Vec<Node>> {
        if let Node::Sequence(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        if let Node::Map(entries) = self {
            Some(entries)
        } else {
            None
        }
    }

    /// Number of children. Scalars and null have none.
    pub fn len(&self) -> usize {
        match self {
            Node::Sequence(items) => items.len(),
            Node::Map(entries) => entries.len(),
            Node::Null | Node::Scalar(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_map()?.get(key)
    }

    pub fn at(&self, index: usize) -> Option<&Node> {
        self.as_sequence()?.get(index)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.as_map().is_some_and(|entries| entries.contains_key(key))
    }

    /// Walks a dotted path such as `modegroups.0.name`. Segments under a
    /// sequence are read as indices.
    pub fn lookup(&self, path: &str) -> Option<&Node> {
        if path.trim().is_empty() {
            return Some(self);
        }

        path.split('.').try_fold(self, |node, segment| match node {
            Node::Map(entries) => entries.get(segment),
            Node::Sequence(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Node::Null | Node::Scalar(_) => None,
        })
    }

    /// Scalar text, or empty for anything that is not a scalar.
    pub fn text(&self) -> &str {
        self.as_str().unwrap_or("")
    }
}

pub(crate) fn is_truthy(s: &str) -> bool {
    matches!(s, "true" | "yes" | "1")
}
