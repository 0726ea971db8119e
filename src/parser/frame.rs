use crate::ast::{Mapping, Node};

/// Where a finished container goes in its parent.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Slot {
    Root,
    Key(String),
    Item,
}

/// A container still being filled. Its kind is fixed by the first child.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Pending {
    Empty,
    Scalar(String),
    Sequence(Vec<Node>),
    Map(Mapping),
}

/// One open container on the indent stack, together with the indent of the
/// line that opened it. The frame owns the container until it is closed and
/// handed to the frame below.
#[derive(Debug)]
pub(super) struct IndentFrame {
    pub(super) indent: isize,
    pub(super) slot: Slot,
    pub(super) pending: Pending,
    /// Set on a `key:` block whose sequence items sit at the key's own indent.
    pub(super) indentless: bool,
}

impl IndentFrame {
    pub(super) fn root() -> Self {
        Self::new(-1, Slot::Root, Pending::Empty)
    }

    pub(super) fn new(indent: isize, slot: Slot, pending: Pending) -> Self {
        IndentFrame { indent, slot, pending, indentless: false }
    }

    pub(super) fn accepts_keys(&mut self) -> bool {
        match self.pending {
            Pending::Empty => {
                self.pending = Pending::Map(Mapping::new());
                true
            }
            Pending::Map(_) => true,
            Pending::Scalar(_) | Pending::Sequence(_) => false,
        }
    }

    pub(super) fn accepts_items(&mut self) -> bool {
        match self.pending {
            Pending::Empty => {
                self.pending = Pending::Sequence(Vec::new());
                true
            }
            Pending::Sequence(_) => true,
            Pending::Scalar(_) | Pending::Map(_) => false,
        }
    }

    /// A `key:` block may hold `- item` lines written at the key's own indent.
    pub(super) fn holds_indentless_items(&self) -> bool {
        matches!(self.slot, Slot::Key(_))
            && match self.pending {
                Pending::Empty => true,
                Pending::Sequence(_) => self.indentless,
                Pending::Scalar(_) | Pending::Map(_) => false,
            }
    }

    pub(super) fn is_open_item(&self) -> bool {
        self.slot == Slot::Item && self.pending == Pending::Empty
    }

    pub(super) fn is_scalar(&self) -> bool {
        matches!(self.pending, Pending::Scalar(_))
    }

    /// Adds a finished child. Returns false when the slot does not fit the
    /// container, which the caller already ruled out when opening the child.
    pub(super) fn attach(&mut self, slot: Slot, node: Node) -> bool {
        match (slot, &mut self.pending) {
            (Slot::Key(key), Pending::Map(entries)) => {
                if entries.insert(key, node) {
                    tracing::trace!("repeated key, lookups see the last value");
                }
                true
            }
            (Slot::Item, Pending::Sequence(items)) => {
                items.push(node);
                true
            }
            _ => false,
        }
    }

    pub(super) fn into_node(self) -> (Slot, Node) {
        let node = match self.pending {
            Pending::Empty => match self.slot {
                Slot::Root => Node::Map(Mapping::new()),
                Slot::Key(_) | Slot::Item => Node::Null,
            },
            Pending::Scalar(text) => Node::Scalar(text),
            Pending::Sequence(items) => Node::Sequence(items),
            Pending::Map(entries) => Node::Map(entries),
        };
        (self.slot, node)
    }
}
