use super::frame::{IndentFrame, Pending, Slot};
use super::*;

/// Builds a [`Node`] tree from classified lines using an indent stack.
pub(super) struct TreeBuilder<'o> {
    options: &'o ParseOptions,
    stack: Vec<IndentFrame>,
}

impl<'o> TreeBuilder<'o> {
    pub(super) fn new(options: &'o ParseOptions) -> Self {
        TreeBuilder {
            options,
            stack: vec![IndentFrame::root()],
        }
    }

    pub(super) fn feed(&mut self, line: &Line<'_>) -> Result<(), ModeError> {
        let number = line.number + 1;
        let payload = classify(line.content, number, line.column, self.options)?;
        self.place(line.indent as isize, payload, number)
    }

    pub(super) fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close_top();
        }
        match self.stack.pop() {
            Some(root) => root.into_node().1,
            None => Node::Map(Default::default()),
        }
    }

    fn place(&mut self, indent: isize, payload: Payload<'_>, line: usize) -> Result<(), ModeError> {
        self.close_scopes(indent, matches!(payload, Payload::SequenceItem { .. }));

        if self.stack.last().is_some_and(IndentFrame::is_scalar) {
            tracing::warn!(line, "ignoring line nested under a scalar item");
            return Ok(());
        }

        // Must run before the parent's kind is fixed.
        let opens_frame = matches!(payload, Payload::SequenceItem { .. } | Payload::KeyBlock { .. });
        if opens_frame && !self.has_room(line)? {
            return Ok(());
        }

        let Some(top) = self.stack.last_mut() else {
            return Ok(());
        };

        match payload {
            Payload::SequenceItem { rest, offset, column } => {
                if !top.accepts_items() {
                    tracing::warn!(line, "ignoring sequence item inside a mapping");
                    return Ok(());
                }
                self.push(IndentFrame::new(indent, Slot::Item, Pending::Empty));
                if rest.is_empty() {
                    return Ok(());
                }
                // The item's own payload behaves like a line indented to where it starts.
                let nested = classify(rest, line, column, self.options)?;
                self.place(indent + offset as isize, nested, line)
            }
            Payload::KeyValue { key, value } => {
                if !top.accepts_keys() {
                    tracing::warn!(line, key = %key, "ignoring mapping entry inside a sequence");
                    return Ok(());
                }
                top.attach(Slot::Key(key), Node::Scalar(value));
                Ok(())
            }
            Payload::KeyBlock { key } => {
                if !top.accepts_keys() {
                    tracing::warn!(line, key = %key, "ignoring mapping entry inside a sequence");
                    return Ok(());
                }
                self.push(IndentFrame::new(indent, Slot::Key(key), Pending::Empty));
                Ok(())
            }
            Payload::Scalar(text) => {
                if top.is_open_item() {
                    top.pending = Pending::Scalar(text);
                } else {
                    tracing::warn!(line, "ignoring bare scalar; continuation lines are not supported");
                }
                Ok(())
            }
        }
    }

    /// Closes every container whose scope ended before a line at `indent`.
    /// Must run before the line creates anything.
    fn close_scopes(&mut self, indent: isize, is_item: bool) {
        while self.stack.len() > 1 {
            let Some(top) = self.stack.last_mut() else {
                break;
            };
            if top.indent < indent {
                break;
            }
            if is_item && top.indent == indent && top.holds_indentless_items() {
                top.indentless = true;
                break;
            }
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        tracing::trace!(indent = frame.indent, depth = self.stack.len(), "closing frame");
        let (slot, node) = frame.into_node();
        if let Some(parent) = self.stack.last_mut() {
            if !parent.attach(slot, node) {
                tracing::warn!("dropping child that does not fit its container");
            }
        }
    }

    /// Returns `Ok(false)` when a lenient parse drops a line past the depth bound.
    fn has_room(&self, line: usize) -> Result<bool, ModeError> {
        if self.stack.len() < self.options.max_depth {
            return Ok(true);
        }
        if self.options.strict {
            return Err(ModeError::NestingTooDeep {
                depth: self.options.max_depth,
                line,
                hint: Some("Flatten the structure or raise max_depth".into()),
                code: Some(106),
            });
        }
        tracing::warn!(line, max_depth = self.options.max_depth, "dropping line past the nesting limit");
        Ok(false)
    }

    fn push(&mut self, frame: IndentFrame) {
        tracing::trace!(indent = frame.indent, depth = self.stack.len(), "opening frame");
        self.stack.push(frame);
    }
}
