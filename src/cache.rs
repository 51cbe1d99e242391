use crate::block::ContentNode;

/// Remembers the nodes of the last rendered input.
///
/// Rendering the same string again returns the stored nodes; any other string
/// replaces them. Suited to a view that re-renders one message repeatedly.
#[derive(Debug, Default)]
pub struct MemoRenderer {
    last: Option<(String, Vec<ContentNode>)>,
}

impl MemoRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, content: &str) -> &[ContentNode] {
        let hit = matches!(&self.last, Some((input, _)) if input == content);
        if hit {
            tracing::trace!(len = content.len(), "memoized render hit");
        } else {
            self.last = Some((content.to_string(), crate::render(content)));
        }
        self.last.as_ref().map_or(&[][..], |(_, nodes)| nodes.as_slice())
    }

    /// Forget the stored render.
    pub fn clear(&mut self) {
        self.last = None;
    }
}
