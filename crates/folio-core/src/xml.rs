//! Minimal XML writer for the TEI renderers.
//!
//! The renderers need byte-level control over their output (attribute order,
//! newline placement, and a deliberately limited escaping policy), so this is
//! a thin builder over a string buffer rather than a DOM. What it does
//! guarantee is balance: every `open` is matched by a `close` before the
//! buffer can be taken, so emitted fragments are always well-nested.

/// Escape literal ampersands for text content.
///
/// This is the only escaping the output format performs; `<` and quotes in
/// source text pass through unchanged. Widening the policy would change the
/// byte output consumers already parse.
pub fn escape_ampersands(text: &str) -> String {
    text.replace('&', "&amp;")
}

/// Streaming writer for well-nested XML fragments.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    stack: Vec<&'static str>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an element with the given attributes, in order.
    pub fn open(&mut self, tag: &'static str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self.buf.push('>');
        self.stack.push(tag);
        self
    }

    /// Close the most recently opened element.
    pub fn close(&mut self) -> &mut Self {
        let tag = self.stack.pop().expect("close without matching open");
        self.buf.push_str("</");
        self.buf.push_str(tag);
        self.buf.push('>');
        self
    }

    /// Emit `<tag attrs>text</tag>` in one step. Text is written verbatim;
    /// callers escape with [`escape_ampersands`] where the format requires it.
    pub fn element(&mut self, tag: &'static str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.open(tag, attrs);
        self.buf.push_str(text);
        self.close()
    }

    /// Emit a self-closing element: `<tag attrs />`.
    pub fn empty(&mut self, tag: &'static str, attrs: &[(&str, &str)]) -> &mut Self {
        self.start_tag(tag, attrs);
        self.buf.push_str(" />");
        self
    }

    /// Append text content verbatim.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.buf.push_str(text);
        self
    }

    /// Append an already-rendered fragment verbatim.
    pub fn raw(&mut self, fragment: &str) -> &mut Self {
        self.buf.push_str(fragment);
        self
    }

    pub fn newline(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    /// Take the rendered buffer. All opened elements must be closed.
    pub fn finish(self) -> String {
        debug_assert!(
            self.stack.is_empty(),
            "unclosed elements: {:?}",
            self.stack
        );
        self.buf
    }

    fn start_tag(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(tag);
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(value);
            self.buf.push('"');
        }
    }
}
