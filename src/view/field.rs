use crate::registry::{FieldKind, FieldSchema};

/// Minimum content height of an auto-resizing text field.
const MIN_CONTENT_HEIGHT: f64 = 80.0;
/// Space the node needs around the text field.
const NODE_CHROME_HEIGHT: f64 = 120.0;
/// Changes at or below this are not reported.
const RESIZE_THRESHOLD: f64 = 5.0;

/// What a form widget needs to render one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub schema: &'a FieldSchema,
    /// The current value, empty when the field has not been set.
    pub value: &'a str,
}

impl<'a> FieldView<'a> {
    pub fn key(&self) -> &'a str {
        &self.schema.key
    }

    pub fn label(&self) -> &'a str {
        &self.schema.label
    }

    pub fn kind(&self) -> &'a FieldKind {
        &self.schema.kind
    }

    pub fn placeholder(&self) -> Option<&'a str> {
        self.schema.placeholder.as_deref()
    }

    pub fn auto_resize(&self) -> bool {
        self.schema.auto_resize()
    }

    /// Whether the widget should forward `input` to the store.
    pub fn accepts(&self, input: &str) -> bool {
        self.schema.kind.accepts(input)
    }
}

/// Turns content height measurements of an auto-resizing field into node height hints.
#[derive(Debug, Clone, Default)]
pub struct AutoResize {
    last_height: f64,
}

impl AutoResize {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node height to apply, or `None` when the change is negligible.
    pub fn observe(&mut self, content_height: f64) -> Option<f64> {
        let height = content_height.max(MIN_CONTENT_HEIGHT);
        if (self.last_height - height).abs() <= RESIZE_THRESHOLD {
            return None;
        }
        self.last_height = height;
        Some(height + NODE_CHROME_HEIGHT)
    }
}
