use regex::Regex;
use std::sync::LazyLock;

/// The widget kind of a field, with the data each kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    ShortText,
    /// One value out of a fixed list.
    Choice { options: Vec<String> },
    /// Multi-line text. When `auto_resize` is set the widget reports height hints.
    LongText { auto_resize: bool },
    /// Free text filtered to decimal numbers by the widget.
    Numeric,
}

impl FieldKind {
    /// Advisory input filter used by form widgets.
    ///
    /// Numeric fields accept the empty string or an optionally negative decimal
    /// that may still be incomplete (`"-"`, `"1."`, `".5"`). Every other kind
    /// accepts anything.
    pub fn accepts(&self, input: &str) -> bool {
        match self {
            FieldKind::Numeric => PARTIAL_DECIMAL.is_match(input),
            FieldKind::ShortText | FieldKind::Choice { .. } | FieldKind::LongText { .. } => true,
        }
    }
}

static PARTIAL_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").expect("valid numeric pattern"));

/// How a field obtains its initial value.
#[derive(Debug, Clone)]
pub enum DefaultValue {
    Literal(String),
    /// Computed from the freshly issued node identifier.
    DerivedFromId(fn(&str) -> String),
}

impl DefaultValue {
    pub fn resolve(&self, node_id: &str) -> String {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::DerivedFromId(derive) => derive(node_id),
        }
    }
}

/// Describes one editable parameter of a node type.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub default: DefaultValue,
    pub placeholder: Option<String>,
}

impl FieldSchema {
    pub fn new(key: &str, label: &str, kind: FieldKind, default: DefaultValue) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            default,
            placeholder: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn auto_resize(&self) -> bool {
        matches!(self.kind, FieldKind::LongText { auto_resize: true })
    }

    /// The selectable options, empty for non-choice fields.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Choice { options } => options,
            _ => &[],
        }
    }
}
