use super::definition::{NodeMeta, NodeTypeDefinition, Size};
use super::ports::{DynamicPortRule, PortDecl, PortSide, PortSpec};
use super::schema::{DefaultValue, FieldKind, FieldSchema};
use super::RegistryBuilder;
use crate::error::SchemaError;

const INPUT_KINDS: [&str; 4] = ["Text", "Image", "File", "Audio"];
const OUTPUT_KINDS: [&str; 5] = ["Text", "Image", "File", "Audio", "JSON"];
const LLM_MODELS: [&str; 5] = ["GPT-4", "GPT-3.5", "Claude-3", "Gemini Pro", "Llama 3"];
const HTTP_METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];

/// Matches `{{ name }}` references inside a text template.
pub const TEMPLATE_VARIABLE_PATTERN: &str = r"\{\{\s*([a-zA-Z_$][a-zA-Z0-9_$]*)\s*\}\}";

fn meta(
    title: &str,
    icon: &str,
    category: &str,
    color: &str,
    size: Size,
    resizable: bool,
    description: &str,
) -> NodeMeta {
    NodeMeta {
        title: title.to_string(),
        icon: Some(icon.to_string()),
        category: Some(category.to_string()),
        color: color.to_string(),
        default_size: size,
        resizable,
        show_in_palette: true,
        description: Some(description.to_string()),
    }
}

fn literal(value: &str) -> DefaultValue {
    DefaultValue::Literal(value.to_string())
}

fn choice(options: &[&str]) -> FieldKind {
    FieldKind::Choice {
        options: options.iter().map(|o| o.to_string()).collect(),
    }
}

fn ports(sources: Vec<PortDecl>, targets: Vec<PortDecl>) -> PortSpec {
    PortSpec {
        sources,
        targets,
        dynamic: None,
    }
}

/// Registers the stock node types on `builder`.
pub(super) fn register_builtin_types(
    builder: RegistryBuilder,
) -> Result<RegistryBuilder, SchemaError> {
    let text_ports = PortSpec {
        sources: vec![PortDecl::new("output", "out")],
        targets: Vec::new(),
        dynamic: Some(DynamicPortRule::compile(
            "text",
            "text",
            TEMPLATE_VARIABLE_PATTERN,
            PortSide::Left,
        )?),
    };

    Ok(builder
        .with_node_type(NodeTypeDefinition {
            id: "customInput".to_string(),
            meta: meta(
                "Input",
                "📥",
                "source",
                "node-input",
                Size::new(240.0, 140.0),
                false,
                "Receive input data",
            ),
            fields: vec![
                FieldSchema::new(
                    "name",
                    "Name",
                    FieldKind::ShortText,
                    DefaultValue::DerivedFromId(|id| id.replace("customInput-", "input_")),
                )
                .with_placeholder("Enter input name..."),
                FieldSchema::new("type", "Type", choice(&INPUT_KINDS), literal(INPUT_KINDS[0])),
            ],
            ports: ports(vec![PortDecl::new("output", "out")], Vec::new()),
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "customOutput".to_string(),
            meta: meta(
                "Output",
                "📤",
                "sink",
                "node-output",
                Size::new(240.0, 140.0),
                false,
                "Output final results",
            ),
            fields: vec![
                FieldSchema::new(
                    "name",
                    "Name",
                    FieldKind::ShortText,
                    DefaultValue::DerivedFromId(|id| id.replace("customOutput-", "output_")),
                )
                .with_placeholder("Enter output name..."),
                FieldSchema::new(
                    "type",
                    "Type",
                    choice(&OUTPUT_KINDS),
                    literal(OUTPUT_KINDS[0]),
                ),
            ],
            ports: ports(Vec::new(), vec![PortDecl::new("input", "in")]),
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "llm".to_string(),
            meta: meta(
                "LLM",
                "🤖",
                "processor",
                "node-llm",
                Size::new(280.0, 180.0),
                true,
                "Large Language Model processing",
            ),
            fields: vec![
                FieldSchema::new("model", "Model", choice(&LLM_MODELS), literal(LLM_MODELS[0])),
                FieldSchema::new("temperature", "Temperature", FieldKind::Numeric, literal("0.7"))
                    .with_placeholder("0.0 - 2.0"),
            ],
            ports: ports(
                vec![PortDecl::new("response", "response")],
                vec![
                    PortDecl::new("system", "system"),
                    PortDecl::new("prompt", "prompt"),
                ],
            ),
            content: Some("Process text with AI".to_string()),
        })
        .with_node_type(NodeTypeDefinition {
            id: "text".to_string(),
            meta: meta(
                "Text",
                "📝",
                "processor",
                "node-text",
                Size::new(280.0, 160.0),
                true,
                "Text with variable support",
            ),
            fields: vec![
                FieldSchema::new(
                    "text",
                    "Text",
                    FieldKind::LongText { auto_resize: true },
                    literal(""),
                )
                .with_placeholder("Enter text... Use {{variable}} for dynamic inputs"),
            ],
            ports: text_ports,
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "math".to_string(),
            meta: meta(
                "Math",
                "🔢",
                "processor",
                "node-math",
                Size::new(240.0, 120.0),
                false,
                "Mathematical operations",
            ),
            fields: vec![
                FieldSchema::new(
                    "expression",
                    "Expression",
                    FieldKind::ShortText,
                    literal("a + b"),
                )
                .with_placeholder("e.g., a + b * 2"),
            ],
            ports: ports(
                vec![PortDecl::new("result", "result")],
                vec![PortDecl::new("a", "a"), PortDecl::new("b", "b")],
            ),
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "delay".to_string(),
            meta: meta(
                "Delay",
                "⏱️",
                "utility",
                "node-delay",
                Size::new(200.0, 100.0),
                false,
                "Add time delay",
            ),
            fields: vec![
                FieldSchema::new("ms", "Delay (ms)", FieldKind::Numeric, literal("1000"))
                    .with_placeholder("Milliseconds"),
            ],
            ports: ports(
                vec![PortDecl::new("output", "out")],
                vec![PortDecl::new("input", "in")],
            ),
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "logger".to_string(),
            meta: meta(
                "Logger",
                "📋",
                "utility",
                "node-logger",
                Size::new(200.0, 80.0),
                false,
                "Log data for debugging",
            ),
            fields: vec![
                FieldSchema::new("label", "Label", FieldKind::ShortText, literal("Log"))
                    .with_placeholder("Log label..."),
            ],
            ports: ports(Vec::new(), vec![PortDecl::new("input", "in")]),
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "switch".to_string(),
            meta: meta(
                "Switch",
                "🔀",
                "logic",
                "node-switch",
                Size::new(240.0, 140.0),
                false,
                "Conditional branching",
            ),
            fields: vec![
                FieldSchema::new(
                    "condition",
                    "Condition",
                    FieldKind::ShortText,
                    literal("x > 0"),
                )
                .with_placeholder("e.g., x > 0"),
            ],
            ports: ports(
                vec![PortDecl::new("true", "true"), PortDecl::new("false", "false")],
                vec![PortDecl::new("input", "in")],
            ),
            content: None,
        })
        .with_node_type(NodeTypeDefinition {
            id: "api".to_string(),
            meta: meta(
                "API Call",
                "🌐",
                "integration",
                "node-api",
                Size::new(280.0, 180.0),
                true,
                "Make HTTP API requests",
            ),
            fields: vec![
                FieldSchema::new(
                    "method",
                    "Method",
                    choice(&HTTP_METHODS),
                    literal(HTTP_METHODS[0]),
                ),
                FieldSchema::new("url", "URL", FieldKind::ShortText, literal(""))
                    .with_placeholder("https://api.example.com/endpoint"),
            ],
            ports: ports(
                vec![PortDecl::new("response", "response")],
                vec![PortDecl::new("url", "url"), PortDecl::new("body", "body")],
            ),
            content: None,
        }))
}
