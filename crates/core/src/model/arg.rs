//! Argument value types carried in a codeblock's item slots.

use serde_json::Value;

/// Variable lifetime scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarScope {
    #[default]
    Unsaved,
    Saved,
    Local,
    /// Local to one program execution; crossing an extraction boundary
    /// requires explicit parameter threading.
    Line,
}

impl VarScope {
    pub fn wire_name(self) -> &'static str {
        match self {
            VarScope::Unsaved => "unsaved",
            VarScope::Saved => "saved",
            VarScope::Local => "local",
            VarScope::Line => "line",
        }
    }

    /// `game` is a legacy alias for `unsaved` still seen in old payloads.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "unsaved" | "game" => Some(VarScope::Unsaved),
            "saved" => Some(VarScope::Saved),
            "local" => Some(VarScope::Local),
            "line" => Some(VarScope::Line),
            _ => None,
        }
    }
}

/// Declared type of a formal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Text,
    StyledText,
    Number,
    Location,
    Vector,
    Sound,
    Particle,
    Potion,
    ItemStack,
    Any,
    Variable,
    List,
    Dict,
}

impl ParamType {
    pub fn wire_name(self) -> &'static str {
        match self {
            ParamType::Text => "txt",
            ParamType::StyledText => "comp",
            ParamType::Number => "num",
            ParamType::Location => "loc",
            ParamType::Vector => "vec",
            ParamType::Sound => "snd",
            ParamType::Particle => "part",
            ParamType::Potion => "pot",
            ParamType::ItemStack => "item",
            ParamType::Any => "any",
            ParamType::Variable => "var",
            ParamType::List => "list",
            ParamType::Dict => "dict",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "txt" => ParamType::Text,
            "comp" => ParamType::StyledText,
            "num" => ParamType::Number,
            "loc" => ParamType::Location,
            "vec" => ParamType::Vector,
            "snd" => ParamType::Sound,
            "part" => ParamType::Particle,
            "pot" => ParamType::Potion,
            "item" => ParamType::ItemStack,
            "any" => ParamType::Any,
            "var" => ParamType::Variable,
            "list" => ParamType::List,
            "dict" => ParamType::Dict,
            _ => return None,
        })
    }
}

/// A numeric literal, or the raw text of an expression the platform evaluates
/// itself (e.g. `%math(...)%`). Keeping the raw text preserves it exactly
/// across a decode/encode round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Literal(f64),
    Expression(String),
}

impl Number {
    /// Parse wire text: plain decimal literals become `Literal`, anything else
    /// is kept verbatim as `Expression`.
    pub fn parse(text: &str) -> Self {
        if is_numeric_literal(text) {
            if let Ok(value) = text.parse::<f64>() {
                return Number::Literal(value);
            }
        }
        Number::Expression(text.to_string())
    }

    /// The text emitted into the wire document. Whole-valued literals print
    /// without a trailing `.0`.
    pub fn wire_text(&self) -> String {
        match self {
            Number::Literal(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    format!("{value}")
                }
            }
            Number::Expression(text) => text.clone(),
        }
    }
}

/// Matches an optional sign, optional integer digits, an optional decimal
/// point, and at least one trailing digit. Deliberately narrower than
/// `f64::from_str`: exponents, `inf` and `nan` stay expressions.
fn is_numeric_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (head, tail) = match unsigned.split_once('.') {
        Some((head, tail)) => (head, tail),
        None => ("", unsigned),
    };
    !tail.is_empty()
        && head.chars().all(|c| c.is_ascii_digit())
        && tail.chars().all(|c| c.is_ascii_digit())
}

/// A formal parameter in a function/process definition header.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub param_type: ParamType,
    pub plural: bool,
    pub optional: bool,
    pub description: Option<String>,
    pub note: Option<String>,
    /// Only legal when the parameter is optional and non-plural; the codec
    /// drops it with a warning otherwise.
    pub default_value: Option<Box<ArgValue>>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: ParamType) -> Self {
        Self {
            name: name.into(),
            param_type,
            plural: false,
            optional: false,
            description: None,
            note: None,
            default_value: None,
        }
    }

    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_default(mut self, default_value: ArgValue) -> Self {
        self.default_value = Some(Box::new(default_value));
        self
    }
}

/// The tagged union of values an argument slot can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Plain string (`txt`).
    Text(String),
    /// Styled text component (`comp`).
    StyledText(String),
    /// Numeric literal or raw expression (`num`).
    Number(Number),
    /// Opaque item-stack payload (`item`); carried through untouched.
    ItemStack(Value),
    /// World position (`loc`).
    Location { x: f64, y: f64, z: f64, pitch: f64, yaw: f64 },
    /// Variable reference (`var`).
    Variable { name: String, scope: VarScope },
    /// Sound descriptor (`snd`).
    Sound { name: String, pitch: f64, volume: f64 },
    /// Potion effect descriptor (`pot`).
    Potion { effect: String, duration: i64, amplifier: i64 },
    /// Opaque particle payload (`part`); carried through untouched.
    Particle(Value),
    /// Direction/magnitude triple (`vec`).
    Vector { x: f64, y: f64, z: f64 },
    /// Live game value reference (`g_val`).
    GameValue { name: String, target: String },
    /// Formal parameter descriptor (`pn_el`); only valid in definition headers.
    Parameter(Parameter),
    /// Tag-option marker (`bl_tag`). Produced internally during encode and
    /// consumed during decode; calling code never constructs one directly.
    TagMarker { tag: String, option: String },
}

/// One argument slot: a value plus an optional explicit slot index.
///
/// Arguments without an explicit slot are assigned their positional index at
/// encode time.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub slot: Option<u32>,
    pub value: ArgValue,
}

impl Argument {
    pub fn new(value: ArgValue) -> Self {
        Self { slot: None, value }
    }

    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = Some(slot);
        self
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(ArgValue::Text(value.into()))
    }

    pub fn styled_text(value: impl Into<String>) -> Self {
        Self::new(ArgValue::StyledText(value.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::new(ArgValue::Number(Number::Literal(value)))
    }

    pub fn number_expr(text: impl Into<String>) -> Self {
        Self::new(ArgValue::Number(Number::Expression(text.into())))
    }

    pub fn location(x: f64, y: f64, z: f64, pitch: f64, yaw: f64) -> Self {
        Self::new(ArgValue::Location { x, y, z, pitch, yaw })
    }

    pub fn variable(name: impl Into<String>, scope: VarScope) -> Self {
        Self::new(ArgValue::Variable { name: name.into(), scope })
    }

    /// Shorthand for the scope the slicer threads across extraction
    /// boundaries.
    pub fn line_variable(name: impl Into<String>) -> Self {
        Self::variable(name, VarScope::Line)
    }

    pub fn sound(name: impl Into<String>, pitch: f64, volume: f64) -> Self {
        Self::new(ArgValue::Sound { name: name.into(), pitch, volume })
    }

    pub fn potion(effect: impl Into<String>, duration: i64, amplifier: i64) -> Self {
        Self::new(ArgValue::Potion { effect: effect.into(), duration, amplifier })
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Self {
        Self::new(ArgValue::Vector { x, y, z })
    }

    pub fn game_value(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(ArgValue::GameValue { name: name.into(), target: target.into() })
    }

    pub fn item_stack(payload: Value) -> Self {
        Self::new(ArgValue::ItemStack(payload))
    }

    pub fn particle(payload: Value) -> Self {
        Self::new(ArgValue::Particle(payload))
    }

    pub fn parameter(parameter: Parameter) -> Self {
        Self::new(ArgValue::Parameter(parameter))
    }
}
