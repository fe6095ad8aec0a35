//! Codeblock value types: kinds, targets, brackets, and the block itself.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::arg::Argument;

/// The closed set of codeblock categories.
///
/// Every block in a template is exactly one of these; the codec dispatches on
/// this enum exhaustively, so an unhandled kind is a compile error rather than
/// a runtime warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Event,
    EntityEvent,
    FunctionDef,
    ProcessDef,
    CallFunction,
    StartProcess,
    PlayerAction,
    EntityAction,
    GameAction,
    SetVariable,
    SelectObject,
    Control,
    IfPlayer,
    IfEntity,
    IfGame,
    IfVariable,
    Repeat,
    Else,
    Bracket,
}

impl BlockKind {
    /// The name this kind carries in the wire document's `block` field.
    ///
    /// `Bracket` has no wire name; bracket blocks are discriminated by their
    /// `direct`/`type` fields instead.
    pub fn wire_name(self) -> &'static str {
        match self {
            BlockKind::Event => "event",
            BlockKind::EntityEvent => "entity_event",
            BlockKind::FunctionDef => "func",
            BlockKind::ProcessDef => "process",
            BlockKind::CallFunction => "call_func",
            BlockKind::StartProcess => "start_process",
            BlockKind::PlayerAction => "player_action",
            BlockKind::EntityAction => "entity_action",
            BlockKind::GameAction => "game_action",
            BlockKind::SetVariable => "set_var",
            BlockKind::SelectObject => "select_obj",
            BlockKind::Control => "control",
            BlockKind::IfPlayer => "if_player",
            BlockKind::IfEntity => "if_entity",
            BlockKind::IfGame => "if_game",
            BlockKind::IfVariable => "if_var",
            BlockKind::Repeat => "repeat",
            BlockKind::Else => "else",
            BlockKind::Bracket => "bracket",
        }
    }

    /// Inverse of [`wire_name`](Self::wire_name). `Bracket` is never parsed
    /// from a `block` field.
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "event" => BlockKind::Event,
            "entity_event" => BlockKind::EntityEvent,
            "func" => BlockKind::FunctionDef,
            "process" => BlockKind::ProcessDef,
            "call_func" => BlockKind::CallFunction,
            "start_process" => BlockKind::StartProcess,
            "player_action" => BlockKind::PlayerAction,
            "entity_action" => BlockKind::EntityAction,
            "game_action" => BlockKind::GameAction,
            "set_var" => BlockKind::SetVariable,
            "select_obj" => BlockKind::SelectObject,
            "control" => BlockKind::Control,
            "if_player" => BlockKind::IfPlayer,
            "if_entity" => BlockKind::IfEntity,
            "if_game" => BlockKind::IfGame,
            "if_var" => BlockKind::IfVariable,
            "repeat" => BlockKind::Repeat,
            "else" => BlockKind::Else,
            _ => return None,
        })
    }

    /// Kinds that may open a template.
    pub fn is_starter(self) -> bool {
        matches!(
            self,
            BlockKind::Event | BlockKind::EntityEvent | BlockKind::FunctionDef | BlockKind::ProcessDef
        )
    }

    pub fn is_event(self) -> bool {
        matches!(self, BlockKind::Event | BlockKind::EntityEvent)
    }

    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            BlockKind::IfPlayer | BlockKind::IfEntity | BlockKind::IfGame | BlockKind::IfVariable
        )
    }

    /// Kinds that head a bracketed scope (conditionals and `repeat`).
    pub fn is_scope_head(self) -> bool {
        self.is_conditional() || self == BlockKind::Repeat
    }

    /// Kinds whose `target` field is meaningful on the wire.
    pub fn is_target_bearing(self) -> bool {
        matches!(
            self,
            BlockKind::PlayerAction | BlockKind::EntityAction | BlockKind::IfPlayer | BlockKind::IfEntity
        )
    }

    /// Kinds whose name is a user-chosen definition/call name rather than an
    /// action from the catalog. On the wire these carry a `data` field.
    pub fn is_dynamic(self) -> bool {
        matches!(
            self,
            BlockKind::FunctionDef
                | BlockKind::ProcessDef
                | BlockKind::CallFunction
                | BlockKind::StartProcess
        )
    }

    /// Whether the catalog has entries for this kind at all.
    pub fn has_catalog_entry(self) -> bool {
        !matches!(self, BlockKind::Bracket | BlockKind::Else)
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Entity-selection modes for target-bearing blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    #[default]
    Selection,
    Default,
    Killer,
    Damager,
    Shooter,
    Victim,
    AllPlayers,
    Projectile,
    AllEntities,
    AllMobs,
    LastEntity,
}

impl Target {
    pub fn wire_name(self) -> &'static str {
        match self {
            Target::Selection => "Selection",
            Target::Default => "Default",
            Target::Killer => "Killer",
            Target::Damager => "Damager",
            Target::Shooter => "Shooter",
            Target::Victim => "Victim",
            Target::AllPlayers => "AllPlayers",
            Target::Projectile => "Projectile",
            Target::AllEntities => "AllEntities",
            Target::AllMobs => "AllMobs",
            Target::LastEntity => "LastEntity",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Some(match name {
            "Selection" => Target::Selection,
            "Default" => Target::Default,
            "Killer" => Target::Killer,
            "Damager" => Target::Damager,
            "Shooter" => Target::Shooter,
            "Victim" => Target::Victim,
            "AllPlayers" => Target::AllPlayers,
            "Projectile" => Target::Projectile,
            "AllEntities" => Target::AllEntities,
            "AllMobs" => Target::AllMobs,
            "LastEntity" => Target::LastEntity,
            _ => return None,
        })
    }
}

/// Which side of a scope a bracket block marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Open,
    Close,
}

impl Direction {
    pub fn wire_name(self) -> &'static str {
        match self {
            Direction::Open => "open",
            Direction::Close => "close",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "open" => Some(Direction::Open),
            "close" => Some(Direction::Close),
            _ => None,
        }
    }
}

/// Whether a bracket pair delimits a plain scope or a loop body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Plain,
    Loop,
}

impl ScopeKind {
    pub fn wire_name(self) -> &'static str {
        match self {
            ScopeKind::Plain => "norm",
            ScopeKind::Loop => "repeat",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "norm" => Some(ScopeKind::Plain),
            "repeat" => Some(ScopeKind::Loop),
            _ => None,
        }
    }
}

/// Bracket-specific payload, present exactly when `kind == BlockKind::Bracket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub direction: Direction,
    pub scope: ScopeKind,
}

/// One instruction or structural marker in a template.
///
/// Value object: built once through the constructors below and never mutated.
/// Transformations (slicing, decoding) always produce fresh blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub kind: BlockKind,
    /// Action name within the kind's namespace, or the user-chosen name for
    /// definition/call kinds. Empty for brackets and `else`.
    pub action: String,
    pub args: Vec<Argument>,
    pub target: Target,
    /// Sparse tag choices; anything unset resolves to the catalog default at
    /// encode time.
    pub tags: BTreeMap<String, String>,
    pub inverted: bool,
    pub sub_action: Option<String>,
    pub ls_cancel: bool,
    pub bracket: Option<Bracket>,
}

impl CodeBlock {
    fn base(kind: BlockKind, action: impl Into<String>, args: Vec<Argument>) -> Self {
        Self {
            kind,
            action: action.into(),
            args,
            target: Target::default(),
            tags: BTreeMap::new(),
            inverted: false,
            sub_action: None,
            ls_cancel: false,
            bracket: None,
        }
    }

    pub fn player_event(name: impl Into<String>) -> Self {
        Self::base(BlockKind::Event, name, Vec::new())
    }

    pub fn entity_event(name: impl Into<String>) -> Self {
        Self::base(BlockKind::EntityEvent, name, Vec::new())
    }

    /// Function definition header; `params` are the formal parameters shown in
    /// the header's argument slots.
    pub fn function_def(name: impl Into<String>, params: Vec<Argument>) -> Self {
        Self::base(BlockKind::FunctionDef, name, params)
    }

    pub fn process_def(name: impl Into<String>, params: Vec<Argument>) -> Self {
        Self::base(BlockKind::ProcessDef, name, params)
    }

    pub fn call_function(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::CallFunction, name, args)
    }

    pub fn start_process(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::StartProcess, name, args)
    }

    pub fn player_action(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::PlayerAction, name, args)
    }

    pub fn entity_action(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::EntityAction, name, args)
    }

    pub fn game_action(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::GameAction, name, args)
    }

    pub fn set_variable(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::SetVariable, name, args)
    }

    pub fn select_object(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::SelectObject, name, args)
    }

    pub fn control(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::Control, name, args)
    }

    pub fn if_player(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::IfPlayer, name, args)
    }

    pub fn if_entity(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::IfEntity, name, args)
    }

    pub fn if_game(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::IfGame, name, args)
    }

    pub fn if_variable(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::IfVariable, name, args)
    }

    pub fn repeat(name: impl Into<String>, args: Vec<Argument>) -> Self {
        Self::base(BlockKind::Repeat, name, args)
    }

    pub fn else_head() -> Self {
        Self::base(BlockKind::Else, "", Vec::new())
    }

    pub fn bracket(direction: Direction, scope: ScopeKind) -> Self {
        let mut block = Self::base(BlockKind::Bracket, "", Vec::new());
        block.bracket = Some(Bracket { direction, scope });
        block
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, option: impl Into<String>) -> Self {
        self.tags.insert(name.into(), option.into());
        self
    }

    pub fn with_tags(mut self, tags: BTreeMap<String, String>) -> Self {
        self.tags = tags;
        self
    }

    /// Negate a conditional (`NOT` attribute on the wire).
    pub fn invert(mut self) -> Self {
        self.inverted = true;
        self
    }

    pub fn with_sub_action(mut self, sub_action: impl Into<String>) -> Self {
        self.sub_action = Some(sub_action.into());
        self
    }

    /// Mark an event as cancelling the triggering interaction
    /// (`LS-CANCEL` attribute on the wire).
    pub fn ls_cancelled(mut self) -> Self {
        self.ls_cancel = true;
        self
    }

    /// Wrap `body` in this scope head's bracket pair.
    ///
    /// Nested scopes are built by nesting calls, so bracket pairing is correct
    /// by construction and no bracket-stack state exists anywhere.
    pub fn with_body(self, body: Vec<CodeBlock>) -> Vec<CodeBlock> {
        let scope = if self.kind == BlockKind::Repeat { ScopeKind::Loop } else { ScopeKind::Plain };
        let mut blocks = Vec::with_capacity(body.len() + 3);
        blocks.push(self);
        blocks.push(CodeBlock::bracket(Direction::Open, scope));
        blocks.extend(body);
        blocks.push(CodeBlock::bracket(Direction::Close, scope));
        blocks
    }

    /// The key used for catalog lookups: dynamic kinds share a single catalog
    /// entry under the fixed `dynamic` action name; every other kind looks up
    /// its own action.
    pub fn catalog_action(&self) -> &str {
        if self.kind.is_dynamic() {
            "dynamic"
        } else {
            &self.action
        }
    }

    /// Width of this block in the host platform's spatial layout.
    ///
    /// Scope heads (conditionals, `repeat`, `else`) and open brackets take one
    /// unit; everything else, close brackets included, takes two.
    pub fn footprint(&self) -> u32 {
        if self.kind.is_scope_head() || self.kind == BlockKind::Else {
            return 1;
        }
        if let Some(bracket) = &self.bracket {
            if bracket.direction == Direction::Open {
                return 1;
            }
        }
        2
    }
}

/// Wrap `body` as the alternate arm following a conditional or `repeat` scope.
///
/// Appended directly after the close bracket of the scope it belongs to.
pub fn else_arm(body: Vec<CodeBlock>) -> Vec<CodeBlock> {
    CodeBlock::else_head().with_body(body)
}
