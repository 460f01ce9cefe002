use crate::value::MapEntry;

use super::fields::Fields;

/// A top-level block of a definition: `#ui/base [...]` or `#ui/addon [...]`.
/// Both carry the same body grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum UiBlock {
    Base { body: Vec<UiNode> },
    Addon { body: Vec<UiNode> },
}

impl UiBlock {
    pub fn body(&self) -> &[UiNode] {
        match self {
            UiBlock::Base { body } | UiBlock::Addon { body } => body,
        }
    }

    pub fn is_base(&self) -> bool {
        matches!(self, UiBlock::Base { .. })
    }

    pub fn is_addon(&self) -> bool {
        matches!(self, UiBlock::Addon { .. })
    }
}

/// One classified element of a block body.
///
/// Maps are classified by their **first** entry key only; authors put the
/// discriminating key first in each map literal. Classified nodes keep the
/// whole map (discriminating entry included) as `fields`.
#[derive(Debug, Clone, PartialEq)]
pub enum UiNode {
    /// The layout-grouping marker symbol `ui/group`.
    Group { sym: String },
    /// Any other bare symbol, e.g. `ui/logic`, `ui/test`.
    Symbol { name: String },
    /// A map whose first key is `input`.
    Input { fields: Fields },
    /// A map whose first key is `output`.
    Output { fields: Fields },
    /// A logic-binding entry: first key `target`.
    TargetSource { fields: Fields },
    /// A test-case entry: first key `when`.
    WhenThen { fields: Fields },
    /// Fallback for any other first key; the original decoded map is kept
    /// for downstream reuse.
    Map { name: String, raw: Vec<MapEntry> },
}

impl UiNode {
    /// The projected fields of a classified map node, if any.
    pub fn fields(&self) -> Option<&Fields> {
        match self {
            UiNode::Input { fields }
            | UiNode::Output { fields }
            | UiNode::TargetSource { fields }
            | UiNode::WhenThen { fields } => Some(fields),
            _ => None,
        }
    }
}
