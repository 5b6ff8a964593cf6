use std::collections::HashMap;

use super::super::ast::NodeId;
use super::symbol_table::ScopeId;
use super::types::TypeId;

/// TreeDecorations is the side table the passes communicate through. Three
/// partial maps keyed on node identity: the owning scope of scope carrying
/// nodes, the inferred type of expressions and resolved type specs, and the
/// l-value flag of expressions. Each decoration is written once by exactly
/// one pass; reading a decoration the writing pass never produced is a
/// programmer error and aborts.
#[derive(Debug, Default)]
pub struct TreeDecorations {
    scopes: HashMap<NodeId, ScopeId>,
    types: HashMap<NodeId, TypeId>,
    lvalues: HashMap<NodeId, bool>
}

impl TreeDecorations {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn put_scope(&mut self, node: NodeId, scope: ScopeId) {
        let previous = self.scopes.insert(node, scope);
        debug_assert!(previous.is_none(), "Scope decoration written twice for {:?}", node);
    }

    pub fn get_scope(&self, node: NodeId) -> ScopeId {
        *self.scopes.get(&node)
            .unwrap_or_else(|| panic!("Node {:?} carries no scope decoration", node))
    }

    pub fn put_type(&mut self, node: NodeId, ty: TypeId) {
        let previous = self.types.insert(node, ty);
        debug_assert!(previous.is_none(), "Type decoration written twice for {:?}", node);
    }

    pub fn get_type(&self, node: NodeId) -> TypeId {
        *self.types.get(&node)
            .unwrap_or_else(|| panic!("Node {:?} carries no type decoration", node))
    }

    pub fn put_is_lvalue(&mut self, node: NodeId, is_lvalue: bool) {
        let previous = self.lvalues.insert(node, is_lvalue);
        debug_assert!(previous.is_none(), "L-value decoration written twice for {:?}", node);
    }

    pub fn get_is_lvalue(&self, node: NodeId) -> bool {
        *self.lvalues.get(&node)
            .unwrap_or_else(|| panic!("Node {:?} carries no l-value decoration", node))
    }
}
