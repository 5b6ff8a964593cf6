use super::types::{TypeId, TypesMgr};

/// Scope id defines the unique id associated with a scope created during
/// the symbols pass. Ids stay valid for the whole compilation: the later
/// passes re-enter the scopes the first pass built by id, never by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Symbol kinds associated with an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    LocalVar,
    Parameter,
    Function
}

/// Symbol defines the data associated with a declared identifier.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: TypeId
}

/// One lexical scope. Symbols are kept in declaration order; for function
/// scopes that order is the parameter passing order the code generator
/// relies on.
#[derive(Debug)]
struct Scope {
    #[allow(dead_code)] // Kept for debugging dumps of the table
    name: String,
    symbols: Vec<Symbol>
}

/// SymTable holds every scope created during a compilation plus the stack
/// of currently open scopes. The symbols pass creates scopes with
/// `push_new_scope`; the type check and code generation passes re-enter
/// them with `push_this_scope` using the ids the first pass decorated onto
/// the tree. The table also carries one mutable cell with the return type
/// of the function under analysis, read by return statements.
pub struct SymTable {
    scopes: Vec<Scope>,
    stack: Vec<ScopeId>,
    current_function_ty: Option<TypeId>
}

impl SymTable {
    pub fn new() -> Self {
        SymTable {
            scopes: vec![],
            stack: vec![],
            current_function_ty: None
        }
    }

    /// Create a fresh scope and make it the current one.
    pub fn push_new_scope(&mut self, name: &str) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            name: String::from(name),
            symbols: vec![]
        });
        self.stack.push(id);
        id
    }

    /// Re-enter a scope created earlier, identified by its stable id.
    pub fn push_this_scope(&mut self, id: ScopeId) {
        assert!(id.0 < self.scopes.len(), "Scope id {:?} was never created", id);
        self.stack.push(id);
    }

    pub fn pop_scope(&mut self) {
        self.stack.pop().expect("Scope stack underflow");
    }

    fn current_scope(&self) -> &Scope {
        let id = self.stack.last().expect("No scope is active");
        &self.scopes[id.0]
    }

    fn current_scope_mut(&mut self) -> &mut Scope {
        let id = self.stack.last().expect("No scope is active");
        &mut self.scopes[id.0]
    }

    /// Lookup restricted to the innermost open scope. Used by the symbols
    /// pass to detect duplicate declarations.
    pub fn find_in_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.current_scope().symbols.iter().find(|symbol| symbol.name == name)
    }

    /// Lookup through the whole stack of open scopes, innermost first.
    pub fn find_in_stack(&self, name: &str) -> Option<&Symbol> {
        for id in self.stack.iter().rev() {
            if let Some(symbol) = self.scopes[id.0].symbols.iter().find(|symbol| symbol.name == name) {
                return Some(symbol);
            }
        }
        None
    }

    fn add_symbol(&mut self, name: &str, kind: SymbolKind, ty: TypeId) {
        self.current_scope_mut().symbols.push(Symbol {
            name: String::from(name),
            kind,
            ty
        });
    }

    pub fn add_local_var(&mut self, name: &str, ty: TypeId) {
        self.add_symbol(name, SymbolKind::LocalVar, ty);
    }

    pub fn add_parameter(&mut self, name: &str, ty: TypeId) {
        self.add_symbol(name, SymbolKind::Parameter, ty);
    }

    pub fn add_function(&mut self, name: &str, ty: TypeId) {
        self.add_symbol(name, SymbolKind::Function, ty);
    }

    pub fn is_function_class(&self, name: &str) -> bool {
        matches!(self.find_in_stack(name), Some(symbol) if symbol.kind == SymbolKind::Function)
    }

    /// True when the name resolves to a parameter of the enclosing
    /// function. Array parameters hold references, so code generation
    /// materialises their base address before indexing.
    pub fn is_parameter_class(&self, name: &str) -> bool {
        matches!(self.find_in_stack(name), Some(symbol) if symbol.kind == SymbolKind::Parameter)
    }

    pub fn set_current_function_ty(&mut self, ty: TypeId) {
        self.current_function_ty = Some(ty);
    }

    pub fn get_current_function_ty(&self) -> TypeId {
        self.current_function_ty.expect("No function is under analysis")
    }

    /// True unless the current scope declares a function `main` with no
    /// parameters and a void return type.
    pub fn no_main_properly_declared(&self, types: &TypesMgr) -> bool {
        match self.find_in_current_scope("main") {
            Some(symbol) if symbol.kind == SymbolKind::Function => {
                !(types.get_num_of_parameters(symbol.ty) == 0
                    && types.is_void_ty(types.get_func_return_type(symbol.ty)))
            }
            _ => true
        }
    }
}
