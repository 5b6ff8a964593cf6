use super::super::ast::{FunctionDef, Program, TypeSpec, TypeSpecKind, VariableDecl};
use super::decorations::TreeDecorations;
use super::errors::SemErrors;
use super::symbol_table::SymTable;
use super::types::{TypeId, TypesMgr};

/// SymbolsVisitor is the first analysis pass. It walks the tree once to
/// create the lexical structure: a scope per function below the global
/// scope, every declared parameter, local variable and function registered
/// in its scope, and the scope ids decorated onto the program and function
/// nodes so the later passes can re-enter the exact same scopes.
///
/// A duplicate declaration is reported and the offending entry skipped;
/// the pass never aborts.
pub(super) struct SymbolsVisitor<'a> {
    types: &'a mut TypesMgr,
    symbols: &'a mut SymTable,
    decorations: &'a mut TreeDecorations,
    errors: &'a mut SemErrors
}

impl<'a> SymbolsVisitor<'a> {
    pub fn new(
        types: &'a mut TypesMgr,
        symbols: &'a mut SymTable,
        decorations: &'a mut TreeDecorations,
        errors: &'a mut SemErrors
    ) -> Self {
        SymbolsVisitor {
            types,
            symbols,
            decorations,
            errors
        }
    }

    pub fn visit_program(&mut self, program: &Program) {
        let sc = self.symbols.push_new_scope("$global$");
        self.decorations.put_scope(program.id, sc);
        for function in &program.functions {
            self.visit_function(function);
        }
        self.symbols.pop_scope();
    }

    fn visit_function(&mut self, function: &FunctionDef) {
        let sc = self.symbols.push_new_scope(&function.name.name);
        self.decorations.put_scope(function.id, sc);

        let mut param_tys: Vec<TypeId> = vec![];
        for param in &function.params {
            if self.symbols.find_in_current_scope(&param.name.name).is_some() {
                self.errors.declared_ident(param.name.loc, &param.name.name);
            } else {
                let ty = self.visit_type(&param.type_spec);
                self.symbols.add_parameter(&param.name.name, ty);
                param_tys.push(ty);
            }
        }
        for decl in &function.declarations {
            self.visit_variable_decl(decl);
        }

        // The return type spec is resolved even for a duplicate function so
        // the type check pass always finds its decoration.
        let ret_ty = function.return_type.as_ref().map(|spec| self.visit_type(spec));

        self.symbols.pop_scope();

        if self.symbols.find_in_current_scope(&function.name.name).is_some() {
            self.errors.declared_ident(function.name.loc, &function.name.name);
        } else {
            let ret = match ret_ty {
                Some(ty) => ty,
                None => self.types.create_void_ty()
            };
            let func_ty = self.types.create_function_ty(param_tys, ret);
            self.symbols.add_function(&function.name.name, func_ty);
        }
    }

    fn visit_variable_decl(&mut self, decl: &VariableDecl) {
        let ty = self.visit_type(&decl.type_spec);
        for ident in &decl.names {
            if self.symbols.find_in_current_scope(&ident.name).is_some() {
                self.errors.declared_ident(ident.loc, &ident.name);
            } else {
                self.symbols.add_local_var(&ident.name, ty);
            }
        }
    }

    /// Resolve a source type spec into an interned type and decorate the
    /// spec node with the result.
    fn visit_type(&mut self, spec: &TypeSpec) -> TypeId {
        let ty = match spec.kind {
            TypeSpecKind::BASIC(basic) => self.types.create_basic_ty(basic),
            TypeSpecKind::ARRAY { size, element } => {
                let elem_ty = self.types.create_basic_ty(element);
                self.types.create_array_ty(size, elem_ty)
            }
        };
        self.decorations.put_type(spec.id, ty);
        ty
    }
}
