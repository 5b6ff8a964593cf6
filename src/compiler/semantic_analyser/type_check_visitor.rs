use super::super::ast::{
    BinaryOperation,
    Expr,
    ExprKind,
    FunctionDef,
    Ident,
    Literal,
    Program,
    Stmt,
    UnaryOperation
};
use super::decorations::TreeDecorations;
use super::errors::SemErrors;
use super::symbol_table::SymTable;
use super::types::{TypeId, TypesMgr};

/// TypeCheckVisitor is the second analysis pass. It walks the tree inside
/// the scopes the symbols pass installed and decorates every expression
/// with its type and l-value flag while reporting type errors.
///
/// Errors are recoverable: a failed check yields the error type, which
/// absorbs every enclosing check so one mistake produces one diagnostic.
pub(super) struct TypeCheckVisitor<'a> {
    types: &'a mut TypesMgr,
    symbols: &'a mut SymTable,
    decorations: &'a mut TreeDecorations,
    errors: &'a mut SemErrors
}

impl<'a> TypeCheckVisitor<'a> {
    pub fn new(
        types: &'a mut TypesMgr,
        symbols: &'a mut SymTable,
        decorations: &'a mut TreeDecorations,
        errors: &'a mut SemErrors
    ) -> Self {
        TypeCheckVisitor {
            types,
            symbols,
            decorations,
            errors
        }
    }

    pub fn visit_program(&mut self, program: &Program) {
        let sc = self.decorations.get_scope(program.id);
        self.symbols.push_this_scope(sc);
        for function in &program.functions {
            self.visit_function(function);
        }
        if self.symbols.no_main_properly_declared(self.types) {
            self.errors.no_main_properly_declared(program.loc);
        }
        self.symbols.pop_scope();
    }

    fn visit_function(&mut self, function: &FunctionDef) {
        let sc = self.decorations.get_scope(function.id);
        self.symbols.push_this_scope(sc);

        let ret_ty = match &function.return_type {
            Some(spec) => self.decorations.get_type(spec.id),
            None => self.types.create_void_ty()
        };
        self.symbols.set_current_function_ty(ret_ty);

        for stmt in &function.body {
            self.visit_statement(stmt);
        }
        self.symbols.pop_scope();
    }

    fn visit_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::ASSIGNMENT { target, value, loc } => {
                self.visit_expr(target);
                self.visit_expr(value);
                let t1 = self.decorations.get_type(target.id);
                let t2 = self.decorations.get_type(value.id);
                if !self.types.is_error_ty(t1) && !self.types.is_error_ty(t2)
                    && !self.types.copyable_types(t1, t2) {
                    self.errors.incompatible_assignment(*loc);
                }
                if !self.types.is_error_ty(t1) && !self.decorations.get_is_lvalue(target.id) {
                    self.errors.non_referenceable_left_expr(target.loc);
                }
            }
            Stmt::IF { condition, then_branch, else_branch, loc } => {
                self.visit_expr(condition);
                let t1 = self.decorations.get_type(condition.id);
                if !self.types.is_error_ty(t1) && !self.types.is_boolean_ty(t1) {
                    self.errors.boolean_required(*loc);
                }
                self.visit_statements(then_branch);
                if let Some(else_branch) = else_branch {
                    self.visit_statements(else_branch);
                }
            }
            Stmt::WHILE_LOOP { condition, body, loc } => {
                self.visit_expr(condition);
                let t1 = self.decorations.get_type(condition.id);
                if !self.types.is_error_ty(t1) && !self.types.is_boolean_ty(t1) {
                    self.errors.boolean_required(*loc);
                }
                self.visit_statements(body);
            }
            Stmt::PROC_CALL { callee, arguments, .. } => {
                self.visit_ident(callee);
                let ident_ty = self.decorations.get_type(callee.id);
                if !self.types.is_function_ty(ident_ty) && !self.types.is_error_ty(ident_ty) {
                    self.errors.is_not_callable(callee.loc);
                }
                self.check_arguments(ident_ty, arguments, callee);
            }
            Stmt::READ { target, loc } => {
                self.visit_expr(target);
                let t1 = self.decorations.get_type(target.id);
                if !self.types.is_error_ty(t1) && !self.types.is_primitive_ty(t1)
                    && !self.types.is_function_ty(t1) {
                    self.errors.read_write_require_basic(*loc);
                }
                if !self.types.is_error_ty(t1) && !self.decorations.get_is_lvalue(target.id) {
                    self.errors.non_referenceable_expression(*loc);
                }
            }
            Stmt::WRITE_EXPR { expression, loc } => {
                self.visit_expr(expression);
                let t1 = self.decorations.get_type(expression.id);
                if !self.types.is_error_ty(t1) && !self.types.is_primitive_ty(t1) {
                    self.errors.read_write_require_basic(*loc);
                }
            }
            Stmt::WRITE_STRING { .. } => {}
            Stmt::RETURN { expression, loc } => {
                let ret_ty = match expression {
                    Some(expr) => {
                        self.visit_expr(expr);
                        self.decorations.get_type(expr.id)
                    }
                    None => self.types.create_void_ty()
                };
                let func_ty = self.symbols.get_current_function_ty();
                if !self.types.copyable_types(func_ty, ret_ty) {
                    self.errors.incompatible_return(*loc);
                }
            }
        }
    }

    /// Check argument types and arity against a callee type. Shared by
    /// statement and expression position calls, which only differ in how
    /// they treat the return value.
    fn check_arguments(&mut self, ident_ty: TypeId, arguments: &[Expr], callee: &Ident) {
        let num_params = if self.types.is_function_ty(ident_ty) {
            self.types.get_num_of_parameters(ident_ty)
        } else {
            0
        };
        for (i, arg) in arguments.iter().enumerate() {
            self.visit_expr(arg);
            if i < num_params {
                let expr_ty = self.decorations.get_type(arg.id);
                let param_ty = self.types.get_parameter_type(ident_ty, i);
                if !self.types.is_error_ty(expr_ty)
                    && !self.types.copyable_types(param_ty, expr_ty) {
                    self.errors.incompatible_parameter(arg.loc, i + 1);
                }
            }
        }
        if self.types.is_function_ty(ident_ty) && num_params != arguments.len() {
            self.errors.number_of_parameters(callee.loc);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::VALUE(literal) => {
                let ty = match literal {
                    Literal::INTVAL(_) => self.types.create_integer_ty(),
                    Literal::FLOATVAL(_) => self.types.create_float_ty(),
                    Literal::CHARVAL(_) => self.types.create_character_ty(),
                    Literal::BOOLVAL(_) => self.types.create_boolean_ty()
                };
                self.decorations.put_type(expr.id, ty);
                self.decorations.put_is_lvalue(expr.id, false);
            }
            ExprKind::IDENT(ident) => {
                self.visit_ident(ident);
                let ty = self.decorations.get_type(ident.id);
                let is_lvalue = self.decorations.get_is_lvalue(ident.id);
                self.decorations.put_type(expr.id, ty);
                self.decorations.put_is_lvalue(expr.id, is_lvalue);
            }
            ExprKind::ARRAY_ELEMENT { array, index } => {
                self.visit_ident(array);
                let ident_ty = self.decorations.get_type(array.id);
                if !self.types.is_error_ty(ident_ty) && !self.types.is_array_ty(ident_ty) {
                    self.errors.non_array_in_array_access(expr.loc);
                }
                self.visit_expr(index);
                let index_ty = self.decorations.get_type(index.id);
                if !self.types.is_error_ty(index_ty) && !self.types.is_integer_ty(index_ty) {
                    self.errors.non_integer_index_in_array_access(index.loc);
                }
                if self.types.is_array_ty(ident_ty) {
                    let elem_ty = self.types.get_array_elem_type(ident_ty);
                    self.decorations.put_type(expr.id, elem_ty);
                    self.decorations.put_is_lvalue(expr.id, true);
                } else {
                    let error_ty = self.types.create_error_ty();
                    self.decorations.put_type(expr.id, error_ty);
                    self.decorations.put_is_lvalue(expr.id, false);
                }
            }
            ExprKind::FUNC_CALL { callee, arguments } => {
                self.visit_ident(callee);
                let ident_ty = self.decorations.get_type(callee.id);
                if !self.types.is_function_ty(ident_ty) && !self.types.is_error_ty(ident_ty) {
                    self.errors.is_not_callable(callee.loc);
                }
                self.check_arguments(ident_ty, arguments, callee);

                // In expression position the callee must actually produce a
                // value; a void callee is a procedure, not a function.
                if self.types.is_function_ty(ident_ty) {
                    let ret_ty = self.types.get_func_return_type(ident_ty);
                    if self.types.is_void_ty(ret_ty) {
                        self.errors.is_not_function(callee.loc);
                        let error_ty = self.types.create_error_ty();
                        self.decorations.put_type(expr.id, error_ty);
                    } else {
                        self.decorations.put_type(expr.id, ret_ty);
                    }
                } else {
                    let error_ty = self.types.create_error_ty();
                    self.decorations.put_type(expr.id, error_ty);
                }
                self.decorations.put_is_lvalue(expr.id, false);
            }
            ExprKind::UNARY_OP { op, expression } => {
                self.visit_expr(expression);
                let t1 = self.decorations.get_type(expression.id);
                let ty = match op {
                    UnaryOperation::NOT => {
                        if !self.types.is_error_ty(t1) && !self.types.is_boolean_ty(t1) {
                            self.errors.incompatible_operator(expr.loc, &op.to_string());
                        }
                        self.types.create_boolean_ty()
                    }
                    UnaryOperation::NEGATE | UnaryOperation::PLUS => {
                        if !self.types.is_error_ty(t1) && !self.types.is_numeric_ty(t1) {
                            self.errors.incompatible_operator(expr.loc, &op.to_string());
                        }
                        if self.types.is_float_ty(t1) {
                            t1
                        } else {
                            self.types.create_integer_ty()
                        }
                    }
                };
                self.decorations.put_type(expr.id, ty);
                self.decorations.put_is_lvalue(expr.id, false);
            }
            ExprKind::BINARY_OP { op, lhs, rhs } => {
                self.visit_expr(lhs);
                let t1 = self.decorations.get_type(lhs.id);
                self.visit_expr(rhs);
                let t2 = self.decorations.get_type(rhs.id);
                let ty = if op.is_arithmetic() {
                    self.check_arithmetic(*op, t1, t2, expr)
                } else if op.is_relational() {
                    self.check_relational(*op, t1, t2, expr)
                } else {
                    self.check_logical(*op, t1, t2, expr)
                };
                self.decorations.put_type(expr.id, ty);
                self.decorations.put_is_lvalue(expr.id, false);
            }
            ExprKind::PARENTHESIS(inner) => {
                self.visit_expr(inner);
                let ty = self.decorations.get_type(inner.id);
                self.decorations.put_type(expr.id, ty);
                self.decorations.put_is_lvalue(expr.id, false);
            }
        }
    }

    fn check_arithmetic(&mut self, op: BinaryOperation, t1: TypeId, t2: TypeId, expr: &Expr) -> TypeId {
        let is_mod = op == BinaryOperation::MOD;
        if (!self.types.is_error_ty(t1) && !self.types.is_numeric_ty(t1))
            || (!self.types.is_error_ty(t2) && !self.types.is_numeric_ty(t2)) {
            self.errors.incompatible_operator(expr.loc, &op.to_string());
        } else if is_mod
            && ((!self.types.is_error_ty(t1) && !self.types.is_integer_ty(t1))
                || (!self.types.is_error_ty(t2) && !self.types.is_integer_ty(t2))) {
            // Modulo is integer only; the result stays integer even after
            // this report.
            self.errors.incompatible_operator(expr.loc, &op.to_string());
        }

        let float_arithmetic = self.types.is_float_ty(t1) && self.types.is_float_ty(t2);
        let mixed_arithmetic = (self.types.is_integer_ty(t1) && self.types.is_float_ty(t2))
            || (self.types.is_float_ty(t1) && self.types.is_integer_ty(t2));
        if (float_arithmetic || mixed_arithmetic) && !is_mod {
            self.types.create_float_ty()
        } else {
            self.types.create_integer_ty()
        }
    }

    fn check_relational(&mut self, op: BinaryOperation, t1: TypeId, t2: TypeId, expr: &Expr) -> TypeId {
        if !self.types.is_error_ty(t1) && !self.types.is_error_ty(t2)
            && !self.types.comparable_types(t1, t2, op) {
            self.errors.incompatible_operator(expr.loc, &op.to_string());
        }
        self.types.create_boolean_ty()
    }

    fn check_logical(&mut self, op: BinaryOperation, t1: TypeId, t2: TypeId, expr: &Expr) -> TypeId {
        if (!self.types.is_error_ty(t1) && !self.types.is_boolean_ty(t1))
            || (!self.types.is_error_ty(t2) && !self.types.is_boolean_ty(t2)) {
            self.errors.incompatible_operator(expr.loc, &op.to_string());
        }
        self.types.create_boolean_ty()
    }

    /// Resolve an identifier against the scope stack. An unresolved name is
    /// reported once, typed as error and flagged referenceable so the
    /// enclosing assignment or read does not pile on a second diagnostic.
    fn visit_ident(&mut self, ident: &Ident) {
        match self.symbols.find_in_stack(&ident.name).map(|symbol| symbol.ty) {
            None => {
                self.errors.undeclared_ident(ident.loc, &ident.name);
                let error_ty = self.types.create_error_ty();
                self.decorations.put_type(ident.id, error_ty);
                self.decorations.put_is_lvalue(ident.id, true);
            }
            Some(ty) => {
                self.decorations.put_type(ident.id, ty);
                self.decorations.put_is_lvalue(ident.id, !self.symbols.is_function_class(&ident.name));
            }
        }
    }
}
