use super::{analyse, error_kinds};
use crate::compiler::ast::{Expr, ExprKind, Stmt};
use crate::compiler::semantic_analyser::{SemanticContext, SemErrorKind};

/// Walk every expression of a statement, checking that it carries both a
/// type and an l-value decoration (the getters abort when one is missing).
fn assert_expr_decorations(context: &SemanticContext, expr: &Expr) {
    context.decorations.get_type(expr.id);
    context.decorations.get_is_lvalue(expr.id);
    match &expr.kind {
        ExprKind::VALUE(_) => {}
        ExprKind::IDENT(ident) => {
            context.decorations.get_type(ident.id);
            context.decorations.get_is_lvalue(ident.id);
        }
        ExprKind::ARRAY_ELEMENT { array, index } => {
            context.decorations.get_type(array.id);
            assert_expr_decorations(context, index);
        }
        ExprKind::FUNC_CALL { callee, arguments } => {
            context.decorations.get_type(callee.id);
            for argument in arguments {
                assert_expr_decorations(context, argument);
            }
        }
        ExprKind::UNARY_OP { expression, .. } => assert_expr_decorations(context, expression),
        ExprKind::BINARY_OP { lhs, rhs, .. } => {
            assert_expr_decorations(context, lhs);
            assert_expr_decorations(context, rhs);
        }
        ExprKind::PARENTHESIS(inner) => assert_expr_decorations(context, inner)
    }
}

fn assert_stmt_decorations(context: &SemanticContext, stmt: &Stmt) {
    match stmt {
        Stmt::ASSIGNMENT { target, value, .. } => {
            assert_expr_decorations(context, target);
            assert_expr_decorations(context, value);
        }
        Stmt::IF { condition, then_branch, else_branch, .. } => {
            assert_expr_decorations(context, condition);
            for stmt in then_branch {
                assert_stmt_decorations(context, stmt);
            }
            for stmt in else_branch.iter().flatten() {
                assert_stmt_decorations(context, stmt);
            }
        }
        Stmt::WHILE_LOOP { condition, body, .. } => {
            assert_expr_decorations(context, condition);
            for stmt in body {
                assert_stmt_decorations(context, stmt);
            }
        }
        Stmt::PROC_CALL { callee, arguments, .. } => {
            context.decorations.get_type(callee.id);
            for argument in arguments {
                assert_expr_decorations(context, argument);
            }
        }
        Stmt::READ { target, .. } => assert_expr_decorations(context, target),
        Stmt::WRITE_EXPR { expression, .. } => assert_expr_decorations(context, expression),
        Stmt::WRITE_STRING { .. } => {}
        Stmt::RETURN { expression, .. } => {
            if let Some(expression) = expression {
                assert_expr_decorations(context, expression);
            }
        }
    }
}

#[test]
fn test_every_visited_expression_is_decorated() {
    let (ast, context) = analyse(
        "func f(v: array [3] of int): int { return v[0]; } \
         func main() { \
            var a: array [3] of int; \
            var x: float; \
            var i: int; \
            if (x < 3.0) and true then x := x + a[1]; endif \
            while i != 0 do i := i - 1; endwhile \
            read a[i]; \
            write f(a) % 2; \
         }"
    );
    assert_eq!(error_kinds(&context), vec![]);
    for function in &ast.root().functions {
        for stmt in &function.body {
            assert_stmt_decorations(&context, stmt);
        }
    }
}

#[test]
fn test_undeclared_identifier_is_error_typed_but_referenceable() {
    let (ast, context) = analyse("func main() { x := 1; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::UndeclaredIdent(String::from("x"))]);

    let Stmt::ASSIGNMENT { target, .. } = &ast.root().functions[0].body[0] else {
        panic!("Expected an assignment");
    };
    assert!(context.types.is_error_ty(context.decorations.get_type(target.id)));
    // Flagged referenceable so the assignment does not also complain
    assert!(context.decorations.get_is_lvalue(target.id));
}

#[test]
fn test_identifier_lvalue_follows_symbol_kind() {
    let (ast, context) = analyse(
        "func f() { } func main() { var x: int; write x; f(); }"
    );
    assert_eq!(error_kinds(&context), vec![]);
    let main = &ast.root().functions[1];

    let Stmt::WRITE_EXPR { expression, .. } = &main.body[0] else {
        panic!("Expected a write statement");
    };
    assert!(context.decorations.get_is_lvalue(expression.id));

    let Stmt::PROC_CALL { callee, .. } = &main.body[1] else {
        panic!("Expected a call statement");
    };
    assert!(!context.decorations.get_is_lvalue(callee.id));
}

#[test]
fn test_incompatible_assignment_is_reported() {
    let (_, context) = analyse("func main() { var x: int; x := 1.5; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::IncompatibleAssignment]);
}

#[test]
fn test_assignment_widens_integer_into_float() {
    let (_, context) = analyse("func main() { var x: float; x := 1; }");
    assert_eq!(error_kinds(&context), vec![]);
}

#[test]
fn test_assignment_to_function_reports_both_problems() {
    let (_, context) = analyse("func f() { } func main() { f := 1; }");
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::IncompatibleAssignment, SemErrorKind::NonReferenceableLeftExpr]
    );
}

#[test]
fn test_error_operand_suppresses_cascading_reports() {
    // y is undeclared: the addition and the assignment stay silent
    let (_, context) = analyse("func main() { var x: int; x := y + 1; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::UndeclaredIdent(String::from("y"))]);
}

#[test]
fn test_conditions_must_be_boolean() {
    let (_, context) = analyse("func main() { if 1 then endif while 2.0 do endwhile }");
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::BooleanRequired, SemErrorKind::BooleanRequired]
    );
}

#[test]
fn test_return_type_must_be_copyable() {
    let (_, context) = analyse("func f(): int { return 1.5; } func main() { }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::IncompatibleReturn]);
}

#[test]
fn test_return_with_value_in_void_function_is_reported() {
    let (_, context) = analyse("func main() { return 1; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::IncompatibleReturn]);
}

#[test]
fn test_return_widens_integer_into_float() {
    let (_, context) = analyse("func f(): float { return 1; } func main() { }");
    assert_eq!(error_kinds(&context), vec![]);
}

#[test]
fn test_calling_a_variable_is_reported() {
    let (_, context) = analyse("func main() { var x: int; x(); }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::IsNotCallable]);
}

#[test]
fn test_wrong_argument_count_is_reported() {
    let (_, context) = analyse("func f(a: int) { } func main() { f(); f(1, 2); }");
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::NumberOfParameters, SemErrorKind::NumberOfParameters]
    );
}

#[test]
fn test_incompatible_argument_reports_its_position() {
    let (_, context) = analyse("func f(a: int, b: float) { } func main() { f(true, 'c'); }");
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::IncompatibleParameter(1), SemErrorKind::IncompatibleParameter(2)]
    );
}

#[test]
fn test_argument_widening_is_accepted() {
    let (_, context) = analyse("func f(a: float) { } func main() { f(1); }");
    assert_eq!(error_kinds(&context), vec![]);
}

#[test]
fn test_void_call_in_expression_position_is_reported_once() {
    // p() types as error, so the assignment check stays silent
    let (_, context) = analyse("func p() { } func main() { var x: int; x := p(); }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::IsNotFunction]);
}

#[test]
fn test_array_access_on_non_array_is_reported_once() {
    let (_, context) = analyse("func main() { var x: int; x := x[0]; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::NonArrayInArrayAccess]);
}

#[test]
fn test_array_index_must_be_integer() {
    let (_, context) = analyse("func main() { var a: array [2] of int; var x: int; x := a[1.0]; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::NonIntegerIndexInArrayAccess]);
}

#[test]
fn test_modulo_requires_integer_operands() {
    let (_, context) = analyse("func main() { var x: int; x := 1.0 % 2.0; }");
    // The result conventionally stays integer, so only the operator report
    // appears and the assignment passes
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::IncompatibleOperator(String::from("%"))]
    );
}

#[test]
fn test_mixed_arithmetic_produces_float() {
    let (_, context) = analyse("func main() { var x: float; x := 1 + 2.0; }");
    assert_eq!(error_kinds(&context), vec![]);
    let (_, context) = analyse("func main() { var x: int; x := 1 + 2.0; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::IncompatibleAssignment]);
}

#[test]
fn test_ordering_requires_numeric_operands() {
    let (_, context) = analyse("func main() { var b: bool; b := true < false; }");
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::IncompatibleOperator(String::from("<"))]
    );
}

#[test]
fn test_equality_accepts_matching_families() {
    let (_, context) = analyse(
        "func main() { var b: bool; b := 'a' == 'b'; b := b != false; b := 1 == 2.0; }"
    );
    assert_eq!(error_kinds(&context), vec![]);
}

#[test]
fn test_logical_operators_require_booleans() {
    let (_, context) = analyse("func main() { var b: bool; b := b and 1; b := not 2; }");
    assert_eq!(
        error_kinds(&context),
        vec![
            SemErrorKind::IncompatibleOperator(String::from("and")),
            SemErrorKind::IncompatibleOperator(String::from("not"))
        ]
    );
}

#[test]
fn test_read_and_write_require_basic_types() {
    let (_, context) = analyse("func main() { var a: array [2] of int; read a; write a; }");
    assert_eq!(
        error_kinds(&context),
        vec![SemErrorKind::ReadWriteRequireBasic, SemErrorKind::ReadWriteRequireBasic]
    );
}

#[test]
fn test_read_into_function_is_only_non_referenceable() {
    let (_, context) = analyse("func f() { } func main() { read f; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::NonReferenceableExpression]);
}

#[test]
fn test_missing_main_is_reported() {
    let (_, context) = analyse("func f() { }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::NoMainProperlyDeclared]);
}

#[test]
fn test_main_must_take_no_parameters_and_return_nothing() {
    let (_, context) = analyse("func main(x: int) { }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::NoMainProperlyDeclared]);

    let (_, context) = analyse("func main(): int { return 0; }");
    assert_eq!(error_kinds(&context), vec![SemErrorKind::NoMainProperlyDeclared]);
}
