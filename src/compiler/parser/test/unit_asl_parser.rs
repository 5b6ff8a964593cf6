use crate::compiler::ast::{
    AbstractSyntaxTree,
    BasicType,
    BinaryOperation,
    ExprKind,
    Literal,
    Stmt,
    TypeSpecKind,
    UnaryOperation
};
use crate::compiler::parser::{AstParser, PestAslParser};

fn parse(source: &str) -> AbstractSyntaxTree {
    PestAslParser::default().parse(source).unwrap()
}

#[test]
fn test_parse_function_shape() {
    let ast = parse("func f(a: int, v: array [4] of float) : int { var x, y: int; return a; } func main() { }");
    let program = ast.root();
    assert_eq!(program.functions.len(), 2);

    let f = &program.functions[0];
    assert_eq!(f.name.name, "f");
    assert_eq!(f.params.len(), 2);
    assert_eq!(f.params[0].name.name, "a");
    assert_eq!(f.params[0].type_spec.kind, TypeSpecKind::BASIC(BasicType::Int));
    assert_eq!(f.params[1].type_spec.kind, TypeSpecKind::ARRAY { size: 4, element: BasicType::Float });
    assert_eq!(f.return_type.as_ref().unwrap().kind, TypeSpecKind::BASIC(BasicType::Int));
    assert_eq!(f.declarations.len(), 1);
    assert_eq!(f.declarations[0].names.len(), 2);
    assert_eq!(f.body.len(), 1);

    let main = &program.functions[1];
    assert_eq!(main.name.name, "main");
    assert!(main.params.is_empty());
    assert!(main.return_type.is_none());
}

#[test]
fn test_parse_operator_precedence() {
    let ast = parse("func main() { var x: int; x := 1 + 2 * 3; }");
    let Stmt::ASSIGNMENT { value, .. } = &ast.root().functions[0].body[0] else {
        panic!("Expected an assignment");
    };
    let ExprKind::BINARY_OP { op, lhs, rhs } = &value.kind else {
        panic!("Expected a binary operation");
    };
    assert_eq!(*op, BinaryOperation::ADD);
    assert!(matches!(lhs.kind, ExprKind::VALUE(Literal::INTVAL(_))));
    assert!(matches!(
        rhs.kind,
        ExprKind::BINARY_OP { op: BinaryOperation::MUL, .. }
    ));
}

#[test]
fn test_parse_relational_binds_looser_than_arithmetic() {
    let ast = parse("func main() { var b: bool; b := 1 + 1 < 3; }");
    let Stmt::ASSIGNMENT { value, .. } = &ast.root().functions[0].body[0] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(
        value.kind,
        ExprKind::BINARY_OP { op: BinaryOperation::LESS_THAN, .. }
    ));
}

#[test]
fn test_parse_unary_operators() {
    let ast = parse("func main() { var b: bool; b := not (b or false); }");
    let Stmt::ASSIGNMENT { value, .. } = &ast.root().functions[0].body[0] else {
        panic!("Expected an assignment");
    };
    let ExprKind::UNARY_OP { op, expression } = &value.kind else {
        panic!("Expected a unary operation");
    };
    assert_eq!(*op, UnaryOperation::NOT);
    assert!(matches!(expression.kind, ExprKind::PARENTHESIS(_)));
}

#[test]
fn test_parse_left_expressions() {
    let ast = parse("func main() { var a: array [2] of int; var i: int; a[i + 1] := 0; i := a[0]; }");
    let body = &ast.root().functions[0].body;
    let Stmt::ASSIGNMENT { target, .. } = &body[0] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(&target.kind, ExprKind::ARRAY_ELEMENT { array, .. } if array.name == "a"));
    let Stmt::ASSIGNMENT { target, .. } = &body[1] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(&target.kind, ExprKind::IDENT(ident) if ident.name == "i"));
}

#[test]
fn test_parse_call_statement_and_expression() {
    let ast = parse("func main() { var x: int; f(x, 1); x := g(); }");
    let body = &ast.root().functions[0].body;
    let Stmt::PROC_CALL { callee, arguments, .. } = &body[0] else {
        panic!("Expected a call statement");
    };
    assert_eq!(callee.name, "f");
    assert_eq!(arguments.len(), 2);
    let Stmt::ASSIGNMENT { value, .. } = &body[1] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(&value.kind, ExprKind::FUNC_CALL { callee, arguments } if callee.name == "g" && arguments.is_empty()));
}

#[test]
fn test_parse_write_string_keeps_escapes_raw() {
    let ast = parse(r#"func main() { write "hi\n"; }"#);
    let Stmt::WRITE_STRING { value, .. } = &ast.root().functions[0].body[0] else {
        panic!("Expected a write string statement");
    };
    assert_eq!(value, "hi\\n");
}

#[test]
fn test_parse_char_literal_keeps_escapes_raw() {
    let ast = parse(r#"func main() { var c: char; c := '\n'; }"#);
    let Stmt::ASSIGNMENT { value, .. } = &ast.root().functions[0].body[0] else {
        panic!("Expected an assignment");
    };
    assert!(matches!(&value.kind, ExprKind::VALUE(Literal::CHARVAL(text)) if text == "\\n"));
}

#[test]
fn test_parse_if_with_and_without_else() {
    let ast = parse("func main() { var b: bool; if b then else endif if b then endif }");
    let body = &ast.root().functions[0].body;
    assert!(matches!(&body[0], Stmt::IF { else_branch: Some(_), .. }));
    assert!(matches!(&body[1], Stmt::IF { else_branch: None, .. }));
}

#[test]
fn test_keyword_prefixed_identifier_is_not_a_keyword() {
    let ast = parse("func main() { var iffy: int; iffy := 2; }");
    assert!(matches!(&ast.root().functions[0].body[0], Stmt::ASSIGNMENT { .. }));
}

#[test]
fn test_parse_error_is_reported() {
    PestAslParser::default()
        .parse("func main() {")
        .expect_err("Testing parser error");
}
