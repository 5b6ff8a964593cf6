use super::compile;
use crate::compiler::program_code::Instruction::{self, *};

fn s(text: &str) -> String {
    String::from(text)
}

#[test]
fn test_while_loop_shape() {
    let code = compile("func main() { var b: bool; while b do endwhile }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        LABEL(s("while0")),
        FJUMP(s("b"), s("endwhile0")),
        UJUMP(s("while0")),
        LABEL(s("endwhile0")),
        RETURN
    ]);
}

#[test]
fn test_if_without_else() {
    let code = compile("func main() { var b: bool; if b then b := false; endif }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        FJUMP(s("b"), s("endif0")),
        ILOAD(s("%t0"), s("0")),
        LOAD(s("b"), s("%t0")),
        LABEL(s("endif0")),
        RETURN
    ]);
}

#[test]
fn test_nested_ifs_use_distinct_label_families() {
    let code = compile(
        "func main() { var b: bool; if b then if b then endif else endif while b do endwhile }"
    );
    let main = code.get_subroutine("main").unwrap();
    // The inner if is numbered first because its code is generated before
    // the outer label is allocated
    assert_eq!(main.instructions, vec![
        FJUMP(s("b"), s("else1")),
        FJUMP(s("b"), s("endif0")),
        LABEL(s("endif0")),
        UJUMP(s("endif1")),
        LABEL(s("else1")),
        LABEL(s("endif1")),
        LABEL(s("while0")),
        FJUMP(s("b"), s("endwhile0")),
        UJUMP(s("while0")),
        LABEL(s("endwhile0")),
        RETURN
    ]);
}

#[test]
fn test_statement_call_discards_the_return_slot() {
    let code = compile("func p(x: int) { } func main() { p(3); }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        PUSH(None),
        ILOAD(s("%t0"), s("3")),
        PUSH(Some(s("%t0"))),
        CALL(s("p")),
        POP(None),
        POP(None),
        RETURN
    ]);

    let p = code.get_subroutine("p").unwrap();
    assert_eq!(p.params, vec![s("_result"), s("x")]);
    assert_eq!(p.instructions, vec![RETURN]);
}

#[test]
fn test_array_argument_is_passed_by_reference() {
    let code = compile(
        "func f(v: array [3] of int) { } func main() { var a: array [3] of int; f(a); }"
    );
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        PUSH(None),
        ALOAD(s("%t0"), s("a")),
        PUSH(Some(s("%t0"))),
        CALL(s("f")),
        POP(None),
        POP(None),
        RETURN
    ]);
}

#[test]
fn test_array_parameter_base_is_materialised_before_indexing() {
    let code = compile(
        "func f(v: array [3] of int): int { return v[0]; } func main() { }"
    );
    let f = code.get_subroutine("f").unwrap();
    assert_eq!(f.instructions, vec![
        ILOAD(s("%t0"), s("0")),
        LOAD(s("%t2"), s("v")),
        LOADX(s("%t1"), s("%t2"), s("%t0")),
        LOAD(s("_result"), s("%t1")),
        RETURN,
        RETURN
    ]);
}

#[test]
fn test_whole_array_copy_from_parameter() {
    let code = compile(
        "func f(v: array [2] of int) { var a: array [2] of int; a := v; } func main() { }"
    );
    let f = code.get_subroutine("f").unwrap();
    assert_eq!(f.instructions, vec![
        LOAD(s("%t2"), s("v")),
        ILOAD(s("%t0"), s("0")),
        LOADX(s("%t1"), s("%t2"), s("%t0")),
        XLOAD(s("a"), s("%t0"), s("%t1")),
        ILOAD(s("%t0"), s("1")),
        LOADX(s("%t1"), s("%t2"), s("%t0")),
        XLOAD(s("a"), s("%t0"), s("%t1")),
        RETURN
    ]);
}

#[test]
fn test_assignment_into_array_element_with_widening() {
    let code = compile(
        "func main() { var a: array [2] of float; var i: int; a[i] := 1; }"
    );
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("1")),
        FLOAT(s("%t1"), s("%t0")),
        XLOAD(s("a"), s("i"), s("%t1")),
        RETURN
    ]);
}

#[test]
fn test_read_into_array_element_goes_through_a_temporary() {
    let code = compile("func main() { var a: array [3] of int; var i: int; read a[i]; }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        READI(s("%t0")),
        XLOAD(s("a"), s("i"), s("%t0")),
        RETURN
    ]);
}

#[test]
fn test_read_and_write_dispatch_on_type() {
    let code = compile(
        "func main() { var x: int; var y: float; var c: char; var b: bool; \
         read x; read y; read c; read b; write y; write c; write b; }"
    );
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        READI(s("x")),
        READF(s("y")),
        READC(s("c")),
        READI(s("b")),
        WRITEF(s("y")),
        WRITEC(s("c")),
        WRITEI(s("b")),
        RETURN
    ]);
}

#[test]
fn test_write_string_lowers_escape_sequences() {
    let code = compile(r#"func main() { write "a\n\tb\\"; }"#);
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        CHLOAD(s("%t0"), s("a")),
        WRITEC(s("%t0")),
        WRITELN,
        CHLOAD(s("%t0"), s("\\t")),
        WRITEC(s("%t0")),
        CHLOAD(s("%t0"), s("b")),
        WRITEC(s("%t0")),
        CHLOAD(s("%t0"), s("\\\\")),
        WRITEC(s("%t0")),
        RETURN
    ]);
}

#[test]
fn test_character_literals_keep_their_escape_form() {
    let code = compile(r#"func main() { var c: char; c := 'a'; c := '\n'; }"#);
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        CHLOAD(s("%t0"), s("a")),
        LOAD(s("c"), s("%t0")),
        CHLOAD(s("%t1"), s("\\n")),
        LOAD(s("c"), s("%t1")),
        RETURN
    ]);
}

#[test]
fn test_modulo_is_synthesised_from_div_mul_sub() {
    let code = compile("func main() { var x: int; x := 7 % 3; }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("7")),
        ILOAD(s("%t1"), s("3")),
        DIV(s("%t3"), s("%t0"), s("%t1")),
        MUL(s("%t4"), s("%t3"), s("%t1")),
        SUB(s("%t2"), s("%t0"), s("%t4")),
        LOAD(s("x"), s("%t2")),
        RETURN
    ]);
}

#[test]
fn test_mixed_arithmetic_widens_the_integer_operand() {
    let code = compile("func main() { var y: float; y := y + 1; }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("1")),
        FLOAT(s("%t2"), s("%t0")),
        FADD(s("%t1"), s("y"), s("%t2")),
        LOAD(s("y"), s("%t1")),
        RETURN
    ]);
}

#[test]
fn test_relational_operators_swap_and_negate() {
    let code = compile(
        "func main() { var b: bool; var x: int; b := x > 1; b := x >= 1; b := x != 1; }"
    );
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("1")),
        LT(s("%t1"), s("%t0"), s("x")),
        LOAD(s("b"), s("%t1")),
        ILOAD(s("%t2"), s("1")),
        LE(s("%t3"), s("%t2"), s("x")),
        LOAD(s("b"), s("%t3")),
        ILOAD(s("%t4"), s("1")),
        EQ(s("%t5"), s("x"), s("%t4")),
        NOT(s("%t5"), s("%t5")),
        LOAD(s("b"), s("%t5")),
        RETURN
    ]);
}

#[test]
fn test_float_relational_family() {
    let code = compile("func main() { var b: bool; var y: float; b := y < 1; }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("1")),
        FLOAT(s("%t2"), s("%t0")),
        FLT(s("%t1"), s("y"), s("%t2")),
        LOAD(s("b"), s("%t1")),
        RETURN
    ]);
}

#[test]
fn test_boolean_comparison_uses_the_integer_family() {
    let code = compile("func main() { var b: bool; b := b == false; }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("0")),
        EQ(s("%t1"), s("b"), s("%t0")),
        LOAD(s("b"), s("%t1")),
        RETURN
    ]);
}

#[test]
fn test_unary_operators() {
    let code = compile(
        "func main() { var x: int; var y: float; var b: bool; \
         x := -x; y := -y; b := not b; x := +x; }"
    );
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        NEG(s("%t0"), s("x")),
        LOAD(s("x"), s("%t0")),
        FNEG(s("%t1"), s("y")),
        LOAD(s("y"), s("%t1")),
        NOT(s("%t2"), s("b")),
        LOAD(s("b"), s("%t2")),
        LOAD(s("x"), s("x")),
        RETURN
    ]);
}

#[test]
fn test_logical_binary_operators() {
    let code = compile("func main() { var b: bool; b := b and (b or true); }");
    let main = code.get_subroutine("main").unwrap();
    assert_eq!(main.instructions, vec![
        ILOAD(s("%t0"), s("1")),
        OR(s("%t1"), s("b"), s("%t0")),
        AND(s("%t2"), s("b"), s("%t1")),
        LOAD(s("b"), s("%t2")),
        RETURN
    ]);
}

#[test]
fn test_locals_get_their_sizes_from_their_types() {
    let code = compile(
        "func main() { var a: array [4] of float; var x, y: int; var c: char; }"
    );
    let main = code.get_subroutine("main").unwrap();
    let sizes: Vec<(String, usize)> = main.vars.iter()
        .map(|var| (var.name.clone(), var.size))
        .collect();
    assert_eq!(sizes, vec![
        (s("a"), 4),
        (s("x"), 1),
        (s("y"), 1),
        (s("c"), 1)
    ]);
}

#[test]
fn test_temporaries_restart_in_every_subroutine() {
    let code = compile(
        "func f(): int { return 1 + 2; } func g(): int { return 3 + 4; } func main() { }"
    );
    for name in ["f", "g"] {
        let subroutine = code.get_subroutine(name).unwrap();
        assert!(matches!(&subroutine.instructions[0], Instruction::ILOAD(dest, _) if dest == "%t0"));
    }
}
