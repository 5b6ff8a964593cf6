use super::super::ast::{
    Expr,
    ExprKind,
    FunctionDef,
    Ident,
    Literal,
    Program,
    Stmt,
    BinaryOperation,
    UnaryOperation
};
use super::super::program_code::{Instruction, ProgramCode, Subroutine, Var};
use super::super::semantic_analyser::decorations::TreeDecorations;
use super::super::semantic_analyser::symbol_table::SymTable;
use super::super::semantic_analyser::types::{TypeId, TypesMgr};

/// CodeAttribs is the attribute triple synthesised for every expression:
/// the instructions computing it, the symbolic address holding the result,
/// and, only for array element l-values, the address of the index.
pub(super) struct CodeAttribs {
    pub addr: String,
    pub offs: Option<String>,
    pub code: Vec<Instruction>
}

impl CodeAttribs {
    fn new(addr: String, offs: Option<String>, code: Vec<Instruction>) -> Self {
        CodeAttribs {
            addr,
            offs,
            code
        }
    }
}

/// CodeCounters hands out temporaries and label numbers. Scoped to one
/// subroutine: reset on function entry so every subroutine starts at %t0
/// and label family 0.
struct CodeCounters {
    temps: u32,
    if_labels: u32,
    while_labels: u32
}

impl CodeCounters {
    fn new() -> Self {
        CodeCounters {
            temps: 0,
            if_labels: 0,
            while_labels: 0
        }
    }

    fn reset(&mut self) {
        self.temps = 0;
        self.if_labels = 0;
        self.while_labels = 0;
    }

    fn new_temp(&mut self) -> String {
        let temp = format!("%t{}", self.temps);
        self.temps += 1;
        temp
    }

    /// Returns the numeric suffix shared by the if/else/endif label family
    fn new_if_label(&mut self) -> String {
        let label = self.if_labels.to_string();
        self.if_labels += 1;
        label
    }

    /// Returns the numeric suffix shared by the while/endwhile label family
    fn new_while_label(&mut self) -> String {
        let label = self.while_labels.to_string();
        self.while_labels += 1;
        label
    }
}

/// CodeGenVisitor is the third pass. It walks the tree a final time, inside
/// the scopes of the symbols pass and reading the decorations of the type
/// check pass, and lowers each function into a subroutine of three address
/// instructions. It is only defined on trees whose analysis produced zero
/// diagnostics.
pub(super) struct CodeGenVisitor<'a> {
    types: &'a TypesMgr,
    symbols: &'a mut SymTable,
    decorations: &'a TreeDecorations,
    counters: CodeCounters
}

impl<'a> CodeGenVisitor<'a> {
    pub fn new(types: &'a TypesMgr, symbols: &'a mut SymTable, decorations: &'a TreeDecorations) -> Self {
        CodeGenVisitor {
            types,
            symbols,
            decorations,
            counters: CodeCounters::new()
        }
    }

    pub fn visit_program(&mut self, program: &Program) -> ProgramCode {
        let mut code = ProgramCode::default();
        let sc = self.decorations.get_scope(program.id);
        self.symbols.push_this_scope(sc);
        for function in &program.functions {
            let subroutine = self.visit_function(function);
            code.add_subroutine(subroutine);
        }
        self.symbols.pop_scope();
        code
    }

    fn visit_function(&mut self, function: &FunctionDef) -> Subroutine {
        let sc = self.decorations.get_scope(function.id);
        self.symbols.push_this_scope(sc);

        let mut subroutine = Subroutine::new(&function.name.name);
        if function.name.name != "main" {
            // The caller reserves one slot for the result ahead of the user
            // parameters; void functions simply never write it.
            subroutine.add_param("_result");
            for param in &function.params {
                subroutine.add_param(&param.name.name);
            }
        }

        self.counters.reset();
        for decl in &function.declarations {
            let ty = self.decorations.get_type(decl.type_spec.id);
            let size = self.types.get_size_of_type(ty);
            for ident in &decl.names {
                subroutine.add_var(Var::new(&ident.name, size));
            }
        }

        let mut code = self.visit_statements(&function.body);
        code.push(Instruction::RETURN);
        subroutine.set_instructions(code);

        self.symbols.pop_scope();
        subroutine
    }

    fn visit_statements(&mut self, stmts: &[Stmt]) -> Vec<Instruction> {
        let mut code = vec![];
        for stmt in stmts {
            code.extend(self.visit_statement(stmt));
        }
        code
    }

    fn visit_statement(&mut self, stmt: &Stmt) -> Vec<Instruction> {
        match stmt {
            Stmt::ASSIGNMENT { target, value, .. } => self.generate_assignment(target, value),
            Stmt::IF { condition, then_branch, else_branch, .. } => {
                self.generate_if(condition, then_branch, else_branch.as_deref())
            }
            Stmt::WHILE_LOOP { condition, body, .. } => self.generate_while(condition, body),
            Stmt::PROC_CALL { callee, arguments, .. } => {
                let (code, _) = self.generate_call(callee, arguments, false);
                code
            }
            Stmt::READ { target, .. } => self.generate_read(target),
            Stmt::WRITE_EXPR { expression, .. } => self.generate_write_expr(expression),
            Stmt::WRITE_STRING { value, .. } => self.generate_write_string(value),
            Stmt::RETURN { expression, .. } => self.generate_return(expression.as_ref())
        }
    }

    fn generate_assignment(&mut self, target: &Expr, value: &Expr) -> Vec<Instruction> {
        let CodeAttribs { addr: addr1, offs: offs1, code: code1 } = self.visit_left_expr(target);
        let t1 = self.decorations.get_type(target.id);
        let CodeAttribs { addr: addr2, code: code2, .. } = self.visit_expr(value);
        let t2 = self.decorations.get_type(value.id);

        let mut code = code1;
        code.extend(code2);

        if target.is_array_element() {
            let offs1 = offs1.expect("Array element target without an index address");
            if self.types.is_float_ty(t1) && self.types.is_integer_ty(t2) {
                let float_temp = self.counters.new_temp();
                code.push(Instruction::FLOAT(float_temp.clone(), addr2));
                code.push(Instruction::XLOAD(addr1, offs1, float_temp));
            } else {
                code.push(Instruction::XLOAD(addr1, offs1, addr2));
            }
        } else if self.types.is_array_ty(t1) && self.types.is_array_ty(t2) {
            // Whole array assignment copies element by element. Parameters
            // hold the array by reference, so their base address must be
            // materialised first.
            let array_size = self.types.get_array_size(t1);
            let offs_temp = self.counters.new_temp();
            let elem_temp = self.counters.new_temp();
            let mut addr1_temp = addr1.clone();
            let mut addr2_temp = addr2.clone();
            if self.symbols.is_parameter_class(&addr1) {
                addr1_temp = self.counters.new_temp();
                code.push(Instruction::LOAD(addr1_temp.clone(), addr1));
            }
            if self.symbols.is_parameter_class(&addr2) {
                addr2_temp = self.counters.new_temp();
                code.push(Instruction::LOAD(addr2_temp.clone(), addr2));
            }
            for i in 0..array_size {
                code.push(Instruction::ILOAD(offs_temp.clone(), i.to_string()));
                code.push(Instruction::LOADX(elem_temp.clone(), addr2_temp.clone(), offs_temp.clone()));
                code.push(Instruction::XLOAD(addr1_temp.clone(), offs_temp.clone(), elem_temp.clone()));
            }
        } else if self.types.is_float_ty(t1) && self.types.is_integer_ty(t2) {
            let float_temp = self.counters.new_temp();
            code.push(Instruction::FLOAT(float_temp.clone(), addr2));
            code.push(Instruction::LOAD(addr1, float_temp));
        } else {
            code.push(Instruction::LOAD(addr1, addr2));
        }
        code
    }

    fn generate_if(&mut self, condition: &Expr, then_branch: &[Stmt], else_branch: Option<&[Stmt]>) -> Vec<Instruction> {
        let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(condition);
        let code2 = self.visit_statements(then_branch);
        let label = self.counters.new_if_label();
        let label_endif = format!("endif{}", label);
        let label_else = format!("else{}", label);

        let mut code = code1;
        match else_branch {
            Some(else_branch) => {
                code.push(Instruction::FJUMP(addr1, label_else.clone()));
                code.extend(code2);
                code.push(Instruction::UJUMP(label_endif.clone()));
                code.push(Instruction::LABEL(label_else));
                code.extend(self.visit_statements(else_branch));
                code.push(Instruction::LABEL(label_endif));
            }
            None => {
                code.push(Instruction::FJUMP(addr1, label_endif.clone()));
                code.extend(code2);
                code.push(Instruction::LABEL(label_endif));
            }
        }
        code
    }

    fn generate_while(&mut self, condition: &Expr, body: &[Stmt]) -> Vec<Instruction> {
        let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(condition);
        let code2 = self.visit_statements(body);
        let label = self.counters.new_while_label();
        let label_while = format!("while{}", label);
        let label_endwhile = format!("endwhile{}", label);

        let mut code = vec![Instruction::LABEL(label_while.clone())];
        code.extend(code1);
        code.push(Instruction::FJUMP(addr1, label_endwhile.clone()));
        code.extend(code2);
        code.push(Instruction::UJUMP(label_while));
        code.push(Instruction::LABEL(label_endwhile));
        code
    }

    /// Lower a call. Identical in statement and expression position except
    /// for the disposal of the return slot: an expression call pops it into
    /// a fresh temporary (returned as the address), a statement call
    /// discards it.
    fn generate_call(&mut self, callee: &Ident, arguments: &[Expr], want_result: bool) -> (Vec<Instruction>, Option<String>) {
        let func_ty = self.decorations.get_type(callee.id);
        let mut code = vec![Instruction::PUSH(None)];

        for (i, arg) in arguments.iter().enumerate() {
            let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(arg);
            code.extend(code1);
            let expr_ty = self.decorations.get_type(arg.id);
            let param_ty = self.types.get_parameter_type(func_ty, i);
            if self.types.is_integer_ty(expr_ty) && self.types.is_float_ty(param_ty) {
                let float_temp = self.counters.new_temp();
                code.push(Instruction::FLOAT(float_temp.clone(), addr1));
                code.push(Instruction::PUSH(Some(float_temp)));
            } else if self.types.is_array_ty(expr_ty) {
                // Arrays are passed by reference
                let ref_temp = self.counters.new_temp();
                code.push(Instruction::ALOAD(ref_temp.clone(), addr1));
                code.push(Instruction::PUSH(Some(ref_temp)));
            } else {
                code.push(Instruction::PUSH(Some(addr1)));
            }
        }

        code.push(Instruction::CALL(callee.name.clone()));
        for _ in arguments {
            code.push(Instruction::POP(None));
        }

        if want_result {
            let result_temp = self.counters.new_temp();
            code.push(Instruction::POP(Some(result_temp.clone())));
            (code, Some(result_temp))
        } else {
            code.push(Instruction::POP(None));
            (code, None)
        }
    }

    fn generate_read(&mut self, target: &Expr) -> Vec<Instruction> {
        let CodeAttribs { addr: addr1, offs: offs1, code: code1 } = self.visit_left_expr(target);
        let ty = self.decorations.get_type(target.id);

        let mut code = code1;
        let temp = if target.is_array_element() {
            self.counters.new_temp()
        } else {
            addr1.clone()
        };
        if self.types.is_integer_ty(ty) || self.types.is_boolean_ty(ty) {
            code.push(Instruction::READI(temp.clone()));
        } else if self.types.is_float_ty(ty) {
            code.push(Instruction::READF(temp.clone()));
        } else if self.types.is_character_ty(ty) {
            code.push(Instruction::READC(temp.clone()));
        }
        if target.is_array_element() {
            let offs1 = offs1.expect("Array element target without an index address");
            code.push(Instruction::XLOAD(addr1, offs1, temp));
        }
        code
    }

    fn generate_write_expr(&mut self, expression: &Expr) -> Vec<Instruction> {
        let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(expression);
        let ty = self.decorations.get_type(expression.id);

        let mut code = code1;
        if self.types.is_integer_ty(ty) || self.types.is_boolean_ty(ty) {
            code.push(Instruction::WRITEI(addr1));
        } else if self.types.is_float_ty(ty) {
            code.push(Instruction::WRITEF(addr1));
        } else if self.types.is_character_ty(ty) {
            code.push(Instruction::WRITEC(addr1));
        }
        code
    }

    /// Write the interior bytes of a string literal character by character.
    /// `\n` becomes WRITELN; the other recognised escapes are passed to the
    /// VM in their two character form.
    fn generate_write_string(&mut self, value: &str) -> Vec<Instruction> {
        let chars: Vec<char> = value.chars().collect();
        let mut code = vec![];
        let temp = self.counters.new_temp();
        let mut i = 0;
        while i < chars.len() {
            if chars[i] != '\\' {
                code.push(Instruction::CHLOAD(temp.clone(), chars[i].to_string()));
                code.push(Instruction::WRITEC(temp.clone()));
                i += 1;
            } else {
                match chars.get(i + 1) {
                    Some('n') => {
                        code.push(Instruction::WRITELN);
                        i += 2;
                    }
                    Some('t') | Some('"') | Some('\\') => {
                        let escape: String = chars[i..i + 2].iter().collect();
                        code.push(Instruction::CHLOAD(temp.clone(), escape));
                        code.push(Instruction::WRITEC(temp.clone()));
                        i += 2;
                    }
                    _ => {
                        code.push(Instruction::CHLOAD(temp.clone(), chars[i].to_string()));
                        code.push(Instruction::WRITEC(temp.clone()));
                        i += 1;
                    }
                }
            }
        }
        code
    }

    fn generate_return(&mut self, expression: Option<&Expr>) -> Vec<Instruction> {
        match expression {
            Some(expr) => {
                let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(expr);
                let mut code = code1;
                code.push(Instruction::LOAD(String::from("_result"), addr1));
                code.push(Instruction::RETURN);
                code
            }
            None => vec![Instruction::RETURN]
        }
    }

    /// Lower a left expression into (addr, offs, code). For a plain
    /// identifier the address is the name itself. For an array element the
    /// address is the array base (materialised into a temporary when the
    /// base is a parameter) and offs holds the index address.
    fn visit_left_expr(&mut self, expr: &Expr) -> CodeAttribs {
        match &expr.kind {
            ExprKind::IDENT(ident) => {
                CodeAttribs::new(ident.name.clone(), None, vec![])
            }
            ExprKind::ARRAY_ELEMENT { array, index } => {
                let CodeAttribs { addr: addr_expr, code: code_expr, .. } = self.visit_expr(index);
                let mut code = code_expr;
                let mut temp = array.name.clone();
                if self.symbols.is_parameter_class(&array.name) {
                    temp = self.counters.new_temp();
                    code.push(Instruction::LOAD(temp.clone(), array.name.clone()));
                }
                CodeAttribs::new(temp, Some(addr_expr), code)
            }
            _ => panic!("Malformed AST! Left expression must be an identifier or array element")
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> CodeAttribs {
        match &expr.kind {
            ExprKind::VALUE(literal) => {
                let temp = self.counters.new_temp();
                let code = match literal {
                    Literal::INTVAL(text) => vec![Instruction::ILOAD(temp.clone(), text.clone())],
                    Literal::FLOATVAL(text) => vec![Instruction::FLOAD(temp.clone(), text.clone())],
                    Literal::CHARVAL(text) => vec![Instruction::CHLOAD(temp.clone(), text.clone())],
                    Literal::BOOLVAL(true) => vec![Instruction::ILOAD(temp.clone(), String::from("1"))],
                    Literal::BOOLVAL(false) => vec![Instruction::ILOAD(temp.clone(), String::from("0"))]
                };
                CodeAttribs::new(temp, None, code)
            }
            ExprKind::IDENT(ident) => {
                CodeAttribs::new(ident.name.clone(), None, vec![])
            }
            ExprKind::PARENTHESIS(inner) => self.visit_expr(inner),
            ExprKind::ARRAY_ELEMENT { array, index } => {
                let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(index);
                let mut code = code1;
                let temp = self.counters.new_temp();
                let mut array_temp = array.name.clone();
                if self.symbols.is_parameter_class(&array.name) {
                    array_temp = self.counters.new_temp();
                    code.push(Instruction::LOAD(array_temp.clone(), array.name.clone()));
                }
                code.push(Instruction::LOADX(temp.clone(), array_temp, addr1));
                CodeAttribs::new(temp, None, code)
            }
            ExprKind::FUNC_CALL { callee, arguments } => {
                let (code, result) = self.generate_call(callee, arguments, true);
                let addr = result.expect("Expression call without a result slot");
                CodeAttribs::new(addr, None, code)
            }
            ExprKind::UNARY_OP { op, expression } => {
                let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(expression);
                let t1 = self.decorations.get_type(expression.id);
                let mut code = code1;
                let addr = match op {
                    // Unary plus produces its operand unchanged
                    UnaryOperation::PLUS => addr1,
                    UnaryOperation::NEGATE => {
                        let temp = self.counters.new_temp();
                        if self.types.is_float_ty(t1) {
                            code.push(Instruction::FNEG(temp.clone(), addr1));
                        } else {
                            code.push(Instruction::NEG(temp.clone(), addr1));
                        }
                        temp
                    }
                    UnaryOperation::NOT => {
                        let temp = self.counters.new_temp();
                        code.push(Instruction::NOT(temp.clone(), addr1));
                        temp
                    }
                };
                CodeAttribs::new(addr, None, code)
            }
            ExprKind::BINARY_OP { op, lhs, rhs } => {
                let CodeAttribs { addr: addr1, code: code1, .. } = self.visit_expr(lhs);
                let CodeAttribs { addr: addr2, code: code2, .. } = self.visit_expr(rhs);
                let t1 = self.decorations.get_type(lhs.id);
                let t2 = self.decorations.get_type(rhs.id);
                let mut code = code1;
                code.extend(code2);

                let temp = self.counters.new_temp();
                if op.is_arithmetic() {
                    self.generate_arithmetic(*op, &temp, addr1, addr2, t1, t2, &mut code);
                } else if op.is_relational() {
                    self.generate_relational(*op, &temp, addr1, addr2, t1, t2, &mut code);
                } else {
                    match op {
                        BinaryOperation::AND => code.push(Instruction::AND(temp.clone(), addr1, addr2)),
                        BinaryOperation::OR => code.push(Instruction::OR(temp.clone(), addr1, addr2)),
                        _ => unreachable!()
                    }
                }
                CodeAttribs::new(temp, None, code)
            }
        }
    }

    fn generate_arithmetic(
        &mut self,
        op: BinaryOperation,
        temp: &str,
        addr1: String,
        addr2: String,
        t1: TypeId,
        t2: TypeId,
        code: &mut Vec<Instruction>
    ) {
        let temp = String::from(temp);
        if self.types.is_integer_ty(t1) && self.types.is_integer_ty(t2) {
            match op {
                BinaryOperation::MUL => code.push(Instruction::MUL(temp, addr1, addr2)),
                BinaryOperation::DIV => code.push(Instruction::DIV(temp, addr1, addr2)),
                BinaryOperation::ADD => code.push(Instruction::ADD(temp, addr1, addr2)),
                BinaryOperation::SUB => code.push(Instruction::SUB(temp, addr1, addr2)),
                BinaryOperation::MOD => {
                    // a % b == a - (a / b) * b
                    let div_temp = self.counters.new_temp();
                    let mul_temp = self.counters.new_temp();
                    code.push(Instruction::DIV(div_temp.clone(), addr1.clone(), addr2.clone()));
                    code.push(Instruction::MUL(mul_temp.clone(), div_temp, addr2));
                    code.push(Instruction::SUB(temp, addr1, mul_temp));
                }
                _ => unreachable!()
            }
        } else {
            let (temp1, temp2) = self.widen_operands(addr1, addr2, t1, t2, code);
            match op {
                BinaryOperation::MUL => code.push(Instruction::FMUL(temp, temp1, temp2)),
                BinaryOperation::DIV => code.push(Instruction::FDIV(temp, temp1, temp2)),
                BinaryOperation::ADD => code.push(Instruction::FADD(temp, temp1, temp2)),
                BinaryOperation::SUB => code.push(Instruction::FSUB(temp, temp1, temp2)),
                _ => unreachable!()
            }
        }
    }

    fn generate_relational(
        &mut self,
        op: BinaryOperation,
        temp: &str,
        addr1: String,
        addr2: String,
        t1: TypeId,
        t2: TypeId,
        code: &mut Vec<Instruction>
    ) {
        let temp = String::from(temp);
        if !self.types.is_float_ty(t1) && !self.types.is_float_ty(t2) {
            // Integer family also covers boolean and character operands
            match op {
                BinaryOperation::EQUAL => code.push(Instruction::EQ(temp, addr1, addr2)),
                BinaryOperation::NOT_EQUAL => {
                    code.push(Instruction::EQ(temp.clone(), addr1, addr2));
                    code.push(Instruction::NOT(temp.clone(), temp));
                }
                BinaryOperation::GREATER_THAN => code.push(Instruction::LT(temp, addr2, addr1)),
                BinaryOperation::LESS_THAN => code.push(Instruction::LT(temp, addr1, addr2)),
                BinaryOperation::GREATER_EQUAL => code.push(Instruction::LE(temp, addr2, addr1)),
                BinaryOperation::LESS_EQUAL => code.push(Instruction::LE(temp, addr1, addr2)),
                _ => unreachable!()
            }
        } else {
            let (temp1, temp2) = self.widen_operands(addr1, addr2, t1, t2, code);
            match op {
                BinaryOperation::EQUAL => code.push(Instruction::FEQ(temp, temp1, temp2)),
                BinaryOperation::NOT_EQUAL => {
                    code.push(Instruction::FEQ(temp.clone(), temp1, temp2));
                    code.push(Instruction::NOT(temp.clone(), temp));
                }
                BinaryOperation::GREATER_THAN => code.push(Instruction::FLT(temp, temp2, temp1)),
                BinaryOperation::LESS_THAN => code.push(Instruction::FLT(temp, temp1, temp2)),
                BinaryOperation::GREATER_EQUAL => code.push(Instruction::FLE(temp, temp2, temp1)),
                BinaryOperation::LESS_EQUAL => code.push(Instruction::FLE(temp, temp1, temp2)),
                _ => unreachable!()
            }
        }
    }

    /// Widen an integer operand of a mixed float operation into a fresh
    /// temporary; a float operand keeps its address.
    fn widen_operands(
        &mut self,
        addr1: String,
        addr2: String,
        t1: TypeId,
        t2: TypeId,
        code: &mut Vec<Instruction>
    ) -> (String, String) {
        let mut temp1 = addr1.clone();
        let mut temp2 = addr2.clone();
        if self.types.is_integer_ty(t1) {
            temp1 = self.counters.new_temp();
            code.push(Instruction::FLOAT(temp1.clone(), addr1));
        } else if self.types.is_integer_ty(t2) {
            temp2 = self.counters.new_temp();
            code.push(Instruction::FLOAT(temp2.clone(), addr2));
        }
        (temp1, temp2)
    }
}
