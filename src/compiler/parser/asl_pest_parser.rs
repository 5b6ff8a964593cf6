use std::str::FromStr;

use crate::pest::Parser;
use crate::pest::iterators::Pair;

use super::{AstParser, SyntaxError};
use super::super::ast::{
    AbstractSyntaxTree,
    BasicType,
    BinaryOperation,
    Expr,
    ExprKind,
    FunctionDef,
    Ident,
    Literal,
    Location,
    NodeIdGenerator,
    Param,
    Program,
    Stmt,
    TypeSpec,
    TypeSpecKind,
    UnaryOperation,
    VariableDecl
};

#[derive(Parser)]
#[grammar = "asl.pest"]
struct AslParser;

/// PestAslParser is a concrete AstParser backed by the pest grammar in
/// src/asl.pest. Besides shaping the tree it assigns every decoration
/// carrying node its unique id and records token locations for the
/// diagnostics of the later passes.
pub struct PestAslParser;

/// Tree builder holding the node id generator of one parse.
struct AstBuilder {
    ids: NodeIdGenerator
}

impl AstBuilder {
    fn new() -> Self {
        AstBuilder {
            ids: NodeIdGenerator::new()
        }
    }

    fn location(pair: &Pair<Rule>) -> Location {
        let (line, column) = pair.as_span().start_pos().line_col();
        Location::new(line, column)
    }

    fn parse_program(&mut self, pair: Pair<Rule>) -> Program {
        let id = self.ids.next().unwrap();
        let loc = Self::location(&pair);
        let mut functions = vec![];
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::function {
                functions.push(self.parse_function(inner));
            }
        }
        Program {
            id,
            loc,
            functions
        }
    }

    fn parse_function(&mut self, pair: Pair<Rule>) -> FunctionDef {
        let id = self.ids.next().unwrap();
        let mut inner = pair.into_inner();
        let name = self.parse_identifier(inner.next().unwrap());

        let mut params = vec![];
        let mut return_type = None;
        let mut declarations = vec![];
        let mut body = vec![];
        for pair in inner {
            match pair.as_rule() {
                Rule::parameter => {
                    let mut inner = pair.into_inner();
                    let name = self.parse_identifier(inner.next().unwrap());
                    let type_spec = self.parse_type_spec(inner.next().unwrap());
                    params.push(Param { name, type_spec });
                }
                Rule::return_type => {
                    let basic = pair.into_inner().next().unwrap();
                    return_type = Some(self.parse_basic_type_spec(basic));
                }
                Rule::variable_decl => {
                    declarations.push(self.parse_variable_decl(pair));
                }
                _ => {
                    body.push(self.parse_statement(pair));
                }
            }
        }
        FunctionDef {
            id,
            name,
            params,
            return_type,
            declarations,
            body
        }
    }

    fn parse_variable_decl(&mut self, pair: Pair<Rule>) -> VariableDecl {
        let loc = Self::location(&pair);
        let mut names = vec![];
        let mut type_spec = None;
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::identifier => names.push(self.parse_identifier(inner)),
                Rule::type_spec => type_spec = Some(self.parse_type_spec(inner)),
                _ => panic!("Malformed variable declaration: {:?}", inner.as_rule())
            }
        }
        VariableDecl {
            names,
            type_spec: type_spec.unwrap(),
            loc
        }
    }

    fn parse_type_spec(&mut self, pair: Pair<Rule>) -> TypeSpec {
        let id = self.ids.next().unwrap();
        let loc = Self::location(&pair);
        let inner = pair.into_inner().next().unwrap();
        let kind = match inner.as_rule() {
            Rule::basic_type => TypeSpecKind::BASIC(Self::parse_basic_type(&inner)),
            Rule::array_type => {
                let mut inner = inner.into_inner();
                let size = inner.next().unwrap().as_str().parse().unwrap();
                let element = Self::parse_basic_type(&inner.next().unwrap());
                TypeSpecKind::ARRAY { size, element }
            }
            _ => panic!("Malformed type: {:?}", inner.as_rule())
        };
        TypeSpec {
            id,
            loc,
            kind
        }
    }

    /// Type spec for a bare basic_type pair, as used by return types
    fn parse_basic_type_spec(&mut self, pair: Pair<Rule>) -> TypeSpec {
        let id = self.ids.next().unwrap();
        let loc = Self::location(&pair);
        let kind = TypeSpecKind::BASIC(Self::parse_basic_type(&pair));
        TypeSpec {
            id,
            loc,
            kind
        }
    }

    fn parse_basic_type(pair: &Pair<Rule>) -> BasicType {
        BasicType::from_str(pair.as_str())
            .unwrap_or_else(|_| panic!("Unrecognised basic type '{}'", pair.as_str()))
    }

    fn parse_statement(&mut self, pair: Pair<Rule>) -> Stmt {
        let loc = Self::location(&pair);
        match pair.as_rule() {
            Rule::assign_statement => {
                let mut inner = pair.into_inner();
                let target = self.parse_expression(inner.next().unwrap());
                let value = self.parse_expression(inner.next().unwrap());
                Stmt::ASSIGNMENT { target, value, loc }
            }
            Rule::if_statement => {
                let mut inner = pair.into_inner();
                let condition = self.parse_expression(inner.next().unwrap());
                let mut then_branch = vec![];
                let mut else_branch = None;
                for pair in inner {
                    if pair.as_rule() == Rule::else_clause {
                        let statements = pair.into_inner()
                            .map(|stmt| self.parse_statement(stmt))
                            .collect();
                        else_branch = Some(statements);
                    } else {
                        then_branch.push(self.parse_statement(pair));
                    }
                }
                Stmt::IF { condition, then_branch, else_branch, loc }
            }
            Rule::while_statement => {
                let mut inner = pair.into_inner();
                let condition = self.parse_expression(inner.next().unwrap());
                let body = inner.map(|stmt| self.parse_statement(stmt)).collect();
                Stmt::WHILE_LOOP { condition, body, loc }
            }
            Rule::return_statement => {
                let expression = pair.into_inner().next()
                    .map(|expr| self.parse_expression(expr));
                Stmt::RETURN { expression, loc }
            }
            Rule::read_statement => {
                let target = self.parse_expression(pair.into_inner().next().unwrap());
                Stmt::READ { target, loc }
            }
            Rule::write_statement => {
                let inner = pair.into_inner().next().unwrap();
                if inner.as_rule() == Rule::string {
                    let text = inner.as_str();
                    // Keep the bytes between the quotes, escapes unprocessed
                    let value = String::from(&text[1..text.len() - 1]);
                    Stmt::WRITE_STRING { value, loc }
                } else {
                    let expression = self.parse_expression(inner);
                    Stmt::WRITE_EXPR { expression, loc }
                }
            }
            Rule::proc_call_statement => {
                let call = pair.into_inner().next().unwrap();
                let (callee, arguments) = self.parse_call(call);
                Stmt::PROC_CALL { callee, arguments, loc }
            }
            _ => panic!("Unexpected statement rule: {:?}", pair.as_rule())
        }
    }

    fn parse_call(&mut self, pair: Pair<Rule>) -> (Ident, Vec<Expr>) {
        let mut inner = pair.into_inner();
        let callee = self.parse_identifier(inner.next().unwrap());
        let arguments = inner.map(|arg| self.parse_expression(arg)).collect();
        (callee, arguments)
    }

    fn parse_identifier(&mut self, pair: Pair<Rule>) -> Ident {
        Ident {
            id: self.ids.next().unwrap(),
            loc: Self::location(&pair),
            name: String::from(pair.as_str())
        }
    }

    fn parse_expression(&mut self, pair: Pair<Rule>) -> Expr {
        let loc = Self::location(&pair);
        match pair.as_rule() {
            Rule::logic_or | Rule::logic_and | Rule::relational |
            Rule::term | Rule::factor => {
                let mut inner = pair.into_inner();

                // Convert a linear list of binary operations of equal
                // precedence into a left leaning tree
                let mut lhs = self.parse_expression(inner.next().unwrap());
                while inner.peek().is_some() {
                    let op = Self::parse_binary_op(&inner.next().unwrap());
                    let rhs = self.parse_expression(inner.next().unwrap());
                    lhs = Expr {
                        id: self.ids.next().unwrap(),
                        loc,
                        kind: ExprKind::BINARY_OP {
                            op,
                            lhs: Box::new(lhs),
                            rhs: Box::new(rhs)
                        }
                    };
                }
                lhs
            }
            Rule::unary => {
                let mut inner = pair.into_inner();
                let operator_or_operand = inner.next().unwrap();
                match inner.next() {
                    Some(operand) => {
                        let op = Self::parse_unary_op(&operator_or_operand);
                        let expression = self.parse_expression(operand);
                        Expr {
                            id: self.ids.next().unwrap(),
                            loc,
                            kind: ExprKind::UNARY_OP {
                                op,
                                expression: Box::new(expression)
                            }
                        }
                    }
                    // Plain primary, no operator
                    None => self.parse_expression(operator_or_operand)
                }
            }
            Rule::paren_expr => {
                let inner = self.parse_expression(pair.into_inner().next().unwrap());
                Expr {
                    id: self.ids.next().unwrap(),
                    loc,
                    kind: ExprKind::PARENTHESIS(Box::new(inner))
                }
            }
            Rule::func_call => {
                let id = self.ids.next().unwrap();
                let (callee, arguments) = self.parse_call(pair);
                Expr {
                    id,
                    loc,
                    kind: ExprKind::FUNC_CALL { callee, arguments }
                }
            }
            Rule::array_element => {
                let id = self.ids.next().unwrap();
                let mut inner = pair.into_inner();
                let array = self.parse_identifier(inner.next().unwrap());
                let index = self.parse_expression(inner.next().unwrap());
                Expr {
                    id,
                    loc,
                    kind: ExprKind::ARRAY_ELEMENT {
                        array,
                        index: Box::new(index)
                    }
                }
            }
            Rule::identifier => {
                let ident = self.parse_identifier(pair);
                Expr {
                    id: self.ids.next().unwrap(),
                    loc,
                    kind: ExprKind::IDENT(ident)
                }
            }
            Rule::integer => self.literal_expr(loc, Literal::INTVAL(String::from(pair.as_str()))),
            Rule::decimal => self.literal_expr(loc, Literal::FLOATVAL(String::from(pair.as_str()))),
            Rule::boolean => self.literal_expr(loc, Literal::BOOLVAL(pair.as_str() == "true")),
            Rule::character => {
                let text = pair.as_str();
                // Keep the bytes between the quotes: 'a' or an escape '\n'
                self.literal_expr(loc, Literal::CHARVAL(String::from(&text[1..text.len() - 1])))
            }
            _ => panic!("Unexpected expression rule: {:?}", pair.as_rule())
        }
    }

    fn literal_expr(&mut self, loc: Location, literal: Literal) -> Expr {
        Expr {
            id: self.ids.next().unwrap(),
            loc,
            kind: ExprKind::VALUE(literal)
        }
    }

    fn parse_unary_op(pair: &Pair<Rule>) -> UnaryOperation {
        match pair.as_rule() {
            Rule::unary_not => UnaryOperation::NOT,
            Rule::unary_neg => UnaryOperation::NEGATE,
            Rule::unary_plus => UnaryOperation::PLUS,
            _ => panic!("Unexpected unary operator rule: {:?}", pair.as_rule())
        }
    }

    fn parse_binary_op(pair: &Pair<Rule>) -> BinaryOperation {
        match pair.as_rule() {
            Rule::add => BinaryOperation::ADD,
            Rule::sub => BinaryOperation::SUB,
            Rule::div => BinaryOperation::DIV,
            Rule::mul => BinaryOperation::MUL,
            Rule::modulus => BinaryOperation::MOD,
            Rule::equal => BinaryOperation::EQUAL,
            Rule::not_equal => BinaryOperation::NOT_EQUAL,
            Rule::greater_than => BinaryOperation::GREATER_THAN,
            Rule::less_than => BinaryOperation::LESS_THAN,
            Rule::greater_equal => BinaryOperation::GREATER_EQUAL,
            Rule::less_equal => BinaryOperation::LESS_EQUAL,
            Rule::op_and => BinaryOperation::AND,
            Rule::op_or => BinaryOperation::OR,
            _ => panic!("Unexpected binary operator rule: {:?}", pair.as_rule())
        }
    }
}

impl AstParser for PestAslParser {
    fn default() -> Self {
        Self {}
    }

    fn parse(self, source: &str) -> Result<AbstractSyntaxTree, SyntaxError> {
        match AslParser::parse(Rule::program, source) {
            Ok(mut pairs) => {
                let program = pairs.next().unwrap();
                let mut builder = AstBuilder::new();
                Ok(AbstractSyntaxTree::new(builder.parse_program(program)))
            }
            Err(error) => Err(SyntaxError::new(error.to_string()))
        }
    }
}
