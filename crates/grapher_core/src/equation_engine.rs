use crate::traits::{Mapping, ScalarField};
use anyhow::{anyhow, bail, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Built-in single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Sinh,
    Cosh,
    Tanh,
}

impl Function {
    fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "exp" => Function::Exp,
            "ln" | "log" => Function::Ln,
            "sqrt" => Function::Sqrt,
            "abs" => Function::Abs,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            _ => return None,
        };
        Some(function)
    }

    fn apply(self, a: f64) -> f64 {
        match self {
            Function::Sin => a.sin(),
            Function::Cos => a.cos(),
            Function::Tan => a.tan(),
            Function::Exp => a.exp(),
            Function::Ln => a.ln(),
            Function::Sqrt => a.sqrt(),
            Function::Abs => a.abs(),
            Function::Sinh => a.sinh(),
            Function::Cosh => a.cosh(),
            Function::Tanh => a.tanh(),
        }
    }
}

/// OpCodes for the stack-based virtual machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpCode {
    /// Pushes a constant onto the stack.
    LoadConst(f64),
    /// Pushes a coordinate of the evaluation point (by index).
    LoadVar(usize),
    /// Pushes a parameter (by index).
    LoadParam(usize),
    /// Pops top two values (b, a), pushes (a + b).
    Add,
    /// Pops top two values (b, a), pushes (a - b).
    Sub,
    /// Pops top two values (b, a), pushes (a * b).
    Mul,
    /// Pops top two values (b, a), pushes (a / b).
    Div,
    /// Pops top two values (b, a), pushes (a ^ b).
    Pow,
    /// Pops top value (a), pushes -a.
    Neg,
    /// Pops top value (a), pushes f(a).
    Call(Function),
}

/// A compiled sequence of operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bytecode {
    pub ops: Vec<OpCode>,
}

/// Stack-based virtual machine.
///
/// The VM is stateless; `execute` takes all the context it needs and returns
/// the value left on the stack.
pub struct VM;

impl VM {
    pub fn execute(bytecode: &Bytecode, vars: &[f64], params: &[f64], stack: &mut Vec<f64>) -> f64 {
        stack.clear();

        for op in &bytecode.ops {
            match *op {
                OpCode::LoadConst(val) => stack.push(val),
                OpCode::LoadVar(idx) => stack.push(vars.get(idx).copied().unwrap_or(f64::NAN)),
                OpCode::LoadParam(idx) => stack.push(params.get(idx).copied().unwrap_or(f64::NAN)),
                OpCode::Neg => {
                    let a = pop(stack);
                    stack.push(-a);
                }
                OpCode::Call(function) => {
                    let a = pop(stack);
                    stack.push(function.apply(a));
                }
                binary => {
                    let b = pop(stack);
                    let a = pop(stack);
                    let value = match binary {
                        OpCode::Add => a + b,
                        OpCode::Sub => a - b,
                        OpCode::Mul => a * b,
                        OpCode::Div => a / b,
                        OpCode::Pow => a.powf(b),
                        _ => unreachable!("non-binary opcode {binary:?}"),
                    };
                    stack.push(value);
                }
            }
        }

        // Compiled code always leaves exactly one value.
        stack.pop().unwrap_or(f64::NAN)
    }
}

fn pop(stack: &mut Vec<f64>) -> f64 {
    stack.pop().unwrap_or(f64::NAN)
}

// --- AST & Parser ---

/// Abstract syntax tree nodes for expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Binary(Box<Expr>, char, Box<Expr>), // +, -, *, /, ^
    Unary(char, Box<Expr>),             // -
    Call(String, Box<Expr>),
}

/// Compiles an `Expr` into `Bytecode`, resolving names to indices.
/// Variables shadow parameters of the same name; `pi` and `e` are constants
/// unless shadowed.
pub struct Compiler {
    pub var_map: HashMap<String, usize>,
    pub param_map: HashMap<String, usize>,
}

impl Compiler {
    pub fn new(var_names: &[String], param_names: &[String]) -> Self {
        let var_map = var_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let param_map = param_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self { var_map, param_map }
    }

    pub fn compile(&self, expr: &Expr) -> Result<Bytecode> {
        let mut ops = Vec::new();
        self.compile_recursive(expr, &mut ops)?;
        Ok(Bytecode { ops })
    }

    fn compile_recursive(&self, expr: &Expr, ops: &mut Vec<OpCode>) -> Result<()> {
        match expr {
            Expr::Number(n) => ops.push(OpCode::LoadConst(*n)),
            Expr::Variable(name) => {
                if let Some(&idx) = self.var_map.get(name) {
                    ops.push(OpCode::LoadVar(idx));
                } else if let Some(&idx) = self.param_map.get(name) {
                    ops.push(OpCode::LoadParam(idx));
                } else if name == "pi" {
                    ops.push(OpCode::LoadConst(std::f64::consts::PI));
                } else if name == "e" {
                    ops.push(OpCode::LoadConst(std::f64::consts::E));
                } else {
                    bail!("Unknown variable or parameter: {name}");
                }
            }
            Expr::Binary(left, op, right) => {
                self.compile_recursive(left, ops)?;
                self.compile_recursive(right, ops)?;
                let code = match op {
                    '+' => OpCode::Add,
                    '-' => OpCode::Sub,
                    '*' => OpCode::Mul,
                    '/' => OpCode::Div,
                    '^' => OpCode::Pow,
                    _ => bail!("Unknown binary operator: {op}"),
                };
                ops.push(code);
            }
            Expr::Unary(op, operand) => {
                self.compile_recursive(operand, ops)?;
                match op {
                    '-' => ops.push(OpCode::Neg),
                    _ => bail!("Unknown unary operator: {op}"),
                }
            }
            Expr::Call(func, arg) => {
                let function = Function::from_name(func)
                    .ok_or_else(|| anyhow!("Unknown function: {func}"))?;
                self.compile_recursive(arg, ops)?;
                ops.push(OpCode::Call(function));
            }
        }
        Ok(())
    }
}

// --- Simple Parser ---

/// Parses a string expression into an AST.
///
/// Precedence from loosest to tightest: `+ -`, `* /`, unary `-`, `^`
/// (right-associative), so `-x^2` is `-(x^2)` and `2^3^2` is `2^9`.
pub fn parse(input: &str) -> Result<Expr, String> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(format!("Unexpected trailing input at {token:?}")),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_digit() || c == '.' {
            let mut num_str = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_ascii_digit() || d == '.' {
                    num_str.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            let value = num_str
                .parse()
                .map_err(|_| format!("Invalid number literal: {num_str}"))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() {
            let mut ident = String::new();
            while let Some(&d) = chars.peek() {
                if d.is_alphanumeric() || d == '_' {
                    ident.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token::Identifier(ident));
        } else {
            let token = match c {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '/' => Token::Slash,
                '^' => Token::Caret,
                '(' => Token::LParen,
                ')' => Token::RParen,
                _ => return Err(format!("Unexpected character: '{c}'")),
            };
            tokens.push(token);
            chars.next();
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_rparen(&mut self) -> Result<(), String> {
        match self.consume() {
            Some(Token::RParen) => Ok(()),
            _ => Err("Expected ')'".to_string()),
        }
    }

    fn parse_expression(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_term()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Plus => '+',
                Token::Minus => '-',
                _ => break,
            };
            self.consume();
            let right = self.parse_term()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, String> {
        let mut left = self.parse_unary()?;

        while let Some(token) = self.peek() {
            let op = match token {
                Token::Star => '*',
                Token::Slash => '/',
                _ => break,
            };
            self.consume();
            let right = self.parse_unary()?;
            left = Expr::Binary(Box::new(left), op, Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, String> {
        if let Some(Token::Minus) = self.peek() {
            self.consume();
            let expr = self.parse_unary()?;
            return Ok(Expr::Unary('-', Box::new(expr)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, String> {
        let base = self.parse_primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.consume();
            // Right-associative; the exponent may carry its own sign.
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(Box::new(base), '^', Box::new(exponent)));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, String> {
        match self.consume() {
            Some(Token::Number(n)) => Ok(Expr::Number(n)),
            Some(Token::Identifier(name)) => {
                if let Some(Token::LParen) = self.peek() {
                    self.consume();
                    let arg = self.parse_expression()?;
                    self.expect_rparen()?;
                    Ok(Expr::Call(name, Box::new(arg)))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                self.expect_rparen()?;
                Ok(expr)
            }
            Some(token) => Err(format!("Unexpected token: {token:?}")),
            None => Err("Unexpected end of expression".to_string()),
        }
    }
}

/// Parses and compiles one expression over the given variable and parameter names.
pub fn compile_scalar_expression(
    expression: &str,
    var_names: &[String],
    param_names: &[String],
) -> Result<Bytecode> {
    let parsed = parse(expression).map_err(|err| anyhow!("Failed to parse '{expression}': {err}"))?;
    Compiler::new(var_names, param_names).compile(&parsed)
}

fn check_params(param_names: &[String], params: &[f64]) -> Result<()> {
    if param_names.len() != params.len() {
        bail!(
            "Parameter count mismatch: {} names but {} values.",
            param_names.len(),
            params.len()
        );
    }
    Ok(())
}

// --- Compiled functions ---

/// A compiled scalar expression usable as a slope function or scalar field.
#[derive(Debug, Clone)]
pub struct ExpressionField {
    pub code: Bytecode,
    pub params: Vec<f64>,
    // Interior mutability for the VM stack to avoid allocation per evaluation.
    // Note: this makes the field !Sync.
    stack: RefCell<Vec<f64>>,
}

impl ExpressionField {
    pub fn new(code: Bytecode, params: Vec<f64>) -> Self {
        Self {
            code,
            params,
            stack: RefCell::new(Vec::with_capacity(64)),
        }
    }

    pub fn compile(
        expression: &str,
        var_names: &[String],
        param_names: &[String],
        params: Vec<f64>,
    ) -> Result<Self> {
        check_params(param_names, &params)?;
        let code = compile_scalar_expression(expression, var_names, param_names)?;
        Ok(Self::new(code, params))
    }
}

impl ScalarField for ExpressionField {
    fn evaluate(&self, point: &[f64]) -> f64 {
        let mut stack = self.stack.borrow_mut();
        VM::execute(&self.code, point, &self.params, &mut stack)
    }
}

/// One compiled expression per output coordinate: a mapping `R^d -> R^k`.
#[derive(Debug, Clone)]
pub struct ExpressionMap {
    pub equations: Vec<Bytecode>,
    pub params: Vec<f64>,
    stack: RefCell<Vec<f64>>,
}

impl ExpressionMap {
    pub fn new(equations: Vec<Bytecode>, params: Vec<f64>) -> Self {
        Self {
            equations,
            params,
            stack: RefCell::new(Vec::with_capacity(64)),
        }
    }

    pub fn compile(
        equations: &[String],
        var_names: &[String],
        param_names: &[String],
        params: Vec<f64>,
    ) -> Result<Self> {
        if equations.is_empty() {
            bail!("A mapping needs at least one output expression.");
        }
        check_params(param_names, &params)?;
        let equations = equations
            .iter()
            .map(|eq| compile_scalar_expression(eq, var_names, param_names))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(equations, params))
    }

    pub fn output_dimension(&self) -> usize {
        self.equations.len()
    }
}

impl Mapping for ExpressionMap {
    fn apply(&self, point: &[f64]) -> Vec<f64> {
        let mut stack = self.stack.borrow_mut();
        self.equations
            .iter()
            .map(|eq| VM::execute(eq, point, &self.params, &mut stack))
            .collect()
    }
}
