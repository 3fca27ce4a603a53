
use std::io::BufRead;

use thiserror::Error;
use tracing::trace;

use crate::context::value::{Type, Value};
use crate::context::AnalysisContext;
use crate::diagnostics::{Diagnostic, Sink};
use crate::lexer::token::TokenKind;
use crate::parser::postfix::{InstrKind, Instruction, Postfix};
use crate::parser::Translation;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("variable '{0}' was not declared")]
    Undeclared(String),

    #[error("variable '{0}' wasn't initialized")]
    Uninitialized(String),

    #[error("constant '{0}' is missing from the constant table")]
    UnknownConstant(String),

    #[error("'{0}' cannot be assigned to")]
    NotAssignable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result of '{0}' is out of range")]
    Overflow(String),

    #[error("operator '{op}' expects numbers, got {ty}")]
    NotNumeric { op: String, ty: Type },

    #[error("allowed to compare only boolean or number expressions ({left} {op} {right})")]
    IncomparableOperands { left: Type, op: String, right: Type },

    #[error("no data was provided for variable '{0}'")]
    EmptyInput(String),

    #[error("invalid input '{text}' for variable '{name}' of type {ty}")]
    InvalidInput { name: String, ty: Type, text: String },

    #[error("could not read input: {0}")]
    InputUnavailable(String),

    #[error("operator '{0}' is not supported")]
    UnsupportedOperator(String),

    #[error("'{0}' is missing an operand")]
    StackUnderflow(String),

    #[error("'{0}' is not implemented")]
    NotImplemented(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Executes a postfix stream against the tables built during translation.
pub struct Interpreter {
    context: AnalysisContext,
    postfix: Postfix,
    stack: Vec<Instruction>,
    ip: usize,
}

impl Interpreter {
    pub fn new(translation: Translation) -> Self {
        Self {
            context: translation.context,
            postfix: translation.postfix,
            stack: Vec::new(),
            ip: 0,
        }
    }

    pub fn into_context(self) -> AnalysisContext {
        self.context
    }

    /// Runs the program to completion. `input` feeds `input(...)` statements, `print`
    /// output goes to `sink`.
    pub fn run(&mut self, input: &mut dyn BufRead, sink: &mut dyn Sink) -> RuntimeResult<()> {
        while let Some(instruction) = self.postfix.get(self.ip).cloned() {
            trace!(ip = self.ip, instruction = %instruction, "dispatch");
            self.dispatch(instruction, input, sink)?;
            self.ip += 1;
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        instruction: Instruction,
        input: &mut dyn BufRead,
        sink: &mut dyn Sink,
    ) -> RuntimeResult<()> {
        let kind = match instruction.kind {
            InstrKind::Marker => return Err(RuntimeError::NotImplemented(instruction.lexeme)),
            InstrKind::Token(kind) => kind,
        };

        match kind {
            k if k.is_operand() => {
                self.stack.push(instruction);
                Ok(())
            }
            TokenKind::Keyword if instruction.lexeme == "input" => self.input(input),
            TokenKind::Keyword if instruction.lexeme == "print" => self.print(sink),
            TokenKind::AssignOp => self.assign(&instruction.lexeme),
            TokenKind::AddOp | TokenKind::MultOp | TokenKind::PowOp => {
                self.arithmetic(&instruction.lexeme)
            }
            TokenKind::RelOp => self.compare(&instruction.lexeme),
            _ => Err(RuntimeError::UnsupportedOperator(instruction.lexeme)),
        }
    }

    fn pop(&mut self, op: &str) -> RuntimeResult<Instruction> {
        self.stack
            .pop()
            .ok_or_else(|| RuntimeError::StackUnderflow(op.to_string()))
    }

    /// Pops `(left, right)` in parse order.
    fn pop_pair(&mut self, op: &str) -> RuntimeResult<(Instruction, Instruction)> {
        let right = self.pop(op)?;
        let left = self.pop(op)?;
        Ok((left, right))
    }

    /// Current value of an operand reference.
    fn resolve(&self, operand: &Instruction) -> RuntimeResult<Value> {
        if operand.token_kind() == Some(TokenKind::Ident) {
            let entry = self
                .context
                .ident(&operand.lexeme)
                .filter(|e| e.declared_type.is_some())
                .ok_or_else(|| RuntimeError::Undeclared(operand.lexeme.clone()))?;
            entry
                .value
                .ok_or_else(|| RuntimeError::Uninitialized(operand.lexeme.clone()))
        } else {
            self.context
                .constant(&operand.lexeme)
                .map(|c| c.value)
                .ok_or_else(|| RuntimeError::UnknownConstant(operand.lexeme.clone()))
        }
    }

    /// Declared type of an identifier operand.
    fn declared(&self, operand: &Instruction) -> RuntimeResult<Type> {
        if operand.token_kind() != Some(TokenKind::Ident) {
            return Err(RuntimeError::NotAssignable(operand.lexeme.clone()));
        }
        self.context
            .ident(&operand.lexeme)
            .and_then(|e| e.declared_type)
            .ok_or_else(|| RuntimeError::Undeclared(operand.lexeme.clone()))
    }

    fn store(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        let entry = self
            .context
            .ident_mut(name)
            .ok_or_else(|| RuntimeError::Undeclared(name.to_string()))?;
        entry.value = Some(value);
        Ok(())
    }

    fn push_value(&mut self, value: Value) {
        let kind = match value {
            Value::Int(_) => TokenKind::Int,
            Value::Float(_) => TokenKind::Float,
            Value::Bool(_) => TokenKind::BoolVal,
        };
        let key = self.context.intern_value(value);
        self.stack.push(Instruction::new(key, kind));
    }

    fn assign(&mut self, op: &str) -> RuntimeResult<()> {
        let (target, source) = self.pop_pair(op)?;
        self.declared(&target)?;
        let value = self.resolve(&source)?;
        self.store(&target.lexeme, value)
    }

    fn arithmetic(&mut self, op: &str) -> RuntimeResult<()> {
        let (left, right) = self.pop_pair(op)?;
        let left = self.resolve(&left)?;
        let right = self.resolve(&right)?;
        let value = calculate(op, left, right)?;
        self.push_value(value);
        Ok(())
    }

    fn compare(&mut self, op: &str) -> RuntimeResult<()> {
        let (left, right) = self.pop_pair(op)?;
        let left = self.resolve(&left)?;
        let right = self.resolve(&right)?;

        // both sides must share a type, Bool compares as 0/1
        if left.ty() != right.ty() {
            return Err(RuntimeError::IncomparableOperands {
                left: left.ty(),
                op: op.to_string(),
                right: right.ty(),
            });
        }

        let (l, r) = (left.as_f64(), right.as_f64());
        let result = match op {
            ">=" => l >= r,
            "<=" => l <= r,
            ">" => l > r,
            "<" => l < r,
            "!=" => l != r,
            "==" => l == r,
            _ => return Err(RuntimeError::UnsupportedOperator(op.to_string())),
        };
        self.push_value(Value::Bool(result));
        Ok(())
    }

    fn input(&mut self, input: &mut dyn BufRead) -> RuntimeResult<()> {
        let target = self.pop("input")?;
        let ty = self.declared(&target)?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .map_err(|e| RuntimeError::InputUnavailable(e.to_string()))?;
        if read == 0 {
            return Err(RuntimeError::InputUnavailable(
                "end of input reached".to_string(),
            ));
        }

        let text = line.trim();
        if text.is_empty() {
            return Err(RuntimeError::EmptyInput(target.lexeme));
        }
        let value = Value::parse_as(text, ty).ok_or_else(|| RuntimeError::InvalidInput {
            name: target.lexeme.clone(),
            ty,
            text: text.to_string(),
        })?;
        self.store(&target.lexeme, value)
    }

    fn print(&mut self, sink: &mut dyn Sink) -> RuntimeResult<()> {
        let operand = self.pop("print")?;
        let value = self.resolve(&operand)?;
        sink.emit(Diagnostic::Output(format!(
            "{} has value {} ({})",
            operand.lexeme,
            value,
            value.ty()
        )));
        Ok(())
    }
}

fn numeric(op: &str, value: Value) -> RuntimeResult<Value> {
    match value {
        Value::Bool(_) => Err(RuntimeError::NotNumeric {
            op: op.to_string(),
            ty: Type::Bool,
        }),
        v => Ok(v),
    }
}

/// `Int` only when both sides are `Int`, `Float` otherwise.
fn calculate(op: &str, left: Value, right: Value) -> RuntimeResult<Value> {
    let left = numeric(op, left)?;
    let right = numeric(op, right)?;
    let overflow = || RuntimeError::Overflow(op.to_string());

    if op == "/" && right.is_zero() {
        return Err(RuntimeError::DivisionByZero);
    }

    let value = match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            let result = match op {
                "+" => a.checked_add(b),
                "-" => a.checked_sub(b),
                "*" => a.checked_mul(b),
                "/" => a.checked_div(b),
                "^" => {
                    let f = (a as f64).powf(b as f64);
                    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                        Some(f as i64)
                    } else {
                        None
                    }
                }
                _ => return Err(RuntimeError::UnsupportedOperator(op.to_string())),
            };
            Value::Int(result.ok_or_else(overflow)?)
        }
        (l, r) => {
            let (a, b) = (l.as_f64(), r.as_f64());
            let result = match op {
                "+" => a + b,
                "-" => a - b,
                "*" => a * b,
                "/" => a / b,
                "^" => a.powf(b),
                _ => return Err(RuntimeError::UnsupportedOperator(op.to_string())),
            };
            if !result.is_finite() {
                return Err(overflow());
            }
            Value::Float(result)
        }
    };
    Ok(value)
}
