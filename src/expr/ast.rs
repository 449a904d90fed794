// src/expr/ast.rs

//! Expression tree and its evaluator.

use std::fmt;

use crate::error::EvalError;

/// The two free variables of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }
}

/// The fixed set of single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Sqrt,
    Exp,
    Ln,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Floor,
    Ceil,
    Sign,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "abs" => Function::Abs,
            "sqrt" => Function::Sqrt,
            "exp" => Function::Exp,
            "ln" => Function::Ln,
            "log" => Function::Log,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            "sign" => Function::Sign,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Abs => "abs",
            Function::Sqrt => "sqrt",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log => "log",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Sign => "sign",
        }
    }

    fn apply(self, v: f64) -> Result<f64, EvalError> {
        let domain = |ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(EvalError::Domain {
                    function: self.name(),
                })
            }
        };
        let result = match self {
            Function::Abs => v.abs(),
            Function::Sqrt => {
                domain(v >= 0.0)?;
                v.sqrt()
            }
            Function::Exp => v.exp(),
            Function::Ln => {
                domain(v > 0.0)?;
                v.ln()
            }
            Function::Log => {
                domain(v > 0.0)?;
                v.log10()
            }
            Function::Sin => v.sin(),
            Function::Cos => v.cos(),
            Function::Tan => v.tan(),
            Function::Asin => {
                domain((-1.0..=1.0).contains(&v))?;
                v.asin()
            }
            Function::Acos => {
                domain((-1.0..=1.0).contains(&v))?;
                v.acos()
            }
            Function::Atan => v.atan(),
            Function::Sinh => v.sinh(),
            Function::Cosh => v.cosh(),
            Function::Tanh => v.tanh(),
            Function::Floor => v.floor(),
            Function::Ceil => v.ceil(),
            Function::Sign => {
                if v == 0.0 {
                    0.0
                } else {
                    v.signum()
                }
            }
        };
        Ok(result)
    }
}

/// A parsed arithmetic expression in `x` and `y`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(Variable),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        arg: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Evaluates the expression at `(x, y)`.
    ///
    /// Every intermediate value must be finite; NaN and infinities surface as
    /// `EvalError::NonFinite`.
    pub fn eval(&self, x: f64, y: f64) -> Result<f64, EvalError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Variable(Variable::X) => x,
            Expr::Variable(Variable::Y) => y,
            Expr::Neg(inner) => -inner.eval(x, y)?,
            Expr::Binary { op, lhs, rhs } => {
                let a = lhs.eval(x, y)?;
                let b = rhs.eval(x, y)?;
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => {
                        if b == 0.0 {
                            return Err(EvalError::DivisionByZero);
                        }
                        a / b
                    }
                    BinaryOp::Pow => a.powf(b),
                }
            }
            Expr::Call { function, arg } => function.apply(arg.eval(x, y)?)?,
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

/// Fully parenthesized form, handy in logs.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(Variable::X) => write!(f, "x"),
            Expr::Variable(Variable::Y) => write!(f, "y"),
            Expr::Neg(inner) => write!(f, "(-{})", inner),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call { function, arg } => write!(f, "{}({})", function.name(), arg),
        }
    }
}
