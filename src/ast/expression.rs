use super::pattern::Pattern;

/// Literal constants shared by expressions and patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constant {
    Int(i64),
    Bool(bool),
    String(String),
    Unit,
    /// The empty list literal `[]`.
    EmptyList,
}

/// Binary operator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// The operand/result typing rule an operator follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    /// `int -> int -> int`
    Arithmetic,
    /// `'a -> 'a -> bool`
    Comparison,
    /// `bool -> bool -> bool`
    Boolean,
}

impl BinOp {
    pub fn class(self) -> OperatorClass {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                OperatorClass::Arithmetic
            }
            BinOp::Eq | BinOp::NotEq | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                OperatorClass::Comparison
            }
            BinOp::And | BinOp::Or => OperatorClass::Boolean,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "mod",
            BinOp::Eq => "=",
            BinOp::NotEq => "<>",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Whether a `let` may refer to the name it binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecFlag {
    NonRecursive,
    Recursive,
}

/// `let [rec] name = value`, shared by `let ... in` and top-level declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    pub rec_flag: RecFlag,
    pub name: String,
    pub value: Box<Expr>,
}

impl LetBinding {
    pub fn new(name: impl Into<String>, value: Expr) -> Self {
        LetBinding {
            rec_flag: RecFlag::NonRecursive,
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn recursive(name: impl Into<String>, value: Expr) -> Self {
        LetBinding {
            rec_flag: RecFlag::Recursive,
            name: name.into(),
            value: Box::new(value),
        }
    }
}

/// One `pattern -> body` clause of a `match`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: Expr,
}

impl MatchArm {
    pub fn new(pattern: Pattern, body: Expr) -> Self {
        MatchArm { pattern, body }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(Constant),
    Var(String),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    Let {
        binding: LetBinding,
        body: Box<Expr>,
    },
    Lambda {
        param: Pattern,
        body: Box<Expr>,
    },
    Tuple(Vec<Expr>),
    Cons {
        head: Box<Expr>,
        tail: Box<Expr>,
    },
    App {
        func: Box<Expr>,
        arg: Box<Expr>,
    },
    /// Data constructor reference such as `Some x`. Not typed.
    Constructor {
        name: String,
        arg: Option<Box<Expr>>,
    },
    /// Polymorphic variant such as `` `Red ``. Not typed.
    Variant {
        tag: String,
        arg: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn int(value: i64) -> Self {
        Expr::Constant(Constant::Int(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Constant(Constant::Bool(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Constant(Constant::String(value.into()))
    }

    pub fn unit() -> Self {
        Expr::Constant(Constant::Unit)
    }

    pub fn nil() -> Self {
        Expr::Constant(Constant::EmptyList)
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    pub fn binop(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn if_then_else(condition: Expr, then_expr: Expr, else_expr: Expr) -> Self {
        Expr::If {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }
    }

    pub fn match_with(scrutinee: Expr, arms: Vec<MatchArm>) -> Self {
        Expr::Match {
            scrutinee: Box::new(scrutinee),
            arms,
        }
    }

    /// `let name = value in body`
    pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Self {
        Expr::Let {
            binding: LetBinding::new(name, value),
            body: Box::new(body),
        }
    }

    /// `let rec name = value in body`
    pub fn let_rec_in(name: impl Into<String>, value: Expr, body: Expr) -> Self {
        Expr::Let {
            binding: LetBinding::recursive(name, value),
            body: Box::new(body),
        }
    }

    pub fn lambda(param: Pattern, body: Expr) -> Self {
        Expr::Lambda {
            param,
            body: Box::new(body),
        }
    }

    /// `fun name -> body`
    pub fn fun(param: impl Into<String>, body: Expr) -> Self {
        Expr::lambda(Pattern::var(param), body)
    }

    pub fn tuple(items: Vec<Expr>) -> Self {
        Expr::Tuple(items)
    }

    pub fn cons(head: Expr, tail: Expr) -> Self {
        Expr::Cons {
            head: Box::new(head),
            tail: Box::new(tail),
        }
    }

    /// Builds `[a; b; c]` as nested conses ending in `[]`.
    pub fn list(items: Vec<Expr>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Expr::nil(), |tail, head| Expr::cons(head, tail))
    }

    pub fn app(func: Expr, arg: Expr) -> Self {
        Expr::App {
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }

    /// Left-nested application `f a b c`.
    pub fn apply(func: Expr, args: Vec<Expr>) -> Self {
        args.into_iter().fold(func, Expr::app)
    }
}
