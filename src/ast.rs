/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// `Expr` covers all expression forms, from literals and identifiers to
/// calls, member access, array and object literals, and function literals.
/// Nodes carry only structural data; runtime errors describe the semantic
/// condition rather than a source position.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal. All numbers are IEEE-754 doubles.
    Number(f64),
    /// A plain string literal, escapes already decoded.
    Str(String),
    /// A string that contained an interpolation marker when lexed.
    ///
    /// Parts alternate between literal text and embedded expressions.
    /// A template without any embedded expression degenerates to a single
    /// literal part.
    Template(Vec<TemplatePart>),
    /// A boolean literal: `true` or `false`.
    Bool(bool),
    /// The `null` literal.
    Null,
    /// Reference to a name, resolved at evaluation time against the
    /// variables map, then host functions, then built-ins.
    Identifier(String),
    /// A binary operation (arithmetic, comparison, or logical).
    Binary {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// A unary operation (negation or logical not).
    Unary {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
    },
    /// A call expression. The callee is an arbitrary expression; it must
    /// evaluate to a function, host function, or built-in.
    Call {
        /// The expression being called.
        callee:    Box<Self>,
        /// Arguments in source order.
        arguments: Vec<Self>,
    },
    /// Member access: `object.name`.
    Member {
        /// The receiver expression.
        object:   Box<Self>,
        /// The property name.
        property: String,
    },
    /// Null-safe member access: `object?.name` yields null for a null
    /// receiver instead of failing.
    SafeMember {
        /// The receiver expression.
        object:   Box<Self>,
        /// The property name.
        property: String,
    },
    /// The elvis operator: `left ?: right` yields the left value unless it
    /// is null. Distinct from a truthiness default: `0 ?: 1` is `0`.
    Elvis {
        /// Expression whose non-null value wins.
        left:  Box<Self>,
        /// Fallback used when the left value is null.
        right: Box<Self>,
    },
    /// Array literal: `[a, b, c]`.
    Array(Vec<Self>),
    /// Object literal: `{ key: value, ... }`. Keys are identifier-syntax
    /// strings in declaration order; a duplicate key keeps the last value.
    Object(Vec<(String, Self)>),
    /// Index expression: `object[index]`.
    Index {
        /// The indexed expression (array, object, or string).
        object: Box<Self>,
        /// The index expression.
        index:  Box<Self>,
    },
    /// Function literal: `fn (a, b) { ... }`. Evaluating one captures the
    /// current variables map by snapshot.
    Function {
        /// Parameter names in order.
        params: Vec<String>,
        /// The body block's statements.
        body:   Vec<Stmt>,
    },
}

/// One part of a string template: literal text or an embedded expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Literal text between interpolation markers.
    Literal(String),
    /// An expression taken from a `${...}` marker.
    Expr(Expr),
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A binding introduced with `let`.
    Let {
        /// The bound name.
        name:  String,
        /// The initializer expression.
        value: Expr,
    },
    /// A plain assignment. Writes the name into the current variables map
    /// whether or not it already exists; there is no separate declaration
    /// semantic.
    Assign {
        /// The assigned name.
        name:  String,
        /// The value expression.
        value: Expr,
    },
    /// An `if` statement with optional `else`. Branches may be blocks or
    /// single statements.
    If {
        /// The condition, tested for truthiness.
        condition:   Expr,
        /// Statement run when the condition is truthy.
        then_branch: Box<Self>,
        /// Statement run otherwise, if present.
        else_branch: Option<Box<Self>>,
    },
    /// A `for (name in iterable) { ... }` loop.
    ForIn {
        /// The loop variable name.
        variable: String,
        /// The iterated expression (array, object, or string).
        iterable: Expr,
        /// The body block's statements.
        body:     Vec<Self>,
    },
    /// A `while (condition) { ... }` loop.
    While {
        /// The condition, re-tested before every turn.
        condition: Expr,
        /// The body block's statements.
        body:      Vec<Self>,
    },
    /// A `return` with optional value. Unwinds to the nearest function
    /// activation, or terminates the program at the top level.
    Return(Option<Expr>),
    /// A brace-delimited block of statements.
    Block(Vec<Self>),
    /// An expression evaluated for its value.
    Expression(Expr),
}

/// A parsed program: the ordered top-level statements of one script.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Stmt>,
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition, or string concatenation when either side is a string (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`&&`, `and`)
    And,
    /// Logical or (`||`, `or`)
    Or,
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`, `not x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Equal => "==",
            NotEqual => "!=",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}
