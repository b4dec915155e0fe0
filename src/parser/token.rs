use std::fmt;

#[derive(Clone, PartialEq, Debug)]
pub enum Token {
    /// One unit of indentation. Only produced when a line is re-expanded
    /// for display, the statement body never carries it.
    Whitespace,
    Int(i64),
    Ident(String),
    Bool(bool),
    KeyWord(KeyWord),
    BinaryOp(BinaryOp),
    UnaryOp(UnaryOp),
    CondOp(CondOp),
    Assign,
    Paren(Paren),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyWord {
    While,
    Print,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Neg,
    Plus,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CondOp {
    Lt,
    Gt,
    Lte,
    Gte,
    Equal,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Paren {
    Open,
    Close,
}

impl Token {
    /// Binding strength used by the shunting-yard conversion. Operands and
    /// parentheses have none.
    pub fn precedence(&self) -> Option<u8> {
        match self {
            Token::Assign => Some(1),
            Token::CondOp(_) => Some(2),
            Token::BinaryOp(op) => Some(op.precedence()),
            Token::UnaryOp(_) => Some(6),
            _ => None,
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Int(_) | Token::Ident(_) | Token::Bool(_))
    }

    /// Whether a `+` or `-` right after this token reads as a binary operator.
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Int(_) | Token::Ident(_) | Token::Bool(_) | Token::Paren(Paren::Close)
        )
    }
}

impl BinaryOp {
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 3,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 4,
            BinaryOp::Pow => 5,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Mod => '%',
            BinaryOp::Pow => '^',
        }
    }
}

impl KeyWord {
    pub fn from_word(word: &str) -> Option<KeyWord> {
        match word {
            "while" => Some(KeyWord::While),
            "print" => Some(KeyWord::Print),
            _ => None,
        }
    }
}

impl fmt::Display for KeyWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyWord::While => write!(f, "while"),
            KeyWord::Print => write!(f, "print"),
        }
    }
}

impl fmt::Display for CondOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            CondOp::Lt => "<",
            CondOp::Gt => ">",
            CondOp::Lte => "<=",
            CondOp::Gte => ">=",
            CondOp::Equal => "==",
        };

        write!(f, "{op}")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Whitespace => write!(f, "<indent>"),
            Token::Int(i) => write!(f, "{i}"),
            Token::Ident(name) => write!(f, "{name}"),
            Token::Bool(true) => write!(f, "True"),
            Token::Bool(false) => write!(f, "False"),
            Token::KeyWord(keyword) => write!(f, "{keyword}"),
            Token::BinaryOp(op) => write!(f, "{}", op.as_char()),
            Token::UnaryOp(UnaryOp::Neg) => write!(f, "neg"),
            Token::UnaryOp(UnaryOp::Plus) => write!(f, "pos"),
            Token::CondOp(op) => write!(f, "{op}"),
            Token::Assign => write!(f, "="),
            Token::Paren(Paren::Open) => write!(f, "("),
            Token::Paren(Paren::Close) => write!(f, ")"),
        }
    }
}
