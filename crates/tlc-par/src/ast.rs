use tlc_util::Span;

/// An AST leaf: a symbol, a number, or a string with its quotes stripped.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Symbol(String),
    Number(f64),
    String(String),
}

/// An S-expression: an atom, a parenthesised list, or a parse-error marker.
///
/// `Error` nodes only appear transiently while hand-testing partial parses;
/// a full `parse_program` run never returns one — any lex or syntax problem
/// is fatal and surfaces as a `ParseError` instead. The variant is kept
/// because the data model treats it as a first-class `Expr` case.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Atom(Atom),
    List(Vec<Expr>),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn atom(atom: Atom, span: Span) -> Self {
        Self {
            kind: ExprKind::Atom(atom),
            span,
        }
    }

    pub fn list(items: Vec<Expr>, span: Span) -> Self {
        Self {
            kind: ExprKind::List(items),
            span,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Atom(Atom::Symbol(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match &self.kind {
            ExprKind::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// An ordered, growable sequence of top-level expressions.
pub type ExprVector = Vec<Expr>;
