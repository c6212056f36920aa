use crate::chars::{is_unreserved, is_unreserved_or_reserved};
use crate::error::Result;
use crate::out::Out;
use crate::reader::Reader;

/// Expression operator (RFC 6570 section 2.2).
///
/// Level 2 and 3 operators select an expansion style. The reserved set
/// parses and formats but carries no expansion semantics of its own;
/// rendering and matching treat it like the operator-less form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Level2(OperatorLevel2),
    Level3(OperatorLevel3),
    Reserved(OperatorReserved),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorLevel2 {
    /// `+`: expansion keeps reserved characters.
    Reserved,
    /// `#`: fragment expansion.
    Fragment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorLevel3 {
    /// `.`
    Label,
    /// `/`
    Segment,
    /// `;`
    Parameter,
    /// `?`
    Query,
    /// `&`
    QueryContinuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorReserved {
    Equals,
    Comma,
    Exclamation,
    At,
    Pipe,
}

impl Operator {
    /// A single operator byte, or nothing. Never fails; the absence of an
    /// operator is the simple expression form.
    pub(crate) fn parse_opt(r: &mut Reader) -> Result<Option<Self>> {
        use OperatorLevel2::*;
        use OperatorLevel3::*;
        use OperatorReserved::*;

        let op = match r.peek() {
            Some(b'+') => Operator::Level2(Reserved),
            Some(b'#') => Operator::Level2(Fragment),
            Some(b'.') => Operator::Level3(Label),
            Some(b'/') => Operator::Level3(Segment),
            Some(b';') => Operator::Level3(Parameter),
            Some(b'?') => Operator::Level3(Query),
            Some(b'&') => Operator::Level3(QueryContinuation),
            Some(b'=') => Operator::Reserved(Equals),
            Some(b',') => Operator::Reserved(Comma),
            Some(b'!') => Operator::Reserved(Exclamation),
            Some(b'@') => Operator::Reserved(At),
            Some(b'|') => Operator::Reserved(Pipe),
            _ => return Ok(None),
        };
        r.bump();
        Ok(Some(op))
    }

    pub(crate) fn write_to(&self, out: &mut Out) {
        out.push(self.sigil());
    }

    pub(crate) fn sigil(&self) -> char {
        use OperatorLevel2::*;
        use OperatorLevel3::*;
        use OperatorReserved::*;

        match self {
            Operator::Level2(Reserved) => '+',
            Operator::Level2(Fragment) => '#',
            Operator::Level3(Label) => '.',
            Operator::Level3(Segment) => '/',
            Operator::Level3(Parameter) => ';',
            Operator::Level3(Query) => '?',
            Operator::Level3(QueryContinuation) => '&',
            Operator::Reserved(Equals) => '=',
            Operator::Reserved(Comma) => ',',
            Operator::Reserved(Exclamation) => '!',
            Operator::Reserved(At) => '@',
            Operator::Reserved(Pipe) => '|',
        }
    }
}

/// How an expression expands, keyed by operator (RFC 6570 appendix A).
pub(crate) struct Expansion {
    /// Emitted ahead of the first variable that produces output.
    pub first: Option<char>,
    pub sep: char,
    /// Named expansion prepends `name=` per variable.
    pub named: bool,
    /// Named expansion drops the `=` for an empty value.
    pub omit_eq_on_empty: bool,
    /// Reserved characters pass through instead of being encoded.
    pub allow_reserved: bool,
}

impl Expansion {
    pub fn for_operator(op: Option<Operator>) -> Expansion {
        use OperatorLevel2::*;
        use OperatorLevel3::*;

        match op {
            None | Some(Operator::Reserved(_)) => Expansion {
                first: None,
                sep: ',',
                named: false,
                omit_eq_on_empty: false,
                allow_reserved: false,
            },
            Some(Operator::Level2(Reserved)) => Expansion {
                first: None,
                sep: ',',
                named: false,
                omit_eq_on_empty: false,
                allow_reserved: true,
            },
            Some(Operator::Level2(Fragment)) => Expansion {
                first: Some('#'),
                sep: ',',
                named: false,
                omit_eq_on_empty: false,
                allow_reserved: true,
            },
            Some(Operator::Level3(Label)) => Expansion {
                first: Some('.'),
                sep: '.',
                named: false,
                omit_eq_on_empty: false,
                allow_reserved: false,
            },
            Some(Operator::Level3(Segment)) => Expansion {
                first: Some('/'),
                sep: '/',
                named: false,
                omit_eq_on_empty: false,
                allow_reserved: false,
            },
            Some(Operator::Level3(Parameter)) => Expansion {
                first: Some(';'),
                sep: ';',
                named: true,
                omit_eq_on_empty: true,
                allow_reserved: false,
            },
            Some(Operator::Level3(Query)) => Expansion {
                first: Some('?'),
                sep: '&',
                named: true,
                omit_eq_on_empty: false,
                allow_reserved: false,
            },
            Some(Operator::Level3(QueryContinuation)) => Expansion {
                first: Some('&'),
                sep: '&',
                named: true,
                omit_eq_on_empty: false,
                allow_reserved: false,
            },
        }
    }

    pub fn value_class(&self) -> fn(u8) -> bool {
        if self.allow_reserved {
            is_unreserved_or_reserved
        } else {
            is_unreserved
        }
    }
}
