use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("inteiro", TokenKind::Inteiro);
        map.insert("flutuante", TokenKind::Flutuante);
        map.insert("se", TokenKind::Se);
        map.insert("então", TokenKind::Entao);
        map.insert("entao", TokenKind::Entao);
        map.insert("senão", TokenKind::Senao);
        map.insert("senao", TokenKind::Senao);
        map.insert("fim", TokenKind::Fim);
        map.insert("repita", TokenKind::Repita);
        map.insert("até", TokenKind::Ate);
        map.insert("ate", TokenKind::Ate);
        map.insert("leia", TokenKind::Leia);
        map.insert("escreva", TokenKind::Escreva);
        map.insert("retorna", TokenKind::Retorna);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Id,

    NumInteiro,
    NumPontoFlutuante,
    NumNotacaoCientifica,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,

    Assignment, // :=
    Equals,     // =
    NotEquals,  // <>
    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    And, // &&
    Or,  // ||
    Not, // !

    Plus,
    Dash,
    Star,
    Slash,

    // Reserved
    Inteiro,
    Flutuante,
    Se,
    Entao,
    Senao,
    Fim,
    Repita,
    Ate,
    Leia,
    Escreva,
    Retorna,
}

impl TokenKind {
    /// The terminal's name in the T++ grammar, as it appears on parse tree nodes.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::Id => "ID",
            TokenKind::NumInteiro => "NUM_INTEIRO",
            TokenKind::NumPontoFlutuante => "NUM_PONTO_FLUTUANTE",
            TokenKind::NumNotacaoCientifica => "NUM_NOTACAO_CIENTIFICA",
            TokenKind::OpenParen => "ABRE_PARENTESE",
            TokenKind::CloseParen => "FECHA_PARENTESE",
            TokenKind::OpenBracket => "ABRE_COLCHETE",
            TokenKind::CloseBracket => "FECHA_COLCHETE",
            TokenKind::Comma => "VIRGULA",
            TokenKind::Colon => "DOIS_PONTOS",
            TokenKind::Assignment => "ATRIBUICAO",
            TokenKind::Equals => "IGUAL",
            TokenKind::NotEquals => "DIFERENTE",
            TokenKind::Less => "MENOR",
            TokenKind::LessEquals => "MENOR_IGUAL",
            TokenKind::Greater => "MAIOR",
            TokenKind::GreaterEquals => "MAIOR_IGUAL",
            TokenKind::And => "E_LOGICO",
            TokenKind::Or => "OU_LOGICO",
            TokenKind::Not => "NEGACAO",
            TokenKind::Plus => "MAIS",
            TokenKind::Dash => "MENOS",
            TokenKind::Star => "VEZES",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Inteiro => "INTEIRO",
            TokenKind::Flutuante => "FLUTUANTE",
            TokenKind::Se => "SE",
            TokenKind::Entao => "ENTAO",
            TokenKind::Senao => "SENAO",
            TokenKind::Fim => "FIM",
            TokenKind::Repita => "REPITA",
            TokenKind::Ate => "ATE",
            TokenKind::Leia => "LEIA",
            TokenKind::Escreva => "ESCREVA",
            TokenKind::Retorna => "RETORNA",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            TokenKind::NumInteiro | TokenKind::NumPontoFlutuante | TokenKind::NumNotacaoCientifica
        )
    }

    pub fn is_type(&self) -> bool {
        matches!(self, TokenKind::Inteiro | TokenKind::Flutuante)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
    pub line: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
