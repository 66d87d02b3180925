/// Statement Tags
///
/// Grammar constructs that can appear as an action inside a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtTag {
    /// `acao`, the wrapper around one statement of a body
    Action,
    /// `se`
    If,
    /// `repita`
    Repeat,
    /// `leia`
    Read,
    /// `escreva`
    Write,
    /// `retorna`
    Return,
    /// `atribuicao`
    Assignment,
}

impl StmtTag {
    pub fn name(&self) -> &'static str {
        match self {
            StmtTag::Action => "acao",
            StmtTag::If => "se",
            StmtTag::Repeat => "repita",
            StmtTag::Read => "leia",
            StmtTag::Write => "escreva",
            StmtTag::Return => "retorna",
            StmtTag::Assignment => "atribuicao",
        }
    }
}
