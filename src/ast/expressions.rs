/// Expression Tags
///
/// Grammar constructs of the expression language, from the outermost
/// `expressao` down to factors, variables and operator wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprTag {
    Expression,
    Logical,
    Simple,
    Additive,
    Multiplicative,
    Unary,
    Factor,
    Number,
    Var,
    Index,
    Call,
    LogicalOp,
    RelationalOp,
    AdditiveOp,
    MultiplicativeOp,
    NegationOp,
}

impl ExprTag {
    pub fn name(&self) -> &'static str {
        match self {
            ExprTag::Expression => "expressao",
            ExprTag::Logical => "expressao_logica",
            ExprTag::Simple => "expressao_simples",
            ExprTag::Additive => "expressao_aditiva",
            ExprTag::Multiplicative => "expressao_multiplicativa",
            ExprTag::Unary => "expressao_unaria",
            ExprTag::Factor => "fator",
            ExprTag::Number => "numero",
            ExprTag::Var => "var",
            ExprTag::Index => "indice",
            ExprTag::Call => "chamada_funcao",
            ExprTag::LogicalOp => "operador_logico",
            ExprTag::RelationalOp => "operador_relacional",
            ExprTag::AdditiveOp => "operador_soma",
            ExprTag::MultiplicativeOp => "operador_multiplicacao",
            ExprTag::NegationOp => "operador_negacao",
        }
    }

    /// Whether this is one of the left-recursive binary precedence levels.
    pub fn is_binary_level(&self) -> bool {
        matches!(
            self,
            ExprTag::Logical | ExprTag::Simple | ExprTag::Additive | ExprTag::Multiplicative
        )
    }

    /// Whether this is an operator wrapper holding a single operator token.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            ExprTag::LogicalOp
                | ExprTag::RelationalOp
                | ExprTag::AdditiveOp
                | ExprTag::MultiplicativeOp
                | ExprTag::NegationOp
        )
    }
}
