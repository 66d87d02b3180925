/// Declaration Tags
///
/// Grammar constructs that introduce names: variables, functions and their parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclTag {
    /// `declaracao`, the wrapper around any top-level declaration
    Declaration,
    /// `declaracao_variaveis`
    VariableDecl,
    /// `inicializacao_variaveis`, a top-level assignment
    VariableInit,
    /// `declaracao_funcao`
    FunctionDecl,
    /// `cabecalho`, the function header holding name, parameters and body
    Header,
    /// `parametro`
    Parameter,
    /// `tipo`
    Type,
}

impl DeclTag {
    pub fn name(&self) -> &'static str {
        match self {
            DeclTag::Declaration => "declaracao",
            DeclTag::VariableDecl => "declaracao_variaveis",
            DeclTag::VariableInit => "inicializacao_variaveis",
            DeclTag::FunctionDecl => "declaracao_funcao",
            DeclTag::Header => "cabecalho",
            DeclTag::Parameter => "parametro",
            DeclTag::Type => "tipo",
        }
    }
}
