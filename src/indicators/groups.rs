//! Static indicator groups and output column names.

/// Identifying columns copied verbatim into the indicator table.
pub static ID_COLUMNS: &[&str] = &["NO_ENTIDADE", "CO_ENTIDADE", "NO_MUNICIPIO", "NO_BAIRRO"];

/// Name of the overall score column.
pub const OVERALL_COLUMN: &str = "INDICE_GERAL_INFRA";

/// The four infrastructure categories a school is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    BasicInfrastructure,
    EducationalEnvironments,
    Accessibility,
    Technology,
}

impl Category {
    /// Header of the category score column.
    pub fn column(self) -> &'static str {
        match self {
            Category::BasicInfrastructure => "INFRA_BASICA",
            Category::EducationalEnvironments => "AMBIENTES_EDUC",
            Category::Accessibility => "ACESSIBILIDADE",
            Category::Technology => "TECNOLOGIA",
        }
    }
}

/// A category and the census columns averaged into its score.
#[derive(Debug)]
pub struct IndicatorGroup {
    pub category: Category,
    pub columns: &'static [&'static str],
}

pub static GROUPS: &[IndicatorGroup] = &[
    IndicatorGroup {
        category: Category::BasicInfrastructure,
        columns: &[
            "IN_AGUA_POTAVEL",
            "IN_ESGOTO_REDE_PUBLICA",
            "IN_LIXO_SERVICO_COLETA",
            "IN_ENERGIA_REDE_PUBLICA",
        ],
    },
    IndicatorGroup {
        category: Category::EducationalEnvironments,
        columns: &[
            "IN_BIBLIOTECA",
            "IN_BIBLIOTECA_SALA_LEITURA",
            "IN_LABORATORIO_INFORMATICA",
            "IN_LABORATORIO_CIENCIAS",
            "IN_COZINHA",
            "IN_REFEITORIO",
            "IN_QUADRA_ESPORTES_COBERTA",
            "IN_QUADRA_ESPORTES_DESCOBERTA",
            "IN_PARQUE_INFANTIL",
        ],
    },
    IndicatorGroup {
        category: Category::Accessibility,
        columns: &[
            "IN_ACESSIBILIDADE_RAMPAS",
            "IN_ACESSIBILIDADE_PISOS_TATEIS",
            "IN_ACESSIBILIDADE_ELEVADOR",
            "IN_ACESSIBILIDADE_SINAL_VISUAL",
            "IN_ACESSIBILIDADE_SINAL_SONORO",
            "IN_ACESSIBILIDADE_SINAL_TATIL",
            "IN_ACESSIBILIDADE_CORRIMAO",
        ],
    },
    IndicatorGroup {
        category: Category::Technology,
        columns: &[
            "IN_COMPUTADOR",
            "IN_EQUIP_MULTIMIDIA",
            "IN_EQUIP_LOUSA_DIGITAL",
            "IN_BANDA_LARGA",
            "IN_INTERNET",
            "IN_INTERNET_ALUNOS",
        ],
    },
];

/// Every indicator column across all groups, in group order.
pub fn indicator_columns() -> impl Iterator<Item = &'static str> {
    GROUPS.iter().flat_map(|g| g.columns.iter().copied())
}

/// Header of the indicator table, identifying columns first.
pub fn output_columns() -> Vec<&'static str> {
    let mut cols: Vec<&'static str> = ID_COLUMNS.to_vec();
    cols.extend(GROUPS.iter().map(|g| g.category.column()));
    cols.push(OVERALL_COLUMN);
    cols
}
