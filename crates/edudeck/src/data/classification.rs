use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Qualitative,
    Quantitative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scale {
    Nominal,
    Ordinal,
    Discrete,
    Continuous,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Variable {
    pub name: &'static str,
    pub kind: Kind,
    pub scale: Scale,
}

impl Kind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Qualitative => "Cualitativa",
            Self::Quantitative => "Cuantitativa",
        }
    }
}

impl Scale {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Nominal => "Nominal",
            Self::Ordinal => "Ordinal",
            Self::Discrete => "Discreta",
            Self::Continuous => "Continua",
        }
    }
}

const fn quantitative(name: &'static str, scale: Scale) -> Variable {
    Variable {
        name,
        kind: Kind::Quantitative,
        scale,
    }
}

const fn qualitative(name: &'static str, scale: Scale) -> Variable {
    Variable {
        name,
        kind: Kind::Qualitative,
        scale,
    }
}

pub static VARIABLES: &[Variable] = &[
    quantitative("Edad", Scale::Discrete),
    quantitative("N° Estudiantes / Programas", Scale::Discrete),
    quantitative("Duración Carrera (semestres)", Scale::Discrete),
    quantitative("Monto Matrícula", Scale::Continuous),
    quantitative("Monto Arancel", Scale::Continuous),
    quantitative("Porcentaje", Scale::Continuous),
    qualitative("Género", Scale::Nominal),
    qualitative("Tipo de Institución", Scale::Nominal),
    qualitative("Modalidad de Estudio", Scale::Nominal),
    qualitative("Jornada", Scale::Nominal),
    qualitative("Área de Conocimiento", Scale::Nominal),
    qualitative("Rango de Edad", Scale::Ordinal),
    qualitative("Duración de Carreras", Scale::Ordinal),
    qualitative("Rango de Costos", Scale::Ordinal),
];

/// Look up a variable by its display name.
pub fn classify(name: &str) -> Option<&'static Variable> {
    VARIABLES.iter().find(|v| v.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_variables() {
        let gender = classify("Género").unwrap();
        assert_eq!(gender.kind, Kind::Qualitative);
        assert_eq!(gender.scale, Scale::Nominal);

        let costs = classify("Rango de Costos").unwrap();
        assert_eq!(costs.scale.display_name(), "Ordinal");

        let tuition = classify("Monto Arancel").unwrap();
        assert_eq!(tuition.kind.display_name(), "Cuantitativa");
        assert_eq!(tuition.scale.display_name(), "Continua");
    }

    #[test]
    fn test_classify_unknown_variable() {
        assert!(classify("Ingreso Familiar").is_none());
    }

    #[test]
    fn test_qualitative_variables_are_categorical() {
        for v in VARIABLES.iter().filter(|v| v.kind == Kind::Qualitative) {
            assert!(
                matches!(v.scale, Scale::Nominal | Scale::Ordinal),
                "{} has scale {:?}",
                v.name,
                v.scale
            );
        }
    }
}
