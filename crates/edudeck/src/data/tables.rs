//! Frequency tables for the 2021 enrollment of the Magallanes y Antártica
//! Chilena region.

use super::{Dataset, Row};

const fn row(label: &'static str, values: &'static [u32], percentage: Option<f32>) -> Row {
    Row {
        label,
        values,
        percentage,
    }
}

pub static GENDER: Dataset = Dataset {
    id: "gender",
    category_header: "Categoría",
    value_headers: &["Frecuencia Absoluta"],
    rows: &[
        row("Femenino", &[3265], Some(56.33)),
        row("Masculino", &[2531], Some(43.67)),
    ],
};

pub static AGE_RANGES: Dataset = Dataset {
    id: "age",
    category_header: "Rango",
    value_headers: &["N° de Estudiantes"],
    rows: &[
        row("15-19", &[1187], None),
        row("20-24", &[2862], None),
        row("25-29", &[879], None),
        row("30-34", &[393], None),
        row("35-39", &[256], None),
        row("40+", &[219], None),
    ],
};

pub static INSTITUTIONS: Dataset = Dataset {
    id: "institution",
    category_header: "Categoría",
    value_headers: &["N° de Estudiantes"],
    rows: &[
        row("Universidades CRUCH", &[3294], None),
        row("Centros de Formación Técnica", &[1480], None),
        row("Institutos Profesionales", &[877], None),
        row("Universidades Privadas", &[145], None),
    ],
};

pub static MODALITY: Dataset = Dataset {
    id: "modality",
    category_header: "Categoría",
    value_headers: &["Frecuencia Absoluta"],
    rows: &[
        row("Presencial", &[5821], Some(97.2)),
        row("En Línea", &[166], Some(2.8)),
    ],
};

pub static SCHEDULE: Dataset = Dataset {
    id: "schedule",
    category_header: "Categoría",
    value_headers: &["N° de Estudiantes"],
    rows: &[
        row("Diurno", &[4245], Some(60.9)),
        row("Vespertino", &[1689], Some(24.2)),
        row("Ejecutivo", &[1053], Some(15.1)),
    ],
};

pub static KNOWLEDGE_AREAS: Dataset = Dataset {
    id: "areas",
    category_header: "Área de Conocimiento",
    value_headers: &["N° de Estudiantes"],
    rows: &[
        row("Salud", &[1501], None),
        row("Tecnología", &[1331], None),
        row("Administración y Comercio", &[1221], None),
        row("Educación", &[653], None),
        row("Ciencias Sociales", &[531], None),
        row("Derecho", &[191], None),
        row("Agropecuaria", &[163], None),
        row("Arte y Arquitectura", &[132], None),
        row("Ciencias Básicas", &[73], None),
    ],
};

// Percentages are relative to the program count per bucket and are kept as
// published, even though they do not add up to 100.
pub static DURATION: Dataset = Dataset {
    id: "duration",
    category_header: "Duración (Semestres)",
    value_headers: &["N° de Programas"],
    rows: &[
        row("4-5 sem", &[234], Some(9.8)),
        row("6-7 sem", &[456], Some(19.1)),
        row("8-9 sem", &[789], Some(33.1)),
        row("10 sem", &[821], Some(34.4)),
        row("11-14 sem", &[367], Some(15.4)),
    ],
};

pub static COSTS: Dataset = Dataset {
    id: "costs",
    category_header: "Rango",
    value_headers: &["Frecuencia Matrícula", "Frecuencia Arancel"],
    rows: &[
        row("$0-$137k", &[312, 234], None),
        row("$137k (Moda)", &[789, 456], None),
        row("$138k-$500k", &[445, 389], None),
        row("$500k-$2.2M", &[334, 678], None),
        row("$2.2M-$3.5M", &[289, 823], None),
        row("$3.5M+", &[123, 534], None),
    ],
};

/// Every dataset, in panel order.
#[cfg(test)]
pub static ALL: [&Dataset; 8] = [
    &GENDER,
    &AGE_RANGES,
    &INSTITUTIONS,
    &MODALITY,
    &SCHEDULE,
    &KNOWLEDGE_AREAS,
    &DURATION,
    &COSTS,
];
