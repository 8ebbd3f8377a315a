//! The fixed deck: intro screen and the ordered panel catalog.
//!
//! Every panel points at its datasets in [`crate::data::tables`]; the
//! renderer draws whatever the catalog describes and holds no content of its
//! own.

use crate::data::tables;
use crate::data::Dataset;
use crate::navigator::{NavigationState, PANEL_COUNT, SUMMARY_PAGES};
use crate::theme::Accent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    /// Vertical bars, one per category.
    Column,
    /// Horizontal bars, one per category.
    Bar,
    /// Vertical bars, one group per category and one bar per series.
    GroupedColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// Chart palette, starting `offset` colors in.
    Categories { offset: usize },
    Gender,
}

#[derive(Debug)]
pub struct Chart {
    pub title: Option<&'static str>,
    pub kind: ChartKind,
    pub dataset: &'static Dataset,
    pub palette: Palette,
}

#[derive(Debug)]
pub struct StatCard {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: &'static str,
    pub sublabel: Option<&'static str>,
    pub accent: Accent,
}

#[derive(Debug)]
pub struct Insight {
    pub title: &'static str,
    pub accent: Accent,
    pub lines: &'static [&'static str],
}

/// "Análisis Descriptivo de la Variable" block: classification and frequency
/// table for one variable.
#[derive(Debug)]
pub struct Analysis {
    pub variable: &'static str,
    pub dataset: &'static Dataset,
    pub accent: Accent,
}

#[derive(Debug)]
pub struct Content {
    pub charts: &'static [Chart],
    pub cards: &'static [StatCard],
    pub insight: Insight,
    pub analyses: &'static [Analysis],
}

#[derive(Debug)]
pub struct SummaryPage {
    pub heading: &'static str,
    pub hint: &'static str,
    pub section: &'static str,
    pub cards: &'static [StatCard],
    pub insight: Insight,
}

#[derive(Debug)]
pub enum PanelBody {
    Content(Content),
    Summary([SummaryPage; SUMMARY_PAGES as usize]),
}

#[derive(Debug)]
pub struct Panel {
    pub label: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub body: PanelBody,
}

impl Panel {
    pub fn page_count(&self) -> usize {
        match &self.body {
            PanelBody::Content(_) => 1,
            PanelBody::Summary(pages) => pages.len(),
        }
    }

    /// Datasets shown on this panel, in drawing order, without repeats.
    pub fn datasets(&self) -> Vec<&'static Dataset> {
        let mut out: Vec<&'static Dataset> = Vec::new();
        if let PanelBody::Content(content) = &self.body {
            let from_charts = content.charts.iter().map(|c| c.dataset);
            let from_analyses = content.analyses.iter().map(|a| a.dataset);
            for dataset in from_charts.chain(from_analyses) {
                if !out.iter().any(|d| d.id == dataset.id) {
                    out.push(dataset);
                }
            }
        }
        out
    }
}

pub struct Intro {
    pub title: &'static str,
    pub region: &'static str,
    pub year: &'static str,
    pub headline: &'static str,
    pub members_heading: &'static str,
    pub members: &'static [&'static str],
    pub hint: &'static str,
    pub button: &'static str,
}

pub static INTRO: Intro = Intro {
    title: "Estadísticas de Educación Superior",
    region: "Región de Magallanes y Antártica Chilena",
    year: "Año 2021",
    headline: "5,796 estudiantes",
    members_heading: "Integrantes",
    members: &["Cristian Velasquez", "Ignacio Farias", "Julio Silva"],
    hint: "Presiona \u{2192} o Espacio para comenzar",
    button: "Comenzar Presentación \u{2192}",
};

const fn card(
    icon: &'static str,
    label: &'static str,
    value: &'static str,
    sublabel: Option<&'static str>,
    accent: Accent,
) -> StatCard {
    StatCard {
        icon,
        label,
        value,
        sublabel,
        accent,
    }
}

const fn chart(kind: ChartKind, dataset: &'static Dataset) -> Chart {
    Chart {
        title: None,
        kind,
        dataset,
        palette: Palette::Categories { offset: 0 },
    }
}

pub static PANELS: [Panel; PANEL_COUNT] = [
    Panel {
        label: "Género",
        icon: "👥",
        title: "Distribución por Género",
        body: PanelBody::Content(Content {
            charts: &[Chart {
                title: None,
                kind: ChartKind::Pie,
                dataset: &tables::GENDER,
                palette: Palette::Gender,
            }],
            cards: &[
                card("👩", "Mujeres", "3.265", Some("56.33% del total"), Accent::Pink),
                card("👨", "Hombres", "2.531", Some("43.67% del total"), Accent::Blue),
            ],
            insight: Insight {
                title: "Análisis de Género",
                accent: Accent::Purple,
                lines: &[
                    "Hay una mayor proporción de mujeres (56.33%) que de hombres (43.67%) en la educación superior de la región.",
                    "Esta tendencia refleja una feminización creciente en la matrícula de educación superior a nivel nacional.",
                ],
            },
            analyses: &[Analysis {
                variable: "Género",
                dataset: &tables::GENDER,
                accent: Accent::Pink,
            }],
        }),
    },
    Panel {
        label: "Edad",
        icon: "🎂",
        title: "Rango de Edad",
        body: PanelBody::Content(Content {
            charts: &[chart(ChartKind::Column, &tables::AGE_RANGES)],
            cards: &[
                card("📊", "Promedio", "24.42 años", None, Accent::Blue),
                card("📍", "Mediana", "22 años", None, Accent::Purple),
                card("🎯", "Moda", "19 años", None, Accent::Green),
                card("📏", "Desv. Estándar", "6.38 años", None, Accent::Orange),
            ],
            insight: Insight {
                title: "Análisis Etario",
                accent: Accent::Blue,
                lines: &[
                    "El grupo de 20 a 24 años es el más numeroso, constituyendo el núcleo del estudiantado.",
                    "La moda de 19 años indica un fuerte ingreso directo desde la educación secundaria.",
                    "La desviación estándar de 6.38 años muestra una dispersión moderada pero significativa de las edades.",
                ],
            },
            analyses: &[Analysis {
                variable: "Rango de Edad",
                dataset: &tables::AGE_RANGES,
                accent: Accent::Blue,
            }],
        }),
    },
    Panel {
        label: "Instituciones",
        icon: "🏛",
        title: "Tipo de Institución",
        body: PanelBody::Content(Content {
            charts: &[chart(ChartKind::Bar, &tables::INSTITUTIONS)],
            cards: &[],
            insight: Insight {
                title: "Análisis Institucional",
                accent: Accent::Indigo,
                lines: &[
                    "Las Universidades del CRUCH dominan la matrícula regional, siendo la opción preferida.",
                    "Los Centros de Formación Técnica y los Institutos Profesionales juntos forman un bloque importante de educación técnico-profesional.",
                    "La presencia de Universidades Privadas es minoritaria en la región.",
                ],
            },
            analyses: &[Analysis {
                variable: "Tipo de Institución",
                dataset: &tables::INSTITUTIONS,
                accent: Accent::Indigo,
            }],
        }),
    },
    Panel {
        label: "Modalidad",
        icon: "💻",
        title: "Modalidad y Jornada",
        body: PanelBody::Content(Content {
            charts: &[
                Chart {
                    title: Some("Modalidad de Estudio"),
                    kind: ChartKind::Pie,
                    dataset: &tables::MODALITY,
                    palette: Palette::Categories { offset: 0 },
                },
                Chart {
                    title: Some("Jornada"),
                    kind: ChartKind::Column,
                    dataset: &tables::SCHEDULE,
                    palette: Palette::Categories { offset: 2 },
                },
            ],
            cards: &[
                card("🏫", "Presencial", "5.821", Some("97.2% del total"), Accent::Blue),
                card("☀", "Diurno", "4.245", Some("60.9% del total"), Accent::Orange),
                card("🌙", "Vespertino", "1.689", Some("24.2% del total"), Accent::Purple),
            ],
            insight: Insight {
                title: "Análisis Modalidad y Jornada",
                accent: Accent::Green,
                lines: &[
                    "La modalidad presencial es abrumadoramente dominante (97.2%), mostrando una clara preferencia regional.",
                    "La jornada diurna es la más común, pero las jornadas vespertina y ejecutiva combinadas representan un segmento significativo (39.1%), probablemente estudiantes que trabajan.",
                ],
            },
            analyses: &[
                Analysis {
                    variable: "Modalidad de Estudio",
                    dataset: &tables::MODALITY,
                    accent: Accent::Green,
                },
                Analysis {
                    variable: "Jornada",
                    dataset: &tables::SCHEDULE,
                    accent: Accent::Orange,
                },
            ],
        }),
    },
    Panel {
        label: "Áreas",
        icon: "📚",
        title: "Áreas de Conocimiento",
        body: PanelBody::Content(Content {
            charts: &[chart(ChartKind::Column, &tables::KNOWLEDGE_AREAS)],
            cards: &[],
            insight: Insight {
                title: "Análisis por Áreas",
                accent: Accent::Purple,
                lines: &[
                    "Salud, Tecnología y Administración y Comercio son las tres áreas dominantes, concentrando la mayoría de los estudiantes.",
                    "Esto refleja las probables necesidades del mercado laboral y las vocaciones principales de la región.",
                ],
            },
            analyses: &[Analysis {
                variable: "Área de Conocimiento",
                dataset: &tables::KNOWLEDGE_AREAS,
                accent: Accent::Purple,
            }],
        }),
    },
    Panel {
        label: "Duración",
        icon: "⏱",
        title: "Duración de Carreras",
        body: PanelBody::Content(Content {
            charts: &[chart(ChartKind::Column, &tables::DURATION)],
            cards: &[],
            insight: Insight {
                title: "Análisis de Duración",
                accent: Accent::Indigo,
                lines: &[
                    "Las carreras de 10 semestres (5 años) son las más frecuentes, lo que indica un predominio de carreras profesionales universitarias.",
                    "Existe una oferta diversificada, con una cantidad importante de programas técnicos de menor duración (4-5 semestres).",
                ],
            },
            analyses: &[Analysis {
                variable: "Duración de Carreras",
                dataset: &tables::DURATION,
                accent: Accent::Pink,
            }],
        }),
    },
    Panel {
        label: "Costos",
        icon: "💰",
        title: "Costos",
        body: PanelBody::Content(Content {
            charts: &[chart(ChartKind::GroupedColumn, &tables::COSTS)],
            cards: &[],
            insight: Insight {
                title: "Análisis de Costos",
                accent: Accent::Orange,
                lines: &[
                    "El rango de aranceles es muy amplio, lo que refleja la diversidad de la oferta educativa, desde carreras técnicas más económicas hasta programas universitarios de mayor costo.",
                    "La moda del arancel es significativamente más alta que la mediana, lo que sugiere que un gran número de estudiantes está matriculado en las carreras de mayor valor.",
                ],
            },
            analyses: &[Analysis {
                variable: "Rango de Costos",
                dataset: &tables::COSTS,
                accent: Accent::Blue,
            }],
        }),
    },
    Panel {
        label: "Resumen",
        icon: "📊",
        title: "Resumen",
        body: PanelBody::Summary([
            SummaryPage {
                heading: "Medidas de Tendencia Central",
                hint: "Página 1 de 2 - Presiona \u{2192} para continuar",
                section: "📈 Estadísticas Centrales",
                cards: &[
                    card("🎂", "Edad Promedio", "24.42 años", Some("Mediana: 22 | Moda: 19"), Accent::Blue),
                    card("⏱", "Duración Carrera", "7.86 sem.", Some("Mediana: 8 | Moda: 10"), Accent::Purple),
                    card("💳", "Matrícula Promedio", "$145,774", Some("Mediana: $137.000 | Moda: $137.000"), Accent::Green),
                    card("💰", "Arancel Promedio", "$2.693.403", Some("Mediana: $2.234.000 | Moda: $3.555.000"), Accent::Orange),
                ],
                insight: Insight {
                    title: "Interpretación - Tendencia Central",
                    accent: Accent::Blue,
                    lines: &[
                        "La edad más frecuente es 19 años (recién egresados), pero la media de 24.42 indica presencia significativa de estudiantes mayores.",
                        "Las carreras de 10 semestres (5 años) son las más comunes, aunque la media de 7.86 sugiere presencia importante de carreras técnicas cortas.",
                        "El arancel modal ($3.555.000) es superior a la media ($2.693.403), sugiriendo concentración en programas de mayor costo.",
                    ],
                },
            },
            SummaryPage {
                heading: "Medidas de Dispersión",
                hint: "Página 2 de 2 - Presiona \u{2190} para volver",
                section: "📊 Variabilidad de Datos",
                cards: &[
                    card("📏", "Rango Edad", "40 años", Some("Desv. Estándar: 6.38 | CV: 26.14%"), Accent::Pink),
                    card("📐", "Rango Duración", "13 sem.", Some("Desv. Estándar: 3.1 | CV: 39.48%"), Accent::Indigo),
                    card("📊", "Rango Matrícula", "$290.000", Some("Desv. Estándar: $50.895 | CV: 34.91%"), Accent::Purple),
                    card("📈", "Rango Arancel", "$5.011.000", Some("Desv. Estándar: $1.070.871 | CV: 39.76%"), Accent::Orange),
                ],
                insight: Insight {
                    title: "Interpretación - Dispersión",
                    accent: Accent::Orange,
                    lines: &[
                        "Alta variabilidad en costos (Coeficiente de Variación ~35-40%), indicando gran diversidad de programas.",
                        "La duración muestra alta dispersión (CV 39.48%): desde técnicos cortos hasta carreras universitarias largas.",
                        "Desviación estándar del arancel superior a $1.000.000 indica gran dispersión en precios.",
                    ],
                },
            },
        ]),
    },
];

/// Panel shown for `state`, `None` on the intro screen.
pub fn panel_for(state: NavigationState) -> Option<&'static Panel> {
    state.panel_index().map(|i| &PANELS[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::classification;
    use crate::navigator::SUMMARY_INDEX;

    #[test]
    fn test_only_summary_is_paged() {
        for (i, panel) in PANELS.iter().enumerate() {
            if i == SUMMARY_INDEX {
                assert_eq!(panel.page_count(), SUMMARY_PAGES as usize);
                assert!(matches!(panel.body, PanelBody::Summary(_)));
            } else {
                assert_eq!(panel.page_count(), 1, "{}", panel.label);
            }
        }
    }

    #[test]
    fn test_every_analysis_variable_is_classified() {
        for panel in &PANELS {
            if let PanelBody::Content(content) = &panel.body {
                for analysis in content.analyses {
                    assert!(
                        classification::classify(analysis.variable).is_some(),
                        "{} is not classified",
                        analysis.variable
                    );
                }
            }
        }
    }

    #[test]
    fn test_content_panels_have_a_chart() {
        for panel in PANELS.iter().take(SUMMARY_INDEX) {
            assert!(!panel.datasets().is_empty(), "{}", panel.label);
        }
        assert!(PANELS[SUMMARY_INDEX].datasets().is_empty());
    }

    #[test]
    fn test_modality_panel_lists_both_datasets_once() {
        let ids: Vec<_> = PANELS[3].datasets().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec!["modality", "schedule"]);
    }

    #[test]
    fn test_panel_for_state() {
        assert!(panel_for(NavigationState::INITIAL).is_none());
        let summary = NavigationState::at(7, 1).unwrap();
        assert_eq!(panel_for(summary).unwrap().label, "Resumen");
        let gender = NavigationState::panel(0).unwrap();
        assert_eq!(panel_for(gender).unwrap().label, "Género");
    }

    #[test]
    fn test_grouped_charts_have_multiple_series() {
        for panel in &PANELS {
            if let PanelBody::Content(content) = &panel.body {
                for chart in content.charts {
                    let multi = chart.dataset.series_count() > 1;
                    assert_eq!(multi, chart.kind == ChartKind::GroupedColumn, "{}", chart.dataset.id);
                }
            }
        }
    }
}
