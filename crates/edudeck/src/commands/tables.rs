use colored::Colorize;
use serde::Serialize;

use crate::catalog::{PANELS, Panel, PanelBody};
use crate::data::{Dataset, TOTAL_STUDENTS, format_count};
use crate::data::classification;
use crate::navigator::PANEL_COUNT;

#[derive(Serialize)]
struct PanelTables {
    panel: usize,
    label: &'static str,
    title: &'static str,
    tables: Vec<Table>,
}

#[derive(Serialize)]
struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    variable: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    classification: Option<String>,
    headers: Vec<&'static str>,
    #[serde(flatten)]
    dataset: &'static Dataset,
}

/// Print the frequency tables of one panel (1-indexed) or of every panel.
pub fn run(panel: Option<usize>, json: bool) -> anyhow::Result<()> {
    let selected: Vec<(usize, &'static Panel)> = match panel {
        Some(n) if (1..=PANEL_COUNT).contains(&n) => vec![(n, &PANELS[n - 1])],
        Some(n) => anyhow::bail!("Invalid panel: {n}. Must be between 1 and {PANEL_COUNT}."),
        None => PANELS.iter().enumerate().map(|(i, p)| (i + 1, p)).collect(),
    };

    let panels: Vec<PanelTables> = selected
        .into_iter()
        .map(|(number, panel)| panel_tables(number, panel))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&panels)?);
        return Ok(());
    }

    println!(
        "{} {}\n",
        "Educación Superior · Magallanes 2021".bold(),
        format!("({} estudiantes)", format_count(TOTAL_STUDENTS)).dimmed()
    );
    for panel in &panels {
        print_panel(panel);
    }
    Ok(())
}

fn panel_tables(number: usize, panel: &'static Panel) -> PanelTables {
    let analyses = match &panel.body {
        PanelBody::Content(content) => content.analyses,
        PanelBody::Summary(_) => &[],
    };
    let tables = panel
        .datasets()
        .into_iter()
        .map(|dataset| {
            let variable = analyses
                .iter()
                .find(|a| a.dataset.id == dataset.id)
                .map(|a| a.variable);
            let classification = variable.and_then(classification::classify).map(|v| {
                format!("{} {}", v.kind.display_name(), v.scale.display_name())
            });
            Table {
                variable,
                classification,
                headers: dataset.headers(),
                dataset,
            }
        })
        .collect();

    PanelTables {
        panel: number,
        label: panel.label,
        title: panel.title,
        tables,
    }
}

fn print_panel(panel: &PanelTables) {
    println!(
        "{} {}",
        format!("[{}]", panel.panel).dimmed(),
        panel.title.bold()
    );
    if panel.tables.is_empty() {
        println!("  {}", "(no frequency tables)".dimmed());
        println!();
        return;
    }

    for table in &panel.tables {
        if let Some(variable) = table.variable {
            match &table.classification {
                Some(class) => println!("  {} {}", variable.cyan(), format!("({class})").dimmed()),
                None => println!("  {}", variable.cyan()),
            }
        }
        let rows: Vec<Vec<String>> = table
            .dataset
            .rows
            .iter()
            .map(|row| table.dataset.cells(row))
            .collect();
        let widths = column_widths(&table.headers, &rows);

        let header = table
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{h:<w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", header.bold());
        for row in &rows {
            let line = row
                .iter()
                .enumerate()
                .map(|(i, cell)| {
                    let w = widths[i];
                    if i == 0 {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            println!("  {line}");
        }
        println!();
    }
}

/// Widest cell per column, counted in chars.
fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}
