//! Probability table rendering.

use fairdice_core::{Die, ProbabilityMatrix};

/// Render `matrix` as a bordered grid.
///
/// Rows are the user's die, columns the opponent's die, and each cell is the
/// chance the row die rolls strictly higher.
pub fn render(dice: &[Die], matrix: &ProbabilityMatrix) -> String {
    let header: Vec<String> = std::iter::once("User die \\ Opponent".to_string())
        .chain(dice.iter().map(Die::to_string))
        .collect();

    let rows: Vec<Vec<String>> = dice
        .iter()
        .enumerate()
        .map(|(i, die)| {
            std::iter::once(die.to_string())
                .chain((0..dice.len()).map(|j| match matrix.get(i, j) {
                    Some(p) => p.to_string(),
                    None => "-".to_string(),
                }))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|c| {
            rows.iter()
                .map(|r| r[c].len())
                .chain(std::iter::once(header[c].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: &[String]| {
        format!(
            "|{}|",
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!(" {:<w$} ", cell, w = *w))
                .collect::<Vec<_>>()
                .join("|")
        )
    };

    let mut out = vec![border.clone(), line(&header), border.replace('-', "=")];
    for row in &rows {
        out.push(line(row));
        out.push(border.clone());
    }
    out.join("\n")
}
