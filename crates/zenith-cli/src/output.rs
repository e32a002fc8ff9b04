use serde::Serialize;

/// Cells wider than this are cut and end in `…` (URLs, messages).
const MAX_CELL: usize = 48;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

fn clip(cell: &str) -> String {
    let flat = cell.replace(['\n', '\r'], " ");
    if flat.chars().count() <= MAX_CELL {
        return flat;
    }
    let mut out: String = flat.chars().take(MAX_CELL - 1).collect();
    out.push('…');
    out
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{cell}{}", " ".repeat(width.saturating_sub(len)))
}

pub fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "(none)\n".to_string();
    }
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|r| r.iter().map(|c| clip(c)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string() + "\n";
    let mut out = line(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, &w)| pad(h, w))
            .collect(),
    );
    out += &line(widths.iter().map(|&w| "-".repeat(w)).collect());
    for row in &rows {
        out += &line(
            row.iter()
                .zip(&widths)
                .map(|(c, &w)| pad(c, w))
                .collect(),
        );
    }
    out
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, rows));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_align_to_widest_cell() {
        let out = render_table(
            &["SLUG", "TITLE"],
            vec![
                vec!["seo".into(), "Search".into()],
                vec!["web-development".into(), "Web".into()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "SLUG             TITLE");
        assert_eq!(lines[1], "---------------  ------");
        assert_eq!(lines[3], "web-development  Web");
    }

    #[test]
    fn long_cells_are_clipped() {
        let long = "x".repeat(100);
        let out = render_table(&["URL"], vec![vec![long]]);
        let row = out.lines().nth(2).unwrap();
        assert_eq!(row.chars().count(), MAX_CELL);
        assert!(row.ends_with('…'));
    }

    #[test]
    fn empty_table_says_none() {
        assert_eq!(render_table(&["ID"], vec![]), "(none)\n");
    }
}
