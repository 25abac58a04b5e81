use comfy_table::{presets, ContentArrangement, Table};
use crate::postal::model::PostOfficeRecord;

/// terminals at least this wide get two cards per row
pub const WIDE_COLUMNS: u16 = 100;
/// cards never grow past what this width allows
const MAX_COLUMNS: u16 = 120;
const MIN_COLUMNS: u16 = 24;

/// The five displayed fields of one post office
#[derive(Debug, Clone, Copy)]
pub struct ResultCard<'a> {
    pub name: &'a str,
    pub branch_type: &'a str,
    pub delivery_status: &'a str,
    pub district: &'a str,
    pub division: &'a str,
}

impl<'a> From<&'a PostOfficeRecord> for ResultCard<'a> {
    fn from(record: &'a PostOfficeRecord) -> Self {
        Self {
            name: &record.name,
            branch_type: &record.branch_type,
            delivery_status: &record.delivery_status,
            district: &record.district,
            division: &record.division,
        }
    }
}

impl ResultCard<'_> {
    /// labelled lines, an empty field still gets its label
    pub fn lines(&self) -> [String; 5] {
        [
            ("Name", self.name),
            ("Branch Type", self.branch_type),
            ("Delivery Status", self.delivery_status),
            ("District", self.district),
            ("Division", self.division),
        ]
            .map(|(label, value)| format!("{}: {}", label, value))
    }

    fn cell_text(&self) -> String {
        self.lines().join("\n")
    }
}

/// Lay cards out in a boxed grid exactly `columns` wide (capped), two per
/// row on wide terminals and one otherwise. Overlong values wrap inside
/// their card.
pub fn render_grid(records: &[&PostOfficeRecord], columns: u16) -> String {
    let per_row = grid_columns(columns);
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(columns.clamp(MIN_COLUMNS, MAX_COLUMNS));

    for row in records.chunks(per_row) {
        let mut cells: Vec<String> = row.iter()
            .map(|record| ResultCard::from(*record).cell_text())
            .collect();
        // keep the last row aligned when the count is odd
        cells.resize(per_row, String::new());
        table.add_row(cells);
    }
    format!("{}\n", table)
}

pub fn grid_columns(columns: u16) -> usize {
    if columns >= WIDE_COLUMNS { 2 } else { 1 }
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;
    use super::*;

    fn record(name: &str) -> PostOfficeRecord {
        PostOfficeRecord {
            name: name.to_string(),
            branch_type: "Head Post Office".to_string(),
            delivery_status: "Delivery".to_string(),
            district: "Central Delhi".to_string(),
            division: "New Delhi GPO".to_string(),
            region: "Delhi".to_string(),
            state: "Delhi".to_string(),
            country: "India".to_string(),
        }
    }

    fn widths(grid: &str) -> Vec<usize> {
        grid.lines().map(|line| line.width()).collect()
    }

    #[test]
    fn card_shows_the_five_labelled_fields_only() {
        let r = record("New Delhi G.P.O.");
        let lines = ResultCard::from(&r).lines();

        assert_eq!(lines, [
            "Name: New Delhi G.P.O.",
            "Branch Type: Head Post Office",
            "Delivery Status: Delivery",
            "District: Central Delhi",
            "Division: New Delhi GPO",
        ]);
        assert!(!render_grid(&[&r], 80).contains("India"));
    }

    #[test]
    fn absent_fields_render_empty() {
        let r = PostOfficeRecord { name: "Solo".to_string(), ..Default::default() };
        let lines = ResultCard::from(&r).lines();
        assert_eq!(lines[3], "District: ");
    }

    #[test]
    fn wide_characters_keep_the_border_aligned() {
        let r = record("東京中央郵便局");
        let grid = render_grid(&[&r], 30);

        assert!(grid.contains("東京中央郵便局"));
        assert!(widths(&grid).iter().all(|w| *w == 30), "{:?}", widths(&grid));
    }

    #[test]
    fn long_values_wrap_inside_the_card() {
        let r = record(&"x".repeat(100));
        let grid = render_grid(&[&r], 40);

        assert!(widths(&grid).iter().all(|w| *w == 40), "{:?}", widths(&grid));
        let xs: usize = grid.lines().map(|line| line.matches('x').count()).sum();
        assert_eq!(xs, 100);
    }

    #[test]
    fn grid_is_two_wide_only_on_wide_terminals() {
        let (a, b) = (record("A"), record("B"));
        let records = [&a, &b];

        let narrow = render_grid(&records, 80);
        let wide = render_grid(&records, 120);

        assert!(wide.lines().any(|line| line.contains("Name: A") && line.contains("Name: B")));
        assert!(!narrow.lines().any(|line| line.contains("Name: A") && line.contains("Name: B")));
        assert_eq!(narrow.matches("Name: ").count(), 2);
        assert!(widths(&wide).iter().all(|w| *w == 120));
    }

    #[test]
    fn odd_count_leaves_last_row_half_full() {
        let (a, b, c) = (record("A"), record("B"), record("C"));
        let grid = render_grid(&[&a, &b, &c], 100);

        assert_eq!(grid.matches("Name: ").count(), 3);
        let widths = widths(&grid);
        assert!(widths.iter().all(|w| *w == widths[0]));
        assert_eq!(grid_columns(99), 1);
        assert_eq!(grid_columns(100), 2);
    }
}
