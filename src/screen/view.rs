use comfy_table::{presets, ContentArrangement, Table};
use crate::postal::model::{Pincode, PostOfficeRecord};
use crate::screen::card::render_grid;

const TITLE: &str = "Enter Pincode";
const HINT: &str = "Type a 6-digit pincode and press Enter. `/filter <text>` narrows results by name, `/quit` exits.";
pub const NO_MATCH_MESSAGE: &str = "Couldn't find the postal data you're looking for…";

/// What the screen shows right now; exactly one of these at a time.
#[derive(Debug)]
pub enum View<'a> {
    NotSearched,
    Loading,
    Error(&'a str),
    Results {
        pincode: &'a Pincode,
        message: &'a str,
        filter: &'a str,
        /// already narrowed by `filter`
        records: Vec<&'a PostOfficeRecord>,
    },
}

impl View<'_> {
    /// Render the whole screen for a terminal `columns` wide.
    pub fn render(&self, columns: u16) -> String {
        let mut out = format!("{}\n\n", TITLE);
        match self {
            View::NotSearched => {
                out.push_str(HINT);
                out.push('\n');
            }
            View::Loading => out.push_str("Looking up…\n"),
            View::Error(message) => {
                out.push_str(message);
                out.push('\n');
            }
            View::Results { pincode, message, filter, records } => {
                out.push_str(&format!("Pincode: {}\n", pincode));
                if !message.is_empty() {
                    out.push_str(&format!("Message: {}\n", message));
                }
                if !filter.is_empty() {
                    out.push_str(&format!("Filter: {}\n", filter));
                }
                out.push('\n');
                if records.is_empty() {
                    out.push_str(NO_MATCH_MESSAGE);
                    out.push('\n');
                } else {
                    out.push_str(&render_grid(records, columns));
                }
            }
        }
        out
    }
}

/// Boxed message for the blocking alert channel, wrapped to `columns`.
pub fn render_alert(message: &str, columns: u16) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_BORDERS_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(columns);
    table.add_row(vec![format!("! {}", message)]);
    format!("{}\n", table)
}
