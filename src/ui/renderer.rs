//! Plain-text rendering of the view models.
//!
//! ```text
//! ListController → compute_viewmodel → ListViewModel → render_list → String
//! ```
//!
//! Output is line-oriented so it works in any terminal or log. Markers per row:
//! `*` favorite, `~` favorite change in flight, `x` delete in flight.

use crate::ui::viewmodel::{DetailViewModel, FavoritesViewModel, ListViewModel, ReportRow};
use std::fmt::Write;

const ID_WIDTH: usize = 5;
const TITLE_WIDTH: usize = 36;
const CATEGORY_WIDTH: usize = 14;

/// Renders the full list screen.
#[must_use]
pub fn render_list(vm: &ListViewModel) -> String {
    let mut out = String::new();

    let category = vm.search_bar.category.map_or("all", |c| c.label());
    let _ = writeln!(
        out,
        "Search: \"{}\"  Category: {}{}",
        vm.search_bar.title_query,
        category,
        if vm.is_loading { "  (loading…)" } else { "" }
    );

    if let Some(error) = &vm.error {
        let _ = writeln!(out, "! {error}");
    }

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out, "{}", empty.message);
        let _ = writeln!(out, "  {}", empty.subtitle);
        return out;
    }

    let _ = writeln!(
        out,
        "   {:>ID_WIDTH$}  {:<TITLE_WIDTH$}  {:<CATEGORY_WIDTH$}  DATE",
        "ID", "TITLE", "TYPE"
    );
    for row in &vm.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Renders one row, markers first.
#[must_use]
pub fn render_row(row: &ReportRow) -> String {
    let favorite = match (row.favorite_busy, row.is_favorite) {
        (true, _) => '~',
        (false, true) => '*',
        (false, false) => ' ',
    };
    let deleting = if row.delete_busy { 'x' } else { ' ' };

    format!(
        "{favorite}{deleting} {:>ID_WIDTH$}  {:<TITLE_WIDTH$}  {:<CATEGORY_WIDTH$}  {}",
        row.id,
        truncate(&row.title, TITLE_WIDTH),
        row.category.label(),
        row.observed_on
    )
}

/// Renders the favorites page.
#[must_use]
pub fn render_favorites(vm: &FavoritesViewModel) -> String {
    let mut out = String::new();

    if vm.rows.is_empty() {
        out.push_str("No favorites yet.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{} favorite(s){}",
        vm.rows.len(),
        if vm.clearing { "  (clearing…)" } else { "" }
    );
    for row in &vm.rows {
        let busy = if row.busy { '~' } else { '*' };
        let _ = writeln!(
            out,
            "{busy}  {:>ID_WIDTH$}  {:<TITLE_WIDTH$}  {:<CATEGORY_WIDTH$}  {}",
            row.id,
            truncate(&row.title, TITLE_WIDTH),
            row.category.label(),
            row.observed_on
        );
    }
    out
}

/// Renders the detail view of one report.
#[must_use]
pub fn render_detail(vm: &DetailViewModel) -> String {
    let mut out = String::new();

    if vm.is_loading {
        let _ = writeln!(out, "Loading report {}…", vm.report_id);
        return out;
    }
    let Some(report) = &vm.report else {
        let _ = writeln!(out, "! {}", vm.error.as_deref().unwrap_or("Report not found"));
        return out;
    };

    let mut flags = Vec::new();
    if vm.favorite_busy {
        flags.push("updating favorite");
    } else if vm.is_favorite {
        flags.push("favorite");
    }
    if vm.delete_busy {
        flags.push("deleting");
    }

    let _ = writeln!(out, "#{}  {}", report.id, report.title);
    if !flags.is_empty() {
        let _ = writeln!(out, "   [{}]", flags.join(", "));
    }
    let _ = writeln!(out, "   Type:     {}", report.category.label());
    let _ = writeln!(out, "   Observed: {}", report.observed_at.format("%A %-d %B %Y"));
    if !report.location.is_empty() {
        let _ = writeln!(
            out,
            "   Location: {} ({:.4}, {:.4})",
            report.location, report.coordinates.latitude, report.coordinates.longitude
        );
    }
    let reporter = report.creator.full_name();
    if !reporter.is_empty() {
        let _ = writeln!(out, "   Reporter: {reporter}");
    }
    if let Some(photo) = &report.photo_ref {
        let _ = writeln!(out, "   Photo:    {photo}");
    }
    if !report.description.is_empty() {
        let _ = writeln!(out, "\n   {}", report.description);
    }
    out
}

/// Shortens `text` to `width` characters, ending in `…` when cut.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
