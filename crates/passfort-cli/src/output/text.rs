//! Text and table output.

use passfort_core::storage::EntrySummary;
use passfort_core::strength::{Feedback, SecurityLevel, StrengthReport};
use passfort_core::DecryptedEntry;

use crate::ui::theme::{strength_style, styled};
use crate::ui::{badge, details, print, table, Badge, UiContext};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Print entry summaries as a table.
pub fn print_entry_list(ctx: &UiContext, summaries: &[EntrySummary], quiet: bool) {
    if summaries.is_empty() {
        if !quiet {
            print(ctx, "No entries found.");
        }
        return;
    }

    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.site.clone(),
                s.username.clone().unwrap_or_default(),
                if s.has_notes { "yes" } else { "" }.to_string(),
                s.created_at.format(DATE_FORMAT).to_string(),
            ]
        })
        .collect();
    print(
        ctx,
        &table(ctx, &["ID", "Site", "Username", "Notes", "Created"], &rows),
    );
}

/// Print one decrypted entry.
pub fn print_entry(ctx: &UiContext, entry: &DecryptedEntry) {
    let mut items = vec![
        ("ID", entry.id.to_string()),
        ("Site", entry.site.clone()),
        ("Username", entry.username.clone().unwrap_or_default()),
        ("Password", entry.password.to_string()),
    ];
    if let Some(notes) = &entry.notes {
        items.push(("Notes", notes.to_string()));
    }
    items.push((
        "Created",
        entry.created_at.format(DATE_FORMAT).to_string(),
    ));
    print(ctx, &details(ctx, &items));
}

/// Print a strength report.
pub fn print_strength(ctx: &UiContext, report: &StrengthReport) {
    let level = styled(report.level.label(), strength_style(report.level), ctx.color);
    let mut items = vec![
        ("Strength", format!("{} ({:.1}/4)", level, report.score)),
        ("Entropy", format!("{:.1} bits", report.entropy_bits)),
        ("Length", report.length.to_string()),
    ];
    if let Some(security) = SecurityLevel::for_length(report.length) {
        items.push(("Security level", security.label().to_string()));
    }
    print(ctx, &details(ctx, &items));

    for pattern in &report.patterns {
        print(ctx, &badge(ctx, Badge::Warn, &pattern.to_string()));
    }
    for item in &report.feedback {
        let line = match item {
            Feedback::Good(message) => badge(ctx, Badge::Ok, message),
            Feedback::Warning(message) => badge(ctx, Badge::Warn, message),
        };
        print(ctx, &line);
    }
}
