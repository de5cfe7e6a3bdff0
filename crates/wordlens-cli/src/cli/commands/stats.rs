//! Stats command handler.

use anyhow::{Context, Result};
use comfy_table::Table;
use wordlens_core::TextStats;
use wordlens_core::config::Config;

pub fn run(text: &str, config: &Config, json: bool) -> Result<()> {
    let stats = TextStats::of(text, config.words_per_minute);

    if json {
        let out = serde_json::to_string_pretty(&stats).context("serialize stats")?;
        println!("{out}");
    } else {
        println!("{}", render_table(&stats));
    }
    Ok(())
}

/// Renders the statistics as a two-column table.
pub fn render_table(stats: &TextStats) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec!["Words".to_string(), stats.words.to_string()]);
    table.add_row(vec!["Characters".to_string(), stats.characters.to_string()]);
    table.add_row(vec![
        "Reading time".to_string(),
        format!("{} min", stats.reading_time_minutes),
    ]);
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_table_lists_every_statistic() {
        let stats = TextStats {
            words: 3,
            characters: 11,
            reading_time_minutes: 1,
        };
        let rendered = render_table(&stats);
        assert!(rendered.contains("Words"));
        assert!(rendered.contains("Characters"));
        assert!(rendered.contains("11"));
        assert!(rendered.contains("1 min"));
    }
}
