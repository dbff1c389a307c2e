//! Console output formatter for the joke catalog

use colored::Colorize;
use jokebook_domain::{Category, JokeCatalog};

/// Formats catalog listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every joke, grouped by category in priority order
    pub fn format_catalog(catalog: &JokeCatalog) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Jokebook ({} jokes)", catalog.len())));
        output.push('\n');

        for category in Category::ALL {
            let jokes = catalog.tagged(category);
            if jokes.is_empty() {
                continue;
            }

            output.push_str(&Self::section_header(&format!(
                "{} [{}]",
                category,
                category.image_key()
            )));
            for joke in jokes {
                output.push_str(&format!(
                    "  {} {}\n",
                    joke.question(),
                    joke.answer().dimmed()
                ));
            }
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
