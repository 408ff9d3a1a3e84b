use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::table::Table;

/// Display style options for list output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DisplayStyle {
    /// Display data in a formatted table
    Table,
    /// Display data in JSON format
    Json,
    /// Display data in CSV format
    Csv,
}

/// Trait for types that can be displayed in the terminal as rows.
pub trait TerminalDisplay {
    /// Returns the column titles.
    fn titles() -> Vec<&'static str>;
    /// Converts the instance into a row of strings.
    fn row(self) -> Vec<String>;
}

pub fn pretty_json<T: Serialize>(o: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&o)?);
    Ok(())
}

pub fn display_list<T>(items: Vec<T>, style: DisplayStyle, headless: bool) -> Result<()>
where
    T: Serialize + TerminalDisplay,
{
    match style {
        DisplayStyle::Table => {
            if items.is_empty() {
                println!("<empty list>");
                return Ok(());
            }
            let titles = T::titles().iter().map(|s| s.to_string()).collect();
            let mut table = Table::new(titles, headless);
            for item in items {
                table.add(item.row());
            }
            table.show();
        }
        DisplayStyle::Csv => {
            if !headless {
                println!("{}", T::titles().join(","));
            }
            for item in items {
                println!("{}", item.row().join(","));
            }
        }
        DisplayStyle::Json => {
            let json = serde_json::to_string_pretty(&items)?;
            println!("{json}");
        }
    }
    Ok(())
}
