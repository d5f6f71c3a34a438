//! Implementation of the `euphoria schema` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{list_table, output, CommandOutput};
use crate::cli::Cli;
use crate::infrastructure::config::{EnvValue, SchemaEntry, SCHEMA};

#[derive(Debug, Serialize)]
pub struct SchemaOutput {
    pub variables: Vec<SchemaRow>,
}

#[derive(Debug, Serialize)]
pub struct SchemaRow {
    pub name: &'static str,
    pub kind: &'static str,
    pub required: bool,
    pub default: Option<String>,
    pub description: &'static str,
}

impl From<&SchemaEntry> for SchemaRow {
    fn from(entry: &SchemaEntry) -> Self {
        Self {
            name: entry.name,
            kind: entry.kind.as_str(),
            required: entry.is_required(),
            default: entry.default.map(|d| EnvValue::from(d).to_string()),
            description: entry.description,
        }
    }
}

impl CommandOutput for SchemaOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["variable", "kind", "default", "description"]);
        for row in &self.variables {
            let default = row
                .default
                .clone()
                .unwrap_or_else(|| "required".to_string());
            table.add_row(vec![
                row.name.to_string(),
                row.kind.to_string(),
                default,
                row.description.to_string(),
            ]);
        }
        format!("{} variables:\n{table}", self.variables.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(cli: &Cli) -> Result<()> {
    let report = SchemaOutput {
        variables: SCHEMA.iter().map(SchemaRow::from).collect(),
    };
    output(&report, cli.json);
    Ok(())
}
