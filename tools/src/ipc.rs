//! Line-delimited JSON protocol for driving the dashboard from a UI process.
//!
//! Each request is re-evaluated against the already-loaded table.

use anyhow::Result;
use churnboard_core::{
    config::DashConfig,
    detail::DetailPage,
    lookup::NavParam,
    overview::{CustomerLookupView, OverviewPage},
    table::CustomerTable,
};

#[derive(Debug, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IpcCommand {
    Overview,
    Lookup {
        #[serde(default)]
        customer_id: String,
    },
    Detail {
        #[serde(default)]
        customer_id: Option<NavParam>,
    },
    Quit,
}

pub fn parse_command(line: &str) -> serde_json::Result<IpcCommand> {
    serde_json::from_str(line.trim())
}

pub fn respond(table: &CustomerTable, config: &DashConfig, cmd: IpcCommand) -> Result<serde_json::Value> {
    let value = match cmd {
        IpcCommand::Overview => serde_json::to_value(OverviewPage::build(table, config))?,
        IpcCommand::Lookup { customer_id } => {
            serde_json::to_value(CustomerLookupView::build(table, &customer_id, config))?
        }
        IpcCommand::Detail { customer_id } => {
            serde_json::to_value(DetailPage::build(table, customer_id.as_ref(), config))?
        }
        IpcCommand::Quit => serde_json::Value::Null,
    };
    Ok(value)
}
