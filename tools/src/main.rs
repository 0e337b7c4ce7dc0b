//! churnboard: headless runner for the churn dashboard.
//!
//! Usage:
//!   churnboard --data churn.csv
//!   churnboard --page lookup --customer-id CUST00010
//!   churnboard --page detail --query "?customer_id=CUST00010"
//!   churnboard --config dashboard.json --ipc-mode

mod ipc;
mod render;

use anyhow::Result;
use churnboard_core::{
    config::DashConfig,
    detail::DetailPage,
    lookup::NavParam,
    overview::{CustomerLookupView, OverviewPage},
    table::CustomerTable,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => DashConfig::load(path)?,
        None => DashConfig::default(),
    };
    if let Some(data) = flag_value(&args, "--data") {
        config.data_path = data.to_string();
    }
    config.top_n = parse_arg(&args, "--top", config.top_n);
    config.validate()?;

    let page = flag_value(&args, "--page").unwrap_or("overview");

    // Missing file or column is fatal: nothing to show without the table.
    let table = CustomerTable::load(&config.data_path)?;

    if ipc_mode {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        return run_ipc_loop(&table, &config, stdin.lock(), &mut stdout);
    }

    let out = match page {
        "overview" => render::overview(&OverviewPage::build(&table, &config))?,
        "lookup" => {
            let input = flag_value(&args, "--customer-id").unwrap_or_default();
            render::lookup(&CustomerLookupView::build(&table, input, &config))?
        }
        "detail" => {
            let param = flag_value(&args, "--customer-id")
                .map(|id| NavParam::Single(id.to_string()))
                .or_else(|| flag_value(&args, "--query").and_then(NavParam::from_query));
            render::detail(&DetailPage::build(&table, param.as_ref(), &config))?
        }
        other => anyhow::bail!("Unknown page '{other}' (expected overview, lookup or detail)"),
    };
    print!("{out}");
    Ok(())
}

fn run_ipc_loop<R: BufRead, W: Write>(
    table: &CustomerTable,
    config: &DashConfig,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let response = match ipc::parse_command(&buffer) {
            Ok(ipc::IpcCommand::Quit) => break,
            Ok(cmd) => ipc::respond(table, config, cmd)?,
            Err(e) => {
                log::warn!("Bad IPC command: {e}");
                serde_json::json!({ "error": e.to_string() })
            }
        };
        writeln!(out, "{response}")?;
        out.flush()?;
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
