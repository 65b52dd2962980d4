// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Liquidation Station: desktop dashboard for liquidation agent status.

mod app;
mod config;
mod headless;
mod status;
mod transactions;
mod ui;
mod wallet;

use clap::Parser;
use eframe::egui;
use log::{error, info};

use crate::app::DashboardApp;
use crate::config::AppConfig;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Parser)]
#[command(name = "liquidation-station", version, about = "Dashboard for liquidation agent status")]
struct Args {
    /// Agent status endpoint to poll (repeatable, replaces the configured table)
    #[arg(long = "endpoint", value_name = "URL")]
    endpoints: Vec<String>,

    /// Polling interval in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Run a single fetch cycle and print the cards as JSON
    #[arg(long, conflicts_with = "watch")]
    once: bool,

    /// Poll without a window, printing one JSON line per cycle until Ctrl-C
    #[arg(long)]
    watch: bool,

    /// Print the configuration file path and exit
    #[arg(long)]
    print_config_path: bool,

    /// Write the effective configuration to disk and exit
    #[arg(long)]
    init_config: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded configuration.
    fn apply(&self, config: &mut AppConfig) {
        if !self.endpoints.is_empty() {
            config.endpoints.clone_from(&self.endpoints);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.poll_interval_ms = interval_ms;
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.print_config_path {
        match AppConfig::get_config_path() {
            Ok(path) => println!("{}", path.display()),
            Err(e) => exit_with_error(&format!("Failed to resolve config path: {e}")),
        }
        return Ok(());
    }

    let mut config = AppConfig::load_or_default();
    args.apply(&mut config);

    if args.init_config {
        if let Err(e) = config.save() {
            exit_with_error(&format!("Failed to save configuration: {e}"));
        }
        info!("Configuration written");
        return Ok(());
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => exit_with_error(&format!("Failed to start async runtime: {e}")),
    };

    if args.once || args.watch {
        let result = if args.once {
            headless::run_once(&runtime, &config)
        } else {
            headless::run_watch(&runtime, &config)
        };
        if let Err(e) = result {
            exit_with_error(&e.to_string());
        }
        return Ok(());
    }

    info!("Starting Liquidation Station with {} endpoints", config.endpoints.len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Liquidation Station"),
        ..Default::default()
    };

    let handle = runtime.handle().clone();
    eframe::run_native(
        "Liquidation Station",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, handle)))),
    )
}

fn exit_with_error(message: &str) -> ! {
    error!("{}", message);
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_endpoints_and_interval() {
        let args = Args::parse_from([
            "liquidation-station",
            "--endpoint",
            "http://agent-a:8000",
            "--endpoint",
            "http://agent-b:8000",
            "--interval-ms",
            "250",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.endpoints, vec!["http://agent-a:8000", "http://agent-b:8000"]);
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::parse_from(["liquidation-station", "--once"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert!(args.once);
        assert_eq!(config.endpoints.len(), agent_status_client::DEFAULT_ENDPOINTS.len());
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn test_once_and_watch_conflict() {
        assert!(Args::try_parse_from(["liquidation-station", "--once", "--watch"]).is_err());
    }
}
