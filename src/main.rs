// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pythia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pythia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pythia CLI entrypoint.
//!
//! Runs the interactive TUI against a remote ambiguity-analysis service.
//! The base URL comes from `--base-url`/positional argument, then
//! `PYTHIA_BASE_URL`, then the default. `--demo` runs against a built-in
//! offline stand-in instead.
//!
//! Set `PYTHIA_LOG=<file>` to append tracing output to that file (`RUST_LOG`
//! controls the filter; a TUI owns the terminal, so there is no stderr
//! logging).

use std::error::Error;

use pythia::client::{AnalysisService, DEFAULT_BASE_URL};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<base-url>] [--base-url <url>]\n  {program} --demo\n\nThe service base URL defaults to `{DEFAULT_BASE_URL}` and can also be set via\nthe PYTHIA_BASE_URL environment variable.\n\n--demo runs against a built-in offline service and cannot be combined with a\nbase URL."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    base_url: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--base-url" => {
                if options.base_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.base_url = Some(url);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.base_url.is_some() {
                    return Err(());
                }
                options.base_url = Some(arg);
            }
        }
    }

    if options.demo && options.base_url.is_some() {
        return Err(());
    }

    Ok(options)
}

fn resolve_base_url(options: &CliOptions) -> String {
    options
        .base_url
        .clone()
        .or_else(|| std::env::var("PYTHIA_BASE_URL").ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned())
}

fn init_file_logging() -> Result<(), Box<dyn Error>> {
    let Some(path) = std::env::var_os("PYTHIA_LOG") else {
        return Ok(());
    };

    let log_file = std::fs::OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "pythia".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_file_logging()?;

        let service = if options.demo {
            AnalysisService::demo()
        } else {
            AnalysisService::http(resolve_base_url(&options))
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let handle = tokio::runtime::Handle::current();
            let tui_join = tokio::task::spawn_blocking(move || {
                pythia::tui::run(service, handle).map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("pythia: {err}");
        std::process::exit(1);
    }
}
