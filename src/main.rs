// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Roster CLI entrypoint.
//!
//! By default this runs the interactive people picker and serves MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp`, both driving the same picker.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations).

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use roster::config::{timeout_from_millis, PickerConfig};
use roster::logging::{self, LogTarget};
use roster::picker::PeoplePicker;
use roster::tui::SharedPicker;
use tokio::sync::Mutex;

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--demo-failure] [--quiet-ms <ms>] [--latency-ms <ms>] [--timeout-ms <ms>] [--pool-size <n>] [--mcp-http-port <port>]\n  {program} [--demo-failure] [--quiet-ms <ms>] [--latency-ms <ms>] [--timeout-ms <ms>] [--pool-size <n>] --mcp\n\nTUI mode (default) serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\n--demo-failure makes every lookup fail until toggled off (Ctrl-f or lookup.force_failure.set).\n--timeout-ms 0 disables the lookup timeout.\n\nEnvironment: ROSTER_QUIET_MS, ROSTER_LATENCY_MS, ROSTER_TIMEOUT_MS, ROSTER_POOL_SIZE,\nROSTER_FORCE_FAILURE, ROSTER_LOG (filter), ROSTER_LOG_FILE (TUI log file)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    mcp: bool,
    demo_failure: bool,
    quiet_ms: Option<u64>,
    latency_ms: Option<u64>,
    timeout_ms: Option<u64>,
    pool_size: Option<usize>,
    mcp_http_port: Option<u16>,
}

impl CliOptions {
    /// Layers the flags over `config` (defaults, then environment).
    fn apply(&self, mut config: PickerConfig) -> PickerConfig {
        if let Some(ms) = self.quiet_ms {
            config.quiet_period = Duration::from_millis(ms);
        }
        if let Some(ms) = self.latency_ms {
            config.lookup_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = self.timeout_ms {
            config.lookup_timeout = timeout_from_millis(ms);
        }
        if let Some(size) = self.pool_size {
            config.pool_size = size;
        }
        if self.demo_failure {
            config.force_failure = true;
        }
        config
    }
}

fn parse_value<T: std::str::FromStr>(
    slot: &mut Option<T>,
    args: &mut impl Iterator<Item = String>,
) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    let raw = args.next().ok_or(())?;
    *slot = Some(raw.parse().map_err(|_| ())?);
    Ok(())
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--demo-failure" => {
                if options.demo_failure {
                    return Err(());
                }
                options.demo_failure = true;
            }
            "--quiet-ms" => parse_value(&mut options.quiet_ms, &mut args)?,
            "--latency-ms" => parse_value(&mut options.latency_ms, &mut args)?,
            "--timeout-ms" => parse_value(&mut options.timeout_ms, &mut args)?,
            "--pool-size" => parse_value(&mut options.pool_size, &mut args)?,
            "--mcp-http-port" => parse_value(&mut options.mcp_http_port, &mut args)?,
            _ => return Err(()),
        }
    }

    if options.mcp && options.mcp_http_port.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "roster".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let config = options.apply(PickerConfig::from_env()?).validate()?;

        let log_target = if options.mcp { LogTarget::Stderr } else { LogTarget::for_tui() };
        logging::init(log_target)?;
        tracing::info!(?config, mcp_stdio = options.mcp, "roster starting");

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let picker: SharedPicker =
            Arc::new(Mutex::new(PeoplePicker::from_config(&config, runtime.handle().clone())));
        let mcp = roster::mcp::RosterMcp::new(Arc::clone(&picker));

        if options.mcp {
            runtime.block_on(mcp.serve_stdio())?;
            runtime.block_on(async { picker.lock().await.shutdown() });
            return Ok(());
        }

        let mcp_http_port = options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", mcp_http_port)).await?;
            let endpoint = format!("http://{}/mcp", listener.local_addr()?);
            tracing::info!(%endpoint, "serving MCP over streamable HTTP");

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    tracing::error!(error = %err, "MCP HTTP server error");
                }
            });

            let tui_picker = Arc::clone(&picker);
            let tui_join = tokio::task::spawn_blocking(move || {
                roster::tui::run(tui_picker, Some(endpoint)).map_err(|err| err.to_string())
            })
            .await;

            shutdown_token.cancel();
            let _ = server_handle.await;
            picker.lock().await.shutdown();

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("roster: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};
    use roster::config::PickerConfig;
    use std::time::Duration;

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_mcp_flag() {
        let options = parse_options(args(&["--mcp"])).expect("parse options");
        assert!(options.mcp);
        assert!(!options.demo_failure);
        assert_eq!(options.mcp_http_port, None);
    }

    #[test]
    fn parses_mcp_http_port() {
        let options = parse_options(args(&["--mcp-http-port", "1234"])).expect("parse options");
        assert_eq!(options.mcp_http_port, Some(1234));
        assert!(!options.mcp);
    }

    #[test]
    fn parses_tuning_flags_in_any_order() {
        let options = parse_options(args(&[
            "--pool-size",
            "50",
            "--demo-failure",
            "--quiet-ms",
            "100",
            "--latency-ms",
            "0",
            "--timeout-ms",
            "2000",
        ]))
        .expect("parse options");
        assert_eq!(options.pool_size, Some(50));
        assert_eq!(options.quiet_ms, Some(100));
        assert_eq!(options.latency_ms, Some(0));
        assert_eq!(options.timeout_ms, Some(2000));
        assert!(options.demo_failure);
    }

    #[test]
    fn flags_override_the_config() {
        let options =
            parse_options(args(&["--quiet-ms", "10", "--timeout-ms", "0", "--demo-failure"]))
                .expect("parse options");
        let base = PickerConfig {
            lookup_timeout: Some(Duration::from_millis(500)),
            ..PickerConfig::default()
        };
        let config = options.apply(base);
        assert_eq!(config.quiet_period, Duration::from_millis(10));
        assert_eq!(config.lookup_timeout, None);
        assert!(config.force_failure);
        assert_eq!(config.lookup_latency, base.lookup_latency);
    }

    #[test]
    fn out_of_range_pool_size_fails_validation() {
        let options = parse_options(args(&["--pool-size", "0"])).expect("parse options");
        options.apply(PickerConfig::default()).validate().unwrap_err();
    }

    #[test]
    fn rejects_mcp_http_port_with_stdio_mcp_mode() {
        parse_options(args(&["--mcp", "--mcp-http-port", "0"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_and_positional_args() {
        parse_options(args(&["--nope"])).unwrap_err();
        parse_options(args(&["some/dir"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--mcp", "--mcp"])).unwrap_err();
        parse_options(args(&["--demo-failure", "--demo-failure"])).unwrap_err();
        parse_options(args(&["--quiet-ms", "1", "--quiet-ms", "2"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_or_malformed_values() {
        parse_options(args(&["--quiet-ms"])).unwrap_err();
        parse_options(args(&["--latency-ms", "soon"])).unwrap_err();
        parse_options(args(&["--mcp-http-port", "70000"])).unwrap_err();
    }
}
