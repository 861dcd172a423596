//! Doctor command - validate configuration and show status

use anyhow::Result;
use halal_check_domain::{Barcode, GatewayError, ProductGateway};
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::config::AppConfig;

/// Barcode used for the provider probe; any answer but a transport error counts
const PROBE_BARCODE: &str = "737628064502";

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    server: CheckResult,
    provider: CheckResult,
    probe: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        server: CheckResult::error("Not checked"),
        provider: CheckResult::error("Not checked"),
        probe: CheckResult::warn("Skipped (use --probe)"),
        overall: "error".to_string(),
    };

    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(c) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            Some(c)
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
            None
        }
    };

    if let Some(ref config) = config {
        report.server = check_server(config);

        match config.provider.build_gateway() {
            Ok(gateway) => {
                report.provider = CheckResult::ok(format!(
                    "Provider: {}, base_url: {}, timeout: {}s",
                    config.provider.kind, config.provider.base_url, config.provider.timeout_secs
                ));

                if args.probe {
                    report.probe = probe_provider(gateway.as_ref()).await;
                }
            }
            Err(e) => {
                report.provider = CheckResult::error(format!("{:#}", e));
            }
        }
    }

    let checks = [&report.config, &report.server, &report.provider, &report.probe];

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn check_server(config: &AppConfig) -> CheckResult {
    match config.server.socket_addr() {
        Ok(addr) if config.server.port == 0 => {
            CheckResult::warn(format!("Listening on {} (ephemeral port)", addr))
        }
        Ok(addr) => CheckResult::ok(format!("Listening on {}", addr)),
        Err(e) => CheckResult::error(format!("{:#}", e)),
    }
}

async fn probe_provider(gateway: &dyn ProductGateway) -> CheckResult {
    let Ok(barcode) = Barcode::parse(PROBE_BARCODE) else {
        return CheckResult::error("Invalid probe barcode");
    };

    match gateway.fetch_product(&barcode).await {
        Ok(product) => CheckResult::ok("Provider reachable").with_details(serde_json::json!({
            "barcode": PROBE_BARCODE,
            "product_name": product.name,
        })),
        Err(GatewayError::NotFound(_)) => {
            CheckResult::ok("Provider reachable (probe barcode not found)")
        }
        Err(GatewayError::Unreachable(detail)) => {
            CheckResult::error(format!("Provider unreachable: {}", detail))
        }
    }
}

fn print_report(report: &DoctorReport) {
    println!("halal-check Doctor Report");
    println!("=========================");
    println!();

    print_check("Config", &report.config);
    print_check("Server", &report.server);
    print_check("Provider", &report.provider);
    print_check("Probe", &report.probe);

    println!();
    let symbol = match report.overall.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} Overall: {}", symbol, report.overall.to_uppercase());

    if report.overall != "error" {
        println!();
        println!("Ready to serve! Try: halal-check serve");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    let symbol = match result.status.as_str() {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    };
    println!("{} {}: {}", symbol, name, result.message);
}
