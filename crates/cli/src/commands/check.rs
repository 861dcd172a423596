//! Check command - one-shot barcode lookup

use anyhow::{Context, Result, bail};
use halal_check_domain::{
    Barcode, CheckResponse,
    usecases::{CheckError, CheckUseCase},
};
use std::path::PathBuf;

use crate::args::CheckArgs;
use crate::config::AppConfig;

pub async fn execute(args: CheckArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let gateway = config.provider.build_gateway()?;
    let usecase = CheckUseCase::new(gateway);

    let result = match Barcode::parse(args.barcode) {
        Ok(barcode) => usecase.check(barcode).await,
        Err(_) => Err(CheckError::InvalidInput),
    };

    let response = match &result {
        Ok(report) => CheckResponse::success(report.clone()),
        Err(error) => error.to_response(),
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
        println!("{}", json);
    } else if let Ok(report) = &result {
        let name = report
            .product
            .name
            .as_deref()
            .unwrap_or("Unknown product");
        println!("{} ({})", name, report.barcode);
        println!("Status: {}", report.classification.status);
        println!("Reason: {}", report.classification.reason);
        if let Some(labels) = &report.product.labels {
            println!("Labels: {}", labels);
        }
        println!("Source: {}", response.source);
    }

    if let Err(error) = result {
        bail!(error);
    }

    Ok(())
}
