//! Classify command - offline classification of ingredient text

use anyhow::{Context, Result, bail};
use halal_check_domain::usecases::classify;
use std::io::{self, Read};

use crate::args::ClassifyArgs;

pub async fn execute(args: ClassifyArgs) -> Result<()> {
    let text = get_input_text(&args)?;

    tracing::debug!(text_length = text.len(), "Classifying ingredient text");

    let result = classify(Some(&text));

    if args.json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", json);
    } else {
        println!("Status: {}", result.status);
        println!("Reason: {}", result.reason);
    }

    Ok(())
}

fn get_input_text(args: &ClassifyArgs) -> Result<String> {
    if let Some(ref text) = args.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = args.file {
        if path.as_os_str() == "-" {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            return Ok(buffer);
        }

        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    bail!("Either --text or --file must be provided")
}
