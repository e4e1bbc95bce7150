//! Provider configuration status.

use console::style;

use crate::config::Settings;

fn mark(on: bool) -> console::StyledObject<&'static str> {
    if on {
        style("✓").green()
    } else {
        style("✗").red()
    }
}

/// Print which external providers are usable. Keys are never shown.
pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let ocr = settings.ocr.is_complete();
    println!("{} OCR provider", mark(ocr));
    if ocr {
        if let Some(endpoint) = settings.ocr.endpoint.as_deref() {
            println!("  {} {} ({})", style("→").dim(), endpoint, settings.ocr.model);
        }
    } else {
        println!(
            "  {} set AZURE_DOCUMENT_INTELLIGENCE_ENDPOINT and AZURE_DOCUMENT_INTELLIGENCE_KEY",
            style("→").dim()
        );
    }

    let ai = settings.llm.is_live();
    println!("{} AI provider", mark(ai));
    if settings.llm.force_mock {
        println!("  {} USE_MOCK_AI is set; canned results only", style("!").yellow());
    } else if ai {
        if let Some(deployment) = settings.llm.deployment.as_deref() {
            println!("  {} deployment {}", style("→").dim(), deployment);
        }
    } else {
        println!(
            "  {} set AZURE_OPENAI_ENDPOINT, AZURE_OPENAI_API_KEY and AZURE_OPENAI_DEPLOYMENT",
            style("→").dim()
        );
    }

    match settings.rate_limit_per_minute {
        0 => println!("{} Rate limiting disabled", style("!").yellow()),
        n => println!("{} Rate limit: {} requests/minute per client", mark(true), n),
    }

    Ok(())
}
