use anyhow::{Context, Result};
use cli::Cli;
use page_extenders::preview::PreviewJob;
use page_extenders::ThemeConfig;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    if let Err(e) = try_main() {
        eprintln!("{}: {e:#}", console::style("Error").red());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    use clap::Parser;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match &cli.command {
        cli::Commands::Theme => {
            print!("{}", ThemeConfig::default().to_toml_string()?);
            Ok(())
        }
        cli::Commands::Preview { job, theme, json } => {
            let theme = theme.as_ref().map(ThemeConfig::load).transpose()?;
            let outcome = PreviewJob::load(job)?
                .run(theme)
                .with_context(|| format!("Failed to preview {}", job.display()))?;

            if *json {
                let out = serde_json::to_string_pretty(&outcome)
                    .with_context(|| "Failed to serialize preview")?;
                println!("{out}");
                return Ok(());
            }

            for op in &outcome.ops {
                println!("{op}");
            }
            println!();
            println!("  Pages:     {}", outcome.pages);
            println!("  Footnotes: {}", outcome.footnotes.len());
            for footnote in outcome.footnotes.iter() {
                if let Some(label) = &footnote.label {
                    println!("    {:>3}  {}", footnote.index, console::style(label).cyan());
                }
            }
            Ok(())
        }
    }
}
