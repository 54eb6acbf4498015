mod config;
mod detect;
mod project;
mod selection;
mod submit;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "encx",
    version,
    about = "Configure and submit audio conversion jobs from a terminal form"
)]
struct Cli {
    /// Input audio file
    file: Option<PathBuf>,
    /// Output format (wav or mp3)
    #[arg(long)]
    format: Option<String>,
    /// Wav bit depth (8, 16, 24 or 32)
    #[arg(long)]
    bit_depth: Option<u32>,
    /// Mp3 channel mode (joint-stereo, stereo or mono)
    #[arg(long)]
    channel_mode: Option<String>,
    /// Mp3 bit rate mode (cbr, abr or vbr)
    #[arg(long)]
    bit_rate_mode: Option<String>,
    /// Bit rate in kbps for cbr/abr output (8-320)
    #[arg(long)]
    bit_rate: Option<u32>,
    /// Vbr quality (0-9)
    #[arg(long)]
    vbr_quality: Option<u8>,
    /// Enable the encoder quality setting
    #[arg(long)]
    use_quality: bool,
    /// Encoder quality (0-9); implies --use-quality
    #[arg(long)]
    quality: Option<u8>,
    /// Conversion server base URL
    #[arg(long)]
    server: Option<String>,
    /// Output file path (defaults to the input name with the new extension)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Overwrite the output if it exists
    #[arg(long)]
    overwrite: bool,
    /// Show the computed request without submitting
    #[arg(long)]
    plan: bool,
    /// Alias for --plan
    #[arg(long)]
    dry_run: bool,
    /// Submit without the interactive form
    #[arg(long)]
    submit: bool,
    /// Emit JSON output
    #[arg(long)]
    json: bool,
    /// Path to config file (defaults to XDG config path)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Config profile name
    #[arg(long)]
    profile: Option<String>,
}

const DEFAULT_SERVER: &str = "http://localhost:8080";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let plan_only = cli.plan || cli.dry_run;
    if plan_only && cli.submit {
        anyhow::bail!("--plan and --submit are mutually exclusive");
    }

    let mut defaults = config::load_defaults(cli.config.as_deref(), cli.profile.as_deref())?
        .unwrap_or_default();

    if let Some(value) = cli.format.as_deref() {
        defaults.format = Some(config::parse_format(value)?);
    }
    if let Some(value) = cli.bit_depth {
        defaults.options.bit_depth = Some(value);
    }
    if let Some(value) = cli.channel_mode.as_deref() {
        defaults.options.channel_mode = Some(config::parse_channel_mode(value)?);
    }
    if let Some(value) = cli.bit_rate_mode.as_deref() {
        defaults.bit_rate_mode = Some(config::parse_bit_rate_mode(value)?);
    }
    if let Some(value) = cli.bit_rate {
        defaults.options.bit_rate = Some(value);
    }
    if let Some(value) = cli.vbr_quality {
        defaults.options.vbr_quality = Some(value);
    }
    if cli.use_quality || cli.quality.is_some() {
        defaults.use_quality = Some(true);
    }
    if let Some(value) = cli.quality {
        defaults.options.quality = Some(value);
    }
    if let Some(value) = cli.server.as_deref() {
        defaults.server = Some(value.to_string());
    }

    let server = defaults
        .server
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    let mut selection = selection::Selection::default();
    if let Some(path) = cli.file.clone() {
        selection.set_input_file(selection::InputFile::new(path));
    }
    if let Some(format) = defaults.format {
        selection.select_output_format(format.id());
    }
    if let Some(mode) = defaults.bit_rate_mode {
        selection.select_bit_rate_mode(mode.id());
    }
    selection.set_quality_toggle(defaults.use_quality.unwrap_or(false));
    selection.options = defaults.options;

    if plan_only || cli.submit {
        let request = submit::build_request(&selection)?;
        if plan_only {
            if cli.json {
                println!("{}", submit::render_request_json(&request)?);
            } else {
                println!("{}", submit::render_request(&request, &server));
            }
            return Ok(());
        }
        warn_on_content_mismatch(&selection);
        let destination =
            submit::dispatch(&server, &request, cli.output.as_deref(), cli.overwrite)
                .context("submission failed")?;
        report_saved(&request.action, &destination, cli.json)?;
        return Ok(());
    }

    let defaults = tui::InteractiveDefaults {
        selection,
        server: server.clone(),
    };
    let Some(request) = tui::run_interactive(defaults)? else {
        return Ok(());
    };
    let destination = submit::dispatch(&server, &request, cli.output.as_deref(), cli.overwrite)
        .context("submission failed")?;
    report_saved(&request.action, &destination, cli.json)?;
    Ok(())
}

fn warn_on_content_mismatch(selection: &selection::Selection) {
    if let Some(input) = selection.input() {
        let detected = detect::detect_input(&input.path);
        if !detected.matches_extension(input.extension.as_deref()) {
            eprintln!(
                "Warning: file content looks like {}, extension says {}",
                detected.ext_hint.as_deref().unwrap_or("unknown"),
                input.extension.as_deref().unwrap_or("none")
            );
        }
    }
}

fn report_saved(action: &str, destination: &std::path::Path, json: bool) -> Result<()> {
    if json {
        let output = serde_json::json!({
            "status": "ok",
            "action": action,
            "output": destination.display().to_string()
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Saved: {}", destination.display());
    }
    Ok(())
}
