// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Folio CLI - HTML to PDF Widget Core
//!
//! Runs the content pipeline from the command line: sanitize, prepare,
//! print the engine options, classify a host, or build a preview.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use folio::{
    classify, GenerationRequest, HostEnvironment, HostParameters, RenderOptions, Sanitizer,
    SurfaceContent, UnavailableRenderer, Widget, WidgetConfig,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout is reserved for command output
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "folio=info".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let cli = match CliArgs::parse(&args[2..]) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let result = match args[1].as_str() {
        "sanitize" => sanitize_file(&cli),
        "prepare" => prepare_file(&cli),
        "options" => print_options(&cli),
        "classify" => classify_host(&cli),
        "preview" => preview_file(&cli).await,
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("folio {}", folio::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Folio - HTML to PDF Widget Core

USAGE:
    folio <COMMAND> [OPTIONS]

COMMANDS:
    sanitize <file>                  Sanitize an HTML file
    prepare <file> [--params p]      Sanitize and prepare an HTML file for printing
    options [--params p]             Print the rendering engine configuration
    classify [--ua UA] [--class C]... [--size WxH]
                                     Classify a host environment
    preview <file> [--params p] [--ua UA] [--class C]...
                                     Build the preview shown without a rendering engine
    help                             Show this help message
    version                          Show version information

EXAMPLES:
    folio sanitize report.html
    folio prepare report.html --params params.json
    folio classify --class android-collect
    folio preview report.html --ua "Mozilla/5.0 (Linux; Android 13; wv)"
"#
    );
}

/// Parsed command-line arguments after the command name
#[derive(Debug, Default)]
struct CliArgs {
    file: Option<String>,
    params: Option<String>,
    user_agent: Option<String>,
    classes: Vec<String>,
    size: Option<(u32, u32)>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Result<Self> {
        let mut cli = CliArgs::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .with_context(|| format!("{} needs a value", flag))
            };
            match arg.as_str() {
                "--params" => cli.params = Some(value("--params")?),
                "--ua" => cli.user_agent = Some(value("--ua")?),
                "--class" => cli.classes.push(value("--class")?),
                "--size" => cli.size = Some(parse_size(&value("--size")?)?),
                flag if flag.starts_with("--") => bail!("unknown option {}", flag),
                _ if cli.file.is_none() => cli.file = Some(arg.clone()),
                _ => bail!("unexpected argument {}", arg),
            }
        }
        Ok(cli)
    }

    fn file(&self) -> Result<&str> {
        self.file.as_deref().context("missing input file")
    }

    fn host_parameters(&self) -> Result<HostParameters> {
        match &self.params {
            Some(path) => Ok(HostParameters::load(path)?),
            None => Ok(HostParameters::default()),
        }
    }

    fn environment(&self) -> HostEnvironment {
        let mut env = HostEnvironment::new();
        if let Some(ua) = &self.user_agent {
            env = env.user_agent(ua.as_str());
        }
        for class in &self.classes {
            env = env.body_class(class.as_str());
        }
        if let Some((w, h)) = self.size {
            env = env.outer_size(w, h);
        }
        env
    }
}

fn parse_size(value: &str) -> Result<(u32, u32)> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .with_context(|| format!("size must look like WIDTHxHEIGHT, got {}", value))?;
    Ok((
        w.trim().parse().context("invalid width")?,
        h.trim().parse().context("invalid height")?,
    ))
}

fn read_html(path: &str) -> Result<String> {
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("reading {}", path))
}

fn sanitize_file(cli: &CliArgs) -> Result<()> {
    let html = read_html(cli.file()?)?;
    let (clean, report) = Sanitizer::new().sanitize_with_report(&html);

    println!("{}", clean);
    if !report.is_clean() {
        eprintln!(
            "Removed {} element(s), {} attribute(s), {} comment(s)",
            report.removed_elements.len(),
            report.removed_attributes.len(),
            report.removed_comments
        );
    }
    Ok(())
}

fn prepare_file(cli: &CliArgs) -> Result<()> {
    let html = read_html(cli.file()?)?;
    let params = cli.host_parameters()?.content(html);
    let request = GenerationRequest::from_parameters(&params);

    let clean = Sanitizer::new().sanitize(&request.content);
    if clean.trim().is_empty() {
        bail!(folio::Error::NoContent);
    }
    let prepared = folio::prepare(&clean, request.margins())?;

    println!("{}", prepared.to_html());
    eprintln!(
        "{} section(s), margins {}mm / {}mm",
        prepared.section_count(),
        request.margin_left_right,
        request.margin_top_bottom
    );
    Ok(())
}

fn print_options(cli: &CliArgs) -> Result<()> {
    let request = GenerationRequest::from_parameters(&cli.host_parameters()?);
    let options = RenderOptions::new(&request, &WidgetConfig::default());
    println!("{}", options.to_json()?);
    Ok(())
}

fn classify_host(cli: &CliArgs) -> Result<()> {
    let profile = classify(&cli.environment());
    println!("{}", serde_json::to_string_pretty(&profile)?);
    if let Some(hint) = profile.host_kind.download_hint() {
        eprintln!("Download hint: {}", hint);
    }
    Ok(())
}

async fn preview_file(cli: &CliArgs) -> Result<()> {
    let html = read_html(cli.file()?)?;
    let params = cli.host_parameters()?.content(html);
    let widget = Widget::from_host(
        &params,
        &cli.environment(),
        Arc::new(UnavailableRenderer),
        WidgetConfig::default(),
    );

    widget.preview().await?;

    match widget.surface_content() {
        Some(SurfaceContent::Approximation { html, .. }) => println!("{}", html),
        Some(SurfaceContent::Artifact { handle }) => println!("{}", handle),
        None => bail!("preview produced no content"),
    }
    Ok(())
}
