use crate::config::{Config, load_config};
use crate::ir::parse_categories;
use crate::layout::compute_layout;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::server::run_http;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "stakeholder-venn",
    version,
    about = "Stakeholder salience Venn diagram renderer"
)]
pub struct Args {
    /// Config JSON file (theme, render and server sections)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve POST /stakeholder-venn over HTTP
    Serve {
        /// Bind address, e.g. 0.0.0.0:5000
        #[arg(short = 'b', long = "bind")]
        bind: Option<String>,
    },
    /// Render a categories JSON file once
    Render {
        /// Input JSON file or '-' for stdin
        #[arg(short = 'i', long = "input")]
        input: Option<PathBuf>,

        /// Output file (svg/png). Defaults to stdout for SVG if omitted.
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "png")]
        output_format: OutputFormat,

        /// Raster resolution
        #[arg(short = 'd', long = "dpi")]
        dpi: Option<f32>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Serve { bind } => {
            let mut config = config;
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_http(config))
        }
        Command::Render {
            input,
            output,
            output_format,
            dpi,
        } => {
            let mut config = config;
            if let Some(dpi) = dpi {
                config.render.dpi = dpi;
            }
            render_once(&config, input.as_deref(), output.as_deref(), output_format)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stakeholder_venn=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn render_once(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let raw = read_input(input)?;
    let categories = parse_categories(&raw)?;
    let layout = compute_layout(&categories, &config.theme, &config.render);
    let svg = render_svg(&layout, &config.theme, &config.render);
    match format {
        OutputFormat::Svg => write_output_svg(&svg, output),
        OutputFormat::Png => {
            let output = output.ok_or_else(|| anyhow::anyhow!("Output path required for png output"))?;
            write_output_png(&svg, output, &config.render)?;
            tracing::info!(
                "rendered {} stakeholders to {}",
                categories.total(),
                output.display()
            );
            Ok(())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_command() {
        let args = Args::try_parse_from([
            "stakeholder-venn",
            "render",
            "-i",
            "input.json",
            "-o",
            "out.svg",
            "-e",
            "svg",
            "--dpi",
            "150",
        ])
        .expect("args");
        match args.command {
            Command::Render {
                input,
                output_format,
                dpi,
                ..
            } => {
                assert_eq!(input, Some(PathBuf::from("input.json")));
                assert!(matches!(output_format, OutputFormat::Svg));
                assert_eq!(dpi, Some(150.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_with_global_config() {
        let args = Args::try_parse_from([
            "stakeholder-venn",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--configFile",
            "venn.json",
        ])
        .expect("args");
        assert_eq!(args.config, Some(PathBuf::from("venn.json")));
        assert!(matches!(
            args.command,
            Command::Serve { bind: Some(ref b) } if b == "127.0.0.1:9000"
        ));
    }

    #[test]
    fn png_without_output_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("categorias.json");
        std::fs::write(
            &input,
            r#"{"categorias": {"inactivo": [], "discrecional": [], "demandante": [],
            "dominante": [], "peligroso": [], "dependiente": [], "criticos": []}}"#,
        )
        .expect("write input");
        let err = render_once(&Config::default(), Some(&input), None, OutputFormat::Png).unwrap_err();
        assert!(err.to_string().contains("Output path required"));
    }

    #[test]
    fn svg_render_writes_requested_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let input = dir.path().join("categorias.json");
        let output = dir.path().join("venn.svg");
        std::fs::write(
            &input,
            r#"{"inactivo": ["Ana"], "discrecional": [], "demandante": [],
            "dominante": [], "peligroso": [], "dependiente": [], "criticos": []}"#,
        )
        .expect("write input");
        render_once(&Config::default(), Some(&input), Some(&output), OutputFormat::Svg)
            .expect("render");
        let svg = std::fs::read_to_string(&output).expect("read output");
        assert!(svg.contains(">Ana</tspan>"));
    }
}
