use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};

use health_dash::dashboard::{DashboardState, Filter, ViewPhase};
use health_dash::render::{self, RenderOptions};
use health_dash::report::ReportSource;
use health_dash::server::{DashboardServer, ServerConfig};
use health_dash::utils::Config;

#[derive(Parser)]
#[command(name = "health-dash")]
#[command(author = "NL Team")]
#[command(version = "0.1.0")]
#[command(about = "Dashboard for API health-check reports", long_about = None)]
struct Cli {
    /// Config file (YAML). Defaults to the user config file when present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard to a file or stdout
    Render {
        /// Report file path or http(s) URL
        #[arg(short, long)]
        report: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Results filter (all, success, failure)
        #[arg(long, default_value = "all")]
        filter: Filter,

        /// Locale for the last-update timestamp (e.g. zh-TW)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Print the dashboard in the terminal
    Show {
        /// Report file path or http(s) URL
        #[arg(short, long)]
        report: Option<String>,

        /// Results filter (all, success, failure)
        #[arg(long, default_value = "all")]
        filter: Filter,

        /// Skip the score counter animation
        #[arg(long, default_value = "false")]
        no_animate: bool,

        /// Locale for the last-update timestamp (e.g. zh-TW)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Serve the dashboard over HTTP
    Serve {
        /// Report file path or http(s) URL
        #[arg(short, long)]
        report: Option<String>,

        /// Server port
        #[arg(long)]
        port: Option<u16>,

        /// Locale for the last-update timestamp (e.g. zh-TW)
        #[arg(long)]
        locale: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
    Text,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            report,
            format,
            output,
            filter,
            locale,
        } => {
            apply_overrides(&mut config, report, locale);
            let source = ReportSource::parse(&config.report);
            let options = RenderOptions::from_config(&config);

            eprintln!(
                "{} Rendering dashboard from: {}",
                "📊".to_string().blue(),
                source.to_string().cyan()
            );

            let phase = load_phase(&source, &config).await;
            let phase = match phase {
                ViewPhase::Content(state) => ViewPhase::Content(state.with_filter(filter)),
                other => other,
            };

            match (&phase, format) {
                (ViewPhase::Error(err), Format::Html) => {
                    write_output(&render::render_page(&phase, &options), output.as_deref())?;
                    anyhow::bail!("Report unavailable: {}", err);
                }
                (ViewPhase::Error(err), _) => anyhow::bail!("Report unavailable: {}", err),
                (_, Format::Html) => {
                    write_output(&render::render_page(&phase, &options), output.as_deref())?
                }
                (ViewPhase::Content(state), Format::Json) => {
                    write_output(&render::render_json(state, &options)?, output.as_deref())?
                }
                (ViewPhase::Content(state), Format::Text) => {
                    colored::control::set_override(false);
                    write_output(&render::render_text(state, &options), output.as_deref())?
                }
                (ViewPhase::Loading, _) => anyhow::bail!("Report did not finish loading"),
            }
        }

        Commands::Show {
            report,
            filter,
            no_animate,
            locale,
        } => {
            apply_overrides(&mut config, report, locale);
            let source = ReportSource::parse(&config.report);
            let options = RenderOptions::from_config(&config);

            let report = source
                .load(config.request_timeout())
                .await
                .with_context(|| format!("Report unavailable: {}", source))?;
            let state = DashboardState::new(report).with_filter(filter);

            if !no_animate {
                render::text::animate_score(state.report.summary.health_score, &options).await;
            }
            print!("{}", render::render_text(&state, &options));
        }

        Commands::Serve {
            report,
            port,
            locale,
        } => {
            apply_overrides(&mut config, report, locale);
            if let Some(port) = port {
                config.port = port;
            }

            let server = DashboardServer::new(ServerConfig {
                port: config.port,
                source: ReportSource::parse(&config.report),
                request_timeout: config.request_timeout(),
                options: RenderOptions::from_config(&config),
            });
            server.start().await?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, report: Option<String>, locale: Option<String>) {
    if let Some(report) = report {
        config.report = report;
    }
    if locale.is_some() {
        config.locale = locale;
    }
}

/// Load once; any failure becomes the error phase
async fn load_phase(source: &ReportSource, config: &Config) -> ViewPhase {
    let result = source.load(config.request_timeout()).await;
    if let Err(err) = &result {
        log::error!("Failed to load report: {}", err);
    }
    ViewPhase::from_load(result)
}

fn write_output(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Dashboard saved to: {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
