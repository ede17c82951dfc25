mod input;
mod render;

use anyhow::{Context, anyhow};
use clap::Parser;
use input::{ResultsInput, SelectionInput, parse_results, parse_selection};
use moodreader_core::catalog::{mood_catalog, parse_mood};
use moodreader_core::config::AppConfig;
use moodreader_core::types::Mood;
use moodreader_engine::controller::{CurationRequest, SessionController, SessionEffect};
use moodreader_engine::session::{ViewKind, ViewState};
use moodreader_providers::covers::{CoverAvailability, CoverLookup};
use moodreader_providers::runtime::HttpSettings;
use moodreader_runtime::config_store::ConfigStore;
use moodreader_runtime::credentials::gemini_api_key;
use moodreader_runtime::runtime_engine::{build_controller, build_cover_lookup, probe_cover};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moodreader")]
#[command(about = "Mood-driven book recommendations in your terminal", long_about = None)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Gemini model name
    #[arg(long)]
    model: Option<String>,

    /// Gemini API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Gemini API key (falls back to API_KEY)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Curate once for a catalog mood id and exit
    #[arg(long, conflicts_with = "describe")]
    mood: Option<String>,

    /// Curate once for a free-text mood and exit
    #[arg(long)]
    describe: Option<String>,

    /// Extra refreshes to run in one-shot mode
    #[arg(long, default_value_t = 0)]
    more: usize,

    /// Mark books whose cover is missing on Open Library
    #[arg(long, default_value_t = false)]
    check_covers: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let store = match &cli.config {
        Some(path) => ConfigStore::at_path(path),
        None => ConfigStore::default_location()?,
    };
    let mut cfg = store.load_or_default()?;
    log::debug!("config loaded from {}", store.path().display());

    if let Some(model) = &cli.model {
        cfg.gemini.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        cfg.gemini.base_url = base_url.clone();
    }
    if cli.check_covers {
        cfg.covers.probe = true;
    }
    Ok(cfg)
}

struct App {
    controller: SessionController,
    catalog: Vec<Mood>,
    covers: CoverLookup,
    http: HttpSettings,
    probe_covers: bool,
    cover_status: Vec<CoverAvailability>,
}

impl App {
    fn new(cfg: &AppConfig, api_key: Option<String>) -> Self {
        Self {
            controller: build_controller(cfg, api_key),
            catalog: mood_catalog(),
            covers: build_cover_lookup(cfg),
            http: HttpSettings::from(cfg.http),
            probe_covers: cfg.covers.probe,
            cover_status: Vec::new(),
        }
    }

    async fn refresh_cover_status(&mut self) {
        self.cover_status.clear();
        if !self.probe_covers {
            return;
        }
        let Some(recs) = self.controller.session().recommendations() else {
            return;
        };
        for book in &recs.books {
            let status = probe_cover(&self.covers, &book.isbn, &self.http).await;
            self.cover_status.push(status);
        }
    }

    fn render_results(&self, out: &mut impl Write) -> io::Result<()> {
        if let ViewState::Results {
            mood,
            recommendations,
            error,
        } = self.controller.view()
        {
            render::results(
                out,
                mood,
                recommendations,
                error.as_deref(),
                &self.covers,
                &self.cover_status,
            )?;
        }
        Ok(())
    }

    /// Prints the loading line, awaits the request and applies its effects.
    async fn run(
        &mut self,
        req: CurationRequest,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        render::loading(out, req.mood())?;
        let effects = self.controller.execute(req).await;
        for effect in effects {
            match effect {
                SessionEffect::ScrollToTop => render::clear_screen(out)?,
            }
        }
        if self.controller.session().kind() == ViewKind::Results {
            self.refresh_cover_status().await;
        }
        Ok(())
    }

    /// Progress goes to stderr so stdout carries only the final list.
    async fn one_shot(&mut self, cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
        let mut progress = io::stderr();
        let req = if let Some(id) = &cli.mood {
            let mood = parse_mood(id)?;
            self.controller.begin_select(mood)
        } else {
            let text = cli.describe.clone().unwrap_or_default();
            self.controller.set_custom_input(text);
            self.controller
                .begin_custom()
                .context("--describe needs a non-blank mood description")?
        };
        self.run(req, &mut progress).await?;

        for _ in 0..cli.more {
            if self.controller.session().kind() != ViewKind::Results {
                break;
            }
            if let Some(req) = self.controller.begin_refresh() {
                self.run(req, &mut progress).await?;
            }
        }

        match self.controller.session().kind() {
            ViewKind::Results => {
                self.render_results(out)?;
                Ok(())
            }
            _ => Err(anyhow!(
                "{}",
                self.controller.session().error().unwrap_or("no recommendations")
            )),
        }
    }

    async fn interactive(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            match self.controller.session().kind() {
                ViewKind::Selection => {
                    render::selection(out, &self.catalog, self.controller.session().error())?;
                    let Some(line) = lines.next().transpose().context("read stdin")? else {
                        break;
                    };
                    match parse_selection(&line, &self.catalog) {
                        SelectionInput::Empty => {}
                        SelectionInput::Quit => break,
                        SelectionInput::Unknown(s) => writeln!(out, "Unknown choice: {s}")?,
                        SelectionInput::Mood(mood) => {
                            let req = self.controller.begin_select(mood);
                            self.run(req, out).await?;
                        }
                        SelectionInput::Custom(text) => {
                            self.controller.set_custom_input(text);
                            if let Some(req) = self.controller.begin_custom() {
                                self.run(req, out).await?;
                            }
                        }
                    }
                }
                ViewKind::Results => {
                    self.render_results(out)?;
                    render::results_prompt(out)?;
                    let Some(line) = lines.next().transpose().context("read stdin")? else {
                        break;
                    };
                    match parse_results(&line) {
                        ResultsInput::More => {
                            if let Some(req) = self.controller.begin_refresh() {
                                self.run(req, out).await?;
                            }
                        }
                        ResultsInput::Back => {
                            self.controller.return_to_selection();
                            self.cover_status.clear();
                            render::clear_screen(out)?;
                        }
                        ResultsInput::Quit => break,
                        ResultsInput::Unknown(s) => writeln!(out, "Unknown command: {s}")?,
                    }
                }
                // Only seen between `begin_*` and `execute`, which `run` never leaves.
                ViewKind::Loading => self.controller.return_to_selection(),
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let cfg = load_config(&cli)?;
    let api_key = cli.api_key.clone().or_else(gemini_api_key);
    let mut app = App::new(&cfg, api_key);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.mood.is_some() || cli.describe.is_some() {
        app.one_shot(&cli, &mut out).await
    } else {
        app.interactive(&mut out).await
    }
}
