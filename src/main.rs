//! ts-map2osm.
//!
//! Kommandozeilen-Frontend: lädt eine extrahierte Map (JSON), exportiert sie
//! als OSM-XML oder prüft eine bestehende OSM-Datei.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use ts_map2osm::{
    parse_osm_document, write_osm_document, ExportOptions, OsmRenderer, RenderFlags, TsMapData,
};

#[derive(Debug, Parser)]
#[command(name = "ts-map2osm", version, about = "Exportiert Truck-Simulator-Maps als OSM-XML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Map-JSON nach OSM-XML exportieren
    Render(RenderArgs),
    /// OSM-Datei einlesen und Struktur prüfen
    Check {
        /// Zu prüfende OSM-Datei
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Extrahierte Map als JSON
    input: PathBuf,
    /// Ziel-Datei
    #[arg(short, long, default_value = "map.osm")]
    output: PathBuf,
    /// Optionen-Datei (Standard: ts-map2osm.toml neben der Binary)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Nur Straßen exportieren (ersetzt mit `--prefabs` die Auswahl der Optionen-Datei)
    #[arg(long)]
    roads: bool,
    /// Nur Prefabs exportieren (ersetzt mit `--roads` die Auswahl der Optionen-Datei)
    #[arg(long)]
    prefabs: bool,
    /// Geheime Straßen zusätzlich einschließen
    #[arg(long)]
    secret_roads: bool,
    /// Prefab-Kanten mit `lanes` taggen
    #[arg(long)]
    lane_tags: bool,
    /// Wirksame Optionen in die Optionen-Datei zurückschreiben
    #[arg(long)]
    save_config: bool,
}

impl RenderArgs {
    fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(ExportOptions::config_path)
    }

    /// Legt die Schalter über die geladenen Optionen.
    ///
    /// `--roads`/`--prefabs` ersetzen die Teil-Auswahl, `--secret-roads` und
    /// `--lane-tags` schalten nur zu.
    fn apply_to(&self, mut options: ExportOptions) -> ExportOptions {
        let mut flags = options.render_flags();
        if self.roads || self.prefabs {
            flags.set(RenderFlags::ROADS, self.roads);
            flags.set(RenderFlags::PREFABS, self.prefabs);
        }
        if self.secret_roads {
            flags.insert(RenderFlags::SECRET_ROADS);
        }
        options.set_render_flags(flags);
        if self.lane_tags {
            options.emit_lane_tags = true;
        }
        options
    }
}

fn main() -> Result<()> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();

        log::info!("ts-map2osm v{} startet...", env!("CARGO_PKG_VERSION"));

        match Cli::parse().command {
            Command::Render(args) => Self::render(&args),
            Command::Check { file } => Self::check(&file),
        }
    }

    fn render(args: &RenderArgs) -> Result<()> {
        let config_path = args.config_path();
        let options = args.apply_to(ExportOptions::load_from_file(&config_path));
        let flags = options.render_flags();

        let map = TsMapData::load_from_file(&args.input)?;
        let mut renderer = OsmRenderer::new(&map, options);
        let document = renderer
            .render(flags)
            .with_context(|| format!("Export von {} fehlgeschlagen", args.input.display()))?;

        let xml = write_osm_document(&document)?;
        std::fs::write(&args.output, xml)
            .with_context(|| format!("Schreiben nach {} fehlgeschlagen", args.output.display()))?;

        if args.save_config {
            renderer.options().save_to_file(&config_path)?;
        }

        let stats = renderer.stats();
        log::info!(
            "{} geschrieben ({} Straßen, {:.1} km, {} Prefab-Kanten, {} Flächen)",
            args.output.display(),
            stats.roads_rendered,
            stats.road_length / 1000.0,
            stats.prefab_edges,
            stats.polygons
        );
        Ok(())
    }

    fn check(file: &Path) -> Result<()> {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("OSM-Datei nicht lesbar: {}", file.display()))?;
        let document = parse_osm_document(&content)
            .with_context(|| format!("Ungueltige OSM-Datei: {}", file.display()))?;

        let unresolved = document.unresolved_references();
        if let Some((way_id, node_ref)) = unresolved.first() {
            anyhow::bail!(
                "{} offene Referenzen, z.B. Way {} → Node {}",
                unresolved.len(),
                way_id,
                node_ref
            );
        }

        log::info!(
            "{}: {} Nodes, {} Ways, alle Referenzen aufgelöst",
            file.display(),
            document.node_count(),
            document.way_count()
        );
        Ok(())
    }
}
