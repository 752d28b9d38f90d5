//! spline-route: Kommandozeile für Kurven-Netzwerke.
//!
//! Lädt eine Netzwerk-Datei, beantwortet Abfragen (Junctions, Nachbarn,
//! Längen, Routen) und führt Junction-Änderungen aus.

use anyhow::{bail, Context, Result};
use spline_route_network::app::use_cases::{diagnostics, routing};
use spline_route_network::{PointId, RouteSession, RouterOptions, SessionCommand, SessionController};
use std::path::PathBuf;

const USAGE: &str = "\
Aufruf: spline-route <netzwerk.xml> <befehl> [argumente] [--out <datei>] [--json] [--config <datei>]

Befehle:
  nodes                       Junctions mit Position und Mitgliedern
  lengths                     Gesamt- und Abschnittslaengen aller Kurven
  neighbors <junction>        Benachbarte Junctions entlang der Kurven
  route <quelle> <ziel>       Kuerzeste Route zwischen zwei Junctions
  table <quelle>              Abstandstabelle (JSON)
  mark <kurve-punkt>          Ankerpunkt als Junction markieren
  connect <von> <nach>        Punkt <von> mit <nach> verbinden
  snap <von>                  Punkt mit naechstem Anker einer anderen Kurve verbinden
  disconnect <kurve-punkt>    Punkt aus seiner Junction loesen

Aendernde Befehle speichern nach --out, sonst in die Eingabedatei.";

/// Auszuführender Befehl samt Argumenten.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CliCommand {
    Nodes,
    Lengths,
    Neighbors { junction: usize },
    Route { source: usize, target: usize },
    Table { source: usize },
    Mark { point: PointId },
    Connect { from: PointId, to: PointId },
    Snap { from: PointId },
    Disconnect { point: PointId },
}

impl CliCommand {
    fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Mark { .. } | Self::Connect { .. } | Self::Snap { .. } | Self::Disconnect { .. }
        )
    }
}

/// Geparste Kommandozeile.
#[derive(Debug, Clone, PartialEq)]
struct CliArgs {
    file: PathBuf,
    command: CliCommand,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
}

impl CliArgs {
    fn parse(args: Vec<String>) -> Result<Self> {
        let mut positional = Vec::new();
        let mut out = None;
        let mut config = None;
        let mut json = false;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--json" => json = true,
                "--out" => out = Some(PathBuf::from(iter.next().context("--out erwartet einen Pfad")?)),
                "--config" => {
                    config = Some(PathBuf::from(iter.next().context("--config erwartet einen Pfad")?))
                }
                "-h" | "--help" => bail!("{}", USAGE),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let file = PathBuf::from(positional.next().context(USAGE)?);
        let name = positional.next().context(USAGE)?;
        let rest: Vec<String> = positional.collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("nodes", []) => CliCommand::Nodes,
            ("lengths", []) => CliCommand::Lengths,
            ("neighbors", [junction]) => CliCommand::Neighbors {
                junction: parse_index(junction)?,
            },
            ("route", [source, target]) => CliCommand::Route {
                source: parse_index(source)?,
                target: parse_index(target)?,
            },
            ("table", [source]) => CliCommand::Table {
                source: parse_index(source)?,
            },
            ("mark", [point]) => CliCommand::Mark {
                point: parse_point(point)?,
            },
            ("connect", [from, to]) => CliCommand::Connect {
                from: parse_point(from)?,
                to: parse_point(to)?,
            },
            ("snap", [from]) => CliCommand::Snap {
                from: parse_point(from)?,
            },
            ("disconnect", [point]) => CliCommand::Disconnect {
                point: parse_point(point)?,
            },
            _ => bail!("Unbekannter Befehl oder falsche Argumente: {}\n\n{}", name, USAGE),
        };

        Ok(Self {
            file,
            command,
            out,
            config,
            json,
        })
    }
}

fn parse_index(text: &str) -> Result<usize> {
    text.parse::<usize>()
        .with_context(|| format!("'{}' ist kein gueltiger Junction-Index", text))
}

fn parse_point(text: &str) -> Result<PointId> {
    Ok(text.parse::<PointId>()?)
}

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::debug!("spline-route v{} startet...", env!("CARGO_PKG_VERSION"));

    let args = CliArgs::parse(std::env::args().skip(1).collect())?;
    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let config_path = args.config.clone().unwrap_or_else(RouterOptions::config_path);
    let options = RouterOptions::load_from_file(&config_path);

    let mut session = RouteSession::new(options);
    let mut controller = SessionController::new();
    controller.handle_command(
        &mut session,
        SessionCommand::LoadFile {
            path: args.file.clone(),
        },
    )?;

    let mutating = args.command.is_mutating();
    match args.command {
        CliCommand::Nodes => {
            let reports = diagnostics::junction_reports(&session);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print!("{}", session.graph);
            }
        }
        CliCommand::Lengths => {
            let reports = diagnostics::curve_reports(&session);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("Kurve {}: Laenge {:.3}", report.curve, report.total_length);
                    for (anchor, progress) in &report.anchor_progress {
                        println!("  Anker {:>3}: t = {:.4}", anchor, progress);
                    }
                    for (index, length) in report.span_lengths.iter().enumerate() {
                        println!("  Abschnitt {}: {:.3}", index, length);
                    }
                }
            }
        }
        CliCommand::Neighbors { junction } => {
            let neighbors = session
                .neighbors(junction)
                .with_context(|| format!("Junction {} existiert nicht", junction))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&neighbors)?);
            } else {
                for n in &neighbors {
                    println!(
                        "Junction {} ueber Kurve {} (Anker {} -> {})",
                        n.junction, n.curve, n.from_anchor, n.anchor
                    );
                }
            }
        }
        CliCommand::Route { source, target } => {
            match routing::shortest_path(&mut session, source, target)? {
                Some(path) if args.json => println!("{}", serde_json::to_string_pretty(&path)?),
                Some(path) => {
                    println!(
                        "Route {} -> {}: Laenge {:.3}, Junctions {:?}",
                        source, target, path.total_length, path.junctions
                    );
                    for segment in &path.segments {
                        println!("  {}", segment);
                    }
                }
                None => bail!("Kein Pfad von Junction {} nach {}", source, target),
            }
        }
        CliCommand::Table { source } => {
            controller.handle_command(&mut session, SessionCommand::RunSearch { source })?;
            let table = routing::distance_table(&session).unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        CliCommand::Mark { point } => {
            controller.handle_command(&mut session, SessionCommand::MarkAsJunction { point })?
        }
        CliCommand::Connect { from, to } => {
            controller.handle_command(&mut session, SessionCommand::Connect { from, to })?
        }
        CliCommand::Snap { from } => {
            let partner = session
                .connect_candidate(from)
                .with_context(|| format!("Kein Verbindungs-Kandidat fuer {}", from))?
                .point;
            controller.handle_command(&mut session, SessionCommand::ConnectToNearest { from })?;
            println!("{} mit {} verbunden", from, partner);
        }
        CliCommand::Disconnect { point } => {
            controller.handle_command(&mut session, SessionCommand::Disconnect { point })?
        }
    }

    if mutating {
        for change in session.command_log.pending_changes() {
            log::info!("Aenderung: {:?}", change);
        }
        controller.handle_command(&mut session, SessionCommand::SaveFile { path: args.out })?;
    }

    Ok(())
}
