#![cfg(not(tarpaulin_include))]
use clap::{Args, Parser, Subcommand};
use portfolio::catalog::{Catalog, load_catalog};
use portfolio::chronology::resolve;
use portfolio::config::Boundary;
use portfolio::entry::Section;
use portfolio::scroll_sync::{Measurements, ScrollSyncController, SimulatedViewport};
use portfolio::year_groups::YearCursor;
use std::error::Error;
use std::path::PathBuf;

/// Inspect portfolio content and rehearse the scroll-driven timeline.
#[derive(Debug, Parser)]
#[command(name = "portfolio", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print entries newest first with their chronology keys
    Order {
        content: PathBuf,
        #[arg(long, value_parser = parse_section)]
        section: Option<Section>,
    },
    /// Print a section grouped by year and walk it oldest-ward
    Years {
        content: PathBuf,
        #[arg(long, value_parser = parse_section, default_value = "projects")]
        section: Section,
        /// Year for undated entries when the content does not set one
        #[arg(long, default_value_t = 2026)]
        default_year: i32,
    },
    /// Drive a timeline through a scripted scroll session
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    content: PathBuf,
    #[arg(long, value_parser = parse_section, default_value = "internships")]
    section: Section,
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f64,
    #[arg(long, default_value_t = 600.0)]
    section_top: f64,
    #[arg(long)]
    reduced_motion: bool,
    /// Override the manual next/prev boundary policy
    #[arg(long, value_parser = parse_boundary)]
    boundary: Option<Boundary>,
    /// Semicolon separated commands: scroll <y>, next, prev, goto <i>,
    /// autoplay, wait <ms>, resize <width>
    #[arg(
        long,
        default_value = "scroll 0;scroll 2000;next;next;wait 600;prev;goto 0;wait 600;autoplay;wait 21000;autoplay"
    )]
    script: String,
}

fn parse_section(s: &str) -> Result<Section, String> {
    Section::from_strng(s).ok_or_else(|| format!("unknown section: {}", s))
}

fn parse_boundary(s: &str) -> Result<Boundary, String> {
    match s.to_lowercase().as_str() {
        "clamp" => Ok(Boundary::Clamp),
        "wrap" => Ok(Boundary::Wrap),
        _ => Err(format!("unknown boundary policy: {}", s)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Order { content, section } => {
            let catalog = load_catalog(&content)?;
            print_order(&catalog, section);
        }
        Command::Years {
            content,
            section,
            default_year,
        } => {
            let catalog = load_catalog(&content)?;
            print_years(&catalog, section, default_year);
        }
        Command::Simulate(args) => {
            let catalog = load_catalog(&args.content)?;
            simulate(&catalog, &args)?;
        }
    }

    Ok(())
}

fn print_order(catalog: &Catalog, section: Option<Section>) {
    let sections = match section {
        Some(s) => vec![s],
        None => catalog.sections(),
    };

    for section in sections {
        println!("== {}", section);
        for (i, entry) in catalog.ordered(section).iter().enumerate() {
            let key = resolve(entry);
            let when = if key.ongoing {
                "ongoing".to_string()
            } else if key.is_unknown() {
                "undated".to_string()
            } else {
                format!("{}-{:02}", key.year, key.month)
            };
            println!(
                "{:>3}. {:<48} {:<28} [{}]",
                i + 1,
                entry.title,
                entry.timeframe,
                when
            );
        }
    }
}

fn print_years(catalog: &Catalog, section: Section, default_year: i32) {
    let groups = catalog.year_groups(section, default_year);
    if groups.is_empty() {
        println!("No {} yet", section);
        return;
    }

    for group in groups.groups() {
        let titles: Vec<&str> = group.entries.iter().map(|e| e.title.as_str()).collect();
        println!("{}: {}", group.year, titles.join(" | "));
    }

    let mut cursor = YearCursor::new(&groups);
    print!("walk:");
    loop {
        if let Some(entry) = cursor.current(&groups) {
            print!(" [{} {}]", cursor.year(), entry.title);
        }
        if !cursor.next(&groups) {
            break;
        }
    }
    println!();
}

fn pump_frame(timeline: &mut ScrollSyncController, viewport: &SimulatedViewport, now: u64) {
    if timeline.on_scroll() {
        timeline.on_animation_frame(viewport, now);
    }
}

fn execute_command(
    timeline: &mut ScrollSyncController,
    viewport: &mut SimulatedViewport,
    cmd: &str,
    now: &mut u64,
) -> String {
    let mut parts = cmd.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();

    match (name, arg) {
        ("scroll", Some(y)) => match y.parse::<f64>() {
            Ok(y) => {
                viewport.scroll_y = timeline.state().section_origin + y;
                pump_frame(timeline, viewport, *now);
                "ok".to_string()
            }
            Err(_) => "invalid offset".to_string(),
        },
        ("next", None) => {
            timeline.next(viewport, *now);
            pump_frame(timeline, viewport, *now);
            "ok".to_string()
        }
        ("prev", None) => {
            timeline.prev(viewport, *now);
            pump_frame(timeline, viewport, *now);
            "ok".to_string()
        }
        ("goto", Some(i)) => match i.parse::<i64>() {
            Ok(i) => {
                timeline.go_to(i, viewport, *now);
                pump_frame(timeline, viewport, *now);
                "ok".to_string()
            }
            Err(_) => "invalid index".to_string(),
        },
        ("autoplay", None) => {
            let on = timeline.toggle_autoplay(&*viewport, *now);
            format!("autoplay {}", if on { "on" } else { "off" })
        }
        ("wait", Some(ms)) => match ms.parse::<u64>() {
            Ok(ms) => {
                let until = now.saturating_add(ms);
                while *now < until {
                    // jump straight to the next timer the controller reports
                    *now = timeline
                        .next_deadline()
                        .filter(|due| *due > *now)
                        .map_or(until, |due| due.min(until));
                    let issued = viewport.requests.len();
                    timeline.tick(viewport, *now);
                    if viewport.requests.len() != issued {
                        pump_frame(timeline, viewport, *now);
                    }
                }
                "ok".to_string()
            }
            Err(_) => "invalid duration".to_string(),
        },
        ("resize", Some(w)) => match w.parse::<f64>() {
            Ok(width) => {
                if let Some(m) = viewport.measurements.as_mut() {
                    let panels = m.content_width / m.viewport_width.max(1.0);
                    m.viewport_width = width;
                    m.content_width = panels * width;
                }
                if timeline.on_resize(&*viewport) {
                    timeline.on_animation_frame(&*viewport, *now);
                }
                "ok".to_string()
            }
            Err(_) => "invalid width".to_string(),
        },
        _ => "invalid command".to_string(),
    }
}

fn simulate(catalog: &Catalog, args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    let entries = catalog.ordered(args.section);
    if entries.is_empty() {
        println!("No {} yet", args.section);
        return Ok(());
    }

    let mut config = catalog.settings().sync.clone();
    if let Some(boundary) = args.boundary {
        config.manual_boundary = boundary;
    }

    let mut viewport = SimulatedViewport::new(Measurements::for_panels(
        args.section_top,
        entries.len(),
        args.viewport_width,
    ));
    viewport.reduced_motion = args.reduced_motion;
    viewport.scroll_y = args.section_top;

    let mut timeline = ScrollSyncController::new(entries.len(), config);
    let mut now = 0u64;
    if timeline.mount(&viewport) {
        timeline.on_animation_frame(&viewport, now);
    }

    println!(
        "Timeline '{}' with {} entries, distance={} max_offset={}",
        args.section,
        entries.len(),
        timeline.state().scroll_distance,
        timeline.state().max_offset
    );

    for cmd in args.script.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        let status = execute_command(&mut timeline, &mut viewport, cmd, &mut now);
        let current = timeline
            .active_index()
            .and_then(|i| entries.get(i))
            .map(|e| e.title.as_str())
            .unwrap_or("");
        println!(
            "[{:>6}ms] {:<14} ({}) index={:?} offset={:.0} autoplay={} current={}",
            now,
            cmd,
            status,
            timeline.active_index(),
            timeline.offset(),
            timeline.is_autoplaying(),
            current
        );
    }

    timeline.unmount();
    Ok(())
}
