use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use jtagdec_io::{Annotation, Row, Span, trace};
use jtagdec_microchip::Decoder;
use strum::VariantArray;

use crate::cli_helpers::Window;

mod cli_helpers;

#[derive(clap::Parser)]
struct Args {
    #[command(flatten)]
    global: GlobalOpts,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Args)]
struct GlobalOpts {
    /// Which rendering of each annotation to print
    #[arg(long, default_value = "long", global = true)]
    label: Label,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum Label {
    #[default]
    Long,
    Short,
    Terse,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Decode a trace of TAP events
    Decode(Decode),
    /// List annotation classes and rows
    Classes,
}

#[derive(clap::Args)]
struct Decode {
    trace: PathBuf,

    /// Only print annotations in these rows (repeatable)
    #[arg(long)]
    row: Vec<Row>,

    /// Only print annotations overlapping `START:END`
    #[arg(long)]
    window: Option<Window>,
}

fn main() -> Result<()> {
    init_logging()?;
    let Args { global, command } = Args::parse();

    match command {
        CliCommand::Decode(args) => decode(&global, &args)?,
        CliCommand::Classes => classes(),
    }

    Ok(())
}

fn decode(global: &GlobalOpts, args: &Decode) -> Result<()> {
    let events = trace::read(&args.trace)?;
    tracing::info!(events = events.len(), "decoding");

    let mut decoder = Decoder::new(Vec::new());
    decoder.decode_all(&events);

    let window = args.window.map(Window::span);
    for annotation in decoder.into_sink() {
        if !selected(&annotation, &args.row, window) {
            continue;
        }
        let Annotation { span, class, .. } = &annotation;
        println!(
            "{}-{} {}: {class}: \"{}\"",
            span.start,
            span.end,
            class.row(),
            label(&annotation, global.label),
        );
    }
    Ok(())
}

fn selected(annotation: &Annotation, rows: &[Row], window: Option<Span>) -> bool {
    let row_ok = rows.is_empty() || rows.contains(&annotation.class.row());
    let window_ok = window.is_none_or(|w| w.overlaps(annotation.span));
    row_ok && window_ok
}

/// Shorter renderings fall back to the next longer one that exists.
fn label(annotation: &Annotation, style: Label) -> &str {
    let idx = match style {
        Label::Long => 0,
        Label::Short => 1,
        Label::Terse => 2,
    };
    let labels = &annotation.labels;
    labels
        .get(idx.min(labels.len().saturating_sub(1)))
        .map_or("", String::as_str)
}

fn classes() {
    for row in Row::VARIANTS {
        println!("{row}: {}", row.description());
        for class in row.classes() {
            println!("    {class:<16} {}", class.description());
        }
    }
}

fn init_logging() -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(tracing_error::ErrorLayer::default())
        .init();
    color_eyre::install()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use jtagdec_io::Class;

    use super::*;

    fn annotation(class: Class, start: u64, labels: &[&str]) -> Annotation {
        Annotation::new(Span::new(start, start + 10), class, labels.iter().copied())
    }

    #[test]
    fn test_selected() {
        let a = annotation(Class::ParityInErr, 100, &["Parity error"]);
        assert!(selected(&a, &[], None));
        assert!(selected(&a, &[Row::DataIn], None));
        assert!(!selected(&a, &[Row::Items, Row::DataOut], None));
        assert!(selected(&a, &[], Some(Span::new(105, 200))));
        assert!(!selected(&a, &[], Some(Span::new(111, 200))));
    }

    #[test]
    fn test_label() {
        let a = annotation(Class::Field, 0, &["Manufacturer: Atmel", "Manuf", "M"]);
        assert_eq!(label(&a, Label::Short), "Manuf");
        assert_eq!(label(&a, Label::Terse), "M");

        let a = annotation(Class::Item, 0, &["IDCODE: 0x964203f"]);
        assert_eq!(label(&a, Label::Terse), "IDCODE: 0x964203f");
        assert_eq!(label(&annotation(Class::Item, 0, &[]), Label::Long), "");
    }

    #[test]
    fn test_args() {
        use clap::CommandFactory;
        Args::command().debug_assert();

        let args = Args::try_parse_from([
            "jtagdec", "--label", "terse", "decode", "t.txt", "--row", "data_in", "--row",
            "pdi_prog", "--window", "0:99",
        ])
        .unwrap();
        let CliCommand::Decode(decode) = args.command else {
            panic!("expected decode");
        };
        assert_eq!(decode.row, [Row::DataIn, Row::PdiProg]);
        assert_eq!(decode.window, Some(Window { start: 0, end: 99 }));
    }

    #[test]
    fn test_sample_trace() {
        let events = trace::parse(include_str!("../../traces/atxmega64a3u.txt")).unwrap();
        let mut decoder = Decoder::new(Vec::new());
        decoder.decode_all(&events);
        let out = decoder.into_sink();
        let commands = out
            .iter()
            .filter(|a| selected(a, &[Row::Commands], None))
            .map(|a| a.label())
            .collect::<Vec<_>>();
        assert_eq!(
            commands,
            [
                "IR: IDCODE",
                "IDCODE: 0x964203f (Atmel: ATXMega64A3U@r0)",
                "IR: PDICOM",
                "PDICOM",
                "IR: BYPASS",
            ]
        );
        let programmer = out
            .iter()
            .filter(|a| selected(a, &[Row::PdiProg], None))
            .map(|a| a.label())
            .collect::<Vec<_>>();
        assert_eq!(programmer, ["BREAK"]);
        assert_eq!(out.last().map(Annotation::label), Some("BYPASS: 0"));
    }
}
