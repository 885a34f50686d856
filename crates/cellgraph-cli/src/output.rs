use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use cellgraph_core::prelude::{Report, Verdict};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

const RULE: &str = "==================================================";

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}

pub fn stdout() -> StandardStream {
    let choice = if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

fn colored(out: &mut impl WriteColor, color: Color, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{text}")?;
    out.reset()
}

/// Human-readable block for one report.
pub fn write_report(out: &mut impl WriteColor, report: &Report) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "File: {}", report.file())?;
    write!(out, "Status: ")?;
    if report.is_valid() {
        colored(out, Color::Green, "✅ VALID")?;
    } else {
        colored(out, Color::Red, "❌ INVALID")?;
    }
    writeln!(out)?;
    writeln!(out, "{RULE}")?;

    let stats = report.stats();
    writeln!(out, "\nStatistics:")?;
    writeln!(out, "  Generator: {}", stats.generator)?;
    writeln!(out, "  Total mxCells: {}", stats.total_cells)?;
    writeln!(out, "  Vertices: {}", stats.vertices)?;
    writeln!(out, "  Edges: {}", stats.edges)?;

    if !report.errors().is_empty() {
        writeln!(out)?;
        colored(out, Color::Red, &format!("🚨 Errors ({}):", report.errors().len()))?;
        writeln!(out)?;
        for e in report.errors() {
            writeln!(out, "  - {e}")?;
        }
    }

    if !report.warnings().is_empty() {
        writeln!(out)?;
        colored(out, Color::Yellow, &format!("⚠️ Warnings ({}):", report.warnings().len()))?;
        writeln!(out)?;
        for w in report.warnings() {
            writeln!(out, "  - {w}")?;
        }
    }
    Ok(())
}

/// Final line after all report blocks.
pub fn write_summary(out: &mut impl WriteColor, verdict: Verdict) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    if verdict.is_success() {
        colored(out, Color::Green, "✅ All files validated successfully")?;
    } else {
        colored(out, Color::Red, "❌ Some files have validation errors")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgraph_core::prelude::Stats;
    use termcolor::NoColor;

    fn render(report: &Report) -> String {
        let mut out = NoColor::new(Vec::new());
        write_report(&mut out, report).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn invalid_report_lists_errors_and_warnings() {
        let r = Report::new(
            "a.drawio",
            vec!["Missing root mxCell id='1'".into()],
            vec!["mxCell '2' missing mxGeometry".into()],
            Stats::default(),
        );
        let s = render(&r);
        assert!(s.contains("File: a.drawio"));
        assert!(s.contains("Status: ❌ INVALID"));
        assert!(s.contains("  Generator: (not set)"));
        assert!(s.contains("🚨 Errors (1):\n  - Missing root mxCell id='1'"));
        assert!(s.contains("⚠️ Warnings (1):\n  - mxCell '2' missing mxGeometry"));
    }

    #[test]
    fn clean_report_has_no_sections() {
        let r = Report::new("ok.drawio", vec![], vec![], Stats::default());
        let s = render(&r);
        assert!(s.contains("Status: ✅ VALID"));
        assert!(!s.contains("Errors"));
        assert!(!s.contains("Warnings"));
    }

    #[test]
    fn summary_follows_verdict() {
        let mut out = NoColor::new(Vec::new());
        write_summary(&mut out, Verdict::SomeInvalid).unwrap();
        let s = String::from_utf8(out.into_inner()).unwrap();
        assert!(s.ends_with("❌ Some files have validation errors\n"));
    }
}
