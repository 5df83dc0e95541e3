use crate::clone::{ClonePlan, CloneReport};
use std::io::{self, Write};
use std::path::Path;

/// Display a completed clone
pub fn display_report(report: &CloneReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "Cloned:")?;
    writeln!(writer, "  {}", report.source_file.display())?;
    writeln!(writer, "->")?;
    writeln!(writer, "  {}", report.destination_file.display())?;
    writeln!(writer)?;

    let tokens: Vec<String> = report.tokens.pairs().iter().map(|p| p.to_string()).collect();
    writeln!(writer, "(Tokens: {}; version -> v001)", tokens.join(", "))?;

    if report.overwritten {
        writeln!(writer, "Existing file was overwritten.")?;
    }

    Ok(())
}

/// Display dry run results in a formatted output
pub fn display_plan(plan: &ClonePlan, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Latest:  {} (v{:03})", plan.source_file.display(), plan.source_version)?;
    writeln!(writer, "Target:  {}", plan.destination_file.display())?;
    writeln!(writer)?;

    writeln!(writer, "Token changes:")?;
    for pair in plan.tokens.pairs() {
        writeln!(writer, "  {}", pair)?;
    }
    writeln!(writer)?;

    if plan.would_overwrite {
        writeln!(writer, "[!] Target exists and would need overwrite confirmation")?;
        writeln!(writer)?;
    }

    writeln!(writer, "Run without --dry to write the file.")?;

    Ok(())
}

/// Display the notice shown when the user declines to overwrite
pub fn display_cancelled(destination: &Path, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "Operation canceled by user.")?;
    writeln!(writer, "  Kept existing file: {}", destination.display())?;
    Ok(())
}

/// Display any serializable result as pretty JSON for scripting
pub fn display_json<T: serde::Serialize>(value: &T, writer: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)
}
