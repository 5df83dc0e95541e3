use clap::Parser;
use shotclone::cli::Args;
use shotclone::output::{display_cancelled, display_json, display_plan, display_report};
use shotclone::ui::{Ui, UiConfig};
use shotclone::{
    clone_latest, logging, AlwaysOverwrite, AppError, CloneOptions, CloneOutcome, NeverOverwrite,
    OverwritePrompt,
};
use tracing::{debug, error, info};

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    let mut ui = Ui::new(UiConfig::new(args.verbose > 0));

    if let Err(e) = run(&args, &mut ui) {
        error!("{}", e);
        ui.error(&format!("Error: {}", e.detailed_message()));
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: &Args, ui: &mut Ui) -> Result<(), AppError> {
    let options = CloneOptions { dry_run: args.dry };

    debug!(yes = args.yes, no_clobber = args.no_clobber, dry = args.dry, "Options");
    ui.step("Looking for the latest scene");

    let mut always = AlwaysOverwrite;
    let mut never = NeverOverwrite;
    let outcome = {
        let prompt: &mut dyn OverwritePrompt = if args.yes {
            &mut always
        } else if args.no_clobber {
            &mut never
        } else {
            &mut *ui
        };
        clone_latest(&args.source_dir, &args.dest_dir, &options, prompt)?
    };

    let mut stdout = std::io::stdout();
    let shown = match &outcome {
        CloneOutcome::Completed(report) => {
            info!(path = ?report.destination_file, "Clone completed");
            if args.json {
                display_json(report, &mut stdout)
            } else {
                display_report(report, &mut stdout)
            }
        }
        CloneOutcome::Planned(plan) => {
            if args.json {
                display_json(plan, &mut stdout)
            } else {
                display_plan(plan, &mut stdout)
            }
        }
        CloneOutcome::Cancelled { destination_file } => {
            info!(path = ?destination_file, "Clone cancelled");
            if args.json {
                display_json(
                    &serde_json::json!({
                        "cancelled": true,
                        "destination_file": destination_file,
                    }),
                    &mut stdout,
                )
            } else {
                display_cancelled(destination_file, &mut stdout)
            }
        }
    };
    shown.map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    match outcome {
        CloneOutcome::Completed(_) => ui.success("Clone completed successfully."),
        CloneOutcome::Cancelled { .. } => ui.warning("Existing file kept."),
        CloneOutcome::Planned(_) => {}
    }

    Ok(())
}
