use anyhow::Context;
use clap::Parser;
use crwd_calculator::format_percentage;
use crwd_core::{
    AllocatorConfig, InMemoryDonationBoxGateway, SaveOutcome, SplitResult, SplitSession,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod args;

use args::{Args, EditCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting crwd-split");

    let config = match &args.config {
        Some(path) => AllocatorConfig::load_from(path),
        None => AllocatorConfig::load(),
    }
    .context("failed to load allocator configuration")?
    .apply_profile();
    config.validate().context("invalid allocator configuration")?;

    let mut session = SplitSession::open(args.causes.clone(), &args.saved, args.amount, &config)
        .context("failed to open split session")?;

    for edit in &args.edits {
        apply_edit(&mut session, edit).with_context(|| format!("edit {edit:?} failed"))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.build_request())?);
    } else {
        print_split(&session);
    }

    let gateway = InMemoryDonationBoxGateway::new();
    match session.save(&gateway).await.context("failed to save donation split")? {
        SaveOutcome::NoChanges => println!("No changes to save."),
        SaveOutcome::Saved(receipt) => {
            println!("Saved at {}", receipt.saved_at.to_rfc3339());
        }
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crwd=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn apply_edit(session: &mut SplitSession, edit: &EditCommand) -> SplitResult<()> {
    match edit {
        EditCommand::Slide { cause_id, value } => session.drag_slider(*cause_id, *value),
        EditCommand::Increment { cause_id } => session.increment(*cause_id),
        EditCommand::Decrement { cause_id } => session.decrement(*cause_id),
        EditCommand::Type { cause_id, text } => {
            session.focus(*cause_id)?;
            session.type_text(*cause_id, text)?;
            session.blur(*cause_id)
        }
        EditCommand::Reset => {
            session.reset_to_equal_split();
            Ok(())
        }
    }
}

fn print_split(session: &SplitSession) {
    println!(
        "Monthly amount: ${:.2}  (minimum per cause {}%)",
        session.monthly_amount(),
        format_percentage(session.floor())
    );
    for cause in session.causes() {
        let percentage = session.percentage(cause.id).unwrap_or_default();
        println!("  {:>6}  {:<32} {:>7}%", cause.id.0, cause.name, format_percentage(percentage));
    }
    println!("  {:>6}  {:<32} {:>7}%", "", "Total", format_percentage(session.percentages().total()));
}
