use std::{fs::File, path::PathBuf, process::ExitCode};

use assistant::GeminiClient;
use chrono::Utc;
use clap::{Parser, Subcommand};
use engine::{
    FileBlobStore, ImagePayload, PurchaseStatus, RecordDraft, RecordPatch, RecordStore,
    SmartInput, Statistics, request_advice, smart_parse, view,
};

use crate::{
    error::{AppError, Result},
    fields::{RecordFields, parse_status},
    settings::{Overrides, Settings},
};

mod error;
mod export;
mod fields;
mod prompt;
mod render;
mod settings;

#[derive(Parser, Debug)]
#[command(name = "smartshop")]
#[command(about = "Track planned and bought items, with AI-assisted entry")]
struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override the data directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Override timezone (IANA name) used for today's date.
    #[arg(long, global = true)]
    timezone: Option<String>,
    /// Override log level (also `SMARTSHOP_LOG_LEVEL`).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List records, newest last.
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<PurchaseStatus>,
        /// Print the raw JSON collection.
        #[arg(long)]
        json: bool,
    },
    /// Show one record.
    Show { id: String },
    /// Add a record; name and price are required.
    Add(RecordFields),
    /// Change the given fields of a record.
    Edit {
        id: String,
        #[command(flatten)]
        fields: RecordFields,
    },
    /// Delete a record.
    Remove {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// Spending totals over bought records.
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Extract a record from text and/or an image.
    Parse {
        text: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
        /// Store the parsed record.
        #[arg(long)]
        save: bool,
    },
    /// Ask for spending advice.
    Advice,
    /// Write every record to a CSV file.
    Export {
        #[arg(long)]
        out: PathBuf,
    },
    /// Delete the whole collection.
    Reset {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match Settings::load(Overrides {
        config: cli.config,
        data_dir: cli.data_dir,
        timezone: cli.timezone,
        log_level: cli.log_level,
    }) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(settings.log_filter())
        .init();

    match run(cli.command, &settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    tracing::debug!(data_dir = %settings.data_dir.display(), "opening store");
    let mut store = RecordStore::new(FileBlobStore::new(&settings.data_dir));

    match command {
        Command::List { status, json } => {
            let records = store.list_all();
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }
            let shown: Vec<_> = match status {
                Some(status) => view::by_status(&records, status),
                None => records.iter().rev().collect(),
            };
            for record in shown {
                println!("{}", render::record_line(record));
            }
            let (bought, planned) = view::status_counts(&records);
            println!("{bought} bought, {planned} planned");
        }
        Command::Show { id } => {
            let record = store
                .get(&id)
                .ok_or_else(|| AppError::Invalid(format!("record not found: {id}")))?;
            print!("{}", render::record_detail(&record));
        }
        Command::Add(fields) => {
            let draft = RecordDraft::from_patch(settings.today()?, RecordPatch::from(fields));
            let records = store.create(draft, Utc::now())?;
            if let Some(record) = records.first() {
                println!("added {}", record.id);
            }
        }
        Command::Edit { id, fields } => {
            let record = store
                .get(&id)
                .ok_or_else(|| AppError::Invalid(format!("record not found: {id}")))?;
            let mut draft = record.to_draft();
            draft.apply_patch(RecordPatch::from(fields));
            store.update(&id, draft)?;
            println!("updated {id}");
        }
        Command::Remove { id, yes } => {
            let Some(record) = store.get(&id) else {
                println!("nothing to remove");
                return Ok(());
            };
            if !yes && !prompt::confirm(&format!("Delete \"{}\"?", record.name))? {
                return Ok(());
            }
            store.remove(&id)?;
            println!("removed {id}");
        }
        Command::Stats { json } => {
            let stats = Statistics::compute(&store.list_all());
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", render::statistics(&stats));
            }
        }
        Command::Parse { text, image, save } => {
            let input = SmartInput {
                text: text.unwrap_or_default(),
                image: image.as_deref().map(ImagePayload::from_path).transpose()?,
            };
            let client = GeminiClient::new(&settings.assistant)?;
            let patch = smart_parse(&client, &input).await?;
            print!("{}", render::patch(&patch));

            if save {
                let draft = RecordDraft::from_patch(settings.today()?, patch);
                let records = store.create(draft, Utc::now())?;
                if let Some(record) = records.first() {
                    println!("added {}", record.id);
                }
            }
        }
        Command::Advice => {
            let client = GeminiClient::new(&settings.assistant)?;
            let advice = request_advice(&client, &store.list_all()).await?;
            println!("{advice}");
        }
        Command::Export { out } => {
            let records = store.list_all();
            export::write_csv(File::create(&out)?, &records)?;
            println!("exported {} records to {}", records.len(), out.display());
        }
        Command::Reset { yes } => {
            if !yes && !prompt::confirm("Delete every record?")? {
                return Ok(());
            }
            store.clear()?;
            println!("all records deleted");
        }
    }

    Ok(())
}
