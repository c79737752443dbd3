use clap::{Args, Parser, Subcommand};
use cupping::config;
use cupping::export::{self, ReportHeader};
use cupping::language::{BuiltinLabels, Language, Translate};
use cupping::model::{
    ACIDITY_INTENSITIES, ACIDITY_TYPES, Attribute, BODY_TYPES, EntryId, NoteKind,
    PROCESSING_METHODS, Score, format_score,
};
use cupping::persist::{self, SessionFile};
use cupping::store::SessionStore;
use cupping::taxonomy::{self, Taxonomy};
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(name = "cupping", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Session file to work on (defaults to the configured session path)
    #[arg(short = 's', long, global = true)]
    session: Option<PathBuf>,

    /// Label language: fr, en or es (defaults to the configured language)
    #[arg(short = 'l', long, global = true)]
    lang: Option<Language>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the session with aggregate scores
    Show,
    /// Print export rows as JSON
    Rows,
    /// List the descriptor taxonomy
    Descriptors,
    /// Start a new session, discarding the current one
    New {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Append a coffee
    Add,
    /// Rename a coffee (entries are numbered from 1)
    Rename { entry: usize, name: String },
    /// Set one attribute score (6 to 10, quarter steps)
    Score {
        entry: usize,
        attribute: Attribute,
        value: f64,
    },
    /// Toggle a descriptor in the fragrance or flavor notes
    Tag {
        entry: usize,
        kind: NoteKind,
        descriptor: String,
    },
    /// Set the categorical fields and comments of a coffee
    Set(SetArgs),
    /// Validate a coffee, freezing it
    Lock { entry: usize },
    /// Unfreeze a coffee
    Unlock { entry: usize },
    /// Toggle the favorite mark
    Favorite { entry: usize },
    /// Put every score of a coffee back to 8
    ResetScores { entry: usize },
    /// Remove a coffee (the last one cannot be removed)
    Delete { entry: usize },
    /// Edit session details
    Info(InfoArgs),
    /// Write the session to a JSON file
    ExportJson { path: PathBuf },
    /// Replace the session with one read from a JSON file
    ImportJson { path: PathBuf },
    /// Write the default config file if there is none
    InitConfig,
}

#[derive(Args, Debug, Clone)]
struct SetArgs {
    entry: usize,
    #[arg(long)]
    process: Option<String>,
    #[arg(long)]
    acidity_type: Option<String>,
    #[arg(long)]
    acidity_intensity: Option<String>,
    #[arg(long)]
    body_type: Option<String>,
    #[arg(long)]
    comments: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct InfoArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    origin: Option<String>,
    #[arg(long)]
    roaster: Option<String>,
    #[arg(long)]
    importer: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Commands::InitConfig = cli.command {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let language = cli.lang.unwrap_or(config.language);
    let mut file = SessionFile::new(match cli.session {
        Some(path) => path,
        None => config.session_path()?,
    });

    let session = file.load_or_new();
    persist::warn_unknown_descriptors(&session, Taxonomy::builtin());
    let mut store = SessionStore::new(session);

    run(&mut store, cli.command, language)?;

    if store.commit(&mut file)? {
        log::info!("Saved session to {}", file.path().display());
    }
    Ok(())
}

fn run(store: &mut SessionStore, command: Commands, language: Language) -> anyhow::Result<()> {
    match command {
        Commands::Show => print_session(store, language),
        Commands::Rows => {
            let rows = export::rows(store.session(), &BuiltinLabels, language);
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::Descriptors => print_taxonomy(language),
        Commands::New { yes } => {
            if !store.reset(yes) {
                anyhow::bail!("Starting a new session discards the current one. Pass --yes to confirm.");
            }
        }
        Commands::Add => {
            store.add_coffee();
            println!("Added coffee #{}", store.session().coffees().len());
        }
        Commands::Rename { entry, name } => {
            let id = entry_id(store, entry)?;
            report(store.edit_coffee(&id, |e| e.set_name(name)), entry);
        }
        Commands::Score {
            entry,
            attribute,
            value,
        } => {
            let id = entry_id(store, entry)?;
            let score = Score::new(value)?;
            report(store.edit_coffee(&id, |e| e.set_score(attribute, score)), entry);
        }
        Commands::Tag {
            entry,
            kind,
            descriptor,
        } => {
            let id = entry_id(store, entry)?;
            let key = Taxonomy::builtin().lookup(&descriptor)?;
            report(store.edit_coffee(&id, |e| e.toggle_note(kind, key)), entry);
        }
        Commands::Set(args) => set_fields(store, args)?,
        Commands::Lock { entry } => {
            let id = entry_id(store, entry)?;
            store.edit_coffee(&id, |e| e.lock());
        }
        Commands::Unlock { entry } => {
            let id = entry_id(store, entry)?;
            store.edit_coffee(&id, |e| e.unlock());
        }
        Commands::Favorite { entry } => {
            let id = entry_id(store, entry)?;
            store.edit_coffee(&id, |e| e.toggle_favorite());
        }
        Commands::ResetScores { entry } => {
            let id = entry_id(store, entry)?;
            report(store.edit_coffee(&id, |e| e.reset_scores()), entry);
        }
        Commands::Delete { entry } => {
            let id = entry_id(store, entry)?;
            if !store.delete_coffee(&id) {
                anyhow::bail!("Cannot delete the only coffee of the session");
            }
        }
        Commands::Info(args) => {
            let changed = store.edit_details(|s| {
                if let Some(v) = args.name {
                    s.set_name(v);
                }
                if let Some(v) = args.location {
                    s.set_location(v);
                }
                if let Some(v) = args.date {
                    s.set_date_string(v);
                }
                if let Some(v) = args.origin {
                    s.set_origin_notes(v);
                }
                if let Some(v) = args.roaster {
                    s.set_roaster_notes(v);
                }
                if let Some(v) = args.importer {
                    s.set_importer_notes(v);
                }
            });
            if !changed {
                log::info!("Session details unchanged");
            }
        }
        Commands::ExportJson { path } => {
            persist::export_json(store.session(), &path)?;
            println!("Exported to {}", path.display());
        }
        Commands::ImportJson { path } => {
            let session = persist::import_json(&path)?;
            persist::warn_unknown_descriptors(&session, Taxonomy::builtin());
            store.replace(session);
        }
        Commands::InitConfig => {}
    }
    Ok(())
}

fn entry_id(store: &SessionStore, entry: usize) -> anyhow::Result<EntryId> {
    let coffees = store.session().coffees();
    match entry.checked_sub(1).and_then(|idx| coffees.get(idx)) {
        Some(coffee) => Ok(coffee.id().clone()),
        None => anyhow::bail!(
            "No coffee #{} (the session has {})",
            entry,
            coffees.len()
        ),
    }
}

fn report(applied: Option<bool>, entry: usize) {
    if applied == Some(false) {
        println!("Coffee #{} is locked; unlock it to edit", entry);
    }
}

fn set_fields(store: &mut SessionStore, args: SetArgs) -> anyhow::Result<()> {
    let warn_unlisted = |value: &Option<String>, list: &[&str], field: &str| {
        if let Some(v) = value
            && !list.contains(&v.as_str())
        {
            log::warn!("'{}' is not a usual {} value", v, field);
        }
    };
    warn_unlisted(&args.process, PROCESSING_METHODS, "process");
    warn_unlisted(&args.acidity_type, ACIDITY_TYPES, "acidity type");
    warn_unlisted(&args.acidity_intensity, ACIDITY_INTENSITIES, "acidity intensity");
    warn_unlisted(&args.body_type, BODY_TYPES, "body type");

    let id = entry_id(store, args.entry)?;
    let applied = store.edit_coffee(&id, |e| {
        let mut applied = true;
        if let Some(v) = args.process {
            applied &= e.set_process(v);
        }
        if let Some(v) = args.acidity_type {
            applied &= e.set_acidity_type(v);
        }
        if let Some(v) = args.acidity_intensity {
            applied &= e.set_acidity_intensity(v);
        }
        if let Some(v) = args.body_type {
            applied &= e.set_body_type(v);
        }
        if let Some(v) = args.comments {
            applied &= e.set_comments(v);
        }
        applied
    });
    report(applied, args.entry);
    Ok(())
}

fn print_session(store: &SessionStore, language: Language) {
    let session = store.session();
    let header = ReportHeader::new(session);
    println!("{} ({})", header.name, header.date);
    for (label, value) in [
        ("Location", &header.location),
        ("Origin", &header.origin_notes),
        ("Roaster", &header.roaster_notes),
        ("Importer", &header.importer_notes),
    ] {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }

    let rows = export::rows(session, &BuiltinLabels, language);
    for (idx, (row, entry)) in rows.iter().zip(session.coffees()).enumerate() {
        println!();
        println!(
            "#{} {}{}{}  {}",
            idx + 1,
            row.name,
            if row.is_favorite { " *" } else { "" },
            if entry.is_locked() { " [locked]" } else { "" },
            format_score(row.aggregate_score)
        );
        let scores: Vec<String> = row
            .scores
            .iter()
            .map(|s| format!("{} {}", s.attribute, s.value))
            .collect();
        println!("  {}", scores.join(", "));
        if !row.process.is_empty() {
            println!("  process: {}", row.process);
        }
        if !row.descriptors.is_empty() {
            println!("  notes: {}", row.descriptors.join(", "));
        }
        if !row.comments.is_empty() {
            println!("  {}", row.comments);
        }
    }
}

fn print_taxonomy(language: Language) {
    let taxonomy = Taxonomy::builtin();
    for category in taxonomy.categories() {
        println!(
            "{} {}",
            taxonomy::to_hex(category.color),
            BuiltinLabels.translate(&category.display_key, language)
        );
        for key in &category.items {
            let color = taxonomy.color_of(key).unwrap_or(category.color);
            println!(
                "  {} {} ({})",
                taxonomy::to_hex(color),
                BuiltinLabels.translate(key, language),
                key
            );
        }
    }
    let attributes: Vec<String> = Attribute::iter().map(|a| a.to_string()).collect();
    println!();
    println!("attributes: {}", attributes.join(", "));
}
