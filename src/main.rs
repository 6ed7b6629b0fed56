//! # Recipe finder
//!
//! Terminal front end: every subcommand loads state, performs one action,
//! prints the resulting notice and re-renders.

/*--- Imports ------------------------------------------------------------------------------------*/

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use recipe_finder::{
    remote, AppState, Config, FileStore, KeyValueStore, Notice, Recipe, VoiceInput,
};

/*--- Global Constants ---------------------------------------------------------------------------*/

const DEFAULT_CONFIG: &str = "recipe-finder.yaml";
const NO_MATCHES: &str = "No recipes match your filters.";

/*--- Args ---------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML config file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Overrides `storage.dir`
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Search the remote recipe source with this query instead of the bundled catalog
    #[arg(long)]
    remote: Option<String>,

    /// More logging (debug level)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recipes matching the filters
    Browse {
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(long, default_value = recipe_finder::ALL_CUISINES)]
        cuisine: String,
        #[arg(long)]
        healthy: bool,
        #[arg(long)]
        veg: bool,
        #[arg(long)]
        favorites: bool,
    },

    /// Autocomplete a partial query
    Suggest { query: String },

    /// Full recipe detail
    Show { id: String },

    /// Toggle a recipe in favorites
    Favorite { id: String },

    /// Cuisine filter values
    Cuisines,

    /// Random recipe
    Surprise,

    /// Shopping list
    #[command(subcommand)]
    List(ListCommand),

    /// Use a transcribed voice query; without text, reports voice as unsupported
    Voice { transcript: Option<String> },
}

#[derive(Subcommand, Debug)]
enum ListCommand {
    Show,
    Add { item: String },
    /// Add every ingredient of a recipe
    AddRecipe { id: String },
    Remove { item: String },
    Clear,
    /// Bullet list for pasting elsewhere
    Export,
}

/*--- Render -------------------------------------------------------------------------------------*/

fn print_notice(notice: &Notice) {
    if notice.is_bad() {
        eprintln!("! {notice}");
    } else {
        println!("✓ {notice}");
    }
}

fn card<S: KeyValueStore + Clone>(state: &AppState<S>, r: &Recipe) -> String {
    let saved = if state.is_favorite(&r.id) { "♥ Saved" } else { "♡ Save" };
    format!(
        "[{}] {} {} ({}) {} • {}  {}",
        r.id,
        r.flag(),
        r.name,
        r.country,
        r.cuisine,
        r.badges(),
        saved
    )
}

fn print_cards<S: KeyValueStore + Clone>(state: &AppState<S>) {
    let visible = state.visible();
    if visible.is_empty() {
        println!("{NO_MATCHES}");
        return;
    }
    for r in visible {
        println!("{}", card(state, r));
    }
}

fn print_detail<S: KeyValueStore + Clone>(state: &AppState<S>, r: &Recipe) {
    println!("{}", card(state, r));
    if !r.image_url.is_empty() {
        println!("{}", r.image_url);
    }

    println!("\nIngredients");
    for i in &r.ingredients {
        let mark = if state.shopping_list().contains(i) { "x" } else { " " };
        println!("  [{mark}] {i}");
    }

    println!("\nInstructions");
    for (n, s) in r.steps.iter().enumerate() {
        println!("  {}. {s}", n + 1);
    }

    if let Some(fact) = &r.fact {
        println!("\n{fact}");
    }
}

fn print_list<S: KeyValueStore + Clone>(state: &AppState<S>) {
    if state.shopping_list().is_empty() {
        println!("Shopping list is empty.");
    } else {
        println!("{}", state.export_list());
    }
}

/*--- Main application ---------------------------------------------------------------------------*/

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::load(&args.config)
        .with_context(|| format!("cannot load config {:?}", args.config))?;
    if let Some(dir) = args.storage_dir {
        config.storage.dir = dir;
    }

    let query = match args.remote {
        Some(q) => {
            config.remote.enabled = true;
            q
        }
        None => String::new(),
    };
    let catalog = remote::load_catalog(&config.remote, &query)?;
    debug!(recipes = catalog.len(), "catalog ready");

    let storage = FileStore::new(&config.storage.dir);
    let mut state = AppState::new(catalog, storage, &config);

    match args.command {
        Command::Browse { query, cuisine, healthy, veg, favorites } => {
            let mut rng = rand::thread_rng();
            let all: Vec<&Recipe> = state.catalog.all().iter().collect();
            if let Some(pick) = recipe_finder::catalog::pick_random(&all, &mut rng) {
                println!("Feature of the Day • {} {}\n", pick.flag(), pick.country);
            }

            state.set_query(&query);
            state.set_cuisine(&cuisine);
            state.set_healthy_only(healthy);
            state.set_vegetarian_only(veg);
            if favorites {
                state.toggle_favorites_only();
            }
            print_cards(&state);
        }

        Command::Suggest { query } => {
            for s in state.suggestions(&query) {
                println!("{} — {}", s.label, s.country);
            }
        }

        Command::Show { id } => match state.recipe(&id) {
            Ok(r) => print_detail(&state, r),
            Err(_) => print_notice(&Notice::RecipeNotFound(id)),
        },

        Command::Favorite { id } => {
            if state.recipe(&id).is_err() {
                print_notice(&Notice::RecipeNotFound(id));
            } else {
                print_notice(&state.toggle_favorite(&id)?);
            }
        }

        Command::Cuisines => {
            for c in state.catalog.cuisines() {
                println!("{c}");
            }
        }

        Command::Surprise => match state.surprise(&mut rand::thread_rng()) {
            Some(r) => print_detail(&state, r),
            None => println!("{NO_MATCHES}"),
        },

        Command::List(ListCommand::Export) => println!("{}", state.export_list()),

        Command::List(cmd) => {
            match cmd {
                ListCommand::Show | ListCommand::Export => {}
                ListCommand::Add { item } => {
                    if let Some(n) = state.add_to_list(&item)? {
                        print_notice(&n);
                    }
                }
                ListCommand::AddRecipe { id } => print_notice(&state.add_recipe_to_list(&id)?),
                ListCommand::Remove { item } => print_notice(&state.remove_from_list(&item)?),
                ListCommand::Clear => print_notice(&state.clear_list()?),
            }
            print_list(&state);
        }

        Command::Voice { transcript } => {
            let input = match transcript {
                Some(t) if !t.trim().is_empty() => VoiceInput::Transcript(t),
                Some(_) => VoiceInput::Failed,
                None => VoiceInput::Unsupported,
            };
            print_notice(&state.apply_voice(input));
            print_cards(&state);
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(args)
}

/*--------------------------------------------- EOF ----------------------------------------------*/
