use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fridgechef_client::{ApiClient, ClientConfig, HttpIngredientStore, HttpRecipeService};
use fridgechef_core::{IngredientId, RecipeId, SessionContext, parse_calendar_date};
use fridgechef_pantry::{CAPACITY_WARNING, Ingredient, Pantry, SelectionChange};
use fridgechef_policy::{EXPIRY_WARNING_DAYS, ReferenceData, ShelfLifePolicy};
use fridgechef_recipes::{CandidateRecipe, EnrichedCandidate, PersistedRecipe, RecipeOrchestrator, split_quantity, thumbnail_for};

#[derive(Parser)]
#[command(name = "fridgechef")]
#[command(about = "Track what is in the fridge and find recipes for it")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List ingredients by category and what expires soon
    Pantry,

    /// Add an ingredient
    Add {
        name: String,
        /// Added date (defaults to today)
        #[arg(long)]
        added: Option<String>,
        #[arg(long)]
        frozen: bool,
    },

    /// Delete an ingredient
    Remove { id: IngredientId },

    /// Select 1 to 3 ingredients by id and look for recipes
    Cook {
        #[arg(required = true)]
        ids: Vec<IngredientId>,
    },

    /// Look for recipes for 1 to 3 ingredient names
    Recommend {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Store the recipe for a video
    Save { video_url: String },

    /// List bookmarked recipes
    Liked,

    /// Toggle the bookmark on a stored recipe
    Star { id: RecipeId },

    /// Show a stored recipe
    Show { id: RecipeId },
}

#[tokio::main]
async fn main() -> Result<()> {
    fridgechef_observability::init();
    let cli = Cli::parse();

    let config = ClientConfig::from_env()?;
    let policy = Arc::new(ShelfLifePolicy::new(&load_reference_data(config.reference_data.as_deref())?));
    let api = ApiClient::new(&config).context("failed to set up the API client")?;
    let session = SessionContext::new();
    tracing::info!(session = %session.session_id(), api = %api.base_url(), "fridgechef starting");

    let mut pantry = Pantry::new(HttpIngredientStore::new(api.clone()), Arc::clone(&policy), session.clone());
    let recipes = Arc::new(HttpRecipeService::new(api));
    let orchestrator = RecipeOrchestrator::new(Arc::clone(&recipes), recipes, session);

    match cli.command.unwrap_or(Commands::Pantry) {
        Commands::Pantry => {
            pantry.load().await?;
            print_pantry(&pantry);
        }
        Commands::Add { name, added, frozen } => {
            let mut ingredient = Ingredient::draft(name).frozen(frozen);
            if let Some(raw) = added {
                ingredient.added_date = Some(parse_calendar_date(&raw)?);
            }
            pantry.upsert(ingredient).await?;
            print_pantry(&pantry);
        }
        Commands::Remove { id } => {
            pantry.load().await?;
            pantry.remove(id).await?;
            println!("removed ingredient {id}");
        }
        Commands::Cook { ids } => {
            pantry.load().await?;
            for id in ids {
                if pantry.toggle_selection(id)? == SelectionChange::AtCapacity {
                    eprintln!("{CAPACITY_WARNING}");
                }
            }
            let names = pantry.start_cooking()?;
            let found = orchestrator.recommend(&names).await?;
            print_candidates(&found);
            pantry.leave();
        }
        Commands::Recommend { names } => {
            let found = orchestrator.recommend(&names).await?;
            print_candidates(&found);
        }
        Commands::Save { video_url } => {
            let candidate = CandidateRecipe {
                thumbnail_url: thumbnail_for(&video_url),
                source_url: video_url,
                title: String::new(),
            };
            let recipe = orchestrator.promote(&candidate).await?;
            print_recipe(&recipe);
        }
        Commands::Liked => {
            for recipe in orchestrator.liked_recipes().await? {
                println!("#{} {}  {}", recipe.id, recipe.title, recipe.source_url);
            }
        }
        Commands::Star { id } => {
            let starred = orchestrator.toggle_bookmark(id).await?;
            println!("recipe {id} {}", if starred { "bookmarked" } else { "unbookmarked" });
        }
        Commands::Show { id } => {
            print_recipe(&orchestrator.recipe(id).await?);
        }
    }

    Ok(())
}

fn load_reference_data(path: Option<&Path>) -> Result<ReferenceData> {
    let Some(path) = path else {
        return Ok(ReferenceData::builtin());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read reference data from {}", path.display()))?;
    let data = ReferenceData::from_json_str(&raw)
        .with_context(|| format!("invalid reference data in {}", path.display()))?;
    tracing::info!(path = %path.display(), "reference data loaded");
    Ok(data)
}

fn print_pantry<S>(pantry: &Pantry<S>)
where
    S: fridgechef_pantry::IngredientStore,
{
    let today = pantry.session().today();
    for group in pantry.group() {
        println!("{}", group.label);
        for item in group.items {
            println!("  {}", describe(item, today));
        }
    }

    let soon = pantry.expiring_within(today, EXPIRY_WARNING_DAYS);
    if !soon.is_empty() {
        println!("\nexpiring soon:");
        for item in soon {
            println!("  {}", describe(item, today));
        }
    }
}

fn describe(item: &Ingredient, today: NaiveDate) -> String {
    let id = item.id.map(|id| id.to_string()).unwrap_or_default();
    let frozen = if item.is_frozen { " (frozen)" } else { "" };
    match (item.expire_date, item.days_until_expiry(today)) {
        (Some(expire), Some(_)) if item.is_expired(today) => {
            format!("#{id} {}{frozen}  expired {expire}", item.name)
        }
        (Some(expire), Some(left)) => format!("#{id} {}{frozen}  until {expire} ({left}d)", item.name),
        _ => format!("#{id} {}{frozen}", item.name),
    }
}

fn print_candidates(found: &[EnrichedCandidate]) {
    if found.is_empty() {
        println!("no recipes found");
        return;
    }
    for item in found {
        println!("{}  {}", item.candidate.title, item.candidate.source_url);
        if item.is_degraded() {
            println!("  (details unavailable)");
            continue;
        }
        print_lines("ingredients", &item.details.ingredients);
        print_lines("seasonings", &item.details.seasonings);
    }
}

fn print_recipe(recipe: &PersistedRecipe) {
    let star = if recipe.is_starred { " *" } else { "" };
    println!("#{} {}{star}", recipe.id, recipe.title);
    if !recipe.details.subtitle.is_empty() {
        println!("{}", recipe.details.subtitle);
    }
    println!("{}", recipe.source_url);
    print_lines("ingredients", &recipe.details.ingredients);
    print_lines("seasonings", &recipe.details.seasonings);
    for (n, step) in recipe.details.steps.iter().enumerate() {
        println!("  {}. {step}", n + 1);
    }
}

fn print_lines(heading: &str, lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    println!("  {heading}:");
    for line in lines {
        match split_quantity(line) {
            (name, "") => println!("    {name}"),
            (name, qty) => println!("    {name:<16} {qty}"),
        }
    }
}
