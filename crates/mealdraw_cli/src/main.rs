//! Command-line front end for the MealDraw core.
//!
//! # Responsibility
//! - Map subcommands onto core services over one SQLite connection.
//! - Print results as plain text; failures exit non-zero with a message.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use log::{error, info};
use mealdraw_core::filter::facets::{
    options_for, recipe_filters, restaurant_filters, sport_filters, GROUP_ALLERGEN, GROUP_DIET,
    GROUP_GOAL, GROUP_INTENSITY, GROUP_LOCATION, GROUP_MEAL, GROUP_TYPE,
};
use mealdraw_core::model::tags::card_labels;
use mealdraw_core::{
    import_catalog_file, init_from_config, open_db, recipe_filters_for, AppConfig, CatalogId,
    Connection, DrawOutcome, DrawService, FavoriteService, FilterSet, HomeService,
    ProfileService, Recipe, RecipeDrawRequest, RecipeService, Restaurant, Sport,
    SqliteCatalogRepository, SqliteFavoriteRepository, SqliteProfileRepository, UserId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "mealdraw", author, version, about)]
struct Cli {
    /// Optional TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database path; overrides config and environment.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a JSON catalog document.
    Import { file: PathBuf },
    /// List recipes, newest first.
    Recipes {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one recipe in full.
    Recipe { id: CatalogId },
    /// Draw a random recipe, restaurant or exercise.
    #[command(subcommand)]
    Draw(DrawCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Favorite(FavoriteCommand),
    /// Recipe of the day and health tips.
    Home {
        /// Day to show, as YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// How many tips to print from the carousel.
        #[arg(long, default_value_t = 1)]
        tips: usize,
    },
    /// Print the known values of a filter group.
    Options { group: String },
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// Fixed seed for a repeatable draw.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum DrawCommand {
    Recipe {
        #[arg(long)]
        meal: Option<String>,
        #[arg(long = "goal")]
        goals: Vec<String>,
        #[arg(long)]
        diet: Option<String>,
        #[arg(long = "allergen")]
        allergens: Vec<String>,
        /// Keep only recipes whose title or tags contain this term.
        #[arg(long)]
        search: Option<String>,
        /// Start from this user's saved profile.
        #[arg(long)]
        user: Option<UserId>,
        #[command(flatten)]
        draw: DrawArgs,
    },
    Restaurant {
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
        #[command(flatten)]
        draw: DrawArgs,
    },
    Sport {
        #[arg(long = "intensity")]
        intensities: Vec<String>,
        #[command(flatten)]
        draw: DrawArgs,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show {
        #[arg(long)]
        user: UserId,
    },
    /// Replace profile fields; omitted fields keep their stored value.
    Set {
        #[arg(long)]
        user: UserId,
        #[arg(long)]
        diet: Option<String>,
        #[arg(long = "goal")]
        goals: Option<Vec<String>>,
        #[arg(long = "allergen")]
        allergens: Option<Vec<String>>,
    },
    /// Flip one goal or allergen.
    Toggle {
        #[arg(long)]
        user: UserId,
        #[arg(long, conflicts_with = "allergen", required_unless_present = "allergen")]
        goal: Option<String>,
        #[arg(long)]
        allergen: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum FavoriteCommand {
    Toggle {
        #[arg(long)]
        user: UserId,
        recipe_id: CatalogId,
    },
    Status {
        #[arg(long)]
        user: UserId,
        recipe_id: CatalogId,
    },
    List {
        #[arg(long)]
        user: UserId,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_exit module=cli status=error error={message}");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = AppConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    if let Some(db) = cli.db {
        config.override_db_path(db);
    }
    if let Err(err) = init_from_config(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let mut conn = open_db(&config.db_path).map_err(|err| err.to_string())?;

    match cli.command {
        Command::Import { file } => {
            let summary = import_catalog_file(&mut conn, &file).map_err(|err| err.to_string())?;
            println!(
                "imported {} records (recipes={} restaurants={} sports={} daily_tips={})",
                summary.total(),
                summary.recipes,
                summary.restaurants,
                summary.sports,
                summary.daily_tips
            );
        }
        Command::Recipes { search } => {
            let service = RecipeService::new(SqliteCatalogRepository::new(&conn));
            let result = service
                .list_recipes(search.as_deref())
                .map_err(|err| err.to_string())?;
            if let Some(term) = &result.search_term {
                println!("search \"{term}\": {} recipe(s)", result.items.len());
            }
            for recipe in &result.items {
                print_recipe_card(recipe);
            }
        }
        Command::Recipe { id } => {
            let service = RecipeService::new(SqliteCatalogRepository::new(&conn));
            let recipe = service.get_recipe(id).map_err(|err| err.to_string())?;
            print_recipe_detail(&recipe);
        }
        Command::Draw(command) => run_draw(&conn, command)?,
        Command::Profile(command) => run_profile(&conn, command)?,
        Command::Favorite(command) => run_favorite(&conn, command)?,
        Command::Home { date, tips } => {
            let service = HomeService::new(SqliteCatalogRepository::new(&conn));
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            let mut view = service.home(date).map_err(|err| err.to_string())?;
            println!("{date}");
            match &view.daily_recipe {
                Some(recipe) => {
                    println!("recipe of the day:");
                    print_recipe_card(recipe);
                }
                None => println!("recipe of the day: (catalog is empty)"),
            }
            for _ in 0..tips.min(view.tips.len()) {
                if let Some(tip) = view.tips.current() {
                    println!("tip: {}", tip.content);
                }
                view.tips.advance();
            }
        }
        Command::Options { group } => {
            let options =
                options_for(&group).ok_or_else(|| format!("unknown filter group `{group}`"))?;
            for option in options {
                println!("{option}");
            }
        }
    }
    Ok(())
}

fn run_draw(conn: &Connection, command: DrawCommand) -> Result<(), String> {
    let service = DrawService::new(SqliteCatalogRepository::new(conn));
    match command {
        DrawCommand::Recipe {
            meal,
            goals,
            diet,
            allergens,
            search,
            user,
            draw,
        } => {
            let mut filters = match user {
                Some(user_id) => {
                    let profiles = ProfileService::new(SqliteProfileRepository::new(conn));
                    let profile = profiles
                        .load_profile(user_id)
                        .map_err(|err| err.to_string())?;
                    recipe_filters_for(&profile).map_err(|err| err.to_string())?
                }
                None => recipe_filters(),
            };
            apply_single(&mut filters, GROUP_MEAL, meal)?;
            apply_single(&mut filters, GROUP_DIET, diet)?;
            apply_multi(&mut filters, GROUP_GOAL, &goals)?;
            apply_multi(&mut filters, GROUP_ALLERGEN, &allergens)?;

            let mut request = RecipeDrawRequest::new(filters);
            if let Some(term) = search {
                request = request.with_search(term);
            }
            let outcome = service
                .draw_recipe(&request, &mut rng_for(&draw))
                .map_err(|err| err.to_string())?;
            print_outcome(&outcome, print_recipe_card);
        }
        DrawCommand::Restaurant {
            location,
            kind,
            draw,
        } => {
            let mut filters = restaurant_filters();
            apply_single(&mut filters, GROUP_LOCATION, location)?;
            apply_single(&mut filters, GROUP_TYPE, kind)?;
            let outcome = service
                .draw_restaurant(&filters, &mut rng_for(&draw))
                .map_err(|err| err.to_string())?;
            print_outcome(&outcome, print_restaurant);
        }
        DrawCommand::Sport { intensities, draw } => {
            let mut filters = sport_filters();
            apply_multi(&mut filters, GROUP_INTENSITY, &intensities)?;
            let outcome = service
                .draw_sport(&filters, &mut rng_for(&draw))
                .map_err(|err| err.to_string())?;
            print_outcome(&outcome, print_sport);
        }
    }
    Ok(())
}

fn run_profile(conn: &Connection, command: ProfileCommand) -> Result<(), String> {
    let service = ProfileService::new(SqliteProfileRepository::new(conn));
    let profile = match command {
        ProfileCommand::Show { user } => service.load_profile(user),
        ProfileCommand::Set {
            user,
            diet,
            goals,
            allergens,
        } => service.update_profile(user, |profile| {
            if let Some(diet) = diet {
                profile.set_dietary_habit(&diet);
            }
            if let Some(goals) = goals {
                profile.health_goals = goals;
            }
            if let Some(allergens) = allergens {
                profile.allergens = allergens;
            }
        }),
        ProfileCommand::Toggle {
            user,
            goal,
            allergen,
        } => service.update_profile(user, |profile| {
            if let Some(goal) = goal {
                profile.toggle_goal(&goal);
            }
            if let Some(allergen) = allergen {
                profile.toggle_allergen(&allergen);
            }
        }),
    }
    .map_err(|err| err.to_string())?;

    println!("user: {}", profile.user_id);
    println!("diet: {}", profile.dietary_habit);
    println!("goals: {}", profile.health_goals.join(", "));
    println!("allergens: {}", profile.allergens.join(", "));
    Ok(())
}

fn run_favorite(conn: &Connection, command: FavoriteCommand) -> Result<(), String> {
    let service = FavoriteService::new(SqliteFavoriteRepository::new(conn));
    match command {
        FavoriteCommand::Toggle { user, recipe_id } => {
            let now = service
                .toggle_favorite(user, recipe_id)
                .map_err(|err| err.to_string())?;
            println!(
                "recipe {recipe_id} {}",
                if now { "added to favorites" } else { "removed from favorites" }
            );
        }
        FavoriteCommand::Status { user, recipe_id } => {
            let is_favorite = service
                .is_favorite(user, recipe_id)
                .map_err(|err| err.to_string())?;
            println!("{is_favorite}");
        }
        FavoriteCommand::List { user } => {
            let recipes = service.list_favorites(user).map_err(|err| err.to_string())?;
            if recipes.is_empty() {
                println!("no favorites yet");
            }
            for recipe in &recipes {
                print_recipe_card(recipe);
            }
        }
    }
    Ok(())
}

fn apply_single(filters: &mut FilterSet, group: &str, value: Option<String>) -> Result<(), String> {
    match value {
        Some(value) => filters
            .set_values(group, [value])
            .map_err(|err| err.to_string()),
        None => Ok(()),
    }
}

/// Replaces a multi-select group when at least one value was passed.
fn apply_multi(filters: &mut FilterSet, group: &str, values: &[String]) -> Result<(), String> {
    if values.is_empty() {
        return Ok(());
    }
    filters
        .set_values(group, values)
        .map_err(|err| err.to_string())
}

fn rng_for(args: &DrawArgs) -> StdRng {
    match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_outcome<T>(outcome: &DrawOutcome<T>, print_item: fn(&T)) {
    match outcome {
        DrawOutcome::Picked { item, eligible } => {
            println!("drawn from {eligible} match(es):");
            print_item(item);
        }
        DrawOutcome::NoMatch { catalog_size } => {
            println!("no match among {catalog_size} record(s); try loosening the filters");
        }
    }
}

fn print_recipe_card(recipe: &Recipe) {
    let labels = card_labels(&recipe.tags, 3);
    if labels.is_empty() {
        println!("  #{} {}", recipe.id, recipe.title);
    } else {
        println!("  #{} {} [{}]", recipe.id, recipe.title, labels.join(", "));
    }
}

fn print_recipe_detail(recipe: &Recipe) {
    println!("#{} {}", recipe.id, recipe.title);
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    println!("tags: {}", recipe.tags.display_tags().join(", "));
    if let Some(minutes) = recipe.duration_min {
        println!("duration: {minutes} min");
    }
    if let Some(calories) = recipe.calories {
        println!("calories: {calories} kcal");
    }
    if !recipe.ingredients.is_empty() {
        println!("ingredients:");
        for ingredient in &recipe.ingredients {
            println!("  - {ingredient}");
        }
    }
    for (step, instruction) in recipe.instructions.iter().enumerate() {
        println!("{}. {instruction}", step + 1);
    }
}

fn print_restaurant(restaurant: &Restaurant) {
    println!(
        "  #{} {} ({} / {})",
        restaurant.id,
        restaurant.name,
        restaurant.location.display_tags().join(", "),
        restaurant.kind.display_tags().join(", ")
    );
    if let Some(rating) = restaurant.rating {
        println!("  rating: {rating:.1}");
    }
    if let Some(address) = &restaurant.address {
        println!("  address: {address}");
    }
    if let Some(map_url) = &restaurant.map_url {
        println!("  map: {map_url}");
    }
}

fn print_sport(sport: &Sport) {
    println!(
        "  #{} {} [{}]",
        sport.id,
        sport.name,
        sport.intensity.display_tags().join(", ")
    );
    if let Some(duration) = &sport.duration {
        println!("  duration: {duration}");
    }
    if let Some(instruction) = &sport.instruction {
        println!("  {instruction}");
    }
}
