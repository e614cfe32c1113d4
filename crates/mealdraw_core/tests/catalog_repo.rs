use mealdraw_core::db::open_db_in_memory;
use mealdraw_core::{
    CatalogRepository, DailyTip, Recipe, RecipeOrder, RecipeService, RepoError, Restaurant, Sport,
    SqliteCatalogRepository, TagField,
};

#[test]
fn recipe_upsert_round_trips_all_columns() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::new(&conn);

    let mut recipe = Recipe::new(7, "Tofu Bowl", TagField::list(["Lunch", "高蛋白"]));
    recipe.description = "Quick bowl".to_string();
    recipe.duration_min = Some(15);
    recipe.calories = Some(420);
    recipe.ingredients = vec!["tofu".to_string(), "rice".to_string()];
    recipe.instructions = vec!["Cook rice".to_string(), "Fry tofu".to_string()];
    recipe.image_url = Some("bowls/tofu.jpg".to_string());
    repo.upsert_recipe(&recipe).unwrap();

    let loaded = repo.get_recipe(7).unwrap().unwrap();
    assert_eq!(loaded, recipe);
    assert!(repo.get_recipe(8).unwrap().is_none());
}

#[test]
fn legacy_tag_strings_are_kept_raw_and_normalized_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO recipes (id, title, tags) VALUES (1, 'Soup', '{Dinner,\"Low Fat\"}');",
        [],
    )
    .unwrap();
    let repo = SqliteCatalogRepository::new(&conn);

    let recipe = repo.get_recipe(1).unwrap().unwrap();
    assert_eq!(
        recipe.tags,
        TagField::Text("{Dinner,\"Low Fat\"}".to_string())
    );
    assert_eq!(recipe.tags.normalized(), vec!["dinner", "low fat"]);
}

#[test]
fn list_recipes_honors_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::new(&conn);
    for id in [2, 3, 1] {
        repo.upsert_recipe(&Recipe::new(id, format!("r{id}"), TagField::default()))
            .unwrap();
    }

    let asc: Vec<i64> = repo
        .list_recipes(RecipeOrder::IdAsc)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    let desc: Vec<i64> = repo
        .list_recipes(RecipeOrder::IdDesc)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(asc, vec![1, 2, 3]);
    assert_eq!(desc, vec![3, 2, 1]);
}

#[test]
fn upsert_overwrites_existing_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::new(&conn);
    repo.upsert_recipe(&Recipe::new(1, "Old", TagField::default()))
        .unwrap();
    repo.upsert_recipe(&Recipe::new(1, "New", TagField::list(["snack"])))
        .unwrap();

    let recipes = repo.list_recipes(RecipeOrder::IdAsc).unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].title, "New");
}

#[test]
fn corrupt_ingredient_json_is_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO recipes (id, title, ingredients) VALUES (4, 'Broken', 'not json');",
        [],
    )
    .unwrap();
    let repo = SqliteCatalogRepository::new(&conn);

    let err = repo.get_recipe(4).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn numbered_instruction_text_is_split_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO recipes (id, title, instructions) VALUES (5, 'Soup', '1. Boil water 2. Add tofu');",
        [],
    )
    .unwrap();
    let repo = SqliteCatalogRepository::new(&conn);

    let recipe = repo.get_recipe(5).unwrap().unwrap();
    assert_eq!(recipe.instructions, vec!["Boil water", "Add tofu"]);
}

#[test]
fn restaurants_sports_and_tips_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::new(&conn);

    let mut restaurant = Restaurant::new(
        1,
        "Green Box",
        TagField::list(["西屯區"]),
        TagField::Text("{沙拉}".to_string()),
    );
    restaurant.rating = Some(4.5);
    repo.upsert_restaurant(&restaurant).unwrap();

    let mut sport = Sport::new(1, "Plank", TagField::list(["中"]));
    sport.duration = Some("5 分鐘".to_string());
    repo.upsert_sport(&sport).unwrap();

    repo.upsert_daily_tip(&DailyTip {
        id: 1,
        content: "Drink water".to_string(),
        category: Some("habit".to_string()),
    })
    .unwrap();

    assert_eq!(repo.list_restaurants().unwrap(), vec![restaurant]);
    assert_eq!(repo.list_sports().unwrap(), vec![sport]);
    assert_eq!(repo.list_daily_tips().unwrap().len(), 1);
}

#[test]
fn recipe_service_lists_newest_first_and_searches() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::new(&conn);
    repo.upsert_recipe(&Recipe::new(1, "Green Salad", TagField::list(["lunch"])))
        .unwrap();
    repo.upsert_recipe(&Recipe::new(2, "Oat Porridge", TagField::list(["Breakfast"])))
        .unwrap();
    repo.upsert_recipe(&Recipe::new(3, "Egg Toast", TagField::list(["breakfast"])))
        .unwrap();

    let service = RecipeService::new(SqliteCatalogRepository::new(&conn));
    let all = service.list_recipes(None).unwrap();
    assert_eq!(
        all.items.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![3, 2, 1]
    );
    assert!(all.search_term.is_none());

    let found = service.list_recipes(Some("  BREAKFAST ")).unwrap();
    assert_eq!(found.search_term.as_deref(), Some("breakfast"));
    assert_eq!(
        found.items.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![3, 2]
    );

    let err = service.get_recipe(99).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { table: "recipes", .. }));
}
