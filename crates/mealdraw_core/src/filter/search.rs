//! Keyword search over recipe titles and tags.

use crate::model::catalog::Recipe;

/// Returns recipes whose title or any normalized tag contains `term`.
///
/// Matching is case-insensitive. A blank term returns every recipe.
pub fn search_recipes<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return recipes.iter().collect();
    }
    recipes
        .iter()
        .filter(|recipe| {
            recipe.title.to_lowercase().contains(&needle)
                || recipe
                    .tags
                    .normalized()
                    .iter()
                    .any(|tag| tag.contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::search_recipes;
    use crate::model::catalog::Recipe;
    use crate::model::tags::TagField;

    #[test]
    fn matches_title_or_tag_substring() {
        let recipes = vec![
            Recipe::new(1, "Avocado Toast", TagField::list(["breakfast"])),
            Recipe::new(2, "Chicken Bowl", TagField::Text("{High-Protein,lunch}".into())),
            Recipe::new(3, "Fruit Cup", TagField::default()),
        ];
        let by_title: Vec<i64> = search_recipes(&recipes, " toast ").iter().map(|r| r.id).collect();
        assert_eq!(by_title, vec![1]);
        let by_tag: Vec<i64> = search_recipes(&recipes, "PROTEIN").iter().map(|r| r.id).collect();
        assert_eq!(by_tag, vec![2]);
        assert_eq!(search_recipes(&recipes, "").len(), 3);
        assert!(search_recipes(&recipes, "pizza").is_empty());
    }
}
