// Animal category inference from a free-text product name.
//
// Case-insensitive substring match against an ordered keyword table;
// the first matching category wins, so the table order is part of the
// contract.

/// The nine animal categories an ad can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimalCategory {
    Chickens,
    Cattle,
    Pigs,
    GoatsAndSheep,
    Fish,
    Rabbits,
    Ducks,
    Horses,
    FarmAnimals,
}

impl AnimalCategory {
    /// Human-readable label used in image prompts and API responses
    pub fn label(self) -> &'static str {
        match self {
            AnimalCategory::Chickens => "chickens",
            AnimalCategory::Cattle => "cattle",
            AnimalCategory::Pigs => "pigs",
            AnimalCategory::GoatsAndSheep => "goats and sheep",
            AnimalCategory::Fish => "fish",
            AnimalCategory::Rabbits => "rabbits",
            AnimalCategory::Ducks => "ducks",
            AnimalCategory::Horses => "horses",
            AnimalCategory::FarmAnimals => "farm animals",
        }
    }
}

/// Ordered keyword table; earlier rows take precedence.
static KEYWORD_TABLE: &[(&[&str], AnimalCategory)] = &[
    (
        &["chicken", "poultry", "layer", "broiler", "chick"],
        AnimalCategory::Chickens,
    ),
    (&["cattle", "cow", "dairy", "beef"], AnimalCategory::Cattle),
    (&["pig", "swine", "pork"], AnimalCategory::Pigs),
    (&["goat", "sheep", "lamb"], AnimalCategory::GoatsAndSheep),
    (&["fish", "aqua"], AnimalCategory::Fish),
    (&["rabbit"], AnimalCategory::Rabbits),
    (&["duck", "goose"], AnimalCategory::Ducks),
    (&["horse"], AnimalCategory::Horses),
];

/// Classify a product name into an [`AnimalCategory`].
///
/// Pure and total: unmatched names fall back to `FarmAnimals`.
pub fn classify(product_name: &str) -> AnimalCategory {
    let lower = product_name.to_lowercase();
    for (keywords, category) in KEYWORD_TABLE {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *category;
        }
    }
    AnimalCategory::FarmAnimals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_keywords() {
        assert_eq!(classify("dairy cow feed"), AnimalCategory::Cattle);
        assert_eq!(classify("layer mash"), AnimalCategory::Chickens);
        assert_eq!(classify("Premium Swine Grower"), AnimalCategory::Pigs);
        assert_eq!(classify("lamb finisher pellets"), AnimalCategory::GoatsAndSheep);
        assert_eq!(classify("aquafeed starter"), AnimalCategory::Fish);
        assert_eq!(classify("rabbit pellets"), AnimalCategory::Rabbits);
        assert_eq!(classify("goose grower"), AnimalCategory::Ducks);
        assert_eq!(classify("horse supplement"), AnimalCategory::Horses);
    }

    #[test]
    fn unmatched_names_default_to_farm_animals() {
        assert_eq!(classify("xyz123"), AnimalCategory::FarmAnimals);
        assert_eq!(classify(""), AnimalCategory::FarmAnimals);
    }

    #[test]
    fn table_order_decides_ties() {
        // "chicken" appears before "cow" in the table, so a name
        // containing both resolves to chickens.
        assert_eq!(classify("chicken and cow blend"), AnimalCategory::Chickens);
        // "dairy" (cattle row) outranks "goat" (later row).
        assert_eq!(classify("dairy goat mix"), AnimalCategory::Cattle);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("BROILER Finisher"), AnimalCategory::Chickens);
        assert_eq!(classify("BeEf BoOsTeR"), AnimalCategory::Cattle);
    }

    #[test]
    fn classification_is_deterministic() {
        let first = classify("dairy cow feed");
        let second = classify("dairy cow feed");
        assert_eq!(first, second);
    }
}
