use std::io::Write;

use cafely_core::{rank_drinks, DrinkCatalog, PreferenceSet, QuestionKey, MAX_RECOMMENDATIONS};
use clap::Args;

/// Preferences for the `recommend` subcommand. Omitted flags stay unanswered.
#[derive(Debug, Args, Default)]
pub struct RecommendArgs {
    #[arg(long, ignore_case = true, value_parser = ["High", "Medium", "Low", "None"])]
    pub caffeine: Option<String>,
    #[arg(long, ignore_case = true, value_parser = ["Hot", "Cold", "Either"])]
    pub temp: Option<String>,
    #[arg(long)]
    pub flavor: Option<String>,
    #[arg(long, ignore_case = true, value_parser = ["Light", "Medium", "Strong"])]
    pub strength: Option<String>,
    #[arg(long, ignore_case = true, value_parser = ["Coffee", "Non-coffee"])]
    pub category: Option<String>,
}

impl RecommendArgs {
    pub(crate) fn to_preferences(&self) -> PreferenceSet {
        let mut preferences = PreferenceSet::new();
        let answers = [
            (QuestionKey::Caffeine, &self.caffeine),
            (QuestionKey::Temp, &self.temp),
            (QuestionKey::Flavor, &self.flavor),
            (QuestionKey::Strength, &self.strength),
            (QuestionKey::Category, &self.category),
        ];
        for (key, value) in answers {
            if let Some(value) = value {
                preferences.set(key, value.as_str());
            }
        }
        preferences
    }
}

/// Prints up to three ranked drinks with their match scores.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub(crate) fn run_recommend<W: Write>(
    catalog: &DrinkCatalog,
    args: &RecommendArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    let preferences = args.to_preferences();
    write_recommendations(catalog, &preferences, out)
}

pub(crate) fn write_recommendations<W: Write>(
    catalog: &DrinkCatalog,
    preferences: &PreferenceSet,
    out: &mut W,
) -> anyhow::Result<()> {
    let ranked = rank_drinks(catalog.drinks(), preferences);
    if ranked.is_empty() {
        writeln!(out, "No matching drinks. Try loosening a preference.")?;
        return Ok(());
    }

    let answered = preferences.answered_count();
    for (position, scored) in ranked.iter().take(MAX_RECOMMENDATIONS).enumerate() {
        writeln!(
            out,
            "{}. {} ({}/{answered} matched)",
            position + 1,
            scored.drink.name,
            scored.score
        )?;
    }
    Ok(())
}
