use super::*;

fn drink(name: &str, caffeine_mg: Option<f64>, temp: &str, flavor: &str, strength: &str) -> Drink {
    Drink {
        name: name.to_owned(),
        caffeine: None,
        caffeine_mg,
        temp: temp.to_owned(),
        flavor: flavor.to_owned(),
        strength: strength.to_owned(),
        category: "Coffee".to_owned(),
    }
}

fn prefs(pairs: &[(QuestionKey, &str)]) -> PreferenceSet {
    let mut set = PreferenceSet::new();
    for (key, value) in pairs {
        set.set(*key, *value);
    }
    set
}

// -----------------------------------------------------------------------
// score_drink
// -----------------------------------------------------------------------

#[test]
fn drink_matching_every_field_scores_five() {
    let latte = drink("Latte", Some(77.0), "Hot", "Creamy", "Medium");
    let all = prefs(&[
        (QuestionKey::Caffeine, "Medium"),
        (QuestionKey::Temp, "Hot"),
        (QuestionKey::Flavor, "Creamy"),
        (QuestionKey::Strength, "Medium"),
        (QuestionKey::Category, "Coffee"),
    ]);
    assert_eq!(score_drink(&latte, &all), 5);
}

#[test]
fn drink_matching_nothing_scores_zero_and_is_excluded() {
    let espresso = drink("Espresso", Some(128.0), "Hot", "Bitter", "Strong");
    let other = prefs(&[
        (QuestionKey::Caffeine, "Low"),
        (QuestionKey::Temp, "Cold"),
        (QuestionKey::Flavor, "Fruity"),
        (QuestionKey::Strength, "Light"),
        (QuestionKey::Category, "Non-coffee"),
    ]);
    assert_eq!(score_drink(&espresso, &other), 0);
    assert!(recommend_drinks(std::slice::from_ref(&espresso), &other).is_empty());
}

#[test]
fn matching_ignores_case_and_surrounding_whitespace() {
    let mut mocha = drink("Mocha", Some(95.0), " HOT ", "chocolatey ", "Medium");
    mocha.category = "  coffee".to_owned();
    let answers = prefs(&[
        (QuestionKey::Temp, "hot"),
        (QuestionKey::Flavor, "Chocolatey"),
        (QuestionKey::Category, "COFFEE"),
    ]);
    assert_eq!(score_drink(&mocha, &answers), 3);
}

#[test]
fn either_temperature_matches_any_drink_temperature() {
    let either = prefs(&[(QuestionKey::Temp, "Either")]);
    for temp in ["Hot", "Cold", "Either", ""] {
        let d = drink("Any", None, temp, "", "");
        assert_eq!(score_drink(&d, &either), 1, "temp {temp:?} should match Either");
    }
}

#[test]
fn zero_milligrams_matches_no_caffeine() {
    let decaf = drink("Decaf", Some(0.0), "Hot", "Sweet", "Light");
    assert_eq!(score_drink(&decaf, &prefs(&[(QuestionKey::Caffeine, "None")])), 1);
    assert_eq!(score_drink(&decaf, &prefs(&[(QuestionKey::Caffeine, "Low")])), 0);
}

#[test]
fn fifty_milligrams_is_medium_only() {
    let chai = drink("Chai", Some(50.0), "Hot", "Spicy", "Medium");
    assert_eq!(score_drink(&chai, &prefs(&[(QuestionKey::Caffeine, "Medium")])), 1);
    assert_eq!(score_drink(&chai, &prefs(&[(QuestionKey::Caffeine, "Low")])), 0);
    assert_eq!(score_drink(&chai, &prefs(&[(QuestionKey::Caffeine, "High")])), 0);
    assert_eq!(score_drink(&chai, &prefs(&[(QuestionKey::Caffeine, "None")])), 0);
}

#[test]
fn milligram_buckets_have_inclusive_medium_range() {
    let at = |mg: f64| drink("x", Some(mg), "", "", "").caffeine_category().to_owned();
    assert_eq!(at(39.9), "Low");
    assert_eq!(at(40.0), "Medium");
    assert_eq!(at(100.0), "Medium");
    assert_eq!(at(100.5), "High");
}

#[test]
fn stored_category_used_when_milligrams_absent() {
    let mut tea = drink("Black Tea", None, "Hot", "Bitter", "Medium");
    tea.caffeine = Some("High".to_owned());
    assert_eq!(score_drink(&tea, &prefs(&[(QuestionKey::Caffeine, "high")])), 1);
    // Missing milligrams also satisfy a "None" preference.
    assert_eq!(score_drink(&tea, &prefs(&[(QuestionKey::Caffeine, "None")])), 1);
}

#[test]
fn missing_caffeine_data_defaults_to_none() {
    let smoothie = drink("Smoothie", None, "Cold", "Fruity", "Light");
    assert_eq!(smoothie.caffeine_category(), "None");
    assert_eq!(score_drink(&smoothie, &prefs(&[(QuestionKey::Caffeine, "Low")])), 0);
}

// -----------------------------------------------------------------------
// recommend_drinks
// -----------------------------------------------------------------------

#[test]
fn unset_preferences_recommend_nothing() {
    let drinks = vec![
        drink("Espresso", Some(128.0), "Hot", "Bitter", "Strong"),
        drink("Latte", Some(77.0), "Either", "Creamy", "Medium"),
    ];
    assert!(recommend_drinks(&drinks, &PreferenceSet::new()).is_empty());
}

#[test]
fn ties_keep_catalog_order() {
    let drinks = vec![
        drink("A", None, "Hot", "Sweet", "Light"),
        drink("B", None, "Hot", "Sweet", "Light"),
        drink("C", None, "Hot", "Bitter", "Strong"),
        drink("D", None, "Cold", "Bitter", "Strong"),
    ];
    let answers = prefs(&[
        (QuestionKey::Temp, "Hot"),
        (QuestionKey::Flavor, "Sweet"),
        (QuestionKey::Strength, "Light"),
    ]);
    assert_eq!(recommend_drinks(&drinks, &answers), vec!["A", "B", "C"]);
}

#[test]
fn higher_score_outranks_earlier_catalog_position() {
    let drinks = vec![
        drink("First", None, "Hot", "Bitter", "Strong"),
        drink("Second", None, "Hot", "Sweet", "Strong"),
    ];
    let answers = prefs(&[(QuestionKey::Temp, "Hot"), (QuestionKey::Flavor, "Sweet")]);
    let ranked = rank_drinks(&drinks, &answers);
    assert_eq!(ranked[0].drink.name, "Second");
    assert_eq!(ranked[0].score, 2);
    assert_eq!(ranked[1].score, 1);
}

#[test]
fn returns_at_most_three_names() {
    let drinks: Vec<Drink> = (0..6)
        .map(|i| drink(&format!("Drink {i}"), Some(77.0), "Hot", "Creamy", "Medium"))
        .collect();
    let answers = prefs(&[(QuestionKey::Temp, "Hot")]);
    let names = recommend_drinks(&drinks, &answers);
    assert_eq!(names.len(), MAX_RECOMMENDATIONS);
    assert_eq!(names, vec!["Drink 0", "Drink 1", "Drink 2"]);
}
