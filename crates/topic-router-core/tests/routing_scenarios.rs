//! End-to-end routing scenarios: raw text in, routing decision out.

use topic_router_core::config::RouterSettings;
use topic_router_core::{
    classify, compile, decide, Category, CompiledCatalog, CompiledCategory, ConfigurationError,
    DestinationId, RouteDecision,
};

fn housing() -> Category {
    Category::new("Housing", 5, ["uy", "ijara"])
}

fn work() -> Category {
    Category::new("Work", 6, ["ish"])
}

fn general() -> Category {
    Category::new("General", 1, Vec::<String>::new()).as_fallback()
}

fn name(category: Option<&CompiledCategory>) -> Option<&str> {
    category.map(CompiledCategory::name)
}

fn assert_relocate(decision: RouteDecision<'_>, expected_name: &str, expected: i32) {
    match decision {
        RouteDecision::Relocate {
            category,
            destination,
        } => {
            assert_eq!(category.name(), expected_name);
            assert_eq!(destination, DestinationId(expected));
        }
        RouteDecision::Silent => panic!("expected relocation to {expected_name}"),
    }
}

#[test]
fn housing_message_outside_any_topic_is_relocated() -> Result<(), ConfigurationError> {
    let catalog = compile(&[housing(), work(), general()])?;

    let category = classify("Ijara kvartira kerak", &catalog);
    assert_eq!(name(category), Some("Housing"));
    assert_relocate(decide(category, None), "Housing", 5);
    Ok(())
}

#[test]
fn work_message_in_work_topic_stays_silent() -> Result<(), ConfigurationError> {
    let catalog = compile(&[housing(), work(), general()])?;

    let category = classify("ish bor", &catalog);
    assert_eq!(name(category), Some("Work"));
    assert_eq!(decide(category, Some(DestinationId(6))), RouteDecision::Silent);
    Ok(())
}

#[test]
fn unmatched_message_without_fallback_is_silent() -> Result<(), ConfigurationError> {
    let catalog = compile(&[housing(), work()])?;

    let category = classify("salom qandaysiz", &catalog);
    assert_eq!(category, None);
    assert_eq!(decide(category, None), RouteDecision::Silent);
    Ok(())
}

#[test]
fn unmatched_message_with_fallback() -> Result<(), ConfigurationError> {
    let catalog = compile(&[housing(), work(), general()])?;

    let category = classify("salom qandaysiz", &catalog);
    assert_eq!(name(category), Some("General"));
    assert_relocate(decide(category, Some(DestinationId(5))), "General", 1);
    assert_relocate(decide(category, None), "General", 1);
    assert_eq!(decide(category, Some(DestinationId(1))), RouteDecision::Silent);
    Ok(())
}

#[test]
fn phrase_match_wins_over_earlier_category_token() -> Result<(), ConfigurationError> {
    let catalog = compile(&[
        housing(),
        Category::new("Work", 6, ["ish bor"]),
        general(),
    ])?;

    let category = classify("uy yaqinida ish bor", &catalog);
    assert_eq!(name(category), Some("Work"));
    Ok(())
}

#[test]
fn relocation_is_idempotent() -> Result<(), ConfigurationError> {
    let catalog: CompiledCatalog = compile(&[housing(), work()])?;
    let category = classify("uy kerak", &catalog);

    let first = decide(category, None);
    let RouteDecision::Relocate { destination, .. } = first else {
        panic!("expected relocation");
    };

    // Once the copy lives in its destination, routing it again does nothing
    assert_eq!(decide(category, Some(destination)), RouteDecision::Silent);
    assert_eq!(decide(category, Some(destination)), RouteDecision::Silent);
    Ok(())
}

#[test]
fn duplicate_destination_is_a_configuration_error() {
    let result = compile(&[housing(), Category::new("Work", 5, ["ish"])]);
    assert!(matches!(
        result,
        Err(ConfigurationError::DuplicateDestination { .. })
    ));
}

#[test]
fn mixed_script_catalog() -> Result<(), ConfigurationError> {
    let catalog = compile(&[
        Category::new("Housing", 5, ["квартира", "ijara"]),
        Category::new("Work", 6, ["работа"]),
    ])?;

    assert_eq!(name(classify("Нужна КВАРТИРА срочно", &catalog)), Some("Housing"));
    assert_eq!(name(classify("Есть РАБОТА?", &catalog)), Some("Work"));
    Ok(())
}

fn builtin_catalog() -> Result<CompiledCatalog, ConfigurationError> {
    let resolved = RouterSettings::default().resolve_categories_with(|env| match env {
        "TOPIC_IJARA_ID" => Some("5".to_string()),
        "TOPIC_ISH_ID" => Some("6".to_string()),
        "TOPIC_UMUMIY_ID" => Some("1".to_string()),
        _ => None,
    });
    compile(&resolved.categories)
}

#[test]
fn builtin_catalog_ignores_chatter_in_topics() -> Result<(), ConfigurationError> {
    let catalog = builtin_catalog()?;
    assert!(catalog.fallback().is_none());

    for (text, topic) in [("rahmat aka", 5), ("ok", 6), ("salom qandaysiz", 1)] {
        let category = classify(text, &catalog);
        assert_eq!(name(category), None, "{text:?} should not match");
        assert!(decide(category, Some(DestinationId(topic))).is_silent());
    }
    Ok(())
}

#[test]
fn builtin_catalog_still_routes_keywords() -> Result<(), ConfigurationError> {
    let catalog = builtin_catalog()?;
    let category = classify("Kvartira ijaraga kerak", &catalog);
    assert_relocate(decide(category, Some(DestinationId(6))), "🏠 Uy-joy & Ijara", 5);
    Ok(())
}
