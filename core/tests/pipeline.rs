// core/tests/pipeline.rs
//
// Integration tests for the synchronous prediction pipeline.
//
// Tests cover:
// - Gate decisions seen end to end (separator, numbers, invalid input)
// - Post-processing (trailing space, capitalization)
// - Forced punctuation replacement, with and without an engine
// - Cache reuse and engine failure handling
// - Configuration push to engines

mod common;

use common::{english, MockEngine, Probe};
use typeahead_core::engine::{ABBREVIATIONS_KEY, SUGGESTIONS_KEY};
use typeahead_core::{
    Config, Coordinator, DictionaryEngine, EngineRegistry, ForceReplace, LanguageProfile,
    Languages, PredictionRequest, SessionKey, TextExpansion,
};

const NBSP: &str = "\u{A0}";

fn request(text: &str) -> PredictionRequest {
    PredictionRequest::new(text, None, "en", SessionKey::new(1, 0))
}

fn spaced(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| format!("{w}{NBSP}")).collect()
}

#[test]
fn test_no_prediction_after_separator_by_default() {
    let (engines, probe) = english(&["store"]);
    let coordinator = Coordinator::new(engines);

    let response = coordinator.run_prediction(&request("I went to the "));
    assert!(response.predictions.is_empty());
    assert_eq!(response.force_replace, None);
    assert_eq!(probe.calls(), 0);
}

#[test]
fn test_completion_gets_trailing_space() {
    let (engines, probe) = english(&["world", "work"]);
    let coordinator = Coordinator::new(engines);

    let response = coordinator.run_prediction(&request("hello wor"));
    assert_eq!(response.predictions, spaced(&["world", "work"]));
    assert!(response.trigger_input_event);
    assert_eq!(probe.contexts(), vec!["hello wor".to_string()]);
}

#[test]
fn test_new_sentence_is_capitalized() {
    let (engines, probe) = english(&["the"]);
    let config = Config {
        min_word_length_to_predict: 0,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    let response = coordinator.run_prediction(&request("Done. "));
    assert_eq!(response.predictions, vec![format!("The{NBSP}")]);
    // Nothing of the finished sentence reaches the engine.
    assert_eq!(probe.contexts(), vec![" ".to_string()]);
}

#[test]
fn test_no_auto_capitalize() {
    let (engines, _probe) = english(&["the"]);
    let config = Config {
        min_word_length_to_predict: 0,
        auto_capitalize: false,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    let response = coordinator.run_prediction(&request("Done. "));
    assert_eq!(response.predictions, spaced(&["the"]));
}

#[test]
fn test_typed_case_is_followed() {
    let (engines, _probe) = english(&["world"]);
    let coordinator = Coordinator::new(engines);

    let shouted = coordinator.run_prediction(&request("HELLO WO"));
    assert_eq!(shouted.predictions, vec![format!("WORLD{NBSP}")]);

    let capitalized = coordinator.run_prediction(&request("hello Wo"));
    assert_eq!(capitalized.predictions, vec![format!("World{NBSP}")]);
}

#[test]
fn test_next_char_suppresses_space() {
    let (engines, _probe) = english(&["world"]);
    let coordinator = Coordinator::new(engines);

    let before_dot = PredictionRequest::new("hello wor", Some('.'), "en", SessionKey::new(1, 0));
    assert_eq!(coordinator.run_prediction(&before_dot).predictions, vec!["world"]);

    let before_space = PredictionRequest::new("hello wor", Some(' '), "en", SessionKey::new(1, 0));
    assert_eq!(coordinator.run_prediction(&before_space).predictions, vec!["world"]);
}

#[test]
fn test_insert_space_disabled() {
    let (engines, _probe) = english(&["world"]);
    let config = Config {
        insert_space_after_autocomplete: false,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    let response = coordinator.run_prediction(&request("hello wor"));
    assert_eq!(response.predictions, vec!["world"]);
    assert!(!response.trigger_input_event);
}

#[test]
fn test_spacing_rule_forces_replacement() {
    let (engines, probe) = english(&["world"]);
    let config = Config {
        apply_spacing_rules: true,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    let response = coordinator.run_prediction(&request("hello ."));
    assert!(response.predictions.is_empty());
    assert_eq!(
        response.force_replace,
        Some(ForceReplace {
            text: format!(".{NBSP}"),
            length: 2,
        })
    );
    assert_eq!(probe.calls(), 0);
}

#[test]
fn test_spacing_rule_without_space_after() {
    let config = Config {
        apply_spacing_rules: true,
        insert_space_after_autocomplete: false,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(EngineRegistry::new(), config);

    let response = coordinator.run_prediction(&request("hello ."));
    assert_eq!(
        response.force_replace,
        Some(ForceReplace {
            text: ".".to_string(),
            length: 2,
        })
    );
    assert!(!response.trigger_input_event);
}

#[test]
fn test_spacing_rule_needs_no_engine() {
    let config = Config {
        apply_spacing_rules: true,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(EngineRegistry::new(), config);

    let response = coordinator.run_prediction(&request("hello ."));
    assert!(response.force_replace.is_some());

    let response = coordinator.run_prediction(&request("hello wor"));
    assert_eq!(response.force_replace, None);
    assert!(response.predictions.is_empty());
}

#[test]
fn test_spacing_rules_off_by_default() {
    let (engines, _probe) = english(&["world"]);
    let coordinator = Coordinator::new(engines);

    let response = coordinator.run_prediction(&request("hello ."));
    assert_eq!(response.force_replace, None);
}

#[test]
fn test_numbers_are_not_completed() {
    let (engines, probe) = english(&["45th"]);
    let coordinator = Coordinator::new(engines);

    for text in ["call 123-45", "pi is 3.14", "0x1f", "12"] {
        let response = coordinator.run_prediction(&request(text));
        assert!(response.predictions.is_empty(), "predicted for {text:?}");
    }
    assert_eq!(probe.calls(), 0);
}

#[test]
fn test_glued_separator_stops_prediction() {
    let (engines, probe) = english(&["example"]);
    let coordinator = Coordinator::new(engines);

    assert!(coordinator.run_prediction(&request("mail me@ex")).predictions.is_empty());
    assert_eq!(probe.calls(), 0);

    // Opening bracket keeps predicting.
    let response = coordinator.run_prediction(&request("see (ex"));
    assert_eq!(response.predictions, spaced(&["example"]));
}

#[test]
fn test_non_string_text_is_ignored() {
    let (engines, probe) = english(&["world"]);
    let coordinator = Coordinator::new(engines);

    let request: PredictionRequest =
        serde_json::from_str(r#"{"text": 42, "lang": "en", "tabId": 1, "frameId": 0}"#).unwrap();
    assert_eq!(request.text, None);

    let response = coordinator.run_prediction(&request);
    assert!(response.predictions.is_empty());
    assert_eq!(response.force_replace, None);
    assert_eq!(probe.calls(), 0);
}

#[test]
fn test_unknown_language_degrades() {
    let (engines, _probe) = english(&["world"]);
    let coordinator = Coordinator::new(engines);

    let request = PredictionRequest::new("hello wor", None, "xx", SessionKey::new(1, 0));
    let response = coordinator.run_prediction(&request);
    assert!(response.predictions.is_empty());
    assert_eq!(response.force_replace, None);
    assert!(response.trigger_input_event);
}

#[test]
fn test_unchanged_context_hits_cache() {
    let (engines, probe) = english(&["world", "work"]);
    let coordinator = Coordinator::new(engines);

    let first = coordinator.run_prediction(&request("hello wor"));
    let second = coordinator.run_prediction(&request("hello wor"));
    assert_eq!(first, second);
    assert_eq!(probe.calls(), 1);
    assert_eq!(coordinator.cache_stats(), (1, 1));
    assert_eq!(coordinator.cache_hit_rate(), Some(50.0));

    // Only the bounded context counts: an older word falling out of the
    // window leaves the stream unchanged.
    coordinator.run_prediction(&request("x one two three four wor"));
    coordinator.run_prediction(&request("y one two three four wor"));
    assert_eq!(probe.calls(), 2);
}

#[test]
fn test_cache_is_per_language() {
    let en = Probe::default();
    let de = Probe::default();
    let mut engines = EngineRegistry::new();
    engines.insert("en", MockEngine::new(&["world"], &en).boxed());
    engines.insert("de", MockEngine::new(&["welt"], &de).boxed());
    let coordinator = Coordinator::new(engines);

    let german = PredictionRequest::new("hallo we", None, "de", SessionKey::new(1, 0));
    coordinator.run_prediction(&request("hello wo"));
    coordinator.run_prediction(&german);
    coordinator.run_prediction(&request("hello wo"));

    // The German request replaced nothing in the English entry.
    assert_eq!(en.calls(), 1);
    assert_eq!(de.calls(), 1);
    assert_eq!(coordinator.cache().len(), 2);
}

#[test]
fn test_engine_failure_is_not_cached() {
    let probe = Probe::default();
    let mut engines = EngineRegistry::new();
    engines.insert("en", MockEngine::failing(&probe).boxed());
    let coordinator = Coordinator::new(engines);

    let response = coordinator.run_prediction(&request("hello wor"));
    assert!(response.predictions.is_empty());
    coordinator.run_prediction(&request("hello wor"));
    assert_eq!(probe.calls(), 2);
    assert!(coordinator.cache().is_empty());
}

#[test]
fn test_config_reaches_engines() {
    let (engines, probe) = english(&["world"]);
    let config = Config {
        num_suggestions: 3,
        text_expansions: vec![TextExpansion::new("BRB", "be right back")],
        ..Config::default()
    };
    let mut coordinator = Coordinator::with_config(engines, config);

    assert_eq!(probe.configured(SUGGESTIONS_KEY).as_deref(), Some("3"));
    assert_eq!(
        probe.configured(ABBREVIATIONS_KEY).as_deref(),
        Some("brb\tbe right back\n")
    );

    coordinator.set_config(Config::default());
    assert_eq!(probe.configured(SUGGESTIONS_KEY).as_deref(), Some("5"));
    assert_eq!(probe.configured(ABBREVIATIONS_KEY).as_deref(), Some(""));
    assert_eq!(coordinator.config(), &Config::default());
}

#[test]
fn test_zero_suggestions_disables_prediction() {
    let (engines, probe) = english(&["world"]);
    let config = Config {
        num_suggestions: 0,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    assert!(coordinator.run_prediction(&request("hello wor")).predictions.is_empty());
    assert_eq!(probe.calls(), 0);
}

#[test]
fn test_language_separators() {
    let (engines, probe) = english(&["world"]);
    let mut languages = Languages::new();
    languages.insert(LanguageProfile::new("en").with_separators("_").unwrap());
    let coordinator = Coordinator::new(engines).with_languages(languages);

    coordinator.run_prediction(&request("hello_wor"));
    assert_eq!(probe.contexts(), vec!["hello wor".to_string()]);
}

#[test]
fn test_dictionary_engine_end_to_end() {
    let corpus = "I went to the store. We went to the park. The water was warm.";
    let mut engines = EngineRegistry::new();
    engines.insert("en", Box::new(DictionaryEngine::from_corpus(corpus)));
    let config = Config {
        text_expansions: vec![TextExpansion::new("omw", "on my way")],
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    let response = coordinator.run_prediction(&request("We we"));
    assert_eq!(response.predictions[0], format!("went{NBSP}"));

    let response = coordinator.run_prediction(&request("I am omw"));
    assert_eq!(response.predictions[0], format!("on my way{NBSP}"));
}

#[test]
fn test_unbounded_suggestion_count_push() {
    let corpus = "hello world. hello work. the world is wide";
    let mut engines = EngineRegistry::new();
    engines.insert("en", Box::new(DictionaryEngine::from_corpus(corpus)));
    let config = Config {
        num_suggestions: usize::MAX,
        ..Config::default()
    };
    let coordinator = Coordinator::with_config(engines, config);

    let response = coordinator.run_prediction(&request("hello wor"));
    assert_eq!(response.predictions.len(), 2);
    assert!(response.predictions.contains(&format!("world{NBSP}")));
}
