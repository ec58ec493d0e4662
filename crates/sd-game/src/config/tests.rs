use super::*;

#[test]
fn test_parse_full_config() {
    let toml_str = r#"
[game]
rounds = 15
time_limit_secs = 20
label_policy = "strict"
seed = 7

[dataset]
path = "data/reviews.csv"
review_column = "text"
sentiment_column = "label"
delimiter = ";"

[classifier.lexicon]
meh = -0.2
banger = 0.9

[logging]
level = "debug"
format = "json"
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.game.rounds, 15);
    assert_eq!(config.game.time_limit_secs, Some(20));
    assert_eq!(config.game.label_policy, LabelPolicy::Strict);
    assert_eq!(config.game.seed, Some(7));

    assert_eq!(config.dataset.path, PathBuf::from("data/reviews.csv"));
    assert_eq!(config.dataset.review_column, "text");
    assert_eq!(config.dataset.sentiment_column, "label");
    assert_eq!(config.dataset.delimiter, ";");

    assert_eq!(config.classifier.lexicon.len(), 2);
    assert_eq!(config.classifier.lexicon["meh"], -0.2);
    assert_eq!(config.classifier.lexicon["banger"], 0.9);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_defaults_applied() {
    let toml_str = r#"
[dataset]
path = "reviews.csv"
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();

    // GameConfig defaults
    assert_eq!(config.game.rounds, 10);
    assert!(config.game.time_limit_secs.is_none());
    assert_eq!(config.game.label_policy, LabelPolicy::Lenient);
    assert!(config.game.seed.is_none());

    // DatasetConfig defaults
    assert_eq!(config.dataset.review_column, "review");
    assert_eq!(config.dataset.sentiment_column, "sentiment");
    assert_eq!(config.dataset.delimiter, ",");

    // ClassifierConfig defaults
    assert!(config.classifier.lexicon.is_empty());

    // LoggingConfig defaults
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_partial_game_section_keeps_other_defaults() {
    let toml_str = r#"
[game]
time_limit_secs = 30

[dataset]
path = "reviews.csv"
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.game.rounds, 10);
    assert_eq!(config.game.time_limit_secs, Some(30));
}

#[test]
fn test_missing_dataset_section_rejected() {
    let toml_str = r#"
[game]
rounds = 5
"#;

    let result: Result<AppConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

#[test]
fn test_unknown_label_policy_rejected() {
    let toml_str = r#"
[game]
label_policy = "forgiving"

[dataset]
path = "reviews.csv"
"#;

    let result: Result<AppConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}
