use clap::Parser;
use form_grounding::cli::commands::{cmd_ground, load_doms, load_visuals};
use form_grounding::cli::config::{
    AppConfig, Cli, Commands, load_config, parse_config, resolve_format, resolve_trace_file,
    try_parse_config,
};
use form_grounding::element::element_model::{NavigationAction, PredictedKind};
use form_grounding::grounding::config::GroundingConfig;

const VISUAL_FIXTURE: &str = "tests/fixtures/perception.json";
const DOM_FIXTURE: &str = "tests/fixtures/dom_snapshot.json";

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_ground_minimal() {
    let cli = Cli::parse_from(["form-grounding", "ground", "--visual", "v.json", "--dom", "d.json"]);
    assert_eq!(cli.verbose, 0);
    assert!(!cli.parallel);
    match cli.command {
        Commands::Ground {
            visual,
            dom,
            format,
            output,
            trace,
        } => {
            assert_eq!(visual, "v.json");
            assert_eq!(dom, "d.json");
            assert!(format.is_none());
            assert!(output.is_none());
            assert!(trace.is_none());
        }
        _ => panic!("Expected Ground command"),
    }
}

#[test]
fn cli_parse_ground_all_args() {
    let cli = Cli::parse_from([
        "form-grounding",
        "-vv",
        "--parallel",
        "--config",
        "custom.yaml",
        "ground",
        "--visual",
        "v.json",
        "--dom",
        "d.json",
        "--format",
        "json",
        "-o",
        "out.json",
        "--trace",
        "trace.jsonl",
    ]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.parallel);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
    match cli.command {
        Commands::Ground {
            format,
            output,
            trace,
            ..
        } => {
            assert_eq!(format.as_deref(), Some("json"));
            assert_eq!(output.as_deref(), Some("out.json"));
            assert_eq!(trace.as_deref(), Some("trace.jsonl"));
        }
        _ => panic!("Expected Ground command"),
    }
}

#[test]
fn cli_parse_explain_defaults_index() {
    let cli = Cli::parse_from(["form-grounding", "explain", "--visual", "v.json", "--dom", "d.json"]);
    match cli.command {
        Commands::Explain { index, .. } => assert_eq!(index, 0),
        _ => panic!("Expected Explain command"),
    }

    let cli = Cli::parse_from([
        "form-grounding", "explain", "--visual", "v.json", "--dom", "d.json", "--index", "3",
    ]);
    match cli.command {
        Commands::Explain { index, .. } => assert_eq!(index, 3),
        _ => panic!("Expected Explain command"),
    }
}

#[test]
fn cli_rejects_missing_required_args() {
    assert!(Cli::try_parse_from(["form-grounding", "ground", "--visual", "v.json"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.grounding, GroundingConfig::default());
    assert_eq!(config.grounding.geometry_weight, 0.6);
    assert_eq!(config.grounding.text_weight, 0.4);
    assert_eq!(config.grounding.fused_admission_iou, 0.1);
    assert_eq!(config.grounding.fallback_admission_iou, 0.6);
    assert_eq!(config.grounding.fallback_trigger_score, 0.5);
    assert_eq!(config.grounding.fallback_confidence_ceiling, 0.7);
    assert_eq!(config.output.format, "console");
    assert!(config.output.trace_file.is_none());
}

#[test]
fn config_partial_yaml_keeps_other_defaults() {
    let config = parse_config(
        "grounding:\n  geometry_weight: 0.7\n  text_weight: 0.3\noutput:\n  trace_file: grounding.jsonl\n",
    );
    assert_eq!(config.grounding.geometry_weight, 0.7);
    assert_eq!(config.grounding.text_weight, 0.3);
    assert_eq!(config.grounding.fallback_admission_iou, 0.6);
    assert_eq!(config.output.format, "console");
    assert_eq!(config.output.trace_file.as_deref(), Some("grounding.jsonl"));
}

#[test]
fn config_accepts_fallback_discount_alias() {
    let config = parse_config("grounding:\n  fallback_discount: 0.65\n");
    assert_eq!(config.grounding.fallback_confidence_ceiling, 0.65);
}

#[test]
fn config_malformed_yaml_falls_back_to_defaults() {
    let config = parse_config("grounding: [not, a, map");
    assert_eq!(config.grounding, GroundingConfig::default());

    let err = try_parse_config("grounding: [not, a, map").unwrap_err();
    assert!(err.to_string().contains("config file"));
}

#[test]
fn config_missing_file_falls_back_to_defaults() {
    let config = load_config(Some("does/not/exist.yaml"));
    assert_eq!(config.grounding, GroundingConfig::default());
}

#[test]
fn config_validation() {
    assert!(GroundingConfig::default().validate().is_ok());

    let too_heavy = GroundingConfig {
        geometry_weight: 0.8,
        text_weight: 0.4,
        ..GroundingConfig::default()
    };
    assert!(too_heavy.validate().is_err());

    let negative = GroundingConfig {
        fused_admission_iou: -0.1,
        ..GroundingConfig::default()
    };
    assert!(negative.validate().is_err());

    let nan = GroundingConfig {
        text_weight: f64::NAN,
        ..GroundingConfig::default()
    };
    assert!(nan.validate().is_err());
}

#[test]
fn cli_flags_override_config_file() {
    let mut config = AppConfig::default();
    config.output.format = "json".to_string();
    config.output.trace_file = Some("from_config.jsonl".to_string());

    assert_eq!(resolve_format(None, &config), "json");
    assert_eq!(resolve_format(Some("console"), &config), "console");
    assert_eq!(resolve_trace_file(None, &config).as_deref(), Some("from_config.jsonl"));
    assert_eq!(resolve_trace_file(Some("cli.jsonl"), &config).as_deref(), Some("cli.jsonl"));
}

// ============================================================================
// Fixture loading and the ground command
// ============================================================================

#[test]
fn load_fixture_inputs() {
    let visuals = load_visuals(VISUAL_FIXTURE).unwrap();
    assert_eq!(visuals.len(), 5);
    assert_eq!(visuals[1].predicted_kind, PredictedKind::EmailInput);
    assert_eq!(visuals[2].navigation, Some(NavigationAction::SubmitForm));

    let doms = load_doms(DOM_FIXTURE).unwrap();
    assert_eq!(doms.len(), 6);
    assert!(!doms[5].is_visible);
    assert_eq!(doms[2].text_candidates[0], "submit now");
}

#[test]
fn load_missing_file_is_an_error() {
    assert!(load_visuals("tests/fixtures/missing.json").is_err());
    assert!(load_doms("tests/fixtures/missing.json").is_err());
}

#[test]
fn cmd_ground_writes_json_report() {
    let out = std::env::temp_dir().join(format!("grounding_report_{}.json", std::process::id()));
    let out_str = out.to_str().unwrap();

    let report = cmd_ground(
        VISUAL_FIXTURE,
        DOM_FIXTURE,
        Some("json"),
        Some(out_str),
        None,
        false,
        &AppConfig::default(),
    )
    .unwrap();

    assert_eq!(report.total, 5);
    assert_eq!(report.bound, 4);
    assert_eq!(report.unbound, 1);
    assert!(report.duplicates.is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    let _ = std::fs::remove_file(&out);

    assert_eq!(written["bound"], 4);
    let elements = written["elements"].as_array().unwrap();
    assert_eq!(elements[0]["grounding"]["locator"], "//form/div[1]/input");
    assert_eq!(elements[1]["grounding"]["locator"], "//form/div[2]/input");
    assert_eq!(elements[2]["grounding"]["locator"], "//form/button[1]");
    assert_eq!(elements[3]["grounding"]["locator"], "//form/textarea[1]");
    assert_eq!(elements[4]["grounding"]["state"], "unbound");
}

#[test]
fn cmd_ground_rejects_invalid_config() {
    let mut config = AppConfig::default();
    config.grounding.geometry_weight = 2.0;
    let result = cmd_ground(VISUAL_FIXTURE, DOM_FIXTURE, None, None, None, false, &config);
    assert!(result.is_err());
}

#[test]
fn cmd_ground_with_trace_runs_sequentially_even_when_parallel() {
    let dir = std::env::temp_dir();
    let trace = dir.join(format!("grounding_cli_trace_{}.jsonl", std::process::id()));
    let out = dir.join(format!("grounding_cli_out_{}.txt", std::process::id()));
    let _ = std::fs::remove_file(&trace);

    let traced = cmd_ground(
        VISUAL_FIXTURE,
        DOM_FIXTURE,
        None,
        Some(out.to_str().unwrap()),
        Some(trace.to_str().unwrap()),
        true,
        &AppConfig::default(),
    )
    .unwrap();
    let plain = cmd_ground(
        VISUAL_FIXTURE,
        DOM_FIXTURE,
        None,
        Some(out.to_str().unwrap()),
        None,
        true,
        &AppConfig::default(),
    )
    .unwrap();

    let lines = std::fs::read_to_string(&trace).unwrap().lines().count();
    let _ = std::fs::remove_file(&trace);
    let _ = std::fs::remove_file(&out);

    assert_eq!(lines, 5);
    assert_eq!(traced.elements, plain.elements);
}

#[test]
fn load_doms_skips_unreadable_items() {
    let path = std::env::temp_dir().join(format!("grounding_partial_dom_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"xpath": "//a", "tag_name": "button", "is_visible": true}, {"tag_name": "input"}]"#,
    )
    .unwrap();

    let doms = load_doms(path.to_str().unwrap()).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(doms.len(), 1);
    assert_eq!(doms[0].locator, "//a");
}
