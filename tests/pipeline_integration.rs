//! Library-level integration tests
//!
//! Exercises the public API the way the CLI strings it together: settings
//! feed the pipeline, artifacts are checked by the native decoder, and
//! results land in the on-disk history.

use luacloak::cmd::compile::{compile_jobs, record_outcomes, CompileJob};
use luacloak::cmd::verify::{check_artifact, SourceMatch};
use luacloak::config::{ConfigLoader, Settings};
use luacloak::history::{HistoryStore, StatsStore};
use luacloak::transform::{
    decode, minify, run, verify, EncodingMethod, PipelineOptions, Rating, TransformError,
    VerifyError,
};

mod common;
use common::fixtures::{self, SAMPLE_SCRIPT};

#[test]
fn test_every_method_decodes_back_to_the_source() {
    let source = SAMPLE_SCRIPT.trim();
    for method in EncodingMethod::ALL {
        let options = PipelineOptions {
            method,
            ..Default::default()
        };
        let result = run(source, &options).unwrap();

        assert_eq!(verify(&result.artifact, source).unwrap(), method);
        assert_eq!(result.input_size, source.len() as u64);
        assert_eq!(result.output_size, result.artifact.len() as u64);
    }
}

#[test]
fn test_minified_artifact_verifies_against_minified_source() {
    let options = PipelineOptions {
        minify: true,
        method: EncodingMethod::LayeredEscape,
        ..Default::default()
    };
    let result = run(SAMPLE_SCRIPT, &options).unwrap();

    let (_, decoded) = decode(&result.artifact).unwrap();
    assert!(!decoded.contains("--"));
    assert!(!decoded.contains('\n'));
    assert_eq!(decoded, minify(SAMPLE_SCRIPT));

    let report = check_artifact(&result.artifact, Some(SAMPLE_SCRIPT)).unwrap();
    assert_eq!(report.matched, Some(SourceMatch::Minified));
}

#[test]
fn test_non_ascii_source_survives_byte_methods() {
    let source = "print(\"héllo wörld ✓\")";
    for method in EncodingMethod::ALL {
        let artifact = run(
            source,
            &PipelineOptions {
                method,
                ..Default::default()
            },
        )
        .unwrap()
        .artifact;
        match method {
            // ✓ is beyond string.char, so Lua 5.1 would reject the artifact
            EncodingMethod::CodepointList => assert!(matches!(
                decode(&artifact),
                Err(VerifyError::MalformedPayload {
                    method: "charcode",
                    ..
                })
            )),
            _ => assert_eq!(decode(&artifact).unwrap().1, source, "method {method}"),
        }
    }
}

#[test]
fn test_tampered_artifact_is_rejected() {
    let result = run("print(1)", &PipelineOptions::default()).unwrap();
    let tampered = result.artifact.replace("loadstring", "load");

    assert!(decode(&tampered).is_err());
    assert!(matches!(
        verify(&result.artifact, "print(2)"),
        Err(VerifyError::Mismatch { .. })
    ));
}

#[test]
fn test_settings_drive_rating_and_method() {
    let project = fixtures::lua_project().unwrap();
    fixtures::write_config(
        &project,
        "obfuscation_method = \"hex\"\nanti_tamper = false\nvar_rename = false\nstring_encrypt = false\n",
    )
    .unwrap();

    let settings = ConfigLoader::load(project.path()).unwrap();
    let result = run("x = 1", &settings.to_pipeline_options()).unwrap();

    assert_eq!(decode(&result.artifact).unwrap().0, EncodingMethod::HexPairs);
    assert_eq!(result.rating, Rating::Low);
}

#[test]
fn test_batch_compile_persists_history_and_stats() {
    let project = fixtures::lua_project().unwrap();
    let settings = Settings {
        max_history: 3,
        ..Default::default()
    };

    let jobs: Vec<CompileJob> = (0..5)
        .map(|i| CompileJob {
            name: format!("job{i}.lua"),
            source: format!("print({i})"),
        })
        .chain(std::iter::once(CompileJob {
            name: "blank.lua".to_string(),
            source: String::new(),
        }))
        .collect();

    let results = compile_jobs(&jobs, &settings.to_pipeline_options());
    assert_eq!(results[5].as_ref().unwrap_err(), &TransformError::EmptyInput);
    let outcomes: Vec<_> = results.into_iter().filter_map(Result::ok).collect();
    assert_eq!(outcomes.len(), 5);

    let store = HistoryStore::new(project.path());
    let ledger = record_outcomes(
        store.load().unwrap(),
        &outcomes,
        settings.obfuscation_method,
        settings.max_history,
        1_700_000_000_000,
    );
    store.save(&ledger).unwrap();
    StatsStore::new(project.path())
        .record(outcomes.len() as u64)
        .unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, ledger);
    let inputs: Vec<&str> = reloaded.records.iter().map(|r| r.input.as_str()).collect();
    assert_eq!(inputs, vec!["print(4)", "print(3)", "print(2)"]);
    for record in &reloaded.records {
        verify(&record.output, &record.input).unwrap();
    }

    assert_eq!(StatsStore::new(project.path()).load().unwrap().total, 5);
}

#[test]
fn test_history_ids_stay_unique_across_runs_in_the_same_millisecond() {
    let project = fixtures::lua_project().unwrap();
    let store = HistoryStore::new(project.path());
    let options = PipelineOptions::default();
    let now = 1_700_000_000_000;

    for i in 0..3 {
        let jobs = vec![CompileJob {
            name: "a.lua".to_string(),
            source: format!("a = {i}"),
        }];
        let outcomes: Vec<_> = compile_jobs(&jobs, &options)
            .into_iter()
            .filter_map(Result::ok)
            .collect();
        let ledger = record_outcomes(
            store.load().unwrap(),
            &outcomes,
            EncodingMethod::PlainEscape,
            50,
            now,
        );
        store.save(&ledger).unwrap();
    }

    let ids: Vec<u64> = store.load().unwrap().records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![now + 2, now + 1, now]);
}
