mod common;

use assay_model::{AlgoOutput, DatasetOutput, InputRecord, ObjectiveOutput};
use assay_registry::{STATUS_ERROR, STATUS_OK};
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn register_algo_returns_key_as_payload() {
    let registry = registry();
    let input = algo_input("algo", None);

    let response = registry.invoke(&owner(), "registerAlgo", &input.to_args().unwrap());
    assert_eq!(response.status, STATUS_OK, "{}", response.message);
    assert_eq!(response.payload_str(), input.hash);
    assert!(response.message.is_empty());

    let response = registry.invoke(&owner(), "queryAlgo", &args(&[input.hash.as_str()]));
    assert!(response.is_success());
    let algo: AlgoOutput = serde_json::from_slice(&response.payload).unwrap();
    assert_eq!(algo.owner, OWNER);
    assert_eq!(algo.storage.address, input.storage_address);

    let response = registry.invoke(&owner(), "queryAlgos", &[]);
    let algos: Vec<AlgoOutput> = serde_json::from_slice(&response.payload).unwrap();
    assert_eq!(algos, vec![algo]);
}

#[test]
fn failures_map_to_500_with_reason() {
    let registry = registry();
    let mut input = algo_input("algo", None);
    input.description_hash = "aaa".into();

    let response = registry.invoke(&owner(), "registerAlgo", &input.to_args().unwrap());
    assert_eq!(response.status, STATUS_ERROR);
    assert!(response.message.starts_with("ValidationError"), "{}", response.message);
    assert!(response.payload.is_empty());
}

#[test]
fn data_sample_registration_returns_json_key_list() {
    let registry = registry();
    let manager = registry
        .register_data_manager_input(&owner(), &data_manager_input("dm"))
        .unwrap();
    let input = data_samples_input(&["s1", "s2"], &[&manager], true);

    let response = registry.invoke(&owner(), "registerDataSample", &input.to_args().unwrap());
    assert!(response.is_success(), "{}", response.message);
    let keys: Vec<String> = serde_json::from_slice(&response.payload).unwrap();
    assert_eq!(keys, vec![hash("s1"), hash("s2")]);
}

#[test]
fn generic_query_returns_projection_of_any_type() {
    let registry = registry();
    let competition = seed_competition(&registry, "mnist");

    let response = registry.invoke(&owner(), "query", &args(&[competition.objective.as_str()]));
    assert!(response.is_success(), "{}", response.message);
    let objective: ObjectiveOutput = serde_json::from_slice(&response.payload).unwrap();
    assert_eq!(objective.key, competition.objective.as_str());
}

#[test]
fn dataset_query_round_trips_through_json() {
    let registry = registry();
    let dataset = seed_dataset(&registry, "dm");

    let response = registry.invoke(&owner(), "queryDataset", &args(&[dataset.manager.as_str()]));
    assert!(response.is_success(), "{}", response.message);
    let output: DatasetOutput = serde_json::from_slice(&response.payload).unwrap();
    assert_eq!(output, registry.get_dataset(dataset.manager.as_str()).unwrap());

    let value: serde_json::Value = serde_json::from_slice(&response.payload).unwrap();
    assert!(value["DataManager"]["Opener"]["StorageAddress"].is_string());
    assert_eq!(value["TestDataSampleKeys"].as_array().unwrap().len(), 2);
}

#[test]
fn keyed_query_needs_exactly_one_key() {
    let registry = registry();

    let response = registry.invoke(&owner(), "queryObjective", &[]);
    assert_eq!(response.status, STATUS_ERROR);
    assert!(response.message.starts_with("BadKeyError"), "{}", response.message);

    let response = registry.invoke(&owner(), "queryObjective", &args(&["a", "b"]));
    assert!(response.message.starts_with("BadKeyError"), "{}", response.message);

    let response = registry.invoke(&owner(), "queryObjective", &args(&[hash("none").as_str()]));
    assert!(response.message.starts_with("NotFoundError"), "{}", response.message);
}

#[test]
fn list_query_takes_no_arguments() {
    let registry = registry();
    let response = registry.invoke(&owner(), "queryModels", &args(&["extra"]));
    assert_eq!(response.status, STATUS_ERROR);
    assert!(response.message.starts_with("ArgumentCountError"), "{}", response.message);

    let response = registry.invoke(&owner(), "queryModels", &[]);
    assert!(response.is_success());
    assert_eq!(response.payload_str(), "[]");
}

#[test]
fn reverse_lookups_are_routed() {
    let registry = registry();
    let competition = seed_competition(&registry, "mnist");
    let algo = registry
        .register_algo_input(&owner(), &algo_input("cnn", Some(&competition.challenge)))
        .unwrap();

    for (function, key) in [
        ("queryChallengeAlgos", competition.challenge.as_str()),
        ("queryObjectiveChallenges", competition.objective.as_str()),
        ("queryAlgoModels", algo.as_str()),
    ] {
        let response = registry.invoke(&owner(), function, &args(&[key]));
        assert!(response.is_success(), "{function}: {}", response.message);
        let value: serde_json::Value = serde_json::from_slice(&response.payload).unwrap();
        assert!(value.is_array(), "{function}");
    }
}

#[test]
fn unknown_function_is_rejected() {
    let registry = registry();
    let response = registry.invoke(&owner(), "deleteEverything", &[]);
    assert_eq!(response.status, STATUS_ERROR);
    assert!(response.message.contains("unknown function"), "{}", response.message);
}
