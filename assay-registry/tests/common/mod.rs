#![allow(dead_code)]

use assay_model::{
    AlgoInput, ChallengeInput, DataManagerInput, DataSampleInput, ModelInput, ObjectiveInput,
};
use assay_registry::{Registry, StaticIdentity};
use assay_storage::{KvStore, MemoryStore};
use assay_types::Key;

pub const OWNER: &str = "bbd157aa8e85eb985aeedb79361cd45739c92494dce44d351fd2dbd6190e27f0";
pub const STORAGE: &str = "https://toto/storage";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn registry() -> Registry<MemoryStore> {
    init_tracing();
    Registry::new(MemoryStore::new())
}

pub fn owner() -> StaticIdentity {
    StaticIdentity::new(OWNER)
}

pub fn other_owner() -> StaticIdentity {
    StaticIdentity::new("other-org")
}

/// A realistic content hash derived from `label`.
pub fn hash(label: &str) -> String {
    Key::digest(label.as_bytes()).into_string()
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn dataset_ref(manager: &Key, samples: &[Key]) -> String {
    let samples: Vec<&str> = samples.iter().map(Key::as_str).collect();
    format!("{manager}:{}", samples.join(","))
}

// ── Inputs ───────────────────────────────────────────────────────

pub fn data_manager_input(label: &str) -> DataManagerInput {
    DataManagerInput {
        name: format!("{label} dataset"),
        opener_hash: hash(&format!("{label}/opener")),
        opener_storage_address: format!("{STORAGE}/{label}/opener"),
        data_type: "images".into(),
        description_hash: hash(&format!("{label}/description")),
        description_storage_address: format!("{STORAGE}/{label}/description"),
        objective_key: String::new(),
        permissions: "all".into(),
    }
}

pub fn data_samples_input(labels: &[&str], managers: &[&Key], test_only: bool) -> DataSampleInput {
    DataSampleInput {
        hashes: labels.iter().map(|l| hash(l)).collect::<Vec<_>>().join(","),
        data_manager_keys: managers
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(","),
        test_only: test_only.to_string(),
    }
}

pub fn objective_input(label: &str, test_dataset: String) -> ObjectiveInput {
    ObjectiveInput {
        name: format!("{label} objective"),
        description_hash: hash(&format!("{label}/objective")),
        description_storage_address: format!("{STORAGE}/{label}/objective"),
        metrics_name: "accuracy".into(),
        metrics_hash: hash(&format!("{label}/metrics")),
        metrics_storage_address: format!("{STORAGE}/{label}/metrics"),
        test_dataset,
        permissions: "all".into(),
    }
}

pub fn challenge_input(label: &str, objective_key: &Key) -> ChallengeInput {
    ChallengeInput {
        name: format!("{label} challenge"),
        description_hash: hash(&format!("{label}/challenge")),
        description_storage_address: format!("{STORAGE}/{label}/challenge"),
        objective_key: objective_key.to_string(),
        permissions: "all".into(),
    }
}

pub fn algo_input(label: &str, challenge_key: Option<&Key>) -> AlgoInput {
    AlgoInput {
        name: format!("{label} algo"),
        hash: hash(&format!("{label}/algo")),
        storage_address: format!("{STORAGE}/{label}/algo.tar.gz"),
        description_hash: hash(&format!("{label}/algo/description")),
        description_storage_address: format!("{STORAGE}/{label}/algo/description"),
        challenge_key: challenge_key.map(Key::to_string).unwrap_or_default(),
        permissions: "all".into(),
    }
}

pub fn model_input(
    label: &str,
    algo_key: &Key,
    train_dataset: String,
    in_model_key: Option<&Key>,
) -> ModelInput {
    ModelInput {
        algo_key: algo_key.to_string(),
        hash: hash(&format!("{label}/model")),
        storage_address: format!("{STORAGE}/{label}/model"),
        train_dataset,
        in_model_key: in_model_key.map(Key::to_string).unwrap_or_default(),
        permissions: "all".into(),
    }
}

// ── Scenarios ────────────────────────────────────────────────────

/// A data manager with two test-only and two train samples.
pub struct Dataset {
    pub manager: Key,
    pub test_samples: Vec<Key>,
    pub train_samples: Vec<Key>,
}

pub fn seed_dataset<S: KvStore>(registry: &Registry<S>, label: &str) -> Dataset {
    let manager = registry
        .register_data_manager_input(&owner(), &data_manager_input(label))
        .unwrap();
    let test = [format!("{label}/test/1"), format!("{label}/test/2")];
    let train = [format!("{label}/train/1"), format!("{label}/train/2")];
    let test_samples = registry
        .register_data_samples_input(
            &owner(),
            &data_samples_input(&[test[0].as_str(), test[1].as_str()], &[&manager], true),
        )
        .unwrap();
    let train_samples = registry
        .register_data_samples_input(
            &owner(),
            &data_samples_input(&[train[0].as_str(), train[1].as_str()], &[&manager], false),
        )
        .unwrap();
    Dataset {
        manager,
        test_samples,
        train_samples,
    }
}

/// A dataset, its objective and a challenge on that objective.
pub struct Competition {
    pub dataset: Dataset,
    pub objective: Key,
    pub challenge: Key,
}

pub fn seed_competition<S: KvStore>(registry: &Registry<S>, label: &str) -> Competition {
    let dataset = seed_dataset(registry, label);
    let objective = registry
        .register_objective_input(
            &owner(),
            &objective_input(label, dataset_ref(&dataset.manager, &dataset.test_samples)),
        )
        .unwrap();
    let challenge = registry
        .register_challenge_input(&owner(), &challenge_input(label, &objective))
        .unwrap();
    Competition {
        dataset,
        objective,
        challenge,
    }
}
