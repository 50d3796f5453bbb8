//! Name-based invocation of registrations and queries.
//!
//! Hosts that receive calls as a function name plus string arguments route
//! them through [`Registry::invoke`] and hand the [`Response`] back to their
//! caller unchanged.

use crate::registry::Registry;
use crate::{IdentityProvider, RegistryError, RegistryResult};
use assay_model::{Algo, Challenge, DataManager, DataSample, Entity, Model, Objective};
use assay_storage::KvStore;
use assay_types::Key;
use serde::Serialize;
use tracing::{debug, warn};

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    /// Failure reason, empty on success.
    pub message: String,
    /// The registered key, or the JSON-encoded query result.
    pub payload: Vec<u8>,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(err: &RegistryError) -> Self {
        Self {
            status: STATUS_ERROR,
            message: format!("{}: {}", err.kind(), err),
            payload: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn payload_str(&self) -> &str {
        std::str::from_utf8(&self.payload).unwrap_or_default()
    }
}

impl<S: KvStore> Registry<S> {
    /// Runs the registration or query named `function`.
    pub fn invoke(
        &self,
        caller: &dyn IdentityProvider,
        function: &str,
        args: &[String],
    ) -> Response {
        debug!(function, args = args.len(), "invoke");
        match self.route(caller, function, args) {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                warn!(function, kind = err.kind(), error = %err, "invocation failed");
                Response::error(&err)
            }
        }
    }

    fn route(
        &self,
        caller: &dyn IdentityProvider,
        function: &str,
        args: &[String],
    ) -> RegistryResult<Vec<u8>> {
        match function {
            "registerDataManager" => Ok(key_payload(self.register_data_manager(caller, args)?)),
            "registerDataSample" => {
                let keys: Vec<String> = self
                    .register_data_samples(caller, args)?
                    .into_iter()
                    .map(Key::into_string)
                    .collect();
                json(&keys)
            }
            "registerObjective" => Ok(key_payload(self.register_objective(caller, args)?)),
            "registerChallenge" => Ok(key_payload(self.register_challenge(caller, args)?)),
            "registerAlgo" => Ok(key_payload(self.register_algo(caller, args)?)),
            "registerModel" => Ok(key_payload(self.register_model(caller, args)?)),

            "query" => json(&self.get_any(single_key(args)?)?),
            "queryDataManager" => self.query_one::<DataManager>(args),
            "queryDataSample" => self.query_one::<DataSample>(args),
            "queryObjective" => self.query_one::<Objective>(args),
            "queryChallenge" => self.query_one::<Challenge>(args),
            "queryAlgo" => self.query_one::<Algo>(args),
            "queryModel" => self.query_one::<Model>(args),

            "queryDataManagers" => self.query_all::<DataManager>(function, args),
            "queryDataSamples" => self.query_all::<DataSample>(function, args),
            "queryObjectives" => self.query_all::<Objective>(function, args),
            "queryChallenges" => self.query_all::<Challenge>(function, args),
            "queryAlgos" => self.query_all::<Algo>(function, args),
            "queryModels" => self.query_all::<Model>(function, args),

            "queryDataset" => json(&self.get_dataset(single_key(args)?)?),
            "queryChallengeAlgos" => json(&self.list_challenge_algos(single_key(args)?)?),
            "queryAlgoModels" => json(&self.list_algo_models(single_key(args)?)?),
            "queryObjectiveChallenges" => {
                json(&self.list_objective_challenges(single_key(args)?)?)
            }

            other => Err(RegistryError::UnknownFunction(other.to_string())),
        }
    }

    fn query_one<E: Entity>(&self, args: &[String]) -> RegistryResult<Vec<u8>> {
        json(&self.get::<E>(single_key(args)?)?)
    }

    fn query_all<E: Entity>(&self, function: &str, args: &[String]) -> RegistryResult<Vec<u8>> {
        if !args.is_empty() {
            return Err(RegistryError::ArgumentCount(format!(
                "{function} takes no arguments, got {}",
                args.len()
            )));
        }
        json(&self.list_all::<E>()?)
    }
}

/// The one argument a keyed query takes.
fn single_key(args: &[String]) -> RegistryResult<&str> {
    match args {
        [key] => Ok(key.as_str()),
        _ => Err(RegistryError::BadKey(format!(
            "expecting exactly one key argument, got {}",
            args.len()
        ))),
    }
}

fn key_payload(key: Key) -> Vec<u8> {
    key.into_string().into_bytes()
}

fn json<T: Serialize + ?Sized>(value: &T) -> RegistryResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}
