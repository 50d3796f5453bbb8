use crate::registry::{Registry, SampleTag, MODEL_BY_ALGO};
use crate::{IdentityProvider, RegistryResult};
use assay_model::{Algo, Model, ModelInput};
use assay_storage::{KvStore, Transaction};
use assay_types::{EntityType, Key};

impl<S: KvStore> Registry<S> {
    /// Registers a trained model, keyed by the hash of the model file.
    pub fn register_model(
        &self,
        caller: &dyn IdentityProvider,
        args: &[String],
    ) -> RegistryResult<Key> {
        let input: ModelInput = self.decode(args)?;
        self.register_model_input(caller, &input)
    }

    pub fn register_model_input(
        &self,
        caller: &dyn IdentityProvider,
        input: &ModelInput,
    ) -> RegistryResult<Key> {
        self.validate(input)?;
        let train_dataset = input.train_dataset()?;

        let mut tx = Transaction::new(&self.store);
        Self::resolve::<Algo>(&tx, &input.algo_key)?;
        if !input.in_model_key.is_empty() {
            Self::resolve::<Model>(&tx, &input.in_model_key)?;
        }
        Self::resolve_dataset(&tx, &train_dataset, SampleTag::Train)?;

        let key = Key::derive(&input.hash)?;
        Self::ensure_absent(&tx, &key, EntityType::Model)?;
        let owner = Self::owner(caller)?;

        let record = Model {
            algo_key: input.algo_key.clone(),
            in_model_key: input.in_model_key.clone(),
            storage_address: input.storage_address.clone(),
            train_dataset,
            owner,
            permissions: input.permissions.clone(),
        };
        Self::stage(&mut tx, &key, &record)?;
        Self::stage_index(&mut tx, MODEL_BY_ALGO, EntityType::Model, &record.algo_key, &key)?;
        Self::commit(tx, EntityType::Model, &key)?;
        Ok(key)
    }
}
