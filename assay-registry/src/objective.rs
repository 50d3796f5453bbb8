use crate::registry::{Registry, SampleTag};
use crate::{IdentityProvider, RegistryError, RegistryResult};
use assay_model::{document, DataManager, Objective, ObjectiveInput};
use assay_storage::{KvStore, Transaction};
use assay_types::{EntityType, HashDressName, Key};

impl<S: KvStore> Registry<S> {
    /// Registers an objective keyed by its description hash and associates it
    /// with the data manager holding its test samples.
    pub fn register_objective(
        &self,
        caller: &dyn IdentityProvider,
        args: &[String],
    ) -> RegistryResult<Key> {
        let input: ObjectiveInput = self.decode(args)?;
        self.register_objective_input(caller, &input)
    }

    pub fn register_objective_input(
        &self,
        caller: &dyn IdentityProvider,
        input: &ObjectiveInput,
    ) -> RegistryResult<Key> {
        self.validate(input)?;
        let test_dataset = input.test_dataset()?;

        let mut tx = Transaction::new(&self.store);
        let mut manager = Self::resolve_dataset(&tx, &test_dataset, SampleTag::TestOnly)?;

        let key = Key::derive(&input.description_hash)?;
        Self::ensure_absent(&tx, &key, EntityType::Objective)?;
        let owner = Self::owner(caller)?;

        if manager.is_associated() {
            return Err(RegistryError::Conflict(format!(
                "data manager {} is already associated with objective {}",
                test_dataset.data_manager_key, manager.objective_key
            )));
        }
        manager.objective_key = key.to_string();

        let record = Objective {
            name: input.name.clone(),
            description_storage_address: input.description_storage_address.clone(),
            metrics: HashDressName {
                name: input.metrics_name.clone(),
                hash: input.metrics_hash.clone(),
                storage_address: input.metrics_storage_address.clone(),
            },
            test_dataset,
            owner,
            permissions: input.permissions.clone(),
        };
        Self::stage(&mut tx, &key, &record)?;
        tx.put(
            record.test_dataset.data_manager_key.clone(),
            document::encode::<DataManager>(&manager)?,
        );
        Self::commit(tx, EntityType::Objective, &key)?;
        Ok(key)
    }
}
