use crate::registry::{Registry, DATA_SAMPLE_BY_MANAGER};
use crate::{IdentityProvider, RegistryResult};
use assay_model::{DataManager, DataSample, DataSampleInput};
use assay_storage::{KvStore, Transaction};
use assay_types::{EntityType, Key};
use tracing::info;

impl<S: KvStore> Registry<S> {
    /// Registers a batch of data samples sharing data managers and test-only flag.
    ///
    /// Returns the sample keys in submission order. Either every sample of the
    /// batch is registered or none is. Repeated hashes or data manager keys
    /// within the batch fail validation.
    pub fn register_data_samples(
        &self,
        caller: &dyn IdentityProvider,
        args: &[String],
    ) -> RegistryResult<Vec<Key>> {
        let input: DataSampleInput = self.decode(args)?;
        self.register_data_samples_input(caller, &input)
    }

    pub fn register_data_samples_input(
        &self,
        caller: &dyn IdentityProvider,
        input: &DataSampleInput,
    ) -> RegistryResult<Vec<Key>> {
        self.validate(input)?;
        let hashes = input.hashes();

        let mut tx = Transaction::new(&self.store);
        let data_manager_keys = input.data_manager_keys();
        for manager_key in &data_manager_keys {
            Self::resolve::<DataManager>(&tx, manager_key)?;
        }

        let keys = hashes
            .iter()
            .map(|hash| Key::derive(hash))
            .collect::<Result<Vec<_>, _>>()?;
        for key in &keys {
            Self::ensure_absent(&tx, key, EntityType::DataSample)?;
        }
        let owner = Self::owner(caller)?;

        let record = DataSample {
            data_manager_keys,
            owner,
            test_only: input.is_test_only(),
        };
        for key in &keys {
            Self::stage(&mut tx, key, &record)?;
            for manager_key in &record.data_manager_keys {
                Self::stage_index(
                    &mut tx,
                    DATA_SAMPLE_BY_MANAGER,
                    EntityType::DataSample,
                    manager_key,
                    key,
                )?;
            }
        }

        let written = tx.commit()?;
        info!(
            entity = %EntityType::DataSample,
            samples = keys.len(),
            written,
            "registered"
        );
        Ok(keys)
    }
}
