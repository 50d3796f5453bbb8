use crate::registry::Registry;
use crate::{IdentityProvider, RegistryResult};
use assay_model::{DataManager, DataManagerInput};
use assay_storage::{KvStore, Transaction};
use assay_types::{EntityType, HashDress, Key};

impl<S: KvStore> Registry<S> {
    /// Registers a data manager from positional arguments, keyed by its opener hash.
    pub fn register_data_manager(
        &self,
        caller: &dyn IdentityProvider,
        args: &[String],
    ) -> RegistryResult<Key> {
        let input: DataManagerInput = self.decode(args)?;
        self.register_data_manager_input(caller, &input)
    }

    /// Registers a data manager with no objective.
    ///
    /// `ObjectiveKey` must be empty; it is filled in when an objective names
    /// this data manager in its test dataset.
    pub fn register_data_manager_input(
        &self,
        caller: &dyn IdentityProvider,
        input: &DataManagerInput,
    ) -> RegistryResult<Key> {
        self.validate(input)?;

        let mut tx = Transaction::new(&self.store);
        let key = Key::derive(&input.opener_hash)?;
        Self::ensure_absent(&tx, &key, EntityType::DataManager)?;
        let owner = Self::owner(caller)?;

        let record = DataManager {
            objective_key: String::new(),
            name: input.name.clone(),
            data_type: input.data_type.clone(),
            description: HashDress::new(
                input.description_hash.clone(),
                input.description_storage_address.clone(),
            ),
            opener_storage_address: input.opener_storage_address.clone(),
            owner,
            permissions: input.permissions.clone(),
        };
        Self::stage(&mut tx, &key, &record)?;
        Self::commit(tx, EntityType::DataManager, &key)?;
        Ok(key)
    }
}
