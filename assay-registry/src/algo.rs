use crate::registry::{Registry, ALGO_BY_CHALLENGE};
use crate::{IdentityProvider, RegistryResult};
use assay_model::{Algo, AlgoInput, Challenge};
use assay_storage::{KvStore, Transaction};
use assay_types::{EntityType, HashDress, Key};

impl<S: KvStore> Registry<S> {
    /// Registers an algo keyed by the hash of its archive.
    ///
    /// A non-empty `ChallengeKey` must name an existing challenge.
    pub fn register_algo(
        &self,
        caller: &dyn IdentityProvider,
        args: &[String],
    ) -> RegistryResult<Key> {
        let input: AlgoInput = self.decode(args)?;
        self.register_algo_input(caller, &input)
    }

    pub fn register_algo_input(
        &self,
        caller: &dyn IdentityProvider,
        input: &AlgoInput,
    ) -> RegistryResult<Key> {
        self.validate(input)?;

        let mut tx = Transaction::new(&self.store);
        if !input.challenge_key.is_empty() {
            Self::resolve::<Challenge>(&tx, &input.challenge_key)?;
        }

        let key = Key::derive(&input.hash)?;
        Self::ensure_absent(&tx, &key, EntityType::Algo)?;
        let owner = Self::owner(caller)?;

        let record = Algo {
            name: input.name.clone(),
            storage_address: input.storage_address.clone(),
            description: HashDress::new(
                input.description_hash.clone(),
                input.description_storage_address.clone(),
            ),
            owner,
            challenge_key: input.challenge_key.clone(),
            permissions: input.permissions.clone(),
        };
        Self::stage(&mut tx, &key, &record)?;
        if !record.challenge_key.is_empty() {
            Self::stage_index(
                &mut tx,
                ALGO_BY_CHALLENGE,
                EntityType::Algo,
                &record.challenge_key,
                &key,
            )?;
        }
        Self::commit(tx, EntityType::Algo, &key)?;
        Ok(key)
    }
}
