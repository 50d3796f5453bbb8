use crate::registry::{Registry, CHALLENGE_BY_OBJECTIVE};
use crate::{IdentityProvider, RegistryResult};
use assay_model::{Challenge, ChallengeInput, Objective};
use assay_storage::{KvStore, Transaction};
use assay_types::{EntityType, Key};

impl<S: KvStore> Registry<S> {
    /// Registers a challenge on an existing objective, keyed by its description hash.
    pub fn register_challenge(
        &self,
        caller: &dyn IdentityProvider,
        args: &[String],
    ) -> RegistryResult<Key> {
        let input: ChallengeInput = self.decode(args)?;
        self.register_challenge_input(caller, &input)
    }

    pub fn register_challenge_input(
        &self,
        caller: &dyn IdentityProvider,
        input: &ChallengeInput,
    ) -> RegistryResult<Key> {
        self.validate(input)?;

        let mut tx = Transaction::new(&self.store);
        Self::resolve::<Objective>(&tx, &input.objective_key)?;

        let key = Key::derive(&input.description_hash)?;
        Self::ensure_absent(&tx, &key, EntityType::Challenge)?;
        let owner = Self::owner(caller)?;

        let record = Challenge {
            name: input.name.clone(),
            description_storage_address: input.description_storage_address.clone(),
            objective_key: input.objective_key.clone(),
            owner,
            permissions: input.permissions.clone(),
        };
        Self::stage(&mut tx, &key, &record)?;
        Self::stage_index(
            &mut tx,
            CHALLENGE_BY_OBJECTIVE,
            EntityType::Challenge,
            &record.objective_key,
            &key,
        )?;
        Self::commit(tx, EntityType::Challenge, &key)?;
        Ok(key)
    }
}
