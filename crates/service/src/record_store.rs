//! The ChocAn record store.
//!
//! Owns the five collections, keeps each one fully resident in memory and
//! rewrites the affected document after every mutation. Lookups are linear
//! scans by business key where the first match wins; uniqueness is only
//! enforced when ids are generated.
//!
//! The store is single-owner and synchronous: mutating calls take `&mut self`
//! and return only after the document write finished. Nothing guards against
//! another process writing the same documents.

use std::path::{Path, PathBuf};

use chrono::Local;
use configs::{ClaimIdPolicy, StorageConfig};
use models::record::{find_by_key, position_by_key, Patch, Record};
use models::{
    derive_provider_username, ClaimInput, ClaimStatus, ClaimUpdate, Member, MemberInput, MemberStatus,
    MemberUpdate, Provider, ProviderInput, ProviderUpdate, Role, ServiceClaim, ServiceEntry, ServiceUpdate, User,
    UserTable,
};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::ids;
use crate::seed;
use crate::storage::{self, Collection, DocumentBackend, JsonFileBackend};

/// Claim submission timestamp format, e.g. `03-14-2025 09:26:53`.
pub const CLAIM_TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

/// Store behaviour knobs, usually taken from `[storage]` in the config file.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub claim_ids: ClaimIdPolicy,
    pub strict_documents: bool,
    pub seed_defaults: bool,
    pub max_id_attempts: u32,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from(&StorageConfig::default())
    }
}

impl From<&StorageConfig> for StoreOptions {
    fn from(cfg: &StorageConfig) -> Self {
        Self {
            claim_ids: cfg.claim_ids,
            strict_documents: cfg.strict_documents,
            seed_defaults: cfg.seed_defaults,
            max_id_attempts: cfg.max_id_attempts,
        }
    }
}

pub struct RecordStore<B: DocumentBackend = JsonFileBackend> {
    backend: B,
    options: StoreOptions,
    rng: StdRng,
    users: UserTable,
    members: Vec<Member>,
    providers: Vec<Provider>,
    claims: Vec<ServiceClaim>,
    services: Vec<ServiceEntry>,
}

impl RecordStore<JsonFileBackend> {
    /// Open the JSON documents under `cfg.data_dir`, creating the directory and seeding as configured.
    pub fn open(cfg: &StorageConfig) -> Result<Self, ServiceError> {
        let backend = JsonFileBackend::open(&cfg.data_dir)?;
        Self::with_backend(backend, StoreOptions::from(cfg))
    }

    pub fn data_dir(&self) -> &Path { self.backend.data_dir() }

    /// Snapshot every document into a timestamped directory under `backup_dir`.
    pub fn backup(&self, backup_dir: impl AsRef<Path>) -> Result<PathBuf, ServiceError> {
        self.backend.backup_to(backup_dir.as_ref())
    }
}

impl<B: DocumentBackend> RecordStore<B> {
    /// Load all collections from `backend`, then install seed data into empty ones.
    pub fn with_backend(backend: B, options: StoreOptions) -> Result<Self, ServiceError> {
        let strict = options.strict_documents;
        let mut store = Self {
            users: storage::load(&backend, Collection::Users, strict)?,
            members: storage::load(&backend, Collection::Members, strict)?,
            providers: storage::load(&backend, Collection::Providers, strict)?,
            claims: storage::load(&backend, Collection::ServiceClaims, strict)?,
            services: storage::load(&backend, Collection::ServiceDirectory, strict)?,
            backend,
            options,
            rng: StdRng::from_entropy(),
        };
        if store.options.seed_defaults {
            store.seed_empty_collections()?;
        }
        info!(
            users = store.users.len(),
            members = store.members.len(),
            providers = store.providers.len(),
            claims = store.claims.len(),
            services = store.services.len(),
            "record_store_opened"
        );
        Ok(store)
    }

    /// Replace the id generator, e.g. with a seeded one for reproducible runs.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn options(&self) -> &StoreOptions { &self.options }

    pub fn backend(&self) -> &B { &self.backend }

    pub fn into_backend(self) -> B { self.backend }

    fn seed_empty_collections(&mut self) -> Result<(), ServiceError> {
        if self.users.is_empty() {
            self.users = seed::default_users();
            self.save(Collection::Users)?;
            info!(count = self.users.len(), "seeded users");
        }
        if self.members.is_empty() {
            self.members = seed::default_members();
            self.save(Collection::Members)?;
            info!(count = self.members.len(), "seeded members");
        }
        if self.services.is_empty() {
            self.services = seed::default_services();
            self.save(Collection::ServiceDirectory)?;
            info!(count = self.services.len(), "seeded service directory");
        }
        Ok(())
    }

    // ---- whole-collection persistence ----

    /// Re-read one collection from its document, discarding in-memory state. Returns the row count.
    pub fn load(&mut self, collection: Collection) -> Result<usize, ServiceError> {
        let strict = self.options.strict_documents;
        let count = match collection {
            Collection::Users => {
                self.users = storage::load(&self.backend, collection, strict)?;
                self.users.len()
            }
            Collection::Members => {
                self.members = storage::load(&self.backend, collection, strict)?;
                self.members.len()
            }
            Collection::Providers => {
                self.providers = storage::load(&self.backend, collection, strict)?;
                self.providers.len()
            }
            Collection::ServiceClaims => {
                self.claims = storage::load(&self.backend, collection, strict)?;
                self.claims.len()
            }
            Collection::ServiceDirectory => {
                self.services = storage::load(&self.backend, collection, strict)?;
                self.services.len()
            }
        };
        debug!(%collection, count, "collection loaded");
        Ok(count)
    }

    /// Overwrite one collection's document with the in-memory rows.
    pub fn save(&mut self, collection: Collection) -> Result<(), ServiceError> {
        match collection {
            Collection::Users => storage::save(&mut self.backend, collection, &self.users),
            Collection::Members => storage::save(&mut self.backend, collection, &self.members),
            Collection::Providers => storage::save(&mut self.backend, collection, &self.providers),
            Collection::ServiceClaims => storage::save(&mut self.backend, collection, &self.claims),
            Collection::ServiceDirectory => storage::save(&mut self.backend, collection, &self.services),
        }
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Users => self.users.len(),
            Collection::Members => self.members.len(),
            Collection::Providers => self.providers.len(),
            Collection::ServiceClaims => self.claims.len(),
            Collection::ServiceDirectory => self.services.len(),
        }
    }

    fn update_record<T, P>(&mut self, collection: Collection, key: &str, changes: P) -> Result<bool, ServiceError>
    where
        T: Record,
        P: Patch<T>,
        Self: RowsOf<T>,
    {
        let Some(idx) = position_by_key(<Self as RowsOf<T>>::rows(self), key) else {
            debug!(entity = T::ENTITY, key, "update target not found");
            return Ok(false);
        };
        changes.apply_to(&mut <Self as RowsOf<T>>::rows_mut(self)[idx]);
        self.save(collection)?;
        info!(entity = T::ENTITY, key, "record_updated");
        Ok(true)
    }

    fn delete_record<T>(&mut self, collection: Collection, key: &str) -> Result<bool, ServiceError>
    where
        T: Record,
        Self: RowsOf<T>,
    {
        let Some(idx) = position_by_key(<Self as RowsOf<T>>::rows(self), key) else {
            debug!(entity = T::ENTITY, key, "delete target not found");
            return Ok(false);
        };
        <Self as RowsOf<T>>::rows_vec_mut(self).remove(idx);
        self.save(collection)?;
        info!(entity = T::ENTITY, key, "record_deleted");
        Ok(true)
    }

    // ---- users ----

    pub fn users(&self) -> &UserTable { &self.users }

    /// First user whose `username` field matches, regardless of its map key.
    pub fn get_user(&self, username: &str) -> Option<&User> {
        self.user_index(username).and_then(|idx| self.users.get_index(idx)).map(|(_, u)| u)
    }

    fn user_index(&self, username: &str) -> Option<usize> {
        self.users.values().position(|u| u.username == username)
    }

    /// Insert a credential under `username`. Returns `false` without writing if the key is taken.
    pub fn add_user(&mut self, username: &str, password: &str, role: Role) -> Result<bool, ServiceError> {
        if self.users.contains_key(username) || self.user_index(username).is_some() {
            debug!(username, "user already exists");
            return Ok(false);
        }
        self.users.insert(username.to_string(), User::new(username, password, role));
        self.save(Collection::Users)?;
        info!(username, %role, "user_added");
        Ok(true)
    }

    /// Overwrite the first credential whose username matches, or append a new entry.
    ///
    /// A new entry goes under its username as map key unless that key already
    /// holds a different user, in which case a numbered key is used.
    fn upsert_user(&mut self, user: User) -> Result<(), ServiceError> {
        let replaced = match self.user_index(&user.username) {
            Some(idx) => {
                if let Some((_, slot)) = self.users.get_index_mut(idx) {
                    *slot = user;
                }
                true
            }
            None => {
                let key = self.free_user_key(&user.username);
                self.users.insert(key, user);
                false
            }
        };
        self.save(Collection::Users)?;
        debug!(replaced, "user upserted");
        Ok(())
    }

    fn free_user_key(&self, username: &str) -> String {
        if !self.users.contains_key(username) {
            return username.to_string();
        }
        (2..)
            .map(|n| format!("{username}_{n}"))
            .find(|key| !self.users.contains_key(key))
            .unwrap_or_else(|| username.to_string())
    }

    /// Remove the entry keyed by `username`, or failing that the first entry whose username matches.
    pub fn delete_user(&mut self, username: &str) -> Result<bool, ServiceError> {
        let idx = self
            .users
            .get_index_of(username)
            .or_else(|| self.users.values().position(|u| u.username == username));
        let Some(idx) = idx else {
            return Ok(false);
        };
        self.users.shift_remove_index(idx);
        self.save(Collection::Users)?;
        info!(username, "user_deleted");
        Ok(true)
    }

    /// True iff a stored credential matches username, password and role exactly.
    pub fn authenticate(&self, username: &str, password: &str, role: Role) -> bool {
        let ok = self
            .get_user(username)
            .is_some_and(|u| u.matches(username, password, role));
        debug!(username, %role, ok, "authenticate");
        ok
    }

    // ---- members ----

    pub fn members(&self) -> &[Member] { &self.members }

    pub fn get_member(&self, member_id: &str) -> Option<&Member> { find_by_key(&self.members, member_id) }

    /// Add a member with a fresh id and status `Valid`; the state code is upper-cased.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_member(&mut self, input: MemberInput) -> Result<String, ServiceError> {
        let member_id = ids::generate_unique_id(&mut self.rng, self.options.max_id_attempts, |id| {
            find_by_key(&self.members, id).is_some()
        })?;
        self.members.push(Member {
            member_id: member_id.clone(),
            name: input.name,
            address: input.address,
            city: input.city,
            state: input.state.to_uppercase(),
            zip: input.zip,
            status: MemberStatus::Valid,
        });
        self.save(Collection::Members)?;
        info!(%member_id, "member_created");
        Ok(member_id)
    }

    pub fn update_member(&mut self, member_id: &str, changes: MemberUpdate) -> Result<bool, ServiceError> {
        self.update_record::<Member, _>(Collection::Members, member_id, changes)
    }

    pub fn delete_member(&mut self, member_id: &str) -> Result<bool, ServiceError> {
        self.delete_record::<Member>(Collection::Members, member_id)
    }

    /// Move an `Expired` member back to `Valid`. `false` if the member is missing or not expired.
    pub fn renew_member(&mut self, member_id: &str) -> Result<bool, ServiceError> {
        let Some(member) = self.members.iter_mut().find(|m| m.member_id == member_id) else {
            return Ok(false);
        };
        if !member.is_expired() {
            debug!(member_id, "renew skipped; member not expired");
            return Ok(false);
        }
        member.status = MemberStatus::Valid;
        self.save(Collection::Members)?;
        info!(member_id, "member_renewed");
        Ok(true)
    }

    pub fn filter_members<F>(&self, pred: F) -> Vec<&Member>
    where
        F: Fn(&Member) -> bool,
    {
        self.members.iter().filter(|m| pred(m)).collect()
    }

    pub fn members_with_status(&self, status: MemberStatus) -> Vec<&Member> {
        self.filter_members(|m| m.status == status)
    }

    pub fn expired_members(&self) -> Vec<&Member> { self.members_with_status(MemberStatus::Expired) }

    pub fn valid_members(&self) -> Vec<&Member> { self.members_with_status(MemberStatus::Valid) }

    // ---- providers ----

    pub fn providers(&self) -> &[Provider] { &self.providers }

    pub fn get_provider(&self, provider_id: &str) -> Option<&Provider> { find_by_key(&self.providers, provider_id) }

    /// Add a provider and its sign-in credential.
    ///
    /// The credential is `derive_provider_username(name)` with the new provider id
    /// as password; an existing credential under that username is overwritten.
    /// Providers are written before users and nothing is rolled back if the
    /// second write fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_provider(&mut self, input: ProviderInput) -> Result<String, ServiceError> {
        let provider_id = ids::generate_unique_id(&mut self.rng, self.options.max_id_attempts, |id| {
            find_by_key(&self.providers, id).is_some()
        })?;
        let username = derive_provider_username(&input.name);
        self.providers.push(Provider {
            provider_id: provider_id.clone(),
            name: input.name,
            address: input.address,
            city: input.city,
            state: input.state.to_uppercase(),
            zip: input.zip,
        });
        self.save(Collection::Providers)?;
        info!(%provider_id, "provider_created");

        self.upsert_user(User::new(username.clone(), provider_id.clone(), Role::Provider))?;
        info!(%provider_id, %username, "provider_account_created");
        Ok(provider_id)
    }

    pub fn update_provider(&mut self, provider_id: &str, changes: ProviderUpdate) -> Result<bool, ServiceError> {
        self.update_record::<Provider, _>(Collection::Providers, provider_id, changes)
    }

    /// Remove the provider only; its credential stays.
    pub fn delete_provider(&mut self, provider_id: &str) -> Result<bool, ServiceError> {
        self.delete_record::<Provider>(Collection::Providers, provider_id)
    }

    /// Remove the provider and the provider credential carrying its derived username, if any.
    pub fn delete_provider_with_account(&mut self, provider_id: &str) -> Result<bool, ServiceError> {
        let Some(username) = self.get_provider(provider_id).map(Provider::username) else {
            return Ok(false);
        };
        self.delete_provider(provider_id)?;
        let account = self
            .user_index(&username)
            .filter(|&idx| self.users.get_index(idx).is_some_and(|(_, u)| u.role == Role::Provider));
        if let Some(idx) = account {
            self.users.shift_remove_index(idx);
            self.save(Collection::Users)?;
            info!(%username, "provider_account_deleted");
        }
        Ok(true)
    }

    /// Provider whose derived username equals `username`, provided that user exists with the provider role.
    pub fn get_provider_by_username(&self, username: &str) -> Option<&Provider> {
        let user = self.get_user(username)?;
        if user.role != Role::Provider {
            return None;
        }
        self.providers.iter().find(|p| p.username() == username)
    }

    // ---- service directory ----

    pub fn services(&self) -> &[ServiceEntry] { &self.services }

    /// Directory sorted by service name.
    pub fn sorted_services(&self) -> Vec<&ServiceEntry> {
        let mut rows: Vec<&ServiceEntry> = self.services.iter().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    pub fn get_service(&self, code: &str) -> Option<&ServiceEntry> { find_by_key(&self.services, code) }

    /// Case-insensitive substring search on code or name, in directory order.
    pub fn search_services(&self, term: &str) -> Vec<&ServiceEntry> {
        let needle = term.to_lowercase();
        let hits: Vec<&ServiceEntry> = self.services.iter().filter(|s| s.matches_lowercase(&needle)).collect();
        debug!(term, hits = hits.len(), "search_services");
        hits
    }

    /// Append a directory entry. `false` without writing if the code exists.
    pub fn add_service(&mut self, entry: ServiceEntry) -> Result<bool, ServiceError> {
        if self.get_service(&entry.code).is_some() {
            return Ok(false);
        }
        let code = entry.code.clone();
        self.services.push(entry);
        self.save(Collection::ServiceDirectory)?;
        info!(%code, "service_added");
        Ok(true)
    }

    pub fn update_service(&mut self, code: &str, changes: ServiceUpdate) -> Result<bool, ServiceError> {
        self.update_record::<ServiceEntry, _>(Collection::ServiceDirectory, code, changes)
    }

    pub fn delete_service(&mut self, code: &str) -> Result<bool, ServiceError> {
        self.delete_record::<ServiceEntry>(Collection::ServiceDirectory, code)
    }

    // ---- service claims ----

    pub fn claims(&self) -> &[ServiceClaim] { &self.claims }

    pub fn get_claim(&self, claim_id: &str) -> Option<&ServiceClaim> { find_by_key(&self.claims, claim_id) }

    /// File a `Pending` claim, snapshotting the service's current name and fee.
    ///
    /// Fails with [`ServiceError::UnknownServiceCode`] and appends nothing if the
    /// code is not in the directory. Member and provider numbers are not checked.
    #[instrument(skip(self, input), fields(member_id = %input.member_id, service_code = %input.service_code))]
    pub fn add_service_claim(&mut self, input: ClaimInput) -> Result<String, ServiceError> {
        let service = self
            .get_service(&input.service_code)
            .ok_or_else(|| ServiceError::UnknownServiceCode(input.service_code.clone()))?;
        let (service_name, fee) = (service.name.clone(), service.fee);

        let claim_id = ids::next_claim_id(self.options.claim_ids, &self.claims);
        self.claims.push(ServiceClaim {
            claim_id: claim_id.clone(),
            submitted_at: Local::now().format(CLAIM_TIMESTAMP_FORMAT).to_string(),
            date_of_service: input.date_of_service,
            provider_number: input.provider_number,
            member_id: input.member_id,
            service_code: input.service_code,
            service_name,
            fee,
            comments: input.comments,
            status: ClaimStatus::Pending,
        });
        self.save(Collection::ServiceClaims)?;
        info!(%claim_id, fee, "claim_filed");
        Ok(claim_id)
    }

    pub fn update_claim(&mut self, claim_id: &str, changes: ClaimUpdate) -> Result<bool, ServiceError> {
        self.update_record::<ServiceClaim, _>(Collection::ServiceClaims, claim_id, changes)
    }

    /// `Pending` to `Approved`. `false` if the claim is missing or already approved.
    pub fn approve_claim(&mut self, claim_id: &str) -> Result<bool, ServiceError> {
        match self.get_claim(claim_id) {
            Some(c) if c.status == ClaimStatus::Pending => {}
            _ => return Ok(false),
        }
        self.update_claim(claim_id, ClaimUpdate { status: Some(ClaimStatus::Approved), ..Default::default() })
    }

    pub fn delete_claim(&mut self, claim_id: &str) -> Result<bool, ServiceError> {
        self.delete_record::<ServiceClaim>(Collection::ServiceClaims, claim_id)
    }

    pub fn filter_claims<F>(&self, pred: F) -> Vec<&ServiceClaim>
    where
        F: Fn(&ServiceClaim) -> bool,
    {
        self.claims.iter().filter(|c| pred(c)).collect()
    }

    pub fn claims_with_status(&self, status: ClaimStatus) -> Vec<&ServiceClaim> {
        self.filter_claims(|c| c.status == status)
    }

    pub fn pending_claims(&self) -> Vec<&ServiceClaim> { self.claims_with_status(ClaimStatus::Pending) }

    pub fn approved_claims(&self) -> Vec<&ServiceClaim> { self.claims_with_status(ClaimStatus::Approved) }

    pub fn claims_for_member(&self, member_id: &str) -> Vec<&ServiceClaim> {
        self.filter_claims(|c| c.member_id == member_id)
    }

    pub fn claims_for_provider(&self, provider_number: &str) -> Vec<&ServiceClaim> {
        self.filter_claims(|c| c.provider_number == provider_number)
    }
}

/// Maps a record type to the store field holding it, so key-based update and
/// delete are written once for every list-shaped collection.
trait RowsOf<T> {
    fn rows(&self) -> &[T];
    fn rows_mut(&mut self) -> &mut [T];
    fn rows_vec_mut(&mut self) -> &mut Vec<T>;
}

macro_rules! rows_of {
    ($ty:ty, $field:ident) => {
        impl<B: DocumentBackend> RowsOf<$ty> for RecordStore<B> {
            fn rows(&self) -> &[$ty] { &self.$field }
            fn rows_mut(&mut self) -> &mut [$ty] { &mut self.$field }
            fn rows_vec_mut(&mut self) -> &mut Vec<$ty> { &mut self.$field }
        }
    };
}

rows_of!(Member, members);
rows_of!(Provider, providers);
rows_of!(ServiceClaim, claims);
rows_of!(ServiceEntry, services);
