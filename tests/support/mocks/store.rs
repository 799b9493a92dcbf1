// tests/support/mocks/store.rs
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use certshop::domain::certificate::{
    Certificate, CertificateId, CertificateName, CertificateReadRepository, CertificateUpdate,
    CertificateWriteRepository, Description, Duration, NewCertificate, Price, SortClause,
};
use certshop::domain::errors::{DomainError, DomainResult};
use certshop::domain::order::{NewOrder, Order, OrderFilter, OrderId, OrderRepository};
use certshop::domain::tag::{ResolvedTag, Tag, TagId, TagName, TagRepository};
use certshop::domain::user::{
    Email, NewUser, PersonName, User, UserId, UserRepository, UserUpdate,
};

#[derive(Debug, Clone)]
struct StoredCertificate {
    id: i64,
    name: CertificateName,
    description: Description,
    price: Price,
    duration: Duration,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    tag_ids: Vec<i64>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    tags: BTreeMap<i64, Tag>,
    certificates: BTreeMap<i64, StoredCertificate>,
    orders: BTreeMap<i64, Order>,
    users: BTreeMap<i64, User>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn materialize(&self, stored: &StoredCertificate) -> Certificate {
        let mut tags: Vec<Tag> = stored
            .tag_ids
            .iter()
            .filter_map(|id| self.tags.get(id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Certificate {
            id: CertificateId(stored.id),
            name: stored.name.clone(),
            description: stored.description.clone(),
            price: stored.price.clone(),
            duration: stored.duration,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            tags,
        }
    }

    fn certificates_where(&self, keep: impl Fn(&Certificate) -> bool) -> Vec<Certificate> {
        self.certificates
            .values()
            .map(|stored| self.materialize(stored))
            .filter(|certificate| keep(certificate))
            .collect()
    }

    /// Links by name like the Postgres repository: a resolved tag that was
    /// removed in the meantime is created again.
    fn tag_id_for(&mut self, resolved: ResolvedTag) -> i64 {
        let name = resolved.name().clone();
        if let Some(existing) = self.tags.values().find(|tag| tag.name == name) {
            return existing.id.0;
        }
        let id = self.next_id();
        self.tags.insert(id, Tag::new(TagId(id), name));
        id
    }

    fn purge_orphans(&mut self, candidates: &[TagId]) -> Vec<Tag> {
        let mut purged = Vec::new();
        for id in candidates {
            let linked = self
                .certificates
                .values()
                .any(|stored| stored.tag_ids.contains(&id.0));
            if linked {
                continue;
            }
            if let Some(tag) = self.tags.remove(&id.0) {
                purged.push(tag);
            }
        }
        purged
    }
}

fn sorted(mut certificates: Vec<Certificate>, sort: &SortClause) -> Vec<Certificate> {
    sort.apply(&mut certificates);
    certificates
}

/// One in-memory store behind every repository trait, with a log of the
/// mutating calls it received.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn record_orphan_checks(&self, candidates: &[TagId]) {
        for id in candidates {
            self.record(format!("tags.orphan_check:{}", id.0));
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, call: &str) -> bool {
        self.calls().iter().any(|recorded| recorded == call)
    }

    pub fn tag_names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut names: Vec<String> = state
            .tags
            .values()
            .map(|tag| tag.name.as_str().to_string())
            .collect();
        names.sort();
        names
    }

    pub fn certificate_count(&self) -> usize {
        self.state.lock().unwrap().certificates.len()
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub fn stored_user(&self, id: i64) -> Option<User> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }

    /* -------------------------------- seeding -------------------------------- */

    pub fn seed_tag(&self, name: &str) -> Tag {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let tag = Tag::new(TagId(id), TagName::new(name).unwrap());
        state.tags.insert(id, tag.clone());
        tag
    }

    pub fn seed_certificate(
        &self,
        name: &str,
        description: &str,
        price: BigDecimal,
        duration: i32,
        tags: &[&str],
        created_at: DateTime<Utc>,
    ) -> Certificate {
        let mut state = self.state.lock().unwrap();
        let tag_ids = tags
            .iter()
            .map(|name| state.tag_id_for(ResolvedTag::New(TagName::new(*name).unwrap())))
            .collect();
        let id = state.next_id();
        let stored = StoredCertificate {
            id,
            name: CertificateName::new(name).unwrap(),
            description: Description::new(description).unwrap(),
            price: Price::new(price).unwrap(),
            duration: Duration::new(duration).unwrap(),
            created_at,
            updated_at: created_at,
            tag_ids,
        };
        let certificate = state.materialize(&stored);
        state.certificates.insert(id, stored);
        certificate
    }

    pub fn seed_user(&self, first_name: &str, last_name: &str, email: &str, password_hash: &str) -> User {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let user = User {
            id: UserId(id),
            first_name: PersonName::new(first_name).unwrap(),
            last_name: PersonName::new(last_name).unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: certshop::domain::user::PasswordHash::new(password_hash).unwrap(),
            role: certshop::domain::user::Role::User,
        };
        state.users.insert(id, user.clone());
        user
    }

    pub fn seed_order(&self, user: &User, certificates: &[&Certificate], created_at: DateTime<Utc>) -> Order {
        let owned: Vec<Certificate> = certificates.iter().map(|c| (*c).clone()).collect();
        let new_order = NewOrder::purchase(user.id, &owned, created_at);
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let order = Order {
            id: OrderId(id),
            cost: new_order.cost,
            created_at: new_order.created_at,
            user_id: new_order.user_id,
            certificate_ids: new_order.certificate_ids,
        };
        state.orders.insert(id, order.clone());
        order
    }
}

#[async_trait]
impl CertificateWriteRepository for InMemoryStore {
    async fn insert(&self, certificate: NewCertificate) -> DomainResult<Certificate> {
        self.record("certificates.insert");
        let mut state = self.state.lock().unwrap();
        if state.certificates.values().any(|stored| {
            stored.name == certificate.name && stored.description == certificate.description
        }) {
            return Err(DomainError::conflict("certificate already exists"));
        }
        let tag_ids = certificate
            .tags
            .into_iter()
            .map(|tag| state.tag_id_for(tag))
            .collect();
        let id = state.next_id();
        let stored = StoredCertificate {
            id,
            name: certificate.name,
            description: certificate.description,
            price: certificate.price,
            duration: certificate.duration,
            created_at: certificate.created_at,
            updated_at: certificate.updated_at,
            tag_ids,
        };
        let created = state.materialize(&stored);
        state.certificates.insert(id, stored);
        Ok(created)
    }

    async fn update(
        &self,
        update: CertificateUpdate,
        orphan_candidates: &[TagId],
    ) -> DomainResult<(Certificate, Vec<Tag>)> {
        self.record("certificates.update");
        self.record_orphan_checks(orphan_candidates);
        let mut state = self.state.lock().unwrap();
        let mut stored = state
            .certificates
            .get(&update.id.0)
            .cloned()
            .ok_or_else(|| DomainError::not_found("certificate"))?;
        if let Some(name) = update.name {
            stored.name = name;
        }
        if let Some(description) = update.description {
            stored.description = description;
        }
        if let Some(price) = update.price {
            stored.price = price;
        }
        if let Some(duration) = update.duration {
            stored.duration = duration;
        }
        if let Some(tags) = update.tags {
            stored.tag_ids = tags.into_iter().map(|tag| state.tag_id_for(tag)).collect();
        }
        stored.updated_at = update.updated_at;
        let id = stored.id;
        state.certificates.insert(id, stored);
        let purged = state.purge_orphans(orphan_candidates);
        let updated = state.materialize(&state.certificates[&id]);
        Ok((updated, purged))
    }

    async fn delete(&self, id: CertificateId, orphan_candidates: &[TagId]) -> DomainResult<Vec<Tag>> {
        self.record("certificates.delete");
        self.record_orphan_checks(orphan_candidates);
        let mut state = self.state.lock().unwrap();
        if state
            .orders
            .values()
            .any(|order| order.certificate_ids.contains(&id))
        {
            return Err(DomainError::conflict(
                "certificate is referenced by existing orders",
            ));
        }
        if state.certificates.remove(&id.0).is_none() {
            return Err(DomainError::not_found("certificate"));
        }
        Ok(state.purge_orphans(orphan_candidates))
    }

    async fn purge_orphaned_tags(&self, candidates: &[TagId]) -> DomainResult<Vec<Tag>> {
        self.record_orphan_checks(candidates);
        Ok(self.state.lock().unwrap().purge_orphans(candidates))
    }
}

#[async_trait]
impl CertificateReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: CertificateId) -> DomainResult<Option<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(state.certificates.get(&id.0).map(|stored| state.materialize(stored)))
    }

    async fn find_by_ids(&self, ids: &[CertificateId]) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(state.certificates_where(|certificate| ids.contains(&certificate.id)))
    }

    async fn find_by_name_and_description(
        &self,
        name: &CertificateName,
        description: &Description,
    ) -> DomainResult<Option<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .certificates_where(|certificate| certificate.is_same_offer(name, description))
            .into_iter()
            .next())
    }

    async fn list(&self, sort: &SortClause) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(sorted(state.certificates_where(|_| true), sort))
    }

    async fn find_by_name(&self, fragment: &str, sort: &SortClause) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(sorted(
            state.certificates_where(|certificate| certificate.name.as_str().contains(fragment)),
            sort,
        ))
    }

    async fn find_by_description(
        &self,
        fragment: &str,
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(sorted(
            state.certificates_where(|certificate| {
                certificate.description.as_str().contains(fragment)
            }),
            sort,
        ))
    }

    async fn find_by_tag_names(
        &self,
        names: &[TagName],
        sort: &SortClause,
    ) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(sorted(
            state.certificates_where(|certificate| {
                names.iter().all(|name| certificate.has_tag(name.as_str()))
            }),
            sort,
        ))
    }

    async fn find_by_user_id(&self, user_id: UserId, sort: &SortClause) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        let bought: HashSet<CertificateId> = state
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .flat_map(|order| order.certificate_ids.iter().copied())
            .collect();
        Ok(sorted(
            state.certificates_where(|certificate| bought.contains(&certificate.id)),
            sort,
        ))
    }

    async fn find_by_tag_id(&self, tag_id: TagId) -> DomainResult<Vec<Certificate>> {
        let state = self.state.lock().unwrap();
        Ok(state.certificates_where(|certificate| certificate.tags.iter().any(|tag| tag.id == tag_id)))
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn find_by_id(&self, id: TagId) -> DomainResult<Option<Tag>> {
        Ok(self.state.lock().unwrap().tags.get(&id.0).cloned())
    }

    async fn find_by_name(&self, name: &TagName) -> DomainResult<Option<Tag>> {
        let state = self.state.lock().unwrap();
        Ok(state.tags.values().find(|tag| &tag.name == name).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Tag>> {
        Ok(self.state.lock().unwrap().tags.values().cloned().collect())
    }

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<Tag>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .certificates
            .get(&id.0)
            .map(|stored| state.materialize(stored).tags)
            .unwrap_or_default())
    }

    async fn insert(&self, name: TagName) -> DomainResult<Tag> {
        self.record("tags.insert");
        let mut state = self.state.lock().unwrap();
        if state.tags.values().any(|tag| tag.name == name) {
            return Err(DomainError::conflict("tag name already exists"));
        }
        let id = state.next_id();
        let tag = Tag::new(TagId(id), name);
        state.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn delete(&self, id: TagId) -> DomainResult<()> {
        self.record(format!("tags.delete:{}", id.0));
        let mut state = self.state.lock().unwrap();
        state.tags.remove(&id.0);
        for stored in state.certificates.values_mut() {
            stored.tag_ids.retain(|tag_id| *tag_id != id.0);
        }
        Ok(())
    }

    async fn most_used_by_top_spenders(&self) -> DomainResult<Vec<Tag>> {
        let state = self.state.lock().unwrap();
        let mut spend: HashMap<UserId, BigDecimal> = HashMap::new();
        for order in state.orders.values() {
            let total = spend.entry(order.user_id).or_insert_with(|| BigDecimal::from(0));
            *total = total.clone() + &order.cost;
        }
        let Some(max_spend) = spend.values().max().cloned() else {
            return Ok(Vec::new());
        };
        let top_users: HashSet<UserId> = spend
            .into_iter()
            .filter(|(_, total)| *total == max_spend)
            .map(|(user, _)| user)
            .collect();

        let mut uses: HashMap<i64, usize> = HashMap::new();
        for order in state.orders.values().filter(|order| top_users.contains(&order.user_id)) {
            for certificate_id in &order.certificate_ids {
                if let Some(stored) = state.certificates.get(&certificate_id.0) {
                    for tag_id in &stored.tag_ids {
                        *uses.entry(*tag_id).or_default() += 1;
                    }
                }
            }
        }
        let Some(max_uses) = uses.values().max().copied() else {
            return Ok(Vec::new());
        };
        let mut tags: Vec<Tag> = uses
            .into_iter()
            .filter(|(_, count)| *count == max_uses)
            .filter_map(|(id, _)| state.tags.get(&id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(tags)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn find_by_id(&self, id: OrderId) -> DomainResult<Option<Order>> {
        Ok(self.state.lock().unwrap().orders.get(&id.0).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Order>> {
        Ok(self.state.lock().unwrap().orders.values().cloned().collect())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> DomainResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_filter(&self, filter: &OrderFilter) -> DomainResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .values()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect())
    }

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .orders
            .values()
            .filter(|order| order.certificate_ids.contains(&id))
            .cloned()
            .collect())
    }

    async fn insert(&self, order: NewOrder) -> DomainResult<Order> {
        self.record("orders.insert");
        let mut state = self.state.lock().unwrap();
        if !state.users.contains_key(&order.user_id.0) {
            return Err(DomainError::not_found("user"));
        }
        if let Some(missing) = order
            .certificate_ids
            .iter()
            .find(|id| !state.certificates.contains_key(&id.0))
        {
            return Err(DomainError::not_found(format!("certificate {} not found", missing.0)));
        }
        let id = state.next_id();
        let stored = Order {
            id: OrderId(id),
            cost: order.cost,
            created_at: order.created_at,
            user_id: order.user_id,
            certificate_ids: order.certificate_ids,
        };
        state.orders.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: OrderId) -> DomainResult<()> {
        self.record("orders.delete");
        self.state.lock().unwrap().orders.remove(&id.0);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.values().find(|user| &user.email == email).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.state.lock().unwrap().users.values().cloned().collect())
    }

    async fn find_by_first_name(&self, first_name: &PersonName) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .filter(|user| &user.first_name == first_name)
            .cloned()
            .collect())
    }

    async fn find_by_last_name(&self, last_name: &PersonName) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .filter(|user| &user.last_name == last_name)
            .cloned()
            .collect())
    }

    async fn find_by_full_name(
        &self,
        first_name: &PersonName,
        last_name: &PersonName,
    ) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .values()
            .filter(|user| &user.first_name == first_name && &user.last_name == last_name)
            .cloned()
            .collect())
    }

    async fn find_by_certificate_id(&self, id: CertificateId) -> DomainResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        let buyers: HashSet<UserId> = state
            .orders
            .values()
            .filter(|order| order.certificate_ids.contains(&id))
            .map(|order| order.user_id)
            .collect();
        Ok(state
            .users
            .values()
            .filter(|user| buyers.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        self.record("users.insert");
        let mut state = self.state.lock().unwrap();
        if state.users.values().any(|user| user.email == new_user.email) {
            return Err(DomainError::conflict("e-mail already registered"));
        }
        let id = state.next_id();
        let user = User {
            id: UserId(id),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        self.record("users.update");
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .get_mut(&update.id.0)
            .ok_or_else(|| DomainError::not_found("user"))?;
        if let Some(role) = update.role {
            user.set_role(role);
        }
        Ok(user.clone())
    }
}
