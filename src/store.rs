//! Canonical state: the record list plus page, search and sort settings.
//!
//! Every setter replaces exactly one field. Nothing here validates or clamps;
//! page bounds are enforced by the controller.

use crate::model::{NewUser, SortConfig, SortDirection, SortKey, UserRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserStore {
    users: Vec<UserRecord>,
    current_page: usize,
    search_term: String,
    sort_config: SortConfig,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            current_page: 1,
            search_term: String::new(),
            sort_config: SortConfig::default(),
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort_config
    }

    pub fn set_users(&mut self, users: Vec<UserRecord>) {
        self.users = users;
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort_config(&mut self, config: SortConfig) {
        self.sort_config = config;
    }

    /// Sort by `key`, flipping to descending when it is already ascending.
    pub fn request_sort(&mut self, key: SortKey) -> SortConfig {
        let direction = if self.sort_config.key == Some(key)
            && self.sort_config.direction == SortDirection::Asc
        {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        let config = SortConfig::new(key, direction);
        self.set_sort_config(config);
        config
    }

    /// Append a record with `id = len + 1`.
    ///
    /// Ids are only unique because records are never removed.
    pub fn insert(&mut self, new_user: NewUser) -> UserRecord {
        let id = self.users.len() as u32 + 1;
        let record = new_user.into_record(id);
        let mut users = std::mem::take(&mut self.users);
        users.push(record.clone());
        self.set_users(users);
        record
    }
}
